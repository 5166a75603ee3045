use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fitness_client::pages::{
    COMMON_EXERCISES, CONNECTION_ERROR, DashboardPage, DashboardState, Feedback, Habit,
    HabitsPage, PhotosPage, WeightPage, WorkoutsPage, today,
};
use fitness_client::shell::Page;
use fitness_client::stats::{estimate_one_rep_max, habit_completion_percentage};
use fitness_client::{
    ApiError, ClientConfig, DEFAULT_RECENT_PHOTOS, FitnessClient, ImageFile, validate_image_file,
};

mod logging;
mod render;

use logging::{init_logging, log_level_from_env};

#[derive(Debug, Parser)]
#[command(
    name = "fitness-cli",
    version,
    about = "Registro de peso, entrenamientos, hábitos y fotos de progreso"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resumen calculado por el backend.
    Dashboard,
    /// Peso corporal.
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },
    /// Entrenamientos.
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },
    /// Hábitos diarios.
    Habits {
        #[command(subcommand)]
        action: HabitAction,
    },
    /// Fotos de progreso.
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },
    /// Muestra una página por id (dashboard, weight, workouts, habits, photos).
    Show { page: String },
}

#[derive(Debug, Subcommand)]
enum WeightAction {
    /// Registra un peso.
    Add {
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
        #[arg(long)]
        body_fat: Option<f64>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Fecha YYYY-MM-DD (por defecto hoy).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Lista todos los registros.
    List,
    /// Último registro.
    Current,
}

#[derive(Debug, Subcommand)]
enum WorkoutAction {
    /// Registra una serie.
    Add {
        #[arg(long, default_value = "")]
        exercise: String,
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
        #[arg(long, allow_negative_numbers = true)]
        reps: i64,
        #[arg(long, default_value_t = 1)]
        sets: u32,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Lista entrenamientos, opcionalmente de un ejercicio.
    List {
        #[arg(long)]
        exercise: Option<String>,
    },
    /// Récords personales.
    Prs,
    /// Ejercicios habituales.
    Exercises,
    /// Estima el 1RM (fórmula de Epley).
    Estimate {
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
        #[arg(long, allow_negative_numbers = true)]
        reps: i64,
    },
}

#[derive(Debug, Subcommand)]
enum HabitAction {
    /// Registra los hábitos del día (reemplaza el registro de esa fecha).
    Log {
        #[arg(long)]
        sleep: bool,
        #[arg(long)]
        water: bool,
        #[arg(long)]
        cardio: bool,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Hábitos de una fecha (por defecto hoy).
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Cumplimiento semanal.
    Compliance,
}

#[derive(Debug, Subcommand)]
enum PhotoAction {
    /// Sube una foto y guarda su información.
    Upload {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Fotos recientes.
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_PHOTOS)]
        limit: u32,
    },
    /// Todas las fotos.
    List,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&log_level_from_env())?;

    let config = ClientConfig::from_env().context("configuración inválida")?;
    config.report_missing();
    let client = FitnessClient::new(&config).map_err(map_api_error)?;

    match cli.command {
        Command::Dashboard => show_dashboard(&client).await?,
        Command::Weight { action } => run_weight(&client, action).await?,
        Command::Workout { action } => run_workout(&client, action).await?,
        Command::Habits { action } => run_habits(&client, action).await?,
        Command::Photo { action } => run_photo(&client, action).await?,
        Command::Show { page } => show_page(&client, Page::from_id(&page)).await?,
    }

    Ok(())
}

async fn run_weight(client: &FitnessClient, action: WeightAction) -> Result<()> {
    match action {
        WeightAction::Add {
            weight,
            body_fat,
            notes,
            date,
        } => {
            let mut page = WeightPage::new();
            page.form.date = date.unwrap_or_else(today);
            page.form.weight = weight;
            page.form.body_fat = body_fat;
            page.form.notes = notes;

            page.submit(client).await;
            finish(page.message)
        }
        WeightAction::List => {
            let entries = client.weight().get_all().await.map_err(map_api_error)?;
            render::print_weights(&entries);
            Ok(())
        }
        WeightAction::Current => {
            let entry = client.weight().get_current().await.map_err(map_api_error)?;
            render::print_weights(std::slice::from_ref(&entry));
            Ok(())
        }
    }
}

async fn run_workout(client: &FitnessClient, action: WorkoutAction) -> Result<()> {
    match action {
        WorkoutAction::Add {
            exercise,
            weight,
            reps,
            sets,
            notes,
            date,
        } => {
            let mut page = WorkoutsPage::new();
            page.form.date = date.unwrap_or_else(today);
            page.form.exercise = exercise;
            page.form.weight = weight;
            page.form.reps = clamp_reps(reps);
            page.form.sets = sets;
            page.form.notes = notes;

            if let Some(one_rm) = page.form.one_rep_max() {
                println!("1RM estimado: {one_rm:.0} kg");
            }
            page.submit(client).await;
            finish(page.message)
        }
        WorkoutAction::List { exercise } => {
            let workouts = match exercise {
                Some(exercise) => client.workouts().get_by_exercise(&exercise).await,
                None => client.workouts().get_all().await,
            }
            .map_err(map_api_error)?;
            render::print_workouts(&workouts);
            Ok(())
        }
        WorkoutAction::Prs => {
            let records = client
                .workouts()
                .get_personal_records()
                .await
                .map_err(map_api_error)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&records).context("no se pudo formatear")?
            );
            Ok(())
        }
        WorkoutAction::Exercises => {
            for exercise in COMMON_EXERCISES {
                println!("- {exercise}");
            }
            Ok(())
        }
        WorkoutAction::Estimate { weight, reps } => {
            match estimate_one_rep_max(weight, clamp_reps(reps)) {
                Some(one_rm) => println!("1RM estimado: {one_rm:.0} kg"),
                None => println!("Introduce peso y repeticiones mayores a 0"),
            }
            Ok(())
        }
    }
}

async fn run_habits(client: &FitnessClient, action: HabitAction) -> Result<()> {
    match action {
        HabitAction::Log {
            sleep,
            water,
            cardio,
            notes,
            date,
        } => {
            let mut page = HabitsPage::new();
            page.form.date = date.unwrap_or_else(today);
            page.form.notes = notes;
            for (checked, habit) in [sleep, water, cardio].into_iter().zip(Habit::ALL) {
                if checked {
                    page.form.toggle(habit);
                }
            }

            println!(
                "Progreso del día: {}/3 ({}%)",
                page.form.completed_count(),
                page.form.completion_percentage()
            );
            page.submit(client).await;
            finish(page.message)
        }
        HabitAction::Show { date } => {
            let date = date.unwrap_or_else(today);
            let entry = client
                .habits()
                .get_by_date(date)
                .await
                .map_err(map_api_error)?;
            render::print_habits(&entry, habit_completion_percentage(&entry));
            Ok(())
        }
        HabitAction::Compliance => {
            let compliance = client
                .habits()
                .get_weekly_compliance()
                .await
                .map_err(map_api_error)?;
            println!("Cumplimiento semanal: {compliance:.0}%");
            Ok(())
        }
    }
}

async fn run_photo(client: &FitnessClient, action: PhotoAction) -> Result<()> {
    match action {
        PhotoAction::Upload {
            file,
            description,
            date,
        } => {
            let image = read_image(&file)?;
            let mut page = PhotosPage::new();
            page.form.date = date.unwrap_or_else(today);
            page.form.description = description;

            if !page.select_file(image) {
                return finish(page.message);
            }
            page.submit(client).await;
            if page.message.as_ref().is_some_and(|m| !m.is_error()) {
                render::print_photos(&page.photos);
            }
            finish(page.message)
        }
        PhotoAction::Recent { limit } => {
            let photos = client
                .photos()
                .get_recent(limit)
                .await
                .map_err(map_api_error)?;
            render::print_photos(&photos);
            Ok(())
        }
        PhotoAction::List => {
            let photos = client.photos().get_all().await.map_err(map_api_error)?;
            render::print_photos(&photos);
            Ok(())
        }
    }
}

async fn show_page(client: &FitnessClient, page: Page) -> Result<()> {
    println!("== {page} ==");
    match page {
        Page::Dashboard => show_dashboard(client).await,
        Page::Weight => run_weight(client, WeightAction::List).await,
        Page::Workouts => run_workout(client, WorkoutAction::List { exercise: None }).await,
        Page::Habits => run_habits(client, HabitAction::Show { date: None }).await,
        Page::Photos => {
            let mut photos = PhotosPage::new();
            photos.load(client).await;
            render::print_photos(&photos.photos);
            Ok(())
        }
    }
}

async fn show_dashboard(client: &FitnessClient) -> Result<()> {
    let mut page = DashboardPage::new();
    match page.load(client).await {
        DashboardState::Ready(data) => {
            render::print_dashboard(data);
            Ok(())
        }
        DashboardState::Failed(text) => Err(anyhow!("{text}")),
        DashboardState::Loading => Err(anyhow!("No hay datos disponibles")),
    }
}

/// Negative input maps to zero so form validation reports it.
fn clamp_reps(reps: i64) -> u32 {
    u32::try_from(reps).unwrap_or(0)
}

fn detect_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("no se pudo leer {}", path.display()))?;
    let mime_type = detect_mime(path);

    // Checked before reading so oversized files are never loaded.
    if let Err(message) = validate_image_file(metadata.len(), &mime_type) {
        bail!("{message}");
    }

    let bytes = fs::read(path).with_context(|| format!("no se pudo leer {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    Ok(ImageFile {
        file_name,
        mime_type,
        bytes,
    })
}

fn finish(message: Option<Feedback>) -> Result<()> {
    match message {
        Some(feedback) if feedback.is_error() => Err(anyhow!(feedback.text)),
        Some(feedback) => {
            println!("{}", feedback.text);
            Ok(())
        }
        None => Ok(()),
    }
}

fn map_api_error(err: ApiError) -> anyhow::Error {
    let message = match err {
        ApiError::Configuration(message) => format!(
            "configuración incompleta: {message} (revisa APP_SCRIPT_URL y API_KEY en .env)"
        ),
        ApiError::Network(message) => format!("{CONNECTION_ERROR}: {message}"),
        other => other.to_string(),
    };
    anyhow!(message)
}
