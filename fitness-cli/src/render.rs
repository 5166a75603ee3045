use fitness_client::pages::Habit;
use fitness_client::{DashboardData, HabitEntry, ProgressPhoto, WeightEntry, WorkoutEntry};

pub fn print_dashboard(data: &DashboardData) {
    println!("Peso actual: {:.1} kg", data.current_weight);
    if let Some(body_fat) = data.current_body_fat {
        println!("Grasa corporal: {body_fat:.1}%");
    }
    println!("IMC: {:.1}", data.bmi);
    println!("Progreso: {:.1}%", data.progress_percentage);
    println!("Peso objetivo: {:.1} kg", data.target_weight);
    println!("Hábitos: {:.0}%", data.habits_compliance);

    println!("1RM:");
    println!("  Press de Banca: {:.0} kg", data.one_rep_max.bench);
    println!("  Sentadilla: {:.0} kg", data.one_rep_max.squat);
    println!("  Peso Muerto: {:.0} kg", data.one_rep_max.deadlift);

    if data.personal_records.is_empty() {
        println!("Récords personales: ninguno");
    } else {
        println!("Récords personales:");
        for record in &data.personal_records {
            println!(
                "  - {}: {} kg x {} ({})",
                record.exercise, record.weight, record.reps, record.date
            );
        }
    }

    println!("Fotos recientes: {}", data.recent_photos.len());
}

pub fn print_weights(entries: &[WeightEntry]) {
    if entries.is_empty() {
        println!("No hay registros de peso");
        return;
    }

    for entry in entries {
        let body_fat = entry
            .body_fat
            .map(|value| format!(", grasa {value:.1}%"))
            .unwrap_or_default();
        let notes = entry
            .notes
            .as_deref()
            .map(|notes| format!(" ({notes})"))
            .unwrap_or_default();
        println!("- {}: {:.1} kg{body_fat}{notes}", entry.date, entry.weight);
    }
}

pub fn print_workouts(workouts: &[WorkoutEntry]) {
    if workouts.is_empty() {
        println!("No hay entrenamientos registrados");
        return;
    }

    for workout in workouts {
        println!(
            "- {} {}: {} kg x {} reps x {} series",
            workout.date,
            workout.exercise,
            workout.weight,
            workout.reps,
            workout.sets.unwrap_or(1)
        );
    }
}

pub fn print_habits(entry: &HabitEntry, completion: u32) {
    let mark = |done: bool| if done { "[x]" } else { "[ ]" };

    println!("Hábitos del {}", entry.date);
    for habit in Habit::ALL {
        println!("  {} {}", mark(habit.is_done(entry)), habit.label());
    }
    println!("Completado: {completion}%");
    if let Some(notes) = entry.notes.as_deref() {
        println!("Notas: {notes}");
    }
}

pub fn print_photos(photos: &[ProgressPhoto]) {
    if photos.is_empty() {
        println!("No hay fotos registradas");
        return;
    }

    for photo in photos {
        match photo.description.as_deref() {
            Some(description) => println!("- {} {} ({description})", photo.date, photo.url),
            None => println!("- {} {}", photo.date, photo.url),
        }
    }
}
