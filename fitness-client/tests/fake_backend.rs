use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Form, Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::NaiveDate;
use fitness_client::pages::{
    DashboardPage, DashboardState, Feedback, FeedbackKind, Habit, HabitForm, HabitsPage,
    PhotosPage, WeightPage, WorkoutsPage, today,
};
use fitness_client::{
    ApiError, ApiResponse, ClientConfig, FitnessClient, ImageFile, ImageHostConfig, WeightEntry,
};
use serde_json::{Value, json};

const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str),
}

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Default)]
struct Backend {
    replies: HashMap<(&'static str, String), Reply>,
    calls: Mutex<Vec<Call>>,
}

impl Backend {
    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn reply(&self, method: &'static str, path: &str) -> Response {
        match self.replies.get(&(method, path.to_string())) {
            Some(Reply::Json(status, body)) => (*status, Json(body.clone())).into_response(),
            Some(Reply::Raw(status, body)) => (*status, *body).into_response(),
            None => (StatusCode::NOT_FOUND, "no reply configured").into_response(),
        }
    }
}

struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Backend>,
}

impl FakeBackend {
    async fn start(replies: Vec<(&'static str, &str, Reply)>) -> Self {
        let state = Arc::new(Backend {
            replies: replies
                .into_iter()
                .map(|(method, path, reply)| ((method, path.to_string()), reply))
                .collect(),
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/exec", get(sheet_get).post(sheet_post))
            .route("/v1_1/{cloud}/image/upload", post(image_upload))
            .route("/v1_1/{cloud}/delete_by_token", post(delete_by_token))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend");
        });

        Self { addr, state }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig {
            endpoint_url: Some(format!("http://{}/exec", self.addr)),
            api_key: Some(API_KEY.to_string()),
            image_host: ImageHostConfig {
                api_base: format!("http://{}", self.addr),
                cloud_name: Some("demo".to_string()),
                upload_preset: Some("fitness".to_string()),
            },
            request_timeout: Some(Duration::from_secs(5)),
        }
    }

    fn client(&self) -> FitnessClient {
        FitnessClient::new(&self.config()).expect("client")
    }

    fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().expect("calls lock").clone()
    }
}

async fn sheet_get(
    State(state): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let path = params.get("path").cloned().unwrap_or_default();
    state.record(Call {
        method: "GET",
        path: path.clone(),
        api_key: params.get("api_key").cloned(),
        body: Value::Null,
    });
    state.reply("GET", &path)
}

async fn sheet_post(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let path = body["path"].as_str().unwrap_or_default().to_string();
    state.record(Call {
        method: "POST",
        path: path.clone(),
        api_key: body["api_key"].as_str().map(str::to_string),
        body: body["data"].clone(),
    });
    state.reply("POST", &path)
}

async fn image_upload(
    State(state): State<Arc<Backend>>,
    Path(cloud): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut fields = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes");
        let value = match file_name {
            Some(file_name) => json!({
                "file_name": file_name,
                "content_type": content_type,
                "size": bytes.len(),
            }),
            None => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };
        fields.insert(name, value);
    }

    state.record(Call {
        method: "POST",
        path: format!("{cloud}/image/upload"),
        api_key: None,
        body: Value::Object(fields),
    });
    state.reply("POST", "image/upload")
}

async fn delete_by_token(
    State(state): State<Arc<Backend>>,
    Path(cloud): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.record(Call {
        method: "POST",
        path: format!("{cloud}/delete_by_token"),
        api_key: None,
        body: json!(form),
    });
    state.reply("POST", "delete_by_token")
}

fn ok(data: Value) -> Reply {
    Reply::Json(StatusCode::OK, json!({"success": true, "data": data}))
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn jpeg(size: usize) -> ImageFile {
    ImageFile {
        file_name: "front.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![7; size],
    }
}

fn dashboard_json() -> Value {
    json!({
        "currentWeight": 82.4,
        "currentBodyFat": 18.1,
        "bmi": 25.3,
        "progressPercentage": 35.5,
        "targetWeight": 76.0,
        "oneRepMax": {"bench": 95.0, "squat": 130.0, "deadlift": 165.0},
        "personalRecords": [
            {"exercise": "Peso Muerto", "weight": 150.0, "reps": 3, "date": "2024-03-02"}
        ],
        "habitsCompliance": 66.7,
        "recentPhotos": [
            {"id": "p1", "date": "2024-03-01", "url": "https://img.example/p1.jpg"}
        ]
    })
}

#[tokio::test]
async fn weight_submit_sends_one_write_and_resets_form() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "weight",
        ok(json!({"id": "w1", "date": "2024-01-01", "weight": 75.5, "bodyFat": 15.2})),
    )])
    .await;
    let client = backend.client();

    let mut page = WeightPage::new();
    page.form.date = day(2024, 1, 1);
    page.form.weight = 75.5;
    page.form.body_fat = Some(15.2);

    assert!(page.submit(&client).await);

    assert_eq!(
        backend.calls(),
        vec![Call {
            method: "POST",
            path: "weight".to_string(),
            api_key: Some(API_KEY.to_string()),
            body: json!({"date": "2024-01-01", "weight": 75.5, "bodyFat": 15.2}),
        }]
    );

    assert_eq!(
        page.message,
        Some(Feedback::success("Peso registrado correctamente"))
    );
    assert_eq!(page.form.weight, 0.0);
    assert_eq!(page.form.body_fat, None);
    assert!(page.form.notes.is_empty());
    assert_eq!(page.form.date, today());
}

#[tokio::test]
async fn accepted_weight_write_without_data_resets_form() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "weight",
        Reply::Json(StatusCode::OK, json!({"success": true})),
    )])
    .await;
    let client = backend.client();

    let mut page = WeightPage::new();
    page.form.date = day(2024, 1, 1);
    page.form.weight = 75.5;

    assert!(page.submit(&client).await);
    assert_eq!(
        page.message,
        Some(Feedback::success("Peso registrado correctamente"))
    );
    assert_eq!(page.form.weight, 0.0);
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn written_record_with_sheet_timestamp_is_returned() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "weight",
        ok(json!({"id": "w2", "date": "2024-01-01T03:00:00.000Z", "weight": 75.5})),
    )])
    .await;
    let client = backend.client();

    let entry = WeightEntry {
        id: None,
        date: day(2024, 1, 1),
        weight: 75.5,
        body_fat: None,
        notes: None,
    };
    let saved = client
        .weight()
        .add(&entry)
        .await
        .expect("accepted")
        .expect("echoed record");
    assert_eq!(saved.id.as_deref(), Some("w2"));
    assert_eq!(saved.date, day(2024, 1, 1));
}

#[tokio::test]
async fn habit_submit_upserts_day_and_keeps_form() {
    let backend =
        FakeBackend::start(vec![("POST", "habits", ok(json!("Hábitos actualizados")))]).await;
    let client = backend.client();

    let mut page = HabitsPage::new();
    page.form = HabitForm::new(day(2024, 1, 1));
    page.form.toggle(Habit::Sleep);
    page.form.toggle(Habit::Cardio);

    assert!(page.submit(&client).await);
    assert_eq!(
        backend.calls(),
        vec![Call {
            method: "POST",
            path: "habits".to_string(),
            api_key: Some(API_KEY.to_string()),
            body: json!({"date": "2024-01-01", "sleep": true, "water": false, "cardio": true}),
        }]
    );
    assert_eq!(
        page.message,
        Some(Feedback::success("Hábitos registrados correctamente"))
    );
    assert!(page.form.sleep && page.form.cardio && !page.form.water);
    assert_eq!(page.form.date, day(2024, 1, 1));
}

#[tokio::test]
async fn habit_submit_failure_shows_backend_or_default_message() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "habits",
        Reply::Json(StatusCode::OK, json!({"success": false})),
    )])
    .await;

    let mut page = HabitsPage::new();
    page.form.toggle(Habit::Water);

    assert!(!page.submit(&backend.client()).await);
    assert_eq!(
        page.message,
        Some(Feedback::error("Error al registrar hábitos"))
    );
    assert!(page.form.water);

    let backend = FakeBackend::start(vec![(
        "POST",
        "habits",
        Reply::Json(
            StatusCode::OK,
            json!({"success": false, "error": "Hoja 'Habits' no encontrada"}),
        ),
    )])
    .await;
    assert!(!page.submit(&backend.client()).await);
    assert_eq!(
        page.message,
        Some(Feedback::error("Hoja 'Habits' no encontrada"))
    );
}

#[tokio::test]
async fn listing_reads_hit_their_resource_paths() {
    let weight = json!({"date": "2024-01-01", "weight": 80.0});
    let workout = json!({
        "date": "2024-01-02", "exercise": "Sentadilla", "weight": 100.0, "reps": 5
    });
    let backend = FakeBackend::start(vec![
        ("GET", "weight", ok(json!([weight.clone()]))),
        ("GET", "weight/current", ok(weight)),
        ("GET", "workouts", ok(json!([workout.clone()]))),
        ("GET", "workouts/Sentadilla", ok(json!([workout]))),
        ("GET", "workouts/prs", ok(json!({"Sentadilla": {"weight": 100.0, "reps": 5}}))),
        ("GET", "photos", ok(json!([]))),
        ("GET", "habits", ok(json!([]))),
    ])
    .await;
    let client = backend.client();

    assert_eq!(client.weight().get_all().await.expect("weights").len(), 1);
    let current = client.weight().get_current().await.expect("current");
    assert_eq!(current.weight, 80.0);
    assert_eq!(client.workouts().get_all().await.expect("workouts").len(), 1);
    let squats = client
        .workouts()
        .get_by_exercise("Sentadilla")
        .await
        .expect("by exercise");
    assert_eq!(squats[0].reps, 5);
    let records = client
        .workouts()
        .get_personal_records()
        .await
        .expect("records");
    assert_eq!(records["Sentadilla"]["reps"], json!(5));
    assert!(client.photos().get_all().await.expect("photos").is_empty());
    assert!(client.habits().get_all().await.expect("habits").is_empty());

    let calls = backend.calls();
    let paths: Vec<&str> = calls.iter().map(|call| call.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "weight",
            "weight/current",
            "workouts",
            "workouts/Sentadilla",
            "workouts/prs",
            "photos",
            "habits",
        ]
    );
    assert!(
        calls
            .iter()
            .all(|call| call.method == "GET" && call.api_key.as_deref() == Some(API_KEY))
    );
}

#[tokio::test]
async fn invalid_weight_never_reaches_the_backend() {
    let backend = FakeBackend::start(vec![]).await;
    let client = backend.client();

    let mut page = WeightPage::new();
    page.form.weight = 0.0;
    page.submit(&client).await;

    assert_eq!(
        page.message,
        Some(Feedback::error("El peso debe ser mayor a 0"))
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn reads_send_path_and_api_key_as_query() {
    let backend = FakeBackend::start(vec![
        ("GET", "photos/recent?limit=5", ok(json!([]))),
        ("GET", "habits/2024-01-01", ok(json!({
            "date": "2024-01-01", "sleep": true, "water": false, "cardio": true
        }))),
        ("GET", "habits/compliance", ok(json!(71.4))),
    ])
    .await;
    let client = backend.client();

    let photos = client
        .photos()
        .get_recent(fitness_client::DEFAULT_RECENT_PHOTOS)
        .await
        .expect("recent photos");
    assert!(photos.is_empty());

    let habits = client
        .habits()
        .get_by_date(day(2024, 1, 1))
        .await
        .expect("habits");
    assert!(habits.sleep && habits.cardio && !habits.water);

    let compliance = client
        .habits()
        .get_weekly_compliance()
        .await
        .expect("compliance");
    assert_eq!(compliance, 71.4);

    let calls = backend.calls();
    let paths: Vec<&str> = calls.iter().map(|call| call.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["photos/recent?limit=5", "habits/2024-01-01", "habits/compliance"]
    );
    assert!(
        calls
            .iter()
            .all(|call| call.method == "GET" && call.api_key.as_deref() == Some(API_KEY))
    );
}

#[tokio::test]
async fn non_success_status_becomes_http_error() {
    let backend = FakeBackend::start(vec![(
        "GET",
        "dashboard",
        Reply::Raw(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
    )])
    .await;
    let client = backend.client();

    let result = client.weight().get_dashboard().await;
    let err = result.as_ref().expect_err("must fail");
    assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));

    let envelope = ApiResponse::from(result);
    assert!(!envelope.success);
    assert_eq!(
        envelope.error.as_deref(),
        Some("Error 500: Internal Server Error")
    );
}

#[tokio::test]
async fn malformed_json_becomes_decode_error() {
    let backend =
        FakeBackend::start(vec![("GET", "weight", Reply::Raw(StatusCode::OK, "<html>"))]).await;
    let client = backend.client();

    let err = client.weight().get_all().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_becomes_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let config = ClientConfig {
        endpoint_url: Some(format!("http://{addr}/exec")),
        api_key: Some(API_KEY.to_string()),
        ..ClientConfig::default()
    };
    let client = FitnessClient::new(&config).expect("client");

    let entry = WeightEntry {
        id: None,
        date: day(2024, 1, 1),
        weight: 70.0,
        body_fat: None,
        notes: None,
    };
    let envelope = ApiResponse::from(client.weight().add(&entry).await);
    assert!(!envelope.success);
    assert!(
        envelope
            .error
            .as_deref()
            .is_some_and(|message| message.starts_with("network error"))
    );
}

#[tokio::test]
async fn logical_failure_surfaces_backend_message() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "workouts",
        Reply::Json(
            StatusCode::OK,
            json!({"success": false, "error": "Hoja 'Workouts' no encontrada"}),
        ),
    )])
    .await;
    let client = backend.client();

    let mut page = WorkoutsPage::new();
    page.form.exercise = "Sentadilla".to_string();
    page.form.weight = 100.0;
    page.form.reps = 5;

    assert!(!page.submit(&client).await);
    assert_eq!(
        page.message,
        Some(Feedback::error("Hoja 'Workouts' no encontrada"))
    );
    // Input survives a failed submit.
    assert_eq!(page.form.reps, 5);
}

#[tokio::test]
async fn logical_failure_without_message_uses_page_default() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "weight",
        Reply::Json(StatusCode::OK, json!({"success": false})),
    )])
    .await;
    let client = backend.client();

    let mut page = WeightPage::new();
    page.form.weight = 80.0;
    page.submit(&client).await;

    assert_eq!(page.message, Some(Feedback::error("Error al registrar peso")));
}

#[tokio::test]
async fn workout_submit_keeps_exercise_and_date() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "workouts",
        ok(json!({
            "id": "x", "date": "2024-05-02", "exercise": "Press de Banca",
            "weight": 80.0, "reps": 8, "sets": 3
        })),
    )])
    .await;
    let client = backend.client();

    let mut page = WorkoutsPage::new();
    page.form.date = day(2024, 5, 2);
    page.form.exercise = "Press de Banca".to_string();
    page.form.weight = 80.0;
    page.form.reps = 8;
    page.form.sets = 3;

    assert!(page.submit(&client).await);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        json!({
            "date": "2024-05-02", "exercise": "Press de Banca",
            "weight": 80.0, "reps": 8, "sets": 3
        })
    );
    assert_eq!(page.form.exercise, "Press de Banca");
    assert_eq!(page.form.date, day(2024, 5, 2));
    assert_eq!((page.form.weight, page.form.reps, page.form.sets), (0.0, 0, 1));
    assert_eq!(
        page.message.map(|m| m.kind),
        Some(FeedbackKind::Success)
    );
}

#[tokio::test]
async fn dashboard_load_passes_backend_numbers_through() {
    let backend = FakeBackend::start(vec![("GET", "dashboard", ok(dashboard_json()))]).await;
    let client = backend.client();

    let mut page = DashboardPage::new();
    page.load(&client).await;

    let data = page.data().expect("dashboard data");
    assert_eq!(data.bmi, 25.3);
    assert_eq!(data.progress_percentage, 35.5);
    assert_eq!(data.current_body_fat, Some(18.1));
    assert_eq!(data.personal_records[0].exercise, "Peso Muerto");
    assert_eq!(data.recent_photos.len(), 1);
}

#[tokio::test]
async fn dashboard_logical_failure_is_shown() {
    let backend = FakeBackend::start(vec![(
        "GET",
        "dashboard",
        Reply::Json(StatusCode::OK, json!({"success": false, "error": "Sin datos"})),
    )])
    .await;
    let client = backend.client();

    let mut page = DashboardPage::new();
    let state = page.load(&client).await;
    assert_eq!(state, &DashboardState::Failed("Sin datos".to_string()));
}

#[tokio::test]
async fn photo_submit_uploads_then_stores_metadata() {
    let backend = FakeBackend::start(vec![
        (
            "POST",
            "image/upload",
            Reply::Json(
                StatusCode::OK,
                json!({"secure_url": "https://img.example/front.jpg", "public_id": "front"}),
            ),
        ),
        (
            "POST",
            "photos",
            ok(json!({"id": "p9", "date": "2024-02-01", "url": "https://img.example/front.jpg"})),
        ),
        (
            "GET",
            "photos/recent?limit=10",
            ok(json!([{"id": "p9", "date": "2024-02-01", "url": "https://img.example/front.jpg"}])),
        ),
    ])
    .await;
    let client = backend.client();

    let mut page = PhotosPage::new();
    page.form.date = day(2024, 2, 1);
    page.form.description = "Tres meses".to_string();
    assert!(page.select_file(jpeg(64)));

    assert!(page.submit(&client).await);

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].path, "demo/image/upload");
    assert_eq!(calls[0].body["upload_preset"], json!("fitness"));
    assert_eq!(calls[0].body["file"]["file_name"], json!("front.jpg"));
    assert_eq!(calls[0].body["file"]["content_type"], json!("image/jpeg"));
    assert_eq!(calls[0].body["file"]["size"], json!(64));
    assert_eq!(
        calls[1].body,
        json!({
            "date": "2024-02-01",
            "url": "https://img.example/front.jpg",
            "description": "Tres meses"
        })
    );
    assert_eq!(calls[2].path, "photos/recent?limit=10");

    assert_eq!(
        page.message,
        Some(Feedback::success("Foto de progreso guardada correctamente"))
    );
    assert!(page.selected.is_none());
    assert!(page.form.description.is_empty());
    assert_eq!(page.photos.len(), 1);
}

#[tokio::test]
async fn failed_metadata_write_deletes_the_upload() {
    let backend = FakeBackend::start(vec![
        (
            "POST",
            "image/upload",
            Reply::Json(
                StatusCode::OK,
                json!({"secure_url": "https://img.example/a.jpg", "delete_token": "tok-123"}),
            ),
        ),
        (
            "POST",
            "photos",
            Reply::Json(StatusCode::OK, json!({"success": false})),
        ),
        ("POST", "delete_by_token", Reply::Json(StatusCode::OK, json!({"result": "ok"}))),
    ])
    .await;
    let client = backend.client();

    let mut page = PhotosPage::new();
    page.select_file(jpeg(32));

    assert!(!page.submit(&client).await);
    assert_eq!(page.message, Some(Feedback::error("Error al guardar foto")));

    let deletes: Vec<Call> = backend
        .calls()
        .into_iter()
        .filter(|call| call.path == "demo/delete_by_token")
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].body, json!({"token": "tok-123"}));
    // Selection stays so the user can retry.
    assert!(page.selected.is_some());
}

#[tokio::test]
async fn rejected_upload_skips_metadata_write() {
    let backend = FakeBackend::start(vec![(
        "POST",
        "image/upload",
        Reply::Raw(StatusCode::BAD_REQUEST, "Upload preset not found"),
    )])
    .await;
    let client = backend.client();

    let mut page = PhotosPage::new();
    page.select_file(jpeg(8));

    assert!(!page.submit(&client).await);
    assert_eq!(page.message, Some(Feedback::error("Error al subir imagen")));
    assert_eq!(backend.calls().len(), 1);
}
