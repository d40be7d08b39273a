//! In-process mock of the photo service for integration tests.
//!
//! Serves the three endpoints the client uses on `127.0.0.1:<random>`:
//! - `GET /photos` - seeded records plus uploads
//! - `POST /upload` - multipart, field `photo`
//! - `DELETE /photos/{id}` - 404 for unknown ids
//!
//! Every request is recorded as `"<METHOD> <path>"` so tests can assert on
//! exactly which calls were made.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

/// One multipart field received by `/upload`.
#[derive(Debug, Clone)]
pub struct UploadedField {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct MockState {
    photos: Vec<Value>,
    uploads: Vec<UploadedField>,
    requests: Vec<String>,
    list_status: Option<StatusCode>,
    list_body: Option<String>,
    next_id: u64,
}

type Shared = Arc<Mutex<MockState>>;

/// A running mock service.
pub struct MockService {
    addr: SocketAddr,
    prefix: String,
    state: Shared,
}

impl MockService {
    /// Start on the root path.
    pub async fn start() -> Self {
        Self::start_with_prefix("").await
    }

    /// Start with all routes nested under `prefix` (e.g. `/api`).
    pub async fn start_with_prefix(prefix: &str) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 1000,
            ..MockState::default()
        }));

        let routes = Router::new()
            .route("/photos", get(list_photos))
            .route("/upload", post(upload_photo))
            .route("/photos/{id}", delete(delete_photo))
            .with_state(Arc::clone(&state));
        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            prefix: prefix.to_string(),
            state,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, self.prefix)
    }

    /// Replace the stored records.
    pub fn seed(&self, photos: Value) {
        let Value::Array(photos) = photos else {
            panic!("seed expects a JSON array");
        };
        self.state.lock().photos = photos;
    }

    /// Make `GET /photos` answer with this status.
    pub fn fail_list(&self, status: StatusCode) {
        self.state.lock().list_status = Some(status);
    }

    pub fn heal_list(&self) {
        self.state.lock().list_status = None;
    }

    /// Make `GET /photos` answer 200 with this raw body.
    pub fn list_body(&self, body: &str) {
        self.state.lock().list_body = Some(body.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn uploads(&self) -> Vec<UploadedField> {
        self.state.lock().uploads.clone()
    }

    pub fn photo_count(&self) -> usize {
        self.state.lock().photos.len()
    }
}

/// A record in the service's wire shape.
pub fn photo_json(id: Value, filename: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "filename": filename,
        "url": format!("https://cdn.example.com/{filename}"),
        "created_at": created_at,
    })
}

fn id_matches(photo: &Value, id: &str) -> bool {
    match &photo["id"] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

async fn list_photos(State(state): State<Shared>) -> Response {
    let mut state = state.lock();
    state.requests.push("GET /photos".to_string());

    if let Some(status) = state.list_status {
        return (status, "service unavailable").into_response();
    }
    if let Some(body) = state.list_body.clone() {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();
    }
    Json(Value::Array(state.photos.clone())).into_response()
}

async fn upload_photo(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(UploadedField {
            name,
            filename,
            content_type,
            bytes,
        });
    }

    let mut state = state.lock();
    state.requests.push("POST /upload".to_string());

    let Some(file) = fields.iter().find(|f| f.name == "photo").cloned() else {
        state.uploads.extend(fields);
        return (StatusCode::BAD_REQUEST, "missing photo field").into_response();
    };
    state.uploads.extend(fields);

    let id = state.next_id;
    state.next_id += 1;
    let filename = file.filename.unwrap_or_else(|| "upload.bin".to_string());
    state
        .photos
        .push(photo_json(json!(id), &filename, "2024-05-15T12:00:00Z"));

    Json(json!({ "message": "File uploaded successfully" })).into_response()
}

async fn delete_photo(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock();
    state.requests.push(format!("DELETE /photos/{id}"));

    match state.photos.iter().position(|p| id_matches(p, &id)) {
        Some(index) => {
            state.photos.remove(index);
            Json(json!({ "message": "Photo deleted" })).into_response()
        },
        None => (StatusCode::NOT_FOUND, "photo not found").into_response(),
    }
}
