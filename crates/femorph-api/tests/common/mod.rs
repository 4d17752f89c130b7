//! In-process fake of the femorph API for integration tests.
//!
//! Serves the HTTP endpoints and the notification channel on an ephemeral
//! local port. Each WebSocket connection replays the next queued
//! [`WsScript`]; once the queue is empty further subscriptions are refused.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use femorph_api::ApiClientConfig;
use femorph_core::TaskId;
use serde_json::{Value, json};

pub const USER_ID: &str = "user-1";
pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "secret";
pub const FEM_ID: &str = "fem-1";
pub const SURFACE_ID: &str = "surface-1";

/// Piece size used when the node block download is throttled.
pub const SLOW_PIECE: usize = 1000;

/// Frames one WebSocket connection sends before it either closes or idles.
#[derive(Debug, Clone)]
pub struct WsScript {
    pub frames: Vec<String>,
    pub close: bool,
}

impl WsScript {
    /// Send `frames`, then close the connection.
    pub fn closing(frames: Vec<String>) -> Self {
        Self {
            frames,
            close: true,
        }
    }

    /// Send `frames`, then keep the connection open until the client leaves.
    pub fn holding(frames: Vec<String>) -> Self {
        Self {
            frames,
            close: false,
        }
    }
}

/// A multipart upload as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub kind: String,
    pub part_name: String,
    pub file_name: Option<String>,
    pub filename_header: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

pub struct FakeState {
    pub health_status: Mutex<String>,
    pub health_raw: Mutex<Option<String>>,
    pub task_id: TaskId,
    pub nblock: Vec<u8>,
    pub nblock_delay: Mutex<Option<Duration>>,
    pub uploads: Mutex<Vec<RecordedUpload>>,
    pub morphs: Mutex<Vec<(String, Value)>>,
    pub created: Mutex<Vec<Value>>,
    pub cleared: Mutex<u32>,
    pub ws_scripts: Mutex<VecDeque<WsScript>>,
    pub ws_users: Mutex<Vec<String>>,
}

pub struct FakeServer {
    pub addr: SocketAddr,
    pub state: Arc<FakeState>,
}

impl FakeServer {
    /// Start a server whose morph trigger answers with `task_id`.
    pub async fn start(task_id: TaskId, nblock_body: Vec<u8>, scripts: Vec<WsScript>) -> Self {
        let state = Arc::new(FakeState {
            health_status: Mutex::new("ok".to_string()),
            health_raw: Mutex::new(None),
            task_id,
            nblock: nblock_body,
            nblock_delay: Mutex::new(None),
            uploads: Mutex::new(Vec::new()),
            morphs: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            cleared: Mutex::new(0),
            ws_scripts: Mutex::new(scripts.into()),
            ws_users: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/health", get(health))
            .route("/auth", post(auth))
            .route("/users/:user_id/fems", post(upload_fem))
            .route("/users/:user_id/surfaces", post(upload_surface))
            .route("/users/:user_id/fems/:fem_id/morph", post(morph))
            .route("/users/:user_id/fems/:fem_id/nblock", get(serve_nblock))
            .route("/users/:user_id/create", post(create_user))
            .route("/users/:user_id/data", delete(clear_data))
            .route("/ws/subscribe/:user_id", get(subscribe))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Client configuration pointing at this server.
    pub fn config(&self) -> ApiClientConfig {
        ApiClientConfig::for_host(&self.addr.to_string(), false)
            .with_timeout(Duration::from_secs(5))
            .with_reconnect_delay(Duration::from_millis(20))
    }

    pub fn set_health(&self, status: &str) {
        *self.state.health_status.lock().unwrap() = status.to_string();
    }

    /// Answer `/health` with 200 and `body` verbatim instead of JSON.
    pub fn set_health_body(&self, body: &str) {
        *self.state.health_raw.lock().unwrap() = Some(body.to_string());
    }

    /// Serve the node block in small pieces, pausing `delay` before each.
    pub fn set_slow_download(&self, delay: Duration) {
        *self.state.nblock_delay.lock().unwrap() = Some(delay);
    }

    pub fn ws_users(&self) -> Vec<String> {
        self.state.ws_users.lock().unwrap().clone()
    }
}

/// A `task_update` frame for `task_id`.
pub fn task_update(task_id: TaskId, status: &str, error: Option<&str>) -> String {
    let mut payload = json!({
        "task_id": task_id.to_string(),
        "status": status,
        "updatedAt": "2024-05-01T12:00:00Z",
    });
    if let Some(error) = error {
        payload["error"] = json!(error);
    }
    json!({"type": "task_update", "payload": payload}).to_string()
}

// ============================================================================
// Handlers
// ============================================================================

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "missing or invalid token").into_response()
}

async fn health(State(state): State<Arc<FakeState>>) -> Response {
    if let Some(raw) = state.health_raw.lock().unwrap().clone() {
        return raw.into_response();
    }
    let status = state.health_status.lock().unwrap().clone();
    Json(json!({ "status": status })).into_response()
}

async fn auth(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(json!({"user_id": USER_ID, "access_token": TOKEN})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
    }
}

async fn upload_fem(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    store_upload(&state, "fems", &headers, multipart, FEM_ID).await
}

async fn upload_surface(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    store_upload(&state, "surfaces", &headers, multipart, SURFACE_ID).await
}

async fn store_upload(
    state: &FakeState,
    kind: &str,
    headers: &HeaderMap,
    mut multipart: Multipart,
    id: &str,
) -> Response {
    if !authorized(headers) {
        return unauthorized();
    }
    let filename_header = headers
        .get("Filename")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    while let Some(field) = multipart.next_field().await.unwrap() {
        let part_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let size = field.bytes().await.unwrap().len();
        state.uploads.lock().unwrap().push(RecordedUpload {
            kind: kind.to_string(),
            part_name,
            file_name,
            filename_header: filename_header.clone(),
            content_type,
            size,
        });
    }

    Json(json!({ "id": id })).into_response()
}

async fn morph(
    State(state): State<Arc<FakeState>>,
    Path((_user_id, fem_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if fem_id != FEM_ID {
        return (StatusCode::NOT_FOUND, "unknown fem").into_response();
    }
    state.morphs.lock().unwrap().push((fem_id, body));
    Json(json!({ "task_id": state.task_id.to_string() })).into_response()
}

async fn serve_nblock(
    State(state): State<Arc<FakeState>>,
    Path((_user_id, fem_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if fem_id != FEM_ID {
        return (StatusCode::NOT_FOUND, "unknown fem").into_response();
    }
    let delay = *state.nblock_delay.lock().unwrap();
    match delay {
        None => state.nblock.clone().into_response(),
        Some(delay) => {
            // Trickle the body so the transfer outlasts short client timeouts.
            let pieces: Vec<Vec<u8>> = state
                .nblock
                .chunks(SLOW_PIECE)
                .map(<[u8]>::to_vec)
                .collect();
            let stream =
                futures_util::stream::unfold(pieces.into_iter(), move |mut rest| async move {
                    let piece = rest.next()?;
                    tokio::time::sleep(delay).await;
                    Some((Ok::<_, std::io::Error>(piece), rest))
                });
            Body::from_stream(stream).into_response()
        }
    }
}

async fn create_user(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.created.lock().unwrap().push(body);
    StatusCode::CREATED.into_response()
}

async fn clear_data(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    *state.cleared.lock().unwrap() += 1;
    StatusCode::NO_CONTENT.into_response()
}

async fn subscribe(
    State(state): State<Arc<FakeState>>,
    Path(user_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    state.ws_users.lock().unwrap().push(user_id);
    let Some(script) = state.ws_scripts.lock().unwrap().pop_front() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "no more connections").into_response();
    };
    ws.on_upgrade(move |socket| replay(socket, script))
}

async fn replay(mut socket: WebSocket, script: WsScript) {
    for frame in script.frames {
        if socket.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }
    if script.close {
        let _ = socket.send(Message::Close(None)).await;
        return;
    }
    // Idle until the client hangs up.
    while let Some(Ok(_)) = socket.recv().await {}
}
