//! In-process stand-in for the conversion service.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use slideshow_client::AppConfig;
use slideshow_client::app::create_session;
use slideshow_client::session::Session;

pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone, Debug)]
pub struct UploadedPart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub enum StatusReply {
    Status(&'static str),
    Failed(&'static str),
    Http(StatusCode),
    Garbage,
}

#[derive(Default)]
struct Inner {
    job_ids: VecDeque<String>,
    reject_uploads: Option<StatusCode>,
    uploads: Vec<Vec<UploadedPart>>,
    scripts: HashMap<String, VecDeque<StatusReply>>,
    status_calls: HashMap<String, usize>,
    video: Vec<u8>,
}

type Shared = Arc<Mutex<Inner>>;

pub struct FakeService {
    inner: Shared,
    pub base_url: String,
    server: Mutex<Option<(oneshot::Sender<()>, JoinHandle<()>)>>,
}

impl FakeService {
    pub async fn start() -> Self {
        let inner: Shared = Arc::default();

        let app = Router::new()
            .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
            .route("/api/convert", post(convert))
            .route("/api/status/{id}", get(status))
            .route("/api/download/{id}", get(download))
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    stop_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            inner,
            base_url: format!("http://{addr}"),
            server: Mutex::new(Some((stop_tx, handle))),
        }
    }

    /// Closes the listener and every open connection. Requests made
    /// afterwards fail at the transport level.
    pub async fn shutdown(&self) {
        let server = self.server.lock().unwrap().take();
        if let Some((stop_tx, handle)) = server {
            stop_tx.send(()).ok();
            handle.await.unwrap();
        }
    }

    /// Ids handed out by successive convert calls.
    pub fn accept_jobs(&self, ids: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        inner.job_ids = ids.iter().map(|s| s.to_string()).collect();
    }

    pub fn reject_uploads(&self, status: StatusCode) {
        self.inner.lock().unwrap().reject_uploads = Some(status);
    }

    /// Replies for successive status queries of `job`. The last reply
    /// repeats forever.
    pub fn script(&self, job: &str, replies: Vec<StatusReply>) {
        self.inner
            .lock()
            .unwrap()
            .scripts
            .insert(job.to_string(), replies.into());
    }

    pub fn set_video(&self, bytes: &[u8]) {
        self.inner.lock().unwrap().video = bytes.to_vec();
    }

    pub fn uploads(&self) -> Vec<Vec<UploadedPart>> {
        self.inner.lock().unwrap().uploads.clone()
    }

    pub fn status_calls(&self, job: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .status_calls
            .get(job)
            .copied()
            .unwrap_or(0)
    }

    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::with_api_url(&self.base_url).unwrap();
        config.poll_interval = TEST_POLL_INTERVAL;
        config.http_timeout = Duration::from_secs(5);
        config
    }

    pub fn session(&self) -> Session {
        create_session(self.config()).unwrap()
    }
}

/// Long enough for several more poll ticks to have fired.
pub async fn settle() {
    tokio::time::sleep(TEST_POLL_INTERVAL * 8).await;
}

async fn convert(State(inner): State<Shared>, mut multipart: Multipart) -> Response {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(UploadedPart {
            field: field_name,
            file_name,
            content_type,
            data,
        });
    }

    let mut inner = inner.lock().unwrap();
    inner.uploads.push(parts);

    if let Some(status) = inner.reject_uploads {
        return (status, Json(json!({ "error": "no images uploaded" }))).into_response();
    }

    match inner.job_ids.pop_front() {
        Some(id) => (StatusCode::ACCEPTED, Json(json!({ "job_id": id }))).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "error": "no job ids left" })),
        )
            .into_response(),
    }
}

async fn status(State(inner): State<Shared>, Path(id): Path<String>) -> Response {
    let mut inner = inner.lock().unwrap();
    *inner.status_calls.entry(id.clone()).or_default() += 1;

    let reply = match inner.scripts.get_mut(&id) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
    };

    match reply {
        Some(StatusReply::Status(s)) => Json(json!({ "status": s, "error": "" })).into_response(),
        Some(StatusReply::Failed(message)) => {
            Json(json!({ "status": "error", "error": message })).into_response()
        }
        Some(StatusReply::Http(code)) => (code, "boom").into_response(),
        Some(StatusReply::Garbage) => (StatusCode::OK, "<html>not json</html>").into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "status": "not_found" }))).into_response(),
    }
}

async fn download(State(inner): State<Shared>, Path(_id): Path<String>) -> Response {
    let video = inner.lock().unwrap().video.clone();
    ([(header::CONTENT_TYPE, "video/mp4")], video).into_response()
}
