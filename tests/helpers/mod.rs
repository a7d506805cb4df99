use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use mpwebstudio::{AppState, Config, access_control::OriginGate, routes::MailRelay};
use mpwebstudio_notification::{ContactNotifier, Email, MailError, Mailer};
use tower::ServiceExt;

/// In-memory sink for log lines emitted while a test runs.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Routes JSON log output of the current thread into a buffer until the guard drops.
#[allow(dead_code)]
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}

pub const INBOX: &str = "info@mpwebstudio.rs";

/// Mailer double that keeps every email and optionally fails the send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
    pub fail: bool,
}

impl RecordingMailer {
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);

        if self.fail {
            return Err(MailError::Unconfigured("connection refused".to_owned()));
        }

        Ok(())
    }
}

pub fn test_config() -> Config {
    Config::from_env(Some("does-not-exist.toml".to_owned()), Default::default())
        .expect("Failed to load config")
}

pub fn app_with_relay(relay: MailRelay) -> Router {
    let config = test_config();

    mpwebstudio::routes::router(AppState {
        origin_gate: Arc::new(OriginGate::new(config.cors.allowed_origins.iter().cloned())),
        relay,
        body_limit: config.server.body_limit,
    })
}

#[allow(dead_code)]
pub fn notify_only_app() -> Router {
    app_with_relay(MailRelay::Disabled)
}

#[allow(dead_code)]
pub fn relay_app(mailer: Arc<RecordingMailer>) -> Router {
    app_with_relay(MailRelay::Enabled(ContactNotifier::new(mailer, INBOX)))
}

pub fn post_contact(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
