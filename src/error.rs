use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mpwebstudio_contact::ContactError;
use mpwebstudio_notification::MailError;
use serde::Serialize;
use thiserror::Error;

pub const THANK_YOU: &str = "Hvala! Upit je primljen. Javićemo vam se uskoro.";
pub const NOTIFICATION_FAILED: &str = "Upit je primljen, ali email notifikacija nije poslata. Pokušajte ponovo ili pišite na info@mpwebstudio.rs.";
pub const SERVER_ERROR: &str = "Greška na serveru. Pokušajte ponovo.";

/// Body of every `/api/contact` response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Invalid(#[from] ContactError),

    #[error("origin not allowed: {0}")]
    OriginDenied(String),

    /// The submission was accepted and logged, only the email failed.
    #[error("email notification failed: {0}")]
    Notification(#[from] MailError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            // Existing front-ends expect the generic 500 here, not a 403.
            AppError::OriginDenied(origin) => {
                tracing::warn!(origin = %origin, "CORS blocked for origin");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
            AppError::Notification(err) => {
                tracing::error!(error = %err, "Email send failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    NOTIFICATION_FAILED.to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
        };

        (status, Json(ApiResponse::failed(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Invalid(ContactError::Email), StatusCode::BAD_REQUEST),
            (
                AppError::OriginDenied("https://evil.example".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Notification(MailError::MissingCredentials),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
