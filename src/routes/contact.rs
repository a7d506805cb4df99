use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
};
use mpwebstudio_contact::ContactSubmission;
use mpwebstudio_notification::{ContactNotifier, EmailConfig, MailError};

use crate::{
    error::{ApiResponse, AppError, THANK_YOU},
    routes::AppState,
};

/// What happens to a submission after it has been logged.
#[derive(Clone)]
pub enum MailRelay {
    /// Log only.
    Disabled,
    Enabled(ContactNotifier),
    /// Relay requested but SMTP settings are incomplete; every send fails with this reason.
    Misconfigured(Arc<str>),
}

impl MailRelay {
    pub fn from_config(config: &EmailConfig) -> Self {
        if !config.relay {
            return Self::Disabled;
        }

        match ContactNotifier::from_config(config) {
            Ok(notifier) => Self::Enabled(notifier),
            Err(err) => {
                tracing::error!(error = %err, "Mail relay enabled but not configured");
                Self::Misconfigured(err.to_string().into())
            }
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            MailRelay::Disabled => "notify-only",
            MailRelay::Enabled(_) => "mail-relay",
            MailRelay::Misconfigured(_) => "mail-relay (misconfigured)",
        }
    }
}

/// POST /api/contact
pub async fn action(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let contact = parse_submission(&headers, body)?.validate()?;

    let record =
        serde_json::to_string(&contact).map_err(|err| AppError::Internal(err.to_string()))?;

    tracing::info!(
        name = %contact.name,
        email = %contact.email,
        source_page = contact.source_page.as_deref().unwrap_or("-"),
        created_at = %contact.created_at_iso(),
        record = %record,
        "New inquiry received"
    );

    match &app_state.relay {
        MailRelay::Disabled => {}
        MailRelay::Enabled(notifier) => notifier.notify(&contact).await?,
        MailRelay::Misconfigured(reason) => {
            return Err(MailError::Unconfigured(reason.to_string()).into());
        }
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(THANK_YOU))))
}

/// Reads the body the way the site's JSON parser does:
/// - not `application/json` or an empty body: empty submission
/// - an object or an array: parsed leniently
/// - a bare JSON value, malformed JSON or an unreadable body: unexpected error
fn parse_submission(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<ContactSubmission, AppError> {
    if !is_json(headers) {
        return Ok(ContactSubmission::default());
    }

    let body = body.map_err(|rejection| AppError::Internal(rejection.body_text()))?;
    if body.is_empty() {
        return Ok(ContactSubmission::default());
    }

    match serde_json::from_slice(&body) {
        Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
            Ok(ContactSubmission::from(value))
        }
        Ok(_) => Err(AppError::Internal(
            "JSON body must be an object or an array".to_owned(),
        )),
        Err(err) => Err(AppError::Internal(format!("Invalid JSON body: {err}"))),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json(&json_headers("application/json")));
        assert!(is_json(&json_headers("Application/JSON; charset=utf-8")));
        assert!(!is_json(&json_headers("text/plain")));
        assert!(!is_json(&json_headers("application/x-www-form-urlencoded")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_empty_json_body_is_an_empty_submission() {
        let submission = parse_submission(&json_headers("application/json"), Ok(Bytes::new()));
        assert_eq!(submission.unwrap(), ContactSubmission::default());
    }

    #[test]
    fn test_bare_json_values_are_rejected() {
        for body in ["\"Ana\"", "42", "null", "true", "   "] {
            let result = parse_submission(
                &json_headers("application/json"),
                Ok(Bytes::from_static(body.as_bytes())),
            );
            assert!(matches!(result, Err(AppError::Internal(_))), "{body}");
        }
    }
}
