use axum::{Json, response::IntoResponse};
use serde_json::json;

/// GET / - Liveness probe
pub async fn page() -> impl IntoResponse {
    Json(json!({"ok": true, "message": "MP Web Studio API radi ✅"}))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let response = page().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
