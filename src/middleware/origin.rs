use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::access_control::{OriginDecision, OriginGate};
use crate::error::AppError;

const ALLOWED_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, OPTIONS");
const ALLOWED_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// Middleware enforcing the origin allow-list
/// - Unlisted origin: request never reaches a handler
/// - `OPTIONS` preflight: answered here with 204
/// - Listed origin: CORS headers echo that origin, never `*`
pub async fn origin_middleware(
    State(gate): State<Arc<OriginGate>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let allowed = match gate.decide(origin.as_deref()) {
        OriginDecision::Allow(allowed) => allowed,
        OriginDecision::Deny => {
            return AppError::OriginDenied(origin.unwrap_or_default()).into_response();
        }
    };

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    if let Some(value) = allowed.and_then(|origin| HeaderValue::from_str(&origin).ok()) {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS);
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS);
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }

    response
}
