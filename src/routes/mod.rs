use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::{access_control::OriginGate, config::Config, middleware::origin_middleware};

pub mod contact;
mod index;

pub use contact::MailRelay;

#[derive(Clone)]
pub struct AppState {
    pub origin_gate: Arc<OriginGate>,
    pub relay: MailRelay,
    pub body_limit: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            origin_gate: Arc::new(OriginGate::new(config.cors.allowed_origins.iter().cloned())),
            relay: MailRelay::from_config(&config.mail),
            body_limit: config.server.body_limit,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let origin_gate = app_state.origin_gate.clone();
    let body_limit = app_state.body_limit;

    Router::new()
        .route("/", get(index::page))
        .route("/api/contact", post(contact::action))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(origin_gate, origin_middleware))
}
