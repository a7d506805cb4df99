pub mod access_control;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::AppState;

/// Create app router
///
/// Builds the full router from configuration, useful for integration testing
/// without starting the server.
pub fn create_app(config: &Config) -> axum::Router {
    routes::router(AppState::from_config(config))
}
