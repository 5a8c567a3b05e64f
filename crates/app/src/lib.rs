//! Teamline application composition root
//!
//! Composes the teams domain router with shared infrastructure routes.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use teamline_auth::AuthConfig;
use teamline_common::Config;
use teamline_notify::LogNotificationSink;
use teamline_teams::{TeamsRepositories, TeamsState};

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    // Create repositories
    let repos = TeamsRepositories::new(pool);

    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    };

    // Create teams domain state
    let teams_state = TeamsState {
        repos,
        auth: auth_config,
        notify: Arc::new(LogNotificationSink::new()),
    };

    // Build router: compose domain routers with shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Teamline API v0.1.0" }))
        .merge(teamline_teams::routes().with_state(teams_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
