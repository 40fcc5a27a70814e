//! HTTP adapters - REST API implementations.
//!
//! Each application module has its own HTTP adapter with `dto`, `handlers`
//! and `routes`. [`api_router`] mounts them all on one [`AppState`].

pub mod analysis;
pub mod consultation;
pub mod error;
pub mod health;
pub mod rules;
mod state;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Complete API router with state applied.
///
/// ```ignore
/// let app = api_router(AppState::in_memory());
/// axum::serve(listener, app).await?;
/// ```
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/consultation", consultation::consultation_routes())
        .nest("/api/rules", rules::rule_routes())
        .nest("/api/validation", analysis::validation_routes())
        .nest("/api/question-priorities", analysis::question_priority_routes())
        .merge(health::health_routes())
        .with_state(state)
}

/// API router wrapped in the tracing, timeout and CORS layers.
///
/// With no configured origins CORS is permissive, which suits development.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    api_router(state)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
