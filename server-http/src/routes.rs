use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use shared::config::Config;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Router wrapped so trailing slashes are trimmed before route matching
pub type App = NormalizePath<Router>;

/// Build the service to serve: the router behind path normalization.
///
/// `NormalizePath` has to wrap the router from outside; as a `Router::layer`
/// it would only run once a route has already been matched.
pub fn build_app(state: AppState, config: &Config) -> App {
    NormalizePath::trim_trailing_slash(build_router(state, config))
}

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Todo routes
        .route("/api/todos", get(handlers::list_todos))
        .route("/api/todos/{id}", get(handlers::get_todo))
        // Middleware
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
