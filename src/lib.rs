pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod storage;
pub mod testing;
pub mod types;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::SecurityConfig;
pub use crate::state::AppState;

/// Multipart framing allowance on top of the upload size limit
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Full router with the session middleware applied to every route
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Session-gated
        .merge(practice_routes())
        .merge(upload_routes(state.uploads.max_bytes()))
        .merge(template_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .with_state(state)
}

fn practice_routes() -> Router<AppState> {
    use handlers::protected::{practice_information_get, practice_information_put};

    Router::new().route(
        "/api/practiceInformation",
        get(practice_information_get).put(practice_information_put),
    )
}

fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    use handlers::protected::upload_post;

    Router::new()
        .route("/api/upload", post(upload_post))
        .route_layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD_BYTES))
}

fn template_routes() -> Router<AppState> {
    use handlers::protected::{templates_list, templates_show};

    Router::new()
        .route("/api/templates", get(templates_list))
        .route("/api/templates/:title", get(templates_show))
}

/// CORS policy from configuration; disabled CORS adds no headers
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
