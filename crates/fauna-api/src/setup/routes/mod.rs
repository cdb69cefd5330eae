//! Route configuration and setup.
//!
//! Domain route groups live in [domains](domains); health checks in [health](health).

mod domains;
mod health;

use crate::constants::{
    BODY_LIMIT_OVERHEAD_BYTES, HTTP_CONCURRENCY_LIMIT, MEDIA_PATH, OPENAPI_PATH,
};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use fauna_core::{Config, StorageBackend};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = public_routes(state.clone());
    let protected_routes =
        protected_routes(state.clone()).layer(axum::middleware::from_fn_with_state(
            state.auth.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    let mut app_state_routes = public_routes.merge(protected_routes);

    if let Some(media_dir) = local_media_dir(config) {
        tracing::info!(path = %media_dir, mount = MEDIA_PATH, "Serving local blobs");
        app_state_routes = app_state_routes.nest_service(MEDIA_PATH, ServeDir::new(media_dir));
    }

    let body_limit = config.max_file_size_bytes() * 2 + BODY_LIMIT_OVERHEAD_BYTES;
    tracing::info!(
        body_limit,
        http_concurrency_limit = HTTP_CONCURRENCY_LIMIT,
        "Request limits configured"
    );

    let app = app_state_routes
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Directory to serve under `/media` when blobs are stored on local disk
fn local_media_dir(config: &Config) -> Option<String> {
    if config.storage_backend() != StorageBackend::Local {
        return None;
    }
    config.local_storage_path().map(str::to_string)
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(domains::feed_routes(state.clone()))
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(domains::upload_routes(state.clone()))
        .merge(domains::history_routes(state.clone()))
        .with_state(state)
}
