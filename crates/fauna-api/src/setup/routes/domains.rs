//! Domain route groups (feed, uploads, history).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Routes anyone may call
pub fn feed_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/feed", API_PREFIX), get(handlers::feed::get_feed))
        .with_state(state)
}

pub fn upload_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/uploads", API_PREFIX),
            post(handlers::uploads::upload_image),
        )
        .route(
            &format!("{}/analyze", API_PREFIX),
            post(handlers::analyze::analyze_image),
        )
        .with_state(state)
}

pub fn history_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/me/uploads", API_PREFIX),
            get(handlers::history::list_uploads).delete(handlers::history::delete_upload),
        )
        .with_state(state)
}
