//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers extract only what they need via Axum's
//! `FromRef`.

use crate::auth::IdentityProvider;
use fauna_core::Config;
use fauna_db::DocumentStores;
use fauna_services::{FeedService, HistoryService, UploadPipeline};
use fauna_storage::Storage;
use std::sync::Arc;

// ----- Sub-state types -----

/// Backing stores, kept for health checks.
#[derive(Clone)]
pub struct StoreState {
    pub documents: DocumentStores,
    pub storage: Arc<dyn Storage>,
}

/// The upload pipeline (validation, blob store, inference, fan-out).
#[derive(Clone)]
pub struct UploadServices {
    pub pipeline: UploadPipeline,
}

/// Read paths over the catalog and owner sets, plus the delete path.
#[derive(Clone)]
pub struct CatalogServices {
    pub feed: FeedService,
    pub history: HistoryService,
}

/// Bearer token verification used by the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub identity_provider: Arc<dyn IdentityProvider>,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub stores: StoreState,
    pub uploads: UploadServices,
    pub catalog: CatalogServices,
    pub auth: AuthState,
    pub config: Config,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for StoreState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.stores.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadServices {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for CatalogServices {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.catalog.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for AuthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}
