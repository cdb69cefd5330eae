//! Service initialization and application state setup

use crate::auth::{IdentityProvider, JwtIdentityProvider};
use crate::state::{AppState, AuthState, CatalogServices, StoreState, UploadServices};
use anyhow::{Context, Result};
use fauna_core::Config;
use fauna_db::{create_document_stores, DocumentStores};
use fauna_services::{
    CatalogWriter, FeedService, GeminiGateway, HistoryService, InferenceGateway, UploadPipeline,
    UploadValidator,
};
use fauna_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Initialize stores, the inference gateway and all services, returning the application state
pub fn initialize_services(
    config: &Config,
    pool: Option<PgPool>,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let documents = create_document_stores(config, pool)
        .context("Failed to initialize document stores")?;

    let gateway = GeminiGateway::new(config.inference().clone())
        .context("Failed to initialize inference gateway")?;
    tracing::info!(model = %gateway.model_name(), "Inference gateway initialized");

    let identity_provider = JwtIdentityProvider::new(config.jwt_secret());

    Ok(build_state(
        config.clone(),
        documents,
        storage,
        Arc::new(gateway),
        Arc::new(identity_provider),
    ))
}

/// Wire already-constructed collaborators into the application state
pub fn build_state(
    config: Config,
    documents: DocumentStores,
    storage: Arc<dyn Storage>,
    gateway: Arc<dyn InferenceGateway>,
    identity_provider: Arc<dyn IdentityProvider>,
) -> Arc<AppState> {
    let writer = CatalogWriter::from_stores(&documents);

    let pipeline = UploadPipeline::new(
        UploadValidator::from_config(&config),
        storage.clone(),
        gateway,
        writer.clone(),
    );
    let feed = FeedService::new(
        documents.catalog.clone(),
        config.feed_default_limit(),
        config.feed_max_limit(),
    );
    let history = HistoryService::new(documents.owner_sets.clone(), writer);

    Arc::new(AppState {
        stores: StoreState {
            documents,
            storage,
        },
        uploads: UploadServices { pipeline },
        catalog: CatalogServices { feed, history },
        auth: AuthState { identity_provider },
        config,
    })
}
