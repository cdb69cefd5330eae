//! Storage setup and initialization

use anyhow::{Context, Result};
use fauna_core::Config;
use fauna_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing blob storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize blob storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Blob storage initialized successfully"
    );
    Ok(storage)
}
