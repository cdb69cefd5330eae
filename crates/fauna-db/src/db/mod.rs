//! Document store repositories
//!
//! The catalog and the owner record sets are each behind a trait with a PostgreSQL
//! repository and an in-memory implementation. `create_document_stores` picks the pair
//! the configuration asks for.
//
// Public catalog (feed)
pub mod catalog;
//
// Per-owner record sets (history)
pub mod owner_uploads;
//
// In-process stores
pub mod memory;

use std::sync::Arc;

use fauna_core::{AppError, Config, DocumentStoreBackend};
use sqlx::PgPool;

pub use catalog::{CatalogRepository, CatalogStore};
pub use memory::{MemoryCatalogStore, MemoryOwnerSetStore};
pub use owner_uploads::{OwnerSetStore, OwnerUploadRepository};

/// Catalog and owner-set stores sharing one backend
#[derive(Clone)]
pub struct DocumentStores {
    pub catalog: Arc<dyn CatalogStore>,
    pub owner_sets: Arc<dyn OwnerSetStore>,
}

impl DocumentStores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            owner_sets: Arc::new(OwnerUploadRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self {
            catalog: Arc::new(MemoryCatalogStore::new()),
            owner_sets: Arc::new(MemoryOwnerSetStore::new()),
        }
    }
}

/// Factory function to create the document stores selected by configuration
pub fn create_document_stores(
    config: &Config,
    postgres_pool: Option<PgPool>,
) -> Result<DocumentStores, AppError> {
    match config.document_store() {
        DocumentStoreBackend::Postgres => {
            let pool = postgres_pool.ok_or_else(|| {
                anyhow::anyhow!("PostgreSQL document store selected but no pool was provided")
            })?;
            tracing::info!("Initializing PostgreSQL document stores");
            Ok(DocumentStores::postgres(pool))
        }
        DocumentStoreBackend::Memory => {
            tracing::warn!("Using in-memory document stores; data is lost on restart");
            Ok(DocumentStores::memory())
        }
    }
}
