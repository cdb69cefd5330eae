//! Fan-out of upload records to the public catalog and the owner's set.
//!
//! The two stores are written independently and concurrently. Nothing is rolled back when
//! only one side succeeds; the failure says which store is behind.

use std::sync::Arc;

use fauna_core::models::{DeleteSummary, UploadRecord};
use fauna_core::AppError;
use fauna_db::{CatalogStore, DocumentStores, OwnerSetStore};
use uuid::Uuid;

/// One or both store writes failed
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("catalog write failed: {0}")]
    Catalog(#[source] AppError),

    #[error("owner set write failed: {0}")]
    OwnerSet(#[source] AppError),

    #[error("catalog and owner set writes failed (catalog: {catalog}; owner set: {owner_set})")]
    Both {
        catalog: AppError,
        owner_set: AppError,
    },
}

impl PersistenceError {
    /// Name of the store(s) that did not take the write
    pub fn failed_store(&self) -> &'static str {
        match self {
            PersistenceError::Catalog(_) => "catalog",
            PersistenceError::OwnerSet(_) => "owner_set",
            PersistenceError::Both { .. } => "catalog,owner_set",
        }
    }

    /// True when neither store holds the write
    pub fn is_total(&self) -> bool {
        matches!(self, PersistenceError::Both { .. })
    }

    fn from_results<A, B>(
        catalog: Result<A, AppError>,
        owner_set: Result<B, AppError>,
    ) -> Result<(A, B), PersistenceError> {
        match (catalog, owner_set) {
            (Ok(a), Ok(b)) => Ok((a, b)),
            (Err(catalog), Ok(_)) => Err(PersistenceError::Catalog(catalog)),
            (Ok(_), Err(owner_set)) => Err(PersistenceError::OwnerSet(owner_set)),
            (Err(catalog), Err(owner_set)) => Err(PersistenceError::Both { catalog, owner_set }),
        }
    }
}

#[derive(Clone)]
pub struct CatalogWriter {
    catalog: Arc<dyn CatalogStore>,
    owner_sets: Arc<dyn OwnerSetStore>,
}

impl CatalogWriter {
    pub fn new(catalog: Arc<dyn CatalogStore>, owner_sets: Arc<dyn OwnerSetStore>) -> Self {
        Self {
            catalog,
            owner_sets,
        }
    }

    pub fn from_stores(stores: &DocumentStores) -> Self {
        Self::new(stores.catalog.clone(), stores.owner_sets.clone())
    }

    /// Write `record` to both stores; returns the new catalog entry id
    #[tracing::instrument(skip(self, record), fields(owner_id = %record.owner_id, image_url = %record.image_url))]
    pub async fn publish(&self, record: &UploadRecord) -> Result<Uuid, PersistenceError> {
        let (catalog, owner_set) = tokio::join!(
            self.catalog.insert(record),
            self.owner_sets
                .append_to_owner_set(&record.owner_id, record),
        );

        match PersistenceError::from_results(catalog, owner_set) {
            Ok((entry_id, ())) => {
                tracing::debug!(entry_id = %entry_id, "Record published to catalog and owner set");
                Ok(entry_id)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    failed_store = e.failed_store(),
                    "Record publish incomplete; stores are inconsistent"
                );
                Err(e)
            }
        }
    }

    /// Remove `record` from the owner's set and every catalog entry of theirs with its image URL.
    ///
    /// Removing a record that is not there is a no-op.
    #[tracing::instrument(skip(self, record), fields(owner_id = %owner_id, image_url = %record.image_url))]
    pub async fn delete(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<DeleteSummary, PersistenceError> {
        let (owner_set, catalog) = tokio::join!(
            self.owner_sets.remove_from_owner_set(owner_id, record),
            self.catalog
                .delete_by_image_url(owner_id, &record.image_url),
        );

        match PersistenceError::from_results(catalog, owner_set) {
            Ok((catalog_entries_removed, owner_records_removed)) => {
                tracing::debug!(
                    owner_records_removed,
                    catalog_entries_removed,
                    "Record deleted"
                );
                Ok(DeleteSummary {
                    owner_records_removed,
                    catalog_entries_removed,
                })
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    failed_store = e.failed_store(),
                    "Record delete incomplete; stores are inconsistent"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_record, FailingCatalog, FailingOwnerSets};
    use fauna_db::{MemoryCatalogStore, MemoryOwnerSetStore};

    #[tokio::test]
    async fn test_publish_writes_both_stores() {
        let catalog = Arc::new(MemoryCatalogStore::new());
        let owner_sets = Arc::new(MemoryOwnerSetStore::new());
        let writer = CatalogWriter::new(catalog.clone(), owner_sets.clone());

        let record = sample_record("me", "Dog", "http://x/1.png");
        let entry_id = writer.publish(&record).await.unwrap();

        let entries = catalog.query(20, None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry_id);
        assert_eq!(entries[0].record, record);
        assert_eq!(owner_sets.get_owner_set("me").await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_partial_publish_names_failed_store_and_keeps_other_write() {
        let owner_sets = Arc::new(MemoryOwnerSetStore::new());
        let writer = CatalogWriter::new(Arc::new(FailingCatalog), owner_sets.clone());

        let record = sample_record("me", "Dog", "http://x/1.png");
        let err = writer.publish(&record).await.unwrap_err();

        assert_eq!(err.failed_store(), "catalog");
        assert!(!err.is_total());
        assert_eq!(owner_sets.get_owner_set("me").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_total_publish_failure() {
        let writer = CatalogWriter::new(Arc::new(FailingCatalog), Arc::new(FailingOwnerSets));
        let err = writer
            .publish(&sample_record("me", "Dog", "http://x/1.png"))
            .await
            .unwrap_err();
        assert!(err.is_total());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let catalog = Arc::new(MemoryCatalogStore::new());
        let owner_sets = Arc::new(MemoryOwnerSetStore::new());
        let writer = CatalogWriter::new(catalog.clone(), owner_sets.clone());

        let record = sample_record("me", "Dog", "http://x/1.png");
        writer.publish(&record).await.unwrap();

        let first = writer.delete("me", &record).await.unwrap();
        assert_eq!(
            first,
            DeleteSummary {
                owner_records_removed: 1,
                catalog_entries_removed: 1
            }
        );

        let second = writer.delete("me", &record).await.unwrap();
        assert_eq!(second, DeleteSummary::default());
        assert!(catalog.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_duplicate_catalog_entries() {
        let catalog = Arc::new(MemoryCatalogStore::new());
        let owner_sets = Arc::new(MemoryOwnerSetStore::new());
        let writer = CatalogWriter::new(catalog.clone(), owner_sets.clone());

        let record = sample_record("me", "Dog", "http://x/1.png");
        writer.publish(&record).await.unwrap();
        catalog.insert(&record).await.unwrap();

        let summary = writer.delete("me", &record).await.unwrap();
        assert_eq!(summary.catalog_entries_removed, 2);
        assert_eq!(summary.owner_records_removed, 1);
    }
}
