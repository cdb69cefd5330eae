use std::sync::Arc;

use fauna_core::models::{DeleteSummary, OwnerHistoryResponse, UploadRecord};
use fauna_core::AppError;
use fauna_db::OwnerSetStore;

use crate::catalog_writer::CatalogWriter;

/// An owner's own uploads: listing and deletion.
#[derive(Clone)]
pub struct HistoryService {
    owner_sets: Arc<dyn OwnerSetStore>,
    writer: CatalogWriter,
}

impl HistoryService {
    pub fn new(owner_sets: Arc<dyn OwnerSetStore>, writer: CatalogWriter) -> Self {
        Self { owner_sets, writer }
    }

    /// The owner's full record set, newest first
    #[tracing::instrument(skip(self), fields(operation = "history"))]
    pub async fn list(&self, owner_id: &str) -> Result<OwnerHistoryResponse, AppError> {
        let mut uploads = self.owner_sets.get_owner_set(owner_id).await?;
        uploads.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(OwnerHistoryResponse {
            total_uploads: uploads.len(),
            uploads,
        })
    }

    /// Delete one record from the owner's set and the matching catalog entries
    #[tracing::instrument(skip(self, record), fields(operation = "delete_upload"))]
    pub async fn delete(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<DeleteSummary, AppError> {
        self.writer
            .delete(owner_id, record)
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))
    }
}
