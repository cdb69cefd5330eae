use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analysis::AnimalAnalysis;
use super::upload::{CatalogEntry, UploadRecord};

/// Result of one upload attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadOutcome {
    /// Analysis was valid and the record was written to both stores
    Accepted { record: UploadRecord },
    /// Analysis was a rejection sentinel; nothing was persisted
    Rejected { reason: String },
}

/// Result of the analyze-only endpoint (no persistence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Accepted { analysis: AnimalAnalysis },
    Rejected { reason: String },
}

/// One page of the public feed, newest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedResponse {
    pub search: Option<String>,
    pub entries: Vec<CatalogEntry>,
    pub count: usize,
}

/// An owner's complete upload history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerHistoryResponse {
    pub uploads: Vec<UploadRecord>,
    pub total_uploads: usize,
}

/// What a delete removed from each store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct DeleteSummary {
    pub owner_records_removed: u64,
    pub catalog_entries_removed: u64,
}
