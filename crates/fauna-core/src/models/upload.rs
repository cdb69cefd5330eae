use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::analysis::AnimalAnalysis;

/// Image submitted for analysis, held only for the duration of one upload attempt.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub data: Vec<u8>,
    /// MIME type declared by the client (e.g. `image/png`)
    pub content_type: String,
    /// Size declared by the client; validation uses the larger of this and `data.len()`
    pub declared_size: usize,
    pub filename: Option<String>,
}

impl UploadCandidate {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>, filename: Option<String>) -> Self {
        let declared_size = data.len();
        Self {
            data,
            content_type: content_type.into(),
            declared_size,
            filename,
        }
    }

    /// Size checked against the upload limit.
    pub fn effective_size(&self) -> usize {
        self.declared_size.max(self.data.len())
    }
}

/// One accepted analysis, as stored in an owner's set and in the public catalog.
///
/// Owner-set records have no id; two records are the same record iff every field
/// is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    /// Fetchable blob URL
    pub image_url: String,
    pub analysis: AnimalAnalysis,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
    pub owner_id: String,
}

impl UploadRecord {
    pub fn new(
        image_url: impl Into<String>,
        analysis: AnimalAnalysis,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            analysis,
            timestamp: format_timestamp(Utc::now()),
            owner_id: owner_id.into(),
        }
    }
}

/// Public catalog entry: an upload record plus its own opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: UploadRecord,
}

/// Render a timestamp the way records store it (`2024-05-01T12:34:56.789Z`).
///
/// The fixed width keeps lexicographic order equal to chronological order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
