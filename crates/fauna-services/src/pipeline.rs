//! One upload attempt: validate, store the blob, infer, normalize, persist.
//!
//! ```text
//! Selected -> Validating -> (rejected) Idle
//! Validating -> Uploading -> Inferring -> Normalizing
//! Normalizing -> (invalid) Rejected
//! Normalizing -> Valid -> Persisting -> (success) Done
//! Persisting -> (partial or total failure) Failed
//! ```
//!
//! Steps run in order and the first failure ends the attempt. Nothing is retried. A blob
//! that no store will reference is deleted in a detached task.

use std::fmt;
use std::sync::Arc;

use fauna_core::constants::NOT_AN_ANIMAL;
use fauna_core::models::{AnalysisOutcome, UploadCandidate, UploadOutcome, UploadRecord};
use fauna_core::AppError;
use fauna_storage::{Storage, StorageError};
use uuid::Uuid;

use crate::catalog_writer::{CatalogWriter, PersistenceError};
use crate::inference::{InferenceError, InferenceGateway};
use crate::normalizer::{self, NormalizeError, Normalized};
use crate::validator::{canonical_mime_type, extension_for, UploadValidator, ValidationError};

/// States of one upload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Selected,
    Validating,
    Idle,
    Uploading,
    Inferring,
    Normalizing,
    Rejected,
    Valid,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why an upload attempt ended without an outcome
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Blob store unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    MalformedResponse(#[from] NormalizeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(e @ ValidationError::FileTooLarge { .. }) => {
                AppError::PayloadTooLarge(e.to_string())
            }
            UploadError::Validation(e) => AppError::InvalidInput(e.to_string()),
            UploadError::Storage(e) => AppError::Storage(e.to_string()),
            UploadError::Inference(e) => AppError::InferenceUnavailable(e.to_string()),
            UploadError::MalformedResponse(e) => AppError::MalformedResponse(e.to_string()),
            UploadError::Persistence(e) => AppError::Persistence(e.to_string()),
        }
    }
}

/// Tracks and logs the state of one attempt
struct Attempt {
    id: Uuid,
    state: UploadState,
}

impl Attempt {
    fn start() -> Self {
        let attempt = Self {
            id: Uuid::new_v4(),
            state: UploadState::Selected,
        };
        tracing::debug!(attempt_id = %attempt.id, state = %attempt.state, "Upload attempt started");
        attempt
    }

    fn advance(&mut self, next: UploadState) {
        tracing::debug!(
            attempt_id = %self.id,
            from = %self.state,
            to = %next,
            "Upload attempt transition"
        );
        self.state = next;
    }
}

#[derive(Clone)]
pub struct UploadPipeline {
    validator: Arc<UploadValidator>,
    storage: Arc<dyn Storage>,
    gateway: Arc<dyn InferenceGateway>,
    writer: CatalogWriter,
}

impl UploadPipeline {
    pub fn new(
        validator: UploadValidator,
        storage: Arc<dyn Storage>,
        gateway: Arc<dyn InferenceGateway>,
        writer: CatalogWriter,
    ) -> Self {
        Self {
            validator: Arc::new(validator),
            storage,
            gateway,
            writer,
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Run a full upload attempt for `owner_id`
    #[tracing::instrument(skip(self, candidate), fields(operation = "upload", content_type = %candidate.content_type))]
    pub async fn submit(
        &self,
        owner_id: &str,
        candidate: UploadCandidate,
    ) -> Result<UploadOutcome, UploadError> {
        let mut attempt = Attempt::start();

        attempt.advance(UploadState::Validating);
        if let Err(e) = self.validator.validate(&candidate) {
            attempt.advance(UploadState::Idle);
            return Err(e.into());
        }

        attempt.advance(UploadState::Uploading);
        let mime_type = canonical_mime_type(&candidate.content_type);
        let filename = candidate
            .filename
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("image.{}", extension_for(&candidate.content_type)));
        let (storage_key, image_url) = match self
            .storage
            .put(owner_id, &filename, &mime_type, candidate.data.clone())
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                attempt.advance(UploadState::Failed);
                return Err(e.into());
            }
        };

        attempt.advance(UploadState::Inferring);
        let reply = match self
            .gateway
            .analyze(&candidate.data, &mime_type)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                attempt.advance(UploadState::Failed);
                self.discard_blob(storage_key);
                return Err(e.into());
            }
        };

        attempt.advance(UploadState::Normalizing);
        let analysis = match normalizer::normalize(&reply) {
            Ok(Normalized::Valid(analysis)) => analysis,
            Ok(Normalized::Rejected(_)) => {
                attempt.advance(UploadState::Rejected);
                self.discard_blob(storage_key);
                return Ok(UploadOutcome::Rejected {
                    reason: NOT_AN_ANIMAL.to_string(),
                });
            }
            Err(e) => {
                attempt.advance(UploadState::Failed);
                self.discard_blob(storage_key);
                return Err(e.into());
            }
        };

        attempt.advance(UploadState::Valid);
        let record = UploadRecord::new(image_url, analysis, owner_id);

        attempt.advance(UploadState::Persisting);
        match self.writer.publish(&record).await {
            Ok(entry_id) => {
                attempt.advance(UploadState::Done);
                tracing::info!(
                    attempt_id = %attempt.id,
                    entry_id = %entry_id,
                    species = %record.analysis.species,
                    "Upload accepted"
                );
                Ok(UploadOutcome::Accepted { record })
            }
            Err(e) => {
                attempt.advance(UploadState::Failed);
                // A blob still referenced by one store stays in place
                if e.is_total() {
                    self.discard_blob(storage_key);
                }
                Err(e.into())
            }
        }
    }

    /// Validate and analyze an image without storing anything
    #[tracing::instrument(skip(self, candidate), fields(operation = "analyze", content_type = %candidate.content_type))]
    pub async fn analyze(&self, candidate: UploadCandidate) -> Result<AnalysisOutcome, UploadError> {
        self.validator.validate(&candidate)?;
        let mime_type = canonical_mime_type(&candidate.content_type);

        let reply = self
            .gateway
            .analyze(&candidate.data, &mime_type)
            .await?;

        match normalizer::normalize(&reply)? {
            Normalized::Valid(analysis) => Ok(AnalysisOutcome::Accepted { analysis }),
            Normalized::Rejected(_) => Ok(AnalysisOutcome::Rejected {
                reason: NOT_AN_ANIMAL.to_string(),
            }),
        }
    }

    fn discard_blob(&self, storage_key: String) {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            match storage.delete(&storage_key).await {
                Ok(()) => tracing::debug!(key = %storage_key, "Discarded unreferenced blob"),
                Err(e) => tracing::warn!(
                    key = %storage_key,
                    error = %e,
                    "Failed to discard unreferenced blob"
                ),
            }
        });
    }
}
