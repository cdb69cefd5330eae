//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store for uploaded images.
///
/// The upload pipeline only needs three operations: store the bytes and get back a
/// fetchable URL, check that a blob is there, and delete a blob that no record will
/// ever reference.
///
/// **Key format:** `uploads/{owner_id}/{unix_millis}-{blob_id}-{filename}`. See the crate root
/// documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a blob and return (storage_key, storage_url)
    ///
    /// The storage_key is used for later deletes; the storage_url is what gets recorded
    /// in the upload record.
    async fn put(
        &self,
        owner_id: &str,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Delete a blob by its storage key. Deleting a missing blob is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
