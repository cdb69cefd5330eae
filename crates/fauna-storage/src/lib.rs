//! Fauna Storage Library
//!
//! Blob storage for uploaded animal images. It includes the `Storage` trait and
//! implementations for S3-compatible object storage and the local filesystem.
//!
//! # Storage key format
//!
//! Every backend uses the same key layout:
//!
//! - `uploads/{owner_id}/{unix_millis}-{blob_id}-{filename}`
//!
//! Both the owner id and the filename are sanitized before they reach a key, so keys never
//! contain `..` or a leading `/`. Key generation lives in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use fauna_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
