//! Fauna Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! every Fauna component: the analysis value object, upload records, feed and history
//! views, and the `AppError` taxonomy that the HTTP layer renders.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, FaunaConfig, InferenceSettings};
pub use error::{AppError, ErrorMetadata, FailureReason, LogLevel};
pub use storage_types::{DocumentStoreBackend, StorageBackend};
