//! Fauna Services
//!
//! The upload-analyze-persist-query pipeline: upload validation, the vision inference
//! gateway, reply normalization, dual-store fan-out, and the feed and history reads.

pub mod catalog_writer;
pub mod feed;
pub mod history;
pub mod inference;
pub mod normalizer;
pub mod pipeline;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog_writer::{CatalogWriter, PersistenceError};
pub use feed::FeedService;
pub use history::HistoryService;
pub use inference::{GeminiGateway, InferenceError, InferenceGateway, ANALYSIS_PROMPT};
pub use normalizer::{normalize, NormalizeError, Normalized};
pub use pipeline::{UploadError, UploadPipeline, UploadState};
pub use validator::{candidate_from_base64, UploadValidator, ValidationError};
