//! Fauna Database Layer
//!
//! Document stores for the public catalog and the per-owner upload sets.

pub mod db;

// Re-exports: store traits and implementations
pub use db::{
    create_document_stores, CatalogRepository, CatalogStore, DocumentStores,
    MemoryCatalogStore, MemoryOwnerSetStore, OwnerSetStore, OwnerUploadRepository,
};
