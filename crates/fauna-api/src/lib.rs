//! Fauna API
//!
//! HTTP surface for the upload-analyze-persist pipeline: the public feed, authenticated
//! uploads and analysis, and the signed-in owner's upload history.

mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
mod utils;
