//! Data models for the application
//!
//! The analysis value object, the upload record stored in both locations, and the
//! response views built on top of them.

mod analysis;
mod upload;
mod views;

pub use analysis::*;
pub use upload::*;
pub use views::*;
