//! API constants
//!
//! Handler path annotations for the OpenAPI document repeat the prefix as a literal
//! because utoipa needs compile-time strings.

/// Versioned prefix for every domain route
pub const API_PREFIX: &str = "/api/v0";

/// Path the OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Mount point for locally stored blobs
pub const MEDIA_PATH: &str = "/media";

/// Room for multipart framing and base64 expansion on top of the image size limit.
pub const BODY_LIMIT_OVERHEAD_BYTES: usize = 64 * 1024;

/// In-flight request ceiling for the whole router
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;
