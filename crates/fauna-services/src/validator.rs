//! Local checks an upload must pass before any network call.

use base64::{engine::general_purpose::STANDARD, Engine};
use fauna_core::models::UploadCandidate;
use fauna_core::Config;

/// Validation errors for submitted images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid image encoding: {0}")]
    InvalidEncoding(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Image upload validator
pub struct UploadValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_file_size_bytes(),
            config.allowed_content_types().to_vec(),
        )
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate content type. Parameters such as `; charset=` are ignored.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_mime_type(content_type).to_lowercase();

        if !self.allowed_content_types.iter().any(|ct| ct == &normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate a candidate: type first, then size.
    pub fn validate(&self, candidate: &UploadCandidate) -> Result<(), ValidationError> {
        self.validate_content_type(&candidate.content_type)?;
        if candidate.data.is_empty() {
            return Err(ValidationError::EmptyFile);
        }
        self.validate_file_size(candidate.effective_size())
    }
}

/// Strip MIME parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Registered form of a declared type: parameters dropped, lowercased, `image/jpg` read as
/// `image/jpeg`. This is what downstream services are given.
pub fn canonical_mime_type(content_type: &str) -> String {
    match normalize_mime_type(content_type).to_lowercase().as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        other => other.to_string(),
    }
}

/// File extension used when the client did not send a filename.
pub fn extension_for(content_type: &str) -> &'static str {
    match canonical_mime_type(content_type).as_str() {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        _ => "bin",
    }
}

/// Build a candidate from the analyze endpoint's `imageData` field.
///
/// Accepts a data URL (`data:image/png;base64,...`) or bare base64. When `mime_type` is
/// blank the data URL's media type is used.
pub fn candidate_from_base64(
    image_data: &str,
    mime_type: &str,
) -> Result<UploadCandidate, ValidationError> {
    let (header_mime, payload) = match image_data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                ValidationError::InvalidEncoding("data URL has no payload".to_string())
            })?;
            let media_type = header.strip_suffix(";base64").ok_or_else(|| {
                ValidationError::InvalidEncoding("data URL is not base64 encoded".to_string())
            })?;
            (Some(media_type), payload)
        }
        None => (None, image_data),
    };

    let content_type = match (mime_type.trim(), header_mime) {
        ("", Some(header)) => header.to_string(),
        (declared, _) => declared.to_string(),
    };

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| ValidationError::InvalidEncoding(e.to_string()))?;

    Ok(UploadCandidate::new(data, content_type, None))
}
