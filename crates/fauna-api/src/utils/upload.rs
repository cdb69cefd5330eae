//! Multipart extraction for upload handlers

use axum::extract::Multipart;
use fauna_core::models::UploadCandidate;
use fauna_core::AppError;

/// Field name the image must be sent under
pub const FILE_FIELD: &str = "file";

/// Read the single `file` field of a multipart form into an upload candidate.
/// Multiple file fields are rejected; other fields are ignored.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadCandidate, AppError> {
    let mut candidate: Option<UploadCandidate> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if candidate.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        candidate = Some(UploadCandidate::new(data.to_vec(), content_type, filename));
    }

    candidate.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}
