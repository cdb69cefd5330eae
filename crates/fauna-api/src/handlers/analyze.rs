use axum::{extract::State, Json};
use fauna_core::models::AnalysisOutcome;
use fauna_core::AppError;
use fauna_services::candidate_from_base64;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::OwnerIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::UploadServices;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Data URL (`data:image/png;base64,...`) or bare base64
    #[validate(length(min = 1, message = "imageData must not be empty"))]
    pub image_data: String,
    /// MIME type; taken from the data URL when omitted
    #[serde(default)]
    pub mime_type: String,
}

/// Analyze an image without storing it
#[utoipa::path(
    post,
    path = "/api/v0/analyze",
    tag = "uploads",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result (accepted or rejected)", body = AnalysisOutcome),
        (status = 400, description = "Invalid image", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
        (status = 502, description = "Analysis failed", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(
    skip(uploads, request),
    fields(owner_id = %identity.owner_id, operation = "analyze_image")
)]
pub async fn analyze_image(
    State(uploads): State<UploadServices>,
    identity: OwnerIdentity,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let candidate = candidate_from_base64(&request.image_data, &request.mime_type)?;
    let outcome = uploads.pipeline.analyze(candidate).await?;

    Ok(Json(outcome))
}
