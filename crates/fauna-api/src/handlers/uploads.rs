use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fauna_core::models::UploadOutcome;

use crate::auth::OwnerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::UploadServices;
use crate::utils::upload::extract_multipart_file;

/// Upload an image for analysis
///
/// Runs one upload attempt: validate, store the blob, analyze, and publish the record to
/// the catalog and the caller's history.
///
/// # Returns
/// - 201 with `{status: "accepted", record}` when the image shows an animal
/// - 200 with `{status: "rejected", reason}` when it does not; nothing is persisted
///
/// # Errors
/// - 400/413 - the file failed validation (`reason: validation`)
/// - 502 - the blob store or the inference service failed (`reason: transport` or
///   `malformed-response`)
/// - 500 - a store write failed (`reason: storage`)
#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Analysis accepted and published", body = UploadOutcome),
        (status = 200, description = "Image is not an animal; nothing was stored", body = UploadOutcome),
        (status = 400, description = "Invalid file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Blob store or analysis failed", body = ErrorResponse),
        (status = 500, description = "Persistence failed", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(
    skip(uploads, multipart),
    fields(owner_id = %identity.owner_id, operation = "upload_image")
)]
pub async fn upload_image(
    State(uploads): State<UploadServices>,
    identity: OwnerIdentity,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let candidate = extract_multipart_file(multipart).await?;

    let outcome = uploads
        .pipeline
        .submit(&identity.owner_id, candidate)
        .await?;

    let status = match outcome {
        UploadOutcome::Accepted { .. } => StatusCode::CREATED,
        UploadOutcome::Rejected { .. } => StatusCode::OK,
    };

    Ok((status, Json(outcome)).into_response())
}
