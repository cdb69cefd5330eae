use axum::{extract::State, Json};
use fauna_core::models::{DeleteSummary, OwnerHistoryResponse, UploadRecord};

use crate::auth::OwnerIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::CatalogServices;

/// The caller's uploads, newest first
#[utoipa::path(
    get,
    path = "/api/v0/me/uploads",
    tag = "history",
    responses(
        (status = 200, description = "The caller's upload records", body = OwnerHistoryResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(catalog), fields(owner_id = %identity.owner_id, operation = "list_uploads"))]
pub async fn list_uploads(
    State(catalog): State<CatalogServices>,
    identity: OwnerIdentity,
) -> Result<Json<OwnerHistoryResponse>, HttpAppError> {
    let history = catalog.history.list(&identity.owner_id).await?;
    Ok(Json(history))
}

/// Delete one of the caller's uploads
///
/// The body is the record exactly as returned by the history listing. It is removed from
/// the caller's set, and every catalog entry of theirs with the same image URL is removed
/// too. Deleting a record that is already gone succeeds with zero counts.
#[utoipa::path(
    delete,
    path = "/api/v0/me/uploads",
    tag = "history",
    request_body = UploadRecord,
    responses(
        (status = 200, description = "What was removed from each store", body = DeleteSummary),
        (status = 400, description = "Invalid record", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "A store delete failed", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(
    skip(catalog, record),
    fields(owner_id = %identity.owner_id, image_url = %record.image_url, operation = "delete_upload")
)]
pub async fn delete_upload(
    State(catalog): State<CatalogServices>,
    identity: OwnerIdentity,
    ValidatedJson(record): ValidatedJson<UploadRecord>,
) -> Result<Json<DeleteSummary>, HttpAppError> {
    let summary = catalog.history.delete(&identity.owner_id, &record).await?;
    Ok(Json(summary))
}
