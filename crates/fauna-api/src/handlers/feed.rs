use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use fauna_core::models::FeedResponse;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::CatalogServices;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Species prefix (case-sensitive); blank means no filter
    pub search: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<u32>,
}

/// Public feed of analyzed uploads, newest first
#[utoipa::path(
    get,
    path = "/api/v0/feed",
    tag = "feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Latest catalog entries", body = FeedResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(catalog, query), fields(operation = "feed"))]
pub async fn get_feed(
    State(catalog): State<CatalogServices>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<Json<FeedResponse>, HttpAppError> {
    let Query(query) = query?;

    let feed = catalog
        .feed
        .query(query.search.as_deref(), query.limit)
        .await?;

    Ok(Json(feed))
}
