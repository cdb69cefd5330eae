//! OpenAPI documentation.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use fauna_core::models;

/// Registers the `bearer_token` scheme referenced by the protected handlers.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fauna API",
        version = "0.1.0",
        description = "Animal photo analysis (v0). Signed-in users upload a photo, a vision model identifies the animal, and accepted analyses are published to a public feed and to the uploader's history. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Feed
        handlers::feed::get_feed,
        // Uploads
        handlers::uploads::upload_image,
        handlers::analyze::analyze_image,
        // History
        handlers::history::list_uploads,
        handlers::history::delete_upload,
    ),
    components(
        schemas(
            // Core models
            models::AnimalAnalysis,
            models::UploadRecord,
            models::CatalogEntry,
            models::UploadOutcome,
            models::AnalysisOutcome,
            models::FeedResponse,
            models::OwnerHistoryResponse,
            models::DeleteSummary,
            // Requests
            handlers::analyze::AnalyzeRequest,
            // Error
            error::ErrorResponse,
            fauna_core::FailureReason,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "feed", description = "Public feed of analyzed uploads"),
        (name = "uploads", description = "Upload and analyze animal photos"),
        (name = "history", description = "The signed-in owner's uploads")
    )
)]
pub struct ApiDoc;
