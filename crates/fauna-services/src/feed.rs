use std::sync::Arc;

use fauna_core::constants::{DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};
use fauna_core::models::FeedResponse;
use fauna_core::AppError;
use fauna_db::CatalogStore;

/// Public feed over the catalog: newest first, optionally narrowed to a species prefix.
#[derive(Clone)]
pub struct FeedService {
    catalog: Arc<dyn CatalogStore>,
    default_limit: u32,
    max_limit: u32,
}

impl FeedService {
    pub fn new(catalog: Arc<dyn CatalogStore>, default_limit: u32, max_limit: u32) -> Self {
        Self {
            catalog,
            default_limit,
            max_limit,
        }
    }

    pub fn with_defaults(catalog: Arc<dyn CatalogStore>) -> Self {
        Self::new(catalog, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT)
    }

    fn resolve_limit(&self, limit: Option<u32>) -> Result<u32, AppError> {
        match limit {
            None => Ok(self.default_limit),
            Some(limit) if limit == 0 || limit > self.max_limit => Err(AppError::InvalidInput(
                format!("limit must be between 1 and {}", self.max_limit),
            )),
            Some(limit) => Ok(limit),
        }
    }

    /// Latest entries, filtered to species starting with `search` when it is not blank
    #[tracing::instrument(skip(self), fields(operation = "feed"))]
    pub async fn query(
        &self,
        search: Option<&str>,
        limit: Option<u32>,
    ) -> Result<FeedResponse, AppError> {
        let limit = self.resolve_limit(limit)?;
        let term = search.map(str::trim).filter(|term| !term.is_empty());

        let entries = self.catalog.query(limit, term).await?;

        tracing::debug!(count = entries.len(), "Feed query completed");

        Ok(FeedResponse {
            search: term.map(str::to_string),
            count: entries.len(),
            entries,
        })
    }
}
