use fauna_core::constants::PREFIX_RANGE_SUFFIX;
use fauna_core::models::{AnimalAnalysis, CatalogEntry, UploadRecord};
use fauna_core::AppError;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Public catalog of accepted uploads.
///
/// Entries are independent documents with their own id, queried newest first.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Store a new entry for `record` and return its id
    async fn insert(&self, record: &UploadRecord) -> Result<Uuid, AppError>;

    /// Up to `limit` entries ordered by timestamp, newest first. With a prefix, only entries
    /// whose species lies in `[prefix, prefix + U+F8FF)` are returned.
    async fn query(
        &self,
        limit: u32,
        species_prefix: Option<&str>,
    ) -> Result<Vec<CatalogEntry>, AppError>;

    /// Remove every entry of `owner_id` whose image URL is `image_url`; returns how many
    async fn delete_by_image_url(&self, owner_id: &str, image_url: &str)
        -> Result<u64, AppError>;
}

/// Bounds of the half-open species range matched by a prefix search.
pub fn prefix_range(prefix: &str) -> (String, String) {
    (prefix.to_string(), format!("{}{}", prefix, PREFIX_RANGE_SUFFIX))
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogEntryRow {
    id: Uuid,
    owner_id: String,
    image_url: String,
    analysis: Json<AnimalAnalysis>,
    recorded_at: String,
}

impl From<CatalogEntryRow> for CatalogEntry {
    fn from(row: CatalogEntryRow) -> Self {
        CatalogEntry {
            id: row.id,
            record: UploadRecord {
                image_url: row.image_url,
                analysis: row.analysis.0,
                timestamp: row.recorded_at,
                owner_id: row.owner_id,
            },
        }
    }
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for CatalogRepository {
    #[tracing::instrument(
        skip(self, record),
        fields(db.table = "catalog_entries", db.operation = "insert", owner_id = %record.owner_id)
    )]
    async fn insert(&self, record: &UploadRecord) -> Result<Uuid, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>(
            r#"
            INSERT INTO catalog_entries (id, owner_id, image_url, species, analysis, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.owner_id)
        .bind(&record.image_url)
        .bind(&record.analysis.species)
        .bind(Json(&record.analysis))
        .bind(&record.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "catalog_entries", db.operation = "select"))]
    async fn query(
        &self,
        limit: u32,
        species_prefix: Option<&str>,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        // COLLATE "C" gives byte order, which for UTF-8 is code point order
        let rows = match species_prefix {
            Some(prefix) => {
                let (lower, upper) = prefix_range(prefix);
                sqlx::query_as::<Postgres, CatalogEntryRow>(
                    r#"
                    SELECT id, owner_id, image_url, analysis, recorded_at
                    FROM catalog_entries
                    WHERE species COLLATE "C" >= $1 AND species COLLATE "C" < $2
                    ORDER BY recorded_at DESC, created_at DESC
                    LIMIT $3
                    "#,
                )
                .bind(lower)
                .bind(upper)
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, CatalogEntryRow>(
                    r#"
                    SELECT id, owner_id, image_url, analysis, recorded_at
                    FROM catalog_entries
                    ORDER BY recorded_at DESC, created_at DESC
                    LIMIT $1
                    "#,
                )
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "catalog_entries", db.operation = "delete"))]
    async fn delete_by_image_url(
        &self,
        owner_id: &str,
        image_url: &str,
    ) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM catalog_entries WHERE owner_id = $1 AND image_url = $2")
                .bind(owner_id)
                .bind(image_url)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
