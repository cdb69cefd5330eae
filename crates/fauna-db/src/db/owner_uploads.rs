use fauna_core::models::{AnimalAnalysis, UploadRecord};
use fauna_core::AppError;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

/// Per-owner record sets.
///
/// Records carry no id; removal matches every field of the record.
#[async_trait::async_trait]
pub trait OwnerSetStore: Send + Sync {
    /// Every record in the owner's set (order unspecified)
    async fn get_owner_set(&self, owner_id: &str) -> Result<Vec<UploadRecord>, AppError>;

    /// Add `record` to the owner's set; adding a record already present is a no-op
    async fn append_to_owner_set(&self, owner_id: &str, record: &UploadRecord)
        -> Result<(), AppError>;

    /// Remove the structurally equal record from the owner's set; returns how many were removed
    async fn remove_from_owner_set(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<u64, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct OwnerUploadRow {
    owner_id: String,
    image_url: String,
    analysis: Json<AnimalAnalysis>,
    recorded_at: String,
}

impl From<OwnerUploadRow> for UploadRecord {
    fn from(row: OwnerUploadRow) -> Self {
        UploadRecord {
            image_url: row.image_url,
            analysis: row.analysis.0,
            timestamp: row.recorded_at,
            owner_id: row.owner_id,
        }
    }
}

/// PostgreSQL-backed owner record sets
#[derive(Clone)]
pub struct OwnerUploadRepository {
    pool: PgPool,
}

impl OwnerUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OwnerSetStore for OwnerUploadRepository {
    #[tracing::instrument(skip(self), fields(db.table = "owner_uploads", db.operation = "select"))]
    async fn get_owner_set(&self, owner_id: &str) -> Result<Vec<UploadRecord>, AppError> {
        let rows = sqlx::query_as::<Postgres, OwnerUploadRow>(
            r#"
            SELECT owner_id, image_url, analysis, recorded_at
            FROM owner_uploads
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UploadRecord::from).collect())
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "owner_uploads", db.operation = "insert"))]
    async fn append_to_owner_set(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO owner_uploads (owner_id, image_url, analysis, recorded_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, image_url, recorded_at, md5(analysis::text)) DO NOTHING
            "#,
        )
        .bind(owner_id)
        .bind(&record.image_url)
        .bind(Json(&record.analysis))
        .bind(&record.timestamp)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Record already present in owner set");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "owner_uploads", db.operation = "delete"))]
    async fn remove_from_owner_set(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<u64, AppError> {
        if record.owner_id != owner_id {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            DELETE FROM owner_uploads
            WHERE owner_id = $1 AND image_url = $2 AND recorded_at = $3 AND analysis = $4
            "#,
        )
        .bind(owner_id)
        .bind(&record.image_url)
        .bind(&record.timestamp)
        .bind(Json(&record.analysis))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
