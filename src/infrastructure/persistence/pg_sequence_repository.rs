//! PostgreSQL sequence-backed code counter.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::SequenceRepository;
use crate::error::AppError;

/// Counter backed by a PostgreSQL `SEQUENCE`.
///
/// `nextval` is atomic across connections and never rolls back, so values are
/// unique across processes sharing the database.
pub struct PgSequenceRepository {
    pool: Arc<PgPool>,
}

impl PgSequenceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceRepository for PgSequenceRepository {
    async fn next_id(&self) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT nextval('short_url_code_seq')")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(id)
    }
}
