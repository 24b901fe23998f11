use async_trait::async_trait;
use tracing::debug;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::FeedbackRecord;

/// Storage seam for feedback rows. Handlers only see this trait, so the
/// pool-backed implementation can be swapped for an in-memory one in tests.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Append one row. Never updates or deduplicates.
    async fn insert(&self, record: &FeedbackRecord) -> Result<(), DatabaseError>;

    /// Cheap connectivity check used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed feedback repository
#[derive(Clone)]
pub struct Repository {
    db: DatabaseManager,
}

impl Repository {
    const INSERT_SQL: &'static str =
        "INSERT INTO feedback (session_id, page_context, action) VALUES ($1, $2::json, $3)";

    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackStore for Repository {
    async fn insert(&self, record: &FeedbackRecord) -> Result<(), DatabaseError> {
        // The transaction holds its pooled connection until commit or drop;
        // dropping without commit rolls back and returns the connection.
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(Self::INSERT_SQL)
            .bind(record.session_id.as_deref())
            .bind(record.page_context_json())
            .bind(record.action.as_str())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() != 1 {
            return Err(DatabaseError::QueryError(format!(
                "expected 1 inserted row, got {}",
                result.rows_affected()
            )));
        }

        tx.commit().await?;
        debug!("Inserted feedback row ({})", record.action);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.db.health_check().await
    }
}
