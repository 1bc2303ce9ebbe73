use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::{outbox, Database};
use crate::models::OutboxRecord;

/// Claim/complete/fail operations over the outbox table. Writing rows is not
/// part of this trait: rows are inserted inside the publishing transaction.
#[async_trait]
pub trait OutboxQueue: Send + Sync {
    /// Atomically claim the next due pending record. Returns None when the
    /// queue is empty or another worker won the claim.
    async fn fetch_next(&self) -> ApiResult<Option<OutboxRecord>>;

    async fn complete(&self, record_id: &str) -> ApiResult<()>;

    /// Record a failure: reschedule with backoff while attempts remain,
    /// otherwise park the record as failed.
    async fn fail(&self, record_id: &str, error: &str) -> ApiResult<()>;
}

/// SQL implementation of the outbox queue.
#[derive(Clone)]
pub struct SqlOutboxQueue {
    db: Database,
}

impl SqlOutboxQueue {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OutboxQueue for SqlOutboxQueue {
    async fn fetch_next(&self) -> ApiResult<Option<OutboxRecord>> {
        let now = Utc::now();
        // 5 minutes claim timeout
        let lock_timeout = now + chrono::Duration::minutes(5);

        // Transaction to ensure atomic fetch-and-claim
        let mut tx = self.db.pool().begin().await?;

        // 1. Find a candidate record (pending and due)
        let candidate_row = sqlx::query(
            "SELECT id FROM outbox
             WHERE status = 'pending' AND run_at <= ?
             ORDER BY run_at ASC
             LIMIT 1",
        )
        .bind(now.to_rfc3339())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = candidate_row else {
            return Ok(None);
        };
        let id: String = row.try_get("id")?;

        // 2. Claim it. The status guard in the WHERE clause is what makes
        // this safe: if another worker took the same id, no row matches.
        let result = sqlx::query(
            "UPDATE outbox
             SET status = 'processing', updated_at = ?, locked_until = ?
             WHERE id = ? AND status = 'pending'",
        )
        .bind(now.to_rfc3339())
        .bind(lock_timeout.to_rfc3339())
        .bind(&id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Lost the race to another worker
            tx.rollback().await?;
            return Ok(None);
        }

        // 3. Fetch the full record
        let record_row = sqlx::query(
            "SELECT id, event_type, payload, status, run_at, created_at, updated_at,
                    attempts, max_attempts, last_error
             FROM outbox WHERE id = ?",
        )
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(outbox::record_from_row(&record_row)?))
    }

    async fn complete(&self, record_id: &str) -> ApiResult<()> {
        let now = Utc::now();
        sqlx::query(
            "UPDATE outbox
             SET status = 'completed', updated_at = ?
             WHERE id = ?",
        )
        .bind(now.to_rfc3339())
        .bind(record_id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    async fn fail(&self, record_id: &str, error: &str) -> ApiResult<()> {
        let now = Utc::now();

        let row = sqlx::query("SELECT attempts, max_attempts FROM outbox WHERE id = ?")
            .bind(record_id)
            .fetch_one(self.db.pool())
            .await?;

        let attempts: i32 = row.try_get("attempts")?;
        let max_attempts: i32 = row.try_get("max_attempts")?;
        let new_attempts = attempts + 1;

        if new_attempts < max_attempts {
            // Exponential backoff: 2^attempts * 30 seconds
            let backoff_seconds = 30 * (1 << attempts);
            let next_run = now + chrono::Duration::seconds(backoff_seconds as i64);

            sqlx::query(
                "UPDATE outbox
                 SET status = 'pending', attempts = ?, last_error = ?, run_at = ?, updated_at = ?
                 WHERE id = ?",
            )
            .bind(new_attempts)
            .bind(error)
            .bind(next_run.to_rfc3339())
            .bind(now.to_rfc3339())
            .bind(record_id)
            .execute(self.db.pool())
            .await?;
        } else {
            // Out of attempts; the primary write stays committed either way
            sqlx::query(
                "UPDATE outbox
                 SET status = 'failed', attempts = ?, last_error = ?, updated_at = ?
                 WHERE id = ?",
            )
            .bind(new_attempts)
            .bind(error)
            .bind(now.to_rfc3339())
            .bind(record_id)
            .execute(self.db.pool())
            .await?;
        }

        Ok(())
    }
}
