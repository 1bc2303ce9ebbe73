use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{OutboxRecord, OutboxStatus};

/// Write an outbox row inside the caller's transaction. This is the
/// "publish" half of the cascade: the row commits or rolls back together
/// with the primary change.
pub(crate) async fn insert_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Any>,
    record: &OutboxRecord,
) -> ApiResult<()> {
    let payload_str = serde_json::to_string(&record.payload)
        .map_err(|e| ApiError::Internal(format!("Failed to encode event payload: {}", e)))?;

    sqlx::query(
        "INSERT INTO outbox (id, event_type, payload, status, run_at, created_at, updated_at,
                             attempts, max_attempts, last_error)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.event_type)
    .bind(payload_str)
    .bind(record.status.to_string())
    .bind(record.run_at.to_rfc3339())
    .bind(record.created_at.to_rfc3339())
    .bind(record.updated_at.to_rfc3339())
    .bind(record.attempts)
    .bind(record.max_attempts)
    .bind(&record.last_error)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub(crate) fn record_from_row(row: &sqlx::any::AnyRow) -> ApiResult<OutboxRecord> {
    fn parse_date_col(row: &sqlx::any::AnyRow, col: &str) -> ApiResult<DateTime<Utc>> {
        let s: String = row.try_get(col)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| sqlx::Error::Decode(Box::new(e)).into())
    }

    let status_str: String = row.try_get("status")?;
    let payload_str: String = row.try_get("payload")?;
    let payload = serde_json::from_str(&payload_str).unwrap_or(serde_json::Value::Null);
    let last_error: Option<String> = row.try_get("last_error").ok();

    Ok(OutboxRecord {
        id: row.try_get("id")?,
        event_type: row.try_get("event_type")?,
        payload,
        status: OutboxStatus::from(status_str),
        run_at: parse_date_col(row, "run_at")?,
        created_at: parse_date_col(row, "created_at")?,
        updated_at: parse_date_col(row, "updated_at")?,
        attempts: row.try_get("attempts")?,
        max_attempts: row.try_get("max_attempts")?,
        last_error,
    })
}

impl Database {
    pub async fn get_outbox_record(&self, id: &str) -> ApiResult<Option<OutboxRecord>> {
        let row = sqlx::query(
            "SELECT id, event_type, payload, status, run_at, created_at, updated_at,
                    attempts, max_attempts, last_error
             FROM outbox
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| record_from_row(&row)).transpose()
    }

    pub async fn count_outbox_records(&self, status: OutboxStatus) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM outbox WHERE status = ?")
            .bind(status.to_string())
            .fetch_one(self.pool())
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}
