use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::{outbox, Database};
use crate::models::{OutboxRecord, Provider};

fn provider_from_row(row: &sqlx::any::AnyRow) -> ApiResult<Provider> {
    Ok(Provider {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone").ok(),
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Insert a provider and record the `provider.created` outbox row in the
    /// same transaction.
    pub async fn create_provider(
        &self,
        provider: &Provider,
        record: &OutboxRecord,
    ) -> ApiResult<()> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            "INSERT INTO providers (id, name, email, phone, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&provider.id)
        .bind(&provider.name)
        .bind(&provider.email)
        .bind(&provider.phone)
        .bind(&provider.created_by)
        .bind(&provider.created_at)
        .bind(&provider.updated_at)
        .execute(&mut *tx)
        .await?;

        outbox::insert_in_tx(&mut tx, record).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn get_provider_by_id(&self, id: &str) -> ApiResult<Option<Provider>> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, created_by, created_at, updated_at
             FROM providers
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| provider_from_row(&row)).transpose()
    }

    pub async fn list_providers(&self, limit: i64, offset: i64) -> ApiResult<Vec<Provider>> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, created_by, created_at, updated_at
             FROM providers
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(provider_from_row).collect()
    }

    pub async fn count_providers(&self) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM providers")
            .fetch_one(self.pool())
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn delete_provider(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM providers WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
