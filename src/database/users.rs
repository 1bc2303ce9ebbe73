use sqlx::Row;
use std::str::FromStr;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::{outbox, Database};
use crate::models::{Account, OutboxRecord, User, UserRole};

fn user_from_row(row: &sqlx::any::AnyRow) -> ApiResult<User> {
    let role_str: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        role: UserRole::from_str(&role_str).map_err(ApiError::Internal)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Insert a user and, when credentials were supplied, its account in the
    /// same transaction.
    pub async fn create_user(&self, user: &User, account: Option<&Account>) -> ApiResult<()> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            "INSERT INTO users (id, email, display_name, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .execute(&mut *tx)
        .await?;

        if let Some(account) = account {
            sqlx::query(
                "INSERT INTO accounts (id, user_id, password_hash, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&account.id)
            .bind(&account.user_id)
            .bind(&account.password_hash)
            .bind(&account.created_at)
            .bind(&account.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, display_name, role, created_at, updated_at
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    pub async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, display_name, role, created_at, updated_at
             FROM users
             WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    /// Delete a user and record the `user.deleted` outbox row in the same
    /// transaction. Returns false (and writes nothing) when the user does
    /// not exist.
    pub async fn delete_user(&self, user_id: &str, record: &OutboxRecord) -> ApiResult<bool> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        outbox::insert_in_tx(&mut tx, record).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Update a user's role and record the `user.role_updated` outbox row in
    /// the same transaction.
    pub async fn update_user_role(
        &self,
        user_id: &str,
        role: UserRole,
        updated_at: &str,
        record: &OutboxRecord,
    ) -> ApiResult<()> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(updated_at)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        outbox::insert_in_tx(&mut tx, record).await?;
        tx.commit().await?;

        Ok(())
    }
}
