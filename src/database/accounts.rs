use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::Account;

impl Database {
    pub async fn get_account_by_user_id(&self, user_id: &str) -> ApiResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, user_id, password_hash, created_at, updated_at
             FROM accounts
             WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        if let Some(row) = row {
            Ok(Some(Account {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                password_hash: row.try_get("password_hash")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Remove the account owned by a user. Returns false when the user had
    /// no account; callers treat that as a no-op.
    pub async fn delete_account_by_user_id(&self, user_id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
