use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::{Notification, NotificationKind};

fn notification_from_row(row: &sqlx::any::AnyRow) -> ApiResult<Notification> {
    let kind_str: String = row.try_get("kind")?;
    let is_read_int: i32 = row.try_get("is_read")?;

    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        kind: NotificationKind::from(kind_str),
        message: row.try_get("message")?,
        created_at: row.try_get("created_at")?,
        is_read: is_read_int != 0,
    })
}

impl Database {
    pub async fn create_notification(&self, notification: &Notification) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, user_id, kind, message, created_at, is_read)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(&notification.created_at)
        .bind(if notification.is_read { 1 } else { 0 })
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_notification_by_id(&self, id: &str) -> ApiResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, user_id, kind, message, created_at, is_read
             FROM notifications
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| notification_from_row(&row)).transpose()
    }

    /// Notifications for one user, most recent first, optionally restricted
    /// to unread ones.
    pub async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Notification>> {
        let sql = if unread_only {
            "SELECT id, user_id, kind, message, created_at, is_read
             FROM notifications
             WHERE user_id = ? AND is_read = 0
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        } else {
            "SELECT id, user_id, kind, message, created_at, is_read
             FROM notifications
             WHERE user_id = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        };

        let rows = sqlx::query(sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(notification_from_row).collect()
    }

    pub async fn count_notifications(&self, user_id: &str, unread_only: bool) -> ApiResult<i64> {
        let sql = if unread_only {
            "SELECT COUNT(*) as count FROM notifications WHERE user_id = ? AND is_read = 0"
        } else {
            "SELECT COUNT(*) as count FROM notifications WHERE user_id = ?"
        };

        let row = sqlx::query(sql).bind(user_id).fetch_one(self.pool()).await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn mark_notification_read(&self, id: &str) -> ApiResult<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    pub async fn mark_all_notifications_read(&self, user_id: &str) -> ApiResult<i64> {
        let result = sqlx::query(
            "UPDATE notifications
             SET is_read = 1
             WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() as i64)
    }
}
