use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{CreateNotificationRequest, Notification};

#[derive(Clone)]
pub struct NotificationService {
    db: Database,
}

impl NotificationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create_notification(
        &self,
        request: CreateNotificationRequest,
    ) -> ApiResult<Notification> {
        if request.message.trim().is_empty() {
            return Err(ApiError::BadRequest("Message is required".to_string()));
        }

        if self.db.get_user_by_id(&request.user_id).await?.is_none() {
            return Err(ApiError::BadRequest(
                "Notification user does not exist".to_string(),
            ));
        }

        let notification = Notification::new(
            request.user_id,
            request.kind,
            request.message.trim().to_string(),
        );

        self.db.create_notification(&notification).await?;

        Ok(notification)
    }

    pub async fn get_notification(&self, id: &str) -> ApiResult<Notification> {
        self.db
            .get_notification_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))
    }

    pub async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Notification>, i64)> {
        let notifications = self
            .db
            .list_notifications(user_id, unread_only, limit, offset)
            .await?;
        let total = self.db.count_notifications(user_id, unread_only).await?;
        Ok((notifications, total))
    }

    /// Mark a notification read on behalf of its owner. Marking an
    /// already-read notification again is fine.
    pub async fn mark_read(&self, id: &str, user_id: &str) -> ApiResult<()> {
        let notification = self.get_notification(id).await?;

        if notification.user_id != user_id {
            return Err(ApiError::Forbidden(
                "Cannot mark another user's notification as read".to_string(),
            ));
        }

        self.db.mark_notification_read(id).await
    }

    pub async fn mark_all_read(&self, user_id: &str) -> ApiResult<i64> {
        self.db.mark_all_notifications_read(user_id).await
    }

    pub async fn unread_count(&self, user_id: &str) -> ApiResult<i64> {
        self.db.count_notifications(user_id, true).await
    }
}
