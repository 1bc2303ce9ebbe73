use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::assembler::{
    assemble_notification_details, assemble_notification_summary, NotificationView,
};
use crate::api::middleware::{ApiResult, AppState};
use crate::api::pagination::{default_page, default_per_page, PageQuery, PaginationMetadata};
use crate::api::users::SuccessResponse;
use crate::models::CreateNotificationRequest;

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub user_id: String,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserScopedQuery {
    pub user_id: String,
}

// Response DTOs
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationView>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub message: String,
    pub count: i64,
}

// API Handlers

/// List a user's notifications, newest first, as summary views (no message
/// body). Page numbering starts at 1.
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageQuery::new(query.page, query.per_page);
    page.validate()?;

    let (notifications, total) = state
        .notifications
        .list_notifications(&query.user_id, query.unread_only, page.limit(), page.offset())
        .await?;

    let views = notifications
        .iter()
        .map(assemble_notification_summary)
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(Json(NotificationListResponse {
        notifications: views,
        pagination: PaginationMetadata::new(page, total),
    }))
}

/// Details view of one notification, message included.
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let notification = state.notifications.get_notification(&id).await?;

    Ok(Json(assemble_notification_details(&notification)?))
}

pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> ApiResult<impl IntoResponse> {
    let notification = state.notifications.create_notification(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(assemble_notification_details(&notification)?),
    ))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResult<impl IntoResponse> {
    state.notifications.mark_read(&id, &query.user_id).await?;

    Ok(Json(SuccessResponse {
        message: "Notification marked as read".to_string(),
    }))
}

pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notifications.mark_all_read(&query.user_id).await?;

    Ok(Json(MarkAllReadResponse {
        message: "All notifications marked as read".to_string(),
        count,
    }))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    Query(query): Query<UserScopedQuery>,
) -> ApiResult<impl IntoResponse> {
    let count = state.notifications.unread_count(&query.user_id).await?;

    Ok(Json(UnreadCountResponse { count }))
}
