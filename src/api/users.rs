use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::api::middleware::{ApiResult, AppState};
use crate::models::{CreateUserRequest, UpdateUserRoleRequest, UserResponse};

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Create a user; when a password is supplied an account is created in the
/// same transaction.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let (user, has_account) = state.users.create_user(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(user, has_account)),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let (user, has_account) = state.users.get_user(&id).await?;

    Ok(Json(UserResponse::from_user(user, has_account)))
}

/// Delete a user. The account cleanup runs after this request completes, in
/// the outbox processor's own transaction.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.users.delete_user(&id).await?;

    Ok(Json(SuccessResponse {
        message: "User deleted".to_string(),
    }))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state.users.update_role(&id, request.role).await?;
    let has_account = state.db.get_account_by_user_id(&user.id).await?.is_some();

    Ok(Json(UserResponse::from_user(user, has_account)))
}
