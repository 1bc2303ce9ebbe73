use axum::{
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::api::middleware::AppState;

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // User routes
        .route("/api/users", post(api::users::create_user))
        .route("/api/users/:id", get(api::users::get_user))
        .route("/api/users/:id", delete(api::users::delete_user))
        .route("/api/users/:id/role", patch(api::users::update_user_role))
        // Customer routes
        .route("/api/customers", post(api::customers::create_customer))
        .route("/api/customers", get(api::customers::list_customers))
        .route("/api/customers/:id", get(api::customers::get_customer))
        .route("/api/customers/:id", patch(api::customers::update_customer))
        // Provider routes
        .route("/api/providers", post(api::providers::create_provider))
        .route("/api/providers", get(api::providers::list_providers))
        .route("/api/providers/:id", get(api::providers::get_provider))
        .route("/api/providers/:id", delete(api::providers::delete_provider))
        // Notification routes
        .route(
            "/api/notifications",
            get(api::notifications::list_notifications),
        )
        .route(
            "/api/notifications",
            post(api::notifications::create_notification),
        )
        .route(
            "/api/notifications/:id",
            get(api::notifications::get_notification),
        )
        .route(
            "/api/notifications/:id/read",
            post(api::notifications::mark_notification_read),
        )
        .route(
            "/api/notifications/read-all",
            post(api::notifications::mark_all_notifications_read),
        )
        .route(
            "/api/notifications/unread-count",
            get(api::notifications::get_unread_count),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
