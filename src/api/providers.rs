use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::assembler::{assemble_provider, ProviderView};
use crate::api::middleware::{ApiResult, AppState};
use crate::api::pagination::{default_page, default_per_page, PageQuery, PaginationMetadata};
use crate::api::users::SuccessResponse;
use crate::models::CreateProviderRequest;

#[derive(Debug, Deserialize)]
pub struct ListProvidersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct ProviderListResponse {
    pub providers: Vec<ProviderView>,
    pub pagination: PaginationMetadata,
}

pub async fn create_provider(
    State(state): State<AppState>,
    Json(request): Json<CreateProviderRequest>,
) -> ApiResult<impl IntoResponse> {
    let provider = state.providers.create_provider(request).await?;

    Ok((StatusCode::CREATED, Json(assemble_provider(provider))))
}

pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let provider = state.providers.get_provider(&id).await?;

    Ok(Json(assemble_provider(provider)))
}

/// Paginated provider listing; page numbering starts at 1.
pub async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<ListProvidersQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageQuery::new(query.page, query.per_page);
    page.validate()?;

    let (providers, total) = state
        .providers
        .list_providers(page.limit(), page.offset())
        .await?;

    Ok(Json(ProviderListResponse {
        providers: providers.into_iter().map(assemble_provider).collect(),
        pagination: PaginationMetadata::new(page, total),
    }))
}

pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.providers.delete_provider(&id).await?;

    Ok(Json(SuccessResponse {
        message: "Provider deleted".to_string(),
    }))
}
