use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::assembler::{assemble_customer, CustomerView};
use crate::api::middleware::{ApiResult, AppState};
use crate::api::pagination::{default_page, default_per_page, PageQuery, PaginationMetadata};
use crate::models::{CreateCustomerRequest, UpdateCustomerRequest};

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerView>,
    pub pagination: PaginationMetadata,
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> ApiResult<impl IntoResponse> {
    let customer = state.customers.create_customer(request).await?;

    Ok((StatusCode::CREATED, Json(assemble_customer(customer))))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let customer = state.customers.get_customer(&id).await?;

    Ok(Json(assemble_customer(customer)))
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageQuery::new(query.page, query.per_page);
    page.validate()?;

    let (customers, total) = state
        .customers
        .list_customers(page.limit(), page.offset())
        .await?;

    Ok(Json(CustomerListResponse {
        customers: customers.into_iter().map(assemble_customer).collect(),
        pagination: PaginationMetadata::new(page, total),
    }))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> ApiResult<impl IntoResponse> {
    let customer = state.customers.update_customer(&id, request).await?;

    Ok(Json(assemble_customer(customer)))
}
