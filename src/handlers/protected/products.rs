// handlers/protected/products.rs - /dashboard/product-list, /dashboard/product-add

use axum::{
    extract::{Path, Query},
    response::Json,
};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, RequestSession};
use crate::models::{Product, ProductDraft, ProductQuery};
use crate::services::ProductService;

fn service(session: &RequestSession) -> ProductService {
    ProductService::new(session.client().clone())
}

/// GET /dashboard/product-list?search=&page=&limit=&all=
pub async fn product_list(
    session: RequestSession,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Value> {
    let page = service(&session).list(&query).await?;

    Ok(ApiResponse::success(json!({
        "showing": page.products.len(),
        "total": page.total,
        "has_more": page.has_more(&query),
        "page": query.page,
        "products": page.products,
    })))
}

/// GET /dashboard/product-list/:id
pub async fn product_get(session: RequestSession, Path(id): Path<String>) -> ApiResult<Product> {
    let product = service(&session).get(&id).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /dashboard/product-list/:id
pub async fn product_delete(session: RequestSession, Path(id): Path<String>) -> ApiResult<Value> {
    let message = service(&session).delete(&id).await?;
    Ok(ApiResponse::success(json!({ "id": id })).with_message(message))
}

/// POST /dashboard/product-add
pub async fn product_add(
    session: RequestSession,
    Json(draft): Json<ProductDraft>,
) -> ApiResult<Value> {
    let message = service(&session).add(draft).await?;
    Ok(ApiResponse::created(json!({})).with_message(message))
}
