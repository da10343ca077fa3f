use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use storefront_types::Product;

use super::{api_error, ApiError};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/:handle", get(get_product))
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

async fn get_product(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .by_handle(&handle)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no product with handle {handle}")))
}
