pub mod cart;
pub mod products;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(cart::routes())
}
