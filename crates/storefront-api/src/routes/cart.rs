use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use storefront_providers::CartError;
use storefront_types::{AddToCartRequest, Cart};

use super::{api_error, ApiError};
use crate::middleware::session::CartSession;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/cart", get(get_cart))
        .route("/api/v1/cart/lines", post(post_cart_lines))
}

async fn get_cart(
    State(state): State<AppState>,
    Extension(session): Extension<CartSession>,
) -> Json<Cart> {
    Json(state.carts.get(&session.0).await)
}

async fn post_cart_lines(
    State(state): State<AppState>,
    Extension(session): Extension<CartSession>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<Cart>, ApiError> {
    state
        .carts
        .add_lines(&session.0, &request, &state.catalog)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!(cart_id = %session.0, "add to cart rejected: {e}");
            api_error(cart_error_status(&e), e.to_string())
        })
}

pub fn cart_error_status(error: &CartError) -> StatusCode {
    match error {
        CartError::UnknownMerchandise(_) => StatusCode::NOT_FOUND,
        CartError::EmptyRequest
        | CartError::InvalidQuantity { .. }
        | CartError::CurrencyMismatch { .. } => StatusCode::BAD_REQUEST,
    }
}
