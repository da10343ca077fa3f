#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use storefront_providers::{CartStore, Catalog};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub carts: CartStore,
}

/// JSON API under `/api/v1`. Cart routes expect [`middleware::session::ensure_cart_session`]
/// to be layered around the final router.
pub fn api_router(state: AppState) -> Router {
    routes::api_routes().with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use storefront_providers::catalog;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::session::{ensure_cart_session, CART_COOKIE};

    fn app() -> Router {
        let state = AppState {
            catalog: Arc::new(catalog::sample()),
            carts: CartStore::new(),
        };
        api_router(state).layer(axum::middleware::from_fn(ensure_cart_session))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    fn add_request(cookie: &str, merchandiseId: &str, quantity: u32) -> Request<Body> {
        let body = serde_json::json!({
            "lines": [{ "merchandiseId": merchandiseId, "quantity": quantity }],
            "analytics": null
        });
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cart/lines")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn lists_products() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/products")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let products = json.as_array().expect("product array");
        assert_eq!(products.len(), 3);
        assert_eq!(products[0]["handle"], "everyday-crew-tee");
    }

    #[tokio::test]
    async fn unknown_handle_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/products/nope")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap_or_default().contains("nope"));
    }

    #[tokio::test]
    async fn new_visitor_gets_cart_cookie() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let setCookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(setCookie.starts_with(&format!("{CART_COOKIE}=")));

        let json = body_json(response).await;
        assert_eq!(json["lines"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn added_lines_are_visible_in_cart() {
        let app = app();
        let cookie = format!("{CART_COOKIE}=test-cart");

        let response = app
            .clone()
            .oneshot(add_request(&cookie, "gid://shopify/ProductVariant/70012", 2))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/cart")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let json = body_json(response).await;
        assert_eq!(json["id"], "test-cart");
        assert_eq!(json["lines"][0]["merchandiseId"], "gid://shopify/ProductVariant/70012");
        assert_eq!(json["lines"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn unknown_merchandise_is_not_found() {
        let response = app()
            .oneshot(add_request("cart_id=c1", "gid://shopify/ProductVariant/404", 1))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn zero_quantity_is_bad_request() {
        let response = app()
            .oneshot(add_request("cart_id=c1", "gid://shopify/ProductVariant/70012", 0))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
