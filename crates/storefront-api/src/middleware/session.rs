use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const CART_COOKIE: &str = "cart_id";

/// Cart id for the current visitor, placed in request extensions.
#[derive(Clone, Debug, PartialEq)]
pub struct CartSession(pub String);

/// Middleware for every route: resolves the cart cookie, minting one when absent.
pub async fn ensure_cart_session(jar: CookieJar, mut request: Request<Body>, next: Next) -> Response {
    let existing = jar
        .get(CART_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    let (cartId, isNew) = match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    request
        .extensions_mut()
        .insert(CartSession(cartId.clone()));

    let response = next.run(request).await;

    if !isNew {
        return response;
    }

    tracing::debug!(cart_id = %cartId, "issued cart session");
    let cookie = Cookie::build((CART_COOKIE, cartId))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .permanent();
    (jar.add(cookie), response).into_response()
}
