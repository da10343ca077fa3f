use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use storefront_types::{AddToCartRequest, Cart};

use crate::components::cart_context::CartContext;

#[server(input = Json)]
pub async fn add_to_cart(request: AddToCartRequest) -> Result<Cart, ServerFnError> {
    use axum::Extension;
    use storefront_api::{middleware::session::CartSession, AppState};

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("storefront state unavailable"))?;
    let Extension(session) = leptos_axum::extract::<Extension<CartSession>>().await?;

    state
        .carts
        .add_lines(&session.0, &request, &state.catalog)
        .await
        .map_err(|e| {
            tracing::warn!(cart_id = %session.0, "add to cart rejected: {e}");
            ServerFnError::new(e.to_string())
        })
}

/// Sends `request` to the cart when clicked and reports the outcome below the button.
#[component]
pub fn AddToCartButton(
    #[prop(into)] request: Signal<AddToCartRequest>,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let addAction = ServerAction::<AddToCart>::new();
    let pending = addAction.pending();
    let result = addAction.value();
    let cartCtx = use_context::<CartContext>();

    Effect::new(move |_| {
        if let (Some(Ok(cart)), Some(ctx)) = (result.get(), cartCtx) {
            ctx.sync(&cart);
        }
    });

    let buttonClass = match class {
        Some(extra) => format!("btn btn-secondary {extra}"),
        None => "btn btn-secondary".to_string(),
    };

    view! {
        <button
            type="button"
            class=buttonClass
            disabled=move || pending.get()
            on:click=move |_| {
                addAction.dispatch(AddToCart {
                    request: request.get_untracked(),
                });
            }
        >
            {children()}
        </button>
        {move || {
            result
                .get()
                .map(|outcome| match outcome {
                    Ok(_) => view! { <p class="cart-status cart-status-ok">"Added to cart"</p> }.into_any(),
                    Err(e) => {
                        view! {
                            <p class="cart-status cart-status-error">
                                "Could not add to cart: " {e.to_string()}
                            </p>
                        }
                            .into_any()
                    }
                })
        }}
    }
}
