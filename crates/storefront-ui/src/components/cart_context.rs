use leptos::prelude::*;
use storefront_types::Cart;

#[server]
pub async fn get_cart() -> Result<Cart, ServerFnError> {
    use axum::Extension;
    use storefront_api::{middleware::session::CartSession, AppState};

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("storefront state unavailable"))?;
    let Extension(session) = leptos_axum::extract::<Extension<CartSession>>().await?;
    Ok(state.carts.get(&session.0).await)
}

/// Item count shown in the header, shared by every add-to-cart button.
#[derive(Clone, Copy)]
pub struct CartContext {
    quantity: ReadSignal<u32>,
    set_quantity: WriteSignal<u32>,
}

impl CartContext {
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn sync(&self, cart: &Cart) {
        self.set_quantity.set(cart.total_quantity());
    }
}

/// Provides [`CartContext`]. Place this once near the root of the app.
#[component]
pub fn CartProvider(children: Children) -> impl IntoView {
    let (quantity, setQuantity) = signal(0u32);

    let ctx = CartContext {
        quantity,
        set_quantity: setQuantity,
    };

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            if let Ok(cart) = get_cart().await {
                ctx.sync(&cart);
            }
        });
    }

    provide_context(ctx);

    children()
}
