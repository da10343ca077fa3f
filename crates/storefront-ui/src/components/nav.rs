use leptos::prelude::*;

use crate::components::cart_context::CartContext;

#[component]
pub fn Nav() -> impl IntoView {
    let cartCtx = use_context::<CartContext>();
    let cartQuantity = move || cartCtx.map(|ctx| ctx.quantity()).unwrap_or_default();

    view! {
        <header class="site-header">
            <a href="/" class="brand">
                <span class="brand-icon">"\u{25C6}"</span>
                <span class="brand-text">"Storefront"</span>
            </a>
            <nav class="site-nav">
                <a href="/" class="nav-link">"Shop"</a>
                <a href="/cart" class="nav-link nav-cart">
                    "Cart"
                    <span class="cart-count">{cartQuantity}</span>
                </a>
            </nav>
        </header>
    }
}
