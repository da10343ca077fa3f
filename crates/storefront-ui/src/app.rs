use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::cart_context::CartProvider;
use crate::components::nav::Nav;
use crate::pages::cart::CartPage;
use crate::pages::collection::CollectionPage;
use crate::pages::product::ProductPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css" />
        <Title text="Storefront" />
        <CartProvider>
            <Router>
                <Nav />
                <main class="main-content">
                    <Routes fallback=NotFound>
                        <Route path=StaticSegment("") view=CollectionPage />
                        <Route
                            path=(StaticSegment("products"), ParamSegment("handle"))
                            view=ProductPage
                        />
                        <Route path=StaticSegment("cart") view=CartPage />
                    </Routes>
                </main>
            </Router>
        </CartProvider>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <a href="/">"Back to the shop"</a>
        </div>
    }
}
