use leptos::prelude::*;
use storefront_types::Product;

use crate::components::product_card::{ImageLoading, ProductCard};

#[server]
pub async fn get_products() -> Result<Vec<Product>, ServerFnError> {
    use storefront_api::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("storefront state unavailable"))?;
    Ok(state.catalog.products().to_vec())
}

/// Above-the-fold cards load eagerly.
const EAGER_CARDS: usize = 4;

#[component]
pub fn CollectionPage() -> impl IntoView {
    let products = Resource::new(|| (), |_| get_products());

    view! {
        <div class="page-header">
            <h1>"All Products"</h1>
        </div>
        <Suspense fallback=move || {
            view! {
                <div class="loading">
                    <div class="spinner"></div>
                    "Loading products..."
                </div>
            }
        }>
            {move || {
                products
                    .get()
                    .map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <p class="empty">"No products yet."</p> }.into_any()
                        }
                        Ok(list) => view! { <ProductGrid products=list /> }.into_any(),
                        Err(e) => {
                            view! {
                                <div class="card">
                                    <p class="error">"Failed to load products: " {e.to_string()}</p>
                                </div>
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn ProductGrid(products: Vec<Product>) -> impl IntoView {
    view! {
        <div class="product-grid">
            {products
                .into_iter()
                .enumerate()
                .map(|(idx, product)| {
                    let loading = if idx < EAGER_CARDS {
                        ImageLoading::Eager
                    } else {
                        ImageLoading::Lazy
                    };
                    view! { <ProductCard product=Some(product) loading=loading /> }
                })
                .collect_view()}
        </div>
    }
}
