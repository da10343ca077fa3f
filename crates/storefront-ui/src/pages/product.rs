use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use storefront_types::Product;

use crate::components::product_card::{ImageLoading, ProductCard};

#[server]
pub async fn get_product(handle: String) -> Result<Option<Product>, ServerFnError> {
    use storefront_api::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("storefront state unavailable"))?;
    Ok(state.catalog.by_handle(&handle).cloned())
}

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let handle = move || params.read().get("handle").unwrap_or_default();
    let product = Resource::new(handle, get_product);

    view! {
        <Suspense fallback=move || view! { <div class="loading">"Loading product..."</div> }>
            {move || {
                product
                    .get()
                    .map(|result| match result {
                        Ok(Some(p)) => {
                            let vendor = p.vendor.clone();
                            view! {
                                <div class="product-page">
                                    <p class="product-vendor">{vendor}</p>
                                    <ProductCard product=Some(p) loading=ImageLoading::Eager />
                                </div>
                            }
                                .into_any()
                        }
                        Ok(None) => {
                            view! {
                                <p>"Product not found"</p>
                                <a href="/">"Back to products"</a>
                            }
                                .into_any()
                        }
                        Err(e) => {
                            view! {
                                <p class="error">"Failed to load product: " {e.to_string()}</p>
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}
