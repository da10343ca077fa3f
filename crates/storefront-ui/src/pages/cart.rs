use leptos::prelude::*;
use storefront_types::{Cart, CartLine};

use crate::components::cart_context::get_cart;
use crate::components::price::Price;

#[component]
pub fn CartPage() -> impl IntoView {
    let cart = Resource::new(|| (), |_| get_cart());

    view! {
        <div class="page-header">
            <h1>"Cart"</h1>
        </div>
        <Suspense fallback=move || view! { <div class="loading">"Loading cart..."</div> }>
            {move || {
                cart.get()
                    .map(|result| match result {
                        Ok(c) if c.lines.is_empty() => {
                            view! {
                                <p>"Your cart is empty."</p>
                                <a href="/">"Continue shopping"</a>
                            }
                                .into_any()
                        }
                        Ok(c) => view! { <CartView cart=c /> }.into_any(),
                        Err(e) => {
                            view! { <p class="error">"Failed to load cart: " {e.to_string()}</p> }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn CartView(cart: Cart) -> impl IntoView {
    let subtotal = cart.subtotal();
    let quantity = cart.total_quantity();

    view! {
        <div class="cart">
            <p class="cart-summary">{format!("{quantity} item(s)")}</p>
            <table class="cart-lines">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Price"</th>
                        <th>"Qty"</th>
                        <th>"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {cart.lines.into_iter().map(|line| view! { <CartLineRow line=line /> }).collect_view()}
                </tbody>
            </table>
            {subtotal
                .map(|data| {
                    view! {
                        <div class="cart-subtotal">
                            <span>"Subtotal"</span>
                            <Price data=data />
                        </div>
                    }
                })}
        </div>
    }
}

#[component]
fn CartLineRow(line: CartLine) -> impl IntoView {
    let lineTotal = line.line_total();
    let href = format!("/products/{}", line.product_handle);

    view! {
        <tr>
            <td>
                <a href=href>{line.product_title}</a>
                <div class="cart-variant">{line.variant_title}</div>
            </td>
            <td>
                <Price data=line.price />
            </td>
            <td>{line.quantity}</td>
            <td>
                <Price data=lineTotal />
            </td>
        </tr>
    }
}
