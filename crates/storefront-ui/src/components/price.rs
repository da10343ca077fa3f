use leptos::prelude::*;
use storefront_types::Money;

/// Formatted amount with its currency symbol.
#[component]
pub fn Price(
    data: Money,
    /// Render `$20` instead of `$20.00`
    #[prop(optional)]
    without_trailing_zeros: bool,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let text = if without_trailing_zeros {
        data.without_trailing_zeros()
    } else {
        data.to_string()
    };

    view! { <span class=class.unwrap_or_else(|| "price".into())>{text}</span> }
}
