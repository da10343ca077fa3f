use chrono::Utc;
use leptos::prelude::*;
use storefront_types::{
    is_discounted, CardModel, Money, Product, Variant, COLOR_OPTION, SIZE_OPTION,
};

use crate::components::add_to_cart::AddToCartButton;
use crate::components::price::Price;

const CARD_IMAGE_SIZES: &str = "(min-width: 64em) 25vw, (min-width: 48em) 30vw, 45vw";

/// Browser loading hint for the card image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageLoading {
    Eager,
    #[default]
    Lazy,
}

impl ImageLoading {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageLoading::Eager => "eager",
            ImageLoading::Lazy => "lazy",
        }
    }
}

/// Product tile with image, label, price, size/color pickers and an add-to-cart button.
///
/// Renders nothing when the product (or the placeholder substituted for a
/// missing one) has no variants.
#[component]
pub fn ProductCard(
    product: Option<Product>,
    /// Overrides the derived "Sale"/"New" label
    #[prop(optional, into)]
    label: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    #[prop(optional)] loading: ImageLoading,
    /// Runs when the card link is clicked
    #[prop(optional, into)]
    on_click: Option<Callback<()>>,
    /// Accepted for API parity; the card always shows its pickers
    #[prop(optional)]
    #[allow(unused_variables)]
    quick_add: bool,
) -> impl IntoView {
    let Some(model) = CardModel::new(product) else {
        return ().into_any();
    };

    let productTitle = model.product().title.clone();
    let href = model.href();
    let sizeGroup = radio_group("size", &model.product().handle);
    let colorGroup = radio_group("color", &model.product().handle);
    let sizes = model.sizes().to_vec();
    let colors = model.colors().to_vec();

    let (selected, setSelected) = signal(model.default_variant().clone());
    let card = StoredValue::new(model);

    // no variant carries the value: keep the current selection
    let changeSize = move |size: String| {
        let next = card.with_value(|c| {
            selected.with_untracked(|current| c.select_size(current, &size).cloned())
        });
        if let Some(variant) = next {
            setSelected.set(variant);
        }
    };

    let changeColor = move |color: String| {
        let next = card.with_value(|c| {
            selected.with_untracked(|current| c.select_color(current, &color).cloned())
        });
        if let Some(variant) = next {
            setSelected.set(variant);
        }
    };

    let cardLabel = move || {
        card.with_value(|c| selected.with(|v| c.label(label.as_deref(), v, Utc::now())))
            .map(|l| l.to_string())
            .unwrap_or_default()
    };

    let cartRequest =
        Signal::derive(move || card.with_value(|c| selected.with(|v| c.add_to_cart_request(v))));

    view! {
        <div class="product-card">
            <a
                href=href
                class="product-card-link"
                on:click=move |_| {
                    if let Some(callback) = on_click {
                        callback.run(());
                    }
                }
            >
                <div class=card_class(class.as_deref())>
                    <div class="card-image">
                        {move || {
                            selected
                                .with(|v| v.image.clone())
                                .map(|image| {
                                    let alt = card.with_value(|c| c.image_alt(&image));
                                    view! {
                                        <img
                                            class="card-img fade-in"
                                            src=image.url.clone()
                                            srcset=image.srcset()
                                            sizes=CARD_IMAGE_SIZES
                                            alt=alt
                                            width=image.width.map(|w| w.to_string())
                                            height=image.height.map(|h| h.to_string())
                                            loading=loading.as_str()
                                        />
                                    }
                                })
                        }}
                        <label class="card-label">{cardLabel}</label>
                    </div>
                    <div class="card-info">
                        <h3 class="card-title">{productTitle}</h3>
                        <div class="card-price">
                            {move || {
                                let variant = selected.get();
                                let compareAt = variant
                                    .compare_at_price
                                    .clone()
                                    .filter(|c| is_discounted(&variant.price, Some(c)));
                                view! {
                                    <Price data=variant.price without_trailing_zeros=true />
                                    {compareAt
                                        .map(|data| {
                                            view! { <CompareAtPrice data=data class="opacity-50" /> }
                                        })}
                                }
                            }}
                        </div>
                    </div>
                </div>
            </a>
            <div class="variant-pickers">
                <fieldset class="variant-group">
                    <legend class="variant-legend">"Size:"</legend>
                    {sizes
                        .into_iter()
                        .enumerate()
                        .map(|(index, size)| {
                            view! {
                                <OptionRadio
                                    group=sizeGroup.clone()
                                    index=index
                                    option=SIZE_OPTION
                                    value=size
                                    selected=selected
                                    on_select=changeSize
                                />
                            }
                        })
                        .collect_view()}
                </fieldset>
                <fieldset class="variant-group">
                    <legend class="variant-legend">"Color:"</legend>
                    {colors
                        .into_iter()
                        .enumerate()
                        .map(|(index, color)| {
                            view! {
                                <OptionRadio
                                    group=colorGroup.clone()
                                    index=index
                                    option=COLOR_OPTION
                                    value=color
                                    selected=selected
                                    on_select=changeColor
                                />
                            }
                        })
                        .collect_view()}
                </fieldset>
            </div>
            <AddToCartButton request=cartRequest class="card-add">
                <span class="btn-label">"Add to Cart"</span>
            </AddToCartButton>
        </div>
    }
    .into_any()
}

/// Original price, struck through.
#[component]
pub fn CompareAtPrice(data: Money, #[prop(optional, into)] class: Option<String>) -> impl IntoView {
    let text = data.without_trailing_zeros();

    view! { <span class=strike_class(class.as_deref())>{text}</span> }
}

#[component]
fn OptionRadio<F>(
    group: String,
    index: usize,
    option: &'static str,
    value: String,
    selected: ReadSignal<Variant>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(String) + Clone + Send + Sync + 'static,
{
    let inputId = radio_id(&group, index);
    let checkedValue = value.clone();
    let selectValue = value.clone();
    let isChecked = move || selected.with(|v| CardModel::is_checked(v, option, &checkedValue));

    view! {
        <div class="variant-option">
            <input
                type="radio"
                id=inputId.clone()
                name=group
                value=value.clone()
                checked=isChecked.clone()
                prop:checked=isChecked
                on:change=move |_| on_select(selectValue.clone())
            />
            <label for=inputId>{value}</label>
        </div>
    }
}

fn card_class(extra: Option<&str>) -> String {
    match extra.filter(|c| !c.is_empty()) {
        Some(extra) => format!("card-body {extra}"),
        None => "card-body".to_string(),
    }
}

fn strike_class(extra: Option<&str>) -> String {
    match extra.filter(|c| !c.is_empty()) {
        Some(extra) => format!("strike {extra}"),
        None => "strike".to_string(),
    }
}

/// Radio group name scoped to one product so several cards can share a page.
fn radio_group(option: &str, handle: &str) -> String {
    format!("{option}-{handle}")
}

/// Keyed by position among the distinct values, so any two values get distinct ids.
fn radio_id(group: &str, index: usize) -> String {
    format!("{group}-{index}")
}


#[cfg(all(test, feature = "ssr"))]
mod render_tests {
    use leptos::reactive::owner::Owner;
    use leptos::tachys::view::RenderHtml;
    use rust_decimal::Decimal;
    use storefront_types::{Connection, Image, SelectedOption};

    use super::*;

    fn usd(whole: i64) -> Money {
        Money::new(Decimal::new(whole, 0), "USD")
    }

    fn variant(id: &str, size: &str, color: &str, image: bool) -> Variant {
        Variant {
            id: format!("gid://shopify/ProductVariant/{id}"),
            title: format!("{size} / {color}"),
            price: usd(24),
            compare_at_price: Some(usd(32)),
            image: image.then(|| Image {
                url: format!("https://cdn.example.com/{id}.jpg"),
                alt_text: None,
                width: Some(1200),
                height: Some(1500),
            }),
            selected_options: vec![
                SelectedOption {
                    name: SIZE_OPTION.into(),
                    value: size.into(),
                },
                SelectedOption {
                    name: COLOR_OPTION.into(),
                    value: color.into(),
                },
            ],
        }
    }

    fn tee(variants: Vec<Variant>) -> Product {
        Product {
            id: "gid://shopify/Product/7001".into(),
            title: "Everyday Crew Tee".into(),
            vendor: "Northwind".into(),
            handle: "tee".into(),
            published_at: None,
            variants: Some(Connection::from_nodes(variants)),
        }
    }

    fn render(product: Product) -> String {
        Owner::new().with(|| view! { <ProductCard product=Some(product) /> }.to_html())
    }

    /// The `<input ...>` tag carrying `id`.
    fn input_tag<'a>(html: &'a str, id: &str) -> &'a str {
        let at = html
            .find(&format!("id=\"{id}\""))
            .unwrap_or_else(|| panic!("no element with id {id} in {html}"));
        let start = html[..at].rfind("<input").expect("input open");
        let end = at + html[at..].find('>').expect("input close");
        &html[start..=end]
    }

    #[test]
    fn card_links_to_product_page() {
        let html = render(tee(vec![variant("1", "S", "Black", true)]));
        assert!(html.contains(r#"href="/products/tee""#));
        assert!(html.contains("Everyday Crew Tee"));
        assert!(html.contains("<img"));
        assert!(html.contains("Add to Cart"));
    }

    #[test]
    fn variant_without_image_still_renders_details() {
        let html = render(tee(vec![variant("1", "S", "Black", false)]));
        assert!(!html.contains("<img"));
        assert!(html.contains("Everyday Crew Tee"));
        assert!(html.contains("Sale"));
        assert!(html.contains("$24"));
        assert!(html.contains(r#"value="S""#));
        assert!(html.contains(r#"value="Black""#));
    }

    #[test]
    fn empty_variant_list_renders_nothing() {
        let html = render(tee(Vec::new()));
        assert!(!html.contains("product-card"));
        assert!(!html.contains("Everyday Crew Tee"));
    }

    #[test]
    fn first_variant_options_are_checked() {
        let html = render(tee(vec![
            variant("1", "S", "Black", true),
            variant("2", "M", "Black", true),
            variant("3", "S", "White", true),
        ]));

        assert!(input_tag(&html, "size-tee-0").contains("checked"));
        assert!(!input_tag(&html, "size-tee-1").contains("checked"));
        assert!(input_tag(&html, "color-tee-0").contains("checked"));
        assert!(!input_tag(&html, "color-tee-1").contains("checked"));
    }

    #[test]
    fn similar_option_values_get_distinct_inputs() {
        let html = render(tee(vec![
            variant("1", "X L", "红", true),
            variant("2", "X-L", "蓝", true),
        ]));

        assert!(input_tag(&html, "size-tee-0").contains(r#"value="X L""#));
        assert!(input_tag(&html, "size-tee-1").contains(r#"value="X-L""#));
        assert!(input_tag(&html, "color-tee-0").contains(r#"value="红""#));
        assert!(input_tag(&html, "color-tee-1").contains(r#"value="蓝""#));
    }

    #[test]
    fn compare_at_price_is_struck_through() {
        let html = Owner::new().with(|| {
            view! { <CompareAtPrice data=usd(32) class="opacity-50" /> }.to_html()
        });
        assert_eq!(html, r#"<span class="strike opacity-50">$32</span>"#);
    }
}
