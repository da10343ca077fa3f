//! Selection and labeling state behind a product card.
//!
//! A [`CardModel`] is built once per rendered card from whatever product data
//! the page loader produced. It owns the flattened variant list and the
//! distinct Size/Color values the pickers render, and answers the questions
//! the card asks on every render: which variant a picker change selects,
//! which label to show, and what to send when the shopper adds to cart.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::cart::{
    AddToCartRequest, CartAnalytics, CartLineInput, ProductAnalytics, CARD_ADD_QUANTITY,
};
use crate::catalog::{
    is_discounted, is_new_arrival, Image, Product, Variant, COLOR_OPTION, SIZE_OPTION,
};

/// Products published within this many days are labeled "New".
pub const NEW_ARRIVAL_DAYS: i64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardLabel {
    Custom(String),
    Sale,
    New,
}

impl fmt::Display for CardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardLabel::Custom(text) => f.write_str(text),
            CardLabel::Sale => f.write_str("Sale"),
            CardLabel::New => f.write_str("New"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardModel {
    product: Product,
    variants: Vec<Variant>,
    sizes: Vec<String>,
    colors: Vec<String>,
}

impl CardModel {
    /// Returns `None` when there is nothing to render.
    ///
    /// A missing product, or one without a variant connection, is replaced by
    /// [`Product::placeholder`] first.
    pub fn new(product: Option<Product>) -> Option<Self> {
        let product = match product {
            Some(p) if p.variants.is_some() => p,
            _ => Product::placeholder(),
        };

        let variants = product.all_variants();
        if variants.is_empty() {
            return None;
        }

        let sizes = distinct_option_values(&variants, SIZE_OPTION);
        let colors = distinct_option_values(&variants, COLOR_OPTION);

        Some(Self {
            product,
            variants,
            sizes,
            colors,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn default_variant(&self) -> &Variant {
        // non-empty, checked in new()
        &self.variants[0]
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn href(&self) -> String {
        self.product.path()
    }

    pub fn select_size(&self, current: &Variant, size: &str) -> Option<&Variant> {
        self.select_option(current, SIZE_OPTION, size)
    }

    pub fn select_color(&self, current: &Variant, color: &str) -> Option<&Variant> {
        self.select_option(current, COLOR_OPTION, color)
    }

    /// Variant carrying `value` for option `name`.
    ///
    /// Prefers one that keeps every other option of `current`, then the first
    /// variant with that value. `None` only if no variant has the value.
    fn select_option(&self, current: &Variant, name: &str, value: &str) -> Option<&Variant> {
        let hasValue = |v: &&Variant| v.option(name) == Some(value);
        let keepsOthers = |v: &&Variant| {
            current
                .selected_options
                .iter()
                .filter(|o| o.name != name)
                .all(|o| v.option(&o.name) == Some(o.value.as_str()))
        };

        self.variants
            .iter()
            .filter(hasValue)
            .find(keepsOthers)
            .or_else(|| self.variants.iter().find(hasValue))
    }

    pub fn is_checked(selected: &Variant, name: &str, value: &str) -> bool {
        selected.option(name) == Some(value)
    }

    /// Explicit label wins, then "Sale", then "New".
    pub fn label(
        &self,
        explicit: Option<&str>,
        selected: &Variant,
        now: DateTime<Utc>,
    ) -> Option<CardLabel> {
        if let Some(text) = explicit.filter(|t| !t.is_empty()) {
            return Some(CardLabel::Custom(text.to_string()));
        }
        if is_discounted(&selected.price, selected.compare_at_price.as_ref()) {
            return Some(CardLabel::Sale);
        }
        if is_new_arrival(self.product.published_at, now, NEW_ARRIVAL_DAYS) {
            return Some(CardLabel::New);
        }
        None
    }

    pub fn image_alt(&self, image: &Image) -> String {
        image
            .alt_text
            .clone()
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| format!("Picture of {}", self.product.title))
    }

    pub fn analytics(&self, selected: &Variant) -> ProductAnalytics {
        ProductAnalytics {
            product_gid: self.product.id.clone(),
            variant_gid: selected.id.clone(),
            name: self.product.title.clone(),
            variant_name: selected.title.clone(),
            brand: self.product.vendor.clone(),
            price: selected.price.amount,
            quantity: CARD_ADD_QUANTITY,
        }
    }

    /// One line for the selected variant plus its analytics payload.
    pub fn add_to_cart_request(&self, selected: &Variant) -> AddToCartRequest {
        let analytics = self.analytics(selected);
        let totalValue = analytics.price;
        AddToCartRequest {
            lines: vec![CartLineInput {
                merchandise_id: selected.id.clone(),
                quantity: CARD_ADD_QUANTITY,
            }],
            analytics: Some(CartAnalytics {
                products: vec![analytics],
                total_value: totalValue,
            }),
        }
    }
}

/// Distinct values of option `name`, in first-seen order.
pub fn distinct_option_values(variants: &[Variant], name: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for variant in variants {
        for option in variant.selected_options.iter().filter(|o| o.name == name) {
            if !values.contains(&option.value) {
                values.push(option.value.clone());
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::{Connection, SelectedOption};
    use crate::money::Money;

    fn variant(id: &str, size: &str, color: &str) -> Variant {
        Variant {
            id: id.into(),
            title: format!("{size} / {color}"),
            price: Money::new(Decimal::new(2000, 2), "USD"),
            compare_at_price: None,
            image: None,
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

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: "gid://shopify/Product/1".into(),
            title: "Crew Tee".into(),
            vendor: "Acme".into(),
            handle: "crew-tee".into(),
            published_at: None,
            variants: Some(Connection::from_nodes(variants)),
        }
    }

    fn model(variants: Vec<Variant>) -> CardModel {
        CardModel::new(Some(product(variants))).unwrap()
    }

    #[test]
    fn empty_variant_list_renders_nothing() {
        assert!(CardModel::new(Some(product(Vec::new()))).is_none());
    }

    #[test]
    fn missing_product_uses_placeholder() {
        let card = CardModel::new(None).unwrap();
        assert_eq!(card.product(), &Product::placeholder());
    }

    #[test]
    fn product_without_variant_connection_uses_placeholder() {
        let mut p = product(Vec::new());
        p.variants = None;
        let card = CardModel::new(Some(p)).unwrap();
        assert_eq!(card.product().handle, "snowboard");
    }

    #[test]
    fn first_variant_is_default() {
        let card = model(vec![variant("a", "S", "Red"), variant("b", "M", "Red")]);
        assert_eq!(card.default_variant().id, "a");
        assert_eq!(card.href(), "/products/crew-tee");
    }

    #[test]
    fn size_change_selects_matching_variant() {
        let card = model(vec![variant("a", "S", "Red"), variant("b", "M", "Red")]);
        assert_eq!(card.sizes(), ["S", "M"]);
        assert_eq!(card.colors(), ["Red"]);

        let selected = card.select_size(card.default_variant(), "M").unwrap();
        assert_eq!(selected.id, "b");
        assert!(CardModel::is_checked(selected, SIZE_OPTION, "M"));
        assert!(!CardModel::is_checked(selected, SIZE_OPTION, "S"));
    }

    #[test]
    fn size_change_keeps_current_color_when_possible() {
        let card = model(vec![
            variant("a", "S", "Red"),
            variant("b", "M", "Red"),
            variant("c", "S", "Blue"),
            variant("d", "M", "Blue"),
        ]);
        let blueSmall = &card.variants()[2];
        assert_eq!(card.select_size(blueSmall, "M").unwrap().id, "d");
    }

    #[test]
    fn size_change_falls_back_to_first_with_size() {
        let card = model(vec![variant("a", "S", "Red"), variant("b", "M", "Blue")]);
        assert_eq!(card.select_size(card.default_variant(), "M").unwrap().id, "b");
    }

    #[test]
    fn color_change_selects_matching_variant() {
        let card = model(vec![
            variant("a", "S", "Red"),
            variant("b", "S", "Blue"),
            variant("c", "M", "Blue"),
        ]);
        assert_eq!(card.colors(), ["Red", "Blue"]);
        let selected = card.select_color(card.default_variant(), "Blue").unwrap();
        assert_eq!(selected.id, "b");
    }

    #[test]
    fn unknown_value_selects_nothing() {
        let card = model(vec![variant("a", "S", "Red")]);
        assert!(card.select_size(card.default_variant(), "XL").is_none());
        assert!(card.select_color(card.default_variant(), "Green").is_none());
    }

    #[test]
    fn option_lookup_is_by_name_not_position() {
        let mut swapped = variant("b", "M", "Red");
        swapped.selected_options.reverse();
        let card = model(vec![variant("a", "S", "Red"), swapped]);
        assert_eq!(card.sizes(), ["S", "M"]);
        assert_eq!(card.select_size(card.default_variant(), "M").unwrap().id, "b");
    }

    #[test]
    fn explicit_label_wins() {
        let card = model(vec![variant("a", "S", "Red")]);
        let label = card.label(Some("Limited"), card.default_variant(), Utc::now());
        assert_eq!(label, Some(CardLabel::Custom("Limited".into())));
    }

    #[test]
    fn empty_explicit_label_is_ignored() {
        let card = model(vec![variant("a", "S", "Red")]);
        assert_eq!(card.label(Some(""), card.default_variant(), Utc::now()), None);
    }

    #[test]
    fn discounted_variant_is_on_sale() {
        let mut onSale = variant("a", "S", "Red");
        onSale.compare_at_price = Some(Money::new(Decimal::new(2500, 2), "USD"));
        let mut p = product(vec![onSale]);
        p.published_at = Some(Utc::now());
        let card = CardModel::new(Some(p)).unwrap();
        let label = card.label(None, card.default_variant(), Utc::now());
        assert_eq!(label, Some(CardLabel::Sale));
        assert_eq!(label.unwrap().to_string(), "Sale");
    }

    #[test]
    fn recent_product_is_new() {
        let now = Utc::now();
        let mut p = product(vec![variant("a", "S", "Red")]);
        p.published_at = Some(now - Duration::days(2));
        let card = CardModel::new(Some(p)).unwrap();
        assert_eq!(card.label(None, card.default_variant(), now), Some(CardLabel::New));
    }

    #[test]
    fn old_full_price_product_has_no_label() {
        let now = Utc::now();
        let mut p = product(vec![variant("a", "S", "Red")]);
        p.published_at = Some(now - Duration::days(90));
        let card = CardModel::new(Some(p)).unwrap();
        assert_eq!(card.label(None, card.default_variant(), now), None);
    }

    #[test]
    fn image_alt_falls_back_to_title() {
        let card = model(vec![variant("a", "S", "Red")]);
        let image = Image {
            url: "https://cdn.example.com/tee.jpg".into(),
            alt_text: None,
            width: None,
            height: None,
        };
        assert_eq!(card.image_alt(&image), "Picture of Crew Tee");
    }

    #[test]
    fn add_to_cart_uses_selected_variant_and_quantity_one() {
        let card = model(vec![variant("a", "S", "Red"), variant("b", "M", "Red")]);
        let selected = card.select_size(card.default_variant(), "M").unwrap();
        let request = card.add_to_cart_request(selected);

        assert_eq!(request.lines.len(), 1);
        assert_eq!(request.lines[0].merchandise_id, "b");
        assert_eq!(request.lines[0].quantity, 1);

        let analytics = request.analytics.unwrap();
        assert_eq!(analytics.total_value, Decimal::new(2000, 2));
        let item = &analytics.products[0];
        assert_eq!(item.product_gid, "gid://shopify/Product/1");
        assert_eq!(item.variant_gid, "b");
        assert_eq!(item.variant_name, "M / Red");
        assert_eq!(item.brand, "Acme");
        assert_eq!(item.quantity, 1);
    }
}
