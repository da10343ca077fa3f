use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

pub const SIZE_OPTION: &str = "Size";
pub const COLOR_OPTION: &str = "Color";

/// Widths offered in an image `srcset`.
pub const IMAGE_WIDTHS: &[u32] = &[352, 832, 1200];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    pub handle: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub variants: Option<Connection<Variant>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// GraphQL-style list wrapper. Catalog sources send either `nodes` or `edges`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    pub fn from_nodes(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// All items in order, preferring `nodes` over `edges`.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        if self.nodes.is_empty() {
            Box::new(self.edges.iter().map(|edge| &edge.node))
        } else {
            Box::new(self.nodes.iter())
        }
    }

    pub fn flatten(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl Product {
    pub fn path(&self) -> String {
        format!("/products/{}", self.handle)
    }

    pub fn all_variants(&self) -> Vec<Variant> {
        self.variants
            .as_ref()
            .map(Connection::flatten)
            .unwrap_or_default()
    }

    /// Stand-in product shown while real catalog data is unavailable.
    pub fn placeholder() -> Product {
        Product {
            id: "gid://shopify/Product/placeholder".into(),
            title: "The Full Stack".into(),
            vendor: "Snowdevil".into(),
            handle: "snowboard".into(),
            published_at: DateTime::parse_from_rfc3339("2021-06-17T18:33:17Z")
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            variants: Some(Connection::from_nodes(vec![Variant {
                id: "gid://shopify/ProductVariant/placeholder".into(),
                title: "154cm / Reactive Blue".into(),
                price: Money::new(Decimal::new(7750, 1), "CAD"),
                compare_at_price: Some(Money::new(Decimal::new(8400, 1), "CAD")),
                image: Some(Image {
                    url: "https://cdn.shopify.com/s/files/1/0551/4566/0472/products/Main.jpg"
                        .into(),
                    alt_text: Some("The Full Stack snowboard".into()),
                    width: Some(1200),
                    height: Some(1500),
                }),
                selected_options: vec![
                    SelectedOption {
                        name: SIZE_OPTION.into(),
                        value: "154cm".into(),
                    },
                    SelectedOption {
                        name: COLOR_OPTION.into(),
                        value: "Reactive Blue".into(),
                    },
                ],
            }])),
        }
    }
}

impl Variant {
    pub fn option(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }
}

impl Image {
    pub fn sized_url(&self, width: u32) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}width={width}", self.url)
    }

    pub fn srcset(&self) -> String {
        IMAGE_WIDTHS
            .iter()
            .filter(|w| self.width.map_or(true, |max| **w <= max))
            .map(|w| format!("{} {w}w", self.sized_url(*w)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// True when a compare-at price exists and is above the current price.
pub fn is_discounted(price: &Money, compareAtPrice: Option<&Money>) -> bool {
    compareAtPrice.is_some_and(|compare| {
        compare.currency_code == price.currency_code && compare.amount > price.amount
    })
}

/// True when `publishedAt` falls within the last `days` days.
pub fn is_new_arrival(publishedAt: Option<DateTime<Utc>>, now: DateTime<Utc>, days: i64) -> bool {
    publishedAt.is_some_and(|published| published > now - Duration::days(days))
}
