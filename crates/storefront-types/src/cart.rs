use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Quantity used by the product card's add-to-cart trigger.
pub const CARD_ADD_QUANTITY: u32 = 1;

/// Upper bound on the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 9999;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalytics {
    pub product_gid: String,
    pub variant_gid: String,
    pub name: String,
    pub variant_name: String,
    pub brand: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartAnalytics {
    pub products: Vec<ProductAnalytics>,
    pub total_value: Decimal,
}

/// Body of an add-to-cart mutation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AddToCartRequest {
    pub lines: Vec<CartLineInput>,
    #[serde(default)]
    pub analytics: Option<CartAnalytics>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub merchandise_id: String,
    pub product_handle: String,
    pub product_title: String,
    pub variant_title: String,
    pub quantity: u32,
    pub price: Money,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: Vec::new(),
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.lines.first().map(|l| l.price.currency_code.as_str())
    }

    /// Sum of line totals; `None` for an empty cart.
    pub fn subtotal(&self) -> Option<Money> {
        let currency = self.currency_code()?;
        let amount = self.lines.iter().map(|l| l.line_total().amount).sum();
        Some(Money::new(amount, currency))
    }

    pub fn line_mut(&mut self, merchandiseId: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.merchandise_id == merchandiseId)
    }
}
