use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in a single currency, as delivered by the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Decimal,
    pub currency_code: String,
}

impl Money {
    pub fn new(amount: Decimal, currencyCode: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currencyCode.into(),
        }
    }

    pub fn zero(currencyCode: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currencyCode)
    }

    /// Shortest symbol for the currency, falling back to the ISO code.
    pub fn narrow_symbol(&self) -> &str {
        match self.currency_code.as_str() {
            "USD" | "CAD" | "AUD" | "NZD" | "MXN" | "SGD" | "HKD" => "$",
            "EUR" => "\u{20ac}",
            "GBP" => "\u{00a3}",
            "JPY" | "CNY" => "\u{00a5}",
            "INR" => "\u{20b9}",
            "KRW" => "\u{20a9}",
            other => other,
        }
    }

    pub fn fraction_digits(&self) -> u32 {
        match self.currency_code.as_str() {
            "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
            _ => 2,
        }
    }

    /// Amount with the currency's fraction digits, e.g. `19.90`.
    pub fn amount_display(&self) -> String {
        let digits = self.fraction_digits();
        format!("{:.*}", digits as usize, self.amount.round_dp(digits))
    }

    /// Amount without currency; whole amounts drop their fraction (`20.00` -> `20`).
    pub fn amount_without_trailing_zeros(&self) -> String {
        let rounded = self.amount.round_dp(self.fraction_digits());
        if rounded.fract().is_zero() {
            rounded.trunc().to_string()
        } else {
            self.amount_display()
        }
    }

    /// Symbol plus amount without trailing zeros, e.g. `$20` or `$19.90`.
    pub fn without_trailing_zeros(&self) -> String {
        format_signed(self.narrow_symbol(), &self.amount_without_trailing_zeros())
    }

    pub fn times(&self, quantity: u32) -> Money {
        Money::new(self.amount * Decimal::from(quantity), self.currency_code.clone())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_signed(self.narrow_symbol(), &self.amount_display()))
    }
}

// "-$5" reads better than "$-5"
fn format_signed(symbol: &str, amount: &str) -> String {
    match amount.strip_prefix('-') {
        Some(abs) => format!("-{symbol}{abs}"),
        None => format!("{symbol}{amount}"),
    }
}
