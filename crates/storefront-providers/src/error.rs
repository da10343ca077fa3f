use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("no cart lines supplied")]
    EmptyRequest,

    #[error("quantity {quantity} for {merchandise_id} is outside 1..={max}")]
    InvalidQuantity {
        merchandise_id: String,
        quantity: u32,
        max: u32,
    },

    #[error("unknown merchandise {0}")]
    UnknownMerchandise(String),

    #[error("cart is priced in {cart_currency}, {merchandise_id} is priced in {line_currency}")]
    CurrencyMismatch {
        merchandise_id: String,
        cart_currency: String,
        line_currency: String,
    },
}
