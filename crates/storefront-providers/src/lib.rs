#![allow(non_snake_case)]

pub mod cart;
pub mod catalog;
pub mod error;

pub use cart::{CartStore, DEFAULT_CART_IDLE, DEFAULT_MAX_CARTS};
pub use catalog::Catalog;
pub use error::{CartError, CatalogError};
