pub mod cart;
pub mod collection;
pub mod product;
