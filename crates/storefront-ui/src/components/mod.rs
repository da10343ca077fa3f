pub mod add_to_cart;
pub mod cart_context;
pub mod nav;
pub mod price;
pub mod product_card;
