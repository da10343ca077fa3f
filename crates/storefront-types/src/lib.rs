#![allow(non_snake_case)]

pub mod card;
pub mod cart;
pub mod catalog;
pub mod money;

pub use card::*;
pub use cart::*;
pub use catalog::*;
pub use money::*;
