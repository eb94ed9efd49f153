//! Domain models for MarketCart.
//!
//! ## Submodules
//!
//! - [`entry`] - Line item types (`ProductInput`, `CartEntry`)
//! - [`cart`] - The cart itself (`CartState`)

mod cart;
mod entry;

pub use cart::CartState;
pub use entry::{CartEntry, ProductInput};
#[cfg(test)]
mod serde_tests;
