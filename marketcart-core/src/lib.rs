// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `MarketCart` Core
//!
//! Core types, models, and traits for the `MarketCart` shopping cart.
//!
//! This crate provides the foundational pieces shared by the store and the
//! CLI:
//!
//! - Domain models (cart lines, the cart itself)
//! - Error types
//! - The storage collaborator trait
//!
//! ## Key Types
//!
//! - [`ProductInput`] - Product descriptor handed to `add_to_cart`
//! - [`CartEntry`] - One line item with a quantity
//! - [`CartState`] - Ordered, unique-by-id collection of lines
//! - [`CartStorage`] - Async key-value persistence contract

pub mod error;
pub mod models;
pub mod traits;

pub use error::CoreError;
pub use models::{CartEntry, CartState, ProductInput};
pub use traits::CartStorage;

/// Storage key the cart snapshot lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@Marketplace:products";
