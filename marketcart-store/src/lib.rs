// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # MarketCart Store
//!
//! Cart state management for the Marketplace app.
//!
//! This crate provides:
//!
//! - **CartStore**: The cart with watch-channel notifications and
//!   background persistence
//! - **CartProvider**: Scoped access to a shared store via [`use_cart`]
//! - **Storage**: In-memory and JSON-file [`CartStorage`] backends
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use marketcart_store::{CartStore, FileStorage, default_storage_path};
//! use marketcart_core::{ProductInput, DEFAULT_STORAGE_KEY};
//! use std::sync::Arc;
//!
//! // Restore the saved cart
//! let storage = Arc::new(FileStorage::new(default_storage_path()));
//! let cart = CartStore::load(storage, DEFAULT_STORAGE_KEY).await;
//!
//! // Mutate; the snapshot is written in the background
//! cart.add_to_cart(ProductInput::new("42", "Mug", "https://img/42.png", 12.5)).await?;
//!
//! // Subscribe to changes
//! let mut rx = cart.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("{} lines", rx.borrow().len());
//! }
//! ```
//!
//! [`CartStorage`]: marketcart_core::CartStorage

pub mod cart_store;
pub mod config;
pub mod context;
pub mod error;
pub mod persistence;
pub mod storage;

pub use cart_store::CartStore;
pub use config::CartConfig;
pub use context::{CartProvider, use_cart};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, default_data_dir, default_storage_path, load_json,
    load_json_or_default, save_json,
};
pub use storage::{FileStorage, MemoryStorage};
