//! CLI command implementations.

pub mod cart;
pub mod config;

use marketcart_store::{CartConfig, CartStore, FileStorage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::Cli;

/// Resolves the storage file from flags and config.
pub fn storage_path(cli: &Cli, config: &CartConfig) -> PathBuf {
    cli.storage
        .clone()
        .unwrap_or_else(|| config.resolved_storage_path())
}

/// Opens the file-backed cart and waits for hydration.
pub async fn open_store(cli: &Cli, config: &CartConfig) -> CartStore {
    let path = storage_path(cli, config);
    debug!(path = %path.display(), key = %config.storage_key, "Opening cart storage");
    CartStore::load(Arc::new(FileStorage::new(path)), config.storage_key.clone()).await
}
