//! Configuration management: the catalog file and environment settings.

/// Catalog configuration loading from config.toml
pub mod catalog;

/// Record store location from environment variables
pub mod store;

use crate::{core::catalog::Catalog, errors::Result};
use std::path::PathBuf;
use tracing::info;

/// Everything the bot needs at startup, except the Discord token.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shop name shown in message titles
    pub shop_name: String,
    /// Items, prices and the box offer
    pub catalog: Catalog,
    /// CSV file holding submitted orders
    pub store_path: PathBuf,
}

/// Loads the catalog and the store location.
///
/// # Errors
/// Returns `Error::Config` if the catalog file is unreadable or invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let (shop_name, catalog) = catalog::load_shop_catalog()?;
    let store_path = store::get_store_path();

    info!(
        "Loaded catalog for '{}' with {} items ({} box-eligible); orders stored at {}",
        shop_name,
        catalog.items().len(),
        catalog.box_eligible().count(),
        store_path.display()
    );

    Ok(AppConfig {
        shop_name,
        catalog,
        store_path,
    })
}
