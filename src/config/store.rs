//! Record store location.

use std::path::PathBuf;

/// Environment variable overriding the record store path.
pub const STORE_PATH_VAR: &str = "ORDERS_CSV_PATH";

/// Default record store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "pedidos.csv";

/// Gets the record store path from `ORDERS_CSV_PATH`, falling back to `pedidos.csv`.
#[must_use]
pub fn get_store_path() -> PathBuf {
    std::env::var(STORE_PATH_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from)
}
