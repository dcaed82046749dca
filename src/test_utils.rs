//! Shared test utilities.
//!
//! Helpers for building the sample catalog, order inputs and throwaway record stores.

use crate::{
    core::{catalog::Catalog, order::OrderInput},
    store::RecordStore,
};
use tempfile::TempDir;

/// Box-eligible, R$ 2.00
pub const BRIGADEIRO: &str = "Brigadeiro (unidade)";
/// Box-eligible, R$ 2.00
pub const BEM_CASADO: &str = "Bem casado (unidade)";
/// Box-eligible, R$ 2.00
pub const PACOCA: &str = "Docinho de Paçoca";
/// Box-eligible, R$ 2.00. Shares its first word with [`BRIGADEIRO`].
pub const PALHA_NINHO: &str = "Brigadeiro de Palha de Ninho com Oreo (unidade)";

/// The shop's launch catalog.
pub fn sample_catalog() -> Catalog {
    Catalog::shop_default()
}

/// Builds an order input from literal quantities and boxes.
pub fn order_input(name: &str, quantities: &[(&str, u32)], boxes: &[[&str; 4]]) -> OrderInput {
    OrderInput {
        customer_name: name.to_string(),
        quantities: quantities
            .iter()
            .map(|(item, qty)| ((*item).to_string(), *qty))
            .collect(),
        boxes: boxes
            .iter()
            .map(|slots| slots.iter().map(|s| (*s).to_string()).collect())
            .collect(),
        note: String::new(),
    }
}

/// A record store inside a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep it alive for
/// the duration of the test.
#[allow(clippy::expect_used)]
pub fn temp_store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let store = RecordStore::new(dir.path().join("pedidos.csv"));
    (dir, store)
}
