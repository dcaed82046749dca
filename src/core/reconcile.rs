//! Totals reconciler: rebuilds per-item unit counts from stored order text.
//!
//! Only the `Pedidos` text is trusted. Standalone segments add their quantity, every slot
//! of a well-formed box adds one unit, and anything unrecognised is ignored.

use crate::core::{
    catalog::{BOX_SLOTS, Catalog},
    codec::{self, Segment},
};
use std::collections::HashMap;
use tracing::warn;

/// Units ordered for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTotal {
    /// Catalog item name
    pub name: String,
    /// Standalone units plus box slots
    pub units: u64,
}

/// Aggregate unit counts in catalog order, zero-count items included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsReport {
    rows: Vec<ItemTotal>,
}

impl TotalsReport {
    /// One row per catalog item, in catalog order.
    #[must_use]
    pub fn rows(&self) -> &[ItemTotal] {
        &self.rows
    }

    /// Units for a single item, `None` if it is not in the catalog.
    #[must_use]
    pub fn units(&self, name: &str) -> Option<u64> {
        self.rows.iter().find(|row| row.name == name).map(|row| row.units)
    }

    /// Sum over every item.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.rows.iter().map(|row| row.units).sum()
    }
}

/// Reconciles the encoded orders into a [`TotalsReport`].
pub fn reconcile<'a, I>(encoded_orders: I, catalog: &Catalog) -> TotalsReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows: Vec<ItemTotal> = catalog
        .items()
        .iter()
        .map(|item| ItemTotal {
            name: item.name.clone(),
            units: 0,
        })
        .collect();
    let index: HashMap<String, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.name.clone(), i))
        .collect();

    for text in encoded_orders {
        for segment in codec::decode(text) {
            match segment {
                Segment::Item { name, quantity } => {
                    if let Some(&i) = index.get(&name) {
                        rows[i].units += u64::from(quantity);
                    }
                }
                Segment::Box { contents, .. } if contents.len() == BOX_SLOTS => {
                    for name in &contents {
                        if let Some(&i) = index.get(name) {
                            rows[i].units += 1;
                        }
                    }
                }
                Segment::Box { number, contents } => {
                    warn!(
                        "Skipping box #{} with {} items (expected {})",
                        number,
                        contents.len(),
                        BOX_SLOTS
                    );
                }
            }
        }
    }

    TotalsReport { rows }
}
