//! Order submission business logic.
//!
//! An [`OrderInput`] is the immutable snapshot of what the customer filled in. It is
//! validated against the catalog into a [`ValidatedOrder`], which is the only thing the
//! encoder accepts, and the encoded result is appended to the record store as an
//! [`OrderRecord`].

use crate::{
    core::{
        catalog::{BOX_SLOTS, Catalog},
        encoder,
    },
    errors::{Error, Result},
    store::{OrderRecord, RecordStore},
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Largest quantity of a single item accepted in one order.
pub const MAX_QUANTITY: u32 = 9999;

/// The contents of one box, slot by slot.
pub type BoxSelection = [String; BOX_SLOTS];

/// Raw order as collected from the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    /// Name typed by the customer
    pub customer_name: String,
    /// Standalone item name to quantity; zero quantities are ignored
    pub quantities: BTreeMap<String, u32>,
    /// One entry per box, each listing its slot contents
    pub boxes: Vec<Vec<String>>,
    /// Free-text note stored alongside the order
    pub note: String,
}

/// A standalone line of a validated order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneLine {
    /// Catalog item name
    pub name: String,
    /// Units ordered, always positive
    pub quantity: u32,
    /// Unit price at validation time
    pub unit_price: Decimal,
}

/// An order that passed validation against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    customer_name: String,
    lines: Vec<StandaloneLine>,
    boxes: Vec<BoxSelection>,
    note: String,
}

impl ValidatedOrder {
    /// Customer name, trimmed.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Standalone lines in catalog order.
    #[must_use]
    pub fn lines(&self) -> &[StandaloneLine] {
        &self.lines
    }

    /// Boxes in selection order.
    #[must_use]
    pub fn boxes(&self) -> &[BoxSelection] {
        &self.boxes
    }

    /// Note attached to the order.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }
}

impl OrderInput {
    /// Checks the input against the catalog.
    ///
    /// # Errors
    /// - `EmptyCustomerName` if the name is blank
    /// - `UnknownItem` if a quantity or box slot names an item outside the catalog
    /// - `InvalidQuantity` if a quantity exceeds [`MAX_QUANTITY`]
    /// - `InvalidBoxSize` / `NotBoxEligible` for a malformed box
    /// - `EmptyOrder` if nothing was selected
    pub fn validate(&self, catalog: &Catalog) -> Result<ValidatedOrder> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(Error::EmptyCustomerName);
        }

        for (name, &quantity) in &self.quantities {
            if catalog.get(name).is_none() {
                return Err(Error::UnknownItem { name: name.clone() });
            }
            if quantity > MAX_QUANTITY {
                return Err(Error::InvalidQuantity {
                    name: name.clone(),
                    quantity: i64::from(quantity),
                });
            }
        }

        let lines: Vec<StandaloneLine> = catalog
            .items()
            .iter()
            .filter_map(|item| {
                let quantity = self.quantities.get(&item.name).copied().unwrap_or(0);
                (quantity > 0).then(|| StandaloneLine {
                    name: item.name.clone(),
                    quantity,
                    unit_price: item.unit_price,
                })
            })
            .collect();

        let boxes = self
            .boxes
            .iter()
            .map(|slots| validate_box(catalog, slots))
            .collect::<Result<Vec<_>>>()?;

        if lines.is_empty() && boxes.is_empty() {
            return Err(Error::EmptyOrder);
        }

        Ok(ValidatedOrder {
            customer_name: customer_name.to_string(),
            lines,
            boxes,
            note: self.note.trim().to_string(),
        })
    }
}

/// Checks one box: exactly [`BOX_SLOTS`] names, each box-eligible.
///
/// # Errors
/// Returns `InvalidBoxSize`, `UnknownItem` or `NotBoxEligible`.
pub fn validate_box(catalog: &Catalog, slots: &[String]) -> Result<BoxSelection> {
    let selection: BoxSelection =
        slots
            .to_vec()
            .try_into()
            .map_err(|rejected: Vec<String>| Error::InvalidBoxSize {
                expected: BOX_SLOTS,
                found: rejected.len(),
            })?;

    for name in &selection {
        if catalog.get(name).is_none() {
            return Err(Error::UnknownItem { name: name.clone() });
        }
        if !catalog.is_box_eligible(name) {
            return Err(Error::NotBoxEligible { name: name.clone() });
        }
    }

    Ok(selection)
}

/// Validates, encodes and appends an order to the record store.
///
/// Nothing is written when validation fails.
///
/// # Errors
/// Returns the validation error, or an I/O / CSV error from the store.
#[instrument(skip(store, catalog, input), fields(customer = %input.customer_name.trim()))]
pub fn submit_order(
    store: &RecordStore,
    catalog: &Catalog,
    input: &OrderInput,
) -> Result<OrderRecord> {
    let order = input.validate(catalog)?;
    let encoded = encoder::encode_order(&order, catalog);

    let record = OrderRecord {
        customer_name: order.customer_name().to_string(),
        encoded_order: encoded.text,
        total: encoded.total,
        note: order.note().to_string(),
    };
    store.append_record(&record)?;

    info!(
        "Order recorded for {}: {} (total {})",
        record.customer_name, record.encoded_order, record.total
    );
    Ok(record)
}
