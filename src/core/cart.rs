//! Draft cart a customer fills in before submitting.
//!
//! The cart is the only mutable piece of form state. Submission snapshots it into an
//! immutable [`OrderInput`], so validation and encoding never see live UI state.

use crate::{
    core::{
        catalog::Catalog,
        money,
        order::{self, BoxSelection, MAX_QUANTITY, OrderInput},
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Quantities and boxes selected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    quantities: BTreeMap<String, u32>,
    boxes: Vec<BoxSelection>,
}

impl Cart {
    /// Sets the quantity of a standalone item; zero removes it.
    ///
    /// # Errors
    /// Returns `UnknownItem` for names outside the catalog and `InvalidQuantity` for
    /// negative quantities or quantities above [`MAX_QUANTITY`].
    pub fn set_quantity(&mut self, catalog: &Catalog, name: &str, quantity: i64) -> Result<()> {
        if catalog.get(name).is_none() {
            return Err(Error::UnknownItem {
                name: name.to_string(),
            });
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_QUANTITY)
            .ok_or_else(|| Error::InvalidQuantity {
                name: name.to_string(),
                quantity,
            })?;

        if quantity == 0 {
            self.quantities.remove(name);
        } else {
            self.quantities.insert(name.to_string(), quantity);
        }
        Ok(())
    }

    /// Adds a box and returns its 1-based number.
    ///
    /// # Errors
    /// Returns the same errors as [`order::validate_box`].
    pub fn add_box(&mut self, catalog: &Catalog, slots: &[String]) -> Result<usize> {
        let selection = order::validate_box(catalog, slots)?;
        self.boxes.push(selection);
        Ok(self.boxes.len())
    }

    /// Removes a box by its 1-based number, returning whether one was removed.
    pub fn remove_box(&mut self, number: usize) -> bool {
        if number == 0 || number > self.boxes.len() {
            return false;
        }
        self.boxes.remove(number - 1);
        true
    }

    /// Whether nothing has been selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty() && self.boxes.is_empty()
    }

    /// Selected standalone quantities.
    #[must_use]
    pub const fn quantities(&self) -> &BTreeMap<String, u32> {
        &self.quantities
    }

    /// Selected boxes in the order they were added.
    #[must_use]
    pub fn boxes(&self) -> &[BoxSelection] {
        &self.boxes
    }

    /// Running price of the cart, computed the same way as the encoder's total.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Decimal {
        let standalone: Decimal = self
            .quantities
            .iter()
            .filter_map(|(name, &quantity)| {
                catalog
                    .get(name)
                    .map(|item| item.unit_price * Decimal::from(quantity))
            })
            .sum();
        let boxes = catalog.box_offer().price * Decimal::from(self.boxes.len());
        money::round_money(standalone + boxes)
    }

    /// Snapshots the cart into an immutable order input.
    #[must_use]
    pub fn to_input(&self, customer_name: &str, note: &str) -> OrderInput {
        OrderInput {
            customer_name: customer_name.to_string(),
            quantities: self.quantities.clone(),
            boxes: self.boxes.iter().map(|b| b.to_vec()).collect(),
            note: note.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::encoder, test_utils::*};

    fn slots(names: [&str; 4]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_set_quantity_and_remove() -> Result<()> {
        let catalog = sample_catalog();
        let mut cart = Cart::default();

        cart.set_quantity(&catalog, BRIGADEIRO, 3)?;
        assert_eq!(cart.quantities().get(BRIGADEIRO), Some(&3));

        cart.set_quantity(&catalog, BRIGADEIRO, 5)?;
        assert_eq!(cart.quantities().get(BRIGADEIRO), Some(&5));

        cart.set_quantity(&catalog, BRIGADEIRO, 0)?;
        assert!(cart.is_empty());
        Ok(())
    }

    #[test]
    fn test_set_quantity_rejects_bad_input() {
        let catalog = sample_catalog();
        let mut cart = Cart::default();

        assert!(matches!(
            cart.set_quantity(&catalog, "Pudim", 1),
            Err(Error::UnknownItem { .. })
        ));
        assert!(matches!(
            cart.set_quantity(&catalog, BRIGADEIRO, -1),
            Err(Error::InvalidQuantity { quantity: -1, .. })
        ));
        assert!(matches!(
            cart.set_quantity(&catalog, BRIGADEIRO, i64::from(MAX_QUANTITY) + 1),
            Err(Error::InvalidQuantity { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_accepts_the_largest_quantity_the_command_offers() -> Result<()> {
        // `/cart add` declares `#[max = 9999]` as a literal.
        assert_eq!(MAX_QUANTITY, 9999);

        let catalog = sample_catalog();
        let mut cart = Cart::default();
        cart.set_quantity(&catalog, BRIGADEIRO, 9999)?;
        assert_eq!(cart.quantities().get(BRIGADEIRO), Some(&9999));
        Ok(())
    }

    #[test]
    fn test_add_and_remove_boxes() -> Result<()> {
        let catalog = sample_catalog();
        let mut cart = Cart::default();

        assert_eq!(cart.add_box(&catalog, &slots([PACOCA, PACOCA, PACOCA, PACOCA]))?, 1);
        assert_eq!(
            cart.add_box(&catalog, &slots([BRIGADEIRO, BEM_CASADO, PACOCA, PALHA_NINHO]))?,
            2
        );
        assert!(cart
            .add_box(&catalog, &slots([BRIGADEIRO, BRIGADEIRO, BRIGADEIRO, "Salgadinho de queijo"]))
            .is_err());
        assert_eq!(cart.boxes().len(), 2);

        assert!(cart.remove_box(1));
        assert!(!cart.remove_box(0));
        assert!(!cart.remove_box(5));
        assert_eq!(cart.boxes()[0][0], BRIGADEIRO);
        Ok(())
    }

    #[test]
    fn test_subtotal_matches_encoded_total() -> Result<()> {
        let catalog = sample_catalog();
        let mut cart = Cart::default();
        cart.set_quantity(&catalog, "Salgadinho de queijo", 3)?;
        cart.set_quantity(&catalog, PACOCA, 1)?;
        cart.add_box(&catalog, &slots([BEM_CASADO, BEM_CASADO, PACOCA, BRIGADEIRO]))?;

        let order = cart.to_input("Ana", "").validate(&catalog)?;
        let encoded = encoder::encode_order(&order, &catalog);

        assert_eq!(cart.subtotal(&catalog), Decimal::new(2400, 2));
        assert_eq!(cart.subtotal(&catalog), encoded.total);
        Ok(())
    }

    #[test]
    fn test_to_input_snapshot_is_independent() -> Result<()> {
        let catalog = sample_catalog();
        let mut cart = Cart::default();
        cart.set_quantity(&catalog, BRIGADEIRO, 2)?;

        let input = cart.to_input("Ana", "nota");
        cart.set_quantity(&catalog, BRIGADEIRO, 9)?;

        assert_eq!(input.quantities.get(BRIGADEIRO), Some(&2));
        assert_eq!(input.note, "nota");
        Ok(())
    }
}
