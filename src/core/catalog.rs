//! The shop catalog: standalone items, which of them fit in a box, and the box offer.
//!
//! The catalog is static for the lifetime of the process. Both the order encoder and the
//! totals reconciler read it; neither mutates it. Item names are checked at construction
//! so they can never collide with the delimiters of the encoded order text.

use crate::{
    core::codec,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Number of sweets in every box.
pub const BOX_SLOTS: usize = 4;

/// A sweet that can be bought on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Display name, also the token used in encoded orders
    pub name: String,
    /// Price of a single unit
    pub unit_price: Decimal,
    /// Whether the item may fill a box slot
    pub box_eligible: bool,
}

/// The fixed-price box of [`BOX_SLOTS`] sweets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOffer {
    /// Display name, e.g. "Caixa de doces (4 unidades)"
    pub name: String,
    /// Price of one box regardless of its contents
    pub price: Decimal,
}

/// Ordered list of items plus the box offer.
///
/// Box-eligible items are a flag on the standalone items, so the eligible set is always
/// a subset of the standalone set.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    box_offer: BoxOffer,
}

impl Catalog {
    /// Builds a catalog, validating every item name.
    ///
    /// # Errors
    /// Returns `Error::Config` if a name is empty, padded with whitespace, duplicated,
    /// contains an order delimiter or starts with the box marker.
    pub fn new(items: Vec<CatalogItem>, box_offer: BoxOffer) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            validate_item_name(&item.name)?;
            if !seen.insert(item.name.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate catalog item: {}", item.name),
                });
            }
        }

        if box_offer.name.trim().is_empty() {
            return Err(Error::Config {
                message: "Box name cannot be empty".to_string(),
            });
        }

        Ok(Self { items, box_offer })
    }

    /// The catalog the shop launched with.
    #[must_use]
    pub fn shop_default() -> Self {
        let item = |name: &str, cents: i64, box_eligible: bool| CatalogItem {
            name: name.to_string(),
            unit_price: Decimal::new(cents, 2),
            box_eligible,
        };

        Self {
            items: vec![
                item("Brigadeiro (unidade)", 200, true),
                item("Bem casado (unidade)", 200, true),
                item("Docinho de Paçoca", 200, true),
                item("Brigadeiro de Palha de Ninho com Oreo (unidade)", 200, true),
                item("Palha Italiana de Ninho com Oreo (unidade)", 500, false),
                item("Salgadinho de queijo", 500, false),
            ],
            box_offer: BoxOffer {
                name: "Caixa de doces (4 unidades)".to_string(),
                price: Decimal::new(700, 2),
            },
        }
    }

    /// All standalone items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items that may fill a box slot, in declaration order.
    pub fn box_eligible(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.box_eligible)
    }

    /// Looks up an item by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Whether `name` is an item that may fill a box slot.
    #[must_use]
    pub fn is_box_eligible(&self, name: &str) -> bool {
        self.get(name).is_some_and(|item| item.box_eligible)
    }

    /// The box offer.
    #[must_use]
    pub const fn box_offer(&self) -> &BoxOffer {
        &self.box_offer
    }
}

fn validate_item_name(name: &str) -> Result<()> {
    let problem = if name.trim().is_empty() {
        Some("cannot be empty")
    } else if name.trim() != name {
        Some("cannot start or end with whitespace")
    } else if name.contains([codec::SEGMENT_DELIMITER, codec::CONTENT_DELIMITER]) {
        Some("cannot contain ';' or ','")
    } else if name.starts_with(codec::BOX_MARKER) {
        Some("cannot start with the box marker")
    } else {
        None
    };

    match problem {
        Some(reason) => Err(Error::Config {
            message: format!("Invalid item name '{name}': {reason}"),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            unit_price: Decimal::new(200, 2),
            box_eligible: true,
        }
    }

    fn offer() -> BoxOffer {
        BoxOffer {
            name: "Caixa".to_string(),
            price: Decimal::new(700, 2),
        }
    }

    #[test]
    fn test_shop_default_passes_validation() -> Result<()> {
        let default = Catalog::shop_default();
        let rebuilt = Catalog::new(default.items().to_vec(), default.box_offer().clone())?;
        assert_eq!(rebuilt.items().len(), 6);
        assert_eq!(rebuilt.box_eligible().count(), 4);
        Ok(())
    }

    #[test]
    fn test_box_eligible_is_subset_of_items() {
        let catalog = Catalog::shop_default();
        for eligible in catalog.box_eligible() {
            assert!(catalog.get(&eligible.name).is_some());
        }
        assert!(catalog.is_box_eligible("Docinho de Paçoca"));
        assert!(!catalog.is_box_eligible("Salgadinho de queijo"));
        assert!(!catalog.is_box_eligible("Pudim"));
    }

    #[test]
    fn test_rejects_delimiters_in_names() {
        assert!(Catalog::new(vec![item("Bolo; fatia")], offer()).is_err());
        assert!(Catalog::new(vec![item("Bolo, fatia")], offer()).is_err());
        assert!(Catalog::new(vec![item("Caixa #especial")], offer()).is_err());
        assert!(Catalog::new(vec![item("  ")], offer()).is_err());
        assert!(Catalog::new(vec![item(" Bolo")], offer()).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = Catalog::new(vec![item("Bolo"), item("Bolo")], offer());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let catalog = Catalog::shop_default();
        assert!(catalog.get("Brigadeiro (unidade)").is_some());
        assert!(catalog.get("brigadeiro (unidade)").is_none());
        assert!(catalog.get("Brigadeiro").is_none());
    }
}
