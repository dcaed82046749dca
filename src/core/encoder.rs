//! Order encoder: turns a validated order into its text form and total price.

use crate::core::{
    catalog::{BOX_SLOTS, Catalog},
    codec::{self, Segment},
    money,
    order::ValidatedOrder,
};
use rust_decimal::Decimal;

/// Text stored in the `Pedidos` column plus the rounded total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOrder {
    /// Segments joined with `"; "`
    pub text: String,
    /// Rounded to cents
    pub total: Decimal,
}

/// Encodes an order. Standalone lines come first in catalog order, then one segment
/// per box numbered from 1. Box contents never affect the price.
#[must_use]
pub fn encode_order(order: &ValidatedOrder, catalog: &Catalog) -> EncodedOrder {
    let standalone: Decimal = order
        .lines()
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum();
    let boxes = catalog.box_offer().price * Decimal::from(order.boxes().len());

    EncodedOrder {
        text: codec::encode(&segments(order)),
        total: money::round_money(standalone + boxes),
    }
}

/// The segments of an order, in encoding order.
#[must_use]
pub fn segments(order: &ValidatedOrder) -> Vec<Segment> {
    let lines = order.lines().iter().map(|line| Segment::Item {
        name: line.name.clone(),
        quantity: line.quantity,
    });
    let boxes = order
        .boxes()
        .iter()
        .enumerate()
        .map(|(index, selection)| Segment::Box {
            number: index + 1,
            contents: selection.to_vec(),
        });

    lines.chain(boxes).collect()
}

/// Recomputes the price of already-encoded text from current catalog prices.
///
/// Applies the same rules as [`encode_order`]: unknown items and boxes without exactly
/// [`BOX_SLOTS`] contents contribute nothing.
#[must_use]
pub fn reprice(text: &str, catalog: &Catalog) -> Decimal {
    let total: Decimal = codec::decode(text)
        .iter()
        .map(|segment| match segment {
            Segment::Item { name, quantity } => catalog
                .get(name)
                .map_or(Decimal::ZERO, |item| item.unit_price * Decimal::from(*quantity)),
            Segment::Box { contents, .. } if contents.len() == BOX_SLOTS => {
                catalog.box_offer().price
            }
            Segment::Box { .. } => Decimal::ZERO,
        })
        .sum();

    money::round_money(total)
}
