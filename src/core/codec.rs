//! The text grammar of an encoded order, shared by the encoder and the reconciler.
//!
//! ```text
//! order   := segment ( "; " segment )*
//! segment := item | box
//! item    := NAME " (x" DIGITS ")"
//! box     := "Caixa #" DIGITS ": " NAME ( ", " NAME )*
//! ```
//!
//! `NAME` never contains `;` or `,` and never starts with `Caixa #` (enforced when the
//! catalog is built), so splitting on the delimiters yields whole name tokens. Parsing is
//! tolerant: a segment that fits neither production is dropped, never an error.

use std::fmt;

/// Prefix of every box segment.
pub const BOX_MARKER: &str = "Caixa #";
/// Separates segments.
pub const SEGMENT_DELIMITER: char = ';';
/// Separates the names inside a box segment.
pub const CONTENT_DELIMITER: char = ',';

const SEGMENT_SEPARATOR: &str = "; ";
const CONTENT_SEPARATOR: &str = ", ";
const QUANTITY_OPEN: &str = " (x";
const QUANTITY_CLOSE: char = ')';

/// One fragment of an encoded order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A standalone purchase: `Brigadeiro (unidade) (x3)`
    Item {
        /// Catalog item name
        name: String,
        /// Units bought
        quantity: u32,
    },
    /// A box: `Caixa #1: A, B, C, D`
    Box {
        /// 1-based position of the box within the order
        number: usize,
        /// Item names in slot order
        contents: Vec<String>,
    },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item { name, quantity } => {
                write!(f, "{name}{QUANTITY_OPEN}{quantity}{QUANTITY_CLOSE}")
            }
            Self::Box { number, contents } => {
                write!(
                    f,
                    "{BOX_MARKER}{number}: {}",
                    contents.join(CONTENT_SEPARATOR)
                )
            }
        }
    }
}

/// Joins segments into the single text field stored in the `Pedidos` column.
#[must_use]
pub fn encode(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

/// Splits an encoded order back into segments, skipping anything unrecognised.
#[must_use]
pub fn decode(text: &str) -> Vec<Segment> {
    text.split(SEGMENT_DELIMITER)
        .filter_map(|raw| {
            let segment = parse_segment(raw);
            if segment.is_none() && !raw.trim().is_empty() {
                tracing::debug!("Ignoring unrecognised order segment: {:?}", raw.trim());
            }
            segment
        })
        .collect()
}

/// Parses a single segment, without its surrounding delimiters.
#[must_use]
pub fn parse_segment(raw: &str) -> Option<Segment> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.strip_prefix(BOX_MARKER) {
        Some(rest) => parse_box(rest),
        None => parse_item(raw),
    }
}

fn parse_box(rest: &str) -> Option<Segment> {
    let (number, contents) = rest.split_once(':')?;
    let number = parse_digits(number)?;
    let contents: Vec<String> = contents
        .split(CONTENT_DELIMITER)
        .map(|name| name.trim().to_string())
        .collect();

    if contents.iter().any(String::is_empty) {
        return None;
    }

    Some(Segment::Box {
        number: usize::try_from(number).ok()?,
        contents,
    })
}

fn parse_item(raw: &str) -> Option<Segment> {
    let body = raw.strip_suffix(QUANTITY_CLOSE)?;
    let (name, digits) = body.rsplit_once(QUANTITY_OPEN)?;
    if name.is_empty() {
        return None;
    }

    Some(Segment::Item {
        name: name.to_string(),
        quantity: parse_digits(digits)?,
    })
}

fn parse_digits(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
