//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Draft cart and order submission commands
pub mod cart;

/// General utility commands
pub mod general;

/// Order listing, totals, downloads and wipe
pub mod orders;

// Export commands
pub use cart::*;
pub use general::*;
pub use orders::*;
