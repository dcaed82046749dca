//! Core business logic - framework-agnostic ordering, encoding and reporting.
//!
//! Nothing in here knows about Discord. The bot layer collects input into a
//! [`cart::Cart`], and everything from validation to the totals report lives below.

/// Draft cart state collected before submission
pub mod cart;
/// Shop catalog and box offer
pub mod catalog;
/// Text grammar of encoded orders
pub mod codec;
/// Order encoding and pricing
pub mod encoder;
/// CSV downloads
pub mod export;
/// Decimal money helpers
pub mod money;
/// Order validation and submission
pub mod order;
/// Totals reconciliation from stored order text
pub mod reconcile;
/// Totals report, order listing and audit
pub mod report;
