//! Unified error types and result handling.

use thiserror::Error;

/// Every failure the order bot can surface, from configuration to validation to storage.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file or environment is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable explanation
        message: String,
    },

    /// Submission without a customer name
    #[error("Please fill in your name before submitting the order")]
    EmptyCustomerName,

    /// Submission with neither standalone items nor boxes
    #[error("Select at least one sweet before submitting the order")]
    EmptyOrder,

    /// An item name that is not in the catalog
    #[error("Unknown item: {name}")]
    UnknownItem {
        /// The offending name
        name: String,
    },

    /// A box slot filled with an item that cannot go in a box
    #[error("'{name}' cannot be put in a box")]
    NotBoxEligible {
        /// The offending name
        name: String,
    },

    /// A standalone quantity outside the accepted range
    #[error("Invalid quantity {quantity} for '{name}'")]
    InvalidQuantity {
        /// Item name
        name: String,
        /// Rejected quantity
        quantity: i64,
    },

    /// A box selection with the wrong number of slots
    #[error("A box holds exactly {expected} sweets, got {found}")]
    InvalidBoxSize {
        /// Required slot count
        expected: usize,
        /// Provided slot count
        found: usize,
    },

    /// The record store exists but cannot be interpreted at all
    #[error("Order records are unreadable: {message}")]
    MalformedStore {
        /// Human readable explanation
        message: String,
    },

    /// I/O failure on the record store or config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Formatting failure while building a message
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Missing environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether the error is a problem with the submitted input rather than the system.
    ///
    /// Validation errors are shown to the customer as-is and never logged as failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyCustomerName
                | Self::EmptyOrder
                | Self::UnknownItem { .. }
                | Self::NotBoxEligible { .. }
                | Self::InvalidQuantity { .. }
                | Self::InvalidBoxSize { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_flagged() {
        assert!(Error::EmptyCustomerName.is_validation());
        assert!(Error::EmptyOrder.is_validation());
        assert!(
            Error::InvalidBoxSize {
                expected: 4,
                found: 3
            }
            .is_validation()
        );
        assert!(
            !Error::MalformedStore {
                message: "x".to_string()
            }
            .is_validation()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UnknownItem {
            name: "Pudim".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown item: Pudim");

        let err = Error::InvalidBoxSize {
            expected: 4,
            found: 2,
        };
        assert_eq!(err.to_string(), "A box holds exactly 4 sweets, got 2");
    }
}
