//! Error types for the checkout calculator.
//!
//! Scanning and totalling never fail. These errors only surface while loading
//! price lists and rule tables.

use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors that can occur while configuring a checkout.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Failed to open or read a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Pricing rule with parameters that cannot produce a price
    #[error("Invalid pricing rule for '{sku}': {message}")]
    InvalidRule { sku: String, message: String },
}
