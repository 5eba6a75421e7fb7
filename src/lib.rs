//! # Checkout
//!
//! A point-of-sale checkout calculator. Items are scanned one at a time and
//! the total is computed from per-SKU counts, applying any registered pricing
//! rule (multi-buy deals, bulk discounts, custom strategies) or falling back
//! to the standard unit price.
//!
//! ## Design Principles
//!
//! - **Exact prices**: 2 decimal places via `rust_decimal`
//! - **Rules override prices**: a rule for a SKU replaces its standard price
//! - **Order-independent totals**: only counts matter, never scan order
//! - **No failures at the till**: unknown SKUs simply cost nothing
//!
//! ## Example
//!
//! ```
//! use checkout::{default_rules, Checkout};
//!
//! let mut co = Checkout::new(default_rules());
//! for item in ["ipd", "mbp", "atv", "atv", "atv", "vga"] {
//!     co.scan(item);
//! }
//! assert_eq!(co.total().to_string(), "2198.98");
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod sku;

pub use checkout::Checkout;
pub use config::Config;
pub use error::{CheckoutError, Result};
pub use money::Money;
pub use pricing::{default_rules, PriceTable, PricingRule, PricingStrategy};
pub use sku::Sku;
