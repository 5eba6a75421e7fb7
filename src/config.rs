//! Loading price lists and pricing rules from CSV.
//!
//! Files are read one record at a time. Rows that cannot be turned into a
//! price or rule are logged at warn level and skipped; I/O failures and
//! unreadable headers propagate.
//!
//! Price list format:
//!
//! ```text
//! sku,price
//! ipd,549.99
//! ```
//!
//! Rules format (unused columns may be left empty):
//!
//! ```text
//! sku,rule,quantity,pay,price,standard_price
//! atv,multi_buy,3,2,109.50,
//! ipd,bulk,4,,499.99,549.99
//! vga,standard,,,25.00,
//! ```

use crate::checkout::Checkout;
use crate::error::{CheckoutError, Result};
use crate::money::Money;
use crate::pricing::{default_rules, PriceTable, PricingRule};
use crate::sku::Sku;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

/// Environment variable naming a price list CSV.
pub const PRICE_LIST_ENV: &str = "CHECKOUT_PRICE_LIST";

/// Environment variable naming a rules CSV.
pub const RULES_ENV: &str = "CHECKOUT_RULES";

/// Raw price list row.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    sku: Sku,
    price: Money,
}

/// Raw rules row as read from CSV.
///
/// `quantity` is the group size for multi-buy rules and the threshold for
/// bulk rules.
#[derive(Debug, Deserialize)]
pub struct RuleRecord {
    pub sku: Sku,
    pub rule: String,
    pub quantity: Option<u32>,
    pub pay: Option<u32>,
    pub price: Option<Money>,
    pub standard_price: Option<Money>,
}

impl RuleRecord {
    /// Converts the raw record into a typed rule.
    pub fn parse(&self) -> Result<(Sku, PricingRule)> {
        let sku = self.sku.clone();
        let kind = self.rule.trim().to_lowercase();

        let rule = match kind.as_str() {
            "standard" => PricingRule::Standard(self.required("price", self.price)?),
            "multi_buy" => {
                let buy = self.required("quantity", self.quantity)?;
                let pay = self.required("pay", self.pay)?;
                PricingRule::multi_buy(&sku, buy, pay, self.required("price", self.price)?)?
            }
            "bulk" => PricingRule::BulkThreshold {
                threshold: self.required("quantity", self.quantity)?,
                reduced_price: self.required("price", self.price)?,
                standard_price: self.required("standard_price", self.standard_price)?,
            },
            other => {
                return Err(CheckoutError::InvalidRule {
                    sku: sku.to_string(),
                    message: format!("unknown rule kind '{}'", other),
                })
            }
        };

        Ok((sku, rule))
    }

    fn required<T>(&self, field: &str, value: Option<T>) -> Result<T> {
        value.ok_or_else(|| CheckoutError::InvalidRule {
            sku: self.sku.to_string(),
            message: format!("'{}' rule requires {}", self.rule.trim(), field),
        })
    }
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Reads a `sku,price` price list.
pub fn load_price_table<R: Read>(reader: R) -> Result<PriceTable> {
    let mut csv_reader = reader_for(reader);
    let mut table = PriceTable::new();

    for (row_idx, result) in csv_reader.deserialize::<PriceRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                continue;
            }
        };

        if record.sku.as_str().is_empty() {
            warn!("Row {}: {}", row_num, empty_sku(row_num));
            continue;
        }

        if table.insert(record.sku.clone(), record.price).is_some() {
            warn!("Row {}: Duplicate price for {}, overriding", row_num, record.sku);
        }
    }

    debug!("Loaded {} standard prices", table.len());
    Ok(table)
}

/// Reads a rules table.
pub fn load_rules<R: Read>(reader: R) -> Result<HashMap<Sku, PricingRule>> {
    let mut csv_reader = reader_for(reader);
    let mut rules = HashMap::new();

    for (row_idx, result) in csv_reader.deserialize::<RuleRecord>().enumerate() {
        let row_num = row_idx + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                continue;
            }
        };

        if record.sku.as_str().is_empty() {
            warn!("Row {}: {}", row_num, empty_sku(row_num));
            continue;
        }

        match record.parse() {
            Ok((sku, rule)) => {
                debug!("Row {}: {} -> {:?}", row_num, sku, rule);
                if rules.insert(sku.clone(), rule).is_some() {
                    warn!("Row {}: Duplicate rule for {}, overriding", row_num, sku);
                }
            }
            Err(e) => warn!("Row {}: {}", row_num, e),
        }
    }

    Ok(rules)
}

fn empty_sku(row: usize) -> CheckoutError {
    CheckoutError::InvalidRecord {
        row,
        message: "empty sku".to_string(),
    }
}

/// Where a checkout's prices and rules come from.
///
/// `None` means the built-in standard price table or promotions.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub price_list: Option<PathBuf>,
    pub rules: Option<PathBuf>,
}

impl Config {
    /// Reads file locations from `CHECKOUT_PRICE_LIST` and `CHECKOUT_RULES`.
    pub fn from_env() -> Self {
        Config {
            price_list: path_from_env(PRICE_LIST_ENV),
            rules: path_from_env(RULES_ENV),
        }
    }

    /// Loads the configured files and builds an empty checkout.
    pub fn build(&self) -> Result<Checkout> {
        let prices = match &self.price_list {
            Some(path) => {
                debug!("Loading price list from {}", path.display());
                load_price_table(BufReader::new(File::open(path)?))?
            }
            None => PriceTable::standard(),
        };

        let rules = match &self.rules {
            Some(path) => {
                debug!("Loading rules from {}", path.display());
                load_rules(BufReader::new(File::open(path)?))?
            }
            None => default_rules(),
        };

        Ok(Checkout::with_price_table(rules, prices))
    }
}

fn path_from_env(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
