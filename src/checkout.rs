//! The checkout: scanned items in, total price out.
//!
//! The cart keeps every scan in order, but only per-SKU counts affect the
//! price. Totals are recomputed from the cart on every call.

use crate::error::Result;
use crate::money::Money;
use crate::pricing::{PriceTable, PricingRule};
use crate::sku::Sku;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

/// One receipt row.
#[derive(Debug, Serialize)]
struct ReceiptLine<'a> {
    sku: &'a Sku,
    quantity: usize,
    price: Money,
}

/// A single checkout session.
///
/// Rules and the price table are fixed at construction. Scanning never fails;
/// SKUs with neither a rule nor a standard price contribute zero.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// Scanned SKUs in scan order.
    cart: Vec<Sku>,

    /// Rules override the standard price for their SKU.
    rules: HashMap<Sku, PricingRule>,

    prices: PriceTable,
}

impl Checkout {
    /// Creates a checkout using the standard price table.
    pub fn new(rules: HashMap<Sku, PricingRule>) -> Self {
        Self::with_price_table(rules, PriceTable::standard())
    }

    /// Creates a checkout with an explicit price table.
    pub fn with_price_table(rules: HashMap<Sku, PricingRule>, prices: PriceTable) -> Self {
        Checkout {
            cart: Vec::new(),
            rules,
            prices,
        }
    }

    /// Adds an item to the cart.
    pub fn scan(&mut self, item: impl Into<Sku>) {
        let sku = item.into();
        debug!("Scanned {}", sku);
        self.cart.push(sku);
    }

    /// Computes the total price of everything scanned so far.
    pub fn total(&self) -> Money {
        self.counts()
            .into_iter()
            .map(|(sku, count)| self.price_for(sku, count))
            .sum()
    }

    /// Price contribution of `count` units of `sku`.
    ///
    /// A registered rule wins; otherwise the standard unit price (zero when
    /// unlisted) times the count.
    pub fn price_for(&self, sku: &Sku, count: u32) -> Money {
        let price = match self.rules.get(sku) {
            Some(rule) => rule.price(sku, count),
            None => self.prices.unit_price(sku) * count,
        };
        debug!("{} x{} -> {}", sku, count, price);
        price
    }

    /// Number of units scanned per distinct SKU, ordered by SKU.
    pub fn counts(&self) -> BTreeMap<&Sku, u32> {
        let mut counts = BTreeMap::new();
        for sku in &self.cart {
            *counts.entry(sku).or_insert(0) += 1;
        }
        counts
    }

    /// Scanned items in scan order.
    pub fn items(&self) -> &[Sku] {
        &self.cart
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Empties the cart for the next customer. Rules and prices are kept.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Writes an itemised receipt as CSV.
    ///
    /// One `sku,quantity,price` line per distinct SKU sorted by SKU, then a
    /// `total` line carrying the item count and the grand total.
    pub fn write_receipt<W: Write>(&self, writer: W) -> Result<()> {
        // Header row comes from the `ReceiptLine` field names.
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut total = Money::ZERO;
        for (sku, count) in self.counts() {
            let price = self.price_for(sku, count);
            total += price;
            csv_writer.serialize(ReceiptLine {
                sku,
                quantity: count as usize,
                price,
            })?;
        }

        csv_writer.serialize(ReceiptLine {
            sku: &Sku::from("total"),
            quantity: self.cart.len(),
            price: total,
        })?;

        csv_writer.flush()?;
        Ok(())
    }
}
