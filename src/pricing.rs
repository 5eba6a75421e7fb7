//! Pricing rules and the standard price table.
//!
//! A [`PricingRule`] computes the price of *all* units of one SKU given how
//! many of them are in the cart. SKUs without a rule fall back to the
//! [`PriceTable`] unit price times the count.

use crate::error::{CheckoutError, Result};
use crate::money::Money;
use crate::sku::Sku;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Open extension point for pricing that the built-in rules cannot express.
///
/// Any `Fn(&Sku, u32) -> Money` closure implements this trait.
pub trait PricingStrategy: Send + Sync {
    /// Returns the price for `count` units of `sku`.
    fn price(&self, sku: &Sku, count: u32) -> Money;
}

impl<F> PricingStrategy for F
where
    F: Fn(&Sku, u32) -> Money + Send + Sync,
{
    fn price(&self, sku: &Sku, count: u32) -> Money {
        self(sku, count)
    }
}

/// A pricing rule registered for a single SKU.
#[derive(Clone)]
pub enum PricingRule {
    /// Every unit at the same price.
    Standard(Money),

    /// Buy `buy`, pay for `pay`: each complete group of `buy` units is charged
    /// as `pay` units; leftover units are charged in full.
    MultiBuy { buy: u32, pay: u32, unit_price: Money },

    /// Once the count exceeds `threshold`, every unit (not just the excess)
    /// is charged at `reduced_price`.
    BulkThreshold {
        threshold: u32,
        reduced_price: Money,
        standard_price: Money,
    },

    /// Caller-supplied strategy.
    Custom(Arc<dyn PricingStrategy>),
}

impl PricingRule {
    /// Builds a buy-N-pay-M rule.
    ///
    /// Fails when `buy` is zero or `pay` exceeds `buy`.
    pub fn multi_buy(sku: &Sku, buy: u32, pay: u32, unit_price: Money) -> Result<Self> {
        if buy == 0 {
            return Err(CheckoutError::InvalidRule {
                sku: sku.to_string(),
                message: "multi-buy group size must be positive".to_string(),
            });
        }
        if pay > buy {
            return Err(CheckoutError::InvalidRule {
                sku: sku.to_string(),
                message: format!("pays for {} units out of a group of {}", pay, buy),
            });
        }
        Ok(PricingRule::MultiBuy {
            buy,
            pay,
            unit_price,
        })
    }

    /// Wraps a closure or strategy object as a rule.
    pub fn custom<S>(strategy: S) -> Self
    where
        S: PricingStrategy + 'static,
    {
        PricingRule::Custom(Arc::new(strategy))
    }

    /// Price contribution of `count` units of `sku`.
    pub fn price(&self, sku: &Sku, count: u32) -> Money {
        match self {
            PricingRule::Standard(unit_price) => *unit_price * count,
            PricingRule::MultiBuy {
                buy,
                pay,
                unit_price,
            } => {
                // A zero group size charges every unit.
                if *buy == 0 {
                    return *unit_price * count;
                }
                let chargeable = (count / buy) * pay + count % buy;
                *unit_price * chargeable
            }
            PricingRule::BulkThreshold {
                threshold,
                reduced_price,
                standard_price,
            } => {
                if count > *threshold {
                    *reduced_price * count
                } else {
                    *standard_price * count
                }
            }
            PricingRule::Custom(strategy) => strategy.price(sku, count),
        }
    }
}

impl fmt::Debug for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingRule::Standard(price) => f.debug_tuple("Standard").field(price).finish(),
            PricingRule::MultiBuy {
                buy,
                pay,
                unit_price,
            } => f
                .debug_struct("MultiBuy")
                .field("buy", buy)
                .field("pay", pay)
                .field("unit_price", unit_price)
                .finish(),
            PricingRule::BulkThreshold {
                threshold,
                reduced_price,
                standard_price,
            } => f
                .debug_struct("BulkThreshold")
                .field("threshold", threshold)
                .field("reduced_price", reduced_price)
                .field("standard_price", standard_price)
                .finish(),
            PricingRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Per-unit prices used when no rule is registered for a SKU.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<Sku, Money>,
}

impl PriceTable {
    /// Creates an empty table. Every SKU prices at zero.
    pub fn new() -> Self {
        PriceTable {
            prices: HashMap::new(),
        }
    }

    /// The store's standard catalogue.
    pub fn standard() -> Self {
        let mut table = PriceTable::new();
        table.insert("ipd", Money::from_cents(54999));
        table.insert("mbp", Money::from_cents(139999));
        table.insert("atv", Money::from_cents(10950));
        table.insert("vga", Money::from_cents(3000));
        table
    }

    /// Sets the unit price for a SKU, returning the previous one.
    pub fn insert(&mut self, sku: impl Into<Sku>, price: Money) -> Option<Money> {
        self.prices.insert(sku.into(), price)
    }

    /// Unit price for `sku`, or zero when the SKU is not listed.
    pub fn unit_price(&self, sku: &Sku) -> Money {
        self.prices.get(sku).copied().unwrap_or(Money::ZERO)
    }

    pub fn contains(&self, sku: &Sku) -> bool {
        self.prices.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<Sku>> FromIterator<(S, Money)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, Money)>>(iter: I) -> Self {
        PriceTable {
            prices: iter.into_iter().map(|(s, p)| (s.into(), p)).collect(),
        }
    }
}

/// The store's current promotions: 3-for-2 on `atv` and a bulk discount on
/// `ipd` when more than 4 are bought.
pub fn default_rules() -> HashMap<Sku, PricingRule> {
    let mut rules = HashMap::new();
    rules.insert(
        Sku::from("atv"),
        PricingRule::MultiBuy {
            buy: 3,
            pay: 2,
            unit_price: Money::from_cents(10950),
        },
    );
    rules.insert(
        Sku::from("ipd"),
        PricingRule::BulkThreshold {
            threshold: 4,
            reduced_price: Money::from_cents(49999),
            standard_price: Money::from_cents(54999),
        },
    );
    rules
}
