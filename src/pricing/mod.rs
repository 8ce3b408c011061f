// Pricing module - current precious-metal prices
//
// The engine never fetches prices itself. Anything that can answer "price of
// one unit of this metal" plugs in through `MetalPriceLookup`; the static
// table below is filled from configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{MetalType, MetalUnit};

/// Source of current precious-metal prices
pub trait MetalPriceLookup {
    /// Price for one `unit` of `metal`, or None when unknown
    fn price_per_unit(&self, metal: MetalType, unit: MetalUnit) -> Option<f64>;
}

/// Fixed per-gram price table, converted to the requested unit on lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMetalPrices {
    /// Price of one gram of gold
    pub gold: Option<f64>,
    /// Price of one gram of silver
    pub silver: Option<f64>,
}

/// Placeholder prices per gram used when configuration sets none
pub const PLACEHOLDER_GOLD_PER_GRAM: f64 = 6000.0;
pub const PLACEHOLDER_SILVER_PER_GRAM: f64 = 75.0;

impl Default for StaticMetalPrices {
    fn default() -> Self {
        Self {
            gold: Some(PLACEHOLDER_GOLD_PER_GRAM),
            silver: Some(PLACEHOLDER_SILVER_PER_GRAM),
        }
    }
}

impl StaticMetalPrices {
    pub fn per_gram(gold: f64, silver: f64) -> Self {
        Self {
            gold: Some(gold),
            silver: Some(silver),
        }
    }

    /// A table with no prices; every lookup misses
    pub fn empty() -> Self {
        Self {
            gold: None,
            silver: None,
        }
    }
}

impl MetalPriceLookup for StaticMetalPrices {
    fn price_per_unit(&self, metal: MetalType, unit: MetalUnit) -> Option<f64> {
        let per_gram = match metal {
            MetalType::Gold => self.gold,
            MetalType::Silver => self.silver,
        }?;
        let price = per_gram * unit.grams();
        debug!(
            "Static price for {} per {}: {}",
            metal.as_str(),
            unit.as_str(),
            price
        );
        Some(price)
    }
}
