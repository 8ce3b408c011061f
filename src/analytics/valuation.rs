use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::growth::{maturity_value, portfolio_projection, Projection};
use super::transactions::ratio_or_zero;
use crate::pricing::MetalPriceLookup;
use crate::records::{FixedDeposit, Investment, PreciousMetal, ProvidentFund};

pub const FIXED_DEPOSIT_TAG: &str = "fixed_deposit";
pub const PROVIDENT_FUND_TAG: &str = "provident_fund";
pub const PRECIOUS_METAL_TAG: &str = "precious_metal";

/// Combined value of every asset class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioValuation {
    /// Sum of investment current values
    pub investments: f64,
    /// Sum of deposit maturity values
    pub fixed_deposits: f64,
    /// Sum of fund balances (present value)
    pub provident_funds: f64,
    /// Sum of metal cost basis
    pub precious_metals: f64,
    pub total: f64,
    /// Item count per asset-type tag
    pub counts: BTreeMap<String, usize>,
    /// Value per asset-type tag
    pub values: BTreeMap<String, f64>,
}

impl PortfolioValuation {
    /// Fraction of the total held under `tag`
    pub fn share(&self, tag: &str) -> f64 {
        ratio_or_zero(self.values.get(tag).copied().unwrap_or(0.0), self.total)
    }

    pub fn projection(&self, annual_rate_percent: f64) -> Vec<Projection> {
        portfolio_projection(self.total, annual_rate_percent)
    }
}

/// Value of a metal holding at its purchase price
pub fn metal_cost_basis(metal: &PreciousMetal) -> f64 {
    metal.quantity * metal.purchase_price_per_unit
}

/// Value of a metal holding at the current price, when one is known
pub fn metal_market_value(metal: &PreciousMetal, prices: &dyn MetalPriceLookup) -> Option<f64> {
    prices
        .price_per_unit(metal.metal_type, metal.unit)
        .map(|price| metal.quantity * price)
}

pub fn metal_gain_loss(metal: &PreciousMetal, prices: &dyn MetalPriceLookup) -> Option<f64> {
    metal_market_value(metal, prices).map(|value| value - metal_cost_basis(metal))
}

/// Current market value of all metals; holdings without a price count at cost
pub fn total_metal_market_value(metals: &[PreciousMetal], prices: &dyn MetalPriceLookup) -> f64 {
    metals
        .iter()
        .map(|m| metal_market_value(m, prices).unwrap_or_else(|| metal_cost_basis(m)))
        .sum()
}

fn add_to_breakdown(
    counts: &mut BTreeMap<String, usize>,
    values: &mut BTreeMap<String, f64>,
    tag: &str,
    value: f64,
) {
    *counts.entry(tag.to_string()).or_insert(0) += 1;
    *values.entry(tag.to_string()).or_insert(0.0) += value;
}

/// Value investments, deposits, funds and metals as one portfolio
pub fn value_portfolio(
    investments: &[Investment],
    deposits: &[FixedDeposit],
    funds: &[ProvidentFund],
    metals: &[PreciousMetal],
) -> PortfolioValuation {
    let mut counts = BTreeMap::new();
    let mut values = BTreeMap::new();

    let mut investments_total = 0.0;
    for inv in investments {
        investments_total += inv.current_value;
        add_to_breakdown(
            &mut counts,
            &mut values,
            inv.investment_type.as_str(),
            inv.current_value,
        );
    }

    let mut deposits_total = 0.0;
    for fd in deposits {
        let value = maturity_value(fd);
        deposits_total += value;
        add_to_breakdown(&mut counts, &mut values, FIXED_DEPOSIT_TAG, value);
    }

    let mut funds_total = 0.0;
    for pf in funds {
        funds_total += pf.current_balance;
        add_to_breakdown(&mut counts, &mut values, PROVIDENT_FUND_TAG, pf.current_balance);
    }

    let mut metals_total = 0.0;
    for metal in metals {
        let value = metal_cost_basis(metal);
        metals_total += value;
        add_to_breakdown(&mut counts, &mut values, PRECIOUS_METAL_TAG, value);
    }

    let total = investments_total + deposits_total + funds_total + metals_total;
    debug!(
        "Valued portfolio: investments={} deposits={} funds={} metals={} total={}",
        investments_total, deposits_total, funds_total, metals_total, total
    );

    PortfolioValuation {
        investments: investments_total,
        fixed_deposits: deposits_total,
        provident_funds: funds_total,
        precious_metals: metals_total,
        total,
        counts,
        values,
    }
}

/// Title-case a snake_case tag for display ("fixed_deposit" -> "Fixed Deposit")
pub fn display_label(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
