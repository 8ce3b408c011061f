//! Per-investment and portfolio-level return metrics.
//!
//! A zero cost basis reports an ROI of 0 instead of an undefined value.
//! This keeps dashboards free of NaN, but it also hides a real "free
//! position" case, so callers that care must check `initial_value` themselves.

use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::transactions::ratio_or_zero;
use crate::records::Investment;

/// Signed difference between current and initial value
pub fn gain_loss(investment: &Investment) -> f64 {
    investment.current_value - investment.initial_value
}

/// Return on investment as a fraction (0.2 = 20%)
pub fn roi(investment: &Investment) -> f64 {
    ratio_or_zero(gain_loss(investment), investment.initial_value)
}

pub fn total_portfolio_value(investments: &[Investment]) -> f64 {
    investments.iter().map(|i| i.current_value).sum()
}

pub fn total_invested(investments: &[Investment]) -> f64 {
    investments.iter().map(|i| i.initial_value).sum()
}

pub fn total_gain_loss(investments: &[Investment]) -> f64 {
    investments.iter().map(gain_loss).sum()
}

pub fn overall_roi(investments: &[Investment]) -> f64 {
    ratio_or_zero(total_gain_loss(investments), total_invested(investments))
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Largest current value first; equal values keep input order
pub fn sort_by_value(investments: &[Investment]) -> Vec<&Investment> {
    investments
        .iter()
        .sorted_by(|a, b| descending(a.current_value, b.current_value))
        .collect()
}

/// Best ROI first; equal ROI keeps input order
pub fn sort_by_roi(investments: &[Investment]) -> Vec<&Investment> {
    investments
        .iter()
        .sorted_by(|a, b| descending(roi(a), roi(b)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAllocation {
    pub count: usize,
    pub value: f64,
    /// Fraction of the total current value
    pub share: f64,
}

/// Count, value and share of current value per investment type tag
pub fn allocation_by_type(investments: &[Investment]) -> BTreeMap<String, TypeAllocation> {
    let total = total_portfolio_value(investments);
    let mut allocation: BTreeMap<String, TypeAllocation> = BTreeMap::new();

    for inv in investments {
        let entry = allocation
            .entry(inv.investment_type.as_str().to_string())
            .or_insert(TypeAllocation {
                count: 0,
                value: 0.0,
                share: 0.0,
            });
        entry.count += 1;
        entry.value += inv.current_value;
    }

    for entry in allocation.values_mut() {
        entry.share = ratio_or_zero(entry.value, total);
    }

    allocation
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSummary {
    pub count: usize,
    pub total_invested: f64,
    pub total_value: f64,
    pub total_gain_loss: f64,
    pub overall_roi: f64,
}

pub fn summarize(investments: &[Investment]) -> InvestmentSummary {
    InvestmentSummary {
        count: investments.len(),
        total_invested: total_invested(investments),
        total_value: total_portfolio_value(investments),
        total_gain_loss: total_gain_loss(investments),
        overall_roi: overall_roi(investments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::InvestmentType;
    use chrono::NaiveDate;

    fn inv(id: &str, kind: InvestmentType, initial: f64, current: f64) -> Investment {
        Investment {
            id: id.to_string(),
            name: id.to_uppercase(),
            investment_type: kind,
            initial_value: initial,
            current_value: current,
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_gain_and_roi() {
        let i = inv("a", InvestmentType::Stocks, 1000.0, 1200.0);
        assert_eq!(gain_loss(&i), 200.0);
        assert_eq!(roi(&i), 0.2);

        let loss = inv("b", InvestmentType::Crypto, 500.0, 250.0);
        assert_eq!(gain_loss(&loss), -250.0);
        assert_eq!(roi(&loss), -0.5);
    }

    #[test]
    fn test_zero_basis_roi_is_zero() {
        let gifted = inv("gift", InvestmentType::Other, 0.0, 300.0);
        assert_eq!(gain_loss(&gifted), 300.0);
        assert_eq!(roi(&gifted), 0.0);
    }

    #[test]
    fn test_empty_portfolio() {
        let empty: Vec<Investment> = vec![];
        assert_eq!(total_portfolio_value(&empty), 0.0);
        assert_eq!(total_gain_loss(&empty), 0.0);
        assert_eq!(overall_roi(&empty), 0.0);
        assert!(allocation_by_type(&empty).is_empty());
    }

    #[test]
    fn test_portfolio_totals() {
        let invs = vec![
            inv("a", InvestmentType::Stocks, 1000.0, 1200.0),
            inv("b", InvestmentType::Stocks, 500.0, 400.0),
            inv("c", InvestmentType::Etf, 500.0, 900.0),
        ];
        assert_eq!(total_portfolio_value(&invs), 2500.0);
        assert_eq!(total_gain_loss(&invs), 500.0);
        assert_eq!(overall_roi(&invs), 0.25);

        let summary = summarize(&invs);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_invested, 2000.0);
    }

    #[test]
    fn test_sorting_is_stable() {
        let invs = vec![
            inv("a", InvestmentType::Stocks, 100.0, 200.0),
            inv("b", InvestmentType::Stocks, 200.0, 400.0),
            inv("c", InvestmentType::Bonds, 400.0, 400.0),
            inv("d", InvestmentType::Crypto, 0.0, 50.0),
        ];

        let by_value: Vec<&str> = sort_by_value(&invs).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(by_value, vec!["b", "c", "a", "d"]);

        // a and b both at 100%, c and d both at 0%
        let by_roi: Vec<&str> = sort_by_roi(&invs).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(by_roi, vec!["a", "b", "c", "d"]);

        // input untouched
        assert_eq!(invs[0].id, "a");
    }

    #[test]
    fn test_allocation_by_type() {
        let invs = vec![
            inv("a", InvestmentType::MutualFunds, 100.0, 300.0),
            inv("b", InvestmentType::MutualFunds, 100.0, 100.0),
            inv("c", InvestmentType::RealEstate, 100.0, 600.0),
        ];
        let allocation = allocation_by_type(&invs);
        let funds = &allocation["mutual_funds"];
        assert_eq!(funds.count, 2);
        assert_eq!(funds.value, 400.0);
        assert_eq!(funds.share, 0.4);
        assert_eq!(allocation["real_estate"].share, 0.6);
    }
}
