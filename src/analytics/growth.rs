//! Compound growth projections.
//!
//! One formula, `principal × (1 + rate/100)^years`, drives fixed deposit
//! maturity values, provident fund horizons and the portfolio-wide
//! projection. Deposit terms use a flat 365-day year, leap days included as
//! ordinary days, so displayed maturity values match existing figures.

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{FixedDeposit, ProvidentFund};

/// Days per year for deposit terms
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Assumed annual growth for the portfolio-wide projection (percent)
pub const DEFAULT_PORTFOLIO_GROWTH_RATE: f64 = 12.0;

pub const FUND_HORIZONS: [u32; 3] = [1, 5, 10];
pub const PORTFOLIO_HORIZONS: [u32; 3] = [5, 10, 20];

/// Value of `principal` after compounding annually at `annual_rate_percent`
pub fn future_value(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    principal * (1.0 + annual_rate_percent / 100.0).powf(years)
}

/// Deposit term in years (days / 365)
pub fn deposit_years(deposit: &FixedDeposit) -> f64 {
    let days = (deposit.maturity_date - deposit.start_date).num_days();
    days as f64 / DAYS_PER_YEAR
}

pub fn maturity_value(deposit: &FixedDeposit) -> f64 {
    future_value(
        deposit.principal_amount,
        deposit.interest_rate,
        deposit_years(deposit),
    )
}

pub fn interest_earned(deposit: &FixedDeposit) -> f64 {
    maturity_value(deposit) - deposit.principal_amount
}

/// Days left until maturity; negative once the deposit has matured
pub fn days_to_maturity(deposit: &FixedDeposit, today: NaiveDate) -> i64 {
    (deposit.maturity_date - today).num_days()
}

pub fn is_matured(deposit: &FixedDeposit, today: NaiveDate) -> bool {
    today >= deposit.maturity_date
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub years: u32,
    pub value: f64,
}

/// Project `principal` at each horizon, in horizon order
pub fn project(principal: f64, annual_rate_percent: f64, horizons: &[u32]) -> Vec<Projection> {
    horizons
        .iter()
        .map(|&years| Projection {
            years,
            value: future_value(principal, annual_rate_percent, f64::from(years)),
        })
        .collect()
}

/// Provident fund balance after 1, 5 and 10 years
pub fn fund_projection(fund: &ProvidentFund) -> Vec<Projection> {
    project(fund.current_balance, fund.interest_rate, &FUND_HORIZONS)
}

/// Whole-portfolio value after 5, 10 and 20 years at a flat assumed rate
pub fn portfolio_projection(total_value: f64, annual_rate_percent: f64) -> Vec<Projection> {
    project(total_value, annual_rate_percent, &PORTFOLIO_HORIZONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn deposit(principal: f64, rate: f64, start: NaiveDate, maturity: NaiveDate) -> FixedDeposit {
        FixedDeposit {
            id: "fd".to_string(),
            name: "Term deposit".to_string(),
            principal_amount: principal,
            interest_rate: rate,
            start_date: start,
            maturity_date: maturity,
            bank_name: Some("Bank".to_string()),
            notes: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_future_value_basics() {
        assert_close(future_value(1000.0, 10.0, 1.0), 1100.0);
        assert_eq!(future_value(1000.0, 0.0, 5.0), 1000.0);
        assert_eq!(future_value(0.0, 10.0, 5.0), 0.0);
        assert_close(future_value(1000.0, 10.0, 2.0), 1210.0);
        assert_eq!(future_value(1000.0, 10.0, 0.0), 1000.0);
    }

    #[test]
    fn test_deposit_one_year() {
        let fd = deposit(10000.0, 8.0, date(2023, 1, 1), date(2024, 1, 1));
        assert_eq!(deposit_years(&fd), 1.0);
        assert_close(maturity_value(&fd), 10800.0);
        assert_close(interest_earned(&fd), 800.0);
    }

    #[test]
    fn test_deposit_ignores_leap_years() {
        // 2024 is a leap year: 366 days elapse, so slightly more than one year accrues
        let fd = deposit(10000.0, 8.0, date(2024, 1, 1), date(2025, 1, 1));
        assert_eq!(deposit_years(&fd), 366.0 / 365.0);
        assert!(maturity_value(&fd) > 10800.0);
    }

    #[test]
    fn test_deposit_same_day_maturity() {
        let fd = deposit(5000.0, 7.0, date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(maturity_value(&fd), 5000.0);
        assert_eq!(interest_earned(&fd), 0.0);
    }

    #[test]
    fn test_days_to_maturity() {
        let fd = deposit(1000.0, 5.0, date(2024, 1, 1), date(2024, 6, 30));
        assert_eq!(days_to_maturity(&fd, date(2024, 6, 20)), 10);
        assert!(!is_matured(&fd, date(2024, 6, 29)));
        assert!(is_matured(&fd, date(2024, 6, 30)));
        assert_eq!(days_to_maturity(&fd, date(2024, 7, 2)), -2);
    }

    #[test]
    fn test_fund_projection_horizons() {
        let fund = ProvidentFund {
            id: "pf".to_string(),
            name: "EPF".to_string(),
            current_balance: 100000.0,
            interest_rate: 8.25,
            start_date: date(2015, 4, 1),
            notes: None,
        };
        let projection = fund_projection(&fund);
        let years: Vec<u32> = projection.iter().map(|p| p.years).collect();
        assert_eq!(years, vec![1, 5, 10]);
        assert_close(projection[0].value, 108250.0);
        assert_close(projection[2].value, 100000.0 * 1.0825_f64.powi(10));
    }

    #[test]
    fn test_portfolio_projection_default_rate() {
        let projection = portfolio_projection(100000.0, DEFAULT_PORTFOLIO_GROWTH_RATE);
        let years: Vec<u32> = projection.iter().map(|p| p.years).collect();
        assert_eq!(years, vec![5, 10, 20]);
        assert_close(projection[0].value, 100000.0 * 1.12_f64.powi(5));
        assert_close(projection[2].value, 100000.0 * 1.12_f64.powi(20));
        assert!(portfolio_projection(0.0, 12.0).iter().all(|p| p.value == 0.0));
    }
}
