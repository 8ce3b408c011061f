// Analytics module - pure aggregation and projection over loaded records

pub mod growth;
pub mod investments;
pub mod timeframe;
pub mod transactions;
pub mod valuation;

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::Snapshot;
pub use growth::{future_value, maturity_value, Projection, DEFAULT_PORTFOLIO_GROWTH_RATE};
pub use investments::{roi, InvestmentSummary};
pub use timeframe::{filter_by_timeframe, Dated, TimeFrame};
pub use transactions::TransactionSummary;
pub use valuation::{display_label, value_portfolio, PortfolioValuation};

/// Headline figures for the dashboard overview
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub period: String,
    pub cash_flow: TransactionSummary,
    pub investments: InvestmentSummary,
    pub valuation: PortfolioValuation,
    pub projection: Vec<Projection>,
}

/// Build the overview: cash flow inside `frame`, holdings valued as a whole
///
/// Only transactions are windowed; asset holdings are always valued in full.
pub fn build_dashboard(
    snapshot: &Snapshot,
    frame: &TimeFrame,
    now: NaiveDate,
    growth_rate_percent: f64,
) -> Dashboard {
    let windowed = timeframe::select(&snapshot.transactions, frame, now);
    let valuation = value_portfolio(
        &snapshot.investments,
        &snapshot.fixed_deposits,
        &snapshot.provident_funds,
        &snapshot.precious_metals,
    );
    let projection = valuation.projection(growth_rate_percent);

    Dashboard {
        period: frame.label(),
        cash_flow: transactions::summarize(&windowed),
        investments: investments::summarize(&snapshot.investments),
        valuation,
        projection,
    }
}
