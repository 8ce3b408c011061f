//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use chrono::NaiveDate;
use colored::Colorize;
use std::collections::BTreeMap;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::analytics::growth::{self, Projection};
use crate::analytics::investments::{self, InvestmentSummary, TypeAllocation};
use crate::analytics::transactions::{CategoryShare, MonthlyTotals, TransactionSummary};
use crate::analytics::valuation::{self, display_label, PortfolioValuation};
use crate::analytics::Dashboard;
use crate::pricing::MetalPriceLookup;
use crate::records::{FixedDeposit, Insurance, Investment, PreciousMetal, ProvidentFund};
use crate::utils::{format_currency, format_percent, format_quantity, format_rate};

/// Green for gains, red for losses
fn signed(value: f64, text: String) -> String {
    if value >= 0.0 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

fn section(title: &str) -> String {
    format!("\n{}\n\n", title.cyan().bold())
}

fn summary_line(label: &str, value: String) -> String {
    format!("\n{:<22} {}", format!("{}:", label).bold(), value)
}

fn render<T: Tabled>(rows: &[T], right_from: usize) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(right_from..)).with(Alignment::right()))
        .to_string()
}

fn projection_lines(projection: &[Projection], symbol: &str) -> String {
    projection
        .iter()
        .map(|p| summary_line(&format!("In {} years", p.years), format_currency(p.value, symbol)))
        .collect()
}

/// Format "nothing to show" message
pub fn format_empty(what: &str) -> String {
    format!("{} No {} found\n", "ℹ".blue().bold(), what)
}

pub fn format_dashboard(dashboard: &Dashboard, growth_rate: f64, symbol: &str) -> String {
    let mut output = section(&format!("Overview ({})", dashboard.period));

    let cash = &dashboard.cash_flow;
    output.push_str(&summary_line(
        "Income",
        format_currency(cash.income, symbol).green().to_string(),
    ));
    output.push_str(&summary_line(
        "Expenses",
        format_currency(cash.expenses, symbol).red().to_string(),
    ));
    output.push_str(&summary_line(
        "Savings",
        signed(cash.savings, format_currency(cash.savings, symbol)),
    ));
    output.push_str(&summary_line(
        "Savings rate",
        signed(cash.savings_rate, format_percent(cash.savings_rate)),
    ));
    output.push_str(&summary_line("Transactions", cash.count.to_string()));

    let inv = &dashboard.investments;
    output.push_str(&format!("\n\n{}", "Assets".bold()));
    output.push_str(&summary_line(
        "Investment gain/loss",
        signed(
            inv.total_gain_loss,
            format!(
                "{} ({})",
                format_currency(inv.total_gain_loss, symbol),
                format_percent(inv.overall_roi)
            ),
        ),
    ));
    output.push_str(&summary_line(
        "Total assets",
        format_currency(dashboard.valuation.total, symbol).cyan().to_string(),
    ));

    output.push_str(&format!(
        "\n\n{} at {} a year",
        "Projected assets".bold(),
        format_rate(growth_rate)
    ));
    output.push_str(&projection_lines(&dashboard.projection, symbol));
    output.push('\n');
    output
}

pub fn format_category_breakdown(
    title: &str,
    categories: &[CategoryShare],
    total: f64,
    symbol: &str,
) -> String {
    #[derive(Tabled)]
    struct CategoryRow {
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Total")]
        total: String,
        #[tabled(rename = "Share")]
        share: String,
    }

    let mut output = section(title);
    if categories.is_empty() {
        output.push_str(&format_empty("transactions"));
        return output;
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            category: c.category.clone(),
            total: format_currency(c.total, symbol),
            share: format_percent(c.share),
        })
        .collect();

    output.push_str(&render(&rows, 1));
    output.push_str(&summary_line("Total", format_currency(total, symbol)));
    output.push('\n');
    output
}

pub fn format_transaction_summary(summary: &TransactionSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&summary_line(
        "Savings",
        signed(summary.savings, format_currency(summary.savings, symbol)),
    ));
    output.push_str(&summary_line(
        "Savings rate",
        signed(summary.savings_rate, format_percent(summary.savings_rate)),
    ));
    output.push('\n');
    output
}

pub fn format_monthly(months: &[MonthlyTotals], period: &str, symbol: &str) -> String {
    #[derive(Tabled)]
    struct MonthRow {
        #[tabled(rename = "Month")]
        month: String,
        #[tabled(rename = "Income")]
        income: String,
        #[tabled(rename = "Expenses")]
        expenses: String,
        #[tabled(rename = "Savings")]
        savings: String,
    }

    let mut output = section(&format!("Cash flow ({})", period));
    if months.is_empty() {
        output.push_str(&format_empty("transactions"));
        return output;
    }

    let rows: Vec<MonthRow> = months
        .iter()
        .map(|m| MonthRow {
            month: format!("{}-{:02}", m.year, m.month),
            income: format_currency(m.income, symbol),
            expenses: format_currency(m.expenses, symbol),
            savings: signed(m.savings, format_currency(m.savings, symbol)),
        })
        .collect();

    output.push_str(&render(&rows, 1));
    output.push('\n');
    output
}

pub fn format_investments(
    holdings: &[&Investment],
    summary: &InvestmentSummary,
    allocation: &BTreeMap<String, TypeAllocation>,
    symbol: &str,
) -> String {
    #[derive(Tabled)]
    struct InvestmentRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Type")]
        investment_type: String,
        #[tabled(rename = "Invested")]
        invested: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Gain/Loss")]
        gain_loss: String,
        #[tabled(rename = "ROI")]
        roi: String,
    }

    let mut output = section("Investments");
    if holdings.is_empty() {
        output.push_str(&format_empty("investments"));
        return output;
    }

    let rows: Vec<InvestmentRow> = holdings
        .iter()
        .map(|inv| {
            let gain = investments::gain_loss(inv);
            let roi = investments::roi(inv);
            InvestmentRow {
                name: inv.name.clone(),
                investment_type: display_label(inv.investment_type.as_str()),
                invested: format_currency(inv.initial_value, symbol),
                value: format_currency(inv.current_value, symbol),
                gain_loss: signed(gain, format_currency(gain, symbol)),
                roi: signed(roi, format_percent(roi)),
            }
        })
        .collect();
    output.push_str(&render(&rows, 2));

    #[derive(Tabled)]
    struct AllocationRow {
        #[tabled(rename = "Type")]
        label: String,
        #[tabled(rename = "Holdings")]
        count: usize,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Allocation")]
        share: String,
    }

    let allocation_rows: Vec<AllocationRow> = allocation
        .iter()
        .map(|(tag, a)| AllocationRow {
            label: display_label(tag),
            count: a.count,
            value: format_currency(a.value, symbol),
            share: format_percent(a.share),
        })
        .collect();
    output.push_str("\n\n");
    output.push_str(&render(&allocation_rows, 1));

    output.push_str(&format!("\n\n{} Summary", "━".repeat(60).bright_black()));
    output.push_str(&summary_line(
        "Total invested",
        format_currency(summary.total_invested, symbol),
    ));
    output.push_str(&summary_line(
        "Current value",
        format_currency(summary.total_value, symbol),
    ));
    output.push_str(&summary_line(
        "Gain/Loss",
        signed(summary.total_gain_loss, format_currency(summary.total_gain_loss, symbol)),
    ));
    output.push_str(&summary_line(
        "Overall ROI",
        signed(summary.overall_roi, format_percent(summary.overall_roi)),
    ));
    output.push('\n');
    output
}

pub fn format_deposits(deposits: &[FixedDeposit], today: NaiveDate, symbol: &str) -> String {
    #[derive(Tabled)]
    struct DepositRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Bank")]
        bank: String,
        #[tabled(rename = "Principal")]
        principal: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "Term (yrs)")]
        years: String,
        #[tabled(rename = "Maturity")]
        maturity_date: String,
        #[tabled(rename = "Maturity Value")]
        maturity_value: String,
        #[tabled(rename = "Interest")]
        interest: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    let mut output = section("Fixed Deposits");
    if deposits.is_empty() {
        output.push_str(&format_empty("fixed deposits"));
        return output;
    }

    let rows: Vec<DepositRow> = deposits
        .iter()
        .map(|fd| {
            let status = if growth::is_matured(fd, today) {
                "Matured".yellow().to_string()
            } else {
                format!("{} days left", growth::days_to_maturity(fd, today))
            };
            DepositRow {
                name: fd.name.clone(),
                bank: fd.bank_name.clone().unwrap_or_else(|| "-".to_string()),
                principal: format_currency(fd.principal_amount, symbol),
                rate: format_rate(fd.interest_rate),
                years: format!("{:.2}", growth::deposit_years(fd)),
                maturity_date: fd.maturity_date.to_string(),
                maturity_value: format_currency(growth::maturity_value(fd), symbol),
                interest: format_currency(growth::interest_earned(fd), symbol).green().to_string(),
                status,
            }
        })
        .collect();
    output.push_str(&render(&rows, 2));

    let principal: f64 = deposits.iter().map(|fd| fd.principal_amount).sum();
    let maturity: f64 = deposits.iter().map(growth::maturity_value).sum();
    output.push_str(&summary_line("Total principal", format_currency(principal, symbol)));
    output.push_str(&summary_line("Total at maturity", format_currency(maturity, symbol)));
    output.push('\n');
    output
}

pub fn format_funds(funds: &[ProvidentFund], symbol: &str) -> String {
    #[derive(Tabled)]
    struct FundRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Balance")]
        balance: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "1 year")]
        one: String,
        #[tabled(rename = "5 years")]
        five: String,
        #[tabled(rename = "10 years")]
        ten: String,
    }

    let mut output = section("Provident Funds");
    if funds.is_empty() {
        output.push_str(&format_empty("provident funds"));
        return output;
    }

    let rows: Vec<FundRow> = funds
        .iter()
        .map(|pf| {
            let projection = growth::fund_projection(pf);
            let at = |i: usize| {
                projection
                    .get(i)
                    .map(|p| format_currency(p.value, symbol))
                    .unwrap_or_default()
            };
            FundRow {
                name: pf.name.clone(),
                balance: format_currency(pf.current_balance, symbol),
                rate: format_rate(pf.interest_rate),
                one: at(0),
                five: at(1),
                ten: at(2),
            }
        })
        .collect();
    output.push_str(&render(&rows, 1));

    let balance: f64 = funds.iter().map(|pf| pf.current_balance).sum();
    output.push_str(&summary_line("Total balance", format_currency(balance, symbol)));
    output.push('\n');
    output
}

pub fn format_metals(
    metals: &[PreciousMetal],
    prices: &dyn MetalPriceLookup,
    symbol: &str,
) -> String {
    #[derive(Tabled)]
    struct MetalRow {
        #[tabled(rename = "Metal")]
        metal: String,
        #[tabled(rename = "Quantity")]
        quantity: String,
        #[tabled(rename = "Bought")]
        purchase_date: String,
        #[tabled(rename = "Cost")]
        cost: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Gain/Loss")]
        gain_loss: String,
    }

    let mut output = section("Precious Metals");
    if metals.is_empty() {
        output.push_str(&format_empty("precious metals"));
        return output;
    }

    let rows: Vec<MetalRow> = metals
        .iter()
        .map(|m| {
            let value = valuation::metal_market_value(m, prices);
            let gain = valuation::metal_gain_loss(m, prices);
            MetalRow {
                metal: display_label(m.metal_type.as_str()),
                quantity: format!("{} {}", format_quantity(m.quantity), m.unit.as_str()),
                purchase_date: m.purchase_date.to_string(),
                cost: format_currency(valuation::metal_cost_basis(m), symbol),
                value: value
                    .map(|v| format_currency(v, symbol))
                    .unwrap_or_else(|| "N/A".to_string()),
                gain_loss: gain
                    .map(|g| signed(g, format_currency(g, symbol)))
                    .unwrap_or_else(|| "N/A".to_string()),
            }
        })
        .collect();
    output.push_str(&render(&rows, 1));

    let cost: f64 = metals.iter().map(valuation::metal_cost_basis).sum();
    let value = valuation::total_metal_market_value(metals, prices);
    let unpriced = metals
        .iter()
        .filter(|m| valuation::metal_market_value(m, prices).is_none())
        .count();
    output.push_str(&summary_line("Total cost", format_currency(cost, symbol)));
    output.push_str(&summary_line("Current value", format_currency(value, symbol)));
    output.push_str(&format!(
        "\n\n{} Current values use configured reference prices, not a live feed.",
        "ℹ".blue().bold()
    ));
    if unpriced > 0 {
        output.push_str(&format!(
            "\n{} {} holding(s) without a price are counted at cost in the current value.",
            "⚠".yellow().bold(),
            unpriced
        ));
    }
    output.push('\n');
    output
}

pub fn format_insurance(policies: &[Insurance], symbol: &str) -> String {
    #[derive(Tabled)]
    struct PolicyRow {
        #[tabled(rename = "Policy")]
        policy: String,
        #[tabled(rename = "Type")]
        policy_type: String,
        #[tabled(rename = "Provider")]
        provider: String,
        #[tabled(rename = "Premium")]
        premium: String,
        #[tabled(rename = "Coverage")]
        coverage: String,
        #[tabled(rename = "Ends")]
        end_date: String,
    }

    let mut output = section("Insurance Policies");
    if policies.is_empty() {
        output.push_str(&format_empty("insurance policies"));
        return output;
    }

    let rows: Vec<PolicyRow> = policies
        .iter()
        .map(|p| PolicyRow {
            policy: p.policy_name.clone(),
            policy_type: display_label(&p.policy_type),
            provider: p.provider.clone(),
            premium: match &p.premium_frequency {
                Some(freq) => format!("{} / {}", format_currency(p.premium_amount, symbol), freq),
                None => format_currency(p.premium_amount, symbol),
            },
            coverage: format_currency(p.coverage_amount, symbol),
            end_date: p
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    output.push_str(&render(&rows, 3));
    output.push('\n');
    output
}

pub fn format_portfolio(
    valuation: &PortfolioValuation,
    projection: &[Projection],
    growth_rate: f64,
    symbol: &str,
) -> String {
    #[derive(Tabled)]
    struct AssetRow {
        #[tabled(rename = "Asset Type")]
        label: String,
        #[tabled(rename = "Items")]
        count: usize,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Share")]
        share: String,
    }

    let mut output = section("Portfolio");
    if valuation.counts.is_empty() {
        output.push_str(&format_empty("assets"));
        return output;
    }

    let rows: Vec<AssetRow> = valuation
        .values
        .iter()
        .map(|(tag, value)| AssetRow {
            label: display_label(tag),
            count: valuation.counts.get(tag).copied().unwrap_or(0),
            value: format_currency(*value, symbol),
            share: format_percent(valuation.share(tag)),
        })
        .collect();
    output.push_str(&render(&rows, 1));

    output.push_str(&summary_line("Investments", format_currency(valuation.investments, symbol)));
    output.push_str(&summary_line(
        "Fixed deposits",
        format_currency(valuation.fixed_deposits, symbol),
    ));
    output.push_str(&summary_line(
        "Provident funds",
        format_currency(valuation.provident_funds, symbol),
    ));
    output.push_str(&summary_line(
        "Precious metals",
        format_currency(valuation.precious_metals, symbol),
    ));
    output.push_str(&summary_line(
        "Total",
        format_currency(valuation.total, symbol).cyan().bold().to_string(),
    ));

    output.push_str(&format!(
        "\n\n{} at {} a year",
        "Projected value".bold(),
        format_rate(growth_rate)
    ));
    output.push_str(&projection_lines(projection, symbol));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::StaticMetalPrices;
    use crate::records::{MetalType, MetalUnit};

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_empty_message() {
        no_color();
        let msg = format_empty("investments");
        assert!(msg.contains("No investments found"));
    }

    #[test]
    fn test_empty_collections_render_message() {
        no_color();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(format_deposits(&[], today, "$").contains("No fixed deposits found"));
        assert!(format_funds(&[], "$").contains("No provident funds found"));
        assert!(format_insurance(&[], "$").contains("No insurance policies found"));
    }

    #[test]
    fn test_metals_table_shows_cost_and_value() {
        no_color();
        let metals = vec![PreciousMetal {
            id: "m".into(),
            metal_type: MetalType::Silver,
            quantity: 2.0,
            unit: MetalUnit::Kg,
            purchase_price_per_unit: 50000.0,
            purchase_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            notes: None,
        }];
        let out = format_metals(&metals, &StaticMetalPrices::per_gram(60.0, 70.0), "$");
        assert!(out.contains("Silver"));
        assert!(out.contains("2 kg"));
        assert!(out.contains("$100,000.00"));
        assert!(out.contains("$140,000.00"));
        assert!(out.contains("$40,000.00"));
    }

    #[test]
    fn test_metals_without_price_note_cost_fallback() {
        no_color();
        let metals = vec![PreciousMetal {
            id: "g".into(),
            metal_type: MetalType::Gold,
            quantity: 10.0,
            unit: MetalUnit::Gram,
            purchase_price_per_unit: 5000.0,
            purchase_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            notes: None,
        }];

        let out = format_metals(&metals, &StaticMetalPrices::empty(), "$");
        assert!(out.contains("N/A"));
        assert!(out.contains("1 holding(s) without a price are counted at cost"));

        let priced = format_metals(&metals, &StaticMetalPrices::per_gram(6000.0, 75.0), "$");
        assert!(priced.contains("$60,000.00"));
        assert!(!priced.contains("without a price"));
    }

    #[test]
    fn test_portfolio_rows_use_display_labels() {
        no_color();
        let deposits = vec![FixedDeposit {
            id: "fd".into(),
            name: "FD".into(),
            principal_amount: 1000.0,
            interest_rate: 0.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            maturity_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            bank_name: None,
            notes: None,
        }];
        let valuation = valuation::value_portfolio(&[], &deposits, &[], &[]);
        let projection = valuation.projection(12.0);
        let out = format_portfolio(&valuation, &projection, 12.0, "$");
        assert!(out.contains("Fixed Deposit"));
        assert!(!out.contains("fixed_deposit"));
        assert!(out.contains("In 20 years"));
        assert!(out.contains("12.00%"));
    }
}
