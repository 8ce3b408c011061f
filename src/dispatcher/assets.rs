use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::info;

use super::Context;
use crate::analytics::{growth, investments, timeframe, valuation, TimeFrame};
use crate::cli::formatters;
use crate::cli::SortKey;
use crate::records::{Investment, InvestmentType};

pub fn dispatch_investments(
    ctx: &Context,
    sort: SortKey,
    investment_type: Option<&str>,
    period: &TimeFrame,
) -> Result<()> {
    let filter = investment_type
        .map(|raw| {
            raw.parse::<InvestmentType>()
                .map_err(|_| anyhow!("Invalid investment type: {}", raw))
        })
        .transpose()?;

    let selected: Vec<Investment> =
        timeframe::filter_by_timeframe(&ctx.snapshot.investments, period, ctx.today)
            .into_iter()
            .filter(|inv| filter.map_or(true, |t| inv.investment_type == t))
            .cloned()
            .collect();
    info!(
        "{} of {} investments purchased in {}",
        selected.len(),
        ctx.snapshot.investments.len(),
        period
    );

    let ordered = match sort {
        SortKey::Value => investments::sort_by_value(&selected),
        SortKey::Roi => investments::sort_by_roi(&selected),
    };
    let summary = investments::summarize(&selected);
    let allocation = investments::allocation_by_type(&selected);

    if ctx.json {
        let holdings: Vec<_> = ordered
            .iter()
            .map(|inv| {
                json!({
                    "id": inv.id,
                    "name": inv.name,
                    "type": inv.investment_type,
                    "initial_value": inv.initial_value,
                    "current_value": inv.current_value,
                    "gain_loss": investments::gain_loss(inv),
                    "roi": investments::roi(inv),
                    "purchase_date": inv.purchase_date,
                })
            })
            .collect();
        let payload = json!({
            "holdings": holdings,
            "allocation": allocation,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!(
        "{}",
        formatters::format_investments(&ordered, &summary, &allocation, ctx.symbol())
    );
    Ok(())
}

pub fn dispatch_deposits(ctx: &Context) -> Result<()> {
    let deposits = &ctx.snapshot.fixed_deposits;

    if ctx.json {
        let rows: Vec<_> = deposits
            .iter()
            .map(|fd| {
                json!({
                    "id": fd.id,
                    "name": fd.name,
                    "principal_amount": fd.principal_amount,
                    "interest_rate": fd.interest_rate,
                    "start_date": fd.start_date,
                    "maturity_date": fd.maturity_date,
                    "years": growth::deposit_years(fd),
                    "maturity_value": growth::maturity_value(fd),
                    "interest_earned": growth::interest_earned(fd),
                    "days_to_maturity": growth::days_to_maturity(fd, ctx.today),
                    "matured": growth::is_matured(fd, ctx.today),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!(
        "{}",
        formatters::format_deposits(deposits, ctx.today, ctx.symbol())
    );
    Ok(())
}

pub fn dispatch_funds(ctx: &Context) -> Result<()> {
    let funds = &ctx.snapshot.provident_funds;

    if ctx.json {
        let rows: Vec<_> = funds
            .iter()
            .map(|pf| {
                json!({
                    "id": pf.id,
                    "name": pf.name,
                    "current_balance": pf.current_balance,
                    "interest_rate": pf.interest_rate,
                    "projection": growth::fund_projection(pf),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", formatters::format_funds(funds, ctx.symbol()));
    Ok(())
}

pub fn dispatch_metals(ctx: &Context) -> Result<()> {
    let metals = &ctx.snapshot.precious_metals;
    let prices = &ctx.config.metal_prices;

    if ctx.json {
        let rows: Vec<_> = metals
            .iter()
            .map(|m| {
                json!({
                    "id": m.id,
                    "type": m.metal_type,
                    "quantity": m.quantity,
                    "unit": m.unit,
                    "purchase_date": m.purchase_date,
                    "cost_basis": valuation::metal_cost_basis(m),
                    "market_value": valuation::metal_market_value(m, prices),
                    "gain_loss": valuation::metal_gain_loss(m, prices),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", formatters::format_metals(metals, prices, ctx.symbol()));
    Ok(())
}

pub fn dispatch_insurance(ctx: &Context) -> Result<()> {
    let policies = &ctx.snapshot.insurance;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(policies)?);
        return Ok(());
    }

    print!("{}", formatters::format_insurance(policies, ctx.symbol()));
    Ok(())
}

pub fn dispatch_portfolio(ctx: &Context, rate: Option<f64>) -> Result<()> {
    let rate = rate.unwrap_or(ctx.config.portfolio_growth_rate);
    if !rate.is_finite() || rate <= -100.0 {
        return Err(anyhow!(
            "Invalid growth rate: {} (must be a percentage above -100)",
            rate
        ));
    }

    let snapshot = &ctx.snapshot;
    let portfolio = valuation::value_portfolio(
        &snapshot.investments,
        &snapshot.fixed_deposits,
        &snapshot.provident_funds,
        &snapshot.precious_metals,
    );
    let projection = portfolio.projection(rate);
    info!("Portfolio total {:.2} projected at {}%", portfolio.total, rate);

    if ctx.json {
        let payload = json!({
            "valuation": portfolio,
            "growth_rate": rate,
            "projection": projection,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!(
        "{}",
        formatters::format_portfolio(&portfolio, &projection, rate, ctx.symbol())
    );
    Ok(())
}
