use anyhow::{anyhow, Result};
use tracing::info;

use super::Context;
use crate::analytics::{self, timeframe, transactions, TimeFrame};
use crate::cli::formatters;
use crate::records::TransactionType;

pub fn dispatch_summary(ctx: &Context, period: &TimeFrame) -> Result<()> {
    info!("Building dashboard for {}", period);
    let rate = ctx.config.portfolio_growth_rate;
    let dashboard = analytics::build_dashboard(&ctx.snapshot, period, ctx.today, rate);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    print!("{}", formatters::format_dashboard(&dashboard, rate, ctx.symbol()));
    Ok(())
}

pub fn dispatch_transactions(
    ctx: &Context,
    period: &TimeFrame,
    tx_type: Option<&str>,
) -> Result<()> {
    let only = tx_type
        .map(|raw| {
            raw.parse::<TransactionType>()
                .map_err(|_| anyhow!("Invalid transaction type: {} (use income or expense)", raw))
        })
        .transpose()?;

    let windowed = timeframe::select(&ctx.snapshot.transactions, period, ctx.today);
    info!(
        "{} of {} transactions fall in {}",
        windowed.len(),
        ctx.snapshot.transactions.len(),
        period
    );

    let directions: Vec<TransactionType> = match only {
        Some(t) => vec![t],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };

    if ctx.json {
        let mut payload = serde_json::json!({
            "period": period.label(),
            "summary": transactions::summarize(&windowed),
        });
        for t in &directions {
            payload[t.as_str()] =
                serde_json::to_value(transactions::category_breakdown(&windowed, *t))?;
        }
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for t in &directions {
        let (title, total) = match t {
            TransactionType::Income => {
                ("Income by category", transactions::total_income(&windowed))
            }
            TransactionType::Expense => {
                ("Expenses by category", transactions::total_expenses(&windowed))
            }
        };
        let breakdown = transactions::category_breakdown(&windowed, *t);
        print!(
            "{}",
            formatters::format_category_breakdown(
                &format!("{} ({})", title, period),
                &breakdown,
                total,
                ctx.symbol()
            )
        );
    }

    if only.is_none() {
        print!(
            "{}",
            formatters::format_transaction_summary(
                &transactions::summarize(&windowed),
                ctx.symbol()
            )
        );
    }
    Ok(())
}

pub fn dispatch_cashflow(ctx: &Context, period: &TimeFrame) -> Result<()> {
    let windowed = timeframe::select(&ctx.snapshot.transactions, period, ctx.today);
    let months = transactions::monthly_totals(&windowed);

    if ctx.json {
        let payload = serde_json::json!({
            "period": period.label(),
            "months": months,
            "summary": transactions::summarize(&windowed),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!(
        "{}",
        formatters::format_monthly(&months, &period.label(), ctx.symbol())
    );
    if !months.is_empty() {
        print!(
            "{}",
            formatters::format_transaction_summary(
                &transactions::summarize(&windowed),
                ctx.symbol()
            )
        );
    }
    Ok(())
}
