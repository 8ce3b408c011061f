//! Command dispatcher: loads configuration and records once, then routes the
//! parsed clap command to its handler.

mod assets;
mod transactions;

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::records::{self, Snapshot};

/// Everything a handler needs: loaded records plus output settings
pub struct Context {
    pub config: Config,
    pub snapshot: Snapshot,
    pub today: NaiveDate,
    pub json: bool,
}

impl Context {
    pub fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }
}

fn load_context(cli: &Cli) -> Result<Context> {
    let config = Config::load(cli.config.as_deref())?;
    let data_path: PathBuf = config.resolve_data_path(cli.data.as_deref())?;
    let snapshot = records::load_validated_snapshot(&data_path, cli.strict)?;
    info!(
        "Loaded {} records from {:?}",
        snapshot.record_count(),
        data_path
    );

    Ok(Context {
        config,
        snapshot,
        today: cli.today.unwrap_or_else(|| chrono::Local::now().date_naive()),
        json: cli.json,
    })
}

/// Route a parsed command to its handler
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = load_context(&cli)?;

    match cli.command {
        Commands::Summary { period } => transactions::dispatch_summary(&ctx, &period),
        Commands::Transactions { period, tx_type } => {
            transactions::dispatch_transactions(&ctx, &period, tx_type.as_deref())
        }
        Commands::Cashflow { period } => transactions::dispatch_cashflow(&ctx, &period),
        Commands::Investments {
            sort,
            investment_type,
            period,
        } => assets::dispatch_investments(&ctx, sort, investment_type.as_deref(), &period),
        Commands::Deposits => assets::dispatch_deposits(&ctx),
        Commands::Funds => assets::dispatch_funds(&ctx),
        Commands::Metals => assets::dispatch_metals(&ctx),
        Commands::Insurance => assets::dispatch_insurance(&ctx),
        Commands::Portfolio { rate } => assets::dispatch_portfolio(&ctx, rate),
    }
}
