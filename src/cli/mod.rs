use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analytics::TimeFrame;

pub mod formatters;

#[derive(Parser)]
#[command(name = "finboard")]
#[command(version, about = "Personal finance dashboard for the terminal")]
#[command(
    long_about = "Summarise income and expenses, investments, fixed deposits, provident funds and precious metals from an exported records file. Amounts are computed on demand; nothing is written back."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Records file (JSON snapshot or transactions CSV)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (defaults to <config dir>/finboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date for relative periods (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Fail when any record is invalid instead of warning
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Overview: cash flow for the period plus total assets and projections
    Summary {
        /// Period: month, quarter, year, all, YYYY, or FROM:TO
        #[arg(short, long, default_value = "all")]
        period: TimeFrame,
    },

    /// Income and expense breakdown by category
    Transactions {
        /// Period: month, quarter, year, all, YYYY, or FROM:TO
        #[arg(short, long, default_value = "all")]
        period: TimeFrame,

        /// Only show one direction (income or expense)
        #[arg(short = 't', long = "type")]
        tx_type: Option<String>,
    },

    /// Month-by-month income, expenses and savings
    Cashflow {
        /// Period: month, quarter, year, all, YYYY, or FROM:TO
        #[arg(short, long, default_value = "all")]
        period: TimeFrame,
    },

    /// Investment holdings with gain/loss and ROI
    Investments {
        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortKey::Value)]
        sort: SortKey,

        /// Filter by investment type (stocks, mutual_funds, real_estate, crypto, bonds, etf, other)
        #[arg(short = 't', long = "type")]
        investment_type: Option<String>,

        /// Only holdings purchased in this period (month, quarter, year, all, YYYY, or FROM:TO)
        #[arg(short, long, default_value = "all")]
        period: TimeFrame,
    },

    /// Fixed deposits with maturity values
    Deposits,

    /// Provident funds with 1/5/10 year projections
    Funds,

    /// Precious metal holdings at cost and at current prices
    Metals,

    /// Insurance policies
    Insurance,

    /// Combined portfolio across all asset classes
    Portfolio {
        /// Annual growth rate (percent) for projections; defaults to config
        #[arg(long)]
        rate: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Current value, largest first
    Value,
    /// Return on investment, best first
    Roi,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_period_and_globals() {
        let cli = Cli::try_parse_from([
            "finboard",
            "--today",
            "2024-05-20",
            "transactions",
            "--period",
            "quarter",
            "--type",
            "expense",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 5, 20));
        match cli.command {
            Commands::Transactions { period, tx_type } => {
                assert_eq!(period, TimeFrame::ThisQuarter);
                assert_eq!(tx_type.as_deref(), Some("expense"));
            }
            _ => panic!("expected transactions command"),
        }
    }

    #[test]
    fn test_invalid_period_rejected() {
        assert!(Cli::try_parse_from(["finboard", "summary", "--period", "soon"]).is_err());
    }

    #[test]
    fn test_investments_sort_flag() {
        let cli = Cli::try_parse_from(["finboard", "investments", "--sort", "roi"]).unwrap();
        match cli.command {
            Commands::Investments { sort, period, .. } => {
                assert_eq!(sort, SortKey::Roi);
                assert_eq!(period, TimeFrame::AllTime);
            }
            _ => panic!("expected investments command"),
        }

        let cli = Cli::try_parse_from(["finboard", "investments", "-p", "2022"]).unwrap();
        match cli.command {
            Commands::Investments { period, .. } => assert_eq!(
                period,
                TimeFrame::Custom {
                    from: NaiveDate::from_ymd_opt(2022, 1, 1),
                    to: NaiveDate::from_ymd_opt(2022, 12, 31),
                }
            ),
            _ => panic!("expected investments command"),
        }
    }
}
