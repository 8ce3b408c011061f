// Records module - record models and the snapshot loader (record source)

pub mod amount;
pub mod csv_import;
pub mod models;
pub mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::FinanceError;
pub use csv_import::import_transactions_csv;
pub use models::{
    FixedDeposit, Insurance, Investment, InvestmentType, MetalType, MetalUnit, PreciousMetal,
    ProvidentFund, Transaction, TransactionType,
};
pub use validation::{validate_snapshot, ValidationIssue};

/// Every record collection exported from the backend for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default, alias = "fixedDeposits")]
    pub fixed_deposits: Vec<FixedDeposit>,
    #[serde(default, alias = "providentFunds")]
    pub provident_funds: Vec<ProvidentFund>,
    #[serde(default, alias = "preciousMetals")]
    pub precious_metals: Vec<PreciousMetal>,
    #[serde(default)]
    pub insurance: Vec<Insurance>,
}

impl Snapshot {
    pub fn record_count(&self) -> usize {
        self.transactions.len()
            + self.investments.len()
            + self.fixed_deposits.len()
            + self.provident_funds.len()
            + self.precious_metals.len()
            + self.insurance.len()
    }
}

/// Parse a JSON snapshot from a string
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_str(json).context("Failed to parse snapshot JSON")?;
    Ok(snapshot)
}

/// Load records from a data file.
///
/// `.csv` files are read as a transactions-only export, anything else is
/// parsed as a JSON snapshot.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    info!("Loading records from: {:?}", path);

    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let snapshot = if is_csv {
        Snapshot {
            transactions: import_transactions_csv(path)?,
            ..Default::default()
        }
    } else {
        let content = std::fs::read_to_string(path)
            .map_err(FinanceError::from)
            .with_context(|| format!("Failed to read data file {:?}", path))?;
        parse_snapshot(&content).with_context(|| format!("Invalid data file {:?}", path))?
    };

    info!("Loaded {} records", snapshot.record_count());
    Ok(snapshot)
}

/// Load records and run validation.
///
/// Issues are logged; with `strict` set, any issue fails the load.
pub fn load_validated_snapshot<P: AsRef<Path>>(path: P, strict: bool) -> Result<Snapshot> {
    let snapshot = load_snapshot(path)?;
    let issues = validate_snapshot(&snapshot);

    for issue in &issues {
        warn!("{}", issue);
    }

    if strict && !issues.is_empty() {
        let listed: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        return Err(FinanceError::Validation(format!(
            "{} invalid record field(s):\n  {}",
            issues.len(),
            listed.join("\n  ")
        ))
        .into());
    }

    Ok(snapshot)
}
