//! User configuration (`config.toml`)
//!
//! ```toml
//! currency_symbol = "₹"
//! portfolio_growth_rate = 12.0
//! data_file = "/home/me/finance/export.json"
//!
//! [metal_prices]   # price per gram
//! gold = 6000.0
//! silver = 75.0
//! ```
//!
//! Every key is optional. A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analytics::DEFAULT_PORTFOLIO_GROWTH_RATE;
use crate::error::FinanceError;
use crate::pricing::StaticMetalPrices;

pub const CONFIG_ENV: &str = "FINBOARD_CONFIG";
pub const DATA_ENV: &str = "FINBOARD_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// Assumed annual growth for whole-portfolio projections (percent)
    pub portfolio_growth_rate: f64,
    pub data_file: Option<PathBuf>,
    pub metal_prices: StaticMetalPrices,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            portfolio_growth_rate: DEFAULT_PORTFOLIO_GROWTH_RATE,
            data_file: None,
            metal_prices: StaticMetalPrices::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| FinanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FinanceError> {
        if !self.portfolio_growth_rate.is_finite() || self.portfolio_growth_rate <= -100.0 {
            return Err(FinanceError::Config(format!(
                "portfolio_growth_rate must be a finite percentage above -100 (got {})",
                self.portfolio_growth_rate
            )));
        }
        for (metal, price) in [
            ("gold", self.metal_prices.gold),
            ("silver", self.metal_prices.silver),
        ] {
            if let Some(p) = price {
                if !p.is_finite() || p < 0.0 {
                    return Err(FinanceError::Config(format!(
                        "metal_prices.{} must be a non-negative number (got {})",
                        metal, p
                    )));
                }
            }
        }
        Ok(())
    }

    /// Load from an explicit path; the file must exist
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(FinanceError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Resolve and load configuration.
    ///
    /// Order: explicit path, `$FINBOARD_CONFIG`, `<config_home>/finboard/config.toml`.
    /// Only the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load_file(path),
            other => {
                debug!("No config file at {:?}, using defaults", other);
                Ok(Self::default())
            }
        }
    }

    /// Resolve the records file: flag, `$FINBOARD_DATA`, then `data_file`
    pub fn resolve_data_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(DATA_ENV) {
            return Ok(PathBuf::from(path));
        }
        self.data_file.clone().ok_or_else(|| {
            FinanceError::Config(format!(
                "no data file given. Pass --data <file>, set {}, or set data_file in {}",
                DATA_ENV,
                default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string())
            ))
            .into()
        })
    }
}

/// `<config_home>/finboard/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("finboard").join("config.toml"))
}
