use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount;
use crate::error::FinanceError;

/// Transaction direction (money in or money out)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "credit" => Ok(TransactionType::Income),
            "expense" | "out" | "debit" => Ok(TransactionType::Expense),
            other => Err(FinanceError::Parse(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

/// Investment classes tracked on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    Stocks,
    MutualFunds,
    RealEstate,
    Crypto,
    Bonds,
    Etf,
    Other,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Stocks => "stocks",
            InvestmentType::MutualFunds => "mutual_funds",
            InvestmentType::RealEstate => "real_estate",
            InvestmentType::Crypto => "crypto",
            InvestmentType::Bonds => "bonds",
            InvestmentType::Etf => "etf",
            InvestmentType::Other => "other",
        }
    }
}

impl FromStr for InvestmentType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "stocks" | "stock" | "equity" => Ok(InvestmentType::Stocks),
            "mutual_funds" | "mutual_fund" | "mf" => Ok(InvestmentType::MutualFunds),
            "real_estate" | "property" => Ok(InvestmentType::RealEstate),
            "crypto" | "cryptocurrency" => Ok(InvestmentType::Crypto),
            "bonds" | "bond" => Ok(InvestmentType::Bonds),
            "etf" | "etfs" => Ok(InvestmentType::Etf),
            "other" => Ok(InvestmentType::Other),
            other => Err(FinanceError::Parse(format!(
                "unknown investment type '{}'",
                other
            ))),
        }
    }
}

/// General investment holding (stocks, funds, property, crypto...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    #[serde(alias = "initialValue", deserialize_with = "amount::deserialize")]
    pub initial_value: f64,
    #[serde(alias = "currentValue", deserialize_with = "amount::deserialize")]
    pub current_value: f64,
    #[serde(alias = "purchaseDate")]
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Bank fixed deposit; maturity value is derived, never stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedDeposit {
    pub id: String,
    pub name: String,
    #[serde(alias = "principalAmount", deserialize_with = "amount::deserialize")]
    pub principal_amount: f64,
    /// Annual rate in percent (8.0 = 8%)
    #[serde(alias = "interestRate", deserialize_with = "amount::deserialize")]
    pub interest_rate: f64,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "maturityDate")]
    pub maturity_date: NaiveDate,
    #[serde(default, alias = "bankName")]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Provident / retirement fund account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProvidentFund {
    pub id: String,
    pub name: String,
    #[serde(alias = "currentBalance", deserialize_with = "amount::deserialize")]
    pub current_balance: f64,
    /// Annual rate in percent
    #[serde(alias = "interestRate", deserialize_with = "amount::deserialize")]
    pub interest_rate: f64,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    Gold,
    Silver,
}

impl MetalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalType::Gold => "gold",
            MetalType::Silver => "silver",
        }
    }
}

impl FromStr for MetalType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" | "au" => Ok(MetalType::Gold),
            "silver" | "ag" => Ok(MetalType::Silver),
            other => Err(FinanceError::Parse(format!("unknown metal '{}'", other))),
        }
    }
}

/// Unit a metal holding is quoted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetalUnit {
    Gram,
    Ounce,
    Kg,
}

impl MetalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalUnit::Gram => "gram",
            MetalUnit::Ounce => "ounce",
            MetalUnit::Kg => "kg",
        }
    }

    /// Grams in one unit (troy ounce for precious metals)
    pub fn grams(&self) -> f64 {
        match self {
            MetalUnit::Gram => 1.0,
            MetalUnit::Ounce => 31.103_476_8,
            MetalUnit::Kg => 1000.0,
        }
    }
}

impl FromStr for MetalUnit {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gram" | "grams" | "g" => Ok(MetalUnit::Gram),
            "ounce" | "ounces" | "oz" => Ok(MetalUnit::Ounce),
            "kg" | "kilogram" | "kilograms" => Ok(MetalUnit::Kg),
            other => Err(FinanceError::Parse(format!("unknown metal unit '{}'", other))),
        }
    }
}

/// Gold or silver holding, valued at cost unless a price lookup is supplied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreciousMetal {
    pub id: String,
    #[serde(rename = "type")]
    pub metal_type: MetalType,
    #[serde(deserialize_with = "amount::deserialize")]
    pub quantity: f64,
    pub unit: MetalUnit,
    #[serde(alias = "purchasePricePerUnit", deserialize_with = "amount::deserialize")]
    pub purchase_price_per_unit: f64,
    #[serde(alias = "purchaseDate")]
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Insurance policy metadata (listed, never aggregated)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insurance {
    pub id: String,
    #[serde(alias = "policyName")]
    pub policy_name: String,
    #[serde(alias = "policyType")]
    pub policy_type: String,
    pub provider: String,
    #[serde(default, alias = "policyNumber")]
    pub policy_number: Option<String>,
    #[serde(alias = "premiumAmount", deserialize_with = "amount::deserialize")]
    pub premium_amount: f64,
    #[serde(alias = "coverageAmount", deserialize_with = "amount::deserialize")]
    pub coverage_amount: f64,
    #[serde(default, alias = "premiumFrequency")]
    pub premium_frequency: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}
