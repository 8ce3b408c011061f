//! Amount conversion at the record-source boundary.
//!
//! The backend stores money as NUMERIC columns and exports them as decimal
//! strings (`"1250.00"`), sometimes as plain JSON numbers. Both are parsed
//! exactly into a `Decimal` first and only then converted to the `f64`
//! the analytics engine works with.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::error::FinanceError;

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Decimal as Deserialize>::deserialize(deserializer)?;
    to_amount(value).map_err(D::Error::custom)
}

/// Convert an exact decimal into an engine amount
pub fn to_amount(value: Decimal) -> Result<f64, FinanceError> {
    value
        .to_f64()
        .ok_or_else(|| FinanceError::Parse(format!("amount {} is not representable", value)))
}

/// Parse a user or CSV supplied amount ("1,234.50", " 99 ")
pub fn parse_amount(raw: &str) -> Result<f64, FinanceError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let value = Decimal::from_str(&cleaned)
        .map_err(|_| FinanceError::Parse(format!("invalid amount '{}'", raw.trim())))?;
    to_amount(value)
}
