//! Income/expense aggregation over transaction lists.
//!
//! Every function is total: an empty list yields zeros and a zero
//! denominator yields a zero ratio, never NaN or infinity.

use chrono::Datelike;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;

use crate::records::{Transaction, TransactionType};

fn sum_where<F>(txs: &[Transaction], pred: F) -> f64
where
    F: Fn(&Transaction) -> bool,
{
    txs.iter().filter(|t| pred(t)).map(|t| t.amount).sum()
}

/// Divide, returning 0 when the denominator is 0
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn total_income(txs: &[Transaction]) -> f64 {
    sum_where(txs, |t| t.transaction_type == TransactionType::Income)
}

pub fn total_expenses(txs: &[Transaction]) -> f64 {
    sum_where(txs, |t| t.transaction_type == TransactionType::Expense)
}

/// Income minus expenses; negative when spending exceeds income
pub fn savings(txs: &[Transaction]) -> f64 {
    total_income(txs) - total_expenses(txs)
}

fn total_for_type(txs: &[Transaction], tx_type: TransactionType) -> f64 {
    match tx_type {
        TransactionType::Income => total_income(txs),
        TransactionType::Expense => total_expenses(txs),
    }
}

/// Sum of one category (exact, case-sensitive match) for one direction
pub fn category_total(txs: &[Transaction], category: &str, tx_type: TransactionType) -> f64 {
    sum_where(txs, |t| t.transaction_type == tx_type && t.category == category)
}

/// Category share of the income or expense total, as a fraction
pub fn category_percentage(txs: &[Transaction], category: &str, tx_type: TransactionType) -> f64 {
    ratio_or_zero(
        category_total(txs, category, tx_type),
        total_for_type(txs, tx_type),
    )
}

/// Savings as a fraction of income
pub fn savings_rate(txs: &[Transaction]) -> f64 {
    ratio_or_zero(savings(txs), total_income(txs))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Fraction of the income or expense total
    pub share: f64,
}

/// Per-category totals for one direction, largest first
pub fn category_breakdown(txs: &[Transaction], tx_type: TransactionType) -> Vec<CategoryShare> {
    let type_total = total_for_type(txs, tx_type);

    txs.iter()
        .filter(|t| t.transaction_type == tx_type)
        .into_grouping_map_by(|t| t.category.clone())
        .fold(0.0_f64, |acc, _category, t| acc + t.amount)
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share: ratio_or_zero(total, type_total),
        })
        .sorted_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Income/expense totals per calendar month, oldest first
pub fn monthly_totals(txs: &[Transaction]) -> Vec<MonthlyTotals> {
    txs.iter()
        .into_grouping_map_by(|t| (t.date.year(), t.date.month()))
        .fold((0.0_f64, 0.0_f64), |(income, expenses), _key, t| {
            match t.transaction_type {
                TransactionType::Income => (income + t.amount, expenses),
                TransactionType::Expense => (income, expenses + t.amount),
            }
        })
        .into_iter()
        .sorted_by_key(|(key, _)| *key)
        .map(|((year, month), (income, expenses))| MonthlyTotals {
            year,
            month,
            income,
            expenses,
            savings: income - expenses,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub savings_rate: f64,
    pub count: usize,
}

pub fn summarize(txs: &[Transaction]) -> TransactionSummary {
    let income = total_income(txs);
    let expenses = total_expenses(txs);
    TransactionSummary {
        income,
        expenses,
        savings: income - expenses,
        savings_rate: ratio_or_zero(income - expenses, income),
        count: txs.len(),
    }
}
