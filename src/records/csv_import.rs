use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info, warn};

use super::amount::parse_amount;
use super::models::{Transaction, TransactionType};

/// Parse a transactions CSV export (date, type, category, amount, description)
///
/// Header names are matched case-insensitively and column order is free.
/// Rows that fail to parse are skipped with a warning.
pub fn import_transactions_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    info!("Parsing transactions CSV file: {:?}", path);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("Failed to open CSV file")?;

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();
    debug!("CSV headers: {:?}", headers);

    let columns = find_columns(&headers)?;
    debug!("Column mapping: {:?}", columns);

    let mut transactions = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let record = result.context("Failed to read CSV record")?;

        match parse_csv_row(&record, &columns, line) {
            Ok(tx) => transactions.push(tx),
            Err(e) => {
                warn!("Skipping row {}: {}", line, e);
                continue;
            }
        }
    }

    info!(
        "Successfully parsed {} transactions from CSV",
        transactions.len()
    );
    Ok(transactions)
}

#[derive(Debug)]
struct CsvColumnMapping {
    id: Option<usize>,
    date: usize,
    transaction_type: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

fn find_columns(headers: &csv::StringRecord) -> Result<CsvColumnMapping> {
    let mut id_idx = None;
    let mut date_idx = None;
    let mut type_idx = None;
    let mut category_idx = None;
    let mut amount_idx = None;
    let mut description_idx = None;

    for (idx, header) in headers.iter().enumerate() {
        match header.to_lowercase().as_str() {
            "id" => id_idx = Some(idx),
            "date" | "transaction_date" => date_idx = Some(idx),
            "type" | "transaction_type" | "kind" => type_idx = Some(idx),
            "category" | "tag" => category_idx = Some(idx),
            "amount" | "value" => amount_idx = Some(idx),
            "description" | "memo" | "note" | "notes" => description_idx = Some(idx),
            _ => {}
        }
    }

    Ok(CsvColumnMapping {
        id: id_idx,
        date: date_idx.ok_or_else(|| anyhow!("Could not find 'date' column"))?,
        transaction_type: type_idx.ok_or_else(|| anyhow!("Could not find 'type' column"))?,
        category: category_idx.ok_or_else(|| anyhow!("Could not find 'category' column"))?,
        amount: amount_idx.ok_or_else(|| anyhow!("Could not find 'amount' column"))?,
        description: description_idx,
    })
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("missing {}", name))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| anyhow!("invalid date '{}', use YYYY-MM-DD or DD/MM/YYYY", raw))
}

fn parse_csv_row(
    record: &csv::StringRecord,
    columns: &CsvColumnMapping,
    line: usize,
) -> Result<Transaction> {
    let date = parse_date(field(record, columns.date, "date")?)?;
    let transaction_type: TransactionType =
        field(record, columns.transaction_type, "type")?.parse()?;
    let category = field(record, columns.category, "category")?.to_string();
    let amount = parse_amount(field(record, columns.amount, "amount")?)?;

    let id = columns
        .id
        .and_then(|i| record.get(i))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("csv-{}", line));
    let description = columns
        .description
        .and_then(|i| record.get(i))
        .unwrap_or_default()
        .to_string();

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        category,
        description,
        date,
    })
}
