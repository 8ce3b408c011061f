//! Record validation
//!
//! Collects every data-quality issue in a snapshot instead of failing on the
//! first one. The analytics engine tolerates all of these (it never panics
//! or divides by zero), so the loader only logs them unless strict mode is
//! requested.

use super::Snapshot;

/// A validation issue found in a loaded record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Collection the record belongs to (e.g. "fixed_deposits")
    pub collection: &'static str,
    pub id: String,
    pub field: &'static str,
    pub reason: String,
}

impl ValidationIssue {
    fn new(
        collection: &'static str,
        id: &str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            collection,
            id: id.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}].{}: {}",
            self.collection, self.id, self.field, self.reason
        )
    }
}

fn check_non_negative(
    issues: &mut Vec<ValidationIssue>,
    collection: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) {
    if !value.is_finite() {
        issues.push(ValidationIssue::new(collection, id, field, "not a finite number"));
    } else if value < 0.0 {
        issues.push(ValidationIssue::new(
            collection,
            id,
            field,
            format!("must not be negative (got {})", value),
        ));
    }
}

fn check_positive(
    issues: &mut Vec<ValidationIssue>,
    collection: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) {
    if !value.is_finite() {
        issues.push(ValidationIssue::new(collection, id, field, "not a finite number"));
    } else if value <= 0.0 {
        issues.push(ValidationIssue::new(
            collection,
            id,
            field,
            format!("must be greater than zero (got {})", value),
        ));
    }
}

/// Validate every collection in a snapshot
pub fn validate_snapshot(snapshot: &Snapshot) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for tx in &snapshot.transactions {
        check_non_negative(&mut issues, "transactions", &tx.id, "amount", tx.amount);
        if tx.category.trim().is_empty() {
            issues.push(ValidationIssue::new(
                "transactions",
                &tx.id,
                "category",
                "category is empty",
            ));
        }
    }

    for inv in &snapshot.investments {
        check_non_negative(&mut issues, "investments", &inv.id, "initial_value", inv.initial_value);
        check_non_negative(&mut issues, "investments", &inv.id, "current_value", inv.current_value);
    }

    for fd in &snapshot.fixed_deposits {
        check_positive(
            &mut issues,
            "fixed_deposits",
            &fd.id,
            "principal_amount",
            fd.principal_amount,
        );
        check_non_negative(
            &mut issues,
            "fixed_deposits",
            &fd.id,
            "interest_rate",
            fd.interest_rate,
        );
        if fd.maturity_date < fd.start_date {
            issues.push(ValidationIssue::new(
                "fixed_deposits",
                &fd.id,
                "maturity_date",
                format!(
                    "maturity date {} is before start date {}",
                    fd.maturity_date, fd.start_date
                ),
            ));
        }
    }

    for pf in &snapshot.provident_funds {
        check_non_negative(
            &mut issues,
            "provident_funds",
            &pf.id,
            "current_balance",
            pf.current_balance,
        );
        if !pf.interest_rate.is_finite() {
            issues.push(ValidationIssue::new(
                "provident_funds",
                &pf.id,
                "interest_rate",
                "not a finite number",
            ));
        }
    }

    for metal in &snapshot.precious_metals {
        check_positive(&mut issues, "precious_metals", &metal.id, "quantity", metal.quantity);
        check_positive(
            &mut issues,
            "precious_metals",
            &metal.id,
            "purchase_price_per_unit",
            metal.purchase_price_per_unit,
        );
    }

    issues
}
