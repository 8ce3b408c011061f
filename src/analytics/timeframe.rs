//! Time-window filtering of dated records.
//!
//! Relative windows (month, quarter, year) are evaluated against an explicit
//! reference date rather than the wall clock, so results are reproducible.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;
use crate::records::{FixedDeposit, Investment, PreciousMetal, ProvidentFund, Transaction};

/// Records that carry the date used for time-window filtering
pub trait Dated {
    fn record_date(&self) -> NaiveDate;
}

impl Dated for Transaction {
    fn record_date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Investment {
    fn record_date(&self) -> NaiveDate {
        self.purchase_date
    }
}

impl Dated for FixedDeposit {
    fn record_date(&self) -> NaiveDate {
        self.start_date
    }
}

impl Dated for ProvidentFund {
    fn record_date(&self) -> NaiveDate {
        self.start_date
    }
}

impl Dated for PreciousMetal {
    fn record_date(&self) -> NaiveDate {
        self.purchase_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFrame {
    ThisMonth,
    ThisQuarter,
    ThisYear,
    #[default]
    AllTime,
    /// Inclusive on both ends; a missing bound leaves that side open
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// First day of the calendar quarter containing `date`
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = ((date.month0() / 3) * 3) + 1;
    date.with_day(1)
        .and_then(|d| d.with_month(month))
        .unwrap_or(date)
}

impl TimeFrame {
    /// Whether a record date falls inside this window relative to `now`
    pub fn contains(&self, date: NaiveDate, now: NaiveDate) -> bool {
        match self {
            TimeFrame::ThisMonth => date.year() == now.year() && date.month() == now.month(),
            // lower bound only
            TimeFrame::ThisQuarter => date >= quarter_start(now),
            TimeFrame::ThisYear => date.year() == now.year(),
            TimeFrame::AllTime => true,
            TimeFrame::Custom { from, to } => {
                from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            TimeFrame::ThisMonth => "This month".to_string(),
            TimeFrame::ThisQuarter => "This quarter".to_string(),
            TimeFrame::ThisYear => "This year".to_string(),
            TimeFrame::AllTime => "All time".to_string(),
            TimeFrame::Custom { from, to } => {
                let from = from.map(|d| d.to_string()).unwrap_or_else(|| "…".to_string());
                let to = to.map(|d| d.to_string()).unwrap_or_else(|| "…".to_string());
                format!("{} → {}", from, to)
            }
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, FinanceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FinanceError::Parse(format!("invalid date '{}', use YYYY-MM-DD", raw)))
}

impl FromStr for TimeFrame {
    type Err = FinanceError;

    /// Parse MONTH|MTD, QUARTER|QTD, YEAR|YTD, ALL, YYYY or FROM:TO
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "month" | "mtd" | "this-month" => return Ok(TimeFrame::ThisMonth),
            "quarter" | "qtd" | "this-quarter" => return Ok(TimeFrame::ThisQuarter),
            "year" | "ytd" | "this-year" => return Ok(TimeFrame::ThisYear),
            "all" | "alltime" | "all-time" => return Ok(TimeFrame::AllTime),
            _ => {}
        }

        // Year shorthand: YYYY -> YYYY-01-01:YYYY-12-31
        if let Ok(year) = trimmed.parse::<i32>() {
            if (1900..=2100).contains(&year) {
                return Ok(TimeFrame::Custom {
                    from: NaiveDate::from_ymd_opt(year, 1, 1),
                    to: NaiveDate::from_ymd_opt(year, 12, 31),
                });
            }
        }

        if let Some((from_str, to_str)) = trimmed.split_once(':') {
            let from = parse_bound(from_str)?;
            let to = parse_bound(to_str)?;
            if let (Some(f), Some(t)) = (from, to) {
                if f > t {
                    return Err(FinanceError::Parse(format!(
                        "range start {} is after range end {}",
                        f, t
                    )));
                }
            }
            return Ok(TimeFrame::Custom { from, to });
        }

        Err(FinanceError::Parse(format!(
            "invalid period '{}'. Use: month, quarter, year, all, YYYY, or FROM:TO (YYYY-MM-DD, either side optional)",
            trimmed
        )))
    }
}

/// Records inside the window, in their original order
pub fn filter_by_timeframe<'a, T: Dated>(
    records: &'a [T],
    frame: &TimeFrame,
    now: NaiveDate,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| frame.contains(r.record_date(), now))
        .collect()
}

/// Owned variant of [`filter_by_timeframe`] for feeding the aggregators
pub fn select<T: Dated + Clone>(records: &[T], frame: &TimeFrame, now: NaiveDate) -> Vec<T> {
    filter_by_timeframe(records, frame, now)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InvestmentType, MetalType, MetalUnit, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, on: NaiveDate) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: 1.0,
            transaction_type: TransactionType::Expense,
            category: "Misc".to_string(),
            description: String::new(),
            date: on,
        }
    }

    #[test]
    fn test_this_month_boundaries() {
        let now = date(2024, 5, 20);
        assert!(TimeFrame::ThisMonth.contains(date(2024, 5, 1), now));
        assert!(!TimeFrame::ThisMonth.contains(date(2024, 4, 30), now));
        // same month, different year
        assert!(!TimeFrame::ThisMonth.contains(date(2023, 5, 10), now));
    }

    #[test]
    fn test_quarter_start() {
        assert_eq!(quarter_start(date(2024, 1, 31)), date(2024, 1, 1));
        assert_eq!(quarter_start(date(2024, 5, 20)), date(2024, 4, 1));
        assert_eq!(quarter_start(date(2024, 9, 30)), date(2024, 7, 1));
        assert_eq!(quarter_start(date(2024, 12, 31)), date(2024, 10, 1));
    }

    #[test]
    fn test_this_quarter_has_no_upper_bound() {
        let now = date(2024, 5, 20);
        assert!(TimeFrame::ThisQuarter.contains(date(2024, 4, 1), now));
        assert!(!TimeFrame::ThisQuarter.contains(date(2024, 3, 31), now));
        assert!(TimeFrame::ThisQuarter.contains(date(2025, 1, 1), now));
    }

    #[test]
    fn test_this_year() {
        let now = date(2024, 5, 20);
        assert!(TimeFrame::ThisYear.contains(date(2024, 12, 31), now));
        assert!(!TimeFrame::ThisYear.contains(date(2023, 12, 31), now));
    }

    #[test]
    fn test_custom_range_inclusive_and_open() {
        let now = date(2024, 5, 20);
        let closed = TimeFrame::Custom {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 31)),
        };
        assert!(closed.contains(date(2024, 1, 1), now));
        assert!(closed.contains(date(2024, 1, 31), now));
        assert!(!closed.contains(date(2024, 2, 1), now));

        let open_end = TimeFrame::Custom {
            from: Some(date(2024, 1, 1)),
            to: None,
        };
        assert!(open_end.contains(date(2030, 1, 1), now));
        assert!(!open_end.contains(date(2023, 12, 31), now));

        let unbounded = TimeFrame::Custom { from: None, to: None };
        assert!(unbounded.contains(date(1999, 1, 1), now));
    }

    #[test]
    fn test_filter_preserves_order() {
        let now = date(2024, 5, 20);
        let records = vec![
            tx("a", date(2024, 5, 3)),
            tx("b", date(2024, 4, 30)),
            tx("c", date(2024, 5, 1)),
            tx("d", date(2024, 5, 31)),
        ];
        let ids: Vec<&str> = filter_by_timeframe(&records, &TimeFrame::ThisMonth, now)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert_eq!(select(&records, &TimeFrame::AllTime, now).len(), 4);
    }

    #[test]
    fn test_parse_period_strings() {
        assert_eq!("MTD".parse::<TimeFrame>().unwrap(), TimeFrame::ThisMonth);
        assert_eq!("quarter".parse::<TimeFrame>().unwrap(), TimeFrame::ThisQuarter);
        assert_eq!("ytd".parse::<TimeFrame>().unwrap(), TimeFrame::ThisYear);
        assert_eq!("all".parse::<TimeFrame>().unwrap(), TimeFrame::AllTime);
        assert_eq!(
            "2023".parse::<TimeFrame>().unwrap(),
            TimeFrame::Custom {
                from: Some(date(2023, 1, 1)),
                to: Some(date(2023, 12, 31))
            }
        );
        assert_eq!(
            "2024-02-01:".parse::<TimeFrame>().unwrap(),
            TimeFrame::Custom {
                from: Some(date(2024, 2, 1)),
                to: None
            }
        );
        assert!("2024-02-01:2024-01-01".parse::<TimeFrame>().is_err());
        assert!("2024-13-01:".parse::<TimeFrame>().is_err());
        assert!("fortnight".parse::<TimeFrame>().is_err());
    }

    fn holding(name: &str, bought: NaiveDate) -> Investment {
        Investment {
            id: name.to_string(),
            name: name.to_string(),
            investment_type: InvestmentType::Stocks,
            initial_value: 100.0,
            current_value: 120.0,
            purchase_date: bought,
            notes: None,
        }
    }

    fn gold(id: &str, bought: NaiveDate) -> PreciousMetal {
        PreciousMetal {
            id: id.to_string(),
            metal_type: MetalType::Gold,
            quantity: 1.0,
            unit: MetalUnit::Gram,
            purchase_price_per_unit: 5000.0,
            purchase_date: bought,
            notes: None,
        }
    }

    #[test]
    fn test_investments_filtered_by_purchase_date() {
        let now = date(2024, 6, 15);
        let holdings = vec![
            holding("late", date(2024, 12, 31)),
            holding("prior", date(2023, 12, 31)),
            holding("first", date(2024, 1, 1)),
            holding("mid", date(2024, 3, 10)),
        ];

        let names: Vec<&str> = filter_by_timeframe(&holdings, &TimeFrame::ThisYear, now)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["late", "first", "mid"]);

        let range: TimeFrame = "2023-12-31:2024-01-01".parse().unwrap();
        let names: Vec<&str> = filter_by_timeframe(&holdings, &range, now)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["prior", "first"]);
    }

    #[test]
    fn test_metals_filtered_by_purchase_date() {
        let now = date(2024, 6, 15);
        let metals = vec![
            gold("b", date(2024, 2, 29)),
            gold("a", date(2024, 3, 1)),
            gold("old", date(2022, 5, 5)),
            gold("c", date(2024, 2, 1)),
        ];

        let ids: Vec<&str> = filter_by_timeframe(&metals, &TimeFrame::ThisYear, now)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let range = TimeFrame::Custom {
            from: Some(date(2024, 2, 1)),
            to: Some(date(2024, 2, 29)),
        };
        let ids: Vec<&str> = filter_by_timeframe(&metals, &range, now)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);

        let open = TimeFrame::Custom {
            from: None,
            to: Some(date(2024, 2, 1)),
        };
        assert_eq!(select(&metals, &open, now).len(), 2);
    }

    #[test]
    fn test_deposits_and_funds_filtered_by_start_date() {
        let now = date(2024, 6, 15);
        let deposits = vec![
            FixedDeposit {
                id: "fd-new".into(),
                name: "New".into(),
                principal_amount: 1000.0,
                interest_rate: 7.0,
                start_date: date(2024, 6, 1),
                maturity_date: date(2025, 6, 1),
                bank_name: None,
                notes: None,
            },
            FixedDeposit {
                id: "fd-old".into(),
                name: "Old".into(),
                principal_amount: 1000.0,
                interest_rate: 7.0,
                start_date: date(2024, 5, 31),
                maturity_date: date(2026, 5, 31),
                bank_name: None,
                notes: None,
            },
        ];
        let selected = select(&deposits, &TimeFrame::ThisMonth, now);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "fd-new");

        let funds = vec![ProvidentFund {
            id: "pf".into(),
            name: "PF".into(),
            current_balance: 10.0,
            interest_rate: 8.0,
            start_date: date(2024, 4, 1),
            notes: None,
        }];
        assert_eq!(select(&funds, &TimeFrame::ThisQuarter, now).len(), 1);
        assert!(select(&funds, &TimeFrame::ThisMonth, now).is_empty());
    }
}
