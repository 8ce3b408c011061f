//! Utility functions for formatting values for display
//!
//! Engine results are unrounded `f64`; rounding to two decimals happens only
//! here, at presentation time.

/// Core formatting function with full control over output.
///
/// Groups thousands with `,` and uses `.` as decimal separator, rounding to
/// two decimals. A negative sign goes after the symbol.
///
/// # Arguments
/// * `value` - The amount to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Currency symbol prefix ("" for none)
///
/// # Examples
/// ```
/// use finboard::utils::format_currency_with_width;
///
/// assert_eq!(format_currency_with_width(1234.56, 0, "$"), "$1,234.56");
/// assert_eq!(format_currency_with_width(1234.0, 10, ""), "  1,234.00");
/// ```
pub fn format_currency_with_width(value: f64, width: usize, symbol: &str) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    // -0.001 rounds to 0.00 and must not show a sign
    let is_negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if is_negative { "-" } else { "" };

    let result = format!("{}{}{}.{}", symbol, sign, with_separators, decimal_part);

    if width > 0 && result.chars().count() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format an amount with a currency symbol: "₹1,234.56"
///
/// # Examples
/// ```
/// use finboard::utils::format_currency;
///
/// assert_eq!(format_currency(-500.0, "₹"), "₹-500.00");
/// ```
pub fn format_currency(value: f64, symbol: &str) -> String {
    format_currency_with_width(value, 0, symbol)
}

/// Format a fraction as a percentage: 0.1234 -> "12.34%"
///
/// # Examples
/// ```
/// use finboard::utils::format_percent;
///
/// assert_eq!(format_percent(0.2), "20.00%");
/// ```
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "N/A".to_string();
    }
    format!("{:.2}%", fraction * 100.0)
}

/// Format a rate already expressed in percent: 7.5 -> "7.50%"
pub fn format_rate(percent: f64) -> String {
    format_percent(percent / 100.0)
}

/// Format a quantity, trimming trailing zeros: 2.500 -> "2.5"
pub fn format_quantity(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
