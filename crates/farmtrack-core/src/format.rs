//! Display formatting for monetary amounts and percentages.

/// Formats a monetary amount with two fractional digits, e.g. `$850.00`.
pub fn usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Rounds a percentage to the nearest whole point for display.
pub fn rounded_percent(value: f64) -> i64 {
    value.round() as i64
}
