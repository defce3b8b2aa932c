//! Display formatting for dates and percentages.

use chrono::NaiveDate;

/// Format a date for display, e.g. "Jan 5, 2024".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a percentage with one decimal, e.g. "85.0%".
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a change in percentage points with an explicit sign, e.g. "+15.0%".
pub fn signed_percent(value: f64) -> String {
    // Avoid rendering "-0.0%".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:+.1}%", value)
}

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
