// Utility functions
use chrono::{Datelike, NaiveDate};

/// "October 2026"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// "October 05, 2026"
pub fn week_of_label(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Year window for the series request: last year through this year.
pub fn report_years(date: NaiveDate) -> (i32, i32) {
    (date.year() - 1, date.year())
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
