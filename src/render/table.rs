use crate::model::{Direction, PriceRecord};
use crate::utils::escape_html;

pub const PLACEHOLDER: &str = "<p>Data temporarily unavailable.</p>";

/// CSS class and cell text for a record's change column.
///
/// Absent and zero changes both render as an empty cell.
pub fn change_cell(record: &PriceRecord) -> (&'static str, String) {
    match (record.direction(), record.change) {
        (Some(Direction::Up), Some(c)) => ("up", format!("&#9650; ${:.2}", c.abs())),
        (Some(Direction::Down), Some(c)) => ("down", format!("&#9660; ${:.2}", c.abs())),
        _ => ("", String::new()),
    }
}

pub fn build_price_table(records: &[PriceRecord]) -> String {
    let rows: String = records
        .iter()
        .map(|r| {
            let (class, change) = change_cell(r);
            format!(
                "              <tr><td>{}</td><td>${:.2}</td><td class=\"{}\">{}</td></tr>\n",
                escape_html(&r.label),
                r.price,
                class,
                change
            )
        })
        .collect();

    format!(
        "            <table class=\"price-table\">\n              <tr><th>Item</th><th>Price</th><th>Change</th></tr>\n{rows}            </table>"
    )
}

/// The price table, or the placeholder when there is nothing to show.
pub fn price_section(records: Option<&[PriceRecord]>) -> String {
    match records {
        Some(records) if !records.is_empty() => build_price_table(records),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Plain-text summary of the first few records, e.g. `Eggs: $3.20 ▲ $0.15`.
pub fn price_summary(records: &[PriceRecord], limit: usize) -> String {
    records
        .iter()
        .take(limit)
        .map(|r| {
            let arrow = match (r.direction(), r.change) {
                (Some(Direction::Up), Some(c)) => format!(" \u{25b2} ${:.2}", c.abs()),
                (Some(Direction::Down), Some(c)) => format!(" \u{25bc} ${:.2}", c.abs()),
                _ => String::new(),
            };
            format!("{}: ${:.2}{}", r.label, r.price, arrow)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
