use crate::cli::output::Palette;
use crate::core::classifier::{classify, Change};
use crate::core::formatter::{format_cell, format_header_cell, format_name_column, separator};
use crate::core::models::cost::{AccountRow, Amount};
use crate::core::report::Report;

const HEADER_LABEL: &str = "Account";
const TOTAL_LABEL: &str = "TOTAL";

/// Render the account x date matrix as aligned text.
///
/// Layout:
/// ```text
/// Account                                        03-01        03-02
/// ------------------------------------------------------------------
/// Alpha Dev                                      10.50         9.25↓
/// Zeta Prod                                     100.00       150.00↑
/// ------------------------------------------------------------------
/// TOTAL                                         110.50       159.25↑
/// ```
pub fn render_report(report: &Report, palette: &Palette) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(report.rows.len() + 4);
    let rule = separator(report.dates.len());

    let mut header = format_name_column(HEADER_LABEL);
    for date in &report.dates {
        header.push_str(&format_header_cell(*date));
    }
    lines.push(palette.header(&header));
    lines.push(rule.clone());

    for row in &report.rows {
        lines.push(render_row(row, palette));
    }

    lines.push(rule);
    lines.push(render_totals(report, palette));

    lines.join("\n")
}

fn render_row(row: &AccountRow, palette: &Palette) -> String {
    let mut line = format_name_column(&row.display_name);
    let mut prev: Option<Amount> = None;
    for amount in &row.points {
        let cell = match amount {
            Amount::Value(v) => {
                let change = classify(prev.and_then(Amount::as_prev), *v);
                palette.cell(&format_cell(*amount, change.trend), change.tier)
            }
            Amount::Invalid => format_cell(*amount, Change::BASELINE.trend),
        };
        line.push_str(&cell);
        prev = Some(*amount);
    }
    line
}

fn render_totals(report: &Report, palette: &Palette) -> String {
    let mut line = palette.total_label(&format_name_column(TOTAL_LABEL));
    let mut prev = None;
    for total in &report.totals {
        let change = classify(prev, total.amount);
        let text = format_cell(Amount::Value(total.amount), change.trend);
        line.push_str(&palette.total_cell(&text, change.tier));
        prev = Some(total.amount);
    }
    line
}
