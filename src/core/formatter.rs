use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::classifier::Trend;
use crate::core::models::cost::Amount;

/// Width of the account name column, including one column of spacing.
pub const ACCOUNT_WIDTH: usize = 40;
/// Width of each date column, including the trailing trend glyph.
pub const AMOUNT_WIDTH: usize = 13;

const INVALID_TOKEN: &str = "-";

/// Returns the amount with exactly two fractional digits, rounded half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Returns "MM-DD".
pub fn format_date_header(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Truncate to at most `max` characters. Never wraps.
pub fn truncate_name(name: &str, max: usize) -> String {
    name.chars().take(max).collect()
}

/// Returns the account label padded to the name column.
pub fn format_name_column(name: &str) -> String {
    format!(
        "{:<width$}",
        truncate_name(name, ACCOUNT_WIDTH - 1),
        width = ACCOUNT_WIDTH
    )
}

/// Returns a date column cell: the value right-justified in all but the
/// last column, followed by the trend glyph. Invalid amounts render as a
/// bare "-" with a blank glyph slot.
pub fn format_cell(amount: Amount, trend: Trend) -> String {
    let numeric_width = AMOUNT_WIDTH - 1;
    match amount {
        Amount::Value(v) => format!(
            "{:>width$}{}",
            format_amount(v),
            trend.glyph(),
            width = numeric_width
        ),
        Amount::Invalid => format!("{:>width$} ", INVALID_TOKEN, width = numeric_width),
    }
}

/// Returns a header cell aligned with the numeric part of [`format_cell`].
pub fn format_header_cell(date: NaiveDate) -> String {
    format!(
        "{:>width$} ",
        format_date_header(date),
        width = AMOUNT_WIDTH - 1
    )
}

/// Returns the dashed rule spanning the name column and every date column.
pub fn separator(date_count: usize) -> String {
    "-".repeat(ACCOUNT_WIDTH + AMOUNT_WIDTH * date_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn format_amount_two_decimals() {
        assert_eq!(format_amount(d("5")), "5.00");
        assert_eq!(format_amount(d("0")), "0.00");
        assert_eq!(format_amount(d("12.3")), "12.30");
        assert_eq!(format_amount(d("12.345")), "12.35");
        assert_eq!(format_amount(d("12.344999")), "12.34");
        assert_eq!(format_amount(d("0.0000001")), "0.00");
    }

    #[test]
    fn format_date_header_month_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date_header(date), "03-07");
    }

    #[test]
    fn name_column_truncates_to_leave_spacing() {
        let long = "x".repeat(60);
        let col = format_name_column(&long);
        assert_eq!(col.chars().count(), ACCOUNT_WIDTH);
        assert!(col.ends_with(' '));
        assert_eq!(col.trim_end().chars().count(), ACCOUNT_WIDTH - 1);

        let short = format_name_column("prod");
        assert_eq!(short, format!("prod{}", " ".repeat(36)));
    }

    #[test]
    fn name_column_counts_characters_not_bytes() {
        let col = format_name_column("Équipe données");
        assert_eq!(col.chars().count(), ACCOUNT_WIDTH);
    }

    #[test]
    fn cell_glyph_is_part_of_the_field() {
        let up = format_cell(Amount::Value(d("150")), Trend::Up);
        assert_eq!(up, "      150.00↑");
        assert_eq!(up.chars().count(), AMOUNT_WIDTH);

        let flat = format_cell(Amount::Value(d("1.5")), Trend::Flat);
        assert_eq!(flat, "        1.50 ");
    }

    #[test]
    fn invalid_cell_is_dash_without_glyph() {
        let cell = format_cell(Amount::Invalid, Trend::Up);
        assert_eq!(cell, "           - ");
        assert_eq!(cell.chars().count(), AMOUNT_WIDTH);
    }

    #[test]
    fn separator_spans_all_columns() {
        assert_eq!(separator(0).len(), ACCOUNT_WIDTH);
        assert_eq!(separator(8).len(), ACCOUNT_WIDTH + 8 * AMOUNT_WIDTH);
        assert!(separator(2).chars().all(|c| c == '-'));
    }

    #[test]
    fn header_cell_aligns_with_values() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_header_cell(date), "       12-31 ");
    }
}
