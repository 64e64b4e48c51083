use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// A single daily figure as it will be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Value(Decimal),
    /// The provider returned something that is not a non-negative number.
    Invalid,
}

impl Amount {
    /// Parse a raw amount string. Negative or unparsable input is `Invalid`.
    ///
    /// Only plain or scientific notation is accepted: no sign prefix `+`,
    /// digit separators or other characters the decimal parser tolerates.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let well_formed = raw.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        if !well_formed {
            return Amount::Invalid;
        }
        let parsed = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw));
        match parsed {
            Ok(v) if v >= Decimal::ZERO => Amount::Value(v),
            _ => Amount::Invalid,
        }
    }

    /// Contribution to a daily total; invalid cells count as zero.
    pub fn value_or_zero(self) -> Decimal {
        match self {
            Amount::Value(v) => v,
            Amount::Invalid => Decimal::ZERO,
        }
    }

    /// The amount as a previous-day reference for classification.
    pub fn as_prev(self) -> Option<Decimal> {
        match self {
            Amount::Value(v) => Some(v),
            Amount::Invalid => None,
        }
    }
}

/// Raw cost response indexed by date then account id.
///
/// Amount strings are kept as received so a malformed value only affects
/// its own cell.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    days: BTreeMap<NaiveDate, BTreeMap<String, String>>,
}

impl CostTable {
    /// Register a date in the window even if no account spent anything.
    pub fn add_day(&mut self, date: NaiveDate) {
        self.days.entry(date).or_default();
    }

    /// Register every date from `start` up to but not including `end`.
    pub fn add_window(&mut self, start: NaiveDate, end: NaiveDate) {
        for date in start.iter_days().take_while(|d| *d < end) {
            self.add_day(date);
        }
    }

    pub fn insert(&mut self, date: NaiveDate, account_id: &str, amount: &str) {
        self.days
            .entry(date)
            .or_default()
            .insert(account_id.to_string(), amount.to_string());
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    /// Every account that has a recorded cost on any day.
    pub fn account_ids(&self) -> BTreeSet<String> {
        self.days
            .values()
            .flat_map(|accounts| accounts.keys().cloned())
            .collect()
    }

    /// The amount for a cell; a missing entry means no spend.
    pub fn amount(&self, date: NaiveDate, account_id: &str) -> Amount {
        match self.days.get(&date).and_then(|a| a.get(account_id)) {
            Some(raw) => Amount::parse(raw),
            None => Amount::Value(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub account_id: String,
    pub display_name: String,
    /// One amount per report date, in date order.
    pub points: Vec<Amount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: Decimal,
}
