use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::core::models::cost::{AccountRow, CostTable, DailyTotal};

/// The account x date matrix ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<AccountRow>,
    pub totals: Vec<DailyTotal>,
}

impl Report {
    /// Build rows for every account in `table`, ordered by display name.
    ///
    /// Accounts missing from `names` are shown by their raw id.
    pub fn build(table: &CostTable, names: &HashMap<String, String>) -> Self {
        let dates = table.dates();

        let mut rows: Vec<AccountRow> = table
            .account_ids()
            .into_iter()
            .map(|account_id| {
                let display_name = names
                    .get(&account_id)
                    .cloned()
                    .unwrap_or_else(|| account_id.clone());
                let points = dates
                    .iter()
                    .map(|date| table.amount(*date, &account_id))
                    .collect();
                AccountRow {
                    account_id,
                    display_name,
                    points,
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.account_id.cmp(&b.account_id))
        });

        let totals = dates
            .iter()
            .enumerate()
            .map(|(i, date)| DailyTotal {
                date: *date,
                amount: rows.iter().fold(Decimal::ZERO, |acc, row| {
                    acc.checked_add(row.points[i].value_or_zero())
                        .unwrap_or(Decimal::MAX)
                }),
            })
            .collect();

        Self {
            dates,
            rows,
            totals,
        }
    }
}
