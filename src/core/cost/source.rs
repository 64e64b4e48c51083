use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::cost::aws::AwsCli;
use crate::core::models::cost::CostTable;

/// Supplies per-account, per-day unblended cost for a date range.
#[allow(async_fn_in_trait)]
pub trait CostDataSource {
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<CostTable>;
}

// ── Cost Explorer response ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CostAndUsageResponse {
    #[serde(default)]
    results_by_time: Vec<ResultByTime>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultByTime {
    time_period: TimePeriod,
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TimePeriod {
    start: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Group {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    metrics: Metrics,
}

#[derive(Deserialize, Default)]
struct Metrics {
    #[serde(rename = "UnblendedCost")]
    unblended_cost: Option<MetricValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MetricValue {
    amount: Option<String>,
}

/// Turn a `get-cost-and-usage` JSON document into a cost table.
///
/// Every time period contributes its date even without groups. Groups with
/// no account key are skipped; a missing amount is kept as an empty string
/// so it renders as invalid rather than as zero.
pub fn parse_cost_response(json: &str) -> Result<CostTable> {
    let response: CostAndUsageResponse =
        serde_json::from_str(json).context("Failed to parse cost and usage response")?;

    let mut table = CostTable::default();
    for period in response.results_by_time {
        let date = NaiveDate::parse_from_str(&period.time_period.start, "%Y-%m-%d")
            .with_context(|| format!("Invalid period start: {}", period.time_period.start))?;
        table.add_day(date);

        for group in period.groups {
            let Some(account_id) = group.keys.first() else {
                continue;
            };
            let amount = group
                .metrics
                .unblended_cost
                .and_then(|m| m.amount)
                .unwrap_or_default();
            table.insert(date, account_id, &amount);
        }
    }
    Ok(table)
}

/// Cost Explorer via `aws ce get-cost-and-usage`, grouped by linked account.
pub struct AwsCostExplorer<'a> {
    aws: &'a AwsCli,
}

impl<'a> AwsCostExplorer<'a> {
    pub fn new(aws: &'a AwsCli) -> Self {
        Self { aws }
    }
}

impl CostDataSource for AwsCostExplorer<'_> {
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<CostTable> {
        let period = format!(
            "Start={},End={}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        let json = self
            .aws
            .run(&[
                "ce",
                "get-cost-and-usage",
                "--time-period",
                &period,
                "--granularity",
                "DAILY",
                "--metrics",
                "UnblendedCost",
                "--group-by",
                "Type=DIMENSION,Key=LINKED_ACCOUNT",
                "--output",
                "json",
            ])
            .await
            .context("Failed to fetch cost data from AWS Cost Explorer")?;

        let table = parse_cost_response(&json)?;
        tracing::debug!(
            days = table.dates().len(),
            accounts = table.account_ids().len(),
            "fetched cost table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cost::Amount;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    const SAMPLE: &str = r#"{
      "GroupDefinitions": [{"Type": "DIMENSION", "Key": "LINKED_ACCOUNT"}],
      "ResultsByTime": [
        {
          "TimePeriod": {"Start": "2024-03-01", "End": "2024-03-02"},
          "Total": {},
          "Groups": [
            {"Keys": ["111111111111"], "Metrics": {"UnblendedCost": {"Amount": "12.3456", "Unit": "USD"}}},
            {"Keys": ["222222222222"], "Metrics": {"UnblendedCost": {"Amount": "0.5", "Unit": "USD"}}}
          ],
          "Estimated": false
        },
        {
          "TimePeriod": {"Start": "2024-03-02", "End": "2024-03-03"},
          "Total": {},
          "Groups": [],
          "Estimated": true
        }
      ],
      "DimensionValueAttributes": []
    }"#;

    #[test]
    fn parses_groups_into_table() {
        let table = parse_cost_response(SAMPLE).unwrap();
        assert_eq!(table.dates(), vec![date("2024-03-01"), date("2024-03-02")]);
        assert_eq!(
            table.amount(date("2024-03-01"), "111111111111"),
            Amount::Value(Decimal::from_str("12.3456").unwrap())
        );
        assert_eq!(table.account_ids().len(), 2);
    }

    #[test]
    fn empty_period_still_counts_as_a_day() {
        let table = parse_cost_response(SAMPLE).unwrap();
        assert_eq!(
            table.amount(date("2024-03-02"), "222222222222"),
            Amount::Value(Decimal::ZERO)
        );
    }

    #[test]
    fn missing_amount_is_invalid() {
        let json = r#"{"ResultsByTime": [{"TimePeriod": {"Start": "2024-03-01"},
            "Groups": [{"Keys": ["111"], "Metrics": {}}]}]}"#;
        let table = parse_cost_response(json).unwrap();
        assert_eq!(table.amount(date("2024-03-01"), "111"), Amount::Invalid);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_cost_response("not json").is_err());
    }

    #[test]
    fn bad_period_date_is_an_error() {
        let json = r#"{"ResultsByTime": [{"TimePeriod": {"Start": "yesterday"}}]}"#;
        assert!(parse_cost_response(json).is_err());
    }
}
