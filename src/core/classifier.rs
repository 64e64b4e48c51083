use rust_decimal::Decimal;

const HIGH_ABS_CHANGE: i64 = 200;
const HIGH_PCT_CHANGE: i64 = 100;
const MEDIUM_ABS_CHANGE: i64 = 50;
const MEDIUM_PCT_CHANGE: i64 = 25;

/// Direction of change between two consecutive daily amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Single-column glyph appended after the amount. Flat is a blank.
    pub fn glyph(self) -> char {
        match self {
            Trend::Up => '↑',
            Trend::Down => '↓',
            Trend::Flat => ' ',
        }
    }
}

/// Severity bucket used to pick a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorTier {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub trend: Trend,
    pub tier: ColorTier,
}

impl Change {
    pub const BASELINE: Change = Change {
        trend: Trend::Flat,
        tier: ColorTier::None,
    };
}

/// Classify the move from `prev` to `curr`.
///
/// A missing or zero previous amount is the baseline case and yields no
/// arrow and no color. An unchanged amount is also uncolored. Otherwise the
/// tier is chosen on the absolute change and the absolute percentage
/// change, HIGH first:
///
/// | tier   | abs change | or pct change |
/// |--------|------------|---------------|
/// | HIGH   | >= 200     | >= 100        |
/// | MEDIUM | >= 50      | >= 25         |
/// | LOW    | otherwise  |               |
///
/// A percentage too large to represent is treated as past every threshold.
pub fn classify(prev: Option<Decimal>, curr: Decimal) -> Change {
    let prev = match prev {
        Some(p) if !p.is_zero() => p,
        _ => return Change::BASELINE,
    };

    let change = curr - prev;
    if change.is_zero() {
        return Change::BASELINE;
    }
    let abs_pct = Decimal::ONE_HUNDRED
        .checked_mul(change)
        .and_then(|scaled| scaled.checked_div(prev))
        .map(|pct| pct.abs());

    let trend = if curr > prev { Trend::Up } else { Trend::Down };

    let abs_change = change.abs();
    let pct_at_least = |threshold: i64| abs_pct.map_or(true, |p| p >= Decimal::from(threshold));
    let tier = if abs_change >= Decimal::from(HIGH_ABS_CHANGE) || pct_at_least(HIGH_PCT_CHANGE) {
        ColorTier::High
    } else if abs_change >= Decimal::from(MEDIUM_ABS_CHANGE) || pct_at_least(MEDIUM_PCT_CHANGE)
    {
        ColorTier::Medium
    } else {
        ColorTier::Low
    };

    Change { trend, tier }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn c(prev: &str, curr: &str) -> Change {
        classify(Some(d(prev)), d(curr))
    }

    #[test]
    fn missing_or_zero_prev_is_baseline() {
        assert_eq!(classify(None, d("500")), Change::BASELINE);
        assert_eq!(classify(Some(Decimal::ZERO), d("500")), Change::BASELINE);
        assert_eq!(classify(Some(d("0.00")), d("0")), Change::BASELINE);
    }

    #[test]
    fn absolute_change_of_200_is_high() {
        assert_eq!(
            c("100", "300"),
            Change {
                trend: Trend::Up,
                tier: ColorTier::High
            }
        );
    }

    #[test]
    fn forty_percent_is_medium() {
        assert_eq!(
            c("100", "140"),
            Change {
                trend: Trend::Up,
                tier: ColorTier::Medium
            }
        );
    }

    #[test]
    fn small_rise_is_low() {
        assert_eq!(
            c("100", "110"),
            Change {
                trend: Trend::Up,
                tier: ColorTier::Low
            }
        );
    }

    #[test]
    fn unchanged_is_flat_and_uncolored() {
        assert_eq!(c("100", "100"), Change::BASELINE);
        assert_eq!(c("12.50", "12.5"), Change::BASELINE);
    }

    #[test]
    fn drops_point_down() {
        let change = c("100", "90");
        assert_eq!(change.trend, Trend::Down);
        assert_eq!(change.tier, ColorTier::Low);

        // -100% is HIGH by percentage alone
        let change = c("10", "0");
        assert_eq!(change.trend, Trend::Down);
        assert_eq!(change.tier, ColorTier::High);
    }

    #[test]
    fn percentage_promotes_while_absolute_stays_small() {
        // +25% on a small base, abs change 2.5
        assert_eq!(c("10", "12.5").tier, ColorTier::Medium);
        // +100% on a small base, abs change 10
        assert_eq!(c("10", "20").tier, ColorTier::High);
        // just under 25%
        assert_eq!(c("10", "12.49").tier, ColorTier::Low);
    }

    #[test]
    fn absolute_promotes_while_percentage_stays_small() {
        // 50 on a base of 10000 is 0.5%
        assert_eq!(c("10000", "10050").tier, ColorTier::Medium);
        assert_eq!(c("10000", "10049.99").tier, ColorTier::Low);
        assert_eq!(c("10000", "9800").tier, ColorTier::High);
    }

    #[test]
    fn thresholds_are_exact_near_boundaries() {
        assert_eq!(c("10000", "10199.995").tier, ColorTier::Medium);
        assert_eq!(c("10000", "10200.004").tier, ColorTier::High);
        assert_eq!(c("10000", "10200").tier, ColorTier::High);
    }

    #[test]
    fn tiny_previous_amount_does_not_overflow() {
        let change = c("0.0000000000000000000000000001", "5.00");
        assert_eq!(
            change,
            Change {
                trend: Trend::Up,
                tier: ColorTier::High
            }
        );
    }

    #[test]
    fn huge_amounts_do_not_overflow() {
        let max = Decimal::MAX.to_string();
        assert_eq!(c("1", &max).tier, ColorTier::High);
        assert_eq!(c(&max, "1").trend, Trend::Down);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Trend::Up.glyph(), '↑');
        assert_eq!(Trend::Down.glyph(), '↓');
        assert_eq!(Trend::Flat.glyph(), ' ');
    }
}
