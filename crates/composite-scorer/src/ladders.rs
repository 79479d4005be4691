//! Sub-score threshold tables.
//!
//! Each raw metric maps to a bounded [1, 10] sub-score through an
//! ordered band list. The tables are plain data so individual
//! thresholds stay reviewable and tunable without touching the scoring
//! control flow.

/// Sub-score used when a metric is missing.
pub const NEUTRAL_SUBSCORE: f64 = 5.0;

/// Lower-is-better bands: the first band whose bound exceeds the value
/// wins. Valuation multiples treat non-positive values as neutral
/// (negative earnings make the multiple meaningless).
pub const PE_BANDS: &[(f64, f64)] = &[(15.0, 10.0), (25.0, 7.0), (35.0, 4.0)];
pub const PB_BANDS: &[(f64, f64)] = &[(1.5, 10.0), (3.0, 7.0), (5.0, 4.0)];
pub const PEG_BANDS: &[(f64, f64)] = &[(1.0, 10.0), (2.0, 7.0), (3.0, 4.0)];

/// Debt/equity arrives as a percentage from the attribute feed.
pub const DEBT_TO_EQUITY_BANDS: &[(f64, f64)] =
    &[(30.0, 10.0), (60.0, 7.0), (100.0, 5.0), (150.0, 3.0)];

/// Higher-is-better percentage bands: the first band whose bound is
/// below the value wins.
pub const NET_MARGIN_BANDS: &[(f64, f64)] = &[(20.0, 10.0), (10.0, 7.0), (5.0, 5.0), (0.0, 3.0)];
pub const ROE_BANDS: &[(f64, f64)] = &[(25.0, 10.0), (15.0, 7.0), (10.0, 5.0), (0.0, 3.0)];
pub const ROA_BANDS: &[(f64, f64)] = &[(15.0, 10.0), (10.0, 7.0), (5.0, 5.0), (0.0, 3.0)];
pub const REVENUE_GROWTH_BANDS: &[(f64, f64)] = &[(25.0, 10.0), (15.0, 8.0), (5.0, 6.0), (0.0, 4.0)];
pub const EARNINGS_GROWTH_BANDS: &[(f64, f64)] =
    &[(30.0, 10.0), (15.0, 8.0), (5.0, 6.0), (0.0, 4.0)];

/// Non-monotonic on purpose: the 2-3 band is ideal, above 3 is idle
/// capital, below 1 is a liquidity concern. Order of bands matters.
pub const CURRENT_RATIO_BANDS: &[(f64, f64)] = &[(3.0, 8.0), (2.0, 10.0), (1.5, 7.0), (1.0, 5.0)];

/// Absolute-dollar free cash flow bands.
pub const FCF_BANDS: &[(f64, f64)] = &[
    (10_000_000_000.0, 10.0),
    (1_000_000_000.0, 8.0),
    (100_000_000.0, 6.0),
    (0.0, 4.0),
];

/// Growth metrics are more forgiving at the bottom than valuation and
/// profitability metrics.
pub const GROWTH_FLOOR: f64 = 2.0;
pub const DEFAULT_FLOOR: f64 = 1.0;

/// Percentage-like inputs arrive either as decimals (0.12) or already
/// scaled (12). Magnitudes below one are treated as decimals.
pub fn as_percent(value: f64) -> f64 {
    if value.abs() < 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Lower-is-better score where any value is meaningful (debt/equity).
pub fn score_below(value: Option<f64>, bands: &[(f64, f64)], floor: f64) -> f64 {
    let value = match value {
        Some(v) => v,
        None => return NEUTRAL_SUBSCORE,
    };
    bands
        .iter()
        .find(|(bound, _)| value < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

/// Lower-is-better score for valuation multiples: missing or
/// non-positive values are neutral.
pub fn score_multiple(value: Option<f64>, bands: &[(f64, f64)]) -> f64 {
    match value {
        Some(v) if v > 0.0 => score_below(Some(v), bands, DEFAULT_FLOOR),
        _ => NEUTRAL_SUBSCORE,
    }
}

/// Higher-is-better score over raw values (current ratio, FCF).
pub fn score_above(value: Option<f64>, bands: &[(f64, f64)], floor: f64) -> f64 {
    let value = match value {
        Some(v) => v,
        None => return NEUTRAL_SUBSCORE,
    };
    bands
        .iter()
        .find(|(bound, _)| value > *bound)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

/// Higher-is-better score over percentage-like values, normalizing
/// decimal representations first.
pub fn score_percent(value: Option<f64>, bands: &[(f64, f64)], floor: f64) -> f64 {
    score_above(value.map(as_percent), bands, floor)
}
