//! Multi-factor composite scoring.
//!
//! Each fundamental metric maps to a [1, 10] sub-score through the
//! tables in [`ladders`]; category averages combine under fixed weights
//! into one 0-100 score. The per-category averages are exposed on the
//! breakdown so a regression can be traced to the category that moved.

pub mod ladders;
pub mod valuation;

pub use valuation::classify;

use serde::{Deserialize, Serialize};

use screener_core::{Signal, StockSnapshot};

use crate::ladders::*;

pub const VALUATION_WEIGHT: f64 = 0.30;
pub const PROFITABILITY_WEIGHT: f64 = 0.25;
pub const GROWTH_WEIGHT: f64 = 0.20;
pub const FINANCIAL_HEALTH_WEIGHT: f64 = 0.15;
pub const TECHNICAL_WEIGHT: f64 = 0.10;

/// Category averages (each on a [1, 10] scale) plus the weighted
/// composite on [0, 100], rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub valuation: f64,
    pub profitability: f64,
    pub growth: f64,
    pub financial_health: f64,
    pub technical: f64,
    pub composite: f64,
}

/// Sub-score for the consensus technical signal.
pub fn technical_subscore(signal: Signal) -> f64 {
    match signal {
        Signal::Buy => 10.0,
        Signal::Hold => 5.0,
        Signal::Sell => 1.0,
        Signal::NotAvailable => NEUTRAL_SUBSCORE,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Score one snapshot against the consensus technical signal.
///
/// Deterministic: identical inputs always produce the identical
/// breakdown.
pub fn score(snapshot: &StockSnapshot, overall_signal: Signal) -> ScoreBreakdown {
    let valuation = mean(&[
        score_multiple(snapshot.pe_ratio, PE_BANDS),
        score_multiple(snapshot.pb_ratio, PB_BANDS),
        score_multiple(snapshot.peg_ratio, PEG_BANDS),
    ]);

    let profitability = mean(&[
        score_percent(snapshot.net_margin, NET_MARGIN_BANDS, DEFAULT_FLOOR),
        score_percent(snapshot.roe, ROE_BANDS, DEFAULT_FLOOR),
        score_percent(snapshot.roa, ROA_BANDS, DEFAULT_FLOOR),
    ]);

    let growth = mean(&[
        score_percent(snapshot.revenue_growth, REVENUE_GROWTH_BANDS, GROWTH_FLOOR),
        score_percent(snapshot.earnings_growth, EARNINGS_GROWTH_BANDS, GROWTH_FLOOR),
    ]);

    let financial_health = mean(&[
        score_below(snapshot.debt_to_equity, DEBT_TO_EQUITY_BANDS, DEFAULT_FLOOR),
        score_above(snapshot.current_ratio, CURRENT_RATIO_BANDS, 2.0),
        score_above(snapshot.free_cash_flow, FCF_BANDS, DEFAULT_FLOOR),
    ]);

    let technical = technical_subscore(overall_signal);

    let weighted = valuation * VALUATION_WEIGHT
        + profitability * PROFITABILITY_WEIGHT
        + growth * GROWTH_WEIGHT
        + financial_health * FINANCIAL_HEALTH_WEIGHT
        + technical * TECHNICAL_WEIGHT;

    ScoreBreakdown {
        valuation,
        profitability,
        growth,
        financial_health,
        technical,
        composite: (weighted * 100.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot_with(f: impl FnOnce(&mut StockSnapshot)) -> StockSnapshot {
        let mut snapshot = StockSnapshot::default();
        f(&mut snapshot);
        snapshot
    }

    #[test]
    fn test_empty_snapshot_scores_neutral() {
        let breakdown = score(&StockSnapshot::default(), Signal::NotAvailable);

        assert_relative_eq!(breakdown.valuation, 5.0);
        assert_relative_eq!(breakdown.profitability, 5.0);
        assert_relative_eq!(breakdown.growth, 5.0);
        assert_relative_eq!(breakdown.financial_health, 5.0);
        assert_relative_eq!(breakdown.technical, 5.0);
        assert_relative_eq!(breakdown.composite, 50.0);
    }

    #[test]
    fn test_best_case_snapshot_scores_one_hundred() {
        let snapshot = snapshot_with(|s| {
            s.pe_ratio = Some(12.0);
            s.pb_ratio = Some(1.2);
            s.peg_ratio = Some(0.8);
            s.net_margin = Some(25.0);
            s.roe = Some(30.0);
            s.roa = Some(20.0);
            s.revenue_growth = Some(30.0);
            s.earnings_growth = Some(35.0);
            s.debt_to_equity = Some(20.0);
            s.current_ratio = Some(2.5);
            s.free_cash_flow = Some(20_000_000_000.0);
        });
        let breakdown = score(&snapshot, Signal::Buy);

        assert_relative_eq!(breakdown.composite, 100.0);
    }

    #[test]
    fn test_pe_subscore_monotonic_across_boundaries() {
        let mut previous = f64::NEG_INFINITY;
        for pe in [40.0, 34.0, 24.0, 14.0] {
            let snapshot = snapshot_with(|s| s.pe_ratio = Some(pe));
            let composite = score(&snapshot, Signal::NotAvailable).composite;
            assert!(composite >= previous, "P/E {} regressed the score", pe);
            previous = composite;
        }
    }

    #[test]
    fn test_percent_metrics_accept_decimal_and_scaled_forms() {
        let decimal = snapshot_with(|s| s.net_margin = Some(0.12));
        let scaled = snapshot_with(|s| s.net_margin = Some(12.0));

        let a = score(&decimal, Signal::NotAvailable);
        let b = score(&scaled, Signal::NotAvailable);
        assert_relative_eq!(a.profitability, b.profitability);
    }

    #[test]
    fn test_negative_growth_floors_at_two() {
        let snapshot = snapshot_with(|s| s.revenue_growth = Some(-5.0));
        let breakdown = score(&snapshot, Signal::NotAvailable);

        // Revenue growth floors at 2, earnings growth missing stays 5.
        assert_relative_eq!(breakdown.growth, 3.5);
    }

    #[test]
    fn test_negative_margin_floors_at_one() {
        let snapshot = snapshot_with(|s| s.net_margin = Some(-10.0));
        let breakdown = score(&snapshot, Signal::NotAvailable);

        assert_relative_eq!(breakdown.profitability, (1.0 + 5.0 + 5.0) / 3.0);
    }

    #[test]
    fn test_current_ratio_peaks_in_two_to_three_band() {
        let ideal = snapshot_with(|s| s.current_ratio = Some(2.5));
        let wasteful = snapshot_with(|s| s.current_ratio = Some(3.5));

        let ideal_health = score(&ideal, Signal::NotAvailable).financial_health;
        let wasteful_health = score(&wasteful, Signal::NotAvailable).financial_health;
        assert!(ideal_health > wasteful_health);
    }

    #[test]
    fn test_technical_signal_moves_composite_by_its_weight() {
        let snapshot = StockSnapshot::default();
        let buy = score(&snapshot, Signal::Buy).composite;
        let sell = score(&snapshot, Signal::Sell).composite;

        // (10 - 1) * 0.10 * 10
        assert_relative_eq!(buy - sell, 9.0);
    }

    #[test]
    fn test_negative_pe_is_neutral() {
        let negative = snapshot_with(|s| s.pe_ratio = Some(-5.0));
        let missing = StockSnapshot::default();

        assert_relative_eq!(
            score(&negative, Signal::NotAvailable).valuation,
            score(&missing, Signal::NotAvailable).valuation
        );
    }

    #[test]
    fn test_composite_rounds_to_one_decimal() {
        let snapshot = snapshot_with(|s| {
            s.pe_ratio = Some(20.0);
            s.net_margin = Some(12.0);
        });
        let composite = score(&snapshot, Signal::NotAvailable).composite;

        assert_relative_eq!(composite * 10.0, (composite * 10.0).round());
    }
}
