#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use screener_core::{Bar, Signal, VolumeLevel};

    use crate::indicators::*;
    use crate::signals::*;

    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    fn bars_from_closes(closes: &[f64], volume: f64) -> Vec<Bar> {
        let n = closes.len() as i64;
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: Utc::now() - Duration::days(n - i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume,
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 0.001);
        assert!((result[1] - 3.0).abs() < 0.001);
        assert!((result[2] - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma(&[1.0, 2.0], 5).is_empty());
        assert!(sma(&sample_prices(), 0).is_empty());
    }

    #[test]
    fn test_ema_seeds_with_sma() {
        let data = vec![22.0, 24.0, 23.0, 25.0, 26.0];
        let result = ema(&data, 3);

        assert_eq!(result.len(), 3);
        let seed = (22.0 + 24.0 + 23.0) / 3.0;
        assert!((result[0] - seed).abs() < 0.001);
    }

    #[test]
    fn test_ema_tracks_uptrend() {
        let data: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let result = ema(&data, 3);

        for pair in result.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_rsi_stays_in_range() {
        let result = rsi(&sample_prices(), 14);

        assert!(!result.is_empty());
        for &value in &result {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(rsi(&[1.0, 2.0, 3.0], 14).is_empty());
    }

    #[test]
    fn test_rsi_pure_uptrend_is_overbought() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&data, 14);

        assert!(*result.last().unwrap() > 70.0);
    }

    #[test]
    fn test_macd_series_are_tail_aligned() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let result = macd(&data, 12, 26, 9);

        assert_eq!(result.macd_line.len(), 50 - 26 + 1);
        assert_eq!(result.signal_line.len(), result.macd_line.len() - 9 + 1);
    }

    #[test]
    fn test_macd_insufficient_data() {
        let result = macd(&sample_prices(), 12, 26, 9);
        assert!(result.macd_line.is_empty());
        assert!(result.signal_line.is_empty());
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let result = bollinger_bands(&sample_prices(), 10, 2.0);

        assert_eq!(result.upper.len(), result.middle.len());
        assert_eq!(result.middle.len(), result.lower.len());
        for i in 0..result.upper.len() {
            assert!(result.upper[i] > result.lower[i]);
            assert!(result.upper[i] >= result.middle[i]);
            assert!(result.middle[i] >= result.lower[i]);
        }
    }

    #[test]
    fn test_bollinger_bands_narrow_on_constant_prices() {
        let data = vec![100.0; 20];
        let result = bollinger_bands(&data, 10, 2.0);

        for i in 0..result.upper.len() {
            assert!(result.upper[i] - result.lower[i] < 0.001);
        }
    }

    #[test]
    fn test_consensus_buy_majority() {
        let result = consensus([Signal::Buy, Signal::Buy, Signal::Sell, Signal::Hold]);
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.detail, "2 of 4 indicators suggest BUY");
    }

    #[test]
    fn test_consensus_tie_resolves_to_hold() {
        let result = consensus([Signal::Buy, Signal::Sell, Signal::Hold, Signal::Hold]);
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_consensus_two_two_tie_resolves_to_hold() {
        let result = consensus([Signal::Buy, Signal::Buy, Signal::Sell, Signal::Sell]);
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_consensus_sell_majority() {
        let result = consensus([Signal::Sell, Signal::Sell, Signal::Hold, Signal::NotAvailable]);
        assert_eq!(result.signal, Signal::Sell);
    }

    #[test]
    fn test_compute_short_series_is_all_not_available() {
        let bars = bars_from_closes(&[100.0], 1000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.momentum.signal, Signal::NotAvailable);
        assert_eq!(report.trend.signal, Signal::NotAvailable);
        assert_eq!(report.crossover.signal, Signal::NotAvailable);
        assert_eq!(report.bands.signal, Signal::NotAvailable);
        assert_eq!(report.volume.level, VolumeLevel::NotAvailable);
        assert_eq!(report.overall.signal, Signal::NotAvailable);
        assert_eq!(report.overall.detail, "No price data available");
    }

    #[test]
    fn test_crossover_under_200_bars_holds_with_no_slow_average() {
        let closes: Vec<f64> = (0..120).map(|i| 50.0 + i as f64 * 0.1).collect();
        let bars = bars_from_closes(&closes, 1000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.crossover.signal, Signal::Hold);
        assert!(report.crossover.sma_200.is_none());
        assert!(report.crossover.sma_50.is_some());
        assert!(report.crossover.detail.contains("Insufficient data"));
    }

    #[test]
    fn test_crossover_long_uptrend_is_golden_cross() {
        let closes: Vec<f64> = (0..250).map(|i| 50.0 + i as f64 * 0.5).collect();
        let bars = bars_from_closes(&closes, 1000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.crossover.signal, Signal::Buy);
        assert!(report.crossover.sma_50.unwrap() > report.crossover.sma_200.unwrap());
    }

    #[test]
    fn test_momentum_steady_decline_signals_buy() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let bars = bars_from_closes(&closes, 1000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.momentum.signal, Signal::Buy);
        assert!(report.momentum.value.unwrap() < 30.0);
    }

    #[test]
    fn test_volume_spike_is_flagged_high() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let mut bars = bars_from_closes(&closes, 1_000_000.0);
        if let Some(last) = bars.last_mut() {
            last.volume = 2_000_000.0;
        }
        let report = compute("TST", &bars);

        assert_eq!(report.volume.level, VolumeLevel::High);
        assert!(report.volume.ratio.unwrap() > 1.5);
        assert!(report.volume.detail.contains("Unusual activity"));
    }

    #[test]
    fn test_volume_flat_series_is_normal() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let bars = bars_from_closes(&closes, 1_000_000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.volume.level, VolumeLevel::Normal);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let closes: Vec<f64> = (0..250).map(|i| 80.0 + (i as f64 * 0.2).cos() * 5.0).collect();
        let bars = bars_from_closes(&closes, 500_000.0);

        let first = compute("TST", &bars);
        let second = compute("TST", &bars);
        assert_eq!(first, second);
    }

    #[test]
    fn test_one_broken_indicator_does_not_blank_report() {
        // 25 closes: enough for RSI and Bollinger, too short for the
        // MACD signal line. The trend entry degrades alone.
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i as f64 * 0.4).sin()).collect();
        let bars = bars_from_closes(&closes, 1000.0);
        let report = compute("TST", &bars);

        assert_eq!(report.trend.signal, Signal::NotAvailable);
        assert_ne!(report.momentum.signal, Signal::NotAvailable);
        assert_ne!(report.bands.signal, Signal::NotAvailable);
        assert_eq!(report.crossover.signal, Signal::Hold);
    }
}
