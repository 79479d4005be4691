//! Five-indicator signal engine: momentum, trend convergence, moving
//! average crossover, volatility bands, and volume, reduced to one
//! consensus signal by majority vote over the four directional
//! indicators.

use serde::{Deserialize, Serialize};

use screener_core::{Bar, ScreenerError, Signal, VolumeLevel};

use crate::indicators::{bollinger_bands, macd, rsi, sma};

pub const RSI_PERIOD: usize = 14;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

pub const SMA_FAST_PERIOD: usize = 50;
pub const SMA_SLOW_PERIOD: usize = 200;

pub const BAND_PERIOD: usize = 20;
pub const BAND_WIDTH: f64 = 2.0;

pub const VOLUME_WINDOW: usize = 20;
pub const VOLUME_SPIKE_RATIO: f64 = 1.5;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn group_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Momentum oscillator outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumCheck {
    pub value: Option<f64>,
    pub signal: Signal,
    pub detail: String,
}

impl MomentumCheck {
    fn not_available(detail: &str) -> Self {
        Self {
            value: None,
            signal: Signal::NotAvailable,
            detail: detail.to_string(),
        }
    }
}

/// Trend-convergence (MACD) outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendCheck {
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub signal: Signal,
    pub detail: String,
}

impl TrendCheck {
    fn not_available(detail: &str) -> Self {
        Self {
            macd: None,
            signal_line: None,
            signal: Signal::NotAvailable,
            detail: detail.to_string(),
        }
    }
}

/// 50/200 moving-average crossover outcome. Fewer than 200 observations
/// is a defined degraded state (HOLD, `sma_200` absent), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverCheck {
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub signal: Signal,
    pub detail: String,
}

impl CrossoverCheck {
    fn not_available(detail: &str) -> Self {
        Self {
            sma_50: None,
            sma_200: None,
            signal: Signal::NotAvailable,
            detail: detail.to_string(),
        }
    }
}

/// Volatility-band outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCheck {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub price: Option<f64>,
    pub signal: Signal,
    pub detail: String,
}

impl BandCheck {
    fn not_available(detail: &str) -> Self {
        Self {
            upper: None,
            middle: None,
            lower: None,
            price: None,
            signal: Signal::NotAvailable,
            detail: detail.to_string(),
        }
    }
}

/// Volume outcome. Informational only: excluded from the consensus vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeCheck {
    pub current_volume: Option<f64>,
    pub avg_volume: Option<f64>,
    pub ratio: Option<f64>,
    pub level: VolumeLevel,
    pub detail: String,
}

impl VolumeCheck {
    fn not_available(detail: &str) -> Self {
        Self {
            current_volume: None,
            avg_volume: None,
            ratio: None,
            level: VolumeLevel::NotAvailable,
            detail: detail.to_string(),
        }
    }
}

/// Consensus over the four directional indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusSignal {
    pub signal: Signal,
    pub detail: String,
}

/// All five indicator outcomes for one ticker plus the derived
/// consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub ticker: String,
    pub momentum: MomentumCheck,
    pub trend: TrendCheck,
    pub crossover: CrossoverCheck,
    pub bands: BandCheck,
    pub volume: VolumeCheck,
    pub overall: ConsensusSignal,
}

impl SignalReport {
    /// Degraded report for a missing or too-short price series. This is
    /// compliant output, not an error.
    pub fn no_data(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            momentum: MomentumCheck::not_available("No data available"),
            trend: TrendCheck::not_available("No data available"),
            crossover: CrossoverCheck::not_available("No data available"),
            bands: BandCheck::not_available("No data available"),
            volume: VolumeCheck::not_available("No data available"),
            overall: ConsensusSignal {
                signal: Signal::NotAvailable,
                detail: "No price data available".to_string(),
            },
        }
    }
}

fn momentum_check(closes: &[f64]) -> Result<MomentumCheck, ScreenerError> {
    let series = rsi(closes, RSI_PERIOD);
    let latest = series.last().copied().ok_or_else(|| {
        ScreenerError::InsufficientData(format!("RSI needs {} closes", RSI_PERIOD + 1))
    })?;
    let value = round2(latest);

    let (signal, detail) = if value < RSI_OVERSOLD {
        (Signal::Buy, format!("RSI at {} - Oversold (below 30)", value))
    } else if value > RSI_OVERBOUGHT {
        (Signal::Sell, format!("RSI at {} - Overbought (above 70)", value))
    } else {
        (Signal::Hold, format!("RSI at {} - Neutral range (30-70)", value))
    };

    Ok(MomentumCheck {
        value: Some(value),
        signal,
        detail,
    })
}

fn trend_check(closes: &[f64]) -> Result<TrendCheck, ScreenerError> {
    let series = macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let m = &series.macd_line;
    let s = &series.signal_line;
    if m.len() < 2 || s.len() < 2 {
        return Err(ScreenerError::InsufficientData(
            "MACD signal line needs two smoothed values".to_string(),
        ));
    }

    let latest_macd = round4(m[m.len() - 1]);
    let latest_signal = round4(s[s.len() - 1]);
    // Raw previous values decide whether the cross just happened.
    let prev_macd = m[m.len() - 2];
    let prev_signal = s[s.len() - 2];

    let (signal, detail) = if latest_macd > latest_signal {
        let detail = if prev_macd <= prev_signal {
            format!(
                "MACD ({}) crossed above signal ({}) - Bullish crossover",
                latest_macd, latest_signal
            )
        } else {
            format!("MACD ({}) above signal ({}) - Bullish", latest_macd, latest_signal)
        };
        (Signal::Buy, detail)
    } else if latest_macd < latest_signal {
        let detail = if prev_macd >= prev_signal {
            format!(
                "MACD ({}) crossed below signal ({}) - Bearish crossover",
                latest_macd, latest_signal
            )
        } else {
            format!("MACD ({}) below signal ({}) - Bearish", latest_macd, latest_signal)
        };
        (Signal::Sell, detail)
    } else {
        (
            Signal::Hold,
            format!("MACD ({}) equal to signal ({}) - Neutral", latest_macd, latest_signal),
        )
    };

    Ok(TrendCheck {
        macd: Some(latest_macd),
        signal_line: Some(latest_signal),
        signal,
        detail,
    })
}

fn crossover_check(closes: &[f64]) -> CrossoverCheck {
    let sma_50 = sma(closes, SMA_FAST_PERIOD).last().copied().map(round2);

    if closes.len() < SMA_SLOW_PERIOD {
        return CrossoverCheck {
            sma_50,
            sma_200: None,
            signal: Signal::Hold,
            detail: "Insufficient data for SMA 200".to_string(),
        };
    }

    let sma_200 = sma(closes, SMA_SLOW_PERIOD).last().copied().map(round2);
    let (fast, slow) = match (sma_50, sma_200) {
        (Some(f), Some(s)) => (f, s),
        _ => {
            return CrossoverCheck {
                sma_50: None,
                sma_200: None,
                signal: Signal::Hold,
                detail: "Insufficient data for SMA 200".to_string(),
            }
        }
    };

    let (signal, detail) = if fast > slow {
        (
            Signal::Buy,
            format!("SMA 50 ({}) above SMA 200 ({}) - Golden Cross territory", fast, slow),
        )
    } else if fast < slow {
        (
            Signal::Sell,
            format!("SMA 50 ({}) below SMA 200 ({}) - Death Cross territory", fast, slow),
        )
    } else {
        (
            Signal::Hold,
            format!("SMA 50 ({}) equal to SMA 200 ({}) - Neutral", fast, slow),
        )
    };

    CrossoverCheck {
        sma_50,
        sma_200,
        signal,
        detail,
    }
}

fn band_check(closes: &[f64]) -> Result<BandCheck, ScreenerError> {
    let bands = bollinger_bands(closes, BAND_PERIOD, BAND_WIDTH);
    let (upper, middle, lower) = match (
        bands.upper.last(),
        bands.middle.last(),
        bands.lower.last(),
    ) {
        (Some(u), Some(m), Some(l)) => (round2(*u), round2(*m), round2(*l)),
        _ => {
            return Err(ScreenerError::InsufficientData(format!(
                "Bollinger bands need {} closes",
                BAND_PERIOD
            )))
        }
    };

    let price = closes
        .last()
        .copied()
        .map(round2)
        .ok_or_else(|| ScreenerError::InsufficientData("empty close series".to_string()))?;

    let (signal, detail) = if price < lower {
        (
            Signal::Buy,
            format!("Price ({}) below lower band ({}) - Potentially oversold", price, lower),
        )
    } else if price > upper {
        (
            Signal::Sell,
            format!("Price ({}) above upper band ({}) - Potentially overbought", price, upper),
        )
    } else {
        (
            Signal::Hold,
            format!("Price ({}) within bands ({} - {}) - Neutral", price, lower, upper),
        )
    };

    Ok(BandCheck {
        upper: Some(upper),
        middle: Some(middle),
        lower: Some(lower),
        price: Some(price),
        signal,
        detail,
    })
}

fn volume_check(bars: &[Bar]) -> Result<VolumeCheck, ScreenerError> {
    let current = bars
        .last()
        .map(|b| b.volume)
        .ok_or_else(|| ScreenerError::InsufficientData("empty bar series".to_string()))?;

    let window = &bars[bars.len().saturating_sub(VOLUME_WINDOW)..];
    let avg = window.iter().map(|b| b.volume).sum::<f64>() / window.len() as f64;
    let ratio = if avg > 0.0 { round2(current / avg) } else { 0.0 };

    let (level, activity) = if ratio > VOLUME_SPIKE_RATIO {
        (VolumeLevel::High, "Unusual activity")
    } else {
        (VolumeLevel::Normal, "Normal activity")
    };

    Ok(VolumeCheck {
        current_volume: Some(current),
        avg_volume: Some(round2(avg)),
        ratio: Some(ratio),
        level,
        detail: format!(
            "Volume ({}) is {}x the 20-day average ({}) - {}",
            group_thousands(current),
            ratio,
            group_thousands(avg),
            activity
        ),
    })
}

/// Majority vote over the four directional indicators. Volume is
/// excluded. Ties (including all-HOLD and all-N/A) resolve to HOLD.
pub fn consensus(signals: [Signal; 4]) -> ConsensusSignal {
    let buys = signals.iter().filter(|s| **s == Signal::Buy).count();
    let sells = signals.iter().filter(|s| **s == Signal::Sell).count();

    let signal = if buys > sells {
        Signal::Buy
    } else if sells > buys {
        Signal::Sell
    } else {
        Signal::Hold
    };

    ConsensusSignal {
        signal,
        detail: format!("{} of 4 indicators suggest BUY", buys),
    }
}

/// Compute all five indicators and the consensus signal for one ticker.
///
/// Requires at least two closing prices; shorter series produce an
/// all-N/A report. Each indicator's failure is contained to its own
/// N/A entry so one broken computation never blanks the report.
pub fn compute(ticker: &str, bars: &[Bar]) -> SignalReport {
    if bars.len() < 2 {
        return SignalReport::no_data(ticker);
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let momentum = momentum_check(&closes)
        .unwrap_or_else(|_| MomentumCheck::not_available("Error calculating RSI"));
    let trend =
        trend_check(&closes).unwrap_or_else(|_| TrendCheck::not_available("Error calculating MACD"));
    let crossover = crossover_check(&closes);
    let bands = band_check(&closes)
        .unwrap_or_else(|_| BandCheck::not_available("Error calculating Bollinger Bands"));
    let volume = volume_check(bars)
        .unwrap_or_else(|_| VolumeCheck::not_available("Error calculating volume signal"));

    let overall = consensus([momentum.signal, trend.signal, crossover.signal, bands.signal]);

    SignalReport {
        ticker: ticker.to_string(),
        momentum,
        trend,
        crossover,
        bands,
        volume,
        overall,
    }
}
