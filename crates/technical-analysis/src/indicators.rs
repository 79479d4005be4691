//! Series math for the signal engine: moving averages, the relative
//! strength oscillator, trend convergence, and volatility bands.
//!
//! Every function returns an empty series when the input is too short
//! for its window; callers decide how to degrade.

/// Simple moving average. One output per full window, tail-aligned:
/// the last element covers the latest `period` inputs.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }
    data.windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Exponential moving average seeded with the SMA of the first window.
/// Emits one value per bar from index `period - 1` onward.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut level = data[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(data.len() - period + 1);
    out.push(level);
    for &value in &data[period..] {
        level = alpha * value + (1.0 - alpha) * level;
        out.push(level);
    }
    out
}

fn smoothed_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Relative Strength Index with Wilder's smoothing. Needs at least
/// `period + 1` inputs (one change per pair of closes).
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period + 1 {
        return vec![];
    }

    let changes: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = changes[..period]
        .iter()
        .filter(|c| **c > 0.0)
        .sum::<f64>()
        / period as f64;
    let mut avg_loss = changes[..period]
        .iter()
        .filter(|c| **c < 0.0)
        .map(|c| -c)
        .sum::<f64>()
        / period as f64;

    let mut out = Vec::with_capacity(changes.len() - period + 1);
    out.push(smoothed_rsi(avg_gain, avg_loss));

    for &change in &changes[period..] {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        out.push(smoothed_rsi(avg_gain, avg_loss));
    }

    out
}

/// MACD line (fast EMA minus slow EMA) and its signal smoothing.
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
}

/// Both output series are tail-aligned with the input: the last element
/// of each refers to the latest bar.
pub fn macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    if fast == 0 || signal == 0 || slow <= fast || data.len() < slow {
        return MacdSeries {
            macd_line: vec![],
            signal_line: vec![],
        };
    }

    let ema_fast = ema(data, fast);
    let ema_slow = ema(data, slow);

    // The fast series starts earlier; drop its head so both series end
    // on the latest bar.
    let skip = ema_fast.len() - ema_slow.len();
    let macd_line: Vec<f64> = ema_fast[skip..]
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal);

    MacdSeries {
        macd_line,
        signal_line,
    }
}

/// Volatility bands around a simple moving average.
pub struct BandSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// `width` is the band half-width in population standard deviations.
pub fn bollinger_bands(data: &[f64], period: usize, width: f64) -> BandSeries {
    if period == 0 || data.len() < period {
        return BandSeries {
            upper: vec![],
            middle: vec![],
            lower: vec![],
        };
    }

    let middle = sma(data, period);
    let mut upper = Vec::with_capacity(middle.len());
    let mut lower = Vec::with_capacity(middle.len());

    for (window, mean) in data.windows(period).zip(middle.iter()) {
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
        let dev = width * variance.sqrt();
        upper.push(mean + dev);
        lower.push(mean - dev);
    }

    BandSeries {
        upper,
        middle,
        lower,
    }
}
