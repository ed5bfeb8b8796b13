//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! evaluated as EMA[t-1] + alpha * (close[t] - EMA[t-1]) so it stays finite
//! for any finite, non-negative input.
//! Seed: EMA[period-1] = SMA of first `period` close values.
//! Lookback: period - 1.

/// Trailing EMA over a close series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        ema_of_series(closes, self.period)
    }
}

/// Arithmetic mean that does not overflow when the plain sum would.
fn mean(values: &[f64]) -> f64 {
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / values.len() as f64;
    }
    // Running mean: each step moves by a bounded difference.
    values
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, &v)| m + (v - m) / (k + 1) as f64)
}

/// Compute an EMA series aligned index-for-index with `values`.
///
/// Returns an empty vector when there are fewer than `period` values (or
/// `period == 0`). Otherwise entries before `period - 1` are NaN.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    if period == 0 || n < period {
        return Vec::new();
    }

    let mut result = vec![f64::NAN; n];
    let alpha = 2.0 / (period as f64 + 1.0);

    let seed = mean(&values[..period]);
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        let ema = prev + alpha * (values[i] - prev);
        result[i] = ema;
        prev = ema;
    }

    result
}

/// Most recent defined EMA value, if any.
pub fn last_defined(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| !v.is_nan())
}
