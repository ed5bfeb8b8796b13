//! Indicator implementations.
//!
//! Only the EMA is used by the timing strategy. Series are plain `Vec<f64>`
//! aligned with the close sequence, with NaN marking undefined entries.

pub mod ema;

pub use ema::{ema_of_series, Ema};

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
