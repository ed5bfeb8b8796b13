//! Bar: one end-of-day observation of a single instrument.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily close for a single instrument.
///
/// The parser only produces bars whose close is finite and non-negative,
/// and returns them in ascending date order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// True if the close satisfies the bar invariant (finite, >= 0).
    pub fn is_valid_close(close: f64) -> bool {
        close.is_finite() && close >= 0.0
    }
}

/// Extract the close column from a bar series, preserving order.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 403.5)
    }

    #[test]
    fn valid_close_rejects_nan_inf_and_negative() {
        assert!(Bar::is_valid_close(0.0));
        assert!(Bar::is_valid_close(403.5));
        assert!(!Bar::is_valid_close(f64::NAN));
        assert!(!Bar::is_valid_close(f64::INFINITY));
        assert!(!Bar::is_valid_close(-1.0));
    }

    #[test]
    fn closes_preserves_order() {
        let a = sample_bar();
        let b = Bar::new(a.date.succ_opt().unwrap(), 404.0);
        assert_eq!(closes(&[a, b]), vec![403.5, 404.0]);
    }

    #[test]
    fn bar_serializes_date_as_iso() {
        let json = serde_json::to_string(&sample_bar()).unwrap();
        assert!(json.contains("\"2024-01-02\""));
    }
}
