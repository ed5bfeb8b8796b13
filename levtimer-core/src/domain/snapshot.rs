//! SignalSnapshot: the output of one orchestration run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::position::Position;
use crate::signal::regime::{Regime, RegimeThresholds};

/// Computed signal state as of the most recent bar.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub as_of: NaiveDate,
    pub reference_close: f64,
    pub ema_value: f64,
    pub up_streak: usize,
    pub down_streak: usize,
    pub regime: Regime,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary_close: Option<f64>,
}

impl SignalSnapshot {
    /// Distance of the reference close from its EMA, in percent.
    pub fn distance_pct(&self) -> f64 {
        if self.ema_value == 0.0 {
            return 0.0;
        }
        (self.reference_close / self.ema_value - 1.0) * 100.0
    }

    /// Additional closes above the EMA needed before the up regime confirms.
    ///
    /// Zero when the up streak already meets the threshold.
    pub fn days_to_up_confirm(&self, thresholds: &RegimeThresholds) -> usize {
        thresholds.up_confirm.saturating_sub(self.up_streak)
    }

    /// Additional closes below the EMA needed before the down regime confirms.
    pub fn days_to_down_confirm(&self, thresholds: &RegimeThresholds) -> usize {
        thresholds.down_confirm.saturating_sub(self.down_streak)
    }

    /// Closes still needed before the regime that changes `position` confirms:
    /// a down confirmation when held, an up confirmation when in cash.
    pub fn days_to_action(&self, position: Position, thresholds: &RegimeThresholds) -> usize {
        match position {
            Position::Held => self.days_to_down_confirm(thresholds),
            Position::Cash => self.days_to_up_confirm(thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(up: usize, down: usize) -> SignalSnapshot {
        SignalSnapshot {
            as_of: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            reference_close: 105.0,
            ema_value: 100.0,
            up_streak: up,
            down_streak: down,
            regime: Regime::Neutral,
            secondary_close: None,
        }
    }

    #[test]
    fn distance_pct_relative_to_ema() {
        let s = snapshot(1, 0);
        assert!((s.distance_pct() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn days_to_confirm_saturates() {
        let t = RegimeThresholds::default();
        assert_eq!(snapshot(1, 0).days_to_up_confirm(&t), 1);
        assert_eq!(snapshot(4, 0).days_to_up_confirm(&t), 0);
        assert_eq!(snapshot(0, 3).days_to_down_confirm(&t), 2);
        assert_eq!(snapshot(0, 0).days_to_down_confirm(&t), 5);
    }

    #[test]
    fn days_to_action_follows_position() {
        let t = RegimeThresholds::default();
        // Neutral with one close above: cash waits on up, held waits on down.
        let s = snapshot(1, 0);
        assert_eq!(s.days_to_action(Position::Cash, &t), 1);
        assert_eq!(s.days_to_action(Position::Held, &t), 5);

        let s = snapshot(0, 3);
        assert_eq!(s.days_to_action(Position::Cash, &t), 2);
        assert_eq!(s.days_to_action(Position::Held, &t), 2);
    }

    #[test]
    fn json_omits_missing_secondary() {
        let json = serde_json::to_string(&snapshot(0, 0)).unwrap();
        assert!(!json.contains("secondary_close"));
        assert!(json.contains("\"regime\":\"neutral\""));
    }
}
