//! Streak classifier: consecutive most-recent closes on one side of the EMA.

/// Side of the EMA a close must be on to extend the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakDirection {
    /// Close strictly above the EMA.
    Above,
    /// Close strictly below the EMA.
    Below,
}

impl StreakDirection {
    fn holds(self, close: f64, ema: f64) -> bool {
        match self {
            StreakDirection::Above => close > ema,
            StreakDirection::Below => close < ema,
        }
    }
}

/// Count consecutive closes, scanning backward from the most recent index,
/// that sit strictly on `direction`'s side of the EMA.
///
/// `closes` and `ema` are aligned at their tails. An undefined (NaN) EMA value
/// marks the end of usable history and stops the scan; equality never counts.
pub fn streak(closes: &[f64], ema: &[f64], direction: StreakDirection) -> usize {
    let mut count = 0;
    for (&close, &ema_value) in closes.iter().rev().zip(ema.iter().rev()) {
        if ema_value.is_nan() {
            break;
        }
        if !direction.holds(close, ema_value) {
            break;
        }
        count += 1;
    }
    count
}

/// Up and down streaks for the same series.
pub fn streaks(closes: &[f64], ema: &[f64]) -> (usize, usize) {
    (
        streak(closes, ema, StreakDirection::Above),
        streak(closes, ema, StreakDirection::Below),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    #[test]
    fn counts_trailing_closes_above() {
        let closes = [99.0, 101.0, 102.0, 103.0];
        let ema = [100.0; 4];
        assert_eq!(streak(&closes, &ema, StreakDirection::Above), 3);
        assert_eq!(streak(&closes, &ema, StreakDirection::Below), 0);
    }

    #[test]
    fn counts_trailing_closes_below() {
        let closes = [101.0, 99.0, 98.0];
        let ema = [100.0; 3];
        assert_eq!(streak(&closes, &ema, StreakDirection::Below), 2);
    }

    #[test]
    fn latest_bar_failing_returns_zero() {
        let closes = [101.0, 102.0, 99.0];
        let ema = [100.0; 3];
        assert_eq!(streak(&closes, &ema, StreakDirection::Above), 0);
    }

    #[test]
    fn equality_breaks_both_directions() {
        let closes = [101.0, 100.0];
        let ema = [100.0, 100.0];
        assert_eq!(streaks(&closes, &ema), (0, 0));
    }

    #[test]
    fn undefined_ema_ends_the_scan() {
        let closes = [150.0, 150.0, 150.0, 150.0];
        let ema = [NAN, NAN, 100.0, 100.0];
        assert_eq!(streak(&closes, &ema, StreakDirection::Above), 2);
    }

    #[test]
    fn empty_ema_gives_zero() {
        assert_eq!(streak(&[1.0, 2.0], &[], StreakDirection::Above), 0);
    }
}
