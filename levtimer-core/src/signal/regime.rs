//! Regime resolver: streak counts to a discrete trend regime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trend classification of the reference instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Up,
    Down,
    Neutral,
}

impl Regime {
    pub fn label(self) -> &'static str {
        match self {
            Regime::Up => "up",
            Regime::Down => "down",
            Regime::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum streak lengths that confirm a regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeThresholds {
    pub up_confirm: usize,
    pub down_confirm: usize,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            up_confirm: 2,
            down_confirm: 5,
        }
    }
}

impl RegimeThresholds {
    /// Resolve the regime. Up is checked first, so satisfying both thresholds
    /// resolves to `Up`.
    pub fn resolve(&self, up_streak: usize, down_streak: usize) -> Regime {
        if up_streak >= self.up_confirm {
            Regime::Up
        } else if down_streak >= self.down_confirm {
            Regime::Down
        } else {
            Regime::Neutral
        }
    }
}
