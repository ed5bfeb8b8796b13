//! Action engine: the decision policy.
//!
//! A pure, total mapping from (held position, regime) to the next-day action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Position;
use crate::signal::regime::Regime;

/// Recommended next-day action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Buy: move from cash into the position.
    Enter,
    /// Sell: move from the position into cash.
    Exit,
    /// Stay in the position.
    HoldHeld,
    /// Stay in cash.
    HoldCash,
}

impl Action {
    pub fn recommend(position: Position, regime: Regime) -> Self {
        match (position, regime) {
            (Position::Cash, Regime::Up) => Action::Enter,
            (Position::Cash, Regime::Down | Regime::Neutral) => Action::HoldCash,
            (Position::Held, Regime::Down) => Action::Exit,
            (Position::Held, Regime::Up | Regime::Neutral) => Action::HoldHeld,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Enter => "enter",
            Action::Exit => "exit",
            Action::HoldHeld => "hold-held",
            Action::HoldCash => "hold-cash",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Action::Enter => "Buy at the next session",
            Action::Exit => "Sell at the next session",
            Action::HoldHeld => "Keep holding",
            Action::HoldCash => "Stay in cash",
        }
    }

    /// Position the user ends up in after following this action.
    pub fn resulting_position(self) -> Position {
        match self {
            Action::Enter | Action::HoldHeld => Position::Held,
            Action::Exit | Action::HoldCash => Position::Cash,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
