//! Signal computation: streaks, regime, action, orchestration.

pub mod action;
pub mod orchestrator;
pub mod regime;
pub mod streak;

pub use action::Action;
pub use orchestrator::{
    compute_signal, evaluate_bars, latest_close, SignalError, SignalSources, StrategyParams,
};
pub use regime::{Regime, RegimeThresholds};
pub use streak::{streak, streaks, StreakDirection};
