//! levtimer core: daily EMA timing signal for a leveraged-ETF strategy.
//!
//! - CSV bar ingestion and fetch collaborators (`data`)
//! - EMA indicator (`indicators`)
//! - Streak classifier, regime resolver, action engine, orchestrator (`signal`)
//! - Position persistence (`store`) and the host-side `session`
//! - TOML configuration (`config`)

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod session;
pub mod signal;
pub mod store;

pub use config::TimerConfig;
pub use domain::{Bar, Position, SignalSnapshot};
pub use session::Session;
pub use signal::{Action, Regime, SignalError};
