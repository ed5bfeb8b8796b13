//! Signal orchestrator: fetch, parse, compute, assemble.
//!
//! The primary instrument drives the signal; any failure there aborts the run.
//! The secondary instrument is display-only: its outcome is a `Result` that is
//! folded into `Option` here, so a failure just leaves the field empty.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::{parse_bars, FetchError, Fetcher, ParseError};
use crate::domain::{bar, Bar, SignalSnapshot};
use crate::indicators::ema::{last_defined, Ema};
use crate::signal::regime::RegimeThresholds;
use crate::signal::streak::streaks;

/// Errors that abort a signal run.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed CSV: {0}")]
    Parse(#[from] ParseError),

    #[error("too few rows: got {got} (need {required})")]
    InsufficientHistory { got: usize, required: usize },
}

/// Strategy constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyParams {
    /// EMA window length.
    pub ema_window: usize,
    /// Extra bars required beyond the EMA window.
    pub safety_margin: usize,
    pub thresholds: RegimeThresholds,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            ema_window: 60,
            safety_margin: 5,
            thresholds: RegimeThresholds::default(),
        }
    }
}

impl StrategyParams {
    /// Minimum number of parsed bars a run needs.
    pub fn required_bars(&self) -> usize {
        self.ema_window + self.safety_margin
    }
}

/// Where to fetch the primary and the optional secondary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSources {
    pub primary: String,
    pub secondary: Option<String>,
}

/// Compute the snapshot from an already-parsed, date-sorted bar series.
pub fn evaluate_bars(bars: &[Bar], params: &StrategyParams) -> Result<SignalSnapshot, SignalError> {
    let required = params.required_bars();
    let insufficient = || SignalError::InsufficientHistory {
        got: bars.len(),
        required,
    };

    if bars.len() < required {
        return Err(insufficient());
    }
    let last = bars.last().ok_or_else(insufficient)?;

    let closes = bar::closes(bars);
    let ema = Ema::new(params.ema_window).compute(&closes);
    let ema_value = last_defined(&ema).ok_or_else(insufficient)?;

    let (up_streak, down_streak) = streaks(&closes, &ema);
    let regime = params.thresholds.resolve(up_streak, down_streak);

    debug!(
        as_of = %last.date,
        close = last.close,
        ema = ema_value,
        up_streak,
        down_streak,
        %regime,
        "evaluated series"
    );

    Ok(SignalSnapshot {
        as_of: last.date,
        reference_close: last.close,
        ema_value,
        up_streak,
        down_streak,
        regime,
        secondary_close: None,
    })
}

/// Fetch the primary series, evaluate it, then attach the secondary close if
/// that fetch succeeds.
pub fn compute_signal<F: Fetcher>(
    fetcher: &F,
    sources: &SignalSources,
    params: &StrategyParams,
) -> Result<SignalSnapshot, SignalError> {
    let text = fetcher.fetch(&sources.primary)?;
    let bars = parse_bars(&text)?;
    info!(
        fetcher = fetcher.name(),
        url = %sources.primary,
        bars = bars.len(),
        "primary series loaded"
    );

    let mut snapshot = evaluate_bars(&bars, params)?;

    if let Some(url) = &sources.secondary {
        snapshot.secondary_close = match latest_close(fetcher, url) {
            Ok(close) => Some(close),
            Err(e) => {
                warn!(
                    fetcher = fetcher.name(),
                    url = %url,
                    error = %e,
                    "secondary instrument unavailable"
                );
                None
            }
        };
    }

    Ok(snapshot)
}

/// Most recent close of the document at `url`.
pub fn latest_close<F: Fetcher>(fetcher: &F, url: &str) -> Result<f64, SignalError> {
    let text = fetcher.fetch(url)?;
    let bars = parse_bars(&text)?;
    bars.last()
        .map(|b| b.close)
        .ok_or(SignalError::InsufficientHistory {
            got: 0,
            required: 1,
        })
}
