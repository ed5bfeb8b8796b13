//! levtimer CLI: daily EMA timing signal and position bookkeeping.
//!
//! Commands:
//! - `signal`: fetch end-of-day data, compute the regime and print the action
//! - `position show`: print the stored position
//! - `position set`: store a new position (held or cash)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use levtimer_core::data::{HttpFetcher, RoutingFetcher};
use levtimer_core::signal::{Action, SignalSources};
use levtimer_core::store::JsonPositionStore;
use levtimer_core::{Position, Session, SignalSnapshot, TimerConfig};

#[derive(Parser)]
#[command(
    name = "levtimer",
    about = "levtimer: EMA60 regime signal for leveraged-ETF timing"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/levtimer/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute today's signal and the recommended next-day action.
    Signal {
        /// Evaluate as if holding this position (not persisted).
        #[arg(long)]
        position: Option<Position>,

        /// Read the primary series from a local CSV instead of the network.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Read the secondary series from a local CSV instead of the network.
        #[arg(long)]
        secondary_csv: Option<PathBuf>,

        /// Skip the secondary instrument.
        #[arg(long, default_value_t = false)]
        no_secondary: bool,

        /// Print the snapshot and action as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show or change the stored position.
    Position {
        #[command(subcommand)]
        action: PositionAction,
    },
}

#[derive(Subcommand)]
enum PositionAction {
    /// Print the stored position.
    Show,
    /// Store a new position.
    Set {
        /// held or cash
        position: Position,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TimerConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Signal {
            position,
            csv,
            secondary_csv,
            no_secondary,
            json,
        } => run_signal(&config, position, csv, secondary_csv, no_secondary, json),
        Commands::Position { action } => match action {
            PositionAction::Show => run_position_show(&config),
            PositionAction::Set { position } => run_position_set(&config, position),
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn position_store(config: &TimerConfig) -> Result<JsonPositionStore> {
    match &config.position_file {
        Some(path) => Ok(JsonPositionStore::new(path)),
        None => Ok(JsonPositionStore::at_default_location()?),
    }
}

fn resolve_sources(
    config: &TimerConfig,
    csv: Option<PathBuf>,
    secondary_csv: Option<PathBuf>,
    no_secondary: bool,
) -> SignalSources {
    let mut sources = config.sources();
    if let Some(path) = csv {
        sources.primary = path.display().to_string();
    }
    if let Some(path) = secondary_csv {
        sources.secondary = Some(path.display().to_string());
    }
    if no_secondary {
        sources.secondary = None;
    }
    sources
}

fn run_signal(
    config: &TimerConfig,
    position_override: Option<Position>,
    csv: Option<PathBuf>,
    secondary_csv: Option<PathBuf>,
    no_secondary: bool,
    json: bool,
) -> Result<()> {
    let secondary_name = secondary_label(config, secondary_csv.as_deref());
    let sources = resolve_sources(config, csv, secondary_csv, no_secondary);
    let fetcher = RoutingFetcher::new(HttpFetcher::new(config.http_timeout())?);
    let params = config.params();

    let mut session = Session::open(position_store(config)?)?;
    let snapshot = session
        .refresh(&fetcher, &sources, &params)
        .with_context(|| format!("computing signal from {}", sources.primary))?
        .clone();

    let position = position_override.unwrap_or(session.position());
    let action = Action::recommend(position, snapshot.regime);

    if json {
        let out = serde_json::json!({
            "snapshot": snapshot,
            "position": position,
            "action": action,
            "resulting_position": action.resulting_position(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_summary(config, &snapshot, position, action, &secondary_name);
    }
    Ok(())
}

/// Display name for the secondary close: the configured symbol, else the
/// stem of an explicit `--secondary-csv` file.
fn secondary_label(config: &TimerConfig, secondary_csv: Option<&Path>) -> String {
    let configured = config
        .secondary_symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(symbol) = configured {
        return symbol.to_uppercase();
    }
    secondary_csv
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| "SECONDARY".to_string())
}

fn print_summary(
    config: &TimerConfig,
    snap: &SignalSnapshot,
    position: Position,
    action: Action,
    secondary_name: &str,
) {
    let thresholds = config.params().thresholds;

    println!(
        "{} as of {}",
        config.primary_symbol.to_uppercase(),
        snap.as_of
    );
    println!("  close       {:>10.2}", snap.reference_close);
    println!(
        "  EMA{:<8} {:>10.2}  ({:+.2}%)",
        config.ema_window,
        snap.ema_value,
        snap.distance_pct()
    );
    println!(
        "  streak      up {} / down {}",
        snap.up_streak, snap.down_streak
    );
    println!("  regime      {}", snap.regime);
    let remaining = snap.days_to_action(position, &thresholds);
    match position {
        Position::Held => println!("  exit needs  {remaining} more close(s) below EMA"),
        Position::Cash => println!("  enter needs {remaining} more close(s) above EMA"),
    }
    if let Some(close) = snap.secondary_close {
        println!("  {:<11} {:>10.2}", secondary_name, close);
    }
    println!();
    println!("Position: {position}");
    println!(
        "Action:   {action} ({}) -> {}",
        action.describe(),
        action.resulting_position()
    );
}

fn run_position_show(config: &TimerConfig) -> Result<()> {
    let store = position_store(config)?;
    let session = Session::open(&store)?;
    println!("{} ({})", session.position(), store.path().display());
    Ok(())
}

fn run_position_set(config: &TimerConfig, position: Position) -> Result<()> {
    let store = position_store(config)?;
    let mut session = Session::open(&store)?;
    session.set_position(position)?;
    println!("Position set to {position} ({})", store.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_label_prefers_configured_symbol() {
        let config = TimerConfig::default();
        assert_eq!(
            secondary_label(&config, Some(Path::new("/data/upro.csv"))),
            "TQQQ.US"
        );
    }

    #[test]
    fn secondary_label_falls_back_to_csv_stem() {
        let config = TimerConfig {
            secondary_symbol: Some(String::new()),
            ..TimerConfig::default()
        };
        assert_eq!(
            secondary_label(&config, Some(Path::new("/data/tqqq.csv"))),
            "TQQQ"
        );

        let config = TimerConfig {
            secondary_symbol: None,
            ..TimerConfig::default()
        };
        assert_eq!(secondary_label(&config, Some(Path::new("upro.csv"))), "UPRO");
        assert_eq!(secondary_label(&config, None), "SECONDARY");
    }

    #[test]
    fn csv_overrides_replace_sources() {
        let config = TimerConfig {
            secondary_symbol: Some(String::new()),
            ..TimerConfig::default()
        };
        let sources = resolve_sources(
            &config,
            Some(PathBuf::from("qqq.csv")),
            Some(PathBuf::from("tqqq.csv")),
            false,
        );
        assert_eq!(sources.primary, "qqq.csv");
        assert_eq!(sources.secondary.as_deref(), Some("tqqq.csv"));

        let sources = resolve_sources(&config, None, Some(PathBuf::from("tqqq.csv")), true);
        assert_eq!(sources.secondary, None);
    }
}
