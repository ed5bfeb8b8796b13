//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::signal::{RegimeThresholds, SignalSources, StrategyParams};

/// Placeholder replaced by the instrument symbol in `url_template`.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Reference instrument the EMA is computed on.
    pub primary_symbol: String,
    /// Display-only instrument (typically the leveraged ETF). Empty disables it.
    pub secondary_symbol: Option<String>,
    /// Daily CSV URL with a `{symbol}` placeholder.
    pub url_template: String,
    pub ema_window: usize,
    pub safety_margin: usize,
    pub up_confirm: usize,
    pub down_confirm: usize,
    pub http_timeout_secs: u64,
    /// Overrides the default position file location.
    pub position_file: Option<PathBuf>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        let params = StrategyParams::default();
        Self {
            primary_symbol: "qqq.us".into(),
            secondary_symbol: Some("tqqq.us".into()),
            url_template: "https://stooq.com/q/d/l/?s={symbol}&i=d".into(),
            ema_window: params.ema_window,
            safety_margin: params.safety_margin,
            up_confirm: params.thresholds.up_confirm,
            down_confirm: params.thresholds.down_confirm,
            http_timeout_secs: 30,
            position_file: None,
        }
    }
}

impl TimerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/levtimer/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("levtimer").join("config.toml"))
    }

    /// Load an explicit file, or the default file if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ema_window == 0 {
            return Err(ConfigError::Invalid("ema_window must be >= 1".into()));
        }
        if self.up_confirm == 0 || self.down_confirm == 0 {
            return Err(ConfigError::Invalid(
                "confirmation thresholds must be >= 1".into(),
            ));
        }
        if self.primary_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("primary_symbol is empty".into()));
        }
        if !self.url_template.contains(SYMBOL_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "url_template must contain {SYMBOL_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    pub fn url_for(&self, symbol: &str) -> String {
        self.url_template.replace(SYMBOL_PLACEHOLDER, symbol)
    }

    pub fn params(&self) -> StrategyParams {
        StrategyParams {
            ema_window: self.ema_window,
            safety_margin: self.safety_margin,
            thresholds: RegimeThresholds {
                up_confirm: self.up_confirm,
                down_confirm: self.down_confirm,
            },
        }
    }

    pub fn sources(&self) -> SignalSources {
        SignalSources {
            primary: self.url_for(&self.primary_symbol),
            secondary: self
                .secondary_symbol
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| self.url_for(s)),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = TimerConfig::from_toml("").unwrap();
        assert_eq!(config, TimerConfig::default());
        assert_eq!(config.params(), StrategyParams::default());
    }

    #[test]
    fn partial_override() {
        let config = TimerConfig::from_toml(
            r#"
            primary_symbol = "spy.us"
            secondary_symbol = "upro.us"
            down_confirm = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.params().thresholds.down_confirm, 3);
        assert_eq!(config.params().thresholds.up_confirm, 2);
        let sources = config.sources();
        assert_eq!(sources.primary, "https://stooq.com/q/d/l/?s=spy.us&i=d");
        assert_eq!(
            sources.secondary.as_deref(),
            Some("https://stooq.com/q/d/l/?s=upro.us&i=d")
        );
    }

    #[test]
    fn empty_secondary_disables_it() {
        let config = TimerConfig::from_toml("secondary_symbol = \"\"").unwrap();
        assert_eq!(config.sources().secondary, None);
    }

    #[test]
    fn rejects_zero_window() {
        let err = TimerConfig::from_toml("ema_window = 0").unwrap_err();
        assert!(err.to_string().contains("ema_window"));
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = TimerConfig::from_toml(r#"url_template = "https://example.test/q.csv""#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unparseable_toml() {
        assert!(matches!(
            TimerConfig::from_toml("ema_window = \"sixty\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TimerConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ema_window = 20\nsecondary_symbol = \"tqqq.us\"\n").unwrap();
        let config = TimerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.ema_window, 20);
    }
}
