//! The user's holding state, owned outside the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the user currently holds the leveraged instrument or sits in cash.
///
/// Defaults to `Held` when nothing has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Held,
    Cash,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Held => "held",
            Position::Cash => "cash",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position '{0}' (expected 'held' or 'cash')")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "held" => Ok(Position::Held),
            "cash" => Ok(Position::Cash),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}
