// LogHook - core/model.rs
//
// Core vocabulary shared by every layer: the six levels and the argument
// type that flows through the dispatch pipeline.

use crate::util::error::ParseLevelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single call argument.
///
/// Arguments are opaque to the pipeline: strings, numbers, and structured
/// objects are forwarded verbatim to observers and sinks.
pub type Arg = serde_json::Value;

// =============================================================================
// Level
// =============================================================================

/// The six severities a console exposes, in slot order.
///
/// `Log` is the "default" level (`console.log`); `Warning` is exposed by the
/// console as `warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[serde(alias = "default")]
    Log,
    Info,
    Error,
    Debug,
    #[serde(alias = "warn")]
    Warning,
    Trace,
}

impl Level {
    /// All levels in slot order.
    pub const ALL: [Level; 6] = [
        Level::Log,
        Level::Info,
        Level::Error,
        Level::Debug,
        Level::Warning,
        Level::Trace,
    ];

    /// Position of this level's slot in per-level tables.
    pub fn index(self) -> usize {
        match self {
            Level::Log => 0,
            Level::Info => 1,
            Level::Error => 2,
            Level::Debug => 3,
            Level::Warning => 4,
            Level::Trace => 5,
        }
    }

    /// Console method name for this level.
    pub fn name(self) -> &'static str {
        match self {
            Level::Log => "log",
            Level::Info => "info",
            Level::Error => "error",
            Level::Debug => "debug",
            Level::Warning => "warn",
            Level::Trace => "trace",
        }
    }

    /// Whether the stdio console writes this level to stderr.
    pub fn is_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Warning | Level::Trace)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "default" => Ok(Level::Log),
            "info" => Ok(Level::Info),
            "error" => Ok(Level::Error),
            "debug" => Ok(Level::Debug),
            "warn" | "warning" => Ok(Level::Warning),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("default".parse::<Level>(), Ok(Level::Log));
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warning));
        assert_eq!(" warning ".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("trace".parse::<Level>(), Ok(Level::Trace));
    }

    #[test]
    fn test_parse_unknown_level_fails() {
        let err = "fatal".parse::<Level>().unwrap_err();
        assert_eq!(err.input, "fatal");
    }

    #[test]
    fn test_warning_uses_console_name() {
        assert_eq!(Level::Warning.name(), "warn");
        assert_eq!(Level::Warning.to_string(), "warn");
    }
}
