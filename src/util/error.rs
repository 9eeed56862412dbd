// LogHook - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The dispatch pipeline never produces errors; these types cover the
// edges of the crate: config loading and level-name parsing.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogHook operations.
#[derive(Debug)]
pub enum LogHookError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// A level name could not be parsed.
    Level(ParseLevelError),
}

impl fmt::Display for LogHookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Level(e) => write!(f, "Level error: {e}"),
        }
    }
}

impl std::error::Error for LogHookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Level(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Level parse errors
// ---------------------------------------------------------------------------

/// A string did not name one of the six levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    pub input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a level. Valid values: log, info, error, debug, warn, trace",
            self.input
        )
    }
}

impl std::error::Error for ParseLevelError {}

/// A string did not name a trace policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTracePolicyError {
    pub input: String,
}

impl fmt::Display for ParseTracePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a trace policy. Valid values: gated, legacy",
            self.input
        )
    }
}

impl std::error::Error for ParseTracePolicyError {}

impl From<ParseLevelError> for LogHookError {
    fn from(e: ParseLevelError) -> Self {
        Self::Level(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file does not exist.
    NotFound { path: PathBuf },

    /// The config file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not acceptable.
    ValueInvalid {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueInvalid {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is not valid. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogHookError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogHook results.
pub type Result<T> = std::result::Result<T, LogHookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_level_error_message_lists_levels() {
        let e = ParseLevelError {
            input: "loud".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'loud'"));
        assert!(msg.contains("warn"));
    }

    #[test]
    fn test_config_error_wraps_with_source() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: LogHookError = ConfigError::Io {
            path: PathBuf::from("/etc/loghook/config.toml"),
            source: io,
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error:"));
        let inner = err.source().expect("config error is the source");
        assert!(inner.source().is_some(), "io error is preserved in the chain");
    }

    #[test]
    fn test_level_error_converts() {
        let err: LogHookError = "shout".parse::<crate::core::model::Level>().unwrap_err().into();
        assert!(matches!(err, LogHookError::Level(ParseLevelError { ref input }) if input == "shout"));
    }
}
