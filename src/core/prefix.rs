// LogHook - core/prefix.rs
//
// The value injected in front of every emitted call.

use crate::util::constants::DEFAULT_LOG_PREFIX;
use std::fmt;
use std::sync::Arc;

/// Prefix injected before call arguments.
///
/// A dynamic prefix is evaluated on every call and never cached.
#[derive(Clone)]
pub enum LogPrefix {
    Fixed(String),
    Dynamic(Arc<dyn Fn() -> String + Send + Sync>),
}

impl LogPrefix {
    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// `[<label>: <RFC 3339 UTC timestamp>]`, stamped per call.
    pub fn timestamped(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::dynamic(move || format!("[{label}: {}]", chrono::Utc::now().to_rfc3339()))
    }

    /// Produce the prefix for the current call.
    pub fn resolve(&self) -> String {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Dynamic(f) => f(),
        }
    }
}

impl Default for LogPrefix {
    fn default() -> Self {
        Self::Fixed(DEFAULT_LOG_PREFIX.to_string())
    }
}

impl fmt::Debug for LogPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
