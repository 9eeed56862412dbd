// LogHook - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogHook";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogHook";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dispatch
// =============================================================================

/// Prefix injected in front of every emitted call when none is configured.
pub const DEFAULT_LOG_PREFIX: &str = "[LogHook]";

/// Notice written through the original `log` sink when a patched level is
/// called while that level is disabled. The level name is appended.
pub const SUPPRESSION_NOTICE: &str = "[LogHook] call suppressed: level disabled";

/// Label forwarded to trace alongside an unhandled rejection in a
/// process-like host.
pub const UNHANDLED_REJECTION_LABEL: &str = "Unhandled Rejection at Promise";

/// Label forwarded to trace alongside an uncaught exception in a
/// process-like host.
pub const UNCAUGHT_EXCEPTION_LABEL: &str = "Uncaught Exception thrown";

/// Exit status used when the process is terminated after an uncaught
/// exception has been traced.
pub const UNCAUGHT_EXCEPTION_EXIT_CODE: i32 = 1;

/// Prefix written by the stdio console in front of trace output.
pub const TRACE_OUTPUT_PREFIX: &str = "Trace:";

// =============================================================================
// Configuration
// =============================================================================

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of a config file in bytes. Larger files are rejected.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum length of a configured fixed prefix or timestamp label.
pub const MAX_PREFIX_LENGTH: usize = 256;

// =============================================================================
// Logging
// =============================================================================

/// Default internal diagnostics level when neither RUST_LOG, --debug nor the
/// config file says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
