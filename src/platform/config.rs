// LogHook - platform/config.rs
//
// Config directory resolution and config.toml loading with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::flags::{FeatureFlags, LevelFlags, PartialPatchConfig, TracePolicy};
use crate::core::logger::LoggerOptions;
use crate::core::prefix::LogPrefix;
use crate::util::constants;
use crate::util::error::{ConfigError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogHook configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loghook/ or %APPDATA%\LogHook\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[levels]` section.
    pub levels: LevelFlags,
    /// `[features]` section.
    pub features: FeaturesSection,
    /// `[prefix]` section.
    pub prefix: PrefixSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[features]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FeaturesSection {
    pub global_patching: Option<bool>,
    pub stack_trace_on_error: Option<bool>,
    pub global_error_tracing: Option<bool>,
    /// "gated" or "legacy".
    pub trace_policy: Option<String>,
    /// `[features.partial_patch]` table.
    pub partial_patch: PartialPatchConfig,
}

/// `[prefix]` config section. `value` wins over `timestamp_label`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PrefixSection {
    pub value: Option<String>,
    pub timestamp_label: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Internal diagnostics level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub level_flags: LevelFlags,
    pub features: FeatureFlags,
    /// `None` keeps the built-in default prefix.
    pub prefix: Option<LogPrefix>,
    /// Internal diagnostics level.
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Logger options carrying this configuration. Host capabilities
    /// (console, events, environment, exit) are left to their defaults.
    pub fn to_options(&self) -> LoggerOptions {
        let options = LoggerOptions::new()
            .level_flags(self.level_flags)
            .features(self.features);
        match &self.prefix {
            Some(prefix) => options.prefix(prefix.clone()),
            None => options,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
/// Invalid individual values fall back to their defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw(&config_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, issues) = validate(raw);
    warnings.extend(issues.iter().map(|e| format!("{e}. Using default.")));

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Load `path` strictly: a missing file, an unparseable file, or any
/// invalid value is an error.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let raw = read_raw(path)?;
    let (config, mut issues) = validate(raw);
    if issues.is_empty() {
        tracing::info!(path = %path.display(), "Loaded config file");
        Ok(config)
    } else {
        Err(issues.swap_remove(0).into())
    }
}

fn read_raw(path: &Path) -> std::result::Result<RawConfig, ConfigError> {
    let size = std::fs::metadata(path)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn a raw config into an `AppConfig`, collecting every invalid value.
fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut issues = Vec::new();
    let mut config = AppConfig {
        level_flags: raw.levels,
        ..AppConfig::default()
    };

    // -- Features --
    let section = &raw.features;
    let mut features = FeatureFlags::new()
        .global_patching(section.global_patching.unwrap_or(false))
        .partial_patch(section.partial_patch)
        .stack_trace_on_error(section.stack_trace_on_error.unwrap_or(false))
        .global_error_tracing(section.global_error_tracing.unwrap_or(false));

    if let Some(ref policy) = section.trace_policy {
        match policy.parse::<TracePolicy>() {
            Ok(policy) => features = features.trace_policy(policy),
            Err(e) => issues.push(ConfigError::ValueInvalid {
                field: "[features] trace_policy".to_string(),
                value: e.input,
                expected: "\"gated\" or \"legacy\"".to_string(),
            }),
        }
    }
    config.features = features;

    // -- Prefix --
    let prefix_field = |field: &str, value: &str| {
        if value.len() > constants::MAX_PREFIX_LENGTH {
            Err(ConfigError::ValueInvalid {
                field: format!("[prefix] {field}"),
                value: format!("{}...", value.chars().take(32).collect::<String>()),
                expected: format!("at most {} bytes", constants::MAX_PREFIX_LENGTH),
            })
        } else {
            Ok(value.to_string())
        }
    };
    if let Some(ref value) = raw.prefix.value {
        match prefix_field("value", value) {
            Ok(v) => config.prefix = Some(LogPrefix::Fixed(v)),
            Err(e) => issues.push(e),
        }
    } else if let Some(ref label) = raw.prefix.timestamp_label {
        match prefix_field("timestamp_label", label) {
            Ok(l) => config.prefix = Some(LogPrefix::timestamped(l)),
            Err(e) => issues.push(e),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            issues.push(ConfigError::ValueInvalid {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, trace".to_string(),
            });
        }
    }

    (config, issues)
}
