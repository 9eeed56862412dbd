// LogHook - core/flags.rs
//
// Immutable configuration records consumed by the logger: which levels are
// allowed to emit, and which interception features are switched on.
// Every option defaults to false; construction never fails.

use crate::core::model::Level;
use crate::util::error::ParseTracePolicyError;
use serde::Deserialize;
use std::str::FromStr;

// =============================================================================
// Level flags
// =============================================================================

/// One enable flag per level. A disabled level is a complete no-op on the
/// facade and is suppressed when intercepted at the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelFlags {
    #[serde(alias = "log")]
    default: bool,
    info: bool,
    error: bool,
    debug: bool,
    #[serde(alias = "warn")]
    warning: bool,
    trace: bool,
}

impl LevelFlags {
    /// Every level disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level enabled.
    pub fn all() -> Self {
        Level::ALL.iter().fold(Self::new(), |flags, &l| flags.allow(l))
    }

    /// Return a copy with `level` enabled.
    #[must_use]
    pub fn allow(self, level: Level) -> Self {
        self.with(level, true)
    }

    /// Return a copy with `level` set to `allowed`.
    #[must_use]
    pub fn with(mut self, level: Level, allowed: bool) -> Self {
        match level {
            Level::Log => self.default = allowed,
            Level::Info => self.info = allowed,
            Level::Error => self.error = allowed,
            Level::Debug => self.debug = allowed,
            Level::Warning => self.warning = allowed,
            Level::Trace => self.trace = allowed,
        }
        self
    }

    pub fn is_allowed(&self, level: Level) -> bool {
        match level {
            Level::Log => self.default,
            Level::Info => self.info,
            Level::Error => self.error,
            Level::Debug => self.debug,
            Level::Warning => self.warning,
            Level::Trace => self.trace,
        }
    }

    pub fn allow_default_logging(&self) -> bool {
        self.default
    }

    pub fn allow_info_logging(&self) -> bool {
        self.info
    }

    pub fn allow_error_logging(&self) -> bool {
        self.error
    }

    pub fn allow_debug_logging(&self) -> bool {
        self.debug
    }

    pub fn allow_warning_logging(&self) -> bool {
        self.warning
    }

    pub fn allow_trace_logging(&self) -> bool {
        self.trace
    }
}

// =============================================================================
// Feature flags
// =============================================================================

/// Per-level selection of console slots to intercept when global patching
/// is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialPatchConfig {
    #[serde(alias = "default")]
    pub log: bool,
    pub info: bool,
    pub error: bool,
    pub debug: bool,
    #[serde(alias = "warn")]
    pub warning: bool,
    pub trace: bool,
}

impl PartialPatchConfig {
    /// Return a copy with `level` selected.
    #[must_use]
    pub fn with(mut self, level: Level) -> Self {
        *self.slot_mut(level) = true;
        self
    }

    pub fn get(&self, level: Level) -> bool {
        match level {
            Level::Log => self.log,
            Level::Info => self.info,
            Level::Error => self.error,
            Level::Debug => self.debug,
            Level::Warning => self.warning,
            Level::Trace => self.trace,
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut bool {
        match level {
            Level::Log => &mut self.log,
            Level::Info => &mut self.info,
            Level::Error => &mut self.error,
            Level::Debug => &mut self.debug,
            Level::Warning => &mut self.warning,
            Level::Trace => &mut self.trace,
        }
    }

    /// True when at least one level is selected.
    pub fn any(&self) -> bool {
        Level::ALL.iter().any(|&l| self.get(l))
    }
}

/// How the trace level behaves.
///
/// `Gated` gates trace on its level flag and appends a captured backtrace
/// when errors cascade into trace. `Legacy` never gates trace and cascades
/// the error's arguments unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracePolicy {
    #[default]
    Gated,
    Legacy,
}

impl FromStr for TracePolicy {
    type Err = ParseTracePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gated" => Ok(TracePolicy::Gated),
            "legacy" => Ok(TracePolicy::Legacy),
            _ => Err(ParseTracePolicyError {
                input: s.to_string(),
            }),
        }
    }
}

/// Interception feature toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    enable_global_patching: bool,
    partial_patch_config: PartialPatchConfig,
    enable_stack_trace_on_error: bool,
    enable_global_error_tracing: bool,
    trace_policy: TracePolicy,
}

impl FeatureFlags {
    /// Every feature off.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn global_patching(mut self, on: bool) -> Self {
        self.enable_global_patching = on;
        self
    }

    #[must_use]
    pub fn partial_patch(mut self, config: PartialPatchConfig) -> Self {
        self.partial_patch_config = config;
        self
    }

    #[must_use]
    pub fn stack_trace_on_error(mut self, on: bool) -> Self {
        self.enable_stack_trace_on_error = on;
        self
    }

    #[must_use]
    pub fn global_error_tracing(mut self, on: bool) -> Self {
        self.enable_global_error_tracing = on;
        self
    }

    #[must_use]
    pub fn trace_policy(mut self, policy: TracePolicy) -> Self {
        self.trace_policy = policy;
        self
    }

    pub fn enable_global_patching(&self) -> bool {
        self.enable_global_patching
    }

    pub fn partial_patch_config(&self) -> &PartialPatchConfig {
        &self.partial_patch_config
    }

    pub fn enable_stack_trace_on_error(&self) -> bool {
        self.enable_stack_trace_on_error
    }

    pub fn enable_global_error_tracing(&self) -> bool {
        self.enable_global_error_tracing
    }

    pub fn policy(&self) -> TracePolicy {
        self.trace_policy
    }

    /// Global patching, or at least one level selected for partial patching.
    pub fn is_any_patching_enabled(&self) -> bool {
        self.enable_global_patching || self.partial_patch_config.any()
    }

    /// Levels whose console slots are substituted on activation.
    pub fn patched_levels(&self) -> Vec<Level> {
        if self.enable_global_patching {
            return Level::ALL.to_vec();
        }
        Level::ALL
            .iter()
            .copied()
            .filter(|&l| self.partial_patch_config.get(l))
            .collect()
    }
}
