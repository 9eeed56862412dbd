// LogHook - core/logger.rs
//
// The interception engine.
//
// Two call paths converge on one per-level pipeline:
//   - the facade: `Logger::info(..)` and friends;
//   - the console: when interception is on, the console's slots are replaced
//     with wrappers that run the same pipeline.
//
// Pipeline: gate by level flag -> compute final arguments (prefix) ->
// observer -> original sink. The original sink always comes from the
// snapshot taken at construction, never from the (possibly patched) console,
// so a call is emitted exactly once.

use crate::core::console::{sink, Console};
use crate::core::env::HostEnvironment;
use crate::core::flags::{FeatureFlags, LevelFlags, TracePolicy};
use crate::core::handlers::HandlerConfig;
use crate::core::hooks::HostEvents;
use crate::core::model::{Arg, Level};
use crate::core::prefix::LogPrefix;
use crate::core::snapshot::SinkSnapshot;
use crate::util::constants::{
    SUPPRESSION_NOTICE, UNCAUGHT_EXCEPTION_EXIT_CODE, UNCAUGHT_EXCEPTION_LABEL,
    UNHANDLED_REJECTION_LABEL,
};
use serde_json::json;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Terminates the process with the given status.
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

// =============================================================================
// Options
// =============================================================================

/// Construction options. Every field is optional.
///
/// Missing flags default to all-false, a missing prefix to `[LogHook]`, and
/// missing host capabilities (console, events, environment, exit) to the real
/// process ones.
#[derive(Clone, Default)]
pub struct LoggerOptions {
    pub features: Option<FeatureFlags>,
    pub level_flags: Option<LevelFlags>,
    pub handlers: Option<HandlerConfig>,
    pub prefix: Option<LogPrefix>,
    pub console: Option<Arc<Console>>,
    pub events: Option<Arc<HostEvents>>,
    pub environment: Option<HostEnvironment>,
    pub exit: Option<ExitFn>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = Some(features);
        self
    }

    #[must_use]
    pub fn level_flags(mut self, flags: LevelFlags) -> Self {
        self.level_flags = Some(flags);
        self
    }

    #[must_use]
    pub fn handlers(mut self, handlers: HandlerConfig) -> Self {
        self.handlers = Some(handlers);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: LogPrefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use]
    pub fn events(mut self, events: Arc<HostEvents>) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: HostEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn exit<F>(mut self, exit: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(exit));
        self
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("features", &self.features)
            .field("level_flags", &self.level_flags)
            .field("handlers", &self.handlers)
            .field("prefix", &self.prefix)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// State shared by the facade, console wrappers, and global hook listeners.
struct Dispatcher {
    level_flags: LevelFlags,
    features: FeatureFlags,
    handlers: HandlerConfig,
    prefix: LogPrefix,
    snapshot: SinkSnapshot,
    patched: AtomicBool,
}

impl Dispatcher {
    fn is_allowed(&self, level: Level) -> bool {
        if level == Level::Trace && self.features.policy() == TracePolicy::Legacy {
            return true;
        }
        self.level_flags.is_allowed(level)
    }

    /// Prefix followed by `args`.
    ///
    /// On the facade path (`override_mode == false`) the arguments pass through
    /// unchanged while the console is patched.
    fn final_args(&self, args: &[Arg], override_mode: bool) -> Vec<Arg> {
        if !override_mode && self.patched.load(Ordering::SeqCst) {
            return args.to_vec();
        }
        let mut out = Vec::with_capacity(args.len() + 1);
        out.push(Arg::String(self.prefix.resolve()));
        out.extend_from_slice(args);
        out
    }

    fn emit(&self, level: Level, observer_args: &[Arg], sink_args: &[Arg]) {
        self.handlers.notify(level, observer_args);
        self.snapshot.emit(level, sink_args);
    }

    /// Facade path.
    fn dispatch(&self, level: Level, args: &[Arg]) {
        if !self.is_allowed(level) {
            return;
        }
        let final_args = self.final_args(args, false);
        self.emit(level, args, &final_args);

        if level == Level::Error && self.features.enable_stack_trace_on_error() {
            match self.features.policy() {
                TracePolicy::Gated => {
                    let trace_args = with_backtrace(args);
                    let trace_final = self.final_args(&trace_args, false);
                    self.emit(Level::Trace, &trace_args, &trace_final);
                }
                TracePolicy::Legacy => self.dispatch(Level::Trace, &final_args),
            }
        }
    }

    /// Console path: runs inside a substituted slot.
    fn intercept(&self, level: Level, call_args: &[Arg]) {
        let final_args = self.final_args(call_args, true);

        if !self.is_allowed(level) {
            self.snapshot.emit(
                Level::Log,
                &[json!(SUPPRESSION_NOTICE), json!(level.name())],
            );
            return;
        }
        self.emit(level, &final_args, &final_args);

        if level == Level::Error
            && self.features.enable_stack_trace_on_error()
            && self.features.policy() == TracePolicy::Gated
        {
            let trace_final = self.final_args(&with_backtrace(call_args), true);
            self.emit(Level::Trace, &trace_final, &trace_final);
        }
    }
}

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// `args` followed by a rendering of the current call stack.
fn with_backtrace(args: &[Arg]) -> Vec<Arg> {
    let mut out = args.to_vec();
    out.push(Arg::String(
        std::backtrace::Backtrace::force_capture().to_string(),
    ));
    out
}

// =============================================================================
// Logger
// =============================================================================

/// Logging facade with optional console interception.
///
/// Flags, observers, prefix, and the sink snapshot are fixed at construction.
/// Only the patch state changes afterwards, through
/// [`enable_monkey_patch`](Self::enable_monkey_patch) and
/// [`disable_monkey_patching`](Self::disable_monkey_patching).
///
/// Patch activation and deactivation are serialised by an internal lock;
/// dispatch itself takes no lock and runs to completion on the caller's thread.
pub struct Logger {
    console: Arc<Console>,
    dispatcher: Arc<Dispatcher>,
    patched_levels: Mutex<Vec<Level>>,
    environment: HostEnvironment,
    events: Arc<HostEvents>,
    exit: ExitFn,
}

impl Logger {
    /// Build a logger over `options.console` (the global console if unset).
    ///
    /// The console's sinks are snapshotted first. Interception is then
    /// switched on if any patching feature is enabled, and global error
    /// tracing is attached if requested.
    pub fn new(options: LoggerOptions) -> Self {
        let console = options.console.unwrap_or_else(Console::global);
        let features = options.features.unwrap_or_default();
        let dispatcher = Arc::new(Dispatcher {
            level_flags: options.level_flags.unwrap_or_default(),
            features,
            handlers: options.handlers.unwrap_or_default(),
            prefix: options.prefix.unwrap_or_default(),
            snapshot: SinkSnapshot::capture(&console),
            patched: AtomicBool::new(false),
        });

        let logger = Self {
            console,
            dispatcher,
            patched_levels: Mutex::new(Vec::new()),
            environment: options.environment.unwrap_or_else(HostEnvironment::detect),
            events: options.events.unwrap_or_else(HostEvents::global),
            exit: options.exit.unwrap_or_else(|| Arc::new(exit_process)),
        };

        tracing::debug!(
            features = ?logger.dispatcher.features,
            level_flags = ?logger.dispatcher.level_flags,
            prefix = ?logger.dispatcher.prefix,
            "Logger constructed"
        );

        if features.is_any_patching_enabled() {
            logger.enable_monkey_patch();
        }
        if features.enable_global_error_tracing() {
            logger.activate_global_error_tracing();
        }
        logger
    }

    pub fn log(&self, args: &[Arg]) {
        self.dispatch(Level::Log, args);
    }

    pub fn info(&self, args: &[Arg]) {
        self.dispatch(Level::Info, args);
    }

    /// Also cascades into trace when `enable_stack_trace_on_error` is set,
    /// whether or not trace is allowed on its own.
    pub fn error(&self, args: &[Arg]) {
        self.dispatch(Level::Error, args);
    }

    pub fn debug(&self, args: &[Arg]) {
        self.dispatch(Level::Debug, args);
    }

    pub fn warn(&self, args: &[Arg]) {
        self.dispatch(Level::Warning, args);
    }

    pub fn trace(&self, args: &[Arg]) {
        self.dispatch(Level::Trace, args);
    }

    /// Run the facade pipeline for `level`.
    ///
    /// While the logger is patched the sink receives `args` without the
    /// prefix, for every level, including levels the partial patch config
    /// left untouched. The prefix is only injected by the console wrappers
    /// in that state.
    pub fn dispatch(&self, level: Level, args: &[Arg]) {
        self.dispatcher.dispatch(level, args);
    }

    /// Substitute the selected console slots with intercepting wrappers.
    ///
    /// Selected levels: all six under global patching, otherwise those set in
    /// the partial patch config. No-op if already patched.
    pub fn enable_monkey_patch(&self) {
        let mut patched_levels = self.lock_patch_state();
        if self.dispatcher.patched.load(Ordering::SeqCst) {
            return;
        }

        let levels = self.dispatcher.features.patched_levels();
        for &level in &levels {
            let dispatcher = Arc::clone(&self.dispatcher);
            self.console
                .replace(level, sink(move |args| dispatcher.intercept(level, args)));
        }

        tracing::debug!(levels = ?levels, "Console interception enabled");
        *patched_levels = levels;
        self.dispatcher.patched.store(true, Ordering::SeqCst);
    }

    /// Restore every console slot from the snapshot. No-op if not patched.
    pub fn disable_monkey_patching(&self) {
        let mut patched_levels = self.lock_patch_state();
        if !self.dispatcher.patched.load(Ordering::SeqCst) {
            return;
        }

        self.dispatcher.snapshot.restore(&self.console);

        tracing::debug!(levels = ?patched_levels.as_slice(), "Console interception disabled");
        patched_levels.clear();
        self.dispatcher.patched.store(false, Ordering::SeqCst);
    }

    pub fn is_patched(&self) -> bool {
        self.dispatcher.patched.load(Ordering::SeqCst)
    }

    /// Levels whose console slots are currently substituted.
    pub fn patched_levels(&self) -> Vec<Level> {
        self.lock_patch_state().clone()
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    pub fn snapshot(&self) -> &SinkSnapshot {
        &self.dispatcher.snapshot
    }

    pub fn level_flags(&self) -> &LevelFlags {
        &self.dispatcher.level_flags
    }

    pub fn features(&self) -> &FeatureFlags {
        &self.dispatcher.features
    }

    pub fn environment(&self) -> HostEnvironment {
        self.environment
    }

    fn lock_patch_state(&self) -> std::sync::MutexGuard<'_, Vec<Level>> {
        self.patched_levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach trace forwarding to the host's error channels.
    ///
    /// Browser-like: error events and unhandled rejections. Process-like:
    /// unhandled rejections and uncaught exceptions; an uncaught exception
    /// terminates the process after it is traced. Otherwise nothing.
    ///
    /// Rust panics reach the uncaught-exception channel only when they escape
    /// [`HostEvents::run_main`]; a panic some caller catches never exits.
    fn activate_global_error_tracing(&self) {
        match self.environment {
            HostEnvironment::Browser => {
                let d = Arc::clone(&self.dispatcher);
                self.events.add_error_listener(Arc::new(move |event| {
                    d.dispatch(
                        Level::Trace,
                        &[json!({
                            "column": event.column,
                            "error": event.error,
                            "filename": event.filename,
                            "line": event.line,
                            "message": event.message,
                        })],
                    );
                }));

                let d = Arc::clone(&self.dispatcher);
                self.events.add_rejection_listener(Arc::new(move |event| {
                    d.dispatch(
                        Level::Trace,
                        &[json!({
                            "reason": event.reason,
                            "type": event.kind,
                            "promise": event.promise,
                            "stack": event.stack,
                        })],
                    );
                }));
            }
            HostEnvironment::Process => {
                let d = Arc::clone(&self.dispatcher);
                self.events.add_rejection_listener(Arc::new(move |event| {
                    d.dispatch(
                        Level::Trace,
                        &[
                            event.reason.clone(),
                            json!(UNHANDLED_REJECTION_LABEL),
                            event.promise.clone(),
                        ],
                    );
                }));

                let d = Arc::clone(&self.dispatcher);
                let exit = Arc::clone(&self.exit);
                self.events
                    .add_uncaught_exception_listener(Arc::new(move |error| {
                        d.dispatch(
                            Level::Trace,
                            &[error.clone(), json!(UNCAUGHT_EXCEPTION_LABEL)],
                        );
                        exit(UNCAUGHT_EXCEPTION_EXIT_CODE);
                    }));
            }
            HostEnvironment::Unknown => {
                tracing::debug!("Unknown host environment; global error tracing not installed");
                return;
            }
        }
        tracing::debug!(environment = ?self.environment, "Global error tracing installed");
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level_flags", &self.dispatcher.level_flags)
            .field("features", &self.dispatcher.features)
            .field("handlers", &self.dispatcher.handlers)
            .field("prefix", &self.dispatcher.prefix)
            .field("patched", &self.is_patched())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
