// LogHook - core/console.rs
//
// The host logging surface: six replaceable per-level sink slots.
//
// The console is passed into the logger explicitly. `Console::global()` is
// the process-wide instance that writes to stdout/stderr; tests build their
// own consoles from recording closures instead of touching the real one.

use crate::core::model::{Arg, Level};
use crate::util::constants::TRACE_OUTPUT_PREFIX;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// A sink for one level. Slot identity is `Arc` pointer identity.
pub type SinkFn = Arc<dyn Fn(&[Arg]) + Send + Sync>;

/// Wrap a closure as a `SinkFn`.
pub fn sink<F>(f: F) -> SinkFn
where
    F: Fn(&[Arg]) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Render call arguments as one line: strings raw, everything else as
/// compact JSON, separated by single spaces.
pub fn format_args(args: &[Arg]) -> String {
    args.iter()
        .map(|a| match a {
            Arg::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct Console {
    slots: RwLock<[SinkFn; 6]>,
}

impl Console {
    /// Build a console whose slot for each level comes from `make`.
    pub fn from_fn<F>(mut make: F) -> Self
    where
        F: FnMut(Level) -> SinkFn,
    {
        Self {
            slots: RwLock::new(Level::ALL.map(&mut make)),
        }
    }

    /// A console that writes to the process streams.
    ///
    /// log, info and debug go to stdout; warn and error go to stderr;
    /// trace goes to stderr behind a `Trace:` marker.
    pub fn stdio() -> Self {
        Self::from_fn(|level| {
            sink(move |args| {
                let line = format_args(args);
                // Write failures (closed pipe) are dropped; a console never fails.
                if level == Level::Trace {
                    let _ = writeln!(std::io::stderr().lock(), "{TRACE_OUTPUT_PREFIX} {line}");
                } else if level.is_stderr() {
                    let _ = writeln!(std::io::stderr().lock(), "{line}");
                } else {
                    let _ = writeln!(std::io::stdout().lock(), "{line}");
                }
            })
        })
    }

    /// The process-wide stdio console.
    pub fn global() -> Arc<Console> {
        static GLOBAL: OnceLock<Arc<Console>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Console::stdio())))
    }

    /// The sink currently bound to `level`.
    pub fn slot(&self, level: Level) -> SinkFn {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slots[level.index()])
    }

    /// Bind `sink` to `level`, returning the sink it replaced.
    pub fn replace(&self, level: Level, sink: SinkFn) -> SinkFn {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut slots[level.index()], sink)
    }

    /// Call whatever is currently bound to `level`.
    ///
    /// The slot lock is released before the sink runs, so a substituted sink
    /// may read or call other slots.
    pub fn call(&self, level: Level, args: &[Arg]) {
        let current = self.slot(level);
        current(args);
    }

    pub fn log(&self, args: &[Arg]) {
        self.call(Level::Log, args);
    }

    pub fn info(&self, args: &[Arg]) {
        self.call(Level::Info, args);
    }

    pub fn error(&self, args: &[Arg]) {
        self.call(Level::Error, args);
    }

    pub fn debug(&self, args: &[Arg]) {
        self.call(Level::Debug, args);
    }

    pub fn warn(&self, args: &[Arg]) {
        self.call(Level::Warning, args);
    }

    pub fn trace(&self, args: &[Arg]) {
        self.call(Level::Trace, args);
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
