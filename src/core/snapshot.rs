// LogHook - core/snapshot.rs
//
// The console's original sinks, captured once before any interception.

use crate::core::console::{Console, SinkFn};
use crate::core::model::{Arg, Level};
use std::fmt;
use std::sync::Arc;

/// Original per-level sinks of a console.
///
/// Taken once at logger construction and never re-read, so restoring from
/// it is correct no matter how many times the console was patched since.
#[derive(Clone)]
pub struct SinkSnapshot {
    sinks: [SinkFn; 6],
}

impl SinkSnapshot {
    pub fn capture(console: &Console) -> Self {
        Self {
            sinks: Level::ALL.map(|level| console.slot(level)),
        }
    }

    pub fn get(&self, level: Level) -> &SinkFn {
        &self.sinks[level.index()]
    }

    /// Call the original sink for `level`, bypassing any substitution.
    pub fn emit(&self, level: Level, args: &[Arg]) {
        (self.get(level))(args);
    }

    /// Write every original sink back into `console`.
    pub fn restore(&self, console: &Console) {
        for level in Level::ALL {
            console.replace(level, Arc::clone(self.get(level)));
        }
    }

    pub fn log_method(&self) -> &SinkFn {
        self.get(Level::Log)
    }

    pub fn info_method(&self) -> &SinkFn {
        self.get(Level::Info)
    }

    pub fn error_method(&self) -> &SinkFn {
        self.get(Level::Error)
    }

    pub fn debug_method(&self) -> &SinkFn {
        self.get(Level::Debug)
    }

    pub fn warn_method(&self) -> &SinkFn {
        self.get(Level::Warning)
    }

    pub fn trace_method(&self) -> &SinkFn {
        self.get(Level::Trace)
    }
}

impl fmt::Debug for SinkSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkSnapshot").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::sink;

    #[test]
    fn test_capture_is_not_affected_by_later_replacement() {
        let console = Console::from_fn(|_| sink(|_| {}));
        let original = console.slot(Level::Error);
        let snapshot = SinkSnapshot::capture(&console);

        console.replace(Level::Error, sink(|_| {}));

        assert!(Arc::ptr_eq(snapshot.error_method(), &original));
        assert!(!Arc::ptr_eq(snapshot.error_method(), &console.slot(Level::Error)));
    }

    #[test]
    fn test_restore_writes_back_every_slot() {
        let console = Console::from_fn(|_| sink(|_| {}));
        let snapshot = SinkSnapshot::capture(&console);
        for level in Level::ALL {
            console.replace(level, sink(|_| {}));
        }

        snapshot.restore(&console);

        for level in Level::ALL {
            assert!(Arc::ptr_eq(snapshot.get(level), &console.slot(level)));
        }
    }
}
