// LogHook - app/singleton.rs
//
// Process-wide logger holder.
//
// States: Uninitialized -> get_instance() -> Initialized -> kill_instance()
// -> Uninitialized. While initialized, get_instance() ignores its options and
// returns the existing logger. kill_instance() only drops the reference: a
// console patched by the dropped logger stays patched until someone calls
// disable_monkey_patching() on it.
//
// Prefer constructing a `Logger` in main and passing it down; this holder is
// a convenience for code that cannot be threaded through.

use crate::core::logger::{Logger, LoggerOptions};
use std::sync::{Arc, Mutex, PoisonError};

static INSTANCE: Mutex<Option<Arc<Logger>>> = Mutex::new(None);

/// Return the process logger, constructing it from `options` on first use.
pub fn get_instance(options: LoggerOptions) -> Arc<Logger> {
    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = slot.as_ref() {
        tracing::trace!("Logger instance already initialised; options ignored");
        return Arc::clone(logger);
    }

    let logger = Arc::new(Logger::new(options));
    tracing::debug!("Logger instance initialised");
    *slot = Some(Arc::clone(&logger));
    logger
}

/// The process logger, if one has been constructed.
pub fn instance() -> Option<Arc<Logger>> {
    INSTANCE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Forget the process logger. Does not restore the console.
pub fn kill_instance() {
    let dropped = INSTANCE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if dropped.is_some() {
        tracing::debug!("Logger instance killed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::{sink, Console};
    use crate::core::env::HostEnvironment;
    use crate::core::flags::{FeatureFlags, LevelFlags};
    use crate::core::hooks::HostEvents;
    use crate::core::model::Level;

    // The holder is process-global; serialise the tests that touch it.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn isolated(console: &Arc<Console>) -> LoggerOptions {
        LoggerOptions::new()
            .console(Arc::clone(console))
            .events(Arc::new(HostEvents::new()))
            .environment(HostEnvironment::Unknown)
    }

    #[test]
    fn test_first_call_wins() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        kill_instance();
        let console = Arc::new(Console::from_fn(|_| sink(|_| {})));

        let first = get_instance(isolated(&console).level_flags(LevelFlags::all()));
        let second = get_instance(isolated(&console).level_flags(LevelFlags::new()));

        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.level_flags().allow_info_logging());
        kill_instance();
    }

    #[test]
    fn test_kill_then_get_builds_a_new_instance() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        kill_instance();
        let console = Arc::new(Console::from_fn(|_| sink(|_| {})));

        let first = get_instance(isolated(&console));
        kill_instance();
        assert!(instance().is_none());
        let second = get_instance(isolated(&console));

        assert!(!Arc::ptr_eq(&first, &second));
        kill_instance();
    }

    #[test]
    fn test_kill_leaves_console_patched() {
        let _guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        kill_instance();
        let console = Arc::new(Console::from_fn(|_| sink(|_| {})));

        let logger = get_instance(
            isolated(&console).features(FeatureFlags::new().global_patching(true)),
        );
        let original = Arc::clone(logger.snapshot().warn_method());
        kill_instance();

        assert!(!Arc::ptr_eq(&original, &console.slot(Level::Warning)));

        logger.disable_monkey_patching();
        assert!(Arc::ptr_eq(&original, &console.slot(Level::Warning)));
    }
}
