// LogHook - core/handlers.rs
//
// Per-level observer callbacks. An observer sees every call that passes its
// level's gate, before the call reaches the sink. Unset levels are skipped.

use crate::core::model::{Arg, Level};
use std::fmt;
use std::sync::Arc;

/// Observer callback. Receives the call arguments; returns nothing.
///
/// Observers are shared: the logger holds a reference but does not own any
/// state the closure captures. A panicking observer is not caught.
pub type Observer = Arc<dyn Fn(&[Arg]) + Send + Sync>;

/// Optional observer per level.
#[derive(Clone, Default)]
pub struct HandlerConfig {
    observers: [Option<Observer>; 6],
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer` for `level`, replacing any earlier one.
    #[must_use]
    pub fn on<F>(mut self, level: Level, observer: F) -> Self
    where
        F: Fn(&[Arg]) + Send + Sync + 'static,
    {
        self.observers[level.index()] = Some(Arc::new(observer));
        self
    }

    /// Register an already-shared observer for `level`.
    #[must_use]
    pub fn on_shared(mut self, level: Level, observer: Observer) -> Self {
        self.observers[level.index()] = Some(observer);
        self
    }

    pub fn get(&self, level: Level) -> Option<&Observer> {
        self.observers[level.index()].as_ref()
    }

    /// Invoke the observer for `level` if one is registered.
    pub fn notify(&self, level: Level, args: &[Arg]) {
        if let Some(observer) = self.get(level) {
            observer(args);
        }
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = Level::ALL
            .iter()
            .filter(|l| self.get(**l).is_some())
            .map(|l| l.name())
            .collect();
        f.debug_struct("HandlerConfig")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_notify_without_observer_is_silent() {
        HandlerConfig::new().notify(Level::Error, &[json!("nothing listens")]);
    }

    #[test]
    fn test_notify_reaches_only_its_level() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handlers = HandlerConfig::new().on(Level::Info, move |args| {
            sink.lock().unwrap().push(args.to_vec());
        });

        handlers.notify(Level::Info, &[json!("a"), json!(1)]);
        handlers.notify(Level::Debug, &[json!("ignored")]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![json!("a"), json!(1)]);
    }

    #[test]
    fn test_debug_lists_registered_levels() {
        let handlers = HandlerConfig::new()
            .on(Level::Trace, |_| {})
            .on(Level::Warning, |_| {});
        let text = format!("{handlers:?}");
        assert!(text.contains("warn"));
        assert!(text.contains("trace"));
        assert!(!text.contains("info"));
    }
}
