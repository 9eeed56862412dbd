// LogHook - core/hooks.rs
//
// The host's asynchronous error channels.
//
// A browser-like host raises `error` and `unhandledrejection` events; a
// process-like host raises unhandled rejections and uncaught exceptions.
// `HostEvents` is the registry those channels are delivered through.
// Listeners are appended and never removed. Each dispatch runs every
// listener synchronously, in registration order, on the caller's thread.
//
// A Rust panic counts as an uncaught exception only when it escapes
// `HostEvents::run_main`. Panics caught further down (`catch_unwind`, joined
// threads, observers whose caller recovers) are never forwarded. The panic
// hook installed by `run_main` only records the panic location for the
// thread; it chains the previous hook first and never dispatches or exits.

use crate::core::model::Arg;
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once, OnceLock, PoisonError, RwLock};

/// Browser-style error event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorEvent {
    pub column: u32,
    pub error: Arg,
    pub filename: String,
    pub line: u32,
    pub message: String,
}

/// A promise (or future) failed and nothing handled it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RejectionEvent {
    pub reason: Arg,
    #[serde(rename = "type")]
    pub kind: String,
    pub promise: Arg,
    pub stack: Option<String>,
}

pub type ErrorListener = Arc<dyn Fn(&ErrorEvent) + Send + Sync>;
pub type RejectionListener = Arc<dyn Fn(&RejectionEvent) + Send + Sync>;
pub type ExceptionListener = Arc<dyn Fn(&Arg) + Send + Sync>;

thread_local! {
    static LAST_PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[derive(Default)]
pub struct HostEvents {
    error: RwLock<Vec<ErrorListener>>,
    rejection: RwLock<Vec<RejectionListener>>,
    exception: RwLock<Vec<ExceptionListener>>,
}

impl HostEvents {
    /// An isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process registry.
    pub fn global() -> Arc<HostEvents> {
        static GLOBAL: OnceLock<Arc<HostEvents>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(HostEvents::new())))
    }

    pub fn add_error_listener(&self, listener: ErrorListener) {
        write_lock(&self.error).push(listener);
    }

    pub fn add_rejection_listener(&self, listener: RejectionListener) {
        write_lock(&self.rejection).push(listener);
    }

    pub fn add_uncaught_exception_listener(&self, listener: ExceptionListener) {
        write_lock(&self.exception).push(listener);
    }

    pub fn dispatch_error(&self, event: &ErrorEvent) {
        for listener in read_snapshot(&self.error) {
            listener(event);
        }
    }

    pub fn dispatch_unhandled_rejection(&self, event: &RejectionEvent) {
        for listener in read_snapshot(&self.rejection) {
            listener(event);
        }
    }

    pub fn dispatch_uncaught_exception(&self, error: &Arg) {
        for listener in read_snapshot(&self.exception) {
            listener(error);
        }
    }

    pub fn listener_counts(&self) -> (usize, usize, usize) {
        (
            read_snapshot(&self.error).len(),
            read_snapshot(&self.rejection).len(),
            read_snapshot(&self.exception).len(),
        )
    }

    /// Run `f` as the program's top level.
    ///
    /// A panic escaping `f` is dispatched as an uncaught exception
    /// (`{message, location}`) and then resumed, so if no listener ends the
    /// process the panic keeps unwinding to the caller. Only panics on the
    /// calling thread are seen.
    pub fn run_main<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        install_location_hook();
        LAST_PANIC_LOCATION.with(|slot| slot.borrow_mut().take());

        // The payload is resumed unchanged; nothing observes `f`'s state
        // after the unwind except the listeners, which only see the payload.
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => value,
            Err(payload) => {
                let location = LAST_PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
                tracing::debug!(?location, "Panic escaped run_main");
                self.dispatch_uncaught_exception(&panic_to_arg(payload.as_ref(), location));
                panic::resume_unwind(payload)
            }
        }
    }
}

impl fmt::Debug for HostEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (error, rejection, exception) = self.listener_counts();
        f.debug_struct("HostEvents")
            .field("error", &error)
            .field("rejection", &rejection)
            .field("exception", &exception)
            .finish()
    }
}

/// Describe a panic as an error value: `{message, location}`.
pub fn panic_to_arg(payload: &(dyn Any + Send), location: Option<String>) -> Arg {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    let location = location.unwrap_or_else(|| "unknown".to_string());

    json!({ "message": message, "location": location })
}

// Installed once per process. Chains to whatever hook was set before, then
// remembers where the current thread panicked.
fn install_location_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            previous_hook(info);
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            LAST_PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
        }));
        tracing::debug!("Panic location hook installed");
    });
}

// Listeners are cloned out so that a listener may register further listeners
// or dispatch again without deadlocking.
fn read_snapshot<T: Clone>(lock: &RwLock<Vec<T>>) -> Vec<T> {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write_lock<T>(lock: &RwLock<Vec<T>>) -> std::sync::RwLockWriteGuard<'_, Vec<T>> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
