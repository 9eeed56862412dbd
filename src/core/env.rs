// LogHook - core/env.rs
//
// Host environment probe. Decides how global error hooks attach.

/// The kind of host the logger runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnvironment {
    /// A browser-like host (wasm32 without an OS): error and
    /// unhandled-rejection events.
    Browser,
    /// A process-like host: unhandled rejections and uncaught exceptions,
    /// the latter followed by process termination.
    Process,
    /// Neither; global error tracing is not installed.
    Unknown,
}

impl HostEnvironment {
    /// Decided once from the build target.
    pub fn detect() -> Self {
        if is_browser_environment() {
            Self::Browser
        } else if is_process_environment() {
            Self::Process
        } else {
            Self::Unknown
        }
    }

    pub fn is_browser(self) -> bool {
        self == Self::Browser
    }

    pub fn is_process(self) -> bool {
        self == Self::Process
    }
}

pub fn is_browser_environment() -> bool {
    cfg!(all(target_arch = "wasm32", target_os = "unknown"))
}

pub fn is_process_environment() -> bool {
    cfg!(any(unix, windows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probes_are_exclusive() {
        assert!(!(is_browser_environment() && is_process_environment()));
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_native_targets_are_process_like() {
        assert_eq!(HostEnvironment::detect(), HostEnvironment::Process);
        assert!(HostEnvironment::detect().is_process());
        assert!(!HostEnvironment::detect().is_browser());
    }
}
