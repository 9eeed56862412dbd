// LogHook - lib.rs
//
// Library entry point. The `loghook` binary in main.rs is a thin CLI over
// this surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::console::Console;
pub use crate::core::flags::{FeatureFlags, LevelFlags, PartialPatchConfig, TracePolicy};
pub use crate::core::handlers::HandlerConfig;
pub use crate::core::logger::{Logger, LoggerOptions};
pub use crate::core::model::{Arg, Level};
pub use crate::core::prefix::LogPrefix;
