// LogHook - core/mod.rs
//
// Core layer: levels, configuration records, the console surface, and the
// interception engine.
// Dependencies: standard library, serde/serde_json, chrono, tracing.
// Must NOT depend on: app, platform.

pub mod console;
pub mod env;
pub mod flags;
pub mod handlers;
pub mod hooks;
pub mod logger;
pub mod model;
pub mod prefix;
pub mod snapshot;
