// LogHook - platform/mod.rs
//
// Platform abstraction layer: config directory resolution and config.toml.
// Dependencies: core, util, directories crate.

pub mod config;
