// LogHook - app/mod.rs
//
// Application layer: process-wide logger lifecycle.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod singleton;
