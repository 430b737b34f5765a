// MQLSleuth - platform/mod.rs
//
// Platform abstraction layer: config directories and file reading.
// Must NOT depend on: core, app, ui.

pub mod config;
pub mod fs;
