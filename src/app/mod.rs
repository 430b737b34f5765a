// MQLSleuth - app/mod.rs
//
// Application layer: source correlation, presentation, picker state and
// build verdicts.
// Dependencies: core layer, platform::fs.
// Must NOT depend on: ui.

pub mod outcome;
pub mod picker;
pub mod present;
pub mod source_cache;
