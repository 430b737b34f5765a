// MQLSleuth - lib.rs
//
// Library entry point, exposing every layer for integration testing and
// for callers that want the parsed diagnostics without the CLI.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
