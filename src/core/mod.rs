// MQLSleuth - core/mod.rs
//
// Core business logic layer: log parsing, excerpt windowing, file tree and
// viewport computation.
// Must NOT depend on: ui, platform, app. Only discovery walks the filesystem.

pub mod discovery;
pub mod excerpt;
pub mod model;
pub mod parser;
pub mod tree;
pub mod viewport;
