// MQLSleuth - ui/mod.rs
//
// UI layer: plain-text presentation only.
// Dependencies: app (outcome), core (read-only models).
// Must NOT depend on: platform, direct I/O.

pub mod report;
