// LsViz - app/mod.rs
//
// Application layer: orchestration, state management, listing loads.
// Dependencies: core layer, platform file reading.
// Must NOT depend on: ui.

pub mod loader;
pub mod state;
pub mod view;
