// LsViz - lib.rs
//
// Library entry point, exposing the tree model, listing parser, and
// application state for integration testing.
//
// The `gui` module lives with the binary in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
