// LsViz - core/mod.rs
//
// Core business logic layer: the tree model and everything it is built from.
// Dependencies: standard library, util, regex, serde (derives), tracing.
// Must NOT depend on: ui, platform, app, or any I/O.

pub mod builder;
pub mod expansion;
pub mod model;
pub mod node;
pub mod parser;
pub mod sort;
pub mod tree_model;
