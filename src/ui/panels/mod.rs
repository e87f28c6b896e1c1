// LsViz - ui/panels/mod.rs

pub mod tree;
