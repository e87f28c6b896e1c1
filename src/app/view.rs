// LsViz - app/view.rs
//
// Tree view state owned by the UI: which items are expanded, plus the
// flattened list of rows the tree panel paints.

use crate::core::expansion::{child_indices, ExpansionView};
use crate::core::node::NodeId;
use crate::core::tree_model::{ModelIndex, TreeModel};
use std::collections::HashSet;

/// Expansion state of the tree panel, keyed by node identity.
#[derive(Debug, Default)]
pub struct TreeViewState {
    expanded: HashSet<NodeId>,
    /// Bumped on every effective change so cached rows can be invalidated.
    revision: u64,
}

impl TreeViewState {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn clear(&mut self) {
        if !self.expanded.is_empty() {
            self.expanded.clear();
            self.revision += 1;
        }
    }
}

impl ExpansionView for TreeViewState {
    fn is_expanded(&self, index: &ModelIndex) -> bool {
        index.node_id().is_some_and(|id| self.expanded.contains(&id))
    }

    fn set_expanded(&mut self, index: &ModelIndex, expanded: bool) {
        let Some(id) = index.node_id() else {
            return;
        };
        let changed = if expanded {
            self.expanded.insert(id)
        } else {
            self.expanded.remove(&id)
        };
        if changed {
            self.revision += 1;
        }
    }
}

/// One painted row of the tree panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// Column-0 coordinate of the item.
    pub index: ModelIndex,
    /// Nesting depth; top-level items are 0.
    pub depth: usize,
    pub is_dir: bool,
    pub has_children: bool,
    pub expanded: bool,
}

/// Flatten the expanded part of the tree in display order.
pub fn flatten_rows(model: &TreeModel, view: &TreeViewState) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    push_rows(model, view, &model.invalid_index(), 0, &mut rows);
    rows
}

fn push_rows(
    model: &TreeModel,
    view: &TreeViewState,
    parent: &ModelIndex,
    depth: usize,
    rows: &mut Vec<VisibleRow>,
) {
    for child in child_indices(model, parent) {
        let node = model.node(&child);
        let expanded = view.is_expanded(&child);
        rows.push(VisibleRow {
            index: child,
            depth,
            is_dir: node.is_dir(),
            has_children: !node.visible_children().is_empty(),
            expanded,
        });
        if expanded {
            push_rows(model, view, &child, depth + 1, rows);
        }
    }
}
