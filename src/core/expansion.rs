// LsViz - core/expansion.rs
//
// Expansion bookkeeping across destructive resorts.
//
// A resort permutes rows, so any view state keyed by row position goes stale.
// Expanded items are therefore captured by node identity before the resort
// and replayed afterwards.
//
// Sorting is lazy: only directories the view has expanded are ever sorted.
// A collapsed directory gets its first sort when it is expanded, which keeps
// loads of large listings from paying for subtrees nobody opens.

use crate::core::model::Column;
use crate::core::node::NodeId;
use crate::core::tree_model::{ModelIndex, TreeModel};
use std::collections::HashSet;

/// Expansion state owned by a tree view.
pub trait ExpansionView {
    fn is_expanded(&self, index: &ModelIndex) -> bool;
    fn set_expanded(&mut self, index: &ModelIndex, expanded: bool);
}

/// Column-0 coordinates of `parent`'s visible children, in row order.
pub fn child_indices(model: &TreeModel, parent: &ModelIndex) -> Vec<ModelIndex> {
    (0..model.row_count(parent))
        .map(|row| model.index(row, Column::Name, parent))
        .collect()
}

/// Identities of every expanded item below `parent`.
///
/// Descendants of collapsed items are not visited; the view never realized
/// them.
pub fn capture_expanded(
    model: &TreeModel,
    view: &dyn ExpansionView,
    parent: &ModelIndex,
) -> HashSet<NodeId> {
    let mut expanded = HashSet::new();
    capture_into(model, view, parent, &mut expanded);
    expanded
}

fn capture_into(
    model: &TreeModel,
    view: &dyn ExpansionView,
    parent: &ModelIndex,
    expanded: &mut HashSet<NodeId>,
) {
    for child in child_indices(model, parent) {
        if !view.is_expanded(&child) {
            continue;
        }
        if let Some(id) = child.node_id() {
            expanded.insert(id);
        }
        capture_into(model, view, &child, expanded);
    }
}

/// Replay a captured set below `parent`.
///
/// Found items are expanded and removed from `expanded`; items the view
/// reports expanded but which are not in the set are collapsed. Descent stops
/// as soon as the set is empty, leaving anything unvisited untouched.
pub fn restore_expanded(
    model: &TreeModel,
    view: &mut dyn ExpansionView,
    expanded: &mut HashSet<NodeId>,
    parent: &ModelIndex,
) {
    for child in child_indices(model, parent) {
        let Some(id) = child.node_id() else {
            continue;
        };
        if expanded.remove(&id) {
            view.set_expanded(&child, true);
            if !expanded.is_empty() {
                restore_expanded(model, view, expanded, &child);
            }
        } else if view.is_expanded(&child) {
            view.set_expanded(&child, false);
            tracing::trace!(path = model.node(&child).path(), "Collapsed");
        }
    }
}

/// Resort the directory at `index` and, pre-order, every expanded directory
/// below it. The invalid index addresses the root, which a tree view always
/// shows expanded. Must run inside a layout bracket.
pub fn sort_expanded(model: &mut TreeModel, view: &dyn ExpansionView, index: &ModelIndex) {
    if !model.node(index).is_dir() {
        return;
    }
    model.sort_node(index);
    for child in child_indices(model, index) {
        if view.is_expanded(&child) {
            sort_expanded(model, view, &child);
        }
    }
}

/// Expand the chain of single-child directories from the root so the first
/// level with more than one entry is visible. Returns the number of items
/// expanded.
pub fn expand_single_child_chain(model: &TreeModel, view: &mut dyn ExpansionView) -> usize {
    let mut current = model.invalid_index();
    let mut expanded = 0;
    loop {
        let children = child_indices(model, &current);
        if children.is_empty() {
            break;
        }
        if current.is_valid() {
            view.set_expanded(&current, true);
            expanded += 1;
        }
        if children.len() != 1 {
            break;
        }
        current = children[0];
    }
    expanded
}
