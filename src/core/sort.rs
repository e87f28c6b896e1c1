// LsViz - core/sort.rs
//
// Per-directory child ordering.
//
// Only the direct children of one directory are reordered per call; the
// expansion tracker decides which directories get sorted and when.

use crate::core::model::{Column, SortOrder, SortState};
use crate::core::node::{Node, NodeId, Registry};
use std::cmp::Ordering;

/// Compare two siblings under `sorting`.
///
/// Directories always precede files, whatever the column or direction.
/// The direction only flips the comparison inside each partition. Ties fall
/// back to the lowercase name and then the path, which is unique among
/// siblings, so the order is total and descending is the exact reverse of
/// ascending.
pub fn compare_nodes(a: &Node, b: &Node, sorting: SortState) -> Ordering {
    b.is_dir().cmp(&a.is_dir()).then_with(|| {
        let ordering = column_ordering(a, b, sorting.column)
            .then_with(|| a.name_lower().cmp(b.name_lower()))
            .then_with(|| a.path().cmp(b.path()));
        match sorting.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    })
}

/// Column key comparison for two nodes of the same partition.
fn column_ordering(a: &Node, b: &Node, column: Column) -> Ordering {
    match column {
        Column::Name => a.name_lower().cmp(b.name_lower()),
        Column::Size => match (a.is_dir(), b.is_dir()) {
            (true, true) => a.name_lower().cmp(b.name_lower()),
            (false, false) => a.size().cmp(&b.size()),
            // Unreachable within a partition; keep directories first anyway.
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        },
        Column::Modified => a.modified().cmp(b.modified()),
        Column::Permissions => a.permissions().cmp(b.permissions()),
        Column::Owner => a.owner().cmp(b.owner()),
    }
}

/// Sort `node`'s visible children in place.
///
/// Returns `false` without touching anything when the node was already
/// sorted with the same state.
pub fn sort_children(registry: &mut Registry, node: NodeId, sorting: SortState) -> bool {
    if registry.node(node).current_sort_state() == Some(sorting) {
        tracing::trace!(node = %node, ?sorting, "Children already sorted");
        return false;
    }

    let mut children = registry.node_mut(node).take_visible_children();
    {
        let registry = &*registry;
        children.sort_by(|&a, &b| compare_nodes(registry.node(a), registry.node(b), sorting));
    }
    tracing::trace!(
        node = %node,
        children = children.len(),
        column = %sorting.column,
        order = ?sorting.order,
        "Sorted children"
    );
    registry.node_mut(node).set_sorted_children(children, sorting);
    true
}
