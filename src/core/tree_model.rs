// LsViz - core/tree_model.rs
//
// Coordinate adapter between the node graph and a tree view.
//
// Views never hold node references. They address items by (row, column,
// parent) and receive `ModelIndex` values that carry the row, the column,
// and the node identity, so every query decodes in O(1) except parent
// resolution, which scans the grandparent's visible children.
//
// Structural mutations must be bracketed by `begin_layout_change` and
// `end_layout_change`; listeners see exactly one pair per bracket.

use crate::core::builder::TreeBuilder;
use crate::core::model::{
    BuildStats, CellValue, Column, IconKind, ListingEntry, Role, SortOrder, SortState,
};
use crate::core::node::{Node, NodeId, Registry};
use crate::core::sort;
use crate::util::constants;
use std::fmt;

// =============================================================================
// Coordinates
// =============================================================================

/// Address of an item as seen by the view.
///
/// `Invalid` stands for "no item", which the model resolves to the root
/// sentinel when used as a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelIndex {
    Invalid,
    Item {
        /// Position among the parent's visible children.
        row: usize,
        column: Column,
        node: NodeId,
    },
}

impl ModelIndex {
    pub fn is_valid(&self) -> bool {
        matches!(self, ModelIndex::Item { .. })
    }

    pub fn row(&self) -> Option<usize> {
        match self {
            ModelIndex::Item { row, .. } => Some(*row),
            ModelIndex::Invalid => None,
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            ModelIndex::Item { node, .. } => Some(*node),
            ModelIndex::Invalid => None,
        }
    }

    /// Same item, different column.
    pub fn sibling_at_column(&self, column: Column) -> ModelIndex {
        match *self {
            ModelIndex::Item { row, node, .. } => ModelIndex::Item { row, column, node },
            ModelIndex::Invalid => ModelIndex::Invalid,
        }
    }
}

// =============================================================================
// Layout notifications
// =============================================================================

/// Structural-change notification delivered to subscribed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
    AboutToChange,
    Changed,
}

type LayoutListener = Box<dyn FnMut(LayoutEvent)>;

// =============================================================================
// TreeModel
// =============================================================================

/// The node graph exposed as (row, column, parent)-addressable items.
pub struct TreeModel {
    registry: Registry,
    /// "No item" coordinate handed to views; built once here and threaded
    /// through explicitly.
    invalid: ModelIndex,
    sorting: SortState,
    listeners: Vec<LayoutListener>,
    layout_changing: bool,
}

impl fmt::Debug for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeModel")
            .field("nodes", &self.registry.len())
            .field("sorting", &self.sorting)
            .field("listeners", &self.listeners.len())
            .field("layout_changing", &self.layout_changing)
            .finish()
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeModel {
    /// Empty model holding only the root sentinel, sorted by name ascending.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            invalid: ModelIndex::Invalid,
            sorting: SortState::new(Column::Name, SortOrder::Ascending),
            listeners: Vec::new(),
            layout_changing: false,
        }
    }

    /// The model's "no item" coordinate; also addresses the root as a parent.
    pub fn invalid_index(&self) -> ModelIndex {
        self.invalid
    }

    pub fn root_id(&self) -> NodeId {
        self.registry.root()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of nodes excluding the root sentinel.
    pub fn node_count(&self) -> usize {
        self.registry.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Node addressed by `index`; the invalid index addresses the root.
    pub fn node(&self, index: &ModelIndex) -> &Node {
        match index {
            ModelIndex::Invalid => self.registry.node(self.registry.root()),
            ModelIndex::Item { node, .. } => self.registry.node(*node),
        }
    }

    // -------------------------------------------------------------------------
    // View-facing coordinate operations
    // -------------------------------------------------------------------------

    /// Coordinate of the `row`-th visible child of `parent`.
    ///
    /// Panics when `row` is out of range; views must stay within
    /// `row_count(parent)`.
    pub fn index(&self, row: usize, column: Column, parent: &ModelIndex) -> ModelIndex {
        let parent_node = self.node(parent);
        match parent_node.visible_children().get(row) {
            Some(&node) => ModelIndex::Item { row, column, node },
            None => panic!(
                "row {row} out of range for '{}' ({} visible children)",
                parent_node.path(),
                parent_node.visible_children().len()
            ),
        }
    }

    /// Coordinate of the item's parent, or the invalid index for top-level
    /// items. The parent's row is found by scanning the grandparent's
    /// visible children.
    pub fn parent(&self, index: &ModelIndex) -> ModelIndex {
        let ModelIndex::Item { node, .. } = *index else {
            return self.invalid;
        };
        let root = self.registry.root();
        let parent = match self.registry.node(node).parent() {
            Some(parent) if parent != root => parent,
            _ => return self.invalid,
        };
        let grandparent = self.registry.node(parent).parent().unwrap_or(root);
        let row = self.row_within(grandparent, parent);
        ModelIndex::Item {
            row,
            column: Column::Name,
            node: parent,
        }
    }

    /// Coordinate for a node identity (e.g. one held in an expansion set).
    pub fn index_for_node(&self, id: NodeId, column: Column) -> ModelIndex {
        let root = self.registry.root();
        if id == root {
            return self.invalid;
        }
        let parent = self.registry.node(id).parent().unwrap_or(root);
        ModelIndex::Item {
            row: self.row_within(parent, id),
            column,
            node: id,
        }
    }

    fn row_within(&self, parent: NodeId, child: NodeId) -> usize {
        let siblings = self.registry.node(parent).visible_children();
        match siblings.iter().position(|&id| id == child) {
            Some(row) => row,
            None => panic!("node {child} is not a visible child of its parent {parent}"),
        }
    }

    /// Number of visible children under `parent`.
    pub fn row_count(&self, parent: &ModelIndex) -> usize {
        self.node(parent).visible_children().len()
    }

    pub fn column_count(&self) -> usize {
        constants::COLUMN_COUNT
    }

    /// Cell data for `index` under `role`.
    pub fn data(&self, index: &ModelIndex, role: Role) -> Option<CellValue> {
        let ModelIndex::Item { column, node, .. } = *index else {
            return None;
        };
        let node = self.registry.node(node);
        match role {
            Role::Display => Some(CellValue::Text(display_text(node, column))),
            Role::Decoration => match column {
                Column::Name => Some(CellValue::Icon(icon_kind(node))),
                Column::Size | Column::Modified | Column::Permissions | Column::Owner => None,
            },
        }
    }

    /// Static column titles.
    pub fn header_data(&self, column: Column, role: Role) -> Option<CellValue> {
        match role {
            Role::Display => Some(CellValue::Text(column.title().to_string())),
            Role::Decoration => None,
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Record the requested sort. Nothing is reordered here; directories are
    /// sorted lazily by `sort_node` as the expansion tracker reaches them.
    pub fn sort(&mut self, column: Column, order: SortOrder) {
        self.sorting = SortState::new(column, order);
        tracing::debug!(column = %column, ?order, "Sort requested");
    }

    pub fn sorting(&self) -> SortState {
        self.sorting
    }

    /// Apply the recorded sort to the direct children of the directory at
    /// `index`. Files and directories with fewer than two children are left
    /// alone. Must be called inside a layout bracket.
    pub fn sort_node(&mut self, index: &ModelIndex) -> bool {
        debug_assert!(self.layout_changing, "sort_node outside a layout bracket");
        let node = self.node(index);
        if !node.is_dir() || node.visible_children().len() < 2 {
            return false;
        }
        let id = node.id();
        sort::sort_children(&mut self.registry, id, self.sorting)
    }

    // -------------------------------------------------------------------------
    // Structural changes
    // -------------------------------------------------------------------------

    /// Grow the tree from a batch of entries, merging into whatever is
    /// already loaded. The whole batch is one layout bracket.
    pub fn load_entries(&mut self, entries: &[ListingEntry]) -> BuildStats {
        self.begin_layout_change();
        let stats = {
            let mut builder = TreeBuilder::new(&mut self.registry);
            builder.extend(entries);
            builder.finish()
        };
        self.end_layout_change();

        tracing::info!(
            entries = entries.len(),
            consumed = stats.entries(),
            created = stats.created,
            placeholders = stats.placeholders,
            merged = stats.merged,
            total_nodes = self.node_count(),
            "Entries loaded into tree"
        );
        stats
    }

    /// Register a listener for layout notifications.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(LayoutEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Open a layout bracket. Brackets do not nest.
    pub fn begin_layout_change(&mut self) {
        assert!(!self.layout_changing, "layout change already in progress");
        self.layout_changing = true;
        self.emit(LayoutEvent::AboutToChange);
    }

    /// Close the current layout bracket.
    pub fn end_layout_change(&mut self) {
        assert!(self.layout_changing, "no layout change in progress");
        self.layout_changing = false;
        self.emit(LayoutEvent::Changed);
    }

    /// Run `f` inside one layout bracket.
    pub fn with_layout_change<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_layout_change();
        let result = f(self);
        self.end_layout_change();
        result
    }

    pub fn is_layout_changing(&self) -> bool {
        self.layout_changing
    }

    fn emit(&mut self, event: LayoutEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

// =============================================================================
// Cell formatting
// =============================================================================

fn display_text(node: &Node, column: Column) -> String {
    match column {
        Column::Name => node.name().to_string(),
        Column::Size => {
            if node.is_dir() {
                String::new()
            } else {
                format_size(node.size())
            }
        }
        Column::Modified => node.modified().to_string(),
        Column::Permissions => node.permissions().to_string(),
        Column::Owner => node.owner().to_string(),
    }
}

fn icon_kind(node: &Node) -> IconKind {
    if node.is_dir() {
        IconKind::Directory
    } else if let Some(ext) = node.extension() {
        IconKind::FileWithExtension(ext.to_string())
    } else {
        IconKind::File
    }
}

/// Byte count with `,` thousands separators, e.g. `1,234,567`.
pub fn format_size(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
