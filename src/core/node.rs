// LsViz - core/node.rs
//
// Tree vertices and the arena that owns them.
//
// Every node lives in the `Registry`, keyed by its `NodeId`. Parent and child
// links are ids, never references, so the graph has no ownership cycles and
// the view can hold plain ids as opaque coordinates.

use crate::core::model::SortState;
use crate::util::constants;
use crate::util::error::TreeError;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of node identities. Ids are process-unique and never recycled, so
/// an id captured from a discarded tree can never alias a node of a new one.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

fn next_node_id() -> NodeId {
    let previous = NEXT_NODE_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
        .unwrap_or_else(|_| panic!("node identity space exhausted"));
    NodeId(previous)
}

// =============================================================================
// NodeId
// =============================================================================

/// Opaque, monotonically increasing node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw numeric value (for logging).
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Node
// =============================================================================

/// File metadata carried by a node.
///
/// `Default` is the placeholder shape: no size, no labels and an empty
/// permission string, which reads as a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMetadata {
    pub size: u64,
    pub modified: String,
    pub permissions: String,
    /// `owner:group` composite.
    pub owner: String,
}

/// Directory test shared by nodes and the builder: an empty permission string
/// (root sentinel, placeholders) or one starting with `d`.
pub fn permissions_denote_directory(permissions: &str) -> bool {
    permissions.is_empty() || permissions.starts_with('d')
}

/// A single vertex of the file tree.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    path: String,
    name: String,
    name_lower: String,
    is_dir: bool,
    placeholder: bool,
    metadata: NodeMetadata,
    parent: Option<NodeId>,
    /// Every child in insertion order.
    all_children: Vec<NodeId>,
    /// Children exposed to the view, in the order of the last sort.
    visible_children: Vec<NodeId>,
    current_sort_state: Option<SortState>,
}

impl Node {
    fn new(id: NodeId, path: String, metadata: NodeMetadata, parent: Option<NodeId>) -> Self {
        let name = display_name(&path).to_string();
        Self {
            id,
            name_lower: name.to_lowercase(),
            name,
            path,
            is_dir: permissions_denote_directory(&metadata.permissions),
            placeholder: false,
            metadata,
            parent,
            all_children: Vec::new(),
            visible_children: Vec::new(),
            current_sort_state: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase display name, cached for case-insensitive sorting.
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// True when the node was synthesized for an implied ancestor and no
    /// entry has supplied its real metadata yet.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn size(&self) -> u64 {
        self.metadata.size
    }

    pub fn modified(&self) -> &str {
        &self.metadata.modified
    }

    pub fn permissions(&self) -> &str {
        &self.metadata.permissions
    }

    pub fn owner(&self) -> &str {
        &self.metadata.owner
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn all_children(&self) -> &[NodeId] {
        &self.all_children
    }

    pub fn visible_children(&self) -> &[NodeId] {
        &self.visible_children
    }

    pub fn current_sort_state(&self) -> Option<SortState> {
        self.current_sort_state
    }

    /// Extension of the display name without the dot, if any. Dotfiles such
    /// as `.bashrc` have no extension.
    pub fn extension(&self) -> Option<&str> {
        let dot = self.name.rfind('.')?;
        if dot == 0 || dot + 1 == self.name.len() {
            return None;
        }
        Some(&self.name[dot + 1..])
    }

    pub(crate) fn take_visible_children(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.visible_children)
    }

    pub(crate) fn set_sorted_children(&mut self, children: Vec<NodeId>, sorting: SortState) {
        self.visible_children = children;
        self.current_sort_state = Some(sorting);
    }
}

/// Last segment of a `/`-separated path; empty for the root.
fn display_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

// =============================================================================
// Registry
// =============================================================================

/// Arena owning every node of one tree by identity.
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl Registry {
    /// Create a registry holding only the root sentinel.
    pub fn new() -> Self {
        let root_id = next_node_id();
        let root = Node::new(
            root_id,
            constants::ROOT_PATH.to_string(),
            NodeMetadata::default(),
            None,
        );
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);
        Self {
            nodes,
            root: root_id,
        }
    }

    /// Identity of the root sentinel.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of registered nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root sentinel exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a node, register it, and append it to `parent` if given.
    pub fn create_node(
        &mut self,
        path: String,
        metadata: NodeMetadata,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = next_node_id();
        self.nodes.insert(id, Node::new(id, path, metadata, parent));
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        id
    }

    /// Create a placeholder directory for an implied ancestor path.
    pub fn create_placeholder(&mut self, path: String, parent: NodeId) -> NodeId {
        let id = self.create_node(path, NodeMetadata::default(), Some(parent));
        self.node_mut(id).placeholder = true;
        id
    }

    /// Checked lookup.
    pub fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::NodeNotFound { id })
    }

    /// Lookup for ids that came from this registry. An unknown id here means a
    /// stale or forged coordinate, which is a programming error.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(&id) {
            Some(node) => node,
            None => panic!("node {id} is not registered in this tree"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(&id) {
            Some(node) => node,
            None => panic!("node {id} is not registered in this tree"),
        }
    }

    /// Append `child` to both child sequences of `parent`. Does not sort; the
    /// parent's memoized sort state is dropped so the next pass resorts it.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.all_children.push(child);
        parent_node.visible_children.push(child);
        parent_node.current_sort_state = None;
        // A node that gains children is a directory even if a file entry
        // was seen for the same path first.
        parent_node.is_dir = true;
    }

    /// Linear scan of `parent`'s children for one with the given path.
    pub fn find_child(&self, parent: NodeId, path: &str) -> Option<NodeId> {
        self.node(parent)
            .all_children
            .iter()
            .copied()
            .find(|&child| self.node(child).path == path)
    }

    /// Replace the metadata of an existing node with metadata from a real
    /// entry. Identity, position, and children are kept.
    pub fn merge_metadata(&mut self, id: NodeId, metadata: NodeMetadata) {
        let node = self.node_mut(id);
        node.is_dir =
            permissions_denote_directory(&metadata.permissions) || !node.all_children.is_empty();
        node.metadata = metadata;
        node.placeholder = false;
        let parent = node.parent;
        if let Some(parent) = parent {
            self.node_mut(parent).current_sort_state = None;
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
