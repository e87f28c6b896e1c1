// LsViz - core/builder.rs
//
// Turns an ordered batch of listing entries into tree structure.
//
// Ancestors implied by an entry's path are resolved from the root downward,
// reusing nodes that already exist and synthesizing placeholder directories
// for the rest. Entries may arrive in any order.

use crate::core::model::{BuildStats, ListingEntry};
use crate::core::node::{NodeId, NodeMetadata, Registry};
use crate::util::constants;
use std::collections::HashMap;

/// Normalise a listing path: force a leading `/`, drop empty segments
/// (repeated or trailing slashes). The root normalises to `/`.
pub fn normalise_path(raw: &str) -> String {
    let mut path = String::with_capacity(raw.len() + 1);
    for segment in raw.trim().split('/').filter(|s| !s.is_empty()) {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push_str(constants::ROOT_PATH);
    }
    path
}

/// Proper ancestors of a normalised path, root excluded, shallowest first.
///
/// `/x/y/f.txt` yields `["/x", "/x/y"]`.
pub fn ancestor_paths(path: &str) -> Vec<&str> {
    path.match_indices('/')
        .map(|(i, _)| i)
        .filter(|&i| i > 0)
        .map(|i| &path[..i])
        .collect()
}

/// Incremental builder for one load batch.
///
/// The path lookup lives only as long as the batch; ancestors created by an
/// earlier batch are found again by scanning their parent's children.
pub struct TreeBuilder<'a> {
    registry: &'a mut Registry,
    lookup: HashMap<String, NodeId>,
    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        let mut lookup = HashMap::new();
        lookup.insert(constants::ROOT_PATH.to_string(), registry.root());
        Self {
            registry,
            lookup,
            stats: BuildStats::default(),
        }
    }

    /// Insert every entry in order.
    pub fn extend<'e, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'e ListingEntry>,
    {
        for entry in entries {
            self.insert(entry);
        }
    }

    /// Insert one entry, returning the id of its node (or `None` when the
    /// entry names the root itself).
    pub fn insert(&mut self, entry: &ListingEntry) -> Option<NodeId> {
        let path = normalise_path(&entry.path);
        if path == constants::ROOT_PATH {
            tracing::debug!(raw = %entry.path, "Ignoring entry for the root path");
            self.stats.ignored += 1;
            return None;
        }

        let parent = self.resolve_ancestors(&path);
        let metadata = NodeMetadata {
            size: entry.size,
            modified: entry.modified.clone(),
            permissions: entry.permissions.clone(),
            owner: entry.owner_label(),
        };

        let existing = self
            .lookup
            .get(&path)
            .copied()
            .or_else(|| self.registry.find_child(parent, &path));

        let id = match existing {
            Some(id) => {
                tracing::trace!(
                    path = %path,
                    placeholder = self.registry.node(id).is_placeholder(),
                    "Merging entry into existing node"
                );
                self.registry.merge_metadata(id, metadata);
                self.stats.merged += 1;
                id
            }
            None => {
                self.stats.created += 1;
                self.registry.create_node(path.clone(), metadata, Some(parent))
            }
        };
        self.lookup.insert(path, id);
        Some(id)
    }

    /// Walk from the root to the entry's immediate parent, creating
    /// placeholders for ancestors not seen before. Returns the parent id.
    fn resolve_ancestors(&mut self, path: &str) -> NodeId {
        let mut current = self.registry.root();
        for ancestor in ancestor_paths(path) {
            current = match self.lookup.get(ancestor) {
                Some(&id) => id,
                None => {
                    let id = match self.registry.find_child(current, ancestor) {
                        Some(id) => id,
                        None => {
                            self.stats.placeholders += 1;
                            self.registry
                                .create_placeholder(ancestor.to_string(), current)
                        }
                    };
                    self.lookup.insert(ancestor.to_string(), id);
                    id
                }
            };
        }
        current
    }

    /// Finish the batch.
    pub fn finish(self) -> BuildStats {
        self.stats
    }
}
