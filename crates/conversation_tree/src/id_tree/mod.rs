//! IdentifierTree - ordered tree over opaque string ids
//!
//! Nodes live in an arena owned by the tree; an id index gives O(1) lookup.
//! The tree is append-only: nodes are never removed or moved.

mod node;
mod snapshot;
mod walk;

use std::collections::HashMap;

use crate::error::{Result, TreeError};

pub use node::NodeRef;
pub use snapshot::{SnapshotNode, TreeSnapshot};
pub use walk::Walk;

/// Arena slot of the root node.
const ROOT_SLOT: usize = 0;

#[derive(Debug, Clone)]
struct NodeRecord {
    id: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Ordered tree of unique string ids.
#[derive(Debug, Clone)]
pub struct IdentifierTree {
    nodes: Vec<NodeRecord>,
    index: HashMap<String, usize>,
}

impl IdentifierTree {
    /// Create a tree containing only `root_id`.
    pub fn new(root_id: impl Into<String>) -> Result<Self> {
        let root_id = root_id.into();
        if root_id.is_empty() {
            return Err(TreeError::EmptyRootId);
        }

        let mut index = HashMap::new();
        index.insert(root_id.clone(), ROOT_SLOT);

        Ok(Self {
            nodes: vec![NodeRecord {
                id: root_id,
                parent: None,
                children: Vec::new(),
            }],
            index,
        })
    }

    pub fn root_id(&self) -> &str {
        &self.nodes[ROOT_SLOT].id
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn find(&self, id: &str) -> Option<NodeRef<'_>> {
        self.slot(id).map(|slot| NodeRef::new(self, slot))
    }

    /// Parent id of `id`; `None` for the root and for unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let slot = self.slot(id)?;
        self.nodes[slot]
            .parent
            .map(|parent| self.nodes[parent].id.as_str())
    }

    /// Child ids of `id` in append order.
    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        self.find(id).map(|node| node.child_ids())
    }

    /// Number of edges between the root and `id`.
    pub fn depth_of(&self, id: &str) -> Option<usize> {
        let mut slot = self.slot(id)?;
        let mut depth = 0;
        while let Some(parent) = self.nodes[slot].parent {
            depth += 1;
            slot = parent;
        }
        Some(depth)
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// Ids are unique across the whole tree, not only among siblings.
    pub fn append_child(
        &mut self,
        parent_id: &str,
        child_id: impl Into<String>,
    ) -> Result<NodeRef<'_>> {
        let child_id = child_id.into();
        let parent = self
            .slot(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string()))?;
        if self.index.contains_key(&child_id) {
            return Err(TreeError::DuplicateId(child_id));
        }

        let slot = self.nodes.len();
        self.nodes.push(NodeRecord {
            id: child_id.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(slot);
        self.index.insert(child_id, slot);

        Ok(NodeRef::new(self, slot))
    }

    /// First id derived from `base` that is not yet in this tree.
    pub fn first_free_id(&self, base: &str, suffix_separator: &str) -> String {
        first_free_id(base, suffix_separator, |candidate| self.has(candidate))
    }

    fn slot(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Resolve an id collision deterministically.
///
/// Returns `base` when it is free, otherwise `base{sep}1`, `base{sep}2`, ...
/// whichever is the lowest free suffix.
pub fn first_free_id<F>(base: &str, suffix_separator: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}{suffix_separator}{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample_tree() -> IdentifierTree {
        let mut tree = IdentifierTree::new("root").unwrap();
        tree.append_child("root", "a").unwrap();
        tree.append_child("root", "b").unwrap();
        tree.append_child("a", "a1").unwrap();
        tree.append_child("a", "a2").unwrap();
        tree
    }

    #[test]
    fn test_empty_root_rejected() {
        assert_eq!(IdentifierTree::new("").unwrap_err(), TreeError::EmptyRootId);
    }

    #[test]
    fn test_lookup_and_parent() {
        let tree = sample_tree();
        assert!(tree.has("a2"));
        assert!(!tree.has("missing"));
        assert_eq!(tree.parent_of("a2"), Some("a"));
        assert_eq!(tree.parent_of("root"), None);
        assert_eq!(tree.parent_of("missing"), None);
        assert_eq!(tree.find("a").unwrap().id(), "a");
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth_of("a1"), Some(2));
        assert_eq!(tree.depth_of("root"), Some(0));
    }

    #[test]
    fn test_children_keep_append_order() {
        let mut tree = sample_tree();
        tree.append_child("a", "a3").unwrap();
        assert_eq!(tree.children_of("a").unwrap(), vec!["a1", "a2", "a3"]);
        assert_eq!(tree.children_of("root").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_append_errors_leave_tree_untouched() {
        let mut tree = sample_tree();

        let err = tree.append_child("missing", "x").unwrap_err();
        assert_eq!(err, TreeError::ParentNotFound("missing".to_string()));

        // Duplicate check is global, not per sibling list.
        let err = tree.append_child("b", "a1").unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("a1".to_string()));

        let err = tree.append_child("a", "root").unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("root".to_string()));

        assert_eq!(tree.node_count(), 5);
        assert!(tree.children_of("b").unwrap().is_empty());
    }

    #[test]
    fn test_first_free_id_with_preseeded_index() {
        let taken: HashSet<&str> = ["t::part-0:text", "t::part-0:text-1"].into_iter().collect();
        let id = first_free_id("t::part-0:text", "-", |c| taken.contains(c));
        assert_eq!(id, "t::part-0:text-2");

        let id = first_free_id("fresh", "-", |c| taken.contains(c));
        assert_eq!(id, "fresh");
    }

    #[test]
    fn test_first_free_id_against_tree() {
        let mut tree = sample_tree();
        tree.append_child("root", "a-1").unwrap();
        assert_eq!(tree.first_free_id("a", "-"), "a-2");
        assert_eq!(tree.first_free_id("c", "-"), "c");
    }
}
