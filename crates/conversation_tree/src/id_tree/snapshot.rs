use serde::{Deserialize, Serialize};

use super::{IdentifierTree, ROOT_SLOT};

/// Detached copy of a tree's shape: ids and child order only.
///
/// Stored flat so that dropping, comparing or serializing a snapshot of a
/// very deep chain never recurses. `nodes[0]` is the root; `children` hold
/// positions in `nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
}

impl TreeSnapshot {
    pub fn root_id(&self) -> Option<&str> {
        self.nodes.first().map(|node| node.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Child ids of the node at `position`, in append order.
    pub fn child_ids(&self, position: usize) -> Vec<&str> {
        self.nodes
            .get(position)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.nodes.get(child))
                    .map(|child| child.id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        self.position(id).map(|position| self.child_ids(position))
    }
}

impl IdentifierTree {
    /// Deep, independent copy of the current shape.
    ///
    /// Positions are the arena slots, so the root is at 0 and every parent
    /// precedes its children.
    pub fn snapshot(&self) -> TreeSnapshot {
        debug_assert_eq!(self.nodes[ROOT_SLOT].parent, None);
        TreeSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|record| SnapshotNode {
                    id: record.id.clone(),
                    children: record.children.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_shape() {
        let mut tree = IdentifierTree::new("root").unwrap();
        tree.append_child("root", "a").unwrap();
        tree.append_child("a", "a1").unwrap();
        tree.append_child("root", "b").unwrap();

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.root_id(), Some("root"));
        assert_eq!(snapshot.child_ids(0), vec!["a", "b"]);
        assert_eq!(snapshot.children_of("a").unwrap(), vec!["a1"]);
        assert!(snapshot.children_of("missing").is_none());
        assert_eq!(snapshot.node_count(), 4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut tree = IdentifierTree::new("root").unwrap();
        tree.append_child("root", "a").unwrap();

        let mut snapshot = tree.snapshot();
        snapshot.nodes.push(SnapshotNode {
            id: "injected".to_string(),
            children: Vec::new(),
        });
        snapshot.nodes[0].children.push(2);
        tree.append_child("a", "a1").unwrap();

        assert!(!tree.has("injected"));
        assert!(snapshot.children_of("a").unwrap().is_empty());
        assert_eq!(tree.snapshot().node_count(), 3);
    }

    #[test]
    fn test_snapshot_json() {
        let mut tree = IdentifierTree::new("root").unwrap();
        tree.append_child("root", "a").unwrap();

        let json = serde_json::to_value(tree.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "nodes": [{ "id": "root", "children": [1] }, { "id": "a" }] })
        );
        let back: TreeSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree.snapshot());
    }

    #[test]
    fn test_deep_chain_snapshot() {
        let mut tree = IdentifierTree::new("root").unwrap();
        let mut parent = "root".to_string();
        for i in 0..100_000 {
            let id = format!("n{i}");
            tree.append_child(&parent, id.clone()).unwrap();
            parent = id;
        }

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.node_count(), 100_001);
        assert_eq!(snapshot.children_of("n99998").unwrap(), vec!["n99999"]);
        assert_eq!(snapshot, tree.snapshot());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TreeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.node_count(), 100_001);
        drop(back);
        drop(snapshot);
    }
}
