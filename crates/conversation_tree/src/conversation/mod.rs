//! ConversationTree - branching chat history on top of an IdentifierTree
//!
//! Turns are tree nodes with a registered payload. Each turn owns one
//! structural child per content fragment, and forks hang off a turn as
//! branch-root children. Only turns ever come back out of serialization.

mod path;
mod tree;

use std::collections::{HashMap, HashSet};

use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::id_tree::IdentifierTree;

pub use path::Selection;

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Turn,
    Fragment,
    BranchRoot,
}

/// Branching conversation history.
///
/// One instance per chat session; instances share nothing.
#[derive(Debug, Clone)]
pub struct ConversationTree<T> {
    tree: IdentifierTree,
    turns: HashMap<String, T>,
    branch_roots: HashSet<String>,
    last_default_parent_id: String,
    config: TreeConfig,
}

impl<T> ConversationTree<T> {
    /// Empty conversation rooted at `root_id`, default naming conventions.
    pub fn new(root_id: impl Into<String>) -> Result<Self> {
        Self::with_config(TreeConfig {
            root_id: root_id.into(),
            ..TreeConfig::default()
        })
    }

    /// Empty conversation using `config`, which must pass [`TreeConfig::validate`].
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        let tree = IdentifierTree::new(config.root_id.clone())?;
        config
            .validate()
            .map_err(|err| TreeError::InvalidConfig(err.to_string()))?;
        Ok(Self {
            last_default_parent_id: tree.root_id().to_string(),
            tree,
            turns: HashMap::new(),
            branch_roots: HashSet::new(),
            config,
        })
    }

    /// Read-only view of the underlying identifier tree.
    pub fn tree(&self) -> &IdentifierTree {
        &self.tree
    }

    pub fn root_id(&self) -> &str {
        self.tree.root_id()
    }

    pub fn has(&self, id: &str) -> bool {
        self.tree.has(id)
    }

    pub fn turn(&self, id: &str) -> Option<&T> {
        self.turns.get(id)
    }

    pub fn is_turn(&self, id: &str) -> bool {
        self.turns.contains_key(id)
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn node_kind(&self, id: &str) -> Option<NodeKind> {
        if !self.tree.has(id) {
            return None;
        }
        let kind = if id == self.tree.root_id() {
            NodeKind::Root
        } else if self.is_turn(id) {
            NodeKind::Turn
        } else if self.branch_roots.contains(id) {
            NodeKind::BranchRoot
        } else {
            NodeKind::Fragment
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::ChatTurn;

    #[test]
    fn test_custom_naming() {
        let config = TreeConfig {
            root_id: "session".to_string(),
            default_branch_label: "alt".to_string(),
            fragment_infix: "/frag".to_string(),
            branch_separator: "/".to_string(),
            suffix_separator: "#".to_string(),
        };
        let mut conv = ConversationTree::with_config(config).unwrap();
        conv.add_turn(ChatTurn::user("U1", "hi"), None).unwrap();
        conv.begin_branch("U1", None).unwrap();
        let second = conv.begin_branch("U1", None).unwrap();

        assert_eq!(conv.root_id(), "session");
        assert_eq!(conv.fragments_of("U1").unwrap(), vec!["U1/frag0:text"]);
        assert_eq!(second, "U1/alt#1");
    }

    #[test]
    fn test_invalid_naming_rejected() {
        let config = TreeConfig {
            suffix_separator: String::new(),
            fragment_infix: String::new(),
            ..TreeConfig::default()
        };
        let err = ConversationTree::<ChatTurn>::with_config(config).unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfig(ref msg) if msg.contains("fragment_infix")));

        let config = TreeConfig {
            default_branch_label: String::new(),
            ..TreeConfig::default()
        };
        assert!(matches!(
            ConversationTree::<ChatTurn>::with_config(config),
            Err(TreeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_root_rejected() {
        let err = ConversationTree::<ChatTurn>::new("").unwrap_err();
        assert_eq!(err, TreeError::EmptyRootId);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = ConversationTree::new("root").unwrap();
        let second: ConversationTree<ChatTurn> = ConversationTree::new("root").unwrap();
        first.add_turn(ChatTurn::user("U1", "hi"), None).unwrap();

        assert!(first.has("U1"));
        assert!(!second.has("U1"));
        assert_eq!(second.default_parent(), "root");
    }
}
