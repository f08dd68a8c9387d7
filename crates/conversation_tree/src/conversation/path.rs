//! Path derivation and serialization back into turns.

use crate::error::{Result, TreeError, ValidatedError};
use crate::validation::TurnValidator;

use super::ConversationTree;

/// Which turns a serialization call should produce.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Explicit root-to-node walk, validated step by step.
    NodePath(&'a [String]),
    /// Everything on the root path of this node.
    ToNode(&'a str),
    /// Registered turns looked up directly, no tree checks.
    ByIds(&'a [String]),
}

impl<T> ConversationTree<T> {
    /// Ids from the first node below the root down to `target_id`.
    ///
    /// The root itself is never part of the path, so the root's path is empty.
    pub fn get_root_path(&self, target_id: &str) -> Result<Vec<String>> {
        let target = self
            .tree
            .find(target_id)
            .ok_or_else(|| TreeError::NodeNotFound(target_id.to_string()))?;

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            path.push(node.id().to_string());
            current = node.parent();
        }
        path.reverse();

        tracing::debug!(
            target_id = %target_id,
            depth = path.len(),
            "ConversationTree: root path derived"
        );
        Ok(path)
    }

    /// Turns along an explicit node path.
    ///
    /// The first id must be a child of the root and every following id a child
    /// of the one before it. Fragment and branch-root nodes are walked over but
    /// not returned.
    pub fn serialize_from_node_path<S: AsRef<str>>(&self, node_path: &[S]) -> Result<Vec<&T>> {
        let mut expected_parent = self.tree.root_id();
        let mut turns = Vec::new();

        for step in node_path {
            let id = step.as_ref();
            let node = match self.tree.find(id) {
                Some(node) if node.parent().map(|p| p.id()) == Some(expected_parent) => node,
                _ => {
                    tracing::warn!(
                        node = %id,
                        expected_parent = %expected_parent,
                        "ConversationTree: node path rejected"
                    );
                    return Err(TreeError::InvalidPath {
                        node: id.to_string(),
                        expected_parent: expected_parent.to_string(),
                    });
                }
            };

            if let Some(turn) = self.turns.get(id) {
                turns.push(turn);
            }
            expected_parent = node.id();
        }

        tracing::debug!(
            path_len = node_path.len(),
            turn_count = turns.len(),
            "ConversationTree: serialized node path"
        );
        Ok(turns)
    }

    /// The conversation as of `target_id`.
    pub fn serialize_to_node(&self, target_id: &str) -> Result<Vec<&T>> {
        let path = self.get_root_path(target_id)?;
        self.serialize_from_node_path(&path)
    }

    /// Turns by id in the given order, ignoring tree shape.
    pub fn serialize_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&T>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.turns
                    .get(id)
                    .ok_or_else(|| TreeError::TurnNotFound(id.to_string()))
            })
            .collect()
    }

    pub fn serialize(&self, selection: Selection<'_>) -> Result<Vec<&T>> {
        match selection {
            Selection::NodePath(path) => self.serialize_from_node_path(path),
            Selection::ToNode(target_id) => self.serialize_to_node(target_id),
            Selection::ByIds(ids) => self.serialize_by_ids(ids),
        }
    }

    /// Serialize, then run `validator` over the result.
    ///
    /// Validator errors are returned untouched as [`ValidatedError::Validation`].
    pub fn serialize_validated<V>(
        &self,
        selection: Selection<'_>,
        validator: &V,
    ) -> std::result::Result<Vec<&T>, ValidatedError<V::Error>>
    where
        V: TurnValidator<T>,
    {
        let turns = self.serialize(selection)?;
        validator
            .validate(&turns)
            .map_err(ValidatedError::Validation)?;
        Ok(turns)
    }
}
