//! Depth-first traversal with early exit.
//!
//! Uses an explicit work stack so very deep branch chains do not grow the
//! call stack.

use super::{IdentifierTree, NodeRef};
use crate::error::{Result, TreeError};

/// Visitor decision for [`IdentifierTree::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Do not visit this node's children, keep walking its siblings.
    SkipChildren,
    /// End the traversal now.
    Stop,
}

impl IdentifierTree {
    /// Pre-order walk starting at `start_id`.
    ///
    /// Children are visited in append order. Returns `true` when the visitor
    /// stopped the walk early.
    pub fn walk<'a, F>(&'a self, start_id: &str, mut visitor: F) -> Result<bool>
    where
        F: FnMut(NodeRef<'a>) -> Walk,
    {
        let start = self
            .find(start_id)
            .ok_or_else(|| TreeError::NodeNotFound(start_id.to_string()))?;

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            match visitor(node) {
                Walk::Stop => return Ok(true),
                Walk::SkipChildren => {}
                Walk::Continue => stack.extend(node.children().rev()),
            }
        }
        Ok(false)
    }

    /// First node under `start_id` (inclusive, pre-order) matching `predicate`.
    pub fn find_first<'a, P>(
        &'a self,
        start_id: &str,
        mut predicate: P,
    ) -> Result<Option<NodeRef<'a>>>
    where
        P: FnMut(&NodeRef<'a>) -> bool,
    {
        let mut found = None;
        self.walk(start_id, |node| {
            if predicate(&node) {
                found = Some(node);
                Walk::Stop
            } else {
                Walk::Continue
            }
        })?;
        Ok(found)
    }

    /// Ids under `start_id` in pre-order, `start_id` first.
    pub fn preorder_ids(&self, start_id: &str) -> Result<Vec<&str>> {
        let mut ids = Vec::new();
        self.walk(start_id, |node| {
            ids.push(node.id());
            Walk::Continue
        })?;
        Ok(ids)
    }
}
