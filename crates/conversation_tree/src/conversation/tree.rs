use crate::error::{Result, TreeError};
use crate::id_tree::NodeRef;
use crate::turn::{ContentFragment, ConversationTurn};

use super::{ConversationTree, NodeKind};

impl<T: ConversationTurn> ConversationTree<T> {
    /// Insert a turn and one structural node per content fragment.
    ///
    /// Without `parent_id` the turn goes under the default tail. The explicit
    /// parent is used as given, even when it is a branch root or a fragment.
    /// All checks run before the first append, so a failed call changes
    /// nothing.
    pub fn add_turn(&mut self, turn: T, parent_id: Option<&str>) -> Result<NodeRef<'_>> {
        let turn_id = turn.id().to_string();
        if turn_id.is_empty() {
            return Err(TreeError::EmptyTurnId);
        }
        if self.turns.contains_key(&turn_id) {
            return Err(TreeError::DuplicateTurn(turn_id));
        }
        if self.tree.has(&turn_id) {
            return Err(TreeError::DuplicateId(turn_id));
        }

        let explicit_parent = parent_id.is_some();
        let parent_id =
            parent_id.map_or_else(|| self.last_default_parent_id.clone(), str::to_string);
        if !self.tree.has(&parent_id) {
            return Err(TreeError::ParentNotFound(parent_id));
        }

        self.tree.append_child(&parent_id, turn_id.clone())?;

        for (index, fragment) in turn.fragments().iter().enumerate() {
            let base = self.config.fragment_id(&turn_id, index, fragment.kind());
            let fragment_id = self.tree.first_free_id(&base, &self.config.suffix_separator);
            if fragment_id != base {
                tracing::warn!(
                    turn_id = %turn_id,
                    derived = %base,
                    resolved = %fragment_id,
                    "ConversationTree: fragment id collision resolved with suffix"
                );
            }
            self.tree.append_child(&turn_id, fragment_id)?;
        }

        tracing::debug!(
            turn_id = %turn_id,
            parent_id = %parent_id,
            fragment_count = turn.fragments().len(),
            explicit_parent,
            "ConversationTree: turn added"
        );

        self.turns.insert(turn_id.clone(), turn);
        self.last_default_parent_id = turn_id.clone();

        self.tree
            .find(&turn_id)
            .ok_or(TreeError::NodeNotFound(turn_id))
    }
}

impl<T> ConversationTree<T> {
    /// Open a new branch under `anchor_id` and make it the default tail.
    ///
    /// The branch root becomes the anchor's last child. Returns its id, which
    /// is `{anchor}::{label}` unless that id is taken.
    pub fn begin_branch(&mut self, anchor_id: &str, label: Option<&str>) -> Result<String> {
        if !self.tree.has(anchor_id) {
            return Err(TreeError::AnchorNotFound(anchor_id.to_string()));
        }

        let label = label.unwrap_or(self.config.default_branch_label.as_str());
        let base = self.config.branch_id(anchor_id, label);
        let branch_id = self.tree.first_free_id(&base, &self.config.suffix_separator);

        self.tree.append_child(anchor_id, branch_id.clone())?;
        self.branch_roots.insert(branch_id.clone());

        tracing::info!(
            anchor_id = %anchor_id,
            branch_id = %branch_id,
            previous_tail = %self.last_default_parent_id,
            "ConversationTree: branch started"
        );

        self.last_default_parent_id = branch_id.clone();
        Ok(branch_id)
    }

    /// Node that the next turn without explicit parent attaches to.
    pub fn default_parent(&self) -> &str {
        &self.last_default_parent_id
    }

    /// Point the default tail at an existing node, e.g. to resume an older branch.
    pub fn select_default_parent(&mut self, id: &str) -> Result<()> {
        if !self.tree.has(id) {
            return Err(TreeError::NodeNotFound(id.to_string()));
        }

        tracing::info!(
            from = %self.last_default_parent_id,
            to = %id,
            "ConversationTree: default parent selected"
        );
        self.last_default_parent_id = id.to_string();
        Ok(())
    }

    /// Branch roots opened on `anchor_id`, oldest first.
    pub fn branches_of(&self, anchor_id: &str) -> Result<Vec<&str>> {
        let anchor = self
            .tree
            .find(anchor_id)
            .ok_or_else(|| TreeError::NodeNotFound(anchor_id.to_string()))?;

        Ok(anchor
            .children()
            .map(|child| child.id())
            .filter(|id| self.branch_roots.contains(*id))
            .collect())
    }

    /// Fragment node ids of a turn, in fragment order.
    pub fn fragments_of(&self, turn_id: &str) -> Result<Vec<&str>> {
        if !self.is_turn(turn_id) {
            return Err(TreeError::TurnNotFound(turn_id.to_string()));
        }
        let turn = self
            .tree
            .find(turn_id)
            .ok_or_else(|| TreeError::NodeNotFound(turn_id.to_string()))?;

        Ok(turn
            .children()
            .map(|child| child.id())
            .filter(|id| self.node_kind(id) == Some(NodeKind::Fragment))
            .collect())
    }
}
