//! SharedConversation - a conversation tree usable across async tasks
//!
//! Mutations hold the write lock for their whole (synchronous) duration, so
//! two inserts can never interleave. Validation is the only step that awaits,
//! and it runs on cloned turns after the lock has been released.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::conversation::{ConversationTree, Selection};
use crate::error::{Result, ValidatedError};
use crate::id_tree::TreeSnapshot;
use crate::turn::ConversationTurn;
use crate::validation::AsyncTurnValidator;

pub struct SharedConversation<T> {
    inner: Arc<RwLock<ConversationTree<T>>>,
}

impl<T> Clone for SharedConversation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedConversation<T>
where
    T: ConversationTurn + Clone + Send + Sync,
{
    pub fn new(tree: ConversationTree<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Insert a turn; returns its id.
    pub async fn add_turn(&self, turn: T, parent_id: Option<&str>) -> Result<String> {
        let mut tree = self.inner.write().await;
        let node = tree.add_turn(turn, parent_id)?;
        Ok(node.id().to_string())
    }

    pub async fn begin_branch(&self, anchor_id: &str, label: Option<&str>) -> Result<String> {
        self.inner.write().await.begin_branch(anchor_id, label)
    }

    pub async fn select_default_parent(&self, id: &str) -> Result<()> {
        self.inner.write().await.select_default_parent(id)
    }

    pub async fn default_parent(&self) -> String {
        self.inner.read().await.default_parent().to_string()
    }

    pub async fn has(&self, id: &str) -> bool {
        self.inner.read().await.has(id)
    }

    pub async fn get_root_path(&self, target_id: &str) -> Result<Vec<String>> {
        self.inner.read().await.get_root_path(target_id)
    }

    /// Owned copies of the selected turns.
    pub async fn serialize(&self, selection: Selection<'_>) -> Result<Vec<T>> {
        let tree = self.inner.read().await;
        let turns = tree.serialize(selection)?;
        Ok(turns.into_iter().cloned().collect())
    }

    /// Serialize, release the lock, then await `validator` on the copies.
    pub async fn serialize_validated<V>(
        &self,
        selection: Selection<'_>,
        validator: &V,
    ) -> std::result::Result<Vec<T>, ValidatedError<V::Error>>
    where
        V: AsyncTurnValidator<T>,
    {
        let turns = self.serialize(selection).await?;
        validator
            .validate(&turns)
            .await
            .map_err(ValidatedError::Validation)?;
        Ok(turns)
    }

    pub async fn snapshot(&self) -> TreeSnapshot {
        self.inner.read().await.tree().snapshot()
    }

    /// Run a read-only closure against the tree under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&ConversationTree<T>) -> R) -> R {
        let tree = self.inner.read().await;
        f(&tree)
    }
}
