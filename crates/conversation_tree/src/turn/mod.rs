//! Turn module - what the tree needs to know about a conversation turn
//!
//! The tree only reads a turn's id and the kind tag of each fragment. Callers
//! with a richer schema implement the two traits below; `ChatTurn` is a ready
//! made payload for everyone else.

mod chat;
mod content;

pub use chat::{ChatTurn, Role};
pub use content::{ContentPart, ImageSource};

/// One discrete piece of a turn's content (text block, tool call, ...).
pub trait ContentFragment {
    /// Discriminator used when deriving the fragment's node id.
    fn kind(&self) -> &str;
}

/// A conversation turn as seen by the tree.
pub trait ConversationTurn {
    type Fragment: ContentFragment;

    /// Unique id of this turn.
    fn id(&self) -> &str;

    /// Content fragments in display order.
    fn fragments(&self) -> &[Self::Fragment];
}
