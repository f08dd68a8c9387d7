//! conversation_tree - branching chat history
//!
//! Turns are appended one at a time, any turn can be forked without losing
//! earlier alternatives, and any root-to-node line can be read back as an
//! ordered list of turns.
//!
//! - `id_tree` - ordered tree of unique string ids
//! - `conversation` - turns, fragments and branch roots on top of it
//! - `turn` - payload traits and a ready made chat turn type
//! - `validation` - hooks run over serialized turns
//! - `shared` - async wrapper serializing access to one tree
//! - `config` - id naming conventions

pub mod config;
pub mod conversation;
pub mod error;
pub mod id_tree;
pub mod shared;
pub mod turn;
pub mod validation;

pub use config::{ConfigError, TreeConfig};
pub use conversation::{ConversationTree, NodeKind, Selection};
pub use error::{Result, TreeError, ValidatedError};
pub use id_tree::{first_free_id, IdentifierTree, NodeRef, SnapshotNode, TreeSnapshot, Walk};
pub use shared::SharedConversation;
pub use turn::{ChatTurn, ContentFragment, ContentPart, ConversationTurn, ImageSource, Role};
pub use validation::{AsyncTurnValidator, EmptyTurnContent, RequireContent, TurnValidator};
