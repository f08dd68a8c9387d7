use thiserror::Error;

/// Errors raised by the identifier tree and the conversation tree built on it.
///
/// Every variant is scoped to the failing call: the tree is left exactly as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("root id cannot be empty")]
    EmptyRootId,

    #[error("invalid tree config: {0}")]
    InvalidConfig(String),

    #[error("turn id cannot be empty")]
    EmptyTurnId,

    #[error("id already exists in tree: {0}")]
    DuplicateId(String),

    #[error("turn already registered: {0}")]
    DuplicateTurn(String),

    #[error("parent not found: {0}")]
    ParentNotFound(String),

    #[error("branch anchor not found: {0}")]
    AnchorNotFound(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("turn not found: {0}")]
    TurnNotFound(String),

    /// A node path step is not a direct child of the preceding step.
    #[error("invalid path: node '{node}' is not a child of '{expected_parent}'")]
    InvalidPath {
        node: String,
        expected_parent: String,
    },
}

/// Failure of a serialization that ran an external validator over its output.
///
/// Validator errors are carried as-is so callers can match on their own type.
#[derive(Error, Debug)]
pub enum ValidatedError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Validation(E),
}

pub type Result<T> = std::result::Result<T, TreeError>;
