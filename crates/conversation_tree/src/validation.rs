//! Validation hooks run over serialized turns.
//!
//! The tree never inspects turn content itself; callers plug a validator in
//! and get its error back unchanged.

use async_trait::async_trait;
use thiserror::Error;

use crate::turn::ConversationTurn;

/// Synchronous check over a serialized turn list.
pub trait TurnValidator<T> {
    type Error: std::error::Error + 'static;

    fn validate(&self, turns: &[&T]) -> Result<(), Self::Error>;
}

/// Asynchronous check over a serialized turn list, e.g. a remote schema service.
#[async_trait]
pub trait AsyncTurnValidator<T>: Send + Sync
where
    T: Send + Sync,
{
    type Error: std::error::Error + Send + 'static;

    async fn validate(&self, turns: &[T]) -> Result<(), Self::Error>;
}

/// Rejects turns that carry no content fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireContent;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("turn has no content: {0}")]
pub struct EmptyTurnContent(pub String);

impl RequireContent {
    fn check<'a, T, I>(turns: I) -> Result<(), EmptyTurnContent>
    where
        T: ConversationTurn + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        match turns.into_iter().find(|turn| turn.fragments().is_empty()) {
            Some(turn) => Err(EmptyTurnContent(turn.id().to_string())),
            None => Ok(()),
        }
    }
}

impl<T: ConversationTurn> TurnValidator<T> for RequireContent {
    type Error = EmptyTurnContent;

    fn validate(&self, turns: &[&T]) -> Result<(), Self::Error> {
        Self::check(turns.iter().copied())
    }
}

#[async_trait]
impl<T> AsyncTurnValidator<T> for RequireContent
where
    T: ConversationTurn + Send + Sync,
{
    type Error = EmptyTurnContent;

    async fn validate(&self, turns: &[T]) -> Result<(), Self::Error> {
        Self::check(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationTree, Selection};
    use crate::error::ValidatedError;
    use crate::turn::{ChatTurn, Role};

    #[derive(Error, Debug)]
    #[error("conversation too long: {0} turns")]
    struct TooLong(usize);

    struct MaxTurns(usize);

    impl TurnValidator<ChatTurn> for MaxTurns {
        type Error = TooLong;

        fn validate(&self, turns: &[&ChatTurn]) -> Result<(), TooLong> {
            if turns.len() > self.0 {
                return Err(TooLong(turns.len()));
            }
            Ok(())
        }
    }

    fn conversation() -> ConversationTree<ChatTurn> {
        let mut conv = ConversationTree::new("root").unwrap();
        conv.add_turn(ChatTurn::user("U1", "hi"), None).unwrap();
        conv.add_turn(ChatTurn::new("A1", Role::Assistant), None).unwrap();
        conv
    }

    #[test]
    fn test_validator_error_passes_through() {
        let conv = conversation();

        let err = conv
            .serialize_validated(Selection::ToNode("A1"), &MaxTurns(1))
            .unwrap_err();
        assert!(matches!(err, ValidatedError::Validation(TooLong(2))));

        let turns = conv
            .serialize_validated(Selection::ToNode("A1"), &MaxTurns(2))
            .unwrap();
        assert_eq!(turns.len(), 2);
    }

    #[test]
    fn test_tree_error_wins_before_validation() {
        let conv = conversation();
        let err = conv
            .serialize_validated(Selection::ToNode("ghost"), &MaxTurns(10))
            .unwrap_err();
        assert!(matches!(err, ValidatedError::Tree(_)));
    }

    #[test]
    fn test_require_content() {
        let conv = conversation();

        assert!(conv
            .serialize_validated(Selection::ToNode("U1"), &RequireContent)
            .is_ok());

        let err = conv
            .serialize_validated(Selection::ToNode("A1"), &RequireContent)
            .unwrap_err();
        match err {
            ValidatedError::Validation(EmptyTurnContent(id)) => assert_eq!(id, "A1"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
