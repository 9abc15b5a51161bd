//! Binding parse errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty reference after `$`")]
    EmptyReference,

    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("unclosed call in `{0}`")]
    UnclosedCall(String),

    #[error("nested call in `{0}`")]
    NestedCall(String),
}
