//! Adorn Kernel - Binding expressions for decorations.
//!
//! This crate contains:
//! - Parser (the `$member` binding grammar)
//! - Evaluator (resolves an expression against a [`Record`])
//! - Dynamic values and actions (parse once, refresh once per frame)
//!
//! [`Record`]: adorn_api::Record

pub mod dynamic;
pub mod eval;
pub mod parser;

mod error;

pub use dynamic::{DynamicAction, DynamicValue, FromValue};
pub use error::ParseError;
pub use parser::{Expression, FieldPath, SENTINEL};
