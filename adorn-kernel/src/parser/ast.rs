//! Binding expression definitions.

use std::fmt;

/// A parsed binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Plain text, used verbatim.
    Literal(String),
    /// `$name` or `$outer.inner`
    FieldReference(FieldPath),
    /// `$name()` or `$name(arg)`
    MethodInvocation {
        name: String,
        arg: Option<Box<Expression>>,
    },
}

impl Expression {
    /// The empty literal, which every malformed binding degrades to.
    pub fn empty() -> Self {
        Expression::Literal(String::new())
    }

    /// Get the literal text if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Expression::Literal(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(text) => f.write_str(text),
            Expression::FieldReference(path) => write!(f, "${path}"),
            Expression::MethodInvocation { name, arg: None } => write!(f, "${name}()"),
            Expression::MethodInvocation { name, arg: Some(arg) } => write!(f, "${name}({arg})"),
        }
    }
}

/// A dotted member path. Always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(pub(crate) Vec<String>);

impl FieldPath {
    /// The member read directly off the record.
    pub fn root(&self) -> &str {
        &self.0[0]
    }

    /// Segments walked inside nested record values.
    pub fn rest(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}
