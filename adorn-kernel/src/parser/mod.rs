//! Parser - the `$member` binding grammar.
//!
//! ```text
//! ""              -> Literal("")
//! "Save"          -> Literal("Save")          (no sentinel: verbatim text)
//! "$title"        -> FieldReference(title)
//! "$stats.level"  -> FieldReference(stats.level)
//! "$Label()"      -> MethodInvocation(Label)
//! "$Give($item)"  -> MethodInvocation(Give, FieldReference(item))
//! "$Give(sword)"  -> MethodInvocation(Give, Literal("sword"))
//! ```
//!
//! Action bindings (see [`parse_action`]) name a method directly; the
//! sentinel is optional there.

mod ast;

pub use ast::*;

use crate::ParseError;

/// Leading character that marks a member reference.
pub const SENTINEL: char = '$';

/// Parse a value binding.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    match source.strip_prefix(SENTINEL) {
        Some(body) => parse_reference(body, source),
        None => Ok(Expression::Literal(source.to_owned())),
    }
}

impl Expression {
    /// Parse a value binding. See [`parse`].
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse(source)
    }
}

/// Parse a value binding, degrading malformed input to the empty literal.
pub fn parse_lossy(source: &str) -> Expression {
    parse(source).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed binding {:?}: {}", source, e);
        Expression::empty()
    })
}

/// Parse an action binding. An empty binding yields `None` (an inert action).
///
/// Surrounding whitespace is ignored, so `"Save, Load"` style lists work.
pub fn parse_action(source: &str) -> Result<Option<Expression>, ParseError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let body = trimmed.strip_prefix(SENTINEL).unwrap_or(trimmed);
    if body.contains('(') {
        return parse_call(body, source).map(Some);
    }
    validate_ident(body)?;
    Ok(Some(Expression::MethodInvocation {
        name: body.to_owned(),
        arg: None,
    }))
}

fn parse_reference(body: &str, source: &str) -> Result<Expression, ParseError> {
    if body.is_empty() {
        return Err(ParseError::EmptyReference);
    }
    if body.contains('(') || body.contains(')') {
        return parse_call(body, source);
    }
    parse_path(body).map(Expression::FieldReference)
}

fn parse_call(body: &str, source: &str) -> Result<Expression, ParseError> {
    let open = body
        .find('(')
        .ok_or_else(|| ParseError::UnclosedCall(source.to_owned()))?;
    let name = &body[..open];
    validate_ident(name)?;

    let inner = body[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| ParseError::UnclosedCall(source.to_owned()))?;
    if inner.contains('(') || inner.contains(')') {
        return Err(ParseError::NestedCall(source.to_owned()));
    }

    let inner = inner.trim();
    let arg = if inner.is_empty() {
        None
    } else if let Some(reference) = inner.strip_prefix(SENTINEL) {
        if reference.is_empty() {
            return Err(ParseError::EmptyReference);
        }
        Some(Box::new(Expression::FieldReference(parse_path(reference)?)))
    } else {
        Some(Box::new(Expression::Literal(inner.to_owned())))
    };

    Ok(Expression::MethodInvocation {
        name: name.to_owned(),
        arg,
    })
}

fn parse_path(body: &str) -> Result<FieldPath, ParseError> {
    let segments = body
        .split('.')
        .map(|segment| validate_ident(segment).map(|_| segment.to_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldPath(segments))
}

fn validate_ident(name: &str) -> Result<(), ParseError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidIdentifier(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(path: &[&str]) -> Expression {
        Expression::FieldReference(FieldPath(path.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn text_without_sentinel_is_verbatim() {
        assert_eq!(parse(""), Ok(Expression::empty()));
        assert_eq!(parse("Save all"), Ok(Expression::Literal("Save all".into())));
        // Only a leading sentinel counts.
        assert_eq!(parse(" $x"), Ok(Expression::Literal(" $x".into())));
        assert_eq!(parse("cost: 5$"), Ok(Expression::Literal("cost: 5$".into())));
    }

    #[test]
    fn field_references() {
        assert_eq!(parse("$title"), Ok(field(&["title"])));
        assert_eq!(parse("$stats.level"), Ok(field(&["stats", "level"])));
        assert_eq!(parse("$_private1"), Ok(field(&["_private1"])));
    }

    #[test]
    fn method_invocations() {
        assert_eq!(
            parse("$Label()"),
            Ok(Expression::MethodInvocation {
                name: "Label".into(),
                arg: None
            })
        );
        assert_eq!(
            parse("$Give( $item )"),
            Ok(Expression::MethodInvocation {
                name: "Give".into(),
                arg: Some(Box::new(field(&["item"])))
            })
        );
        assert_eq!(
            parse("$Give(sword)"),
            Ok(Expression::MethodInvocation {
                name: "Give".into(),
                arg: Some(Box::new(Expression::Literal("sword".into())))
            })
        );
    }

    #[test]
    fn malformed_references() {
        assert_eq!(parse("$"), Err(ParseError::EmptyReference));
        assert_eq!(parse("$1st"), Err(ParseError::InvalidIdentifier("1st".into())));
        assert_eq!(parse("$a..b"), Err(ParseError::InvalidIdentifier("".into())));
        assert_eq!(parse("$has space"), Err(ParseError::InvalidIdentifier("has space".into())));
        assert_eq!(parse("$Open("), Err(ParseError::UnclosedCall("$Open(".into())));
        assert_eq!(parse("$Open)"), Err(ParseError::UnclosedCall("$Open)".into())));
        assert_eq!(parse("$A($B())"), Err(ParseError::NestedCall("$A($B())".into())));
        assert_eq!(parse("$A()x"), Err(ParseError::UnclosedCall("$A()x".into())));
    }

    #[test]
    fn lossy_parse_degrades_to_empty_literal() {
        assert_eq!(parse_lossy("$"), Expression::empty());
        assert_eq!(parse_lossy("$ok"), field(&["ok"]));
    }

    #[test]
    fn action_bindings() {
        let call = |name: &str| {
            Some(Expression::MethodInvocation {
                name: name.into(),
                arg: None,
            })
        };
        assert_eq!(parse_action(""), Ok(None));
        assert_eq!(parse_action("   "), Ok(None));
        assert_eq!(parse_action("DoA"), Ok(call("DoA")));
        assert_eq!(parse_action(" $DoA "), Ok(call("DoA")));
        assert_eq!(parse_action("DoA()"), Ok(call("DoA")));
        assert_eq!(
            parse_action("Give($item)"),
            Ok(Some(Expression::MethodInvocation {
                name: "Give".into(),
                arg: Some(Box::new(field(&["item"])))
            }))
        );
        assert!(parse_action("Do.A").is_err());
    }

    #[test]
    fn display_round_trips_references() {
        for source in ["$title", "$a.b", "$Label()", "$Give($item)", "plain"] {
            assert_eq!(parse(source).unwrap().to_string(), source);
        }
    }
}
