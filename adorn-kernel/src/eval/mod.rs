//! Evaluator - resolves binding expressions against a record.
//!
//! Evaluation for display is read-only; only [`invoke`] may mutate the record.

use adorn_api::{Record, ResolveError, Value};

use crate::parser::{Expression, FieldPath};

/// Resolve an expression to a value without side effects.
pub fn evaluate(expr: &Expression, record: &dyn Record) -> Result<Value, ResolveError> {
    match expr {
        Expression::Literal(text) => Ok(Value::String(text.clone())),
        Expression::FieldReference(path) => read_path(path, record),
        Expression::MethodInvocation { name, arg: None } => record
            .query(name)
            .ok_or_else(|| ResolveError::MissingMethod(name.clone())),
        Expression::MethodInvocation { name, arg: Some(_) } => Err(ResolveError::Arity {
            method: name.clone(),
            expected: 0,
            got: 1,
        }),
    }
}

impl Expression {
    /// Resolve against `record` without side effects. See [`evaluate`].
    pub fn evaluate(&self, record: &dyn Record) -> Result<Value, ResolveError> {
        evaluate(self, record)
    }
}

/// Call a method expression for its effect on the record.
pub fn invoke(expr: &Expression, record: &mut dyn Record) -> Result<Value, ResolveError> {
    match expr {
        Expression::MethodInvocation { name, arg } => {
            let args = match arg {
                Some(arg) => vec![evaluate(arg, &*record)?],
                None => Vec::new(),
            };
            record.invoke(name, &args)
        }
        other => Err(ResolveError::NotCallable(other.to_string())),
    }
}

fn read_path(path: &FieldPath, record: &dyn Record) -> Result<Value, ResolveError> {
    let mut value = record
        .field(path.root())
        .ok_or_else(|| ResolveError::MissingField(path.root().to_owned()))?;
    for segment in path.rest() {
        value = match value.get(segment) {
            Some(inner) => inner.clone(),
            None => return Err(ResolveError::MissingField(path.to_string())),
        };
    }
    Ok(value)
}
