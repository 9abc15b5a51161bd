//! The record capability consumed by decorations.
//!
//! Hosts implement [`Record`] for whatever object is being edited. Decorations
//! only ever address members by name, so a host can back this with reflection,
//! a serialized property tree, or a plain map ([`MapRecord`]).

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

use crate::Value;

/// Failure to resolve a named binding against a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("no field named `{0}`")]
    MissingField(String),

    #[error("no method named `{0}`")]
    MissingMethod(String),

    #[error("`{method}` takes {expected} argument(s), got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },

    #[error("expected {expected}, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{0}` cannot be invoked")]
    NotCallable(String),

    #[error("{0}")]
    Host(String),
}

/// A data record being edited, addressed by member name.
pub trait Record {
    /// Read a named member.
    fn field(&self, name: &str) -> Option<Value>;

    /// Call a side-effect-free, zero-argument accessor.
    fn query(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// Call a method that may mutate the record.
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, ResolveError> {
        let _ = args;
        Err(ResolveError::MissingMethod(name.to_owned()))
    }
}

/// A nested `Value::Record` is a read-only record.
impl Record for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

type Query = Box<dyn Fn(&IndexMap<String, Value>) -> Value>;
type Action = Box<dyn FnMut(&mut IndexMap<String, Value>, &[Value]) -> Result<Value, ResolveError>>;

/// A map-backed record with registered queries and actions.
///
/// Field order is preserved, which keeps debug output stable.
#[derive(Default)]
pub struct MapRecord {
    fields: IndexMap<String, Value>,
    queries: IndexMap<String, Query>,
    actions: IndexMap<String, Action>,
}

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder form).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Register a zero-argument accessor computed from the fields.
    pub fn with_query(
        mut self,
        name: impl Into<String>,
        query: impl Fn(&IndexMap<String, Value>) -> Value + 'static,
    ) -> Self {
        self.queries.insert(name.into(), Box::new(query));
        self
    }

    /// Register a mutating method.
    pub fn with_action(
        mut self,
        name: impl Into<String>,
        action: impl FnMut(&mut IndexMap<String, Value>, &[Value]) -> Result<Value, ResolveError>
            + 'static,
    ) -> Self {
        self.actions.insert(name.into(), Box::new(action));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl Record for MapRecord {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn query(&self, name: &str) -> Option<Value> {
        self.queries.get(name).map(|query| query(&self.fields))
    }

    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, ResolveError> {
        match self.actions.get_mut(name) {
            Some(action) => action(&mut self.fields, args),
            None => Err(ResolveError::MissingMethod(name.to_owned())),
        }
    }
}

impl fmt::Debug for MapRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRecord")
            .field("fields", &self.fields)
            .field("queries", &self.queries.keys().collect::<Vec<_>>())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> MapRecord {
        MapRecord::new()
            .with_field("count", 1)
            .with_query("label", |fields| {
                Value::String(format!("Count: {}", fields["count"]))
            })
            .with_action("Increment", |fields, _args| {
                if let Some(Value::Int(n)) = fields.get_mut("count") {
                    *n += 1;
                }
                Ok(Value::Unit)
            })
    }

    #[test]
    fn query_sees_current_fields() {
        let mut record = counter();
        assert_eq!(record.query("label"), Some(Value::from("Count: 1")));
        record.invoke("Increment", &[]).unwrap();
        assert_eq!(record.query("label"), Some(Value::from("Count: 2")));
    }

    #[test]
    fn missing_members_report_their_name() {
        let mut record = counter();
        assert_eq!(record.field("nope"), None);
        assert_eq!(record.query("nope"), None);
        assert_eq!(
            record.invoke("Nope", &[]),
            Err(ResolveError::MissingMethod("Nope".into()))
        );
    }

    #[test]
    fn value_records_are_read_only() {
        let mut value = Value::Record(vec![("hp".into(), Value::Int(10))]);
        assert_eq!(value.field("hp"), Some(Value::Int(10)));
        assert!(value.invoke("Heal", &[]).is_err());
    }
}
