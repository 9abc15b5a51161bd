//! Dynamic values and actions.
//!
//! A binding is parsed once and resolved on every explicit `update`. Reads
//! go through the cached result, so a frame can read the same value many
//! times without re-resolving it. Literal bindings never re-resolve.
//!
//! Resolution failures never escape: a value falls back to its default and an
//! action becomes a no-op. Each binding logs its failure once until it
//! resolves again, so a typo does not flood the log every frame.

use adorn_api::{Record, ResolveError, Value};

use crate::eval;
use crate::parser::{self, Expression};

/// Conversion from a resolved [`Value`] into a typed binding result.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ResolveError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        Ok(match value {
            Value::String(s) => s,
            other => other.to_text(),
        })
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(n) => Ok(n != 0),
            Value::String(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(type_error("bool", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        match value {
            Value::Int(n) => Ok(n),
            Value::Float(f) if f.fract() == 0.0 => Ok(f as i64),
            Value::String(ref s) => s.trim().parse().map_err(|_| type_error("int", &value)),
            other => Err(type_error("int", &other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        let found = value.type_name();
        let n = i64::from_value(value)?;
        i32::try_from(n).map_err(|_| ResolveError::Type {
            expected: "i32",
            found,
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(n) => Ok(n as f64),
            Value::String(ref s) => s.trim().parse().map_err(|_| type_error("float", &value)),
            other => Err(type_error("float", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ResolveError> {
        f64::from_value(value).map(|f| f as f32)
    }
}

fn type_error(expected: &'static str, found: &Value) -> ResolveError {
    ResolveError::Type {
        expected,
        found: found.type_name(),
    }
}

/// A typed binding whose value is refreshed once per `update`.
#[derive(Debug, Clone)]
pub struct DynamicValue<T> {
    expr: Expression,
    default: T,
    value: T,
    resolved: bool,
    reported: bool,
}

impl<T: FromValue + Clone + Default> DynamicValue<T> {
    /// Parse a binding whose fallback is `T::default()`.
    pub fn new(source: &str) -> Self {
        Self::with_default(source, T::default())
    }
}

impl<T: FromValue + Clone> DynamicValue<T> {
    /// Parse a binding with an explicit fallback value.
    pub fn with_default(source: &str, default: T) -> Self {
        Self::from_expression(parser::parse_lossy(source), default)
    }

    /// Wrap an already-parsed expression.
    ///
    /// Literal text is converted here, once; a literal that does not convert
    /// (e.g. `"yes"` for a `bool`) pins the default.
    pub fn from_expression(expr: Expression, default: T) -> Self {
        let (value, resolved) = match &expr {
            Expression::Literal(text) => match T::from_value(Value::String(text.clone())) {
                Ok(value) => (value, true),
                Err(_) => (default.clone(), false),
            },
            _ => (default.clone(), false),
        };
        Self {
            expr,
            default,
            value,
            resolved,
            reported: false,
        }
    }

    /// Re-resolve against the record. No-op for literals.
    pub fn update(&mut self, record: &dyn Record) {
        if self.expr.is_literal() {
            return;
        }
        match eval::evaluate(&self.expr, record).and_then(T::from_value) {
            Ok(value) => {
                self.value = value;
                self.resolved = true;
                self.reported = false;
            }
            Err(e) => {
                if !self.reported {
                    tracing::warn!("Binding {} did not resolve: {}", self.expr, e);
                    self.reported = true;
                }
                self.value = self.default.clone();
                self.resolved = false;
            }
        }
    }

    /// The value cached by the last `update`.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether the cached value came from the binding rather than the default.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_dynamic(&self) -> bool {
        !self.expr.is_literal()
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }
}

/// A method binding invoked for its effect on the record.
#[derive(Debug, Clone, Default)]
pub struct DynamicAction {
    method: Option<String>,
    arg: Option<DynamicValue<Value>>,
    reported: bool,
}

impl DynamicAction {
    /// Parse an action binding. Empty or malformed bindings are inert.
    pub fn new(source: &str) -> Self {
        match parser::parse_action(source) {
            Ok(Some(Expression::MethodInvocation { name, arg })) => Self {
                method: Some(name),
                arg: arg.map(|arg| DynamicValue::from_expression(*arg, Value::Unit)),
                reported: false,
            },
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring malformed action {:?}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Method name, if this action does anything.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn is_inert(&self) -> bool {
        self.method.is_none()
    }

    /// Refresh the argument binding, if any.
    pub fn update(&mut self, record: &dyn Record) {
        if let Some(arg) = &mut self.arg {
            arg.update(record);
        }
    }

    /// Call the method, ignoring its return value. Returns `true` if the
    /// method ran.
    pub fn invoke(&mut self, record: &mut dyn Record) -> bool {
        let Some(method) = &self.method else {
            return false;
        };
        let args = match &self.arg {
            Some(arg) if !arg.is_resolved() => {
                // Already reported by the argument binding itself.
                return false;
            }
            Some(arg) => vec![arg.value().clone()],
            None => Vec::new(),
        };
        match record.invoke(method, &args) {
            Ok(_) => {
                tracing::debug!("Invoked action {}", method);
                self.reported = false;
                true
            }
            Err(e) => {
                if !self.reported {
                    tracing::warn!("Action {} failed: {}", method, e);
                    self.reported = true;
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adorn_api::MapRecord;

    #[test]
    fn literal_is_fixed_forever() {
        let mut title = DynamicValue::<String>::new("Save");
        let record = MapRecord::new().with_field("Save", "not me");
        for _ in 0..3 {
            title.update(&record);
            assert_eq!(title.value(), "Save");
        }
        assert!(!title.is_dynamic());
    }

    #[test]
    fn field_value_tracks_record() {
        let mut title = DynamicValue::<String>::new("$label");
        let mut record = MapRecord::new().with_field("label", "One");
        title.update(&record);
        assert_eq!(title.value(), "One");

        record.set("label", "Two");
        // Reads are cached until the next update.
        assert_eq!(title.value(), "One");
        title.update(&record);
        assert_eq!(title.value(), "Two");
    }

    #[test]
    fn missing_field_degrades_to_default() {
        let mut title = DynamicValue::<String>::new("$missing");
        title.update(&MapRecord::new());
        assert_eq!(title.value(), "");
        assert!(!title.is_resolved());

        let mut shown = DynamicValue::with_default("$flag", true);
        shown.update(&MapRecord::new());
        assert!(*shown.value());
    }

    #[test]
    fn typed_conversions() {
        let record = MapRecord::new()
            .with_field("on", true)
            .with_field("count", 3)
            .with_field("text", "2.5")
            .with_field("name", "x");

        let mut on = DynamicValue::<bool>::new("$on");
        let mut count = DynamicValue::<i32>::new("$count");
        let mut ratio = DynamicValue::<f32>::new("$text");
        let mut bad = DynamicValue::<i64>::with_default("$name", -1);
        on.update(&record);
        count.update(&record);
        ratio.update(&record);
        bad.update(&record);

        assert!(*on.value());
        assert_eq!(*count.value(), 3);
        assert_eq!(*ratio.value(), 2.5);
        assert_eq!(*bad.value(), -1);
    }

    #[test]
    fn literal_conversion_happens_once() {
        assert!(*DynamicValue::<bool>::new("TRUE").value());
        assert_eq!(*DynamicValue::<i32>::with_default("12", 0).value(), 12);
        // Empty and unparsable literals keep the default.
        assert!(*DynamicValue::with_default("", true).value());
        assert!(!DynamicValue::<bool>::new("yes").is_resolved());
    }

    #[test]
    fn inert_actions() {
        let mut record = MapRecord::new();
        assert!(DynamicAction::new("").is_inert());
        assert!(DynamicAction::new("$").is_inert());
        assert!(!DynamicAction::new("").invoke(&mut record));
        // Missing method is a no-op, not an error.
        assert!(!DynamicAction::new("Missing").invoke(&mut record));
    }

    #[test]
    fn action_with_argument() {
        let mut record = MapRecord::new()
            .with_field("gold", 10)
            .with_field("price", 4)
            .with_action("Spend", |fields, args| {
                let price = match args.first() {
                    Some(Value::Int(n)) => *n,
                    _ => return Err(ResolveError::Host("bad price".into())),
                };
                if let Some(Value::Int(gold)) = fields.get_mut("gold") {
                    *gold -= price;
                }
                Ok(Value::Unit)
            });

        let mut spend = DynamicAction::new("Spend($price)");
        assert_eq!(spend.method(), Some("Spend"));
        spend.update(&record);
        assert!(spend.invoke(&mut record));
        assert_eq!(record.get("gold"), Some(&Value::Int(6)));

        // An unresolved argument blocks the call.
        record.remove("price");
        spend.update(&record);
        assert!(!spend.invoke(&mut record));
        assert_eq!(record.get("gold"), Some(&Value::Int(6)));
    }
}
