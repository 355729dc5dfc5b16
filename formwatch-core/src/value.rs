// Field access and value semantics

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

/// Record-like values a schema can be run against.
///
/// `field_value` returns the current value of `field`, or `Value::Null` when
/// the field does not exist.
///
/// # Examples
///
/// ```
/// use formwatch_core::Validatable;
/// use serde_json::{json, Value};
///
/// struct Signup {
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl Validatable for Signup {
///     fn field_value(&self, field: &str) -> Value {
///         match field {
///             "name" => json!(self.name),
///             "age" => json!(self.age),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let signup = Signup { name: "Jeff".into(), age: None };
/// assert_eq!(signup.field_value("name"), json!("Jeff"));
/// assert_eq!(signup.field_value("age"), Value::Null);
/// ```
pub trait Validatable {
    /// Read the current value of a field
    fn field_value(&self, field: &str) -> Value;
}

impl Validatable for Value {
    fn field_value(&self, field: &str) -> Value {
        match self {
            Value::Object(map) => map.field_value(field),
            _ => Value::Null,
        }
    }
}

impl Validatable for Map<String, Value> {
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or(Value::Null)
    }
}

impl<V, S> Validatable for HashMap<String, V, S>
where
    V: Clone + Into<Value>,
    S: BuildHasher,
{
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().map(Into::into).unwrap_or(Value::Null)
    }
}

impl<V> Validatable for BTreeMap<String, V>
where
    V: Clone + Into<Value>,
{
    fn field_value(&self, field: &str) -> Value {
        self.get(field).cloned().map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Validatable + ?Sized> Validatable for &T {
    fn field_value(&self, field: &str) -> Value {
        (**self).field_value(field)
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn field_value(&self, field: &str) -> Value {
        (**self).field_value(field)
    }
}

impl<T: Validatable + ?Sized> Validatable for Arc<T> {
    fn field_value(&self, field: &str) -> Value {
        (**self).field_value(field)
    }
}

/// Truthiness of a field value.
///
/// `null`, `false`, numeric zero and the empty string are falsy; arrays and
/// objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => !is_zero(value),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Check whether a value is the number zero
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// String form of a value, as tested by pattern validators.
///
/// Strings are returned as-is and `null` becomes the empty string; every
/// other value is rendered as compact JSON. This is not plain string
/// coercion: `null` does not become `"null"`, and a float keeps its JSON form
/// (`1.0` stays `"1.0"`, not `"1"`).
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
