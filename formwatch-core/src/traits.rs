// Validator protocol

use serde_json::Value;

/// Options handed to a validator for one field check.
///
/// Built fresh for every validator call and never retained.
pub struct ValidationOptions<'a, T: ?Sized> {
    /// Name of the field being validated
    pub field: &'a str,

    /// Current value of the field (`Value::Null` when the field is missing)
    pub value: &'a Value,

    /// The whole object, for validators that look at sibling fields
    pub obj: &'a T,
}

impl<T: ?Sized> Clone for ValidationOptions<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ValidationOptions<'_, T> {}

impl<T: ?Sized> std::fmt::Debug for ValidationOptions<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("field", &self.field)
            .field("value", self.value)
            .finish_non_exhaustive()
    }
}

/// Result of a single validator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value passed; nothing is recorded
    Valid,

    /// The value failed; the context's default message is recorded
    Invalid,

    /// The value failed with this message
    Message(String),
}

impl Outcome {
    /// Check whether the outcome is a pass
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    /// Resolve the message to record, if any.
    ///
    /// An empty `Message` counts as `Invalid`.
    pub fn into_message(self, default_message: &str) -> Option<String> {
        match self {
            Outcome::Valid => None,
            Outcome::Message(msg) if !msg.is_empty() => Some(msg),
            Outcome::Invalid | Outcome::Message(_) => Some(default_message.to_string()),
        }
    }
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        if valid { Outcome::Valid } else { Outcome::Invalid }
    }
}

impl From<&str> for Outcome {
    fn from(msg: &str) -> Self {
        Outcome::Message(msg.to_string())
    }
}

impl From<String> for Outcome {
    fn from(msg: String) -> Self {
        Outcome::Message(msg)
    }
}

impl From<Option<String>> for Outcome {
    fn from(msg: Option<String>) -> Self {
        match msg {
            Some(msg) => Outcome::Message(msg),
            None => Outcome::Valid,
        }
    }
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Outcome::Valid,
            Err(msg) => Outcome::Message(msg),
        }
    }
}

/// Trait for field validators.
///
/// A validator is stateless: it maps `(field, value, obj)` to an [`Outcome`]
/// and must be safe to call any number of times. Plain closures taking
/// `&ValidationOptions<T>` and returning anything convertible into an
/// `Outcome` (`bool`, `&str`, `String`, ...) are validators.
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Validate one field of `opts.obj`
    fn validate(&self, opts: &ValidationOptions<'_, T>) -> Outcome;
}

impl<T, F, R> Validator<T> for F
where
    T: ?Sized,
    F: Fn(&ValidationOptions<'_, T>) -> R + Send + Sync,
    R: Into<Outcome>,
{
    fn validate(&self, opts: &ValidationOptions<'_, T>) -> Outcome {
        self(opts).into()
    }
}
