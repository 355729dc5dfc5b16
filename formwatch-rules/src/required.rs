// Required validator

use crate::message::resolve_message;
use formwatch_core::{Outcome, ValidationOptions, Validator, is_truthy, is_zero};
use serde::{Deserialize, Serialize};

/// Message recorded when nothing more specific is configured
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Configuration for [`required_with`].
///
/// A bare message converts into a rule, so `required_with("Title plz")`
/// works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredRule {
    /// Message recorded on failure
    pub msg: Option<String>,

    /// When `false` the validator accepts every value
    pub required: bool,
}

impl RequiredRule {
    /// Create a rule that is enforced and has no message
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure message
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    /// Turn enforcement on or off
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Default for RequiredRule {
    fn default() -> Self {
        Self {
            msg: None,
            required: true,
        }
    }
}

impl From<&str> for RequiredRule {
    fn from(msg: &str) -> Self {
        Self::new().msg(msg)
    }
}

impl From<String> for RequiredRule {
    fn from(msg: String) -> Self {
        Self::new().msg(msg)
    }
}

/// Validator that rejects missing and empty values.
///
/// Fails on `null`, `false`, `""` and missing fields. Numeric zero counts as
/// present, as do empty arrays and objects.
#[derive(Debug, Clone, Default)]
pub struct Required {
    rule: RequiredRule,
    message: Option<String>,
}

impl Required {
    /// Override the failure message
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// The rule this validator was built from
    pub fn rule(&self) -> &RequiredRule {
        &self.rule
    }
}

impl<T: ?Sized> Validator<T> for Required {
    fn validate(&self, opts: &ValidationOptions<'_, T>) -> Outcome {
        if !self.rule.required || is_truthy(opts.value) || is_zero(opts.value) {
            return Outcome::Valid;
        }
        Outcome::Message(resolve_message(
            [self.message.as_deref(), self.rule.msg.as_deref()],
            REQUIRED_MESSAGE,
        ))
    }
}

/// Require a value, failing with the default message
pub fn required() -> Required {
    Required::default()
}

/// Require a value as configured by `rule`.
///
/// ```
/// use formwatch_rules::{RequiredRule, required_with};
///
/// let title = required_with("Title plz");
/// let optional = required_with(RequiredRule::new().msg("yo").required(false));
/// assert_eq!(title.rule().msg.as_deref(), Some("Title plz"));
/// assert!(!optional.rule().required);
/// ```
pub fn required_with(rule: impl Into<RequiredRule>) -> Required {
    Required {
        rule: rule.into(),
        message: None,
    }
}
