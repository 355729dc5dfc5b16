// Pattern validator

use crate::message::resolve_message;
use crate::{EmailOracle, PatternOracle, RuleError, UrlOracle};
use formwatch_core::{Outcome, ValidationOptions, Validator, stringify};
use regex::Regex;
use std::str::FromStr;
use std::sync::Arc;

/// Message recorded when nothing more specific applies
pub const PATTERN_MESSAGE: &str = "This field is invalid";

/// What a pattern validator tests values against
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Well-formed email address
    Email,

    /// Well-formed `http` or `https` URL
    Url,

    /// Custom regular expression; an unanchored match is enough
    Regex(Regex),
}

impl PatternKind {
    /// Canned failure message for the named kinds
    pub fn canned_message(&self) -> Option<&'static str> {
        match self {
            PatternKind::Email => Some("This is not a valid email"),
            PatternKind::Url => Some("This is not a valid url"),
            PatternKind::Regex(_) => None,
        }
    }
}

/// `"email"` and `"url"` name the built-in kinds; any other string is compiled
/// as a regular expression.
impl FromStr for PatternKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(PatternKind::Email),
            "url" => Ok(PatternKind::Url),
            _ => Ok(PatternKind::Regex(Regex::new(s)?)),
        }
    }
}

impl From<Regex> for PatternKind {
    fn from(regex: Regex) -> Self {
        PatternKind::Regex(regex)
    }
}

/// Configuration for [`pattern_with`]
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// What values are tested against
    pub pattern: PatternKind,

    /// Message recorded on failure
    pub msg: Option<String>,
}

impl PatternRule {
    /// Create a rule with no message
    pub fn new(pattern: impl Into<PatternKind>) -> Self {
        Self {
            pattern: pattern.into(),
            msg: None,
        }
    }

    /// Set the failure message
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

/// Validator that tests the stringified field value against a pattern.
///
/// Non-string values are rendered first (`null` as `""`, numbers and
/// booleans as written, arrays and objects as compact JSON).
#[derive(Clone)]
pub struct Pattern {
    rule: PatternRule,
    message: Option<String>,
    oracle: Option<Arc<dyn PatternOracle>>,
}

impl Pattern {
    /// Override the failure message
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Recognize email / URL values with `oracle` instead of the defaults.
    ///
    /// Has no effect on [`PatternKind::Regex`].
    pub fn with_oracle(mut self, oracle: impl PatternOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// The rule this validator was built from
    pub fn rule(&self) -> &PatternRule {
        &self.rule
    }

    /// Check whether `text` matches
    pub fn is_match(&self, text: &str) -> bool {
        match (&self.rule.pattern, &self.oracle) {
            (PatternKind::Regex(regex), _) => regex.is_match(text),
            (_, Some(oracle)) => oracle.matches(text),
            (PatternKind::Email, None) => EmailOracle.matches(text),
            (PatternKind::Url, None) => UrlOracle.matches(text),
        }
    }
}

impl<T: ?Sized> Validator<T> for Pattern {
    fn validate(&self, opts: &ValidationOptions<'_, T>) -> Outcome {
        if self.is_match(&stringify(opts.value)) {
            return Outcome::Valid;
        }
        Outcome::Message(resolve_message(
            [
                self.message.as_deref(),
                self.rule.msg.as_deref(),
                self.rule.pattern.canned_message(),
            ],
            PATTERN_MESSAGE,
        ))
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("rule", &self.rule)
            .field("message", &self.message)
            .field("custom_oracle", &self.oracle.is_some())
            .finish()
    }
}

/// Match values against `kind`.
///
/// ```
/// use formwatch_rules::{PatternKind, pattern};
///
/// let email = pattern(PatternKind::Email).message("yo");
/// assert!(email.is_match("test@test.com"));
///
/// let digits = pattern(regex::Regex::new(r"\d").unwrap());
/// assert!(!digits.is_match("abcd"));
/// ```
pub fn pattern(kind: impl Into<PatternKind>) -> Pattern {
    pattern_with(PatternRule::new(kind))
}

/// Match values as configured by `rule`
pub fn pattern_with(rule: PatternRule) -> Pattern {
    Pattern {
        rule,
        message: None,
        oracle: None,
    }
}
