// Predicate validator

use crate::message::resolve_message;
use crate::{Result, RuleError};
use formwatch_core::{Outcome, SharedValidator, ValidationOptions, Validator};
use std::sync::Arc;

/// Message recorded when nothing more specific is configured
pub const FUNC_MESSAGE: &str = "This field is not valid";

/// Configuration for [`func_with`].
///
/// `fn_` is optional so a rule can be assembled in steps; [`func_with`]
/// rejects a rule that never got a predicate.
pub struct FuncRule<T: ?Sized> {
    /// The predicate to run
    pub fn_: Option<SharedValidator<T>>,

    /// Message recorded when the predicate fails without one
    pub msg: Option<String>,
}

impl<T: ?Sized> FuncRule<T> {
    /// Create a rule around `predicate`
    pub fn new<F, R>(predicate: F) -> Self
    where
        F: Fn(&ValidationOptions<'_, T>) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        Self {
            fn_: Some(Arc::new(predicate)),
            msg: None,
        }
    }

    /// Create a rule with no predicate yet
    pub fn empty() -> Self {
        Self { fn_: None, msg: None }
    }

    /// Set the predicate
    pub fn fn_<F, R>(mut self, predicate: F) -> Self
    where
        F: Fn(&ValidationOptions<'_, T>) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        self.fn_ = Some(Arc::new(predicate));
        self
    }

    /// Set the failure message
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

impl<T: ?Sized> Clone for FuncRule<T> {
    fn clone(&self) -> Self {
        Self {
            fn_: self.fn_.clone(),
            msg: self.msg.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for FuncRule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuncRule")
            .field("fn_", &self.fn_.is_some())
            .field("msg", &self.msg)
            .finish()
    }
}

/// Validator that runs a predicate.
///
/// A predicate returning a non-empty message records it verbatim. A bare
/// failure (`false`, `Outcome::Invalid`, an empty message) records the rule's
/// `msg`, then the [`message`](Self::message), then [`FUNC_MESSAGE`].
pub struct Func<T: ?Sized> {
    predicate: SharedValidator<T>,
    msg: Option<String>,
    message: Option<String>,
}

impl<T: ?Sized> Func<T> {
    /// Set the failure message used when the rule does not configure one
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }
}

impl<T: ?Sized> Validator<T> for Func<T> {
    fn validate(&self, opts: &ValidationOptions<'_, T>) -> Outcome {
        match self.predicate.validate(opts) {
            Outcome::Valid => Outcome::Valid,
            Outcome::Message(msg) if !msg.is_empty() => Outcome::Message(msg),
            Outcome::Invalid | Outcome::Message(_) => Outcome::Message(resolve_message(
                [self.msg.as_deref(), self.message.as_deref()],
                FUNC_MESSAGE,
            )),
        }
    }
}

impl<T: ?Sized> Clone for Func<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            msg: self.msg.clone(),
            message: self.message.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Func<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Func")
            .field("msg", &self.msg)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Run `predicate` on every value.
///
/// ```
/// use formwatch_core::{FieldRules, Schema, ValidationContext};
/// use formwatch_rules::func;
/// use serde_json::{json, Value};
///
/// let schema: Schema<Value> = Schema::new()
///     .field("name", FieldRules::new().rule(func(|_| true).message("Haha")))
///     .field("title", FieldRules::new().rule(func(|_| false).message("Lol")));
///
/// let ctx = ValidationContext::new();
/// ctx.validate(&json!({ "name": "", "title": "" }), &schema);
/// assert!(!ctx.errors().contains("name"));
/// assert_eq!(ctx.get_error("title").as_deref(), Some("Lol"));
/// ```
pub fn func<T, F, R>(predicate: F) -> Func<T>
where
    T: ?Sized,
    F: Fn(&ValidationOptions<'_, T>) -> R + Send + Sync + 'static,
    R: Into<Outcome>,
{
    Func {
        predicate: Arc::new(predicate),
        msg: None,
        message: None,
    }
}

/// Run the predicate configured by `rule`.
///
/// Fails with [`RuleError::MissingFunction`] when the rule has no predicate.
pub fn func_with<T: ?Sized>(rule: FuncRule<T>) -> Result<Func<T>> {
    let predicate = rule.fn_.ok_or(RuleError::MissingFunction)?;
    Ok(Func {
        predicate,
        msg: rule.msg,
        message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn run(validator: &Func<Value>, value: Value) -> Outcome {
        let obj = json!({ "name": value.clone() });
        validator.validate(&ValidationOptions {
            field: "name",
            value: &value,
            obj: &obj,
        })
    }

    #[test]
    fn test_pass_and_fail() {
        assert!(run(&func(|_| true).message("Haha"), json!("")).is_valid());
        assert_eq!(
            run(&func(|_| false).message("Lol"), json!("")),
            Outcome::from("Lol")
        );
        assert_eq!(run(&func(|_| false), json!("")), Outcome::from(FUNC_MESSAGE));
    }

    #[test]
    fn test_predicate_message_passes_through() {
        let jeff = func(|opts| {
            if opts.value == "Jeff" {
                Ok(())
            } else {
                Err("jeff plz".to_string())
            }
        })
        .message("ignored");
        assert_eq!(run(&jeff, json!("Joe")), Outcome::from("jeff plz"));
        assert!(run(&jeff, json!("Jeff")).is_valid());

        let empty = func(|_| "").message("fallback");
        assert_eq!(run(&empty, json!("")), Outcome::from("fallback"));
    }

    #[test]
    fn test_rule_messages() {
        let configured = func_with(FuncRule::new(|_| false).msg("Haha")).unwrap();
        assert_eq!(run(&configured, json!("")), Outcome::from("Haha"));

        let explicit = func_with(FuncRule::new(|_| false)).unwrap().message("Lol");
        assert_eq!(run(&explicit, json!("")), Outcome::from("Lol"));

        let both = func_with(FuncRule::new(|_| false).msg("Haha"))
            .unwrap()
            .message("Lol");
        assert_eq!(run(&both, json!("")), Outcome::from("Haha"));

        let bare = func_with(FuncRule::new(|_| false)).unwrap();
        assert_eq!(run(&bare, json!("")), Outcome::from(FUNC_MESSAGE));
    }

    #[test]
    fn test_missing_function_is_rejected() {
        let result = func_with(FuncRule::<Value>::empty().msg("Haha"));
        assert!(matches!(result, Err(RuleError::MissingFunction)));

        let assembled = func_with(FuncRule::<Value>::empty().fn_(|_| true));
        assert!(assembled.is_ok());
    }
}
