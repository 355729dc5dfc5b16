// Validation context

use crate::observer::Observers;
use crate::{
    BoundContext, ContextConfig, ErrorStore, Errors, Schema, SchemaBoundContext, Shared,
    SubscriptionId, Validatable, ValidationContextBuilder, ValidationOptions, ValidationState,
};
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace};

/// Messages produced by one validation pass, not yet committed
pub(crate) struct Staged {
    fields: Vec<(String, Vec<String>)>,
}

struct Inner {
    store: Mutex<ErrorStore>,
    /// Serializes mutate-then-notify sequences; re-entrant so observers may
    /// call back into the context on the same thread.
    gate: ReentrantMutex<()>,
    observers: Observers,
    config: ContextConfig,
}

/// Validation context.
///
/// Owns one error store and notifies subscribers once per mutating call.
/// Cloning the context clones the handle: clones, and bound views created
/// with [`bind`](Self::bind), share the same errors.
///
/// # Examples
///
/// ```
/// use formwatch_core::{FieldRules, Schema, ValidationContext};
/// use serde_json::{json, Value};
///
/// let schema: Schema<Value> = Schema::new().field(
///     "name",
///     FieldRules::new().check(|opts| opts.value.as_str().is_some_and(|s| !s.is_empty())),
/// );
///
/// let ctx = ValidationContext::new();
/// ctx.validate(&json!({ "name": "" }), &schema);
/// assert!(!ctx.is_valid());
/// assert_eq!(ctx.get_error("name").as_deref(), Some("This field is invalid."));
///
/// ctx.reset().validate(&json!({ "name": "Jeff" }), &schema);
/// assert!(ctx.is_valid());
/// ```
#[derive(Clone)]
pub struct ValidationContext {
    inner: Arc<Inner>,
}

impl ValidationContext {
    /// Create an empty, valid context
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context with custom config
    pub fn with_config(config: ContextConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(ErrorStore::new()),
                gate: ReentrantMutex::new(()),
                observers: Observers::new(),
                config,
            }),
        }
    }

    /// Start building a context
    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder::new()
    }

    /// Get the context configuration
    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    /// Validate `obj` against `schema`.
    ///
    /// Every field declared in the schema is read from `obj` and passed through
    /// each of its validators in order; all of them run, and each failure
    /// appends one message to the field. Messages add to what the field
    /// already holds until [`reset`](Self::reset). Afterwards every field left
    /// without messages is pruned. Subscribers are notified once.
    ///
    /// The pass is transactional: validators run before anything is written,
    /// so a panicking validator unwinds to the caller with the errors left
    /// untouched and no notification sent.
    pub fn validate<T>(&self, obj: &T, schema: &Schema<T>) -> &Self
    where
        T: Validatable + ?Sized,
    {
        let staged = self.stage(obj, schema);
        self.commit_staged(staged);
        self
    }

    /// Run `schema` against `obj` without touching the store
    pub(crate) fn stage<T>(&self, obj: &T, schema: &Schema<T>) -> Staged
    where
        T: Validatable + ?Sized,
    {
        let default_message = self.inner.config.default_message.as_str();
        let fields = schema
            .iter()
            .map(|(field, rules)| {
                let value = obj.field_value(field);
                let opts = ValidationOptions {
                    field,
                    value: &value,
                    obj,
                };
                let messages: Vec<String> = rules
                    .active()
                    .filter_map(|validator| {
                        validator.validate(&opts).into_message(default_message)
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Staged { fields }
    }

    pub(crate) fn commit_staged(&self, staged: Staged) {
        let fields = staged.fields.len();
        let pruned = self.commit(|store| {
            for (field, messages) in staged.fields {
                if self.inner.config.enable_logging {
                    for message in &messages {
                        trace!(
                            context = self.name(),
                            field = %field,
                            message = %message,
                            "recorded validation error"
                        );
                    }
                }
                store.append(&field, messages);
            }
            store.prune()
        });

        if self.inner.config.enable_logging {
            debug!(
                context = self.name(),
                fields,
                pruned,
                errors = self.error_count(),
                "validation pass committed"
            );
        }
    }

    /// Remove every recorded error
    pub fn reset(&self) -> &Self {
        let cleared = self.commit(|store| {
            let count = store.len();
            store.clear();
            count
        });
        if self.inner.config.enable_logging {
            debug!(context = self.name(), cleared, "validation context reset");
        }
        self
    }

    /// Append externally produced errors, e.g. from a server response.
    ///
    /// Messages are added after whatever the fields already hold. No pruning
    /// happens here.
    ///
    /// ```
    /// use formwatch_core::ValidationContext;
    ///
    /// let ctx = ValidationContext::new();
    /// ctx.add_errors([("email", ["Already taken"])]);
    /// assert_eq!(ctx.get_errors("email"), vec!["Already taken"]);
    /// assert!(!ctx.is_valid());
    /// ```
    pub fn add_errors<I, K, M>(&self, errors: I) -> &Self
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let added = self.commit(|store| {
            let before = store.error_count();
            for (field, messages) in errors {
                let field: String = field.into();
                store.append(&field, messages);
            }
            store.error_count() - before
        });
        if self.inner.config.enable_logging {
            debug!(context = self.name(), added, "external errors added");
        }
        self
    }

    /// Set a field's errors to the empty list.
    ///
    /// The field disappears from [`errors`](Self::errors) right away; the next
    /// validation pass removes the entry itself.
    pub fn clear_errors(&self, field: &str) -> &Self {
        self.commit(|store| store.clear_field(field));
        if self.inner.config.enable_logging {
            debug!(context = self.name(), field, "field errors cleared");
        }
        self
    }

    /// Copy of the errors for a field; empty when there are none
    pub fn get_errors(&self, field: &str) -> Vec<String> {
        self.inner.store.lock().get(field).to_vec()
    }

    /// First error for a field
    pub fn get_error(&self, field: &str) -> Option<String> {
        self.inner.store.lock().get(field).first().cloned()
    }

    /// Check whether a field has errors
    pub fn has_errors(&self, field: &str) -> bool {
        !self.inner.store.lock().get(field).is_empty()
    }

    /// Snapshot of all errors
    pub fn errors(&self) -> Errors {
        self.inner.store.lock().snapshot()
    }

    /// Check whether no errors are recorded
    pub fn is_valid(&self) -> bool {
        self.inner.store.lock().is_valid()
    }

    /// Total number of recorded messages
    pub fn error_count(&self) -> usize {
        self.inner.store.lock().error_count()
    }

    /// Current errors and validity
    pub fn state(&self) -> ValidationState {
        ValidationState::new(self.errors())
    }

    /// Call `callback` after every mutating call.
    ///
    /// Callbacks run synchronously on the mutating thread, after the change is
    /// committed, and may read or mutate the context. A mutation made from
    /// inside a callback is announced after the current round of callbacks,
    /// so every subscriber sees states in the order they were committed.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValidationState) + Send + Sync + 'static,
    {
        self.inner.observers.on_mutation(callback)
    }

    /// Call `callback` whenever [`is_valid`](Self::is_valid) flips
    pub fn on_validity_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValidationState) + Send + Sync + 'static,
    {
        self.inner.observers.on_validity_change(callback)
    }

    /// Remove a subscription; returns `false` if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.count()
    }

    /// Channel view of the state, updated once per mutating call
    pub fn watch(&self) -> watch::Receiver<ValidationState> {
        self.inner.observers.watch()
    }

    /// Bind an object; the returned view validates it with just a schema
    pub fn bind<T>(&self, object: Shared<T>) -> BoundContext<T> {
        BoundContext::new(self.clone(), object)
    }

    /// Bind an object and a schema; the returned view validates with no arguments
    pub fn bind_with_schema<T>(
        &self,
        object: Shared<T>,
        schema: Schema<T>,
    ) -> SchemaBoundContext<T> {
        self.bind(object).with_schema(schema)
    }

    /// Apply `mutate` to the store and notify subscribers once
    fn commit<R>(&self, mutate: impl FnOnce(&mut ErrorStore) -> R) -> R {
        let _gate = self.inner.gate.lock();
        let (result, errors) = {
            let mut store = self.inner.store.lock();
            let result = mutate(&mut store);
            (result, store.snapshot())
        };
        self.inner.observers.notify(ValidationState::new(errors));
        result
    }

    fn name(&self) -> &str {
        self.inner.config.name.as_deref().unwrap_or("anonymous")
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("config", &self.inner.config)
            .field("errors", &self.errors())
            .finish()
    }
}

/// Create an unbound validation context
pub fn validation_context() -> ValidationContext {
    ValidationContext::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldRules;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn present() -> FieldRules<Value> {
        FieldRules::new().check(|opts| {
            if opts.value.as_str().is_some_and(|s| !s.is_empty()) {
                Ok(())
            } else {
                Err("This field is required".to_string())
            }
        })
    }

    fn counter(ctx: &ValidationContext) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        ctx.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    #[test]
    fn test_new_context_is_valid() {
        let ctx = ValidationContext::new();
        assert!(ctx.is_valid());
        assert!(ctx.errors().is_empty());
    }

    #[test]
    fn test_validate_records_and_prunes() {
        let schema = Schema::new()
            .field("name", present())
            .field("title", present());
        let ctx = ValidationContext::new();

        ctx.validate(&json!({ "name": "", "title": "Dr" }), &schema);
        let errors = ctx.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first("name"), Some("This field is required"));
        assert!(!errors.contains("title"));
    }

    #[test]
    fn test_bare_failure_uses_default_message() {
        let schema: Schema<Value> =
            Schema::new().field("name", FieldRules::new().check(|opts| opts.value == "Jeff"));
        let ctx = ValidationContext::new();
        ctx.validate(&json!({ "name": "Joe" }), &schema);
        assert_eq!(ctx.get_error("name").as_deref(), Some("This field is invalid."));
    }

    #[test]
    fn test_configured_default_message() {
        let schema: Schema<Value> =
            Schema::new().field("name", FieldRules::new().check(|_| false));
        let ctx = ValidationContext::builder().default_message("Nope.").build();
        ctx.validate(&json!({}), &schema);
        assert_eq!(ctx.get_errors("name"), vec!["Nope."]);
    }

    #[test]
    fn test_all_validators_run() {
        let schema: Schema<Value> = Schema::new().field(
            "name",
            FieldRules::new()
                .check(|_| "first")
                .skip()
                .check(|_| "second"),
        );
        let ctx = ValidationContext::new();
        ctx.validate(&json!({ "name": "x" }), &schema);
        assert_eq!(ctx.get_errors("name"), vec!["first", "second"]);
    }

    #[test]
    fn test_one_notification_per_mutation() {
        let schema = Schema::new()
            .field("name", present())
            .field("email", present());
        let ctx = ValidationContext::new();
        let calls = counter(&ctx);

        ctx.validate(&json!({}), &schema);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        ctx.add_errors([("name", ["taken"])]);
        ctx.clear_errors("email");
        ctx.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_clear_errors() {
        let ctx = ValidationContext::new();
        ctx.add_errors([("name", ["a", "b"])]);
        ctx.clear_errors("name");
        assert!(ctx.get_errors("name").is_empty());
        assert_eq!(ctx.get_error("name"), None);
        assert!(!ctx.errors().contains("name"));
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_errors_snapshot_is_detached() {
        let ctx = ValidationContext::new();
        ctx.add_errors([("name", ["a"])]);
        let mut copy = ctx.get_errors("name");
        copy.push("b".to_string());
        let snapshot = ctx.errors().into_inner();
        assert_eq!(snapshot["name"], vec!["a"]);
        assert_eq!(ctx.get_errors("name"), vec!["a"]);
    }

    #[test]
    fn test_subscriber_can_read_context() {
        let ctx = ValidationContext::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let (reader, s) = (ctx.clone(), seen.clone());
        ctx.subscribe(move |state| {
            assert_eq!(reader.errors(), state.errors);
            s.store(reader.error_count(), Ordering::SeqCst);
        });
        ctx.add_errors([("name", ["a", "b"])]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_validator_leaves_store_untouched() {
        let schema: Schema<Value> = Schema::new()
            .field("name", FieldRules::new().check(|_| false))
            .field(
                "email",
                FieldRules::new().check(|opts| -> bool { panic!("boom on {}", opts.field) }),
            );
        let ctx = ValidationContext::new();
        ctx.add_errors([("age", ["too young"])]);
        let calls = counter(&ctx);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ctx.validate(&json!({}), &schema);
        }));

        assert!(result.is_err());
        assert_eq!(ctx.errors().fields().collect::<Vec<_>>(), vec!["age"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
