// Bound validation contexts

use crate::{
    Errors, Schema, SubscriptionId, Validatable, ValidationContext, ValidationState,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to an object a bound context validates.
///
/// The context keeps the handle, not a copy: writes made through any clone of
/// the handle are seen by the next `validate`.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value so it can be bound to a context
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Operations every bound view forwards to its underlying context
macro_rules! forward_context_ops {
    ($ty:ident) => {
        impl<T> $ty<T> {
            /// The unbound context this view shares its errors with
            pub fn context(&self) -> &ValidationContext {
                &self.context
            }

            /// The bound object
            pub fn object(&self) -> &Shared<T> {
                &self.object
            }

            /// Remove every recorded error
            pub fn reset(&self) -> &Self {
                self.context.reset();
                self
            }

            /// Append externally produced errors
            pub fn add_errors<I, K, M>(&self, errors: I) -> &Self
            where
                I: IntoIterator<Item = (K, M)>,
                K: Into<String>,
                M: IntoIterator,
                M::Item: Into<String>,
            {
                self.context.add_errors(errors);
                self
            }

            /// Set a field's errors to the empty list
            pub fn clear_errors(&self, field: &str) -> &Self {
                self.context.clear_errors(field);
                self
            }

            /// Copy of the errors for a field
            pub fn get_errors(&self, field: &str) -> Vec<String> {
                self.context.get_errors(field)
            }

            /// First error for a field
            pub fn get_error(&self, field: &str) -> Option<String> {
                self.context.get_error(field)
            }

            /// Snapshot of all errors
            pub fn errors(&self) -> Errors {
                self.context.errors()
            }

            /// Check whether no errors are recorded
            pub fn is_valid(&self) -> bool {
                self.context.is_valid()
            }

            /// Current errors and validity
            pub fn state(&self) -> ValidationState {
                self.context.state()
            }

            /// Call `callback` after every mutating call
            pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
            where
                F: Fn(&ValidationState) + Send + Sync + 'static,
            {
                self.context.subscribe(callback)
            }

            /// Call `callback` whenever validity flips
            pub fn on_validity_change<F>(&self, callback: F) -> SubscriptionId
            where
                F: Fn(&ValidationState) + Send + Sync + 'static,
            {
                self.context.on_validity_change(callback)
            }

            /// Remove a subscription
            pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
                self.context.unsubscribe(id)
            }

            /// Channel view of the state
            pub fn watch(&self) -> watch::Receiver<ValidationState> {
                self.context.watch()
            }
        }
    };
}

/// Context bound to an object; `validate` takes only a schema.
pub struct BoundContext<T> {
    context: ValidationContext,
    object: Shared<T>,
}

impl<T> BoundContext<T> {
    pub(crate) fn new(context: ValidationContext, object: Shared<T>) -> Self {
        Self { context, object }
    }

    /// Fix the schema as well
    pub fn with_schema(self, schema: Schema<T>) -> SchemaBoundContext<T> {
        SchemaBoundContext {
            context: self.context,
            object: self.object,
            schema,
        }
    }
}

impl<T: Validatable> BoundContext<T> {
    /// Validate the bound object's current field values against `schema`
    pub fn validate(&self, schema: &Schema<T>) -> &Self {
        // The read lock is released before subscribers run.
        let staged = {
            let object = self.object.read();
            self.context.stage(&*object, schema)
        };
        self.context.commit_staged(staged);
        self
    }
}

forward_context_ops!(BoundContext);

impl<T> Clone for BoundContext<T> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            object: self.object.clone(),
        }
    }
}

impl<T> std::fmt::Debug for BoundContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundContext")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Context bound to an object and a schema; `validate` takes no arguments.
///
/// This is the "re-validate on every change" shape:
///
/// ```
/// use formwatch_core::{FieldRules, Schema, schema_bound_context, shared};
/// use serde_json::{json, Value};
///
/// let form = shared(json!({ "name": "" }));
/// let schema: Schema<Value> = Schema::new().field(
///     "name",
///     FieldRules::new().check(|opts| opts.value.as_str().is_some_and(|s| !s.is_empty())),
/// );
/// let validation = schema_bound_context(form.clone(), schema);
///
/// validation.validate();
/// assert!(!validation.is_valid());
///
/// form.write()["name"] = json!("Jeff");
/// validation.reset().validate();
/// assert!(validation.is_valid());
/// ```
pub struct SchemaBoundContext<T> {
    context: ValidationContext,
    object: Shared<T>,
    schema: Schema<T>,
}

impl<T> SchemaBoundContext<T> {
    /// The fixed schema
    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }
}

impl<T: Validatable> SchemaBoundContext<T> {
    /// Validate the bound object's current field values against the fixed schema
    pub fn validate(&self) -> &Self {
        let staged = {
            let object = self.object.read();
            self.context.stage(&*object, &self.schema)
        };
        self.context.commit_staged(staged);
        self
    }
}

forward_context_ops!(SchemaBoundContext);

impl<T> Clone for SchemaBoundContext<T> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            object: self.object.clone(),
            schema: self.schema.clone(),
        }
    }
}

impl<T> std::fmt::Debug for SchemaBoundContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBoundContext")
            .field("context", &self.context)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Create a fresh context bound to `object`
pub fn bound_context<T>(object: Shared<T>) -> BoundContext<T> {
    ValidationContext::new().bind(object)
}

/// Create a fresh context bound to `object` and `schema`
pub fn schema_bound_context<T>(object: Shared<T>, schema: Schema<T>) -> SchemaBoundContext<T> {
    ValidationContext::new().bind_with_schema(object, schema)
}
