// Validation schema builder

use crate::{Outcome, ValidationOptions, Validator};
use std::sync::Arc;

/// Validator shared between schemas and bound contexts
pub type SharedValidator<T> = Arc<dyn Validator<T>>;

/// Ordered validators for a single field.
///
/// Entries may be placeholders (`None`), which are skipped when the field is
/// validated. This lets callers build conditional lists without reshaping
/// them.
pub struct FieldRules<T: ?Sized> {
    validators: Vec<Option<SharedValidator<T>>>,
}

impl<T: ?Sized> FieldRules<T> {
    /// Create an empty rule list
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator
    pub fn rule<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.validators.push(Some(Arc::new(validator)));
        self
    }

    /// Add a closure validator
    ///
    /// Unlike [`rule`](Self::rule), the closure's argument type is inferred.
    pub fn check<F, R>(self, f: F) -> Self
    where
        F: Fn(&ValidationOptions<'_, T>) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        self.rule(f)
    }

    /// Add an already shared validator
    pub fn shared(mut self, validator: SharedValidator<T>) -> Self {
        self.validators.push(Some(validator));
        self
    }

    /// Add a validator, or a placeholder when `validator` is `None`
    pub fn maybe<V>(mut self, validator: Option<V>) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.validators
            .push(validator.map(|v| Arc::new(v) as SharedValidator<T>));
        self
    }

    /// Add a validator only when `condition` holds
    pub fn when<V>(self, condition: bool, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.maybe(condition.then_some(validator))
    }

    /// Add a placeholder
    pub fn skip(mut self) -> Self {
        self.validators.push(None);
        self
    }

    /// Number of entries, placeholders included
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if there are no entries at all
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Iterate over the validators that will actually run
    pub fn active(&self) -> impl Iterator<Item = &SharedValidator<T>> {
        self.validators.iter().flatten()
    }
}

impl<T: ?Sized> Default for FieldRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for FieldRules<T> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for FieldRules<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRules")
            .field("entries", &self.validators.len())
            .field("active", &self.active().count())
            .finish()
    }
}

/// Mapping from field names to their validators.
///
/// Fields are processed in declaration order. Declaring a field twice
/// replaces its rules. A context never mutates the schema it is given.
///
/// # Examples
///
/// ```
/// use formwatch_core::{FieldRules, Schema};
/// use serde_json::Value;
///
/// let schema: Schema<Value> = Schema::new()
///     .field("name", FieldRules::new().check(|opts| !opts.value.is_null()))
///     .field("age", FieldRules::new().skip());
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.get("name").is_some());
/// ```
pub struct Schema<T: ?Sized> {
    fields: Vec<(String, FieldRules<T>)>,
}

impl<T: ?Sized> Schema<T> {
    /// Create an empty schema
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare the rules for a field
    pub fn field(mut self, name: impl Into<String>, rules: FieldRules<T>) -> Self {
        self.insert(name, rules);
        self
    }

    /// Declare the rules for a field in place
    pub fn insert(&mut self, name: impl Into<String>, rules: FieldRules<T>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = rules,
            None => self.fields.push((name, rules)),
        }
    }

    /// Get the rules declared for a field
    pub fn get(&self, name: &str) -> Option<&FieldRules<T>> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rules)| rules)
    }

    /// Iterate over fields and their rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRules<T>)> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules))
    }

    /// Names of the declared fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: ?Sized> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(field, rules)| (field, rules)))
            .finish()
    }
}
