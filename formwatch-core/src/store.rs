// Error store

use crate::Errors;
use std::collections::BTreeMap;

/// Authoritative field → messages mapping owned by one context.
///
/// A field may temporarily map to an empty list (after
/// [`clear_field`](Self::clear_field), or while a validation pass is being
/// committed); [`prune`](Self::prune) removes those entries. Snapshots never
/// contain empty lists.
#[derive(Debug, Clone, Default)]
pub struct ErrorStore {
    entries: BTreeMap<String, Vec<String>>,
}

impl ErrorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the message list for a field, creating it if needed
    pub fn ensure(&mut self, field: &str) -> &mut Vec<String> {
        self.entries.entry(field.to_string()).or_default()
    }

    /// Append messages to a field
    pub fn append<I>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.ensure(field)
            .extend(messages.into_iter().map(Into::into));
    }

    /// Set a field to the empty list
    pub fn clear_field(&mut self, field: &str) {
        self.ensure(field).clear();
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove entries whose list is empty, returning how many were removed
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, messages| !messages.is_empty());
        before - self.entries.len()
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> &[String] {
        self.entries
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if every entry is empty
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Number of keys, empty entries included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages
    pub fn error_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Copy the non-empty entries into a snapshot
    pub fn snapshot(&self) -> Errors {
        self.entries
            .iter()
            .map(|(field, messages)| (field.clone(), messages.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut store = ErrorStore::new();
        store.append("name", ["first"]);
        store.append("name", vec!["second".to_string()]);
        assert_eq!(store.get("name"), ["first", "second"]);
        assert_eq!(store.error_count(), 2);
    }

    #[test]
    fn test_clear_field_leaves_empty_entry() {
        let mut store = ErrorStore::new();
        store.append("name", ["required"]);
        store.clear_field("name");

        assert_eq!(store.len(), 1);
        assert!(store.get("name").is_empty());
        assert!(store.is_valid());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_prune_removes_only_empty_entries() {
        let mut store = ErrorStore::new();
        store.ensure("name");
        store.append("email", ["invalid"]);
        store.clear_field("age");

        assert_eq!(store.prune(), 2);
        assert_eq!(store.len(), 1);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = ErrorStore::new();
        store.append("name", ["required"]);
        store.append("email", ["invalid"]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.get("name").is_empty());
    }
}
