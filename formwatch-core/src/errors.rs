// Validation error snapshots

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Snapshot of the errors recorded by a context.
///
/// Maps each field with at least one error to its messages in insertion
/// order. Fields without errors are never present. A snapshot is a copy;
/// changing it has no effect on the context it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Errors(BTreeMap<String, Vec<String>>);

impl Errors {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the messages for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Get the first message for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Check whether a field has errors
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Names of the fields with errors
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of messages across all fields
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.0)
    }

    /// Unwrap into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl FromIterator<(String, Vec<String>)> for Errors {
    /// Collect entries, dropping fields with no messages
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, messages) in iter {
            if !messages.is_empty() {
                map.entry(field).or_default().extend(messages);
            }
        }
        Self(map)
    }
}

impl IntoIterator for Errors {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<&str> for Errors {
    type Output = [String];

    /// Messages for `field`.
    ///
    /// # Panics
    ///
    /// Panics if the field has no errors.
    fn index(&self, field: &str) -> &Self::Output {
        match self.get(field) {
            Some(messages) => messages,
            None => panic!("no errors recorded for field `{field}`"),
        }
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.0 {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
