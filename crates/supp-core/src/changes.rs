//! Field-level change-sets produced by the diff engine.
//!
//! A `ChangeSet` keeps fields in the order the record type declares them and
//! serializes as a JSON object of
//! `{"<field>": {"old value": .., "new value": ..}}`. A JSON `null` on either
//! side is the null-sentinel: the field held no value in that version.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Old and new value of one field. `None` means "held no value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl FieldChange {
    #[must_use]
    pub fn new(field: impl Into<String>, old: Option<Value>, new: Option<Value>) -> Self {
        Self {
            field: field.into(),
            old,
            new,
        }
    }
}

/// Serializes the value pair of a [`FieldChange`] without the field name.
struct ValuePair<'a>(&'a FieldChange);

impl Serialize for ValuePair<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_struct("FieldChange", 2)?;
        pair.serialize_field("old value", &self.0.old)?;
        pair.serialize_field("new value", &self.0.new)?;
        pair.end()
    }
}

/// Ordered, duplicate-free mapping from field name to [`FieldChange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<FieldChange>,
}

impl ChangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Append a change. Returns `false` and leaves the set untouched if the
    /// field is already present.
    pub fn insert(&mut self, change: FieldChange) -> bool {
        if self.contains(&change.field) {
            return false;
        }
        self.changes.push(change);
        true
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.field.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a FieldChange;
    type IntoIter = std::slice::Iter<'a, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.changes.len()))?;
        for change in &self.changes {
            map.serialize_entry(&change.field, &ValuePair(change))?;
        }
        map.end()
    }
}
