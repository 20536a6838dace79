//! The record capability the concerns operate on.
//!
//! A host persistence layer implements [`Record`] for its model type. The
//! concerns only ever read and write fields that already exist; they never
//! create a field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConcernError, Result};
use crate::value::Value;

/// A mutable entity with named fields.
pub trait Record {
    /// Whether the record declares a field with this name.
    fn has_field(&self, name: &str) -> bool;

    /// Whether the field exists and holds a non-null value.
    fn has_value(&self, name: &str) -> bool {
        self.has_field(name) && !self.get(name).is_null()
    }

    /// Current value of a field, `Value::Null` when absent.
    fn get(&self, name: &str) -> Value;

    /// Write a field in memory. Writes to undeclared fields are dropped.
    fn set(&mut self, name: &str, value: Value);

    /// Whether the record has not been saved yet.
    fn is_new_record(&self) -> bool;

    /// Write a single field straight through to storage.
    fn persisted_update(&mut self, name: &str, value: Value) -> Result<()>;
}

/// A persisted single-field write recorded by [`MemoryRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedUpdate {
    pub field: String,
    pub value: Value,
}

/// In-memory [`Record`] with a fixed set of declared fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    fields: BTreeMap<String, Value>,
    #[serde(default)]
    persisted: bool,
    #[serde(skip)]
    updates: Vec<PersistedUpdate>,
}

impl MemoryRecord {
    /// Create a new (unsaved) record declaring the given fields, all null.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|name| (name.into(), Value::Null))
                .collect(),
            persisted: false,
            updates: Vec::new(),
        }
    }

    /// Declare a field and give it a value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Mark the record as already saved.
    pub fn persisted(mut self) -> Self {
        self.persisted = true;
        self
    }

    pub fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Persisted updates issued against this record, oldest first.
    pub fn updates(&self) -> &[PersistedUpdate] {
        &self.updates
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Record for MemoryRecord {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value;
        }
    }

    fn is_new_record(&self) -> bool {
        !self.persisted
    }

    fn persisted_update(&mut self, name: &str, value: Value) -> Result<()> {
        let Some(slot) = self.fields.get_mut(name) else {
            return Err(ConcernError::UnknownField(name.to_string()));
        };
        *slot = value.clone();
        self.updates.push(PersistedUpdate {
            field: name.to_string(),
            value,
        });
        Ok(())
    }
}
