//! Attribute defaults.

use concern_model::{DefaultValue, Record, Value};
use tracing::{debug, trace};

/// Ordered `(field, default)` declarations for a model type.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    entries: Vec<(String, DefaultValue)>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a literal default.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, DefaultValue::value(value));
        self
    }

    /// Declare a computed default.
    pub fn with_rule<F>(mut self, field: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&dyn Record) -> Value + Send + Sync + 'static,
    {
        self.push(field, DefaultValue::rule(rule));
        self
    }

    pub fn push(&mut self, field: impl Into<String>, default: DefaultValue) {
        self.entries.push((field.into(), default));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    /// Fill every declared field that exists on `record` and is null.
    ///
    /// Only null fields are written, so running this again is a no-op.
    /// Returns the number of fields filled.
    pub fn initialize(&self, record: &mut dyn Record) -> usize {
        let mut filled = 0;
        for (field, default) in &self.entries {
            if !record.has_field(field) || record.has_value(field) {
                continue;
            }
            let value = default.evaluate(&*record);
            trace!(field = field.as_str(), "filling default");
            record.set(field, value);
            filled += 1;
        }
        if filled > 0 {
            debug!(filled, "initialized defaults");
        }
        filled
    }
}

/// Fill `record` from `defaults`. See [`Defaults::initialize`].
pub fn initialize_defaults(record: &mut dyn Record, defaults: &Defaults) -> usize {
    defaults.initialize(record)
}
