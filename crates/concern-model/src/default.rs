//! Literal and computed defaults.

use std::fmt;
use std::sync::Arc;

use crate::record::Record;
use crate::value::Value;

/// Signature of a computed default.
pub type DefaultRule = dyn Fn(&dyn Record) -> Value + Send + Sync;

/// A default: a literal value, or a rule evaluated against the record.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Rule(Arc<DefaultRule>),
}

impl DefaultValue {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn rule<F>(f: F) -> Self
    where
        F: Fn(&dyn Record) -> Value + Send + Sync + 'static,
    {
        Self::Rule(Arc::new(f))
    }

    pub fn evaluate(&self, record: &dyn Record) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Rule(rule) => rule(record),
        }
    }

    /// The literal, `None` for a rule.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Rule(_) => None,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Rule(_) => f.write_str("Rule(..)"),
        }
    }
}
