//! Declarative normalization pipeline.
//!
//! A model type declares its normalization once, as a [`Normalizer`]:
//!
//! 1. **defaults**: fill null fields ([`Defaults`])
//! 2. **normalize**: run a [`TransformSpec`] and/or a custom hook
//!
//! The host calls [`Normalizer::initialize_defaults`] after constructing or
//! loading a record, and [`Normalizer::normalize_with_defaults`] before
//! validating it.
//!
//! # Example
//!
//! ```ignore
//! use concern_normalize::{Defaults, NamedTransform, Normalizer, TransformSpec};
//!
//! let normalizer = Normalizer::new()
//!     .with_defaults(Defaults::new().with("status", "draft"))
//!     .with_transforms(
//!         TransformSpec::new()
//!             .step(NamedTransform::ForceStringOrNil, ["title", "body"])
//!             .step(NamedTransform::ForceLowercase, ["email"]),
//!     );
//!
//! normalizer.normalize_with_defaults(&mut record)?;
//! ```

use std::fmt;
use std::sync::Arc;

use concern_model::{Method, MethodChain, Record, Result, Transform};
use serde::Deserialize;
use tracing::debug;

use crate::defaults::Defaults;
use crate::named::NamedTransform;
use crate::transform::apply_transform;

/// One pipeline step: a transform and the fields it applies to.
#[derive(Debug, Clone)]
pub struct TransformStep {
    pub transform: Transform,
    pub fields: Vec<String>,
}

impl TransformStep {
    pub fn apply(&self, record: &mut dyn Record) -> Result<usize> {
        apply_transform(record, &self.transform, &self.fields)
    }
}

/// Ordered transform steps. Steps run in declaration order.
///
/// Deserializes from a list of `{"transform": ..., "fields": ...}` objects,
/// where `transform` is a named transform (`"force_string"`), a method name
/// (`"strip"`) or a list of method names, and `fields` is one field name or
/// a list of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<StepConfig>")]
pub struct TransformSpec {
    steps: Vec<TransformStep>,
}

impl TransformSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn step<T, I, S>(mut self, transform: T, fields: I) -> Self
    where
        T: Into<Transform>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(transform, fields);
        self
    }

    pub fn push<T, I, S>(&mut self, transform: T, fields: I)
    where
        T: Into<Transform>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(TransformStep {
            transform: transform.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        });
    }

    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `record`, returning the total fields written.
    pub fn apply(&self, record: &mut dyn Record) -> Result<usize> {
        let mut written = 0;
        for step in &self.steps {
            written += step.apply(record)?;
        }
        Ok(written)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransformName {
    Named(NamedTransform),
    Method(Method),
    Chain(Vec<Method>),
}

impl From<TransformName> for Transform {
    fn from(name: TransformName) -> Self {
        match name {
            TransformName::Named(named) => named.into(),
            TransformName::Method(method) => method.into(),
            TransformName::Chain(methods) => MethodChain::new(methods).into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldList {
    One(String),
    Many(Vec<String>),
}

impl FieldList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(field) => vec![field],
            Self::Many(fields) => fields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StepConfig {
    transform: TransformName,
    fields: FieldList,
}

impl From<Vec<StepConfig>> for TransformSpec {
    fn from(configs: Vec<StepConfig>) -> Self {
        configs.into_iter().fold(Self::new(), |spec, config| {
            spec.step(config.transform, config.fields.into_vec())
        })
    }
}

/// Signature of a custom normalize step.
pub type NormalizeHook = dyn Fn(&mut dyn Record) -> Result<()> + Send + Sync;

/// A model type's default and normalization declarations.
///
/// Built once per type and shared read-only by every record of that type.
#[derive(Clone, Default)]
pub struct Normalizer {
    defaults: Defaults,
    transforms: TransformSpec,
    hook: Option<Arc<NormalizeHook>>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_transforms(mut self, transforms: TransformSpec) -> Self {
        self.transforms = transforms;
        self
    }

    /// Add a custom normalize step, run after the declared transforms.
    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn Record) -> Result<()> + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn transforms(&self) -> &TransformSpec {
        &self.transforms
    }

    /// Whether this type declares a normalize step at all.
    pub fn has_normalize_step(&self) -> bool {
        !self.transforms.is_empty() || self.hook.is_some()
    }

    /// Fill null fields from the declared defaults. Idempotent.
    pub fn initialize_defaults(&self, record: &mut dyn Record) -> usize {
        self.defaults.initialize(record)
    }

    /// Run the declared normalize step, if any.
    pub fn normalize(&self, record: &mut dyn Record) -> Result<usize> {
        let written = self.transforms.apply(record)?;
        if let Some(hook) = &self.hook {
            hook(record)?;
        }
        Ok(written)
    }

    /// Defaults first, then the normalize step when one is declared.
    pub fn normalize_with_defaults(&self, record: &mut dyn Record) -> Result<usize> {
        let filled = self.initialize_defaults(record);
        if !self.has_normalize_step() {
            return Ok(filled);
        }
        let written = self.normalize(record)?;
        debug!(filled, written, "normalized record");
        Ok(filled + written)
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("defaults", &self.defaults)
            .field("transforms", &self.transforms)
            .field("hook", &self.hook.as_ref().map(|_| ".."))
            .finish()
    }
}
