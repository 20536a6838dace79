//! Per-type registration target for restricted attributes.

use std::collections::BTreeMap;
use std::sync::Arc;

use concern_model::{ConcernError, Record, Result, ScopeQuery, ValidationReport, Value};
use tracing::debug;

use crate::attribute::{RestrictedAttribute, register};
use crate::config::RestrictedValueConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameOwner {
    /// Defined by the host type itself.
    Reserved,
    Attribute(String),
}

/// All restricted attributes of one model type.
///
/// Generated names must be unique across the type: a registration whose
/// names clash with a reserved name or with another attribute's helpers is
/// rejected. Registering the same attribute again replaces it.
#[derive(Debug, Clone, Default)]
pub struct RestrictedRegistry {
    attributes: Vec<Arc<RestrictedAttribute>>,
    names: BTreeMap<String, NameOwner>,
}

impl RestrictedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark names the host type already defines.
    pub fn reserve<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.names.insert(name.into(), NameOwner::Reserved);
        }
        self
    }

    pub fn register<A, I, V>(
        &mut self,
        attribute: A,
        values: I,
        config: RestrictedValueConfig,
    ) -> Result<Arc<RestrictedAttribute>>
    where
        A: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let restricted = register(attribute, values, config)?;
        let attribute = restricted.attribute().to_string();

        for name in restricted.helper_names() {
            match self.names.get(name) {
                Some(NameOwner::Attribute(owner)) if owner == &attribute => {}
                Some(_) => {
                    return Err(ConcernError::NameCollision {
                        name: name.to_string(),
                    });
                }
                None => {}
            }
        }

        self.names
            .retain(|_, owner| !matches!(owner, NameOwner::Attribute(a) if a == &attribute));
        for name in restricted.helper_names() {
            self.names
                .insert(name.to_string(), NameOwner::Attribute(attribute.clone()));
        }

        let restricted = Arc::new(restricted);
        match self
            .attributes
            .iter_mut()
            .find(|existing| existing.attribute() == attribute)
        {
            Some(existing) => {
                debug!(attribute = attribute.as_str(), "replaced restricted attribute");
                *existing = Arc::clone(&restricted);
            }
            None => self.attributes.push(Arc::clone(&restricted)),
        }
        Ok(restricted)
    }

    pub fn get(&self, attribute: &str) -> Option<&Arc<RestrictedAttribute>> {
        self.attributes
            .iter()
            .find(|restricted| restricted.attribute() == attribute)
    }

    /// Registered attributes in registration order.
    pub fn attributes(&self) -> &[Arc<RestrictedAttribute>] {
        &self.attributes
    }

    /// Whether `name` is taken, by the host or by a generated helper.
    pub fn is_defined(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Call a generated predicate by name.
    pub fn query(&self, name: &str, record: &dyn Record) -> Result<bool> {
        let marked = with_marker(name, '?');
        self.owner(&marked)?.query(&marked, record)
    }

    /// Call a generated assignment by name.
    pub fn assign(&self, name: &str, record: &mut dyn Record) -> Result<()> {
        let marked = with_marker(name, '!');
        self.owner(&marked)?.assign_by_name(&marked, record)
    }

    pub fn scope(&self, name: &str) -> Option<ScopeQuery> {
        self.attributes
            .iter()
            .find_map(|restricted| restricted.scope(name))
    }

    pub fn scopes(&self) -> Vec<ScopeQuery> {
        self.attributes
            .iter()
            .flat_map(|restricted| restricted.scopes())
            .collect()
    }

    /// Route a setter call through the attribute's transform and default.
    /// Unrestricted attributes are written as given.
    pub fn write(&self, record: &mut dyn Record, attribute: &str, value: Value) -> Result<()> {
        match self.get(attribute) {
            Some(restricted) => restricted.write(record, value),
            None => {
                record.set(attribute, value);
                Ok(())
            }
        }
    }

    /// Fill every restricted attribute's default. Returns how many were filled.
    pub fn initialize_defaults(&self, record: &mut dyn Record) -> Result<usize> {
        let mut filled = 0;
        for restricted in &self.attributes {
            if restricted.apply_default(record)? {
                filled += 1;
            }
        }
        Ok(filled)
    }

    /// Validate every restricted attribute.
    pub fn validate(&self, record: &dyn Record) -> ValidationReport {
        let mut report = ValidationReport::new();
        for restricted in &self.attributes {
            report.extend(restricted.validate(record));
        }
        report
    }

    fn owner(&self, name: &str) -> Result<&RestrictedAttribute> {
        let Some(NameOwner::Attribute(attribute)) = self.names.get(name) else {
            return Err(ConcernError::UnknownHelper(name.to_string()));
        };
        self.get(attribute)
            .map(|restricted| &**restricted)
            .ok_or_else(|| ConcernError::UnknownHelper(name.to_string()))
    }
}

fn with_marker(name: &str, marker: char) -> String {
    if name.ends_with(marker) {
        name.to_string()
    } else {
        format!("{name}{marker}")
    }
}
