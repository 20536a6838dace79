//! Restricted attributes.
//!
//! [`register`] turns an attribute name, a closed list of permitted values and
//! a [`RestrictedValueConfig`] into a [`RestrictedAttribute`]: an immutable
//! bundle of generated helpers the host type keeps and exposes.
//!
//! # Example
//!
//! ```ignore
//! use concern_restrict::{register, RestrictedValueConfig};
//!
//! let power = register("power", ["on", "off"], RestrictedValueConfig::new())?;
//!
//! power.assign_by_name("power_on!", &mut record)?;
//! assert!(power.query("power_on?", &record)?);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use concern_model::{
    ConcernError, DefaultValue, Record, Result, ScopeQuery, Transform, ValidationIssue, Value,
};
use tracing::{debug, trace, warn};

use crate::config::RestrictedValueConfig;
use crate::prefix::{PrefixGroup, helper_name};
use crate::validation::InclusionValidation;

/// Generated helper names for one permitted value. `None` where the group
/// is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueHelper {
    pub value: Value,
    /// Predicate, e.g. `power_on?`.
    pub query: Option<String>,
    /// Equality scope, e.g. `power_on`.
    pub scope: Option<String>,
    /// Assignment action, e.g. `power_on!`.
    pub assign: Option<String>,
}

impl ValueHelper {
    pub fn name(&self, group: PrefixGroup) -> Option<&str> {
        match group {
            PrefixGroup::Query => self.query.as_deref(),
            PrefixGroup::Scope => self.scope.as_deref(),
            PrefixGroup::Assign => self.assign.as_deref(),
        }
    }

    /// Every generated name, in query/scope/assign order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        PrefixGroup::ALL
            .into_iter()
            .filter_map(move |group| self.name(group))
    }
}

/// A field limited to a closed set of values, with its generated helpers.
///
/// Immutable after [`register`]; share it between records behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RestrictedAttribute {
    attribute: String,
    values: Arc<[Value]>,
    helpers: Vec<ValueHelper>,
    transform: Option<Transform>,
    default: Option<DefaultValue>,
    validation: Option<InclusionValidation>,
}

/// Register a restricted attribute.
///
/// Values are copied into an immutable list. Duplicate values and values
/// whose generated names collide are rejected.
pub fn register<A, I, V>(
    attribute: A,
    values: I,
    config: RestrictedValueConfig,
) -> Result<RestrictedAttribute>
where
    A: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let attribute = attribute.into();
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(ConcernError::EmptyValues { attribute });
    }
    for (index, value) in values.iter().enumerate() {
        if values[..index].contains(value) {
            return Err(ConcernError::DuplicateValue {
                attribute,
                value: value.to_display_string(),
            });
        }
    }

    let query = config.resolve(PrefixGroup::Query, &attribute);
    let scope = config.resolve(PrefixGroup::Scope, &attribute);
    let assign = config.resolve(PrefixGroup::Assign, &attribute);

    let mut seen = BTreeSet::new();
    let mut helpers = Vec::with_capacity(values.len());
    for value in &values {
        let helper = ValueHelper {
            value: value.clone(),
            query: query
                .as_deref()
                .map(|prefix| helper_name(prefix, value, PrefixGroup::Query)),
            scope: scope
                .as_deref()
                .map(|prefix| helper_name(prefix, value, PrefixGroup::Scope)),
            assign: assign
                .as_deref()
                .map(|prefix| helper_name(prefix, value, PrefixGroup::Assign)),
        };
        for name in helper.names() {
            if !seen.insert(name.to_string()) {
                return Err(ConcernError::NameCollision {
                    name: name.to_string(),
                });
            }
        }
        helpers.push(helper);
    }

    let validation = InclusionValidation::for_mode(
        config.validate,
        &attribute,
        &values,
        config.message.unwrap_or_default(),
    );

    debug!(
        attribute = attribute.as_str(),
        values = values.len(),
        helpers = seen.len(),
        validated = validation.is_some(),
        "registered restricted attribute"
    );

    Ok(RestrictedAttribute {
        attribute,
        values: values.into(),
        helpers,
        transform: config.transform,
        default: config.default,
        validation,
    })
}

impl RestrictedAttribute {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The frozen value list, shared without copying.
    pub fn shared_values(&self) -> Arc<[Value]> {
        Arc::clone(&self.values)
    }

    pub fn helpers(&self) -> &[ValueHelper] {
        &self.helpers
    }

    pub fn helper(&self, value: &Value) -> Option<&ValueHelper> {
        self.helpers.iter().find(|helper| &helper.value == value)
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn validation(&self) -> Option<&InclusionValidation> {
        self.validation.as_ref()
    }

    /// Every generated helper name.
    pub fn helper_names(&self) -> impl Iterator<Item = &str> {
        self.helpers.iter().flat_map(ValueHelper::names)
    }

    /// One equality scope per value, unless scopes are disabled.
    pub fn scopes(&self) -> Vec<ScopeQuery> {
        self.helpers
            .iter()
            .filter_map(|helper| {
                let name = helper.scope.as_ref()?;
                Some(ScopeQuery::new(
                    name.clone(),
                    self.attribute.clone(),
                    helper.value.clone(),
                ))
            })
            .collect()
    }

    /// Run the configured transform; identity when there is none.
    pub fn transform_value(&self, value: Value) -> Result<Value> {
        match &self.transform {
            Some(transform) => transform.apply(value),
            None => Ok(value),
        }
    }

    /// Whether the transformed stored value equals `value`.
    pub fn is(&self, record: &dyn Record, value: &Value) -> Result<bool> {
        let current = self.transform_value(record.get(&self.attribute))?;
        Ok(&current == value)
    }

    /// Set the attribute to a permitted value.
    ///
    /// New records are written in memory; saved records get a persisted
    /// single-field update. Records without the field are left alone.
    pub fn assign(&self, record: &mut dyn Record, value: &Value) -> Result<()> {
        if !self.values.contains(value) {
            return Err(ConcernError::NotPermitted {
                attribute: self.attribute.clone(),
                value: value.to_display_string(),
            });
        }
        if !record.has_field(&self.attribute) {
            trace!(attribute = self.attribute.as_str(), "record lacks attribute");
            return Ok(());
        }
        let next = self.transform_value(value.clone())?;
        if record.is_new_record() {
            record.set(&self.attribute, next);
            Ok(())
        } else {
            record.persisted_update(&self.attribute, next)
        }
    }

    /// Call a generated predicate by name (`power_on?`; the `?` is optional).
    pub fn query(&self, name: &str, record: &dyn Record) -> Result<bool> {
        let helper = self.find(PrefixGroup::Query, name)?;
        self.is(record, &helper.value)
    }

    /// Call a generated assignment by name (`power_on!`; the `!` is optional).
    pub fn assign_by_name(&self, name: &str, record: &mut dyn Record) -> Result<()> {
        let helper = self.find(PrefixGroup::Assign, name)?;
        self.assign(record, &helper.value)
    }

    /// Find the generated scope with this name.
    pub fn scope(&self, name: &str) -> Option<ScopeQuery> {
        self.scopes().into_iter().find(|scope| scope.name == name)
    }

    /// The attribute setter: stores `transform(value or default)`.
    ///
    /// Without a transform the value is stored as given.
    pub fn write(&self, record: &mut dyn Record, value: Value) -> Result<()> {
        let next = match &self.transform {
            Some(transform) => {
                let value = match (value, &self.default) {
                    (Value::Null, Some(default)) => default.evaluate(&*record),
                    (value, _) => value,
                };
                transform.apply(value)?
            }
            None => value,
        };
        record.set(&self.attribute, next);
        Ok(())
    }

    /// Fill the attribute from the default when it exists and is null.
    ///
    /// Rules are evaluated against the record, and the default passes through
    /// the transform first. Returns whether a value was written.
    pub fn apply_default(&self, record: &mut dyn Record) -> Result<bool> {
        let Some(default) = &self.default else {
            return Ok(false);
        };
        if !record.has_field(&self.attribute) || record.has_value(&self.attribute) {
            return Ok(false);
        }
        let value = self.transform_value(default.evaluate(&*record))?;
        record.set(&self.attribute, value);
        Ok(true)
    }

    /// Validate the stored value; empty when it passes or validation is off.
    pub fn validate(&self, record: &dyn Record) -> Vec<ValidationIssue> {
        let Some(validation) = &self.validation else {
            return Vec::new();
        };
        let issues = validation.check(&record.get(&self.attribute));
        if !issues.is_empty() {
            warn!(
                attribute = self.attribute.as_str(),
                issues = issues.len(),
                "restricted value failed validation"
            );
        }
        issues
    }

    fn find(&self, group: PrefixGroup, name: &str) -> Result<&ValueHelper> {
        let marker = group.suffix();
        let wanted = if name.ends_with(marker) {
            name.to_string()
        } else {
            format!("{name}{marker}")
        };
        self.helpers
            .iter()
            .find(|helper| helper.name(group) == Some(wanted.as_str()))
            .ok_or(ConcernError::UnknownHelper(wanted))
    }
}
