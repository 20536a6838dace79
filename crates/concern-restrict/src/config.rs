//! Registration options for a restricted attribute.

use concern_model::{DefaultValue, MessageTemplate, MethodChain, Record, Transform, Value};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::prefix::{PrefixGroup, PrefixSetting};

/// Which validation a restricted attribute installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// No validation.
    Disabled,
    /// Value must be present and one of the permitted values.
    #[default]
    Required,
    /// Value must be null, empty, or one of the permitted values.
    Optional,
}

/// Options for [`register`](crate::register).
///
/// `prefix` names all three helper groups; `query`, `scope` and `assign`
/// override it for one group each.
///
/// ```ignore
/// let config = RestrictedValueConfig::new()
///     .prefix("hydro")
///     .scope(false)
///     .validate(ValidationMode::Optional);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestrictedValueConfig {
    pub prefix: PrefixSetting,
    #[serde(deserialize_with = "explicit_setting")]
    pub query: Option<PrefixSetting>,
    #[serde(deserialize_with = "explicit_setting")]
    pub scope: Option<PrefixSetting>,
    #[serde(deserialize_with = "explicit_setting")]
    pub assign: Option<PrefixSetting>,
    /// Applied to assigned values and to stored values before comparison.
    #[serde(deserialize_with = "method_names")]
    pub transform: Option<Transform>,
    /// Written (through `transform`) when the attribute is null. Only the
    /// literal form is read from configuration.
    #[serde(deserialize_with = "literal_default")]
    pub default: Option<DefaultValue>,
    pub validate: ValidationMode,
    /// Inclusion failure message; see [`MessageTemplate`].
    pub message: Option<MessageTemplate>,
}

impl RestrictedValueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<PrefixSetting>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn query(mut self, prefix: impl Into<PrefixSetting>) -> Self {
        self.query = Some(prefix.into());
        self
    }

    pub fn scope(mut self, prefix: impl Into<PrefixSetting>) -> Self {
        self.scope = Some(prefix.into());
        self
    }

    pub fn assign(mut self, prefix: impl Into<PrefixSetting>) -> Self {
        self.assign = Some(prefix.into());
        self
    }

    pub fn transform(mut self, transform: impl Into<Transform>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::value(value));
        self
    }

    /// Compute the default from the record when it is applied.
    pub fn default_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&dyn Record) -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::rule(rule));
        self
    }

    pub fn validate(mut self, mode: ValidationMode) -> Self {
        self.validate = mode;
        self
    }

    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(MessageTemplate::new(template));
        self
    }

    /// The setting in effect for one group.
    pub fn setting(&self, group: PrefixGroup) -> &PrefixSetting {
        let group_setting = match group {
            PrefixGroup::Query => &self.query,
            PrefixGroup::Scope => &self.scope,
            PrefixGroup::Assign => &self.assign,
        };
        group_setting.as_ref().unwrap_or(&self.prefix)
    }

    /// Resolved prefix for one group, `None` when the group is disabled.
    pub fn resolve(&self, group: PrefixGroup, attribute: &str) -> Option<String> {
        self.setting(group).resolve(attribute)
    }
}

/// A present key (even `null`) overrides the general prefix.
fn explicit_setting<'de, D>(deserializer: D) -> Result<Option<PrefixSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    PrefixSetting::deserialize(deserializer).map(Some)
}

fn literal_default<'de, D>(deserializer: D) -> Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|value| value.map(DefaultValue::Value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MethodNames {
    One(String),
    Many(Vec<String>),
}

fn method_names<'de, D>(deserializer: D) -> Result<Option<Transform>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = match Option::<MethodNames>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(MethodNames::One(name)) => name.split('.').map(str::to_string).collect(),
        Some(MethodNames::Many(names)) => names,
    };
    MethodChain::parse(names)
        .map(|chain| Some(Transform::Chain(chain)))
        .map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_overrides_general_prefix() {
        let config = RestrictedValueConfig::new().prefix("hydro").scope(false);
        assert_eq!(config.resolve(PrefixGroup::Query, "power").as_deref(), Some("hydro"));
        assert_eq!(config.resolve(PrefixGroup::Scope, "power"), None);
    }

    #[test]
    fn null_override_means_no_prefix() {
        let config: RestrictedValueConfig =
            serde_json::from_str(r#"{"query": null}"#).unwrap();
        assert_eq!(config.query, Some(PrefixSetting::None));
        assert_eq!(config.scope, None);
        assert_eq!(config.resolve(PrefixGroup::Query, "power").as_deref(), Some(""));
        assert_eq!(config.resolve(PrefixGroup::Scope, "power").as_deref(), Some("power"));
    }

    #[test]
    fn transform_parses_from_names() {
        let config: RestrictedValueConfig =
            serde_json::from_str(r#"{"transform": ["to_s", "downcase"]}"#).unwrap();
        let transform = config.transform.expect("transform");
        assert_eq!(transform.apply(Value::from("ON")).unwrap(), Value::from("on"));

        let err = serde_json::from_str::<RestrictedValueConfig>(r#"{"transform": "reverse"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn default_reads_as_literal() {
        let config: RestrictedValueConfig =
            serde_json::from_str(r#"{"default": "off"}"#).unwrap();
        let default = config.default.expect("default");
        assert_eq!(default.as_value(), Some(&Value::from("off")));

        let config: RestrictedValueConfig = serde_json::from_str("{}").unwrap();
        assert!(config.default.is_none());
    }
}
