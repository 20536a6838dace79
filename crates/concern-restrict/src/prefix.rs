//! Helper naming.
//!
//! Every permitted value gets up to three generated helpers, one per
//! [`PrefixGroup`]. For `attribute = "power"` and value `"on"` with the
//! default prefix:
//!
//! | Group  | Name        |
//! |--------|-------------|
//! | query  | `power_on?` |
//! | assign | `power_on!` |
//! | scope  | `power_on`  |

use std::fmt;

use concern_model::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixGroup {
    Query,
    Scope,
    Assign,
}

impl PrefixGroup {
    pub const ALL: [Self; 3] = [Self::Query, Self::Scope, Self::Assign];

    /// Marker appended to helper names of this group.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Query => "?",
            Self::Assign => "!",
            Self::Scope => "",
        }
    }
}

impl fmt::Display for PrefixGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Scope => "scope",
            Self::Assign => "assign",
        })
    }
}

/// How one helper group is named.
///
/// Deserializes from `true` (default), `false` (disabled), `null` (no
/// prefix) or a string (custom prefix).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrefixSetting {
    /// Prefix with the attribute name.
    #[default]
    Default,
    /// Generate no helpers for the group.
    Disabled,
    /// Bare value names.
    None,
    Custom(String),
}

impl PrefixSetting {
    /// Resolve to a concrete prefix; `None` when the group is disabled and
    /// `Some("")` when helpers are unprefixed.
    pub fn resolve(&self, attribute: &str) -> Option<String> {
        match self {
            Self::Default => Some(attribute.to_string()),
            Self::Disabled => None,
            Self::None => Some(String::new()),
            Self::Custom(prefix) => Some(prefix.clone()),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl From<bool> for PrefixSetting {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Default } else { Self::Disabled }
    }
}

impl From<&str> for PrefixSetting {
    fn from(prefix: &str) -> Self {
        Self::Custom(prefix.to_string())
    }
}

impl From<String> for PrefixSetting {
    fn from(prefix: String) -> Self {
        Self::Custom(prefix)
    }
}

impl<T: Into<PrefixSetting>> From<Option<T>> for PrefixSetting {
    fn from(prefix: Option<T>) -> Self {
        prefix.map_or(Self::None, Into::into)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrefix {
    Flag(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for PrefixSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawPrefix>::deserialize(deserializer)? {
            None => Self::None,
            Some(RawPrefix::Flag(flag)) => flag.into(),
            Some(RawPrefix::Text(prefix)) => prefix.into(),
        })
    }
}

impl Serialize for PrefixSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Default => serializer.serialize_bool(true),
            Self::Disabled => serializer.serialize_bool(false),
            Self::None => serializer.serialize_none(),
            Self::Custom(prefix) => serializer.serialize_str(prefix),
        }
    }
}

/// Identifier fragment for a value: non-alphanumerics become `_`, case is
/// kept so `"A"` and `"a"` stay distinct.
pub fn value_suffix(value: &Value) -> String {
    value
        .to_display_string()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect()
}

/// Full helper name for a resolved prefix, value and group.
pub fn helper_name(prefix: &str, value: &Value, group: PrefixGroup) -> String {
    let suffix = value_suffix(value);
    if prefix.is_empty() {
        format!("{suffix}{}", group.suffix())
    } else {
        format!("{prefix}_{suffix}{}", group.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_each_setting() {
        assert_eq!(PrefixSetting::Default.resolve("power").as_deref(), Some("power"));
        assert_eq!(PrefixSetting::Disabled.resolve("power"), None);
        assert_eq!(PrefixSetting::None.resolve("power").as_deref(), Some(""));
        assert_eq!(
            PrefixSetting::from("hydro").resolve("power").as_deref(),
            Some("hydro")
        );
    }

    #[test]
    fn deserializes_from_json_literals() {
        let parse = |json: &str| serde_json::from_str::<PrefixSetting>(json).unwrap();
        assert_eq!(parse("true"), PrefixSetting::Default);
        assert_eq!(parse("false"), PrefixSetting::Disabled);
        assert_eq!(parse("null"), PrefixSetting::None);
        assert_eq!(parse("\"hydro\""), PrefixSetting::Custom("hydro".to_string()));
    }

    #[test]
    fn names_fold_values_into_identifiers() {
        let value = Value::from("In Progress");
        assert_eq!(helper_name("status", &value, PrefixGroup::Query), "status_In_Progress?");
        assert_eq!(helper_name("", &value, PrefixGroup::Scope), "In_Progress");
        assert_eq!(
            helper_name("s", &Value::symbol("done"), PrefixGroup::Assign),
            "s_done!"
        );
    }

    #[test]
    fn case_is_kept() {
        assert_eq!(value_suffix(&Value::from("A")), "A");
        assert_eq!(value_suffix(&Value::from("a")), "a");
        assert_eq!(value_suffix(&Value::from("x-Ray 2")), "x_Ray_2");
    }
}
