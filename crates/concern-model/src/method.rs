//! Typed method chains.
//!
//! A [`Method`] is one value conversion that only some value kinds support
//! (`downcase` works on strings and symbols, not on integers). A
//! [`MethodChain`] runs several in order:
//!
//! - an unsupported step makes the whole chain unsupported (`None`), and the
//!   caller keeps the original value
//! - a step producing null short-circuits the chain to null

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConcernError;
use crate::value::{Symbol, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// String representation; supported by every value.
    ToS,
    /// Interned name from a string or symbol.
    ToSym,
    /// Lowercase a string or symbol.
    Downcase,
    /// Uppercase a string or symbol.
    Upcase,
    /// Trim surrounding whitespace from a string.
    Strip,
    /// Null for an empty string, symbol, array or map.
    NilIfEmpty,
    /// Null for any blank value; supported by every value.
    Presence,
    /// JSON text; null when empty. Strings are taken to be JSON text already.
    ToJson,
}

impl Method {
    pub const ALL: [Self; 8] = [
        Self::ToS,
        Self::ToSym,
        Self::Downcase,
        Self::Upcase,
        Self::Strip,
        Self::NilIfEmpty,
        Self::Presence,
        Self::ToJson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ToS => "to_s",
            Self::ToSym => "to_sym",
            Self::Downcase => "downcase",
            Self::Upcase => "upcase",
            Self::Strip => "strip",
            Self::NilIfEmpty => "nil_if_empty",
            Self::Presence => "presence",
            Self::ToJson => "to_json",
        }
    }

    /// Whether `value` supports this method.
    pub fn supports(self, value: &Value) -> bool {
        match self {
            Self::ToS | Self::Presence | Self::ToJson => true,
            Self::ToSym | Self::Downcase | Self::Upcase => {
                matches!(value, Value::String(_) | Value::Symbol(_))
            }
            Self::Strip => value.is_string(),
            Self::NilIfEmpty => matches!(
                value,
                Value::String(_) | Value::Symbol(_) | Value::Array(_) | Value::Map(_)
            ),
        }
    }

    /// Apply to `value`, `None` when the value does not support it.
    pub fn call(self, value: &Value) -> Option<Value> {
        if !self.supports(value) {
            return None;
        }
        let result = match (self, value) {
            (Self::ToS, v) => Value::String(v.to_display_string()),
            (Self::ToSym, Value::String(s)) => Value::Symbol(Symbol::new(s)),
            (Self::Downcase, Value::String(s)) => Value::String(s.to_lowercase()),
            (Self::Downcase, Value::Symbol(s)) => Value::symbol(s.as_str().to_lowercase()),
            (Self::Upcase, Value::String(s)) => Value::String(s.to_uppercase()),
            (Self::Upcase, Value::Symbol(s)) => Value::symbol(s.as_str().to_uppercase()),
            (Self::Strip, Value::String(s)) => Value::String(s.trim().to_string()),
            (Self::NilIfEmpty, v) if v.is_empty() => Value::Null,
            (Self::Presence, v) if v.is_blank() => Value::Null,
            (Self::ToJson, v) if v.is_empty() => Value::Null,
            (Self::ToJson, Value::String(_)) => value.clone(),
            (Self::ToJson, v) => Value::String(v.to_json().to_string()),
            (_, v) => v.clone(),
        };
        Some(result)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ConcernError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(':');
        Self::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| ConcernError::UnknownMethod(s.to_string()))
    }
}

/// An ordered list of [`Method`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodChain(Vec<Method>);

impl MethodChain {
    pub fn new(methods: impl Into<Vec<Method>>) -> Self {
        Self(methods.into())
    }

    /// Parse a chain from method names.
    pub fn parse<I, S>(names: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<crate::Result<Vec<_>>>()
            .map(Self)
    }

    pub fn methods(&self) -> &[Method] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Run the chain. `None` if any step is unsupported.
    pub fn apply(&self, value: &Value) -> Option<Value> {
        let mut current = value.clone();
        for method in &self.0 {
            if current.is_null() {
                return Some(Value::Null);
            }
            current = method.call(&current)?;
        }
        Some(current)
    }
}

impl From<Method> for MethodChain {
    fn from(method: Method) -> Self {
        Self(vec![method])
    }
}

impl fmt::Display for MethodChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|&method| method.name()).collect();
        f.write_str(&names.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_with_or_without_colon() {
        assert_eq!("to_sym".parse::<Method>().unwrap(), Method::ToSym);
        assert_eq!(":downcase".parse::<Method>().unwrap(), Method::Downcase);
        assert!("reverse".parse::<Method>().is_err());
    }

    #[test]
    fn unsupported_step_fails_the_chain() {
        let chain = MethodChain::new([Method::Downcase, Method::ToSym]);
        assert_eq!(chain.apply(&Value::Int(3)), None);
        assert_eq!(chain.apply(&Value::from("ON")), Some(Value::symbol("on")));
    }

    #[test]
    fn null_short_circuits() {
        let chain = MethodChain::new([Method::NilIfEmpty, Method::ToSym]);
        assert_eq!(chain.apply(&Value::from("")), Some(Value::Null));
    }

    #[test]
    fn displays_as_dotted_chain() {
        let chain = MethodChain::new([Method::ToS, Method::Downcase]);
        assert_eq!(chain.to_string(), "to_s.downcase");
    }
}
