//! The built-in named transforms.
//!
//! Each one is a [`MethodChain`], so it only touches fields that exist and
//! hold a non-null value, and leaves values it cannot convert alone.

use std::fmt;
use std::str::FromStr;

use concern_model::{ConcernError, Method, MethodChain, Record, Transform};
use serde::{Deserialize, Serialize};

use crate::transform::apply_chain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedTransform {
    /// String representation.
    ForceString,
    /// Interned name from a string or symbol.
    ForceSymbol,
    ForceLowercase,
    ForceUppercase,
    /// String representation, empty string collapsed to null.
    ForceStringOrNil,
    /// Like `ForceStringOrNil`, then interned; never yields an empty symbol.
    ForceSymbolOrNil,
    /// Null for empty strings, symbols and containers.
    ForceNilIfEmpty,
    /// Null when empty, strings as-is, anything else encoded as JSON text.
    ForceJsonString,
}

impl NamedTransform {
    pub const ALL: [Self; 8] = [
        Self::ForceString,
        Self::ForceSymbol,
        Self::ForceLowercase,
        Self::ForceUppercase,
        Self::ForceStringOrNil,
        Self::ForceSymbolOrNil,
        Self::ForceNilIfEmpty,
        Self::ForceJsonString,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ForceString => "force_string",
            Self::ForceSymbol => "force_symbol",
            Self::ForceLowercase => "force_lowercase",
            Self::ForceUppercase => "force_uppercase",
            Self::ForceStringOrNil => "force_string_or_nil",
            Self::ForceSymbolOrNil => "force_symbol_or_nil",
            Self::ForceNilIfEmpty => "force_nil_if_empty",
            Self::ForceJsonString => "force_json_string",
        }
    }

    /// The method chain this transform runs.
    pub fn methods(self) -> &'static [Method] {
        match self {
            Self::ForceString => &[Method::ToS],
            Self::ForceSymbol => &[Method::ToSym],
            Self::ForceLowercase => &[Method::Downcase],
            Self::ForceUppercase => &[Method::Upcase],
            Self::ForceStringOrNil => &[Method::ToS, Method::NilIfEmpty],
            Self::ForceSymbolOrNil => &[Method::ToS, Method::NilIfEmpty, Method::ToSym],
            Self::ForceNilIfEmpty => &[Method::NilIfEmpty],
            Self::ForceJsonString => &[Method::ToJson],
        }
    }

    pub fn chain(self) -> MethodChain {
        MethodChain::new(self.methods())
    }

    /// Apply to the named fields of `record`, returning how many were written.
    pub fn apply_to<I, S>(self, record: &mut dyn Record, fields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        apply_chain(record, &self.chain(), fields)
    }
}

impl fmt::Display for NamedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedTransform {
    type Err = ConcernError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(':');
        Self::ALL
            .into_iter()
            .find(|transform| transform.name() == name)
            .ok_or_else(|| ConcernError::UnknownTransform(s.to_string()))
    }
}

impl From<NamedTransform> for Transform {
    fn from(transform: NamedTransform) -> Self {
        Transform::Chain(transform.chain())
    }
}

/// Resolve a transform name: a built-in (`"force_string"`) or a dotted
/// method chain (`"to_s.downcase"`).
pub fn parse_transform(name: &str) -> Result<Transform, ConcernError> {
    if let Ok(named) = name.parse::<NamedTransform>() {
        return Ok(named.into());
    }
    name.parse::<Transform>()
        .map_err(|_| ConcernError::UnknownTransform(name.to_string()))
}

pub fn force_string<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceString.apply_to(record, fields)
}

pub fn force_symbol<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceSymbol.apply_to(record, fields)
}

pub fn force_lowercase<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceLowercase.apply_to(record, fields)
}

pub fn force_uppercase<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceUppercase.apply_to(record, fields)
}

pub fn force_string_or_nil<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceStringOrNil.apply_to(record, fields)
}

pub fn force_symbol_or_nil<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceSymbolOrNil.apply_to(record, fields)
}

pub fn force_nil_if_empty<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceNilIfEmpty.apply_to(record, fields)
}

pub fn force_json_string<I, S>(record: &mut dyn Record, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NamedTransform::ForceJsonString.apply_to(record, fields)
}
