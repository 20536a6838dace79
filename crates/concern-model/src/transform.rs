//! Value-to-value transforms.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ConcernError, Result};
use crate::method::{Method, MethodChain};
use crate::value::Value;

/// Signature of a host-supplied transform.
pub type TransformFn = dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync;

/// A transform applied to field values.
///
/// - [`Transform::Chain`] is capability-checked: it never sees null and an
///   unsupported step leaves the value as it was
/// - [`Transform::Func`] is called on every value, null included, and owns
///   its null handling and errors
#[derive(Clone)]
pub enum Transform {
    Chain(MethodChain),
    Func(Arc<TransformFn>),
}

impl Transform {
    /// Wrap an infallible function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(move |value| -> anyhow::Result<Value> { Ok(f(value)) }))
    }

    /// Wrap a fallible function. Its errors surface as
    /// [`ConcernError::Transform`].
    pub fn try_func<F>(f: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// Build a chain from method names, applied in order.
    pub fn methods<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MethodChain::parse(names).map(Self::Chain)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Func(_))
    }

    /// Apply to one value.
    ///
    /// `Ok(None)` means a chain step was unsupported and the value should be
    /// left untouched.
    pub fn try_apply(&self, value: &Value) -> Result<Option<Value>> {
        match self {
            Self::Chain(chain) => Ok(chain.apply(value)),
            Self::Func(f) => f(value.clone()).map(Some).map_err(ConcernError::from),
        }
    }

    /// Apply to one value, keeping it when a chain step is unsupported.
    pub fn apply(&self, value: Value) -> Result<Value> {
        Ok(self.try_apply(&value)?.unwrap_or(value))
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chain(chain) => f.debug_tuple("Chain").field(&chain.to_string()).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<Method> for Transform {
    fn from(method: Method) -> Self {
        Self::Chain(MethodChain::from(method))
    }
}

impl From<MethodChain> for Transform {
    fn from(chain: MethodChain) -> Self {
        Self::Chain(chain)
    }
}

/// Parses a dotted chain such as `"to_s.downcase"`.
impl FromStr for Transform {
    type Err = ConcernError;

    fn from_str(s: &str) -> Result<Self> {
        Self::methods(s.split('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn func_sees_null() {
        let transform = Transform::func(|v| if v.is_null() { Value::from("x") } else { v });
        assert_eq!(transform.apply(Value::Null).unwrap(), Value::from("x"));
    }

    #[test]
    fn try_func_errors_propagate() {
        let transform = Transform::try_func(|_| Err(anyhow::anyhow!("boom")));
        let err = transform.apply(Value::Int(1)).unwrap_err();
        assert!(matches!(err, ConcernError::Transform(_)));
        assert_eq!(err.to_string(), "transform failed: boom");
    }

    #[test]
    fn dotted_chain_parses() {
        let transform: Transform = "to_s.upcase".parse().unwrap();
        assert_eq!(transform.apply(Value::symbol("on")).unwrap(), Value::from("ON"));
    }

    #[test]
    fn only_functions_are_callable() {
        assert!(Transform::func(|v| v).is_callable());
        assert!(!Transform::from(Method::ToS).is_callable());
    }

    #[test]
    fn unsupported_chain_keeps_value() {
        let transform = Transform::from(Method::Downcase);
        assert_eq!(transform.apply(Value::Int(7)).unwrap(), Value::Int(7));
    }
}
