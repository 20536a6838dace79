//! Shared types for the model concerns.
//!
//! - **value**: dynamically typed field values and interned names
//! - **default**: literal and computed field defaults
//! - **record**: the [`Record`] capability a host model exposes
//! - **issue**: validation issues, reports and message templates
//! - **scope**: named equality queries
//! - **method** / **transform**: typed method chains and value transforms

pub mod default;
pub mod error;
pub mod issue;
pub mod method;
pub mod record;
pub mod scope;
pub mod transform;
pub mod value;

pub use default::{DefaultRule, DefaultValue};
pub use error::{ConcernError, Result};
pub use issue::{
    DEFAULT_BLANK_MESSAGE, DEFAULT_INCLUSION_MESSAGE, IssueKind, MessageTemplate,
    ValidationIssue, ValidationReport,
};
pub use method::{Method, MethodChain};
pub use record::{MemoryRecord, PersistedUpdate, Record};
pub use scope::ScopeQuery;
pub use transform::{Transform, TransformFn};
pub use value::{Symbol, Value};
