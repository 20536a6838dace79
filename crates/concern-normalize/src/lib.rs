//! Attribute defaults and declarative value normalization.
//!
//! - **defaults**: fill null fields from literal or computed defaults
//! - **named**: the built-in `force_*` transforms
//! - **transform**: applying a transform to a list of fields
//! - **pipeline**: per-type declarations tying the two phases together

pub mod defaults;
pub mod named;
pub mod pipeline;
pub mod transform;

pub use defaults::{Defaults, initialize_defaults};
pub use named::{
    NamedTransform, force_json_string, force_lowercase, force_nil_if_empty, force_string,
    force_string_or_nil, force_symbol, force_symbol_or_nil, force_uppercase, parse_transform,
};
pub use pipeline::{NormalizeHook, Normalizer, TransformSpec, TransformStep};
pub use transform::apply_transform;

// Re-export the shared model types used in this crate's signatures
pub use concern_model::{
    DefaultRule, DefaultValue, Method, MethodChain, Record, Transform, Value,
};
