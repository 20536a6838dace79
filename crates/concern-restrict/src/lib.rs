//! Restricted value sets for model attributes.
//!
//! A restricted attribute only takes values from a closed list. Registering
//! one produces, per permitted value:
//!
//! - a **query** predicate (`power_on?`)
//! - an **assign** action (`power_on!`)
//! - an equality **scope** (`power_on`)
//!
//! plus an optional default, a setter transform and an inclusion
//! validation descriptor. Each helper group can be renamed or switched off
//! through [`RestrictedValueConfig`].

pub mod attribute;
pub mod config;
pub mod prefix;
pub mod registry;
pub mod validation;

pub use attribute::{RestrictedAttribute, ValueHelper, register};
pub use config::{RestrictedValueConfig, ValidationMode};
pub use prefix::{PrefixGroup, PrefixSetting, helper_name, value_suffix};
pub use registry::RestrictedRegistry;
pub use validation::InclusionValidation;
