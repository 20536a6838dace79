//! Validation descriptor for a restricted attribute.

use concern_model::{
    DEFAULT_BLANK_MESSAGE, IssueKind, MessageTemplate, ValidationIssue, Value,
};
use serde::Serialize;

use crate::config::ValidationMode;

/// Declarative presence + inclusion check, handed to the host's validation
/// layer or run directly with [`InclusionValidation::check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InclusionValidation {
    pub attribute: String,
    /// Whether a blank value is an error on its own.
    pub presence: bool,
    /// Accepted values. For optional validation this includes null and `""`.
    pub inclusion: Vec<Value>,
    pub message: MessageTemplate,
}

impl InclusionValidation {
    /// Build the descriptor for a mode; `None` when validation is disabled.
    pub fn for_mode(
        mode: ValidationMode,
        attribute: &str,
        values: &[Value],
        message: MessageTemplate,
    ) -> Option<Self> {
        let (presence, inclusion) = match mode {
            ValidationMode::Disabled => return None,
            ValidationMode::Required => (true, values.to_vec()),
            ValidationMode::Optional => {
                let mut inclusion = vec![Value::Null, Value::from("")];
                inclusion.extend(values.iter().cloned());
                (false, inclusion)
            }
        };
        Some(Self {
            attribute: attribute.to_string(),
            presence,
            inclusion,
            message,
        })
    }

    pub fn permits(&self, value: &Value) -> bool {
        self.inclusion.contains(value)
    }

    /// Issues for one value; empty when it passes.
    pub fn check(&self, value: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.presence && value.is_blank() {
            issues.push(ValidationIssue {
                attribute: self.attribute.clone(),
                kind: IssueKind::Blank,
                value: value.clone(),
                message: MessageTemplate::new(DEFAULT_BLANK_MESSAGE).render(&self.attribute, value),
            });
        }
        if !self.permits(value) {
            issues.push(ValidationIssue {
                attribute: self.attribute.clone(),
                kind: IssueKind::Inclusion,
                value: value.clone(),
                message: self.message.render(&self.attribute, value),
            });
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Vec<Value> {
        vec![Value::from("on"), Value::from("off")]
    }

    #[test]
    fn disabled_builds_nothing() {
        let descriptor = InclusionValidation::for_mode(
            ValidationMode::Disabled,
            "power",
            &values(),
            MessageTemplate::default(),
        );
        assert!(descriptor.is_none());
    }

    #[test]
    fn required_reports_blank_and_inclusion() {
        let descriptor = InclusionValidation::for_mode(
            ValidationMode::Required,
            "power",
            &values(),
            MessageTemplate::default(),
        )
        .unwrap();

        let issues = descriptor.check(&Value::Null);
        let kinds: Vec<_> = issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![IssueKind::Blank, IssueKind::Inclusion]);
        assert_eq!(issues[0].message, "power can't be blank");
        assert!(descriptor.check(&Value::from("on")).is_empty());
    }

    #[test]
    fn optional_accepts_blank() {
        let descriptor = InclusionValidation::for_mode(
            ValidationMode::Optional,
            "power",
            &values(),
            MessageTemplate::new("%{attribute} cannot be %{value}"),
        )
        .unwrap();

        assert!(descriptor.check(&Value::Null).is_empty());
        assert!(descriptor.check(&Value::from("")).is_empty());
        let issues = descriptor.check(&Value::from("invalid"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "power cannot be invalid");
    }
}
