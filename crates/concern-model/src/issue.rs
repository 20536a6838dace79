use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Default message for a value outside the permitted set.
pub const DEFAULT_INCLUSION_MESSAGE: &str = "%{value} is not a valid %{attribute}";

/// Default message for a missing required value.
pub const DEFAULT_BLANK_MESSAGE: &str = "%{attribute} can't be blank";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// A required value is null or blank.
    Blank,
    /// The value is not one of the permitted values.
    Inclusion,
}

/// A validation message with `%{attribute}` and `%{value}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpolate the attribute name and the offending value.
    pub fn render(&self, attribute: &str, value: &Value) -> String {
        self.0
            .replace("%{attribute}", attribute)
            .replace("%{value}", &value.to_display_string())
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_INCLUSION_MESSAGE)
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Attribute the failure belongs to.
    pub attribute: String,
    pub kind: IssueKind,
    /// The value that failed validation.
    pub value: Value,
    /// Human-readable message, already interpolated.
    pub message: String,
}

/// All validation failures found on one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    /// Issues reported against one attribute.
    pub fn issues_for<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.attribute == attribute)
    }
}

impl Extend<ValidationIssue> for ValidationReport {
    fn extend<T: IntoIterator<Item = ValidationIssue>>(&mut self, iter: T) {
        self.issues.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_interpolates_value_and_attribute() {
        let template = MessageTemplate::default();
        assert_eq!(
            template.render("power", &Value::from("invalid")),
            "invalid is not a valid power"
        );
    }

    #[test]
    fn report_counts_by_attribute() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());
        report.add(ValidationIssue {
            attribute: "power".to_string(),
            kind: IssueKind::Inclusion,
            value: Value::from("x"),
            message: "x is not a valid power".to_string(),
        });
        report.add(ValidationIssue {
            attribute: "mode".to_string(),
            kind: IssueKind::Blank,
            value: Value::Null,
            message: "mode can't be blank".to_string(),
        });
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.issues_for("power").count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn report_serializes() {
        let mut report = ValidationReport::new();
        report.add(ValidationIssue {
            attribute: "power".to_string(),
            kind: IssueKind::Blank,
            value: Value::Null,
            message: "power can't be blank".to_string(),
        });
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: ValidationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
