//! Boundary validation for untrusted score input.
//!
//! Every entry point takes an untyped JSON value and returns either the
//! typed, normalized object or a [`ValidationFailure`] listing field-level
//! issues. Nothing here panics on bad input.
//!
//! Validation runs in two phases. The structural phase walks the JSON object
//! with a [`reader::FieldReader`] and reports missing fields, wrong JSON types,
//! unknown enum literals and out-of-range dimensions. When the structure is
//! sound, the typed value is checked against its `validator` rules.

mod reader;
mod schemas;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::score::{ComputeScoreRequest, GetLatestScoreRequest};
use crate::models::ScoreRecord;

pub use reader::FieldReader;

/// A single problem found in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationIssue {
    /// Dotted path of the offending field using wire names; empty for the root
    #[schema(example = "entityType")]
    pub path: String,
    #[schema(example = "Required")]
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Non-empty, ordered list of issues
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", summary(.issues))]
pub struct ValidationFailure {
    issues: Vec<ValidationIssue>,
}

fn summary(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            if issue.path.is_empty() {
                issue.message.clone()
            } else {
                format!("{}: {}", issue.path, issue.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(path, message)],
        }
    }

    /// Returns `None` when there is nothing to report
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// First issue reported for `path`
    pub fn issue_at(&self, path: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues: Vec<ValidationIssue> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                let path = wire_name(field);
                errors.iter().map(move |e| {
                    ValidationIssue::new(
                        path.clone(),
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    )
                })
            })
            .collect();

        issues.sort_by(|a, b| a.path.cmp(&b.path));

        Self::from_issues(issues).unwrap_or_else(|| Self::single("", "Invalid input"))
    }
}

/// Converts a Rust field name to its camelCase wire name.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

pub type ValidationResult<T> = Result<T, ValidationFailure>;

/// Validation of a JSON body
pub trait ValidateInput: Sized {
    fn validate_input(input: &Value) -> ValidationResult<Self>;
}

/// Validation of a query string, where every value arrives as text
pub trait ValidateQuery: Sized {
    fn validate_query(params: &HashMap<String, String>) -> ValidationResult<Self>;
}

pub(crate) fn check_rules<T: Validate>(value: T) -> ValidationResult<T> {
    value.validate()?;
    Ok(value)
}

pub fn validate_score_record(input: &Value) -> ValidationResult<ScoreRecord> {
    ScoreRecord::validate_input(input)
}

pub fn validate_compute_score_request(input: &Value) -> ValidationResult<ComputeScoreRequest> {
    ComputeScoreRequest::validate_input(input)
}

pub fn validate_get_latest_score_request(input: &Value) -> ValidationResult<GetLatestScoreRequest> {
    GetLatestScoreRequest::validate_input(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name("entity_id"), "entityId");
        assert_eq!(wire_name("overall_score"), "overallScore");
        assert_eq!(wire_name("limit"), "limit");
        assert_eq!(wire_name("entityId"), "entityId");
    }

    #[test]
    fn test_empty_issue_list_is_not_a_failure() {
        assert!(ValidationFailure::from_issues(Vec::new()).is_none());
    }

    #[test]
    fn test_display_lists_issues() {
        let failure = ValidationFailure::from_issues(vec![
            ValidationIssue::new("brand", "Required"),
            ValidationIssue::new("", "Expected object, received array"),
        ])
        .unwrap();

        assert_eq!(
            failure.to_string(),
            "validation failed: brand: Required; Expected object, received array"
        );
    }
}
