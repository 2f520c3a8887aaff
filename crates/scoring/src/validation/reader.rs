use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{ValidationFailure, ValidationIssue};
use crate::models::score_record::is_score;
use crate::models::{ClosedSet, ScoreDimensions};

/// Reads typed fields out of an untrusted JSON object, collecting an issue
/// for every field that is missing or has the wrong shape.
///
/// A field that fails to read yields `None`; the failure is recorded and
/// surfaces through [`FieldReader::finish`] or [`FieldReader::into_failure`].
/// `null` on an optional field is treated as absent.
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    issues: Vec<ValidationIssue>,
    lenient: bool,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a Value) -> Self {
        let mut reader = Self {
            object: None,
            issues: Vec::new(),
            lenient: false,
        };

        match input {
            Value::Object(object) => reader.object = Some(object),
            other => reader.push("", format!("Expected object, received {}", type_name(other))),
        }

        reader
    }

    /// Reader for query-string input: integer and boolean fields also accept
    /// their textual form.
    pub fn lenient(input: &'a Value) -> Self {
        Self {
            lenient: true,
            ..Self::new(input)
        }
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// `Ok(())` when every field read so far was valid
    pub fn finish(self) -> Result<(), ValidationFailure> {
        match ValidationFailure::from_issues(self.issues) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    pub fn into_failure(self) -> ValidationFailure {
        ValidationFailure::from_issues(self.issues)
            .unwrap_or_else(|| ValidationFailure::single("", "Invalid input"))
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(name))
            .filter(|value| !value.is_null())
    }

    fn required(&mut self, name: &str) -> Option<&'a Value> {
        let object = self.object?;
        match object.get(name) {
            None => {
                self.push(name, "Required");
                None
            }
            Some(Value::Null) => {
                self.push(name, "Expected a value, received null");
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn required_enum<T: ClosedSet>(&mut self, name: &str) -> Option<T> {
        let value = self.required(name)?;
        self.parse_enum(name, value)
    }

    pub fn optional_enum<T: ClosedSet>(&mut self, name: &str) -> Option<T> {
        let value = self.field(name)?;
        self.parse_enum(name, value)
    }

    fn parse_enum<T: ClosedSet>(&mut self, name: &str, value: &Value) -> Option<T> {
        let Value::String(literal) = value else {
            self.push(name, format!("Expected string, received {}", type_name(value)));
            return None;
        };

        let parsed = T::from_literal(literal);
        if parsed.is_none() {
            self.push(
                name,
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    T::expected(),
                    literal
                ),
            );
        }
        parsed
    }

    pub fn required_integer(&mut self, name: &str) -> Option<i64> {
        let value = self.required(name)?;
        self.parse_integer(name, value)
    }

    pub fn optional_integer(&mut self, name: &str) -> Option<i64> {
        let value = self.field(name)?;
        self.parse_integer(name, value)
    }

    fn parse_integer(&mut self, name: &str, value: &Value) -> Option<i64> {
        match value {
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Some(integer)
                } else if number.is_u64() {
                    self.push(name, format!("Number must be less than or equal to {}", i64::MAX));
                    None
                } else {
                    self.push(name, "Expected integer, received float");
                    None
                }
            }
            Value::String(text) if self.lenient => match text.trim().parse::<i64>() {
                Ok(integer) => Some(integer),
                Err(_) => {
                    self.push(name, format!("Expected integer, received '{text}'"));
                    None
                }
            },
            other => {
                self.push(name, format!("Expected integer, received {}", type_name(other)));
                None
            }
        }
    }

    pub fn required_number(&mut self, name: &str) -> Option<f64> {
        let value = self.required(name)?;
        match value {
            Value::Number(number) => number.as_f64(),
            other => {
                self.push(name, format!("Expected number, received {}", type_name(other)));
                None
            }
        }
    }

    pub fn optional_bool(&mut self, name: &str) -> Option<bool> {
        let value = self.field(name)?;
        match value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) if self.lenient && (text == "true" || text == "false") => {
                Some(text == "true")
            }
            other => {
                self.push(name, format!("Expected boolean, received {}", type_name(other)));
                None
            }
        }
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        let value = self.field(name)?;
        match value {
            Value::String(text) => Some(text.clone()),
            other => {
                self.push(name, format!("Expected string, received {}", type_name(other)));
                None
            }
        }
    }

    pub fn optional_uuid(&mut self, name: &str) -> Option<Uuid> {
        let text = self.optional_string(name)?;
        match Uuid::parse_str(&text) {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(name, "Invalid uuid");
                None
            }
        }
    }

    pub fn optional_timestamp(&mut self, name: &str) -> Option<DateTime<Utc>> {
        let text = self.optional_string(name)?;
        match DateTime::parse_from_rfc3339(&text) {
            Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
            Err(_) => {
                self.push(name, "Invalid datetime, expected RFC 3339");
                None
            }
        }
    }

    /// Reads a `name -> score` object. Each entry is checked on its own and
    /// reported at `<name>.<key>`.
    pub fn dimensions(&mut self, name: &str) -> Option<ScoreDimensions> {
        let value = self.required(name)?;
        let Value::Object(entries) = value else {
            self.push(name, format!("Expected object, received {}", type_name(value)));
            return None;
        };

        let mut values = BTreeMap::new();
        let mut valid = true;
        for (key, entry) in entries {
            let path = format!("{name}.{key}");
            match entry.as_f64() {
                Some(score) if is_score(score) => {
                    values.insert(key.clone(), score);
                }
                Some(_) => {
                    self.push(path, "Number must be between 0 and 10");
                    valid = false;
                }
                None => {
                    self.push(path, format!("Expected number, received {}", type_name(entry)));
                    valid = false;
                }
            }
        }

        if !valid {
            return None;
        }

        match ScoreDimensions::new(values) {
            Ok(dimensions) => Some(dimensions),
            Err(err) => {
                self.push(format!("{name}.{}", err.name), "Number must be between 0 and 10");
                None
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
