//! Field-level validation for inbound entity payloads.
//!
//! # Responsibility
//! - Read typed fields out of untrusted JSON objects.
//! - Collect every failing field (not just the first) into one error.
//!
//! # Invariants
//! - Missing or `null` required fields are reported as `field required`.
//! - Absent list fields default to an empty list; `null` lists are rejected.
//! - String fields never coerce numbers or booleans.
//! - Nested paths use dot notation with list indexes (`certifications.0.pdf_url`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_URL_CHARS: usize = 2083;

static HTTP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?)://(?:[^\s/?#@]+@)?(?:\[[0-9A-Fa-f:.]+\]|[^\s/?#@:\[\]]+)(?::(?P<port>\d{1,5}))?(?:[/?#]\S*)?$")
        .expect("valid url regex")
});

/// One failing field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dot-separated path of the offending field.
    pub field: String,
    /// Why the value was rejected.
    pub message: String,
}

/// Validation failure carrying all offending fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Builds an error for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns whether `field` is among the failing paths.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for (index, issue) in self.issues.iter().enumerate() {
            let separator = if index == 0 { " " } else { "; " };
            write!(f, "{separator}{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Returns whether `value` is a well-formed absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    if value.is_empty() || value.chars().count() > MAX_URL_CHARS {
        return false;
    }
    let Some(captures) = HTTP_URL_RE.captures(value) else {
        return false;
    };
    captures
        .name("port")
        .map_or(true, |port| port.as_str().parse::<u16>().is_ok())
}

/// Cursor over one JSON object that accumulates field issues.
///
/// Accessors always return a usable value (empty/default on failure) so that
/// parsing continues and every problem is reported in one pass.
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    prefix: String,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    /// Starts reading a top-level payload.
    pub fn new(value: &'a Value) -> Self {
        Self::nested(value, "")
    }

    /// Starts reading an embedded object located at `prefix`.
    pub fn nested(value: &'a Value, prefix: &str) -> Self {
        let mut reader = Self {
            object: value.as_object(),
            prefix: prefix.to_string(),
            issues: Vec::new(),
        };
        if reader.object.is_none() {
            let path = if prefix.is_empty() { "body" } else { prefix };
            reader.push(path.to_string(), "expected an object");
        }
        reader
    }

    pub fn required_str(&mut self, field: &str) -> String {
        match self.get(field) {
            None => {
                self.fail(field, "field required");
                String::new()
            }
            Some(Value::String(text)) => text.clone(),
            Some(_) => {
                self.fail(field, "expected a string");
                String::new()
            }
        }
    }

    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            None => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.fail(field, "expected a string");
                None
            }
        }
    }

    pub fn required_url(&mut self, field: &str) -> String {
        let value = self.required_str(field);
        if self.get(field).is_some_and(Value::is_string) && !is_http_url(&value) {
            self.fail(field, "expected a valid http(s) URL");
        }
        value
    }

    pub fn optional_url(&mut self, field: &str) -> Option<String> {
        let value = self.optional_str(field)?;
        if !is_http_url(&value) {
            self.fail(field, "expected a valid http(s) URL");
        }
        Some(value)
    }

    pub fn str_list(&mut self, field: &str) -> Vec<String> {
        let Some(items) = self.list(field) else {
            return Vec::new();
        };
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(text) => values.push(text.clone()),
                _ => self.fail(&format!("{field}.{index}"), "expected a string"),
            }
        }
        values
    }

    /// Reads a list of embedded objects, parsing each with `parse`.
    ///
    /// `parse` receives the item and its full path; issues it reports are
    /// merged into this reader.
    pub fn object_list<T>(
        &mut self,
        field: &str,
        parse: impl Fn(&Value, &str) -> Result<T, ValidationError>,
    ) -> Vec<T> {
        let Some(items) = self.list(field) else {
            return Vec::new();
        };
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = format!("{}.{index}", self.path(field));
            match parse(item, &path) {
                Ok(value) => values.push(value),
                Err(err) => self.issues.extend(err.issues),
            }
        }
        values
    }

    /// Reads an optional integer that must be at least `min` when present.
    ///
    /// Whole floats, numeric strings and booleans (`true` = 1) are coerced.
    pub fn optional_int_at_least(&mut self, field: &str, min: i64) -> Option<i64> {
        let value = match self.get(field)? {
            Value::Number(number) => number.as_i64().or_else(|| whole_float(number.as_f64()?)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| whole_float(text.parse::<f64>().ok()?))
            }
            Value::Bool(flag) => Some(i64::from(*flag)),
            _ => None,
        };
        match value {
            Some(value) if value >= min => Some(value),
            Some(_) => {
                self.fail(field, &format!("must be greater than or equal to {min}"));
                None
            }
            None => {
                self.fail(field, "expected an integer");
                None
            }
        }
    }

    /// Consumes the reader, yielding `value` when no issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }

    /// Present and non-null value for `field`.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.object?.get(field).filter(|value| !value.is_null())
    }

    fn list(&mut self, field: &str) -> Option<&'a Vec<Value>> {
        let object = self.object?;
        match object.get(field) {
            None => None,
            Some(Value::Array(items)) => Some(items),
            Some(_) => {
                self.fail(field, "expected a list");
                None
            }
        }
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.prefix)
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        // A non-object payload is already reported once at its own path.
        if self.object.is_none() {
            return;
        }
        let path = self.path(field);
        self.push(path, message);
    }

    fn push(&mut self, field: String, message: &str) {
        self.issues.push(FieldIssue {
            field,
            message: message.to_string(),
        });
    }
}

fn whole_float(float: f64) -> Option<i64> {
    (float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64)
        .then_some(float as i64)
}
