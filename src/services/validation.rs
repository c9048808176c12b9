//! Field-level input validation
//!
//! Collects every problem with a request body into a map of field name to
//! messages, so a single 400 response can describe all of them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Required text field of 1..=`max_chars` characters after trimming.
///
/// Returns the trimmed value, or records an error and returns `None`.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_chars: Option<usize>,
) -> Option<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.add(field, format!("{field} is required"));
        return None;
    }
    if let Some(max) = max_chars {
        if trimmed.chars().count() > max {
            errors.add(field, format!("{field} must be at most {max} characters"));
            return None;
        }
    }
    Some(trimmed.to_string())
}

/// Optional absolute URL. Empty or whitespace-only input counts as absent.
pub fn optional_url(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    match Url::parse(trimmed) {
        Ok(_) => Some(trimmed.to_string()),
        Err(e) => {
            errors.add(field, format!("{field} must be a valid URL ({e})"));
            None
        }
    }
}

/// Optional free text; empty input counts as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
