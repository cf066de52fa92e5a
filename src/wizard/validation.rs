//! Declarative field validation for wizard forms.
//!
//! Every rule is synchronous and local; a failed validation blocks the
//! submission and never reaches the network.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Letters and whitespace only, Latin plus the Persian script range.
static PLACE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Zآ-ی\s]+$").expect("place-name pattern compiles")
});

/// The place-name pattern used by the country step.
pub fn place_name_pattern() -> &'static Regex {
    &PLACE_NAME
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects the declarative per-field checks for one form submission.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required free-text field.
    pub fn require_text(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Free-text field that must match `pattern`. Checked only when the
    /// field is non-empty, so the required check reports first.
    pub fn require_pattern(
        &mut self,
        field: &str,
        value: &str,
        pattern: &Regex,
        message: &str,
    ) -> &mut Self {
        if !value.trim().is_empty() && !pattern.is_match(value) {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Required single-choice field.
    pub fn require_choice<T>(&mut self, field: &str, value: &Option<T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Cross-field rule: `satisfied` must hold across the named fields.
    pub fn require_any(&mut self, field: &str, satisfied: bool, message: &str) -> &mut Self {
        if !satisfied {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Ok when every check passed, otherwise all collected errors.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
