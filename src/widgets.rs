//! Shared input widget view-models.
//!
//! Presentation-only `{value, error}`-shaped contracts the step pages
//! serialize for the frontend. No widget performs network or routing
//! side effects.

use serde::Serialize;

/// Thin progress bar at the top of each step page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBar {
    pub value: f32,
}

/// Text input with a floating label.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledInput {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub disabled: bool,
}

impl LabeledInput {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: None,
            value: String::new(),
            error: None,
            disabled: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Single-choice checkbox row.
#[derive(Debug, Clone, Serialize)]
pub struct SelectableOption {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

impl SelectableOption {
    pub fn new(id: &str, label: &str, checked: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            checked,
        }
    }
}

/// Multi-select chip.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleChip {
    pub label: String,
    pub pressed: bool,
}

impl ToggleChip {
    pub fn new(label: &str, pressed: bool) -> Self {
        Self {
            label: label.to_string(),
            pressed,
        }
    }
}

/// Code entry box on the verification page.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationCodeInput {
    pub email: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_success: bool,
}

impl VerificationCodeInput {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            value: String::new(),
            error: None,
            is_success: false,
        }
    }
}
