//! The fixed onboarding step sequence.

use serde::{Deserialize, Serialize};

/// Steps of the onboarding wizard, in their fixed linear order.
///
/// Progress values and next destinations are hardcoded per page, the
/// way the pages themselves hardcode them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Birthday,
    Education,
    Travel,
    Country,
}

impl WizardStep {
    /// Every step in order.
    pub const ALL: [WizardStep; 4] = [
        Self::Birthday,
        Self::Education,
        Self::Travel,
        Self::Country,
    ];

    /// URL slug of the step page.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Education => "education",
            Self::Travel => "travel",
            Self::Country => "country",
        }
    }

    /// Route path of the step page.
    pub fn path(&self) -> String {
        format!("/info/{}", self.slug())
    }

    /// Progress-bar percentage shown on this page.
    pub fn progress(&self) -> f32 {
        match self {
            Self::Birthday => 7.14,
            Self::Education => 28.56,
            Self::Travel => 42.9,
            Self::Country => 57.18,
        }
    }

    /// The next step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::Birthday => Some(Self::Education),
            Self::Education => Some(Self::Travel),
            Self::Travel => Some(Self::Country),
            Self::Country => None,
        }
    }

    /// Short instruction line under the welcome heading.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Birthday => "We love that you’re here. pick youre birthday date.",
            Self::Education => "Pick your education status.",
            Self::Travel => "Pick your travel style.",
            Self::Country => "Choose your country.",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthday" => Ok(Self::Birthday),
            "education" => Ok(Self::Education),
            "travel" => Ok(Self::Travel),
            "country" => Ok(Self::Country),
            other => Err(format!("Unknown wizard step: {other}")),
        }
    }
}

/// Welcome heading shown on every step page.
pub fn welcome_heading(name: &str) -> String {
    format!("Welcome to Long-Bio, {name}!")
}
