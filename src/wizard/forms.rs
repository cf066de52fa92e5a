//! Per-step form payloads and their validation rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::context::StepContext;
use super::step::WizardStep;
use super::validation::{FieldError, Validator, place_name_pattern};

/// Travel style chips offered on the travel step.
pub const TRAVEL_STYLES: [&str; 9] = [
    "Luxury Travel",
    "Backpacking",
    "Adventure Travel",
    "Cultural Travel",
    "Road Trip",
    "Eco-Tourism",
    "Solo Travel",
    "Family Travel",
    "Volunteer Travel",
];

/// Education status options. `Custom` entries come from the page's
/// "add more" box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationStatus {
    Student,
    Graduated,
    NotInterested,
    Custom(String),
}

impl std::fmt::Display for EducationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Graduated => write!(f, "graduated"),
            Self::NotInterested => write!(f, "not-interested"),
            Self::Custom(label) => write!(f, "{label}"),
        }
    }
}

impl EducationStatus {
    fn from_slug(slug: &str) -> Self {
        match slug {
            "student" => Self::Student,
            "graduated" => Self::Graduated,
            "not-interested" => Self::NotInterested,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for EducationStatus {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_slug(s))
    }
}

impl From<String> for EducationStatus {
    fn from(s: String) -> Self {
        Self::from_slug(&s)
    }
}

impl From<EducationStatus> for String {
    fn from(status: EducationStatus) -> Self {
        status.to_string()
    }
}

/// Birthday step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthdayForm {
    pub birthday: Option<NaiveDate>,
}

impl BirthdayForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require_choice("birthday", &self.birthday, "Please select your birthday");
        v.finish()
    }

    pub fn apply(&self, context: &mut StepContext) {
        context.birthday = self.birthday;
    }
}

/// Education step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationForm {
    pub education: Option<EducationStatus>,
}

impl EducationForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require_choice(
            "education",
            &self.education,
            "Please select your education status",
        );
        v.finish()
    }

    pub fn apply(&self, context: &mut StepContext) {
        context.education = self.education.clone();
    }
}

/// Travel step payload: style chips plus a bucket-list country.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelForm {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub country: String,
}

impl TravelForm {
    /// Combined error when neither a style nor a country is given.
    pub const COMBINED_ERROR: &'static str = "Select at least one travel style or a country.";

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let satisfied = !self.styles.is_empty() || !self.country.trim().is_empty();
        let mut v = Validator::new();
        v.require_any("form", satisfied, Self::COMBINED_ERROR);
        v.finish()
    }

    pub fn apply(&self, context: &mut StepContext) {
        context.travel_styles = self.styles.clone();
        let country = self.country.trim();
        if !country.is_empty() {
            context.bucket_country = Some(country.to_string());
        }
    }
}

/// Country step payload: birthplace and current residence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryForm {
    #[serde(default)]
    pub birth_place: String,
    #[serde(default)]
    pub live_place: String,
}

impl CountryForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let pattern = place_name_pattern();
        let mut v = Validator::new();
        v.require_text(
            "birth_place",
            &self.birth_place,
            "Entering place of birth is required.",
        )
        .require_pattern(
            "birth_place",
            &self.birth_place,
            pattern,
            "Only letters and spaces are allowed.",
        )
        .require_text(
            "live_place",
            &self.live_place,
            "Entering your place of residence is required.",
        )
        .require_pattern(
            "live_place",
            &self.live_place,
            pattern,
            "Only letters and spaces are allowed.",
        );
        v.finish()
    }

    pub fn apply(&self, context: &mut StepContext) {
        context.birth_place = Some(self.birth_place.trim().to_string());
        context.live_place = Some(self.live_place.trim().to_string());
    }
}

/// One step's submitted answer, tagged with the step it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepAnswer {
    Birthday(BirthdayForm),
    Education(EducationForm),
    Travel(TravelForm),
    Country(CountryForm),
}

impl StepAnswer {
    /// The step this answer belongs to.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Birthday(_) => WizardStep::Birthday,
            Self::Education(_) => WizardStep::Education,
            Self::Travel(_) => WizardStep::Travel,
            Self::Country(_) => WizardStep::Country,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        match self {
            Self::Birthday(form) => form.validate(),
            Self::Education(form) => form.validate(),
            Self::Travel(form) => form.validate(),
            Self::Country(form) => form.validate(),
        }
    }

    /// Write this step's answer into the context.
    pub fn apply(&self, context: &mut StepContext) {
        match self {
            Self::Birthday(form) => form.apply(context),
            Self::Education(form) => form.apply(context),
            Self::Travel(form) => form.apply(context),
            Self::Country(form) => form.apply(context),
        }
    }
}
