//! Forward-only context threaded between wizard steps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::forms::EducationStatus;

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Accumulated answers carried from step to step.
///
/// The browser rendition of the wizard passes these as URL query
/// parameters; each step reads the inbound context and returns an
/// extended copy with its own answers appended. No step reads another
/// step's answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepContext {
    /// Display name collected at signup, echoed in every heading.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub travel_styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_place: Option<String>,
}

impl StepContext {
    /// Context at the start of the wizard: just the signup name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Encode as a URL query string. Only populated fields are emitted;
    /// travel styles repeat the `travel_style` key.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("name", &self.name);
        if let Some(ref email) = self.email {
            query.append_pair("email", email);
        }
        if let Some(birthday) = self.birthday {
            query.append_pair("birthday", &birthday.format(BIRTHDAY_FORMAT).to_string());
        }
        if let Some(ref education) = self.education {
            query.append_pair("education", &education.to_string());
        }
        for style in &self.travel_styles {
            query.append_pair("travel_style", style);
        }
        if let Some(ref country) = self.bucket_country {
            query.append_pair("bucket_country", country);
        }
        if let Some(ref place) = self.birth_place {
            query.append_pair("birth_place", place);
        }
        if let Some(ref place) = self.live_place {
            query.append_pair("live_place", place);
        }
        query.finish()
    }

    /// Decode from a URL query string. Unknown keys and unparseable
    /// values degrade to "unset", never to an error.
    pub fn from_query(query: &str) -> Self {
        let mut context = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "name" => context.name = value.into_owned(),
                "email" => context.email = Some(value.into_owned()),
                "birthday" => {
                    context.birthday = NaiveDate::parse_from_str(&value, BIRTHDAY_FORMAT).ok();
                }
                "education" => context.education = value.parse().ok(),
                "travel_style" => context.travel_styles.push(value.into_owned()),
                "bucket_country" => context.bucket_country = Some(value.into_owned()),
                "birth_place" => context.birth_place = Some(value.into_owned()),
                "live_place" => context.live_place = Some(value.into_owned()),
                _ => {}
            }
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_roundtrip_full_context() {
        let context = StepContext {
            name: "Sam Doe".to_string(),
            email: Some("sam@example.com".to_string()),
            birthday: NaiveDate::from_ymd_opt(2000, 5, 1),
            education: Some(EducationStatus::Graduated),
            travel_styles: vec!["Backpacking".to_string(), "Road Trip".to_string()],
            bucket_country: Some("Japan".to_string()),
            birth_place: Some("Isfahan".to_string()),
            live_place: Some("Tehran".to_string()),
        };

        let parsed = StepContext::from_query(&context.to_query());
        assert_eq!(parsed, context);
    }

    #[test]
    fn name_defaults_to_empty() {
        let context = StepContext::from_query("");
        assert!(context.name.is_empty());
        assert!(context.email.is_none());
        assert!(context.travel_styles.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let context = StepContext::from_query("name=Sam&utm_source=mail&gender=x");
        assert_eq!(context.name, "Sam");
    }

    #[test]
    fn malformed_birthday_degrades_to_unset() {
        let context = StepContext::from_query("name=Sam&birthday=not-a-date");
        assert!(context.birthday.is_none());
    }

    #[test]
    fn query_escapes_reserved_characters() {
        let context = StepContext {
            name: "Sam & Max".to_string(),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let query = context.to_query();
        assert!(!query.contains('@'));
        assert_eq!(StepContext::from_query(&query), context);
    }

    #[test]
    fn custom_education_survives_roundtrip() {
        let context = StepContext {
            name: "Sam".to_string(),
            education: Some(EducationStatus::Custom("bootcamp".to_string())),
            ..Default::default()
        };
        assert_eq!(StepContext::from_query(&context.to_query()), context);
    }
}
