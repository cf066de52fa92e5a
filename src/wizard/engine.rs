//! Step submission engine — validate, extend the context, build the
//! next navigation.

use super::context::StepContext;
use super::forms::StepAnswer;
use super::nav::Navigation;
use super::step::WizardStep;
use super::validation::FieldError;

/// Where the wizard sends the user after the last step.
pub const COMPLETE_PATH: &str = "/info/complete";

/// Validate `answer` for `step` and produce the extended context plus
/// the next navigation. The inbound context is never mutated.
pub fn submit(
    step: WizardStep,
    answer: &StepAnswer,
    context: &StepContext,
) -> Result<(StepContext, Navigation), Vec<FieldError>> {
    if answer.step() != step {
        return Err(vec![FieldError::new(
            "step",
            format!("Answer is for step {}, not {}", answer.step(), step),
        )]);
    }
    answer.validate()?;

    let mut next_context = context.clone();
    answer.apply(&mut next_context);
    let navigation = forward(step, &next_context);
    Ok((next_context, navigation))
}

/// Skip `step`: forward navigation, no validation, no persisted answer.
pub fn skip(step: WizardStep, context: &StepContext) -> Navigation {
    forward(step, context)
}

fn forward(step: WizardStep, context: &StepContext) -> Navigation {
    let path = match step.next() {
        Some(next) => next.path(),
        None => COMPLETE_PATH.to_string(),
    };
    Navigation::new(path, context.to_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::{BirthdayForm, CountryForm, TravelForm};
    use chrono::NaiveDate;

    #[test]
    fn submit_extends_context_and_navigates_forward() {
        let context = StepContext::with_name("Sam");
        let answer = StepAnswer::Birthday(BirthdayForm {
            birthday: NaiveDate::from_ymd_opt(2000, 5, 1),
        });

        let (next_context, navigation) =
            submit(WizardStep::Birthday, &answer, &context).unwrap();

        assert_eq!(navigation.path, "/info/education");
        assert!(navigation.query.contains("name=Sam"));
        assert!(navigation.query.contains("birthday=2000-05-01"));
        assert_eq!(next_context.name, "Sam");
        // Inbound context untouched
        assert!(context.birthday.is_none());
    }

    #[test]
    fn invalid_answer_blocks_navigation() {
        let context = StepContext::with_name("Sam");
        let answer = StepAnswer::Travel(TravelForm::default());
        assert!(submit(WizardStep::Travel, &answer, &context).is_err());
    }

    #[test]
    fn mismatched_answer_is_rejected() {
        let context = StepContext::with_name("Sam");
        let answer = StepAnswer::Birthday(BirthdayForm {
            birthday: NaiveDate::from_ymd_opt(2000, 5, 1),
        });
        let errors = submit(WizardStep::Travel, &answer, &context).unwrap_err();
        assert_eq!(errors[0].field, "step");
    }

    #[test]
    fn last_step_navigates_to_completion() {
        let context = StepContext::with_name("Sam");
        let answer = StepAnswer::Country(CountryForm {
            birth_place: "Isfahan".to_string(),
            live_place: "Tehran".to_string(),
        });
        let (_, navigation) = submit(WizardStep::Country, &answer, &context).unwrap();
        assert_eq!(navigation.path, COMPLETE_PATH);
    }

    #[test]
    fn skip_forwards_context_unchanged() {
        let context = StepContext {
            name: "Sam".to_string(),
            birthday: NaiveDate::from_ymd_opt(2000, 5, 1),
            ..Default::default()
        };
        let navigation = skip(WizardStep::Education, &context);
        assert_eq!(navigation.path, "/info/travel");
        // The skipped step writes nothing, earlier answers ride along.
        assert!(navigation.query.contains("birthday=2000-05-01"));
        assert!(!navigation.query.contains("education"));
    }
}
