//! Step page endpoints — descriptors, submissions, and skips.

use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::widgets::{LabeledInput, ProgressBar, SelectableOption, ToggleChip};

use super::context::StepContext;
use super::engine;
use super::forms::{EducationStatus, StepAnswer, TRAVEL_STYLES};
use super::step::{WizardStep, welcome_heading};
use super::validation::FieldError;

/// Widgets a step page renders, tagged by kind.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "widget")]
pub enum StepWidget {
    LabeledInput(LabeledInput),
    SelectableOption(SelectableOption),
    ToggleChip(ToggleChip),
}

/// Step page descriptor returned by `GET /info/{step}`.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub progress: ProgressBar,
    pub heading: String,
    pub prompt: &'static str,
    pub hint: &'static str,
    pub widgets: Vec<StepWidget>,
}

fn step_view(step: WizardStep, context: &StepContext) -> StepView {
    StepView {
        progress: ProgressBar {
            value: step.progress(),
        },
        heading: welcome_heading(&context.name),
        prompt: step.prompt(),
        hint: "You can always update this later",
        widgets: step_widgets(step, context),
    }
}

fn step_widgets(step: WizardStep, context: &StepContext) -> Vec<StepWidget> {
    match step {
        WizardStep::Birthday => {
            let value = context
                .birthday
                .map(|d| d.to_string())
                .unwrap_or_default();
            vec![StepWidget::LabeledInput(
                LabeledInput::new("birthday", "Your birthday").with_value(&value),
            )]
        }
        WizardStep::Education => {
            let selected = |status: EducationStatus| context.education.as_ref() == Some(&status);
            vec![
                StepWidget::SelectableOption(SelectableOption::new(
                    "student",
                    "Student",
                    selected(EducationStatus::Student),
                )),
                StepWidget::SelectableOption(SelectableOption::new(
                    "graduated",
                    "Graduated",
                    selected(EducationStatus::Graduated),
                )),
                StepWidget::SelectableOption(SelectableOption::new(
                    "not-interested",
                    "Not interested in education",
                    selected(EducationStatus::NotInterested),
                )),
            ]
        }
        WizardStep::Travel => {
            let mut widgets: Vec<StepWidget> = TRAVEL_STYLES
                .iter()
                .map(|style| {
                    StepWidget::ToggleChip(ToggleChip::new(
                        style,
                        context.travel_styles.iter().any(|s| s == style),
                    ))
                })
                .collect();
            widgets.push(StepWidget::LabeledInput(
                LabeledInput::new("country", "Which countries are on your bucket list?")
                    .with_placeholder("Choose between countries")
                    .with_value(context.bucket_country.as_deref().unwrap_or_default()),
            ));
            widgets
        }
        WizardStep::Country => vec![
            StepWidget::LabeledInput(
                LabeledInput::new("birth_place", "The place where you were born")
                    .with_placeholder("Exp: Isfahan")
                    .with_value(context.birth_place.as_deref().unwrap_or_default()),
            ),
            StepWidget::LabeledInput(
                LabeledInput::new("live_place", "The place where you live")
                    .with_placeholder("Exp: Tehran")
                    .with_value(context.live_place.as_deref().unwrap_or_default()),
            ),
        ],
    }
}

#[derive(Debug, Serialize)]
struct NextView {
    next: String,
}

#[derive(Debug, Serialize)]
struct ErrorsView {
    errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
struct CompleteView {
    heading: String,
    complete: bool,
}

fn unknown_step(slug: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": format!("Unknown wizard step: {slug}") })),
    )
        .into_response()
}

/// GET /info/{step}
async fn get_step(Path(slug): Path<String>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    if slug == "complete" {
        return Json(CompleteView {
            heading: welcome_heading(&context.name),
            complete: true,
        })
        .into_response();
    }
    let Ok(step) = slug.parse::<WizardStep>() else {
        return unknown_step(&slug);
    };
    Json(step_view(step, &context)).into_response()
}

/// POST /info/{step}
async fn submit_step(
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
    Json(answer): Json<StepAnswer>,
) -> impl IntoResponse {
    let Ok(step) = slug.parse::<WizardStep>() else {
        return unknown_step(&slug);
    };
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    match engine::submit(step, &answer, &context) {
        Ok((_, navigation)) => Json(NextView {
            next: navigation.to_url(),
        })
        .into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorsView { errors }),
        )
            .into_response(),
    }
}

/// POST /info/{step}/skip
async fn skip_step(Path(slug): Path<String>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let Ok(step) = slug.parse::<WizardStep>() else {
        return unknown_step(&slug);
    };
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    Json(NextView {
        next: engine::skip(step, &context).to_url(),
    })
    .into_response()
}

/// Build the wizard step routes.
pub fn wizard_routes() -> Router {
    Router::new()
        .route("/info/{step}", get(get_step).post(submit_step))
        .route("/info/{step}/skip", post(skip_step))
}
