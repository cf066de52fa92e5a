//! Auth endpoints — code delivery and code verification.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::widgets::{LabeledInput, VerificationCodeInput};
use crate::wizard::context::StepContext;
use crate::wizard::nav::Navigation;
use crate::wizard::step::WizardStep;

use super::classify::VerifyMode;
use super::session::{Submission, VerifySession};

/// Shared state for the auth routes: one session per mode.
#[derive(Clone)]
pub struct AuthRouteState {
    pub signup: Arc<VerifySession>,
    pub signin: Arc<VerifySession>,
}

impl AuthRouteState {
    fn session(&self, mode: VerifyMode) -> &Arc<VerifySession> {
        match mode {
            VerifyMode::Signup => &self.signup,
            VerifyMode::Signin => &self.signin,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendCodeBody {
    email: String,
}

#[derive(Debug, Deserialize)]
struct VerifyBody {
    code: String,
}

/// Response for both auth endpoints.
#[derive(Debug, Serialize)]
struct VerifyView {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

/// Code-entry page descriptor.
#[derive(Debug, Serialize)]
struct VerifyPageView {
    heading: &'static str,
    email_input: LabeledInput,
    code_input: VerificationCodeInput,
}

fn unknown_mode(slug: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": format!("Unknown verification mode: {slug}") })),
    )
        .into_response()
}

/// GET /auth/{mode}/verify
async fn verify_page(Path(mode): Path<String>, RawQuery(query): RawQuery) -> impl IntoResponse {
    if mode.parse::<VerifyMode>().is_err() {
        return unknown_mode(&mode);
    };
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    let email = context.email.unwrap_or_default();
    Json(VerifyPageView {
        heading: "Let's Start with ...",
        email_input: LabeledInput::new("email", "Email")
            .with_value(&email)
            .disabled(),
        code_input: VerificationCodeInput::new(&email),
    })
    .into_response()
}

/// POST /auth/{mode}/send
async fn send_code(
    State(state): State<AuthRouteState>,
    Path(mode): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<SendCodeBody>,
) -> impl IntoResponse {
    let Ok(mode) = mode.parse::<VerifyMode>() else {
        return unknown_mode(&mode);
    };
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    match state.session(mode).send_code(&body.email, &context).await {
        Ok(navigation) => Json(VerifyView {
            success: true,
            error: None,
            next: Some(navigation.to_url()),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(mode = %mode, "send-code failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(VerifyView {
                    success: false,
                    error: Some(
                        "Failed to send verification code. Please try again.".to_string(),
                    ),
                    next: None,
                }),
            )
                .into_response()
        }
    }
}

/// POST /auth/{mode}/verify
async fn verify_code(
    State(state): State<AuthRouteState>,
    Path(mode): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<VerifyBody>,
) -> impl IntoResponse {
    let Ok(mode) = mode.parse::<VerifyMode>() else {
        return unknown_mode(&mode);
    };
    let context = StepContext::from_query(query.as_deref().unwrap_or(""));
    let email = context.email.clone().unwrap_or_default();

    // On success the browser moves to the first wizard step, carrying
    // only the display name forward.
    let next = Navigation::new(
        WizardStep::Birthday.path(),
        StepContext::with_name(&context.name).to_query(),
    );

    match state
        .session(mode)
        .submit(&email, &body.code, next.clone())
        .await
    {
        Submission::Ignored => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(VerifyView {
                success: false,
                error: None,
                next: None,
            }),
        )
            .into_response(),
        Submission::Completed(outcome) => Json(VerifyView {
            success: outcome.is_success(),
            error: outcome.user_message().map(String::from),
            next: outcome.is_success().then(|| next.to_url()),
        })
        .into_response(),
    }
}

/// Build the auth routes.
pub fn auth_routes(state: AuthRouteState) -> Router {
    Router::new()
        .route("/auth/{mode}/send", post(send_code))
        .route("/auth/{mode}/verify", get(verify_page).post(verify_code))
        .with_state(state)
}
