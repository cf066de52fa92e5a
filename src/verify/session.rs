//! Verification session — drives one attempt at a time and pushes the
//! success navigation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::error::VerifyError;
use crate::wizard::context::StepContext;
use crate::wizard::nav::{Navigation, Navigator};

use super::classify::{self, VerifyMode, VerifyOutcome, messages};
use super::client::{SendCodeRequest, VerifyApi, VerifyRequest};
use super::state::{Attempt, AttemptPhase};

/// Result of a [`VerifySession::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The attempt ran to a terminal outcome.
    Completed(VerifyOutcome),
    /// An attempt was already in flight; this call was dropped.
    Ignored,
}

/// Drives verification attempts for one wizard instance.
///
/// At most one verify request is in flight at a time. The guard lives
/// here rather than in the submit button, so a rapid double-click
/// cannot race two requests no matter what the caller does.
pub struct VerifySession {
    api: Arc<dyn VerifyApi>,
    navigator: Arc<dyn Navigator>,
    mode: VerifyMode,
    success_delay: Duration,
    in_flight: AtomicBool,
    attempt: Mutex<Attempt>,
}

impl VerifySession {
    pub fn new(
        api: Arc<dyn VerifyApi>,
        navigator: Arc<dyn Navigator>,
        mode: VerifyMode,
        success_delay: Duration,
    ) -> Self {
        Self {
            api,
            navigator,
            mode,
            success_delay,
            in_flight: AtomicBool::new(false),
            attempt: Mutex::new(Attempt::new()),
        }
    }

    pub fn mode(&self) -> VerifyMode {
        self.mode
    }

    /// Current phase of the active attempt.
    pub async fn phase(&self) -> AttemptPhase {
        self.attempt.lock().await.phase.clone()
    }

    /// Submit `code` for `email`; on success, push `next` after the
    /// configured delay.
    ///
    /// Returns [`Submission::Ignored`] while a previous attempt is
    /// pending — the at-most-one-in-flight guarantee does not rely on
    /// the caller disabling its submit control.
    pub async fn submit(&self, email: &str, code: &str, next: Navigation) -> Submission {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(email, "verify submit ignored: attempt already in flight");
            return Submission::Ignored;
        }

        let outcome = self.run_attempt(email, code).await;

        if outcome.is_success() {
            if !self.success_delay.is_zero() {
                // Give the success indicator a beat to render.
                tokio::time::sleep(self.success_delay).await;
            }
            self.navigator.push(&next).await;
        }

        self.in_flight.store(false, Ordering::Release);
        Submission::Completed(outcome)
    }

    async fn run_attempt(&self, email: &str, code: &str) -> VerifyOutcome {
        let mut attempt = self.attempt.lock().await;
        if attempt.phase.is_settled() {
            attempt.reset();
        }
        let attempt_id = attempt.id;

        let code = code.trim();
        if code.is_empty() {
            // Local failure: settled without ever entering Pending, and
            // without a network call.
            let outcome = VerifyOutcome::InvalidCode {
                message: messages::EMPTY_CODE.to_string(),
            };
            if let Err(e) = attempt.settle(outcome.clone()) {
                tracing::warn!(%attempt_id, "attempt state error: {e}");
            }
            return outcome;
        }

        if let Err(e) = attempt.begin() {
            tracing::warn!(%attempt_id, "attempt state error: {e}");
        }
        drop(attempt);

        tracing::debug!(%attempt_id, email, mode = %self.mode, "verify attempt started");

        let request = VerifyRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        let outcome = match self.api.verify_code(&request).await {
            Ok(response) => classify::classify(self.mode, &response),
            Err(e) => {
                tracing::warn!(%attempt_id, "verify transport failure: {e}");
                VerifyOutcome::NetworkError {
                    message: messages::NETWORK_FAILURE.to_string(),
                }
            }
        };

        let mut attempt = self.attempt.lock().await;
        if let Err(e) = attempt.settle(outcome.clone()) {
            tracing::warn!(%attempt_id, "attempt state error: {e}");
        }
        tracing::debug!(%attempt_id, outcome = ?outcome, "verify attempt settled");
        outcome
    }

    /// Request delivery of a code to `email`, then push a navigation to
    /// this mode's code-entry page with the context carried forward.
    pub async fn send_code(
        &self,
        email: &str,
        context: &StepContext,
    ) -> Result<Navigation, VerifyError> {
        let request = SendCodeRequest {
            email: email.to_string(),
            purpose: self.mode,
        };
        self.api.send_code(&request).await?;

        let mut forwarded = context.clone();
        forwarded.email = Some(email.to_string());
        let navigation = Navigation::new(
            format!("/auth/{}/verify", self.mode),
            forwarded.to_query(),
        );
        self.navigator.push(&navigation).await;
        Ok(navigation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::Semaphore;

    use super::*;
    use crate::verify::classify::VerifyData;
    use crate::verify::classify::VerifyResponse;

    /// Scriptable in-memory API: counts calls, optionally parks each
    /// verify call until a permit is released.
    struct ScriptedApi {
        response: std::sync::Mutex<Result<VerifyResponse, VerifyError>>,
        calls: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedApi {
        fn returning(response: VerifyResponse) -> Self {
            Self {
                response: std::sync::Mutex::new(Ok(response)),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn failing(error: VerifyError) -> Self {
            Self {
                response: std::sync::Mutex::new(Err(error)),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(response: VerifyResponse, gate: Arc<Semaphore>) -> Self {
            Self {
                response: std::sync::Mutex::new(Ok(response)),
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn scripted(&self) -> Result<VerifyResponse, VerifyError> {
            match &*self.response.lock().unwrap() {
                Ok(response) => Ok(response.clone()),
                Err(VerifyError::Transport { reason }) => Err(VerifyError::Transport {
                    reason: reason.clone(),
                }),
                Err(VerifyError::SendFailed { reason }) => Err(VerifyError::SendFailed {
                    reason: reason.clone(),
                }),
                Err(VerifyError::InvalidBody { reason }) => Err(VerifyError::InvalidBody {
                    reason: reason.clone(),
                }),
            }
        }
    }

    #[async_trait::async_trait]
    impl VerifyApi for ScriptedApi {
        async fn send_code(&self, _request: &SendCodeRequest) -> Result<(), VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.scripted().map(|_| ())
        }

        async fn verify_code(&self, _request: &VerifyRequest) -> Result<VerifyResponse, VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ref gate) = self.gate {
                let permit = gate.acquire().await.expect("gate closed");
                permit.forget();
            }
            self.scripted()
        }
    }

    /// Navigator recording every pushed URL.
    #[derive(Default)]
    struct RecordingNavigator {
        pushes: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        fn urls(&self) -> Vec<String> {
            self.pushes.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Navigator for RecordingNavigator {
        async fn push(&self, navigation: &Navigation) {
            self.pushes.lock().unwrap().push(navigation.to_url());
        }
    }

    fn accepted(is_new_user: Option<bool>) -> VerifyResponse {
        VerifyResponse {
            status: 200,
            message: "ok".to_string(),
            data: Some(VerifyData { is_new_user }),
        }
    }

    fn session(
        api: Arc<ScriptedApi>,
        navigator: Arc<RecordingNavigator>,
        mode: VerifyMode,
    ) -> VerifySession {
        VerifySession::new(api, navigator, mode, Duration::ZERO)
    }

    fn birthday_nav() -> Navigation {
        Navigation::new("/info/birthday", "name=Sam")
    }

    #[tokio::test]
    async fn empty_code_fails_without_network() {
        let api = Arc::new(ScriptedApi::returning(accepted(Some(true))));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api.clone(), navigator.clone(), VerifyMode::Signup);

        for code in ["", "   ", "\t\n"] {
            let submission = session.submit("a@b.com", code, birthday_nav()).await;
            assert_eq!(
                submission,
                Submission::Completed(VerifyOutcome::InvalidCode {
                    message: messages::EMPTY_CODE.to_string()
                })
            );
        }
        assert_eq!(api.call_count(), 0);
        assert!(navigator.urls().is_empty());
        assert!(session.phase().await.is_settled());
    }

    #[tokio::test]
    async fn signup_success_pushes_navigation() {
        let api = Arc::new(ScriptedApi::returning(accepted(Some(true))));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api.clone(), navigator.clone(), VerifyMode::Signup);

        let submission = session.submit("a@b.com", "123456", birthday_nav()).await;
        assert_eq!(submission, Submission::Completed(VerifyOutcome::Success));
        assert_eq!(navigator.urls(), vec!["/info/birthday?name=Sam".to_string()]);
        assert_eq!(api.call_count(), 1);
        assert_eq!(
            session.phase().await,
            AttemptPhase::Settled(VerifyOutcome::Success)
        );
    }

    #[tokio::test]
    async fn already_registered_does_not_navigate() {
        let api = Arc::new(ScriptedApi::returning(accepted(Some(false))));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api, navigator.clone(), VerifyMode::Signup);

        let submission = session.submit("a@b.com", "123456", birthday_nav()).await;
        assert_eq!(
            submission,
            Submission::Completed(VerifyOutcome::AlreadyRegistered)
        );
        assert!(navigator.urls().is_empty());
    }

    #[tokio::test]
    async fn ambiguous_response_settles_without_navigation() {
        let api = Arc::new(ScriptedApi::returning(accepted(None)));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api, navigator.clone(), VerifyMode::Signup);

        let submission = session.submit("a@b.com", "123456", birthday_nav()).await;
        assert_eq!(submission, Submission::Completed(VerifyOutcome::Ambiguous));
        assert!(navigator.urls().is_empty());
        assert!(session.phase().await.is_settled());
    }

    #[tokio::test]
    async fn transport_failure_becomes_network_error() {
        let api = Arc::new(ScriptedApi::failing(VerifyError::Transport {
            reason: "connection refused".to_string(),
        }));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api, navigator.clone(), VerifyMode::Signin);

        let submission = session.submit("a@b.com", "123456", birthday_nav()).await;
        assert_eq!(
            submission,
            Submission::Completed(VerifyOutcome::NetworkError {
                message: messages::NETWORK_FAILURE.to_string()
            })
        );
        assert!(navigator.urls().is_empty());
    }

    #[tokio::test]
    async fn sequential_resubmission_is_idempotent() {
        let api = Arc::new(ScriptedApi::returning(accepted(Some(false))));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api.clone(), navigator, VerifyMode::Signup);

        let first = session.submit("a@b.com", "123456", birthday_nav()).await;
        let second = session.submit("a@b.com", "123456", birthday_nav()).await;
        assert_eq!(first, second);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_submit_is_ignored() {
        let gate = Arc::new(Semaphore::new(0));
        let api = Arc::new(ScriptedApi::gated(accepted(Some(true)), gate.clone()));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = Arc::new(session(api.clone(), navigator, VerifyMode::Signup));

        let background = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("a@b.com", "123456", birthday_nav()).await })
        };

        // Wait for the first attempt to reach Pending.
        while session.phase().await != AttemptPhase::Pending {
            tokio::task::yield_now().await;
        }

        let second = session.submit("a@b.com", "654321", birthday_nav()).await;
        assert_eq!(second, Submission::Ignored);
        assert_eq!(api.call_count(), 1);

        gate.add_permits(1);
        let first = background.await.unwrap();
        assert_eq!(first, Submission::Completed(VerifyOutcome::Success));
    }

    #[tokio::test]
    async fn send_code_navigates_to_code_entry() {
        let api = Arc::new(ScriptedApi::returning(accepted(None)));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api, navigator.clone(), VerifyMode::Signup);

        let navigation = session
            .send_code("a@b.com", &StepContext::with_name("Sam"))
            .await
            .unwrap();
        assert_eq!(navigation.path, "/auth/signup/verify");
        assert!(navigation.query.contains("email=a%40b.com"));
        assert_eq!(navigator.urls(), vec![navigation.to_url()]);
    }

    #[tokio::test]
    async fn send_code_failure_surfaces_error() {
        let api = Arc::new(ScriptedApi::failing(VerifyError::SendFailed {
            reason: "boom".to_string(),
        }));
        let navigator = Arc::new(RecordingNavigator::default());
        let session = session(api, navigator.clone(), VerifyMode::Signin);

        let result = session
            .send_code("a@b.com", &StepContext::with_name("Sam"))
            .await;
        assert!(result.is_err());
        assert!(navigator.urls().is_empty());
    }
}
