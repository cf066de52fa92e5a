//! Pure classification of verification responses.
//!
//! The decision table lives here, away from any transport or navigation
//! side effect, so it can be tested as a plain function.

use serde::{Deserialize, Serialize};

/// Whether verification backs a new-account signup or an
/// existing-account signin.
///
/// The mode flips the interpretation of the server's `isNewUser` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    Signup,
    Signin,
}

impl std::fmt::Display for VerifyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signup => write!(f, "signup"),
            Self::Signin => write!(f, "signin"),
        }
    }
}

impl std::str::FromStr for VerifyMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "signin" => Ok(Self::Signin),
            other => Err(format!("Unknown verification mode: {other}")),
        }
    }
}

/// Response body of the verify-code endpoint.
///
/// The service reports rejection through the `status` field of the body,
/// not the HTTP status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VerifyData>,
}

/// Optional payload attached to an accepted verify-code response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyData {
    /// Whether the verified email belongs to an account that did not
    /// previously exist.
    #[serde(
        rename = "isNewUser",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_new_user: Option<bool>,
}

/// Classified outcome of one verification attempt.
///
/// Constructed on each submit, discarded on the next; no retry history
/// is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VerifyOutcome {
    /// The code was accepted and the account state matches the mode.
    Success,
    /// Signup flow, but the email already has an account.
    AlreadyRegistered,
    /// Signin flow, but the email has no account.
    NotRegistered,
    /// The server rejected the code, or the submitted code was empty.
    InvalidCode { message: String },
    /// The request never produced a server verdict.
    NetworkError { message: String },
    /// HTTP 200 without an `isNewUser` flag — neither success nor
    /// failure; the form stays where it is.
    Ambiguous,
}

impl VerifyOutcome {
    /// Whether this outcome unlocks the forward navigation.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The inline message shown under the code input, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Success | Self::Ambiguous => None,
            Self::AlreadyRegistered => Some(messages::ALREADY_REGISTERED),
            Self::NotRegistered => Some(messages::NOT_REGISTERED),
            Self::InvalidCode { message } | Self::NetworkError { message } => Some(message),
        }
    }
}

/// User-facing copy for verification outcomes.
pub mod messages {
    /// Shown when the code field is empty after trimming.
    pub const EMPTY_CODE: &str = "Please enter verification code";
    /// Signin with an email the service has never seen.
    pub const NOT_REGISTERED: &str = "Email not registered. Please sign up first.";
    /// Signup with an email that already has an account.
    pub const ALREADY_REGISTERED: &str = "This email is already registered.";
    /// Fallback for a rejected code when the server sent no message.
    pub const INVALID_CODE: &str = "Invalid verification code. Please try again.";
    /// Transport failure of any kind.
    pub const NETWORK_FAILURE: &str =
        "Verification failed. Please check your code and try again.";
}

/// Classify a verify-code response under the given mode.
///
/// `isNewUser == true` means the account did not previously exist, so it
/// is a success for signup and an error for signin; `false` is the
/// mirror image. A 200 without the flag is [`VerifyOutcome::Ambiguous`].
pub fn classify(mode: VerifyMode, response: &VerifyResponse) -> VerifyOutcome {
    if response.status != 200 {
        let message = if response.message.is_empty() {
            messages::INVALID_CODE.to_string()
        } else {
            response.message.clone()
        };
        return VerifyOutcome::InvalidCode { message };
    }

    let is_new_user = response.data.as_ref().and_then(|d| d.is_new_user);
    match (mode, is_new_user) {
        (VerifyMode::Signup, Some(true)) => VerifyOutcome::Success,
        (VerifyMode::Signup, Some(false)) => VerifyOutcome::AlreadyRegistered,
        (VerifyMode::Signin, Some(false)) => VerifyOutcome::Success,
        (VerifyMode::Signin, Some(true)) => VerifyOutcome::NotRegistered,
        (_, None) => VerifyOutcome::Ambiguous,
    }
}
