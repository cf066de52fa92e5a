//! Verification service client.
//!
//! Split so the testable core stays pure: `classify` is the decision
//! table, `state` is the per-attempt machine, `client` is the transport
//! seam, and `session` owns the in-flight guard and the navigation side
//! effect.

pub mod classify;
pub mod client;
pub mod routes;
pub mod session;
pub mod state;

pub use classify::{VerifyData, VerifyMode, VerifyOutcome, VerifyResponse, classify, messages};
pub use client::{HttpVerifyApi, SendCodeRequest, VerifyApi, VerifyRequest};
pub use routes::{AuthRouteState, auth_routes};
pub use session::{Submission, VerifySession};
pub use state::{Attempt, AttemptPhase};
