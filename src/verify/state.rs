//! Verification attempt state machine.

use uuid::Uuid;

use super::classify::VerifyOutcome;

/// Phases of a single verification attempt.
///
/// Progresses `Idle → Pending → Settled`; a settled attempt is only
/// re-entered by resetting to `Idle` for the next attempt. The direct
/// `Idle → Settled` edge covers local validation failures that never
/// touch the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptPhase {
    Idle,
    Pending,
    Settled(VerifyOutcome),
}

impl AttemptPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &AttemptPhase) -> bool {
        use AttemptPhase::*;
        matches!(
            (self, target),
            (Idle, Pending) | (Idle, Settled(_)) | (Pending, Settled(_)) | (Settled(_), Idle)
        )
    }

    /// Whether the attempt has reached a terminal outcome.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

impl Default for AttemptPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Settled(_) => "settled",
        };
        write!(f, "{s}")
    }
}

/// One verification attempt, tagged for log correlation.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: Uuid,
    pub phase: AttemptPhase,
}

impl Attempt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: AttemptPhase::Idle,
        }
    }

    /// Move to `Pending`. Errors if the attempt is not idle.
    pub fn begin(&mut self) -> Result<(), String> {
        self.transition(AttemptPhase::Pending)
    }

    /// Record the terminal outcome.
    pub fn settle(&mut self, outcome: VerifyOutcome) -> Result<(), String> {
        self.transition(AttemptPhase::Settled(outcome))
    }

    /// Discard this attempt and start a fresh one under a new id.
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.phase = AttemptPhase::Idle;
    }

    fn transition(&mut self, target: AttemptPhase) -> Result<(), String> {
        if !self.phase.can_transition_to(&target) {
            return Err(format!(
                "Cannot transition from {} to {}",
                self.phase, target
            ));
        }
        self.phase = target;
        Ok(())
    }
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new()
    }
}
