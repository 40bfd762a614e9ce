//! Per-profile check outcomes.

use super::{DroppedParameter, ProfileName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// How a profile's redirect rule check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The backend evaluated the rules and returned its message.
    Passed {
        /// Backend-supplied message.
        message: String,
    },
    /// The backend replied with its failure flag set.
    Rejected {
        /// Backend-supplied error text.
        error: String,
    },
    /// The request never produced a reply (no responder, timeout, transport
    /// error).
    Unreachable {
        /// Transport error text.
        error: String,
    },
}

/// Outcome of checking one profile's redirect rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    profile: ProfileName,
    status: OutcomeStatus,
    dropped: Vec<DroppedParameter>,
    completed_at: DateTime<Utc>,
}

impl ProfileOutcome {
    /// Creates an outcome stamped with the current time.
    #[must_use]
    pub fn new(profile: ProfileName, status: OutcomeStatus, clock: &impl Clock) -> Self {
        Self {
            profile,
            status,
            dropped: Vec::new(),
            completed_at: clock.utc(),
        }
    }

    /// Creates a successful outcome.
    #[must_use]
    pub fn passed(profile: ProfileName, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(
            profile,
            OutcomeStatus::Passed {
                message: message.into(),
            },
            clock,
        )
    }

    /// Creates an outcome for a backend-reported failure.
    #[must_use]
    pub fn rejected(profile: ProfileName, error: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(
            profile,
            OutcomeStatus::Rejected {
                error: error.into(),
            },
            clock,
        )
    }

    /// Creates an outcome for a transport failure.
    #[must_use]
    pub fn unreachable(profile: ProfileName, error: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(
            profile,
            OutcomeStatus::Unreachable {
                error: error.into(),
            },
            clock,
        )
    }

    /// Attaches the parameters that were left out of the profile's request.
    #[must_use]
    pub fn with_dropped(mut self, dropped: Vec<DroppedParameter>) -> Self {
        self.dropped = dropped;
        self
    }

    /// Returns the profile name.
    #[must_use]
    pub const fn profile(&self) -> &ProfileName {
        &self.profile
    }

    /// Returns the outcome status.
    #[must_use]
    pub const fn status(&self) -> &OutcomeStatus {
        &self.status
    }

    /// Returns the parameters that failed to transform and were not sent.
    #[must_use]
    pub fn dropped(&self) -> &[DroppedParameter] {
        &self.dropped
    }

    /// Returns when the outcome was reached.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns `true` only when the backend accepted the check.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Passed { .. })
    }
}

/// Renders the outcome as a report block terminated by a newline.
impl fmt::Display for ProfileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OutcomeStatus::Passed { message } => {
                writeln!(f, "#Redirect Rules Check for {}", self.profile)?;
                writeln!(f, "{message}")
            }
            OutcomeStatus::Rejected { error } => {
                writeln!(f, "#Failed Redirect Rules for {}", self.profile)?;
                writeln!(f, "#{error}")
            }
            OutcomeStatus::Unreachable { error } => {
                writeln!(f, "#Failed Redirect Rules Check for {}", self.profile)?;
                writeln!(f, "#{error}")
            }
        }
    }
}
