//! Aggregated redirect rule report.

use super::{ProfileName, ProfileOutcome};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// Outcomes of every dispatched profile for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRulesReport {
    outcomes: Vec<ProfileOutcome>,
    generated_at: DateTime<Utc>,
}

impl RedirectRulesReport {
    /// Builds a report, ordering outcomes by profile name.
    #[must_use]
    pub fn new(mut outcomes: Vec<ProfileOutcome>, clock: &impl Clock) -> Self {
        outcomes.sort_by(|left, right| left.profile().cmp(right.profile()));
        Self {
            outcomes,
            generated_at: clock.utc(),
        }
    }

    /// Returns the outcomes in report order.
    #[must_use]
    pub fn outcomes(&self) -> &[ProfileOutcome] {
        &self.outcomes
    }

    /// Returns the outcome for a profile, if it was dispatched.
    #[must_use]
    pub fn outcome_for(&self, profile: &ProfileName) -> Option<&ProfileOutcome> {
        self.outcomes.iter().find(|outcome| outcome.profile() == profile)
    }

    /// Returns the number of profiles whose check did not pass.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .count()
    }

    /// Returns `true` when no profile was dispatched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns when the report was assembled.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Renders the textual report, one block per outcome.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RedirectRulesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{outcome}")?;
        }
        Ok(())
    }
}
