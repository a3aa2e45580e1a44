//! Solve outcome model.
//!
//! A solve run produces a [`SolveReport`]: the status the search terminated
//! with, the winning [`Schedule`] when one exists, and the [`ForcedZero`]
//! diagnostics collected while the model was built. Forced-zero entries name
//! the selections that were pinned to zero before search because the group
//! could never attend, so a planner can see at a glance which wishes were
//! structurally impossible rather than merely outcompeted.

use crate::Selection;
use serde::Serialize;

/// Terminal classification of a solve run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The search proved the returned schedule maximizes total priority.
    Optimal,
    /// A schedule was found but the time budget ran out before optimality
    /// was proven.
    Feasible,
    /// The search proved no schedule satisfies the constraints.
    Infeasible,
    /// The time budget ran out before any conclusion was reached.
    Unknown,
}

impl SolveStatus {
    /// True for the statuses that carry a schedule.
    pub fn has_schedule(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a selection was pinned to zero before search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The group's age code is outside the activity's allowed set.
    AgeRestriction,
    /// No availability window of the group contains the session.
    GroupUnavailable,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::AgeRestriction => "age restriction",
            ExclusionReason::GroupUnavailable => "group unavailable",
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection ruled out during model construction, with the constraint that
/// pinned it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForcedZero {
    pub selection: Selection,
    /// Name of the constraint that fixed the variable, e.g.
    /// `age_G1_A2_start2025_09_25_0930`.
    pub constraint: String,
    pub reason: ExclusionReason,
}

/// The chosen assignments and the objective value they achieve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schedule {
    /// Selections set to one, in problem order.
    pub assignments: Vec<Selection>,
    /// Sum of the priorities of the chosen selections.
    pub total_priority: i64,
}

/// Everything a solve run reports back.
///
/// `schedule` is `Some` exactly when `status.has_schedule()` holds.
#[derive(Clone, Debug, Serialize)]
pub struct SolveReport {
    pub status: SolveStatus,
    pub schedule: Option<Schedule>,
    pub forced_zero: Vec<ForcedZero>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_schedule_presence() {
        assert!(SolveStatus::Optimal.has_schedule());
        assert!(SolveStatus::Feasible.has_schedule());
        assert!(!SolveStatus::Infeasible.has_schedule());
        assert!(!SolveStatus::Unknown.has_schedule());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "optimal");
        assert_eq!(SolveStatus::Feasible.to_string(), "feasible");
        assert_eq!(SolveStatus::Infeasible.to_string(), "infeasible");
        assert_eq!(SolveStatus::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_exclusion_reason_display() {
        assert_eq!(ExclusionReason::AgeRestriction.to_string(), "age restriction");
        assert_eq!(ExclusionReason::GroupUnavailable.to_string(), "group unavailable");
    }
}
