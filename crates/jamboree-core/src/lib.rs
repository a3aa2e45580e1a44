//! # jamboree-core
//!
//! Core domain model for the jamboree activity assignment engine.
//!
//! This crate provides:
//! - Domain types: `TimeSlot`, `Activity`, `ScoutGroup`, `Selection`, `Problem`
//! - Result types: `Schedule`, `SolveReport`, `SolveStatus`, `ForcedZero`
//! - Validation errors raised at construction time
//!
//! All entities are validated when constructed and immutable afterwards. A
//! `Problem` is the read-only input to the model builder: it owns the activity
//! catalog, the scout groups, and the `Selection` set derived from the groups'
//! stated preferences.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use jamboree_core::{Activity, Problem, ScoutGroup, Selection, TimeSlot};
//!
//! fn slot(day: u32, from: u32, to: u32) -> TimeSlot {
//!     let date = NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
//!     TimeSlot::new(
//!         date.and_hms_opt(from, 0, 0).unwrap(),
//!         date.and_hms_opt(to, 0, 0).unwrap(),
//!     )
//!     .unwrap()
//! }
//!
//! let archery = Activity::new("Archery", "A1", [10, 11], 20, vec![slot(25, 9, 10)], false).unwrap();
//! let eagles = ScoutGroup::new("Eagles", "G1", 10, 12, vec![slot(25, 8, 18)]).unwrap();
//! let wish = Selection {
//!     group: "G1".into(),
//!     activity: "A1".into(),
//!     slot: slot(25, 9, 10),
//!     priority: 3,
//! };
//!
//! let problem = Problem::new(vec![archery], vec![eagles], vec![wish]).unwrap();
//! assert_eq!(problem.selections().len(), 1);
//! ```

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

pub mod schedule;

pub use schedule::{ExclusionReason, ForcedZero, Schedule, SolveReport, SolveStatus};

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for an activity
pub type ActivityId = String;

/// Unique identifier for a scout group
pub type GroupId = String;

// ============================================================================
// TimeSlot
// ============================================================================

/// A half-open time span `[start, end)`.
///
/// The invariant `start < end` is enforced at construction; the fields are
/// immutable afterwards. Equality and ordering compare `(start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSlot {
    /// Create a time slot, rejecting empty or reversed spans.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyTimeSlot { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the slot
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Half-open interval intersection test. Symmetric; slots that merely
    /// touch (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if any endpoint of `self` falls on the same calendar date as any
    /// endpoint of `other`.
    ///
    /// This is deliberately loose: it compares all four endpoint date pairs
    /// and is not transitive. Two midnight-crossing slots two nights apart
    /// can share a date with a slot between them while not sharing one with
    /// each other. Callers rely on exactly this behavior; do not tighten it.
    pub fn is_same_day(&self, other: &TimeSlot) -> bool {
        self.start.date() == other.start.date()
            || self.end.date() == other.end.date()
            || self.start.date() == other.end.date()
            || self.end.date() == other.start.date()
    }

    /// True if `other` lies entirely within this slot.
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if the instant lies within this slot, boundaries included.
    pub fn contains_instant(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// The gap separating two disjoint slots, or `None` if they touch or
    /// overlap.
    pub fn gap(&self, other: &TimeSlot) -> Option<TimeSlot> {
        if self.end < other.start {
            Some(Self { start: self.end, end: other.start })
        } else if other.end < self.start {
            Some(Self { start: other.end, end: self.start })
        } else {
            None
        }
    }

    /// Deterministic rendering of the start instant, used to key variable and
    /// constraint names (`2025_09_25_0900`).
    pub fn start_key(&self) -> String {
        self.start.format("%Y_%m_%d_%H%M").to_string()
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

// ============================================================================
// Activity
// ============================================================================

/// An activity offered at camp, with capacity and age rules per session.
///
/// Sessions are kept sorted and must be pairwise non-overlapping. Identity,
/// equality, and hashing use the `identifier` only.
#[derive(Clone, Debug)]
pub struct Activity {
    name: String,
    identifier: ActivityId,
    allowed_age_groups: BTreeSet<i32>,
    max_participants: i32,
    sessions: Vec<TimeSlot>,
    out_of_camp: bool,
}

impl Activity {
    /// Create an activity, validating capacity and session disjointness.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        allowed_age_groups: impl IntoIterator<Item = i32>,
        max_participants: i32,
        mut sessions: Vec<TimeSlot>,
        out_of_camp: bool,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        if max_participants < 1 {
            return Err(ValidationError::NonPositiveCapacity(identifier));
        }

        sessions.sort();
        // Sorted by (start, end), so any overlap shows up between neighbors.
        for pair in sessions.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(ValidationError::OverlappingSessions {
                    activity: identifier,
                    first: pair[0],
                    second: pair[1],
                });
            }
        }

        Ok(Self {
            name: name.into(),
            identifier,
            allowed_age_groups: allowed_age_groups.into_iter().collect(),
            max_participants,
            sessions,
            out_of_camp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn allowed_age_groups(&self) -> &BTreeSet<i32> {
        &self.allowed_age_groups
    }

    /// Capacity of every single session
    pub fn max_participants(&self) -> i32 {
        self.max_participants
    }

    /// Offered sessions, sorted by start
    pub fn sessions(&self) -> &[TimeSlot] {
        &self.sessions
    }

    /// Whether attending any session consumes the group's whole day
    pub fn out_of_camp(&self) -> bool {
        self.out_of_camp
    }

    /// True if the slot is one of this activity's sessions.
    pub fn offers_session(&self, slot: &TimeSlot) -> bool {
        self.sessions.contains(slot)
    }

    /// True if the age code may attend this activity.
    pub fn allows_age(&self, age_group: i32) -> bool {
        self.allowed_age_groups.contains(&age_group)
    }
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Activity {}

impl std::hash::Hash for Activity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id:{})", self.name, self.identifier)
    }
}

// ============================================================================
// ScoutGroup
// ============================================================================

/// A scout group that wants activity sessions assigned to it.
///
/// Identity, equality, and hashing use the `identifier` only.
#[derive(Clone, Debug)]
pub struct ScoutGroup {
    name: String,
    identifier: GroupId,
    age_group: i32,
    size: i32,
    availability: Vec<TimeSlot>,
}

impl ScoutGroup {
    /// Create a group, validating that it has at least one member.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        age_group: i32,
        size: i32,
        mut availability: Vec<TimeSlot>,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        if size < 1 {
            return Err(ValidationError::NonPositiveGroupSize(identifier));
        }
        availability.sort();
        Ok(Self {
            name: name.into(),
            identifier,
            age_group,
            size,
            availability,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Age code used against `Activity::allowed_age_groups`
    pub fn age_group(&self) -> i32 {
        self.age_group
    }

    /// Headcount, consumed against session capacity
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Windows during which the group may be scheduled, sorted by start
    pub fn availability(&self) -> &[TimeSlot] {
        &self.availability
    }

    /// True if some availability window fully contains the slot.
    pub fn can_attend(&self, slot: &TimeSlot) -> bool {
        self.availability.iter().any(|window| window.contains(slot))
    }
}

impl PartialEq for ScoutGroup {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for ScoutGroup {}

impl std::hash::Hash for ScoutGroup {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl std::fmt::Display for ScoutGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id:{})", self.name, self.identifier)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// One candidate assignment: a group attending one session of an activity.
///
/// A selection exists only where the group stated a preference for the
/// activity; `priority` is the group's weight for the activity and is the
/// same across all of that activity's sessions. Equality and hashing combine
/// all four fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub group: GroupId,
    pub activity: ActivityId,
    pub slot: TimeSlot,
    pub priority: i32,
}

impl std::fmt::Display for Selection {
    /// Renders the deterministic variable name, `{group}_{activity}_start{key}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_start{}", self.group, self.activity, self.slot.start_key())
    }
}

// ============================================================================
// Problem
// ============================================================================

/// The immutable aggregate handed to the model builder.
///
/// Construction validates referential integrity: identifiers are unique,
/// every selection resolves to a cataloged group and activity, and every
/// selection's slot is one of its activity's sessions. No partially valid
/// `Problem` ever exists.
#[derive(Clone, Debug)]
pub struct Problem {
    activities: Vec<Activity>,
    groups: Vec<ScoutGroup>,
    selections: Vec<Selection>,
    activity_index: HashMap<ActivityId, usize>,
    group_index: HashMap<GroupId, usize>,
}

impl Problem {
    /// Assemble and validate a problem.
    pub fn new(
        activities: Vec<Activity>,
        groups: Vec<ScoutGroup>,
        selections: Vec<Selection>,
    ) -> Result<Self, ValidationError> {
        let mut activity_index = HashMap::with_capacity(activities.len());
        for (idx, activity) in activities.iter().enumerate() {
            if activity_index.insert(activity.identifier.clone(), idx).is_some() {
                return Err(ValidationError::DuplicateActivity(activity.identifier.clone()));
            }
        }

        let mut group_index = HashMap::with_capacity(groups.len());
        for (idx, group) in groups.iter().enumerate() {
            if group_index.insert(group.identifier.clone(), idx).is_some() {
                return Err(ValidationError::DuplicateGroup(group.identifier.clone()));
            }
        }

        let mut seen: HashSet<(&str, &str, TimeSlot)> = HashSet::with_capacity(selections.len());
        for selection in &selections {
            let Some(&activity_idx) = activity_index.get(&selection.activity) else {
                return Err(ValidationError::UnknownActivity(selection.activity.clone()));
            };
            if !group_index.contains_key(&selection.group) {
                return Err(ValidationError::UnknownGroup(selection.group.clone()));
            }
            if !activities[activity_idx].offers_session(&selection.slot) {
                return Err(ValidationError::SessionNotOffered {
                    activity: selection.activity.clone(),
                    slot: selection.slot,
                });
            }
            if !seen.insert((&selection.group, &selection.activity, selection.slot)) {
                return Err(ValidationError::DuplicateSelection(selection.to_string()));
            }
        }

        Ok(Self {
            activities,
            groups,
            selections,
            activity_index,
            group_index,
        })
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn groups(&self) -> &[ScoutGroup] {
        &self.groups
    }

    /// All candidate selections, in materialization order.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Look up an activity by identifier.
    pub fn activity(&self, identifier: &str) -> Option<&Activity> {
        self.activity_index.get(identifier).map(|&idx| &self.activities[idx])
    }

    /// Look up a group by identifier.
    pub fn group(&self, identifier: &str) -> Option<&ScoutGroup> {
        self.group_index.get(identifier).map(|&idx| &self.groups[idx])
    }

    /// The activity a selection refers to.
    ///
    /// Panics if the selection does not belong to this problem.
    pub fn activity_of(&self, selection: &Selection) -> &Activity {
        &self.activities[self.activity_index[&selection.activity]]
    }

    /// The group a selection refers to.
    ///
    /// Panics if the selection does not belong to this problem.
    pub fn group_of(&self, selection: &Selection) -> &ScoutGroup {
        &self.groups[self.group_index[&selection.group]]
    }

    /// All selections targeting one exact (activity, session) pair.
    pub fn selections_for_session(&self, activity: &str, slot: &TimeSlot) -> Vec<&Selection> {
        self.selections
            .iter()
            .filter(|s| s.activity == activity && s.slot == *slot)
            .collect()
    }

    /// All sessions one group might take of one activity.
    pub fn selections_for_pair(&self, group: &str, activity: &str) -> Vec<&Selection> {
        self.selections
            .iter()
            .filter(|s| s.group == group && s.activity == activity)
            .collect()
    }

    /// Other selections of the same group whose slot overlaps this one, across
    /// any activity. The selection itself is excluded.
    pub fn overlapping_selections(&self, selection: &Selection) -> Vec<&Selection> {
        self.selections
            .iter()
            .filter(|s| {
                s.group == selection.group
                    && *s != selection
                    && s.slot.overlaps(&selection.slot)
            })
            .collect()
    }

    /// Other selections of the same group, for a different activity, whose
    /// slot shares a calendar day with this one.
    pub fn same_day_selections(&self, selection: &Selection) -> Vec<&Selection> {
        self.selections
            .iter()
            .filter(|s| {
                s.group == selection.group
                    && s.activity != selection.activity
                    && s.slot.is_same_day(&selection.slot)
            })
            .collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Rejection raised while constructing domain entities or a `Problem`.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("time slot start {start} is not before end {end}")]
    EmptyTimeSlot {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("activity '{activity}' has overlapping sessions ({first}) and ({second})")]
    OverlappingSessions {
        activity: ActivityId,
        first: TimeSlot,
        second: TimeSlot,
    },

    #[error("activity '{0}' must admit at least one participant per session")]
    NonPositiveCapacity(ActivityId),

    #[error("scout group '{0}' must have a positive size")]
    NonPositiveGroupSize(GroupId),

    #[error("duplicate activity identifier '{0}'")]
    DuplicateActivity(ActivityId),

    #[error("duplicate scout group identifier '{0}'")]
    DuplicateGroup(GroupId),

    #[error("selection references unknown activity '{0}'")]
    UnknownActivity(ActivityId),

    #[error("selection references unknown scout group '{0}'")]
    UnknownGroup(GroupId),

    #[error("activity '{activity}' offers no session at {slot}")]
    SessionNotOffered {
        activity: ActivityId,
        slot: TimeSlot,
    },

    #[error("duplicate selection {0}")]
    DuplicateSelection(String),
}

// ============================================================================
// Tests
// ============================================================================
