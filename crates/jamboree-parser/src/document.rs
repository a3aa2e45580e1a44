//! Raw problem document records and conversion to the domain model.
//!
//! The records in this module mirror the JSON input contract field by field;
//! all validation beyond shape lives in `jamboree-core`. Conversion also
//! materializes the selection set: one `Selection` per stated priority per
//! session of the ranked activity, in document order (groups, then priority
//! entries, then sessions sorted by start).
//!
//! # Document Format
//!
//! ```json
//! {
//!   "activities": [
//!     {
//!       "name": "Raft Building",
//!       "identifier": "raft",
//!       "allowed_age_groups": [12, 13, 14],
//!       "max_participants": 30,
//!       "available_sessions": [
//!         {"start": "2025-09-25T09:00:00", "end": "2025-09-25T12:00:00"}
//!       ],
//!       "out_of_camp": true
//!     }
//!   ],
//!   "scoutgroups": [
//!     {
//!       "name": "Eagles",
//!       "identifier": "eagles",
//!       "agegroup": 12,
//!       "size": 14,
//!       "available_timeslots": [
//!         {"start": "2025-09-25T08:00:00", "end": "2025-09-25T20:00:00"}
//!       ],
//!       "priorities": [{"activity": "raft", "value": 5}]
//!     }
//!   ]
//! }
//! ```

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use jamboree_core::{Activity, Problem, ScoutGroup, Selection, TimeSlot, ValidationError};

use crate::ParseError;

// ============================================================================
// Records
// ============================================================================

/// Top-level problem document
#[derive(Debug, Deserialize)]
pub struct ProblemDocument {
    pub activities: Vec<ActivityRecord>,
    pub scoutgroups: Vec<GroupRecord>,
}

/// A `[start, end)` span as written in the document
#[derive(Debug, Deserialize)]
pub struct TimeSlotRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    pub identifier: String,
    pub allowed_age_groups: Vec<i32>,
    pub max_participants: i32,
    pub available_sessions: Vec<TimeSlotRecord>,
    #[serde(default)]
    pub out_of_camp: bool,
}

#[derive(Debug, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub identifier: String,
    pub agegroup: i32,
    pub size: i32,
    pub available_timeslots: Vec<TimeSlotRecord>,
    pub priorities: Vec<PriorityRecord>,
}

/// One ranked wish: the group wants `activity` with weight `value`
#[derive(Debug, Deserialize)]
pub struct PriorityRecord {
    pub activity: String,
    pub value: i32,
}

// ============================================================================
// Conversion
// ============================================================================

impl TimeSlotRecord {
    fn into_slot(self) -> Result<TimeSlot, ValidationError> {
        TimeSlot::new(self.start, self.end)
    }
}

impl ProblemDocument {
    /// Convert the raw document into a validated `Problem`.
    pub fn into_problem(self) -> Result<Problem, ParseError> {
        let mut activities = Vec::with_capacity(self.activities.len());
        for record in self.activities {
            let sessions = record
                .available_sessions
                .into_iter()
                .map(TimeSlotRecord::into_slot)
                .collect::<Result<Vec<_>, _>>()?;
            activities.push(Activity::new(
                record.name,
                record.identifier,
                record.allowed_age_groups,
                record.max_participants,
                sessions,
                record.out_of_camp,
            )?);
        }

        let by_id: HashMap<&str, &Activity> =
            activities.iter().map(|a| (a.identifier(), a)).collect();

        let mut groups = Vec::with_capacity(self.scoutgroups.len());
        let mut selections = Vec::new();
        for record in self.scoutgroups {
            let availability = record
                .available_timeslots
                .into_iter()
                .map(TimeSlotRecord::into_slot)
                .collect::<Result<Vec<_>, _>>()?;
            let group = ScoutGroup::new(
                record.name,
                record.identifier,
                record.agegroup,
                record.size,
                availability,
            )?;

            let mut ranked: HashSet<&str> = HashSet::with_capacity(record.priorities.len());
            for priority in &record.priorities {
                if !ranked.insert(priority.activity.as_str()) {
                    return Err(ParseError::DuplicatePriority {
                        group: group.identifier().to_string(),
                        activity: priority.activity.clone(),
                    });
                }
                let Some(activity) = by_id.get(priority.activity.as_str()) else {
                    return Err(ParseError::UnknownActivity {
                        group: group.identifier().to_string(),
                        activity: priority.activity.clone(),
                    });
                };
                for slot in activity.sessions() {
                    selections.push(Selection {
                        group: group.identifier().to_string(),
                        activity: activity.identifier().to_string(),
                        slot: *slot,
                        priority: priority.value,
                    });
                }
            }

            groups.push(group);
        }

        Ok(Problem::new(activities, groups, selections)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    const TWO_GROUPS: &str = r#"{
      "activities": [
        {
          "name": "Archery",
          "identifier": "A1",
          "allowed_age_groups": [10, 11, 12],
          "max_participants": 20,
          "available_sessions": [
            {"start": "2025-09-26T09:00:00", "end": "2025-09-26T10:00:00"},
            {"start": "2025-09-25T09:00:00", "end": "2025-09-25T10:00:00"}
          ]
        },
        {
          "name": "Kayaking",
          "identifier": "A2",
          "allowed_age_groups": [12, 13],
          "max_participants": 15,
          "available_sessions": [
            {"start": "2025-09-25T14:00:00", "end": "2025-09-25T16:00:00"}
          ],
          "out_of_camp": true
        }
      ],
      "scoutgroups": [
        {
          "name": "Eagles",
          "identifier": "G1",
          "agegroup": 12,
          "size": 10,
          "available_timeslots": [
            {"start": "2025-09-25T08:00:00", "end": "2025-09-26T18:00:00"}
          ],
          "priorities": [
            {"activity": "A2", "value": 3},
            {"activity": "A1", "value": 1}
          ]
        },
        {
          "name": "Wolves",
          "identifier": "G2",
          "agegroup": 13,
          "size": 8,
          "available_timeslots": [],
          "priorities": [{"activity": "A2", "value": 2}]
        }
      ]
    }"#;

    fn parse(input: &str) -> ProblemDocument {
        serde_json::from_str(input).unwrap()
    }

    #[test]
    fn test_timestamps_parse_as_naive_datetimes() {
        let doc = parse(TWO_GROUPS);
        let record = &doc.activities[1].available_sessions[0];
        assert_eq!(record.start, dt(25, 14));
        assert_eq!(record.end, dt(25, 16));
    }

    #[test]
    fn test_out_of_camp_defaults_to_false() {
        let doc = parse(TWO_GROUPS);
        assert!(!doc.activities[0].out_of_camp);
        assert!(doc.activities[1].out_of_camp);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let input = TWO_GROUPS.replace(r#""size": 10,"#, "");
        let result = serde_json::from_str::<ProblemDocument>(&input);
        assert!(result.is_err());
    }

    #[test]
    fn test_cross_product_follows_document_order() {
        let problem = parse(TWO_GROUPS).into_problem().unwrap();

        let rendered: Vec<String> =
            problem.selections().iter().map(|s| s.to_string()).collect();
        // groups in document order, priorities in stated order, sessions
        // sorted by start
        assert_eq!(
            rendered,
            vec![
                "G1_A2_start2025_09_25_1400",
                "G1_A1_start2025_09_25_0900",
                "G1_A1_start2025_09_26_0900",
                "G2_A2_start2025_09_25_1400",
            ]
        );
    }

    #[test]
    fn test_priority_value_carried_to_every_session() {
        let problem = parse(TWO_GROUPS).into_problem().unwrap();
        for selection in problem.selections_for_pair("G1", "A1") {
            assert_eq!(selection.priority, 1);
        }
    }

    #[test]
    fn test_group_with_no_priorities_yields_no_selections() {
        let input = TWO_GROUPS.replace(
            r#""priorities": [{"activity": "A2", "value": 2}]"#,
            r#""priorities": []"#,
        );
        let problem = parse(&input).into_problem().unwrap();
        assert!(problem.selections_for_pair("G2", "A2").is_empty());
        assert_eq!(problem.groups().len(), 2);
    }
}
