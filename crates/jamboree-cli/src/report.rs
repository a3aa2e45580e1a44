//! Text rendering of solve reports.
//!
//! The JSON shape is just the serialized `SolveReport`; this module only
//! covers the human-readable form: the status, the schedule grouped per
//! scout group, and the selections that were ruled out before search.

use std::fmt::Write;

use jamboree_core::{Problem, SolveReport};

/// Render a solve report for terminal output.
pub fn render_text(report: &SolveReport, problem: &Problem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "status: {}", report.status);

    match &report.schedule {
        Some(schedule) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "schedule (total priority {}):", schedule.total_priority);
            for group in problem.groups() {
                let assigned: Vec<_> = schedule
                    .assignments
                    .iter()
                    .filter(|s| s.group == group.identifier())
                    .collect();
                if assigned.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "  {group}");
                for selection in assigned {
                    let _ = writeln!(
                        out,
                        "    {}  {}  priority {}",
                        selection.slot,
                        problem.activity_of(selection),
                        selection.priority
                    );
                }
            }
        }
        None => {
            let _ = writeln!(out, "no schedule found");
        }
    }

    if !report.forced_zero.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ruled out during model construction:");
        for forced in &report.forced_zero {
            let _ = writeln!(
                out,
                "  {}: {} ({})",
                forced.selection, forced.reason, forced.constraint
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use jamboree_core::{
        Activity, ExclusionReason, ForcedZero, Schedule, ScoutGroup, Selection, SolveStatus,
        TimeSlot,
    };

    fn slot(day: u32, from: u32, to: u32) -> TimeSlot {
        let date = NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
        TimeSlot::new(
            date.and_hms_opt(from, 0, 0).unwrap(),
            date.and_hms_opt(to, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn fixture() -> (Problem, SolveReport) {
        let archery =
            Activity::new("Archery", "A1", [12], 20, vec![slot(25, 9, 10)], false).unwrap();
        let eagles = ScoutGroup::new("Eagles", "G1", 12, 10, vec![slot(25, 8, 18)]).unwrap();
        let wolves = ScoutGroup::new("Wolves", "G2", 9, 8, vec![]).unwrap();
        let picks = vec![
            Selection {
                group: "G1".into(),
                activity: "A1".into(),
                slot: slot(25, 9, 10),
                priority: 3,
            },
            Selection {
                group: "G2".into(),
                activity: "A1".into(),
                slot: slot(25, 9, 10),
                priority: 2,
            },
        ];
        let problem = Problem::new(vec![archery], vec![eagles, wolves], picks.clone()).unwrap();

        let report = SolveReport {
            status: SolveStatus::Optimal,
            schedule: Some(Schedule {
                assignments: vec![picks[0].clone()],
                total_priority: 3,
            }),
            forced_zero: vec![ForcedZero {
                selection: picks[1].clone(),
                constraint: "age_G2_A1_start2025_09_25_0900".into(),
                reason: ExclusionReason::AgeRestriction,
            }],
        };
        (problem, report)
    }

    #[test]
    fn renders_schedule_per_group() {
        let (problem, report) = fixture();
        let text = render_text(&report, &problem);

        assert!(text.starts_with("status: optimal\n"));
        assert!(text.contains("schedule (total priority 3):"));
        assert!(text.contains("  Eagles (id:G1)"));
        assert!(text.contains("Archery (id:A1)  priority 3"));
        // the wolves got nothing, so they get no section
        assert!(!text.contains("Wolves"));
    }

    #[test]
    fn renders_forced_zero_section() {
        let (problem, report) = fixture();
        let text = render_text(&report, &problem);

        assert!(text.contains("ruled out during model construction:"));
        assert!(text.contains(
            "G2_A1_start2025_09_25_0900: age restriction (age_G2_A1_start2025_09_25_0900)"
        ));
    }

    #[test]
    fn renders_no_schedule_outcome() {
        let (problem, mut report) = fixture();
        report.status = SolveStatus::Unknown;
        report.schedule = None;
        let text = render_text(&report, &problem);

        assert!(text.starts_with("status: unknown\n"));
        assert!(text.contains("no schedule found"));
    }
}
