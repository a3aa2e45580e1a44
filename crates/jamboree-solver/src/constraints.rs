//! The six constraint families.
//!
//! Each family posts linear constraints over the 0/1 selection variables and
//! records one name per constraint, built from identifiers and session start
//! keys, so a planner can trace any restriction back to the rule that caused
//! it. Families iterate the problem in materialization order, which keeps
//! the model identical run to run.

use jamboree_core::{ExclusionReason, ForcedZero, Problem};
use pumpkin_solver::constraints as cp;
use pumpkin_solver::variables::TransformableVariable;
use pumpkin_solver::Solver;

use crate::variables::VariableMap;

/// Session capacity: the combined size of the groups attending a session
/// stays within the activity's `max_participants`.
///
/// `capacity_{activity}_start{key}`
pub(crate) fn capacity(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
) {
    let tag = solver.new_constraint_tag();
    for activity in problem.activities() {
        for slot in activity.sessions() {
            let attendees = problem.selections_for_session(activity.identifier(), slot);
            if attendees.is_empty() {
                continue;
            }
            let terms: Vec<_> = attendees
                .iter()
                .map(|s| vars.var(s).scaled(problem.group_of(s).size()))
                .collect();
            let _ = solver
                .add_constraint(cp::less_than_or_equals(
                    terms,
                    activity.max_participants(),
                    tag,
                ))
                .post();
            names.push(format!(
                "capacity_{}_start{}",
                activity.identifier(),
                slot.start_key()
            ));
        }
    }
}

/// Age eligibility: a group whose age code the activity does not admit can
/// never attend. The variable is fixed to zero and the exclusion reported.
///
/// `age_{group}_{activity}_start{key}`
pub(crate) fn age_eligibility(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
    forced: &mut Vec<ForcedZero>,
) {
    let tag = solver.new_constraint_tag();
    for selection in problem.selections() {
        let group = problem.group_of(selection);
        if problem.activity_of(selection).allows_age(group.age_group()) {
            continue;
        }
        let name = format!(
            "age_{}_{}_start{}",
            selection.group,
            selection.activity,
            selection.slot.start_key()
        );
        let _ = solver
            .add_constraint(cp::equals(vec![vars.var(selection).scaled(1)], 0, tag))
            .post();
        forced.push(ForcedZero {
            selection: selection.clone(),
            constraint: name.clone(),
            reason: ExclusionReason::AgeRestriction,
        });
        names.push(name);
    }
}

/// Group availability: a session not fully inside one of the group's
/// availability windows can never be attended.
///
/// `availability_{group}_{activity}_start{key}`
pub(crate) fn availability(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
    forced: &mut Vec<ForcedZero>,
) {
    let tag = solver.new_constraint_tag();
    for selection in problem.selections() {
        if problem.group_of(selection).can_attend(&selection.slot) {
            continue;
        }
        let name = format!(
            "availability_{}_{}_start{}",
            selection.group,
            selection.activity,
            selection.slot.start_key()
        );
        let _ = solver
            .add_constraint(cp::equals(vec![vars.var(selection).scaled(1)], 0, tag))
            .post();
        forced.push(ForcedZero {
            selection: selection.clone(),
            constraint: name.clone(),
            reason: ExclusionReason::GroupUnavailable,
        });
        names.push(name);
    }
}

/// At most one session of an activity per group. Pairs with a single
/// candidate session need no constraint.
///
/// `one_session_{group}_{activity}`
pub(crate) fn one_session_per_activity(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
) {
    let tag = solver.new_constraint_tag();
    for group in problem.groups() {
        for activity in problem.activities() {
            let candidates =
                problem.selections_for_pair(group.identifier(), activity.identifier());
            if candidates.len() < 2 {
                continue;
            }
            let terms: Vec<_> = candidates.iter().map(|s| vars.var(s).scaled(1)).collect();
            let _ = solver
                .add_constraint(cp::less_than_or_equals(terms, 1, tag))
                .post();
            names.push(format!(
                "one_session_{}_{}",
                group.identifier(),
                activity.identifier()
            ));
        }
    }
}

/// Time exclusivity: a group cannot attend two sessions whose slots overlap.
/// Posted once per unordered pair. Sessions of a single activity never
/// overlap, so every pair spans two activities.
///
/// `overlap_{group}_{activity1}_start{key1}_{activity2}_start{key2}`
pub(crate) fn time_exclusivity(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
) {
    let tag = solver.new_constraint_tag();
    let selections = problem.selections();
    for (i, first) in selections.iter().enumerate() {
        for second in &selections[i + 1..] {
            if first.group != second.group || !first.slot.overlaps(&second.slot) {
                continue;
            }
            let terms = vec![vars.var(first).scaled(1), vars.var(second).scaled(1)];
            let _ = solver
                .add_constraint(cp::less_than_or_equals(terms, 1, tag))
                .post();
            names.push(format!(
                "overlap_{}_{}_start{}_{}_start{}",
                first.group,
                first.activity,
                first.slot.start_key(),
                second.activity,
                second.slot.start_key()
            ));
        }
    }
}

/// Out-of-camp day exclusivity: an out-of-camp session consumes the group's
/// whole day, so no session of another activity may share a calendar day
/// with it. Posted once per unordered pair where at least one side is out
/// of camp.
///
/// `out_of_camp_{group}_{activity1}_start{key1}_{activity2}_start{key2}`
pub(crate) fn out_of_camp_exclusivity(
    solver: &mut Solver,
    problem: &Problem,
    vars: &VariableMap,
    names: &mut Vec<String>,
) {
    let tag = solver.new_constraint_tag();
    let selections = problem.selections();
    for (i, first) in selections.iter().enumerate() {
        for second in &selections[i + 1..] {
            if first.group != second.group || first.activity == second.activity {
                continue;
            }
            if !problem.activity_of(first).out_of_camp()
                && !problem.activity_of(second).out_of_camp()
            {
                continue;
            }
            if !first.slot.is_same_day(&second.slot) {
                continue;
            }
            let terms = vec![vars.var(first).scaled(1), vars.var(second).scaled(1)];
            let _ = solver
                .add_constraint(cp::less_than_or_equals(terms, 1, tag))
                .post();
            names.push(format!(
                "out_of_camp_{}_{}_start{}_{}_start{}",
                first.group,
                first.activity,
                first.slot.start_key(),
                second.activity,
                second.slot.start_key()
            ));
        }
    }
}
