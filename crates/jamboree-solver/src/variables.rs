//! Decision variable management.
//!
//! Every selection gets one 0/1 decision variable; a value of one in a
//! solution means the group attends that session. Variables are created in
//! problem order so repeated runs build identical models, and the rendered
//! name of each variable is the selection's `Display` form,
//! `{group}_{activity}_start{key}`.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use jamboree_core::{ActivityId, GroupId, Problem, Selection};
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::Solver;

/// Identity of a decision variable: one (group, activity, session start).
///
/// Priorities are deliberately absent. Two selections differing only in
/// priority would be the same decision, and `Problem` validation already
/// rejects that case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub group: GroupId,
    pub activity: ActivityId,
    pub start: NaiveDateTime,
}

impl From<&Selection> for SelectionKey {
    fn from(selection: &Selection) -> Self {
        Self {
            group: selection.group.clone(),
            activity: selection.activity.clone(),
            start: selection.slot.start(),
        }
    }
}

/// Lookup table from selections to their solver variables.
#[derive(Debug)]
pub struct VariableMap {
    vars: HashMap<SelectionKey, DomainId>,
}

impl VariableMap {
    /// The variable standing for a selection.
    ///
    /// Panics if the selection was not part of the problem the map was
    /// generated from.
    pub fn var(&self, selection: &Selection) -> DomainId {
        self.vars[&SelectionKey::from(selection)]
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Create one 0/1 variable per selection, in problem order.
pub(crate) fn generate_variables(solver: &mut Solver, problem: &Problem) -> VariableMap {
    let mut vars = HashMap::with_capacity(problem.selections().len());
    for selection in problem.selections() {
        let var = solver.new_bounded_integer(0, 1);
        vars.insert(SelectionKey::from(selection), var);
    }
    VariableMap { vars }
}
