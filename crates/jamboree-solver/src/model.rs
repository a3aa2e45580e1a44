//! Model assembly.
//!
//! `build` walks the problem once per constraint family and posts everything
//! into a fresh solver together with the maximization objective. The
//! resulting `ScheduleModel` also carries the bookkeeping callers need for
//! reporting: constraint names in creation order and the forced-zero
//! diagnostics collected along the way.

use jamboree_core::{ForcedZero, Problem};
use pumpkin_solver::constraints as cp;
use pumpkin_solver::variables::{DomainId, TransformableVariable};
use pumpkin_solver::Solver;

use crate::constraints;
use crate::variables::{self, VariableMap};

/// A constraint model over one problem, ready to solve.
pub struct ScheduleModel<'a> {
    pub(crate) problem: &'a Problem,
    pub(crate) solver: Solver,
    pub(crate) vars: VariableMap,
    pub(crate) objective: DomainId,
    pub(crate) constraint_names: Vec<String>,
    pub(crate) forced_zero: Vec<ForcedZero>,
}

/// Build the full constraint model for a problem.
pub fn build(problem: &Problem) -> ScheduleModel<'_> {
    let mut solver = Solver::default();
    let vars = variables::generate_variables(&mut solver, problem);

    let mut names = Vec::new();
    let mut forced_zero = Vec::new();
    constraints::capacity(&mut solver, problem, &vars, &mut names);
    constraints::age_eligibility(&mut solver, problem, &vars, &mut names, &mut forced_zero);
    constraints::availability(&mut solver, problem, &vars, &mut names, &mut forced_zero);
    constraints::one_session_per_activity(&mut solver, problem, &vars, &mut names);
    constraints::time_exclusivity(&mut solver, problem, &vars, &mut names);
    constraints::out_of_camp_exclusivity(&mut solver, problem, &vars, &mut names);

    let objective = objective_variable(&mut solver, problem, &vars);

    ScheduleModel {
        problem,
        solver,
        vars,
        objective,
        constraint_names: names,
        forced_zero,
    }
}

/// Introduce the objective as a bounded integer tied to the priority-weighted
/// sum of all selection variables.
fn objective_variable(solver: &mut Solver, problem: &Problem, vars: &VariableMap) -> DomainId {
    // Bounds: every negative priority on, every non-negative priority on.
    let (lower, upper) = problem
        .selections()
        .iter()
        .fold((0, 0), |(lower, upper), s| {
            if s.priority < 0 {
                (lower + s.priority, upper)
            } else {
                (lower, upper + s.priority)
            }
        });
    let objective = solver.new_bounded_integer(lower, upper);

    let mut terms: Vec<_> = problem
        .selections()
        .iter()
        .map(|s| vars.var(s).scaled(s.priority))
        .collect();
    terms.push(objective.scaled(-1));
    let tag = solver.new_constraint_tag();
    let _ = solver.add_constraint(cp::equals(terms, 0, tag)).post();
    objective
}

impl ScheduleModel<'_> {
    pub fn problem(&self) -> &Problem {
        self.problem
    }

    /// Number of decision variables, objective excluded.
    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    /// Constraint names in creation order.
    pub fn constraint_names(&self) -> &[String] {
        &self.constraint_names
    }

    /// Selections pinned to zero during model construction.
    pub fn forced_zero(&self) -> &[ForcedZero] {
        &self.forced_zero
    }
}
