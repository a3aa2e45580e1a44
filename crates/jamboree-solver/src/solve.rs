//! Solve driver.
//!
//! Consumes a `ScheduleModel`, runs linear SAT-UNSAT maximization under a
//! wall-clock budget, and folds the outcome into a `SolveReport`.

use std::time::Duration;

use jamboree_core::{Schedule, SolveReport, SolveStatus};
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::Solver;

use crate::model::ScheduleModel;

/// Default wall-clock budget for one solve run.
pub const DEFAULT_SOLVE_BUDGET: Duration = Duration::from_secs(300);

impl ScheduleModel<'_> {
    /// Run the search and report the outcome.
    ///
    /// `Optimal` and `Feasible` carry a schedule; `Feasible` means the budget
    /// expired while there was still room to improve. A well-formed model is
    /// never `Infeasible`, since leaving every variable at zero satisfies all
    /// constraint families; the status exists for completeness.
    pub fn solve(mut self, budget: Duration) -> SolveReport {
        let mut brancher = self.solver.default_brancher();
        let mut termination = TimeBudget::starting_now(budget);

        fn noop_callback<B>(_: &Solver, _: pumpkin_solver::results::SolutionReference, _: &B) {}
        let result = self.solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Maximise, self.objective, noop_callback),
        );

        let (status, schedule) = match result {
            OptimisationResult::Optimal(solution) => {
                (SolveStatus::Optimal, Some(self.chosen(&solution)))
            }
            OptimisationResult::Satisfiable(solution) => {
                (SolveStatus::Feasible, Some(self.chosen(&solution)))
            }
            OptimisationResult::Unsatisfiable => (SolveStatus::Infeasible, None),
            OptimisationResult::Unknown => (SolveStatus::Unknown, None),
        };

        SolveReport {
            status,
            schedule,
            forced_zero: self.forced_zero,
        }
    }

    /// Read the chosen selections out of a solution, in problem order.
    fn chosen<S: ProblemSolution>(&self, solution: &S) -> Schedule {
        let mut assignments = Vec::new();
        let mut total_priority = 0i64;
        for selection in self.problem.selections() {
            if solution.get_integer_value(self.vars.var(selection)) == 1 {
                total_priority += i64::from(selection.priority);
                assignments.push(selection.clone());
            }
        }
        Schedule {
            assignments,
            total_priority,
        }
    }
}
