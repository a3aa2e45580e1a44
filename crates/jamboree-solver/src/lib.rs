//! # jamboree-solver
//!
//! Constraint model builder and solve driver for jamboree problems.
//!
//! This crate provides:
//! - One 0/1 decision variable per candidate selection
//! - The six constraint families that make a schedule lawful: session
//!   capacity, age eligibility, group availability, one session per
//!   activity, time exclusivity, and out-of-camp day exclusivity
//! - Priority maximization with proof of optimality when the search
//!   finishes inside its budget
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use jamboree_core::{Activity, Problem, ScoutGroup, Selection, SolveStatus, TimeSlot};
//! use jamboree_solver::{build, DEFAULT_SOLVE_BUDGET};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 9, 25).unwrap();
//! let slot = |from: u32, to: u32| {
//!     TimeSlot::new(
//!         date.and_hms_opt(from, 0, 0).unwrap(),
//!         date.and_hms_opt(to, 0, 0).unwrap(),
//!     )
//!     .unwrap()
//! };
//!
//! let archery = Activity::new("Archery", "A1", [12], 20, vec![slot(9, 10)], false).unwrap();
//! let eagles = ScoutGroup::new("Eagles", "G1", 12, 10, vec![slot(8, 18)]).unwrap();
//! let wish = Selection {
//!     group: "G1".into(),
//!     activity: "A1".into(),
//!     slot: slot(9, 10),
//!     priority: 3,
//! };
//! let problem = Problem::new(vec![archery], vec![eagles], vec![wish]).unwrap();
//!
//! let report = build(&problem).solve(DEFAULT_SOLVE_BUDGET);
//! assert_eq!(report.status, SolveStatus::Optimal);
//! assert_eq!(report.schedule.unwrap().total_priority, 3);
//! ```

mod constraints;
mod model;
mod solve;
pub mod variables;

pub use model::{build, ScheduleModel};
pub use solve::DEFAULT_SOLVE_BUDGET;
pub use variables::{SelectionKey, VariableMap};
