//! The Cassowary incremental constraint-solving algorithm.
//!
//! This crate implements the tableau: symbols, rows, the simplex pivoting
//! kernel, and the [`Solver`] that drives them. Constraint and variable
//! *algebra* — the pieces you actually write in application code — live in
//! `cassowary-expr`; this crate only knows how to turn that algebra into a
//! feasible, optimal assignment.

mod error;
mod registry;
mod row;
mod solver;
mod symbol;
mod tag;

pub use error::{
    AddConstraintError, AddEditVariableError, InternalSolverError, RemoveConstraintError,
    RemoveEditVariableError, SuggestValueError,
};
pub use solver::Solver;

pub use cassowary_expr::{strength, Constraint, Expression, RelationalOperator, Strength, Term, Variable};
