//! Error types for the solver's public API.
//!
//! One `thiserror` enum per operation family, the way `seed_core::errors`
//! groups parse/resolve/expand errors: user-recoverable precondition
//! violations and model-level unsatisfiability are distinguished from
//! `InternalSolverError`, which should never actually surface and indicates
//! a broken tableau invariant if it does.

use thiserror::Error;

/// A bug in the solver itself: a documented invariant was violated. These
/// should never occur for any sequence of valid public-API calls; if one
/// does, it means the tableau was left in an inconsistent state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InternalSolverError {
    #[error("objective function is unbounded")]
    ObjectiveUnbounded,

    #[error("dual optimize failed to find an entering variable")]
    DualOptimizeFailed,

    #[error("failed to find a leaving row while removing a constraint")]
    FailedToFindLeavingRow,

    #[error("edit variable's constraint is not present in the solver")]
    EditConstraintNotInSystem,
}

/// Errors from [`crate::Solver::add_constraint`].
#[derive(Debug, Error)]
pub enum AddConstraintError {
    #[error("the constraint has already been added to the solver")]
    DuplicateConstraint,

    #[error("the constraint is required but cannot be satisfied")]
    UnsatisfiableConstraint,

    #[error(transparent)]
    Internal(#[from] InternalSolverError),
}

/// Errors from [`crate::Solver::remove_constraint`].
#[derive(Debug, Error)]
pub enum RemoveConstraintError {
    #[error("the constraint was not found in the solver")]
    UnknownConstraint,

    #[error(transparent)]
    Internal(#[from] InternalSolverError),
}

/// Errors from [`crate::Solver::add_edit`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AddEditVariableError {
    #[error("the variable already has an edit constraint")]
    DuplicateEditVariable,

    #[error("an edit constraint cannot have REQUIRED strength")]
    BadRequiredStrength,
}

/// Errors from [`crate::Solver::remove_edit`].
#[derive(Debug, Error)]
pub enum RemoveEditVariableError {
    #[error("the variable does not have an edit constraint")]
    UnknownEditVariable,

    #[error(transparent)]
    Internal(#[from] InternalSolverError),
}

/// Errors from [`crate::Solver::suggest_value`].
#[derive(Debug, Error)]
pub enum SuggestValueError {
    #[error("the variable does not have an edit constraint")]
    UnknownEditVariable,

    #[error(transparent)]
    Internal(#[from] InternalSolverError),
}
