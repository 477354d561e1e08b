//! Variable, expression, and strength algebra for the cassowary constraint
//! solver.
//!
//! This crate has no idea what a tableau, a symbol, or a simplex pivot is —
//! it only builds the small value records ([`Variable`], [`Expression`],
//! [`Constraint`]) that [`cassowary_core`](https://docs.rs/cassowary-core)
//! consumes. Everything here is plain arithmetic over `Vec`s and `f64`s.

mod constraint;
mod expression;
pub mod strength;
mod variable;

pub use constraint::{Constraint, PartialConstraint, RelationalOperator};
pub use expression::{Expression, Term};
pub use strength::Strength;
pub use variable::Variable;
