use std::sync::atomic::{AtomicU64, Ordering};

use crate::expression::Expression;
use crate::strength::{self, Strength};

/// The relation of a constraint: `expression OP 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
}

static NEXT_CONSTRAINT_ID: AtomicU64 = AtomicU64::new(1);

/// A linear constraint: `expression op 0`, at a given [`Strength`].
///
/// Constraints have identity, not structural, equality: two constraints
/// built from identical expressions are distinct, the same way two
/// `Variable`s are distinct handles. `Clone` duplicates the handle, not the
/// identity.
#[derive(Debug, Clone)]
pub struct Constraint {
    id: u64,
    pub expression: Expression,
    pub operator: RelationalOperator,
    pub strength: Strength,
}

impl Constraint {
    pub fn new(expression: Expression, operator: RelationalOperator, strength: Strength) -> Self {
        Constraint {
            id: NEXT_CONSTRAINT_ID.fetch_add(1, Ordering::Relaxed),
            expression,
            operator,
            strength,
        }
    }

    /// Build a `REQUIRED`-strength constraint.
    pub fn required(expression: Expression, operator: RelationalOperator) -> Self {
        Constraint::new(expression, operator, strength::REQUIRED)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Constraint {}

impl std::hash::Hash for Constraint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An expression and relation awaiting a [`Strength`] to become a [`Constraint`].
///
/// Produced by [`Expression::equal_to`]/`less_than_or_equal_to`/`greater_than_or_equal_to`;
/// completed with the `|` operator: `expr.equal_to(0.0) | strength::REQUIRED`.
#[derive(Debug, Clone)]
pub struct PartialConstraint {
    expression: Expression,
    operator: RelationalOperator,
}

impl PartialConstraint {
    pub(crate) fn new(expression: Expression, operator: RelationalOperator) -> Self {
        PartialConstraint { expression, operator }
    }
}

impl std::ops::BitOr<Strength> for PartialConstraint {
    type Output = Constraint;
    fn bitor(self, strength: Strength) -> Constraint {
        Constraint::new(self.expression, self.operator, strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn constraints_have_identity_equality() {
        let x = Variable::new();
        let a = x.equal_to(0.0) | strength::REQUIRED;
        let b = x.equal_to(0.0) | strength::REQUIRED;
        assert_ne!(a, b);
        let a_clone = a.clone();
        assert_eq!(a, a_clone);
    }

    #[test]
    fn partial_constraint_bitor_assigns_strength() {
        let x = Variable::new();
        let c = x.greater_than_or_equal_to(5.0) | strength::STRONG;
        assert_eq!(c.strength, strength::STRONG);
        assert_eq!(c.operator, RelationalOperator::GreaterThanOrEqual);
    }
}
