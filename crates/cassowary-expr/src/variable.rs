use std::sync::atomic::{AtomicU64, Ordering};

use crate::constraint::PartialConstraint;
use crate::expression::{Expression, Term};

static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque, cheaply-copyable handle to an unknown in a constraint system.
///
/// Two variables are equal iff they were produced by the same call to
/// [`Variable::new`]; the id is never reused and is safe to allocate from
/// multiple threads or solvers concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(u64);

impl Variable {
    /// Allocate a fresh variable with a globally unique identity.
    pub fn new() -> Self {
        Variable(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id backing this variable, mostly useful for debug output.
    pub fn id(&self) -> u64 {
        self.0
    }

    /// Build a `self <= rhs` partial constraint, awaiting a strength.
    pub fn less_than_or_equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        Expression::from(self).less_than_or_equal_to(rhs)
    }

    /// Build a `self >= rhs` partial constraint, awaiting a strength.
    pub fn greater_than_or_equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        Expression::from(self).greater_than_or_equal_to(rhs)
    }

    /// Build a `self == rhs` partial constraint, awaiting a strength.
    pub fn equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        Expression::from(self).equal_to(rhs)
    }
}

impl Default for Variable {
    fn default() -> Self {
        Variable::new()
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Term {
        Term::new(var, 1.0)
    }
}

impl From<Variable> for Expression {
    fn from(var: Variable) -> Expression {
        Expression::from_term(Term::new(var, 1.0))
    }
}

macro_rules! impl_variable_ops {
    ($($trait_:ident, $method:ident;)*) => {
        $(
            impl std::ops::$trait_<f64> for Variable {
                type Output = Expression;
                fn $method(self, rhs: f64) -> Expression {
                    std::ops::$trait_::$method(Expression::from(self), rhs)
                }
            }

            impl std::ops::$trait_<Variable> for f64 {
                type Output = Expression;
                fn $method(self, rhs: Variable) -> Expression {
                    std::ops::$trait_::$method(self, Expression::from(rhs))
                }
            }

            impl std::ops::$trait_<Variable> for Variable {
                type Output = Expression;
                fn $method(self, rhs: Variable) -> Expression {
                    std::ops::$trait_::$method(Expression::from(self), Expression::from(rhs))
                }
            }
        )*
    };
}

impl_variable_ops! {
    Add, add;
    Sub, sub;
}

impl std::ops::Mul<f64> for Variable {
    type Output = Term;
    fn mul(self, rhs: f64) -> Term {
        Term::new(self, rhs)
    }
}

impl std::ops::Mul<Variable> for f64 {
    type Output = Term;
    fn mul(self, rhs: Variable) -> Term {
        Term::new(rhs, self)
    }
}

impl std::ops::Div<f64> for Variable {
    type Output = Term;
    fn div(self, rhs: f64) -> Term {
        Term::new(self, 1.0 / rhs)
    }
}

impl std::ops::Neg for Variable {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_distinct() {
        let a = Variable::new();
        let b = Variable::new();
        assert_ne!(a, b);
    }

    #[test]
    fn variable_equals_itself() {
        let a = Variable::new();
        assert_eq!(a, a);
    }
}
