use crate::constraint::{PartialConstraint, RelationalOperator};
use crate::variable::Variable;

/// A single `coefficient * variable` summand of an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub variable: Variable,
    pub coefficient: f64,
}

impl Term {
    pub fn new(variable: Variable, coefficient: f64) -> Self {
        Term { variable, coefficient }
    }
}

/// A linear combination of variables plus a constant: `Σ cᵢ·vᵢ + k`.
///
/// Terms with a zero coefficient are dropped wherever they would be
/// introduced; callers never need to special-case them. Term order carries
/// no semantic meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    terms: Vec<Term>,
    pub constant: f64,
}

impl Expression {
    /// The empty expression `0`.
    pub fn new() -> Self {
        Expression::default()
    }

    /// A constant expression with no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Expression { terms: Vec::new(), constant }
    }

    /// An expression consisting of a single term.
    pub fn from_term(term: Term) -> Self {
        let mut expr = Expression::new();
        expr.add_term(term);
        expr
    }

    /// Iterate over the terms of this expression.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Fold an existing term for the same variable into this expression,
    /// dropping it if the resulting coefficient is (numerically) zero.
    pub fn add_term(&mut self, term: Term) {
        if term.coefficient == 0.0 {
            return;
        }
        if let Some(existing) = self.terms.iter_mut().find(|t| t.variable == term.variable) {
            existing.coefficient += term.coefficient;
            if existing.coefficient == 0.0 {
                self.terms.retain(|t| t.variable != term.variable);
            }
        } else {
            self.terms.push(term);
        }
    }

    /// True if this expression is a bare constant (no variable terms).
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    fn combine(mut self, other: Expression, sign: f64) -> Expression {
        self.constant += other.constant * sign;
        for term in other.terms {
            self.add_term(Term::new(term.variable, term.coefficient * sign));
        }
        self
    }

    /// Build a `self <= rhs` partial constraint, awaiting a strength.
    pub fn less_than_or_equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        PartialConstraint::new(self - rhs.into(), RelationalOperator::LessThanOrEqual)
    }

    /// Build a `self >= rhs` partial constraint, awaiting a strength.
    pub fn greater_than_or_equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        PartialConstraint::new(self - rhs.into(), RelationalOperator::GreaterThanOrEqual)
    }

    /// Build a `self == rhs` partial constraint, awaiting a strength.
    pub fn equal_to(self, rhs: impl Into<Expression>) -> PartialConstraint {
        PartialConstraint::new(self - rhs.into(), RelationalOperator::Equal)
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Expression {
        Expression::from_constant(constant)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Expression {
        Expression::from_term(term)
    }
}

impl std::ops::Add for Expression {
    type Output = Expression;
    fn add(self, rhs: Expression) -> Expression {
        self.combine(rhs, 1.0)
    }
}

impl std::ops::Add<f64> for Expression {
    type Output = Expression;
    fn add(self, rhs: f64) -> Expression {
        self.combine(Expression::from_constant(rhs), 1.0)
    }
}

impl std::ops::Add<Term> for Expression {
    type Output = Expression;
    fn add(self, rhs: Term) -> Expression {
        self.combine(Expression::from_term(rhs), 1.0)
    }
}

impl std::ops::Sub for Expression {
    type Output = Expression;
    fn sub(self, rhs: Expression) -> Expression {
        self.combine(rhs, -1.0)
    }
}

impl std::ops::Sub<f64> for Expression {
    type Output = Expression;
    fn sub(self, rhs: f64) -> Expression {
        self.combine(Expression::from_constant(rhs), -1.0)
    }
}

impl std::ops::Sub<Term> for Expression {
    type Output = Expression;
    fn sub(self, rhs: Term) -> Expression {
        self.combine(Expression::from_term(rhs), -1.0)
    }
}

impl std::ops::Mul<f64> for Expression {
    type Output = Expression;
    fn mul(mut self, rhs: f64) -> Expression {
        self.constant *= rhs;
        for term in &mut self.terms {
            term.coefficient *= rhs;
        }
        self.terms.retain(|t| t.coefficient != 0.0);
        self
    }
}

impl std::ops::Mul<Expression> for f64 {
    type Output = Expression;
    fn mul(self, rhs: Expression) -> Expression {
        rhs * self
    }
}

impl std::ops::Div<f64> for Expression {
    type Output = Expression;
    fn div(self, rhs: f64) -> Expression {
        self * (1.0 / rhs)
    }
}

impl std::ops::Neg for Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        self * -1.0
    }
}

impl std::ops::Add for Term {
    type Output = Expression;
    fn add(self, rhs: Term) -> Expression {
        Expression::from_term(self) + rhs
    }
}

impl std::ops::Add<f64> for Term {
    type Output = Expression;
    fn add(self, rhs: f64) -> Expression {
        Expression::from_term(self) + rhs
    }
}

impl std::ops::Mul<f64> for Term {
    type Output = Term;
    fn mul(self, rhs: f64) -> Term {
        Term::new(self.variable, self.coefficient * rhs)
    }
}

impl std::ops::Neg for Term {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self.variable, -self.coefficient)
    }
}

impl std::ops::Add<Term> for Variable {
    type Output = Expression;
    fn add(self, rhs: Term) -> Expression {
        Expression::from(self) + rhs
    }
}

impl std::ops::Add<Variable> for Term {
    type Output = Expression;
    fn add(self, rhs: Variable) -> Expression {
        Expression::from_term(self) + Expression::from(rhs)
    }
}

impl std::ops::Add<Variable> for Expression {
    type Output = Expression;
    fn add(self, rhs: Variable) -> Expression {
        self + Expression::from(rhs)
    }
}

impl std::ops::Sub<Variable> for Expression {
    type Output = Expression;
    fn sub(self, rhs: Variable) -> Expression {
        self - Expression::from(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coefficient_terms_are_dropped() {
        let v = Variable::new();
        let mut expr = Expression::from_term(Term::new(v, 2.0));
        expr.add_term(Term::new(v, -2.0));
        assert!(expr.is_constant());
        assert!(expr.terms().is_empty());
    }

    #[test]
    fn addition_folds_matching_variables() {
        let v = Variable::new();
        let expr = (v * 2.0) + (v * 3.0) + 1.0;
        assert_eq!(expr.terms().len(), 1);
        assert_eq!(expr.terms()[0].coefficient, 5.0);
        assert_eq!(expr.constant, 1.0);
    }

    #[test]
    fn scalar_multiply_scales_every_term() {
        let x = Variable::new();
        let y = Variable::new();
        let expr = (x + y + 2.0) * 2.0;
        assert_eq!(expr.constant, 4.0);
        assert!(expr.terms().iter().all(|t| t.coefficient == 2.0));
    }
}
