//! Property-based checks of the invariants and laws random operation
//! sequences must preserve.

use cassowary_core::{strength, Solver, Variable};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddEq { var: usize, target: f64, weak: bool },
    Remove { index: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, -1000.0..1000.0f64, any::<bool>())
            .prop_map(|(var, target, weak)| Op::AddEq { var, target, weak }),
        (0..8usize).prop_map(|index| Op::Remove { index }),
    ]
}

proptest! {
    /// After any sequence of add/remove operations the solver stays usable:
    /// `get_value` never panics and repeated `fetch_changes` calls converge
    /// to empty, matching the "second call returns nothing new" law.
    #[test]
    fn solver_survives_random_add_remove_sequences(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut solver = Solver::new();
        let vars: Vec<Variable> = (0..4).map(|_| Variable::new()).collect();
        let mut live = Vec::new();

        for op in ops {
            match op {
                Op::AddEq { var, target, weak } => {
                    let strength = if weak { strength::WEAK } else { strength::MEDIUM };
                    let constraint = vars[var].equal_to(target) | strength;
                    if solver.add_constraint(constraint.clone()).is_ok() {
                        live.push(constraint);
                    }
                }
                Op::Remove { index } => {
                    if !live.is_empty() {
                        let constraint = live.remove(index % live.len());
                        solver.remove_constraint(&constraint).unwrap();
                    }
                }
            }
        }

        for &var in &vars {
            prop_assert!(solver.get_value(var).is_finite());
        }

        solver.fetch_changes();
        prop_assert!(solver.fetch_changes().is_empty());
    }

    /// `add_constraint(c); remove_constraint(c)` returns every touched
    /// variable to its pre-add value.
    #[test]
    fn add_then_remove_is_a_no_op(target in -1000.0..1000.0f64) {
        let mut solver = Solver::new();
        let x = Variable::new();
        let before = solver.get_value(x);

        let c = x.equal_to(target) | strength::MEDIUM;
        solver.add_constraint(c.clone()).unwrap();
        solver.remove_constraint(&c).unwrap();

        prop_assert_eq!(solver.get_value(x), before);
    }

    /// Suggesting a value for an edit variable is reflected by `get_value`
    /// once dual-simplex feasibility is restored.
    #[test]
    fn suggested_edit_values_are_observed(a in -500.0..500.0f64, b in -500.0..500.0f64) {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_edit(x, strength::STRONG).unwrap();

        solver.suggest_value(x, a).unwrap();
        prop_assert!((solver.get_value(x) - a).abs() < 1e-6);

        solver.suggest_value(x, b).unwrap();
        prop_assert!((solver.get_value(x) - b).abs() < 1e-6);
    }
}
