//! Concrete end-to-end scenarios against the public `Solver` API.

use cassowary_core::{strength, Solver, Variable};

#[test]
fn single_equality() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_constraint(x.equal_to(10.0) | strength::REQUIRED).unwrap();

    assert_eq!(solver.get_value(x), 10.0);
    assert_eq!(solver.fetch_changes(), &[(x, 10.0)]);
}

#[test]
fn transitive_equality() {
    let mut solver = Solver::new();
    let x = Variable::new();
    let y = Variable::new();
    solver.add_constraint(x.equal_to(20.0) | strength::REQUIRED).unwrap();
    solver.add_constraint(y.equal_to(x * 2.0 + 1.0) | strength::REQUIRED).unwrap();

    assert_eq!(solver.get_value(x), 20.0);
    assert_eq!(solver.get_value(y), 41.0);
}

#[test]
fn inequality_with_preference() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_constraint(x.greater_than_or_equal_to(100.0) | strength::REQUIRED).unwrap();
    solver.add_constraint(x.equal_to(50.0) | strength::WEAK).unwrap();

    assert_eq!(solver.get_value(x), 100.0);
}

#[test]
fn edit_variable_round_trip() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_edit(x, strength::STRONG).unwrap();

    solver.suggest_value(x, 5.0).unwrap();
    assert_eq!(solver.fetch_changes(), &[(x, 5.0)]);

    solver.suggest_value(x, 12.0).unwrap();
    assert_eq!(solver.fetch_changes(), &[(x, 12.0)]);
}

#[test]
fn unsatisfiable_constraint_leaves_solver_usable() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_constraint(x.greater_than_or_equal_to(10.0) | strength::REQUIRED).unwrap();

    let result = solver.add_constraint(x.less_than_or_equal_to(5.0) | strength::REQUIRED);
    assert!(result.is_err());

    let y = Variable::new();
    solver.add_constraint(y.equal_to(1.0) | strength::REQUIRED).unwrap();
    assert_eq!(solver.get_value(y), 1.0);
}

#[test]
fn removing_a_constraint_restores_the_weaker_one() {
    let mut solver = Solver::new();
    let x = Variable::new();
    let required = x.equal_to(10.0) | strength::REQUIRED;
    solver.add_constraint(required.clone()).unwrap();
    solver.add_constraint(x.equal_to(20.0) | strength::WEAK).unwrap();

    assert_eq!(solver.get_value(x), 10.0);

    solver.remove_constraint(&required).unwrap();
    assert_eq!(solver.get_value(x), 20.0);
}

#[test]
fn fetch_changes_is_empty_on_the_second_call() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_constraint(x.equal_to(1.0) | strength::REQUIRED).unwrap();

    assert!(!solver.fetch_changes().is_empty());
    assert!(solver.fetch_changes().is_empty());
}

#[test]
fn duplicate_constraint_is_rejected() {
    let mut solver = Solver::new();
    let x = Variable::new();
    let c = x.equal_to(1.0) | strength::REQUIRED;
    solver.add_constraint(c.clone()).unwrap();
    assert!(solver.add_constraint(c).is_err());
}

#[test]
fn removing_unknown_constraint_is_an_error() {
    let mut solver = Solver::new();
    let x = Variable::new();
    let c = x.equal_to(1.0) | strength::REQUIRED;
    assert!(solver.remove_constraint(&c).is_err());
}

#[test]
fn reset_forgets_everything() {
    let mut solver = Solver::new();
    let x = Variable::new();
    solver.add_constraint(x.equal_to(7.0) | strength::REQUIRED).unwrap();
    assert_eq!(solver.get_value(x), 7.0);

    solver.reset();
    assert_eq!(solver.get_value(x), 0.0);
}
