use std::collections::{HashMap, HashSet};

use cassowary_expr::{strength, Constraint, Variable};
use indexmap::IndexMap;

use crate::error::{
    AddConstraintError, AddEditVariableError, InternalSolverError, RemoveConstraintError,
    RemoveEditVariableError, SuggestValueError,
};
use crate::registry::VarRegistry;
use crate::row::{near_zero, Row, EPSILON};
use crate::symbol::{Symbol, SymbolKind};
use crate::tag::Tag;

#[derive(Debug, Clone)]
struct EditInfo {
    tag: Tag,
    constraint: Constraint,
    constant: f64,
}

/// An incremental Cassowary constraint solver.
///
/// Constraints are added and removed one at a time; the tableau is kept
/// optimal and feasible between calls rather than re-solved from scratch.
/// Every method takes `&mut self` and runs to completion synchronously —
/// there is no concurrency or cancellation inside a `Solver`.
#[derive(Debug)]
pub struct Solver {
    id_tick: u32,
    objective: Row,
    artificial: Option<Row>,
    rows: IndexMap<Symbol, Row>,
    registry: VarRegistry,
    constraints: HashMap<Constraint, Tag>,
    edits: HashMap<Variable, EditInfo>,
    infeasible_rows: Vec<Symbol>,
    changed: HashSet<Variable>,
    should_clear_changes: bool,
    public_changes: Vec<(Variable, f64)>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Solver {
            id_tick: 1,
            objective: Row::new(0.0),
            artificial: None,
            rows: IndexMap::new(),
            registry: VarRegistry::new(),
            constraints: HashMap::new(),
            edits: HashMap::new(),
            infeasible_rows: Vec::new(),
            changed: HashSet::new(),
            should_clear_changes: false,
            public_changes: Vec::new(),
        }
    }

    // ---- public API -----------------------------------------------------

    /// Add a constraint to the solver. Constraints have identity equality —
    /// adding the same `Constraint` value twice is a `DuplicateConstraint`
    /// error, even if a structurally identical one was built separately.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), AddConstraintError> {
        if self.constraints.contains_key(&constraint) {
            return Err(AddConstraintError::DuplicateConstraint);
        }

        let (mut row, tag) = self.create_row(&constraint);
        let mut subject = self.choose_subject(&row, &tag);

        if subject.is_invalid() && row.cells().keys().all(|s| s.is_dummy()) {
            if !near_zero(row.constant) {
                return Err(AddConstraintError::UnsatisfiableConstraint);
            }
            subject = tag.marker;
        }

        if subject.is_invalid() {
            if !self.add_with_artificial_variable(&row)? {
                return Err(AddConstraintError::UnsatisfiableConstraint);
            }
        } else {
            row.solve_for(subject);
            self.substitute(subject, &row);
            if subject.is_external() && row.constant != 0.0 {
                self.mark_changed(subject);
            }
            self.rows.insert(subject, row);
        }

        self.constraints.insert(constraint, tag);
        self.optimize(false)?;

        Ok(())
    }

    /// Remove a previously-added constraint.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), RemoveConstraintError> {
        let tag = self.constraints.remove(constraint).ok_or(RemoveConstraintError::UnknownConstraint)?;

        self.remove_constraint_effects(&tag, constraint.strength);

        if self.rows.shift_remove(&tag.marker).is_none() {
            let (leaving, mut row) = self
                .get_marker_leaving_row(tag.marker)
                .ok_or(InternalSolverError::FailedToFindLeavingRow)?;
            row.solve_for_pair(leaving, tag.marker);
            self.substitute(tag.marker, &row);
        }

        self.optimize(false)?;

        for term in constraint.expression.terms() {
            self.registry.dereference(term.variable);
        }

        Ok(())
    }

    /// True if `constraint` is currently registered.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains_key(constraint)
    }

    /// Mark `var` as an edit variable: a variable whose value can be driven
    /// with [`Solver::suggest_value`]. Internally, adds a `var == 0`
    /// constraint at `strength` (which must be below `REQUIRED`).
    pub fn add_edit(&mut self, var: Variable, strength: f64) -> Result<(), AddEditVariableError> {
        if self.edits.contains_key(&var) {
            return Err(AddEditVariableError::DuplicateEditVariable);
        }
        if strength::is_required(strength) {
            return Err(AddEditVariableError::BadRequiredStrength);
        }

        let constraint = Constraint::new(
            cassowary_expr::Expression::from(var),
            cassowary_expr::RelationalOperator::Equal,
            strength,
        );

        // Constraint identity is freshly minted above, so this can only fail
        // as Unsatisfiable, never Duplicate; an edit constraint is always
        // satisfiable (it is a single-variable equality).
        self.add_constraint(constraint.clone())
            .expect("a fresh single-variable equality constraint cannot fail to add");

        let tag = self.constraints[&constraint];
        self.edits.insert(var, EditInfo { tag, constraint, constant: 0.0 });

        Ok(())
    }

    /// Stop treating `var` as an edit variable, removing its backing constraint.
    pub fn remove_edit(&mut self, var: Variable) -> Result<(), RemoveEditVariableError> {
        let info = self.edits.remove(&var).ok_or(RemoveEditVariableError::UnknownEditVariable)?;
        self.remove_constraint(&info.constraint).map_err(|err| match err {
            RemoveConstraintError::UnknownConstraint => {
                RemoveEditVariableError::Internal(InternalSolverError::EditConstraintNotInSystem)
            }
            RemoveConstraintError::Internal(inner) => RemoveEditVariableError::Internal(inner),
        })
    }

    /// True if `var` currently has an edit constraint.
    pub fn has_edit(&self, var: &Variable) -> bool {
        self.edits.contains_key(var)
    }

    /// Suggest a new value for an edit variable, restoring feasibility with
    /// the dual simplex method rather than re-solving from scratch.
    pub fn suggest_value(&mut self, var: Variable, value: f64) -> Result<(), SuggestValueError> {
        let (marker, other, delta) = {
            let info = self.edits.get_mut(&var).ok_or(SuggestValueError::UnknownEditVariable)?;
            let delta = value - info.constant;
            info.constant = value;
            (info.tag.marker, info.tag.other, delta)
        };

        if let Some(row) = self.rows.get_mut(&marker) {
            if row.add(-delta) < 0.0 {
                self.infeasible_rows.push(marker);
            }
        } else if let Some(row) = self.rows.get_mut(&other) {
            if row.add(delta) < 0.0 {
                self.infeasible_rows.push(other);
            }
        } else {
            let mut changed_externals = Vec::new();
            let mut newly_infeasible = Vec::new();
            for (&symbol, row) in self.rows.iter_mut() {
                let coeff = row.coefficient_for(marker);
                if coeff == 0.0 {
                    continue;
                }
                if delta * coeff != 0.0 && symbol.is_external() {
                    changed_externals.push(symbol);
                }
                if row.add(delta * coeff) < 0.0 && !symbol.is_external() {
                    newly_infeasible.push(symbol);
                }
            }
            for symbol in changed_externals {
                self.mark_changed(symbol);
            }
            self.infeasible_rows.extend(newly_infeasible);
        }

        self.dual_optimize()?;
        Ok(())
    }

    /// Which variables changed value since the last call to `fetch_changes`
    /// (or since solver creation, for the first call).
    pub fn fetch_changes(&mut self) -> &[(Variable, f64)] {
        if self.should_clear_changes {
            self.changed.clear();
            self.should_clear_changes = false;
        } else {
            self.should_clear_changes = true;
        }

        self.public_changes.clear();
        let changed: Vec<Variable> = self.changed.iter().copied().collect();
        for var in changed {
            let new_value = self
                .registry
                .symbol_of(var)
                .and_then(|symbol| self.rows.get(&symbol))
                .map(|row| row.constant)
                .unwrap_or(0.0);
            let new_value = if new_value == 0.0 { 0.0 } else { new_value };

            let last = self.registry.last_value(var);
            if last.is_nan() || last != new_value {
                self.public_changes.push((var, new_value));
                self.registry.set_last_value(var, new_value);
            }
        }

        &self.public_changes
    }

    /// The current value of `var`, or `0.0` if the solver has never seen it.
    pub fn get_value(&self, var: Variable) -> f64 {
        let value = self
            .registry
            .symbol_of(var)
            .and_then(|symbol| self.rows.get(&symbol))
            .map(|row| row.constant)
            .unwrap_or(0.0);
        if value == 0.0 {
            0.0
        } else {
            value
        }
    }

    /// Forget every constraint, edit variable, and tableau row. Previously
    /// allocated `Variable` handles remain valid but are no longer known to
    /// the solver.
    pub fn reset(&mut self) {
        self.id_tick = 1;
        self.objective = Row::new(0.0);
        self.artificial = None;
        self.rows.clear();
        self.registry.clear();
        self.constraints.clear();
        self.edits.clear();
        self.infeasible_rows.clear();
        self.changed.clear();
        self.should_clear_changes = false;
        self.public_changes.clear();
    }

    // ---- row construction -------------------------------------------------

    fn new_symbol(&mut self, kind: SymbolKind) -> Symbol {
        let symbol = Symbol::new(self.id_tick, kind);
        self.id_tick += 1;
        symbol
    }

    fn create_row(&mut self, constraint: &Constraint) -> (Row, Tag) {
        let mut row = Row::new(constraint.expression.constant);

        for term in constraint.expression.terms() {
            if near_zero(term.coefficient) {
                continue;
            }
            let symbol = self.registry.symbol_for(term.variable, &mut self.id_tick);
            if let Some(basic_row) = self.rows.get(&symbol) {
                row.insert_row(basic_row, term.coefficient);
            } else {
                row.insert_symbol(symbol, term.coefficient);
            }
        }

        let mut tag = Tag::new(Symbol::default(), Symbol::default());

        use cassowary_expr::RelationalOperator::*;
        match constraint.operator {
            LessThanOrEqual | GreaterThanOrEqual => {
                let coeff = if constraint.operator == LessThanOrEqual { 1.0 } else { -1.0 };
                let slack = self.new_symbol(SymbolKind::Slack);
                tag.marker = slack;
                row.insert_symbol(slack, coeff);

                if !strength::is_required(constraint.strength) {
                    let error = self.new_symbol(SymbolKind::Error);
                    tag.other = error;
                    row.insert_symbol(error, -coeff);
                    self.objective.insert_symbol(error, constraint.strength);
                }
            }
            Equal => {
                if strength::is_required(constraint.strength) {
                    let dummy = self.new_symbol(SymbolKind::Dummy);
                    tag.marker = dummy;
                    row.insert_symbol(dummy, 1.0);
                } else {
                    let errplus = self.new_symbol(SymbolKind::Error);
                    let errminus = self.new_symbol(SymbolKind::Error);
                    tag.marker = errplus;
                    tag.other = errminus;
                    row.insert_symbol(errplus, -1.0);
                    row.insert_symbol(errminus, 1.0);
                    self.objective.insert_symbol(errplus, constraint.strength);
                    self.objective.insert_symbol(errminus, constraint.strength);
                }
            }
        }

        if row.constant < 0.0 {
            row.reverse_sign();
        }

        (row, tag)
    }

    fn choose_subject(&self, row: &Row, tag: &Tag) -> Symbol {
        for (&symbol, _) in row.cells() {
            if symbol.is_external() {
                return symbol;
            }
        }
        if tag.marker.is_pivotable() && row.coefficient_for(tag.marker) < 0.0 {
            return tag.marker;
        }
        if tag.other.is_pivotable() && row.coefficient_for(tag.other) < 0.0 {
            return tag.other;
        }
        Symbol::default()
    }

    fn add_with_artificial_variable(&mut self, row: &Row) -> Result<bool, InternalSolverError> {
        let art = self.new_symbol(SymbolKind::Slack);
        self.rows.insert(art, row.clone());
        self.artificial = Some(row.clone());

        self.optimize(true)?;

        let success = near_zero(self.artificial.as_ref().expect("just set").constant);
        self.artificial = None;

        if let Some(mut art_row) = self.rows.shift_remove(&art) {
            if art_row.is_empty() {
                self.scrub_symbol(art);
                return Ok(success);
            }

            let entering = art_row.cells().iter().find(|(s, _)| s.is_pivotable()).map(|(&s, _)| s);
            match entering {
                None => {
                    self.scrub_symbol(art);
                    return Ok(false);
                }
                Some(entering) => {
                    art_row.solve_for_pair(art, entering);
                    self.substitute(entering, &art_row);
                    self.rows.insert(entering, art_row);
                }
            }
        }

        self.scrub_symbol(art);
        Ok(success)
    }

    fn scrub_symbol(&mut self, symbol: Symbol) {
        for row in self.rows.values_mut() {
            row.remove(symbol);
        }
        self.objective.remove(symbol);
    }

    // ---- substitution & pivoting -------------------------------------------

    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        let mut changed_externals = Vec::new();
        let mut newly_infeasible = Vec::new();

        for (&other_symbol, other_row) in self.rows.iter_mut() {
            let changed = other_row.substitute(symbol, row);
            if changed && other_symbol.is_external() {
                changed_externals.push(other_symbol);
            }
            if !other_symbol.is_external() && other_row.constant < 0.0 {
                newly_infeasible.push(other_symbol);
            }
        }

        for symbol in changed_externals {
            self.mark_changed(symbol);
        }
        self.infeasible_rows.extend(newly_infeasible);

        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    fn mark_changed(&mut self, symbol: Symbol) {
        if let Some(var) = self.registry.variable_of(symbol) {
            self.changed.insert(var);
        }
    }

    /// Drive `objective` (or, if `use_artificial`, the Phase 1 artificial
    /// objective) to its optimum via the primal simplex method, pivoting the
    /// whole tableau along the way.
    fn optimize(&mut self, use_artificial: bool) -> Result<(), InternalSolverError> {
        loop {
            let entering = {
                let objective = if use_artificial {
                    self.artificial.as_ref().expect("optimize(true) requires an artificial row")
                } else {
                    &self.objective
                };
                Self::get_entering(objective)
            };

            if entering.is_invalid() {
                return Ok(());
            }

            let (leaving, mut row) = self
                .find_leaving_row(entering)
                .ok_or(InternalSolverError::ObjectiveUnbounded)?;

            row.solve_for_pair(leaving, entering);
            self.substitute(entering, &row);
            if entering.is_external() && row.constant != 0.0 {
                self.mark_changed(entering);
            }
            self.rows.insert(entering, row);
        }
    }

    /// The first non-Dummy symbol with a negative objective coefficient, in
    /// row-insertion order; `Symbol::default()` (Invalid) if none (optimum).
    fn get_entering(objective: &Row) -> Symbol {
        for (&symbol, &coeff) in objective.cells() {
            if !symbol.is_dummy() && coeff < -EPSILON {
                return symbol;
            }
        }
        Symbol::default()
    }

    /// Minimum-ratio test over non-External basic rows with a negative
    /// coefficient on `entering`; ties keep the first-encountered row (no
    /// Bland's rule, matching the reference algorithm).
    fn find_leaving_row(&mut self, entering: Symbol) -> Option<(Symbol, Row)> {
        let mut best: Option<(Symbol, f64)> = None;
        for (&symbol, row) in self.rows.iter() {
            if symbol.is_external() {
                continue;
            }
            let coeff = row.coefficient_for(entering);
            if coeff < -EPSILON {
                let ratio = -row.constant / coeff;
                if best.map_or(true, |(_, best_ratio)| ratio < best_ratio) {
                    best = Some((symbol, ratio));
                }
            }
        }
        let symbol = best.map(|(s, _)| s)?;
        let row = self.rows.shift_remove(&symbol)?;
        Some((symbol, row))
    }

    /// Restore feasibility (all non-External basic rows `constant >= 0`) via
    /// the dual simplex method, working off the `infeasible_rows` worklist.
    fn dual_optimize(&mut self) -> Result<(), InternalSolverError> {
        while let Some(leaving) = self.infeasible_rows.pop() {
            let needs_repair = matches!(self.rows.get(&leaving), Some(row) if row.constant < 0.0);
            if !needs_repair {
                continue;
            }

            let mut row = self.rows.shift_remove(&leaving).expect("checked above");
            let entering = self.get_dual_entering(&row);
            if entering.is_invalid() {
                return Err(InternalSolverError::DualOptimizeFailed);
            }

            row.solve_for_pair(leaving, entering);
            self.substitute(entering, &row);
            if entering.is_external() && row.constant != 0.0 {
                self.mark_changed(entering);
            }
            self.rows.insert(entering, row);
        }
        Ok(())
    }

    /// Over `row`'s non-Dummy cells with a positive coefficient, the symbol
    /// minimizing `objective.coefficient_for(sym) / coeff`.
    fn get_dual_entering(&self, row: &Row) -> Symbol {
        let mut best: Option<(Symbol, f64)> = None;
        for (&symbol, &coeff) in row.cells() {
            if symbol.is_dummy() || coeff <= EPSILON {
                continue;
            }
            let ratio = self.objective.coefficient_for(symbol) / coeff;
            if best.map_or(true, |(_, best_ratio)| ratio < best_ratio) {
                best = Some((symbol, ratio));
            }
        }
        best.map(|(s, _)| s).unwrap_or_default()
    }

    // ---- constraint removal helpers ---------------------------------------

    fn remove_constraint_effects(&mut self, tag: &Tag, strength: f64) {
        if tag.marker.is_error() {
            self.remove_error_effect(tag.marker, strength);
        }
        if tag.other.is_error() {
            self.remove_error_effect(tag.other, strength);
        }
    }

    fn remove_error_effect(&mut self, marker: Symbol, strength: f64) {
        if let Some(row) = self.rows.get(&marker).cloned() {
            self.objective.insert_row(&row, -strength);
        } else {
            self.objective.insert_symbol(marker, -strength);
        }
    }

    /// Three-way precedence search for the row to pivot `marker` out of when
    /// it is not itself basic: prefer a non-External row with a negative
    /// coefficient (minimizing `-constant/c`), then a non-External row with a
    /// positive coefficient (minimizing `constant/c`), then fall back to the
    /// last-seen External row.
    fn get_marker_leaving_row(&mut self, marker: Symbol) -> Option<(Symbol, Row)> {
        let mut negative: Option<(Symbol, f64)> = None;
        let mut positive: Option<(Symbol, f64)> = None;
        let mut external: Option<Symbol> = None;

        for (&symbol, row) in self.rows.iter() {
            let coeff = row.coefficient_for(marker);
            if coeff == 0.0 {
                continue;
            }
            if symbol.is_external() {
                external = Some(symbol);
            } else if coeff < 0.0 {
                let ratio = -row.constant / coeff;
                if negative.map_or(true, |(_, best)| ratio < best) {
                    negative = Some((symbol, ratio));
                }
            } else {
                let ratio = row.constant / coeff;
                if positive.map_or(true, |(_, best)| ratio < best) {
                    positive = Some((symbol, ratio));
                }
            }
        }

        let chosen = negative.map(|(s, _)| s).or_else(|| positive.map(|(s, _)| s)).or(external)?;
        let row = self.rows.shift_remove(&chosen)?;
        if chosen.is_external() && row.constant != 0.0 {
            self.mark_changed(chosen);
        }
        Some((chosen, row))
    }
}
