use std::collections::HashMap;

use cassowary_expr::Variable;

use crate::symbol::{Symbol, SymbolKind};

/// Bookkeeping the solver keeps per user-visible [`Variable`].
#[derive(Debug, Clone, Copy)]
struct VarData {
    symbol: Symbol,
    /// The value last handed back by `fetch_changes`, or `NaN` if the
    /// variable has never been reported. `NaN` lets the very first real
    /// value — including `0.0` — be reported as a change.
    last_value: f64,
    /// Number of registered constraints whose expression has a non-zero
    /// coefficient on this variable.
    refcount: u32,
}

/// Maps user [`Variable`] handles to the internal External [`Symbol`]s that
/// represent them in the tableau, tracking how many live constraints
/// reference each variable so fully-dereferenced variables can be forgotten.
#[derive(Debug, Default)]
pub struct VarRegistry {
    var_data: HashMap<Variable, VarData>,
    var_for_symbol: HashMap<Symbol, Variable>,
}

impl VarRegistry {
    pub fn new() -> Self {
        VarRegistry::default()
    }

    /// Get the External symbol for `var`, allocating one (and incrementing
    /// `*id_tick`) on first sight. Every call — including the one that
    /// creates the entry — counts as a reference and bumps the refcount.
    pub fn symbol_for(&mut self, var: Variable, id_tick: &mut u32) -> Symbol {
        if let Some(data) = self.var_data.get_mut(&var) {
            data.refcount += 1;
            data.symbol
        } else {
            let symbol = Symbol::new(*id_tick, SymbolKind::External);
            *id_tick += 1;
            self.var_data.insert(
                var,
                VarData { symbol, last_value: f64::NAN, refcount: 1 },
            );
            self.var_for_symbol.insert(symbol, var);
            symbol
        }
    }

    /// Drop one reference to `var`; if it reaches zero, forget the variable
    /// entirely (its symbol may still linger in tableau rows as a non-basic
    /// zero column, which is harmless).
    pub fn dereference(&mut self, var: Variable) {
        let should_remove = match self.var_data.get_mut(&var) {
            Some(data) => {
                data.refcount = data.refcount.saturating_sub(1);
                data.refcount == 0
            }
            None => false,
        };
        if should_remove {
            if let Some(data) = self.var_data.remove(&var) {
                self.var_for_symbol.remove(&data.symbol);
            }
        }
    }

    pub fn symbol_of(&self, var: Variable) -> Option<Symbol> {
        self.var_data.get(&var).map(|d| d.symbol)
    }

    pub fn variable_of(&self, symbol: Symbol) -> Option<Variable> {
        self.var_for_symbol.get(&symbol).copied()
    }

    pub fn refcount(&self, var: Variable) -> u32 {
        self.var_data.get(&var).map(|d| d.refcount).unwrap_or(0)
    }

    pub fn last_value(&self, var: Variable) -> f64 {
        self.var_data.get(&var).map(|d| d.last_value).unwrap_or(0.0)
    }

    pub fn set_last_value(&mut self, var: Variable, value: f64) {
        if let Some(data) = self.var_data.get_mut(&var) {
            data.last_value = value;
        }
    }

    pub fn clear(&mut self) {
        self.var_data.clear();
        self.var_for_symbol.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_symbol_for_a_variable_bumps_id_tick_and_refcount() {
        let mut reg = VarRegistry::new();
        let mut id_tick = 1u32;
        let v = Variable::new();
        let s1 = reg.symbol_for(v, &mut id_tick);
        assert_eq!(id_tick, 2);
        assert_eq!(reg.refcount(v), 1);

        let s2 = reg.symbol_for(v, &mut id_tick);
        assert_eq!(s1, s2);
        assert_eq!(id_tick, 2, "existing variable must not allocate a new symbol");
        assert_eq!(reg.refcount(v), 2);
    }

    #[test]
    fn dereference_to_zero_forgets_the_variable() {
        let mut reg = VarRegistry::new();
        let mut id_tick = 1u32;
        let v = Variable::new();
        let symbol = reg.symbol_for(v, &mut id_tick);
        reg.dereference(v);
        assert!(reg.symbol_of(v).is_none());
        assert!(reg.variable_of(symbol).is_none());
    }

    #[test]
    fn last_value_starts_as_nan() {
        let mut reg = VarRegistry::new();
        let mut id_tick = 1u32;
        let v = Variable::new();
        reg.symbol_for(v, &mut id_tick);
        assert!(reg.last_value(v).is_nan());
    }
}
