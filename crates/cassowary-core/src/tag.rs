use crate::symbol::Symbol;

/// The pair of symbols a constraint is remembered by, so it can be located
/// and removed from the tableau later.
///
/// `marker` always denotes the symbol `create_row` adds as the row's slack,
/// error, or dummy term. `other` is the paired error symbol for a
/// non-required constraint (`Symbol::default()`, the `Invalid` sentinel,
/// otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub marker: Symbol,
    pub other: Symbol,
}

impl Tag {
    pub fn new(marker: Symbol, other: Symbol) -> Self {
        Tag { marker, other }
    }
}
