/// The role a [`Symbol`] plays in the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// The sentinel "no symbol" value (always paired with id 0).
    Invalid,
    /// Bound to a user-visible `Variable`.
    External,
    /// Introduced to turn an inequality into an equality.
    Slack,
    /// Introduced to measure the violation of a non-required constraint.
    Error,
    /// Introduced for a required equality; never allowed to become basic
    /// except when the whole row is redundant.
    Dummy,
}

impl SymbolKind {
    pub fn is_external(self) -> bool {
        self == SymbolKind::External
    }

    pub fn is_slack(self) -> bool {
        self == SymbolKind::Slack
    }

    pub fn is_error(self) -> bool {
        self == SymbolKind::Error
    }

    pub fn is_dummy(self) -> bool {
        self == SymbolKind::Dummy
    }

    /// Slack and error symbols may be pivoted into the basis as a
    /// constraint's marker; dummy and external symbols may not.
    pub fn is_pivotable(self) -> bool {
        self.is_slack() || self.is_error()
    }
}

/// A tableau column identifier.
///
/// Ordered first by `id`, then by `kind`; the ordering has no algorithmic
/// significance beyond giving symbols a total, stable order for anything
/// that wants one (tests, debug output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    id: u32,
    kind: SymbolKind,
}

impl Symbol {
    pub fn new(id: u32, kind: SymbolKind) -> Self {
        Symbol { id, kind }
    }

    pub fn kind(self) -> SymbolKind {
        self.kind
    }

    pub fn is_external(self) -> bool {
        self.kind.is_external()
    }

    pub fn is_slack(self) -> bool {
        self.kind.is_slack()
    }

    pub fn is_error(self) -> bool {
        self.kind.is_error()
    }

    pub fn is_dummy(self) -> bool {
        self.kind.is_dummy()
    }

    pub fn is_pivotable(self) -> bool {
        self.kind.is_pivotable()
    }

    pub fn is_invalid(self) -> bool {
        self.kind == SymbolKind::Invalid
    }
}

impl Default for Symbol {
    /// The `Invalid` sentinel, id 0.
    fn default() -> Self {
        Symbol::new(0, SymbolKind::Invalid)
    }
}
