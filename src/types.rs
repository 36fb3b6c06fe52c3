//! Small value types shared by the circuit model, the layout engine and the evaluator.
use std::fmt;

/// A truth value attached to a leaf of a circuit.
///
/// `Unknown` means the user explicitly said "don't know", whereas `Unset`
/// means nobody has touched the leaf yet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TruthValue {
    #[default]
    Unset,
    Unknown,
    True,
    False,
}

impl TruthValue {
    /// Single-character tag: `T`, `F`, `U`, or `-` for [`TruthValue::Unset`].
    pub fn symbol(self) -> char {
        match self {
            TruthValue::True => 'T',
            TruthValue::False => 'F',
            TruthValue::Unknown => 'U',
            TruthValue::Unset => '-',
        }
    }

    pub fn is_set(self) -> bool {
        self != TruthValue::Unset
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stable identifier of a leaf: its pre-order position among the leaves of the tree.
///
/// Circuits never change shape after construction, so the identifier stays valid
/// for the lifetime of the tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LeafId(usize);

impl LeafId {
    pub fn new(index: usize) -> Self {
        LeafId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of quantifier an internal node is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum QuantifierKind {
    /// Conjunction: children laid out in series.
    All,
    /// Disjunction: children laid out in parallel.
    Any,
}

impl QuantifierKind {
    /// Default header for a quantifier with `arity` children.
    pub fn default_header(self, arity: usize) -> Option<&'static str> {
        match (self, arity) {
            (_, 0 | 1) => None,
            (QuantifierKind::All, 2) => Some("both"),
            (QuantifierKind::All, _) => Some("all of"),
            (QuantifierKind::Any, 2) => Some("either"),
            (QuantifierKind::Any, _) => Some("any of"),
        }
    }
}

impl fmt::Display for QuantifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantifierKind::All => write!(f, "ALL"),
            QuantifierKind::Any => write!(f, "ANY"),
        }
    }
}

/// A cell position in a layout grid (0-indexed).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    pub fn new(row: usize, column: usize) -> Self {
        GridPos { row, column }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
