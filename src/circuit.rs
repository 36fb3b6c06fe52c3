//! Circuit model: boolean variables combined by ALL (AND) and ANY (OR) quantifiers.
//!
//! A circuit is a tree. Its shape is fixed once built; the only state that changes
//! afterwards is the user-asserted `known` value of each leaf, and that is only
//! reachable through [`LadderDiagram`][crate::diagram::LadderDiagram].
//!
//! # Examples
//!
//! ```
//! use ladder_rs::circuit::Circuit;
//!
//! // ALL( ANY(A, B), C )
//! let c = Circuit::all(vec![
//!     Circuit::any(vec![Circuit::var("A", false), Circuit::var("B", false)]),
//!     Circuit::var("C", false),
//! ]);
//! assert_eq!(c.header(), Some("both"));
//! assert_eq!(c.leaves().len(), 3);
//! assert_eq!(c.to_string(), "ALL(ANY(A, B), C)");
//! ```

use std::fmt;

use crate::types::{LeafId, QuantifierKind, TruthValue};

/// Error type for circuit construction and leaf lookup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CircuitError {
    /// A quantifier was given no children.
    EmptyQuantifier(QuantifierKind),
    /// No leaf with the given identifier exists in the circuit.
    UnknownLeaf(LeafId),
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::EmptyQuantifier(kind) => write!(f, "{} quantifier must have at least one child", kind),
            CircuitError::UnknownLeaf(id) => write!(f, "no leaf {} in circuit", id),
        }
    }
}

impl std::error::Error for CircuitError {}

/// A leaf of the circuit: a named, possibly negated, boolean variable.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Variable {
    text: String,
    negated: bool,
    preset: TruthValue,
    known: TruthValue,
}

/// Coarse truth bucket a renderer styles a leaf by.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TruthBucket {
    True,
    False,
    /// Either [`TruthValue::Unknown`] or [`TruthValue::Unset`].
    Unknown,
}

/// Display attributes of a leaf, derived from the model.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LeafStyle {
    pub negated: bool,
    /// Whether the user has asserted a value (as opposed to showing the preset).
    pub known: bool,
    pub bucket: TruthBucket,
}

impl Variable {
    pub fn new(text: impl Into<String>, negated: bool) -> Self {
        Variable {
            text: text.into(),
            negated,
            preset: TruthValue::Unset,
            known: TruthValue::Unset,
        }
    }

    pub fn with_preset(mut self, preset: TruthValue) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_known(mut self, known: TruthValue) -> Self {
        self.known = known;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn preset(&self) -> TruthValue {
        self.preset
    }

    pub fn known(&self) -> TruthValue {
        self.known
    }

    pub(crate) fn set_known(&mut self, value: TruthValue) {
        self.known = value;
    }

    /// Whether the user has asserted any value, including "don't know".
    pub fn is_known(&self) -> bool {
        self.known.is_set()
    }

    /// The value shown to the user: `known` once set, otherwise `preset`.
    ///
    /// Note that evaluation ignores `preset` entirely, see [`Variable::is_satisfied`].
    pub fn displayed(&self) -> TruthValue {
        if self.is_known() {
            self.known
        } else {
            self.preset
        }
    }

    pub fn style(&self) -> LeafStyle {
        let bucket = match self.displayed() {
            TruthValue::True => TruthBucket::True,
            TruthValue::False => TruthBucket::False,
            TruthValue::Unknown | TruthValue::Unset => TruthBucket::Unknown,
        };
        LeafStyle {
            negated: self.negated,
            known: self.is_known(),
            bucket,
        }
    }

    /// Whether this leaf contributes to a truth path.
    ///
    /// Only the `known` value counts: a leaf that merely has a `preset` is never satisfied.
    pub fn is_satisfied(&self) -> bool {
        match self.known {
            TruthValue::True => !self.negated,
            TruthValue::False => self.negated,
            TruthValue::Unknown | TruthValue::Unset => false,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.text)
    }
}

/// Children and header of an ALL or ANY node. Always has at least one child.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Quantifier {
    children: Vec<Circuit>,
    header: Option<String>,
}

impl Quantifier {
    /// Builds a quantifier with the default header for its kind and arity.
    pub fn new(kind: QuantifierKind, children: Vec<Circuit>) -> Result<Self, CircuitError> {
        let header = kind.default_header(children.len()).map(str::to_string);
        Self::with_header(kind, children, header)
    }

    /// Builds a quantifier with an explicit header, `None` meaning "no header".
    pub fn with_header(kind: QuantifierKind, children: Vec<Circuit>, header: Option<String>) -> Result<Self, CircuitError> {
        if children.is_empty() {
            return Err(CircuitError::EmptyQuantifier(kind));
        }
        Ok(Quantifier { children, header })
    }

    pub fn children(&self) -> &[Circuit] {
        &self.children
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }
}

/// A boolean circuit: a variable, or an ALL/ANY quantifier over sub-circuits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Circuit {
    Variable(Variable),
    All(Quantifier),
    Any(Quantifier),
}

impl From<Variable> for Circuit {
    fn from(var: Variable) -> Self {
        Circuit::Variable(var)
    }
}

impl Circuit {
    pub fn var(text: impl Into<String>, negated: bool) -> Self {
        Circuit::Variable(Variable::new(text, negated))
    }

    pub fn try_all(children: Vec<Circuit>) -> Result<Self, CircuitError> {
        Ok(Circuit::All(Quantifier::new(QuantifierKind::All, children)?))
    }

    pub fn try_any(children: Vec<Circuit>) -> Result<Self, CircuitError> {
        Ok(Circuit::Any(Quantifier::new(QuantifierKind::Any, children)?))
    }

    /// Builds an ALL node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. Use [`Circuit::try_all`] to handle that case.
    pub fn all(children: Vec<Circuit>) -> Self {
        assert!(!children.is_empty(), "ALL quantifier must have at least one child");
        Circuit::All(Quantifier {
            header: QuantifierKind::All.default_header(children.len()).map(str::to_string),
            children,
        })
    }

    /// Builds an ANY node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. Use [`Circuit::try_any`] to handle that case.
    pub fn any(children: Vec<Circuit>) -> Self {
        assert!(!children.is_empty(), "ANY quantifier must have at least one child");
        Circuit::Any(Quantifier {
            header: QuantifierKind::Any.default_header(children.len()).map(str::to_string),
            children,
        })
    }

    pub fn all_with_header(children: Vec<Circuit>, header: Option<&str>) -> Result<Self, CircuitError> {
        let q = Quantifier::with_header(QuantifierKind::All, children, header.map(str::to_string))?;
        Ok(Circuit::All(q))
    }

    pub fn any_with_header(children: Vec<Circuit>, header: Option<&str>) -> Result<Self, CircuitError> {
        let q = Quantifier::with_header(QuantifierKind::Any, children, header.map(str::to_string))?;
        Ok(Circuit::Any(q))
    }

    /// Kind and contents of a quantifier node, `None` for a variable.
    pub fn as_quantifier(&self) -> Option<(QuantifierKind, &Quantifier)> {
        match self {
            Circuit::Variable(_) => None,
            Circuit::All(q) => Some((QuantifierKind::All, q)),
            Circuit::Any(q) => Some((QuantifierKind::Any, q)),
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Circuit::Variable(v) => Some(v),
            Circuit::All(_) | Circuit::Any(_) => None,
        }
    }

    pub fn children(&self) -> &[Circuit] {
        match self {
            Circuit::Variable(_) => &[],
            Circuit::All(q) | Circuit::Any(q) => q.children(),
        }
    }

    pub fn header(&self) -> Option<&str> {
        match self {
            Circuit::Variable(_) => None,
            Circuit::All(q) | Circuit::Any(q) => q.header(),
        }
    }

    /// Number of nodes in the tree, leaves and quantifiers alike.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Circuit::node_count).sum::<usize>()
    }

    /// Nesting depth; a lone variable has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Circuit::depth).max().unwrap_or(0)
    }

    /// All leaves in pre-order; the position in this list is the leaf's [`LeafId`].
    pub fn leaves(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Circuit::Variable(v) => out.push(v),
                Circuit::All(q) | Circuit::Any(q) => stack.extend(q.children.iter().rev()),
            }
        }
        out
    }

    /// Mutable counterpart of [`Circuit::leaves`], in the same order.
    pub(crate) fn leaves_mut(&mut self) -> Vec<&mut Variable> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Circuit::Variable(v) => out.push(v),
                Circuit::All(q) | Circuit::Any(q) => stack.extend(q.children.iter_mut().rev()),
            }
        }
        out
    }

    pub fn leaf(&self, id: LeafId) -> Option<&Variable> {
        self.leaves().into_iter().nth(id.index())
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> Option<&mut Variable> {
        let mut remaining = id.index();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Circuit::Variable(v) => {
                    if remaining == 0 {
                        return Some(v);
                    }
                    remaining -= 1;
                }
                Circuit::All(q) | Circuit::Any(q) => stack.extend(q.children.iter_mut().rev()),
            }
        }
        None
    }

    /// First leaf whose text equals `text`. Display names are not required to be unique.
    pub fn find_leaf(&self, text: &str) -> Option<LeafId> {
        self.leaves().iter().position(|v| v.text() == text).map(LeafId::new)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, q) = match self {
            Circuit::Variable(v) => return write!(f, "{}", v),
            Circuit::All(q) => (QuantifierKind::All, q),
            Circuit::Any(q) => (QuantifierKind::Any, q),
        };
        write!(f, "{}(", kind)?;
        for (i, child) in q.children().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Circuit> {
        vec![Circuit::var("a", false), Circuit::var("b", false), Circuit::var("c", false)]
    }

    #[test]
    fn test_all_headers() {
        assert_eq!(Circuit::all(abc()[..1].to_vec()).header(), None);
        assert_eq!(Circuit::all(abc()[..2].to_vec()).header(), Some("both"));
        assert_eq!(Circuit::all(abc()).header(), Some("all of"));
    }

    #[test]
    fn test_any_headers() {
        assert_eq!(Circuit::any(abc()[..1].to_vec()).header(), None);
        assert_eq!(Circuit::any(abc()[..2].to_vec()).header(), Some("either"));
        assert_eq!(Circuit::any(abc()).header(), Some("any of"));
    }

    #[test]
    fn test_explicit_header_overrides() {
        let c = Circuit::all_with_header(abc(), Some("every one of")).unwrap();
        assert_eq!(c.header(), Some("every one of"));
        let c = Circuit::any_with_header(abc(), None).unwrap();
        assert_eq!(c.header(), None);
        let c = Circuit::any_with_header(abc()[..1].to_vec(), Some("just")).unwrap();
        assert_eq!(c.header(), Some("just"));
    }

    #[test]
    fn test_empty_quantifier_rejected() {
        assert_eq!(Circuit::try_all(vec![]), Err(CircuitError::EmptyQuantifier(QuantifierKind::All)));
        assert_eq!(Circuit::try_any(vec![]), Err(CircuitError::EmptyQuantifier(QuantifierKind::Any)));
        assert!(Circuit::any_with_header(vec![], Some("x")).is_err());
    }

    #[test]
    #[should_panic(expected = "ALL quantifier must have at least one child")]
    fn test_empty_all_panics() {
        Circuit::all(vec![]);
    }

    #[test]
    fn test_variable_defaults() {
        let v = Variable::new("x", true);
        assert_eq!(v.text(), "x");
        assert!(v.is_negated());
        assert_eq!(v.preset(), TruthValue::Unset);
        assert_eq!(v.known(), TruthValue::Unset);
        assert!(!v.is_satisfied());
    }

    #[test]
    fn test_displayed_prefers_known() {
        let v = Variable::new("x", false).with_preset(TruthValue::True);
        assert_eq!(v.displayed(), TruthValue::True);
        assert_eq!(
            v.style(),
            LeafStyle {
                negated: false,
                known: false,
                bucket: TruthBucket::True
            }
        );

        let v = v.with_known(TruthValue::False);
        assert_eq!(v.displayed(), TruthValue::False);
        assert!(v.style().known);
        assert_eq!(v.style().bucket, TruthBucket::False);

        let v = Variable::new("y", false).with_known(TruthValue::Unknown);
        assert_eq!(v.style().bucket, TruthBucket::Unknown);
    }

    #[test]
    fn test_preset_does_not_satisfy() {
        // Display shows the preset, but only `known` counts for satisfaction.
        let v = Variable::new("x", false).with_preset(TruthValue::True);
        assert_eq!(v.style().bucket, TruthBucket::True);
        assert!(!v.is_satisfied());
    }

    #[test]
    fn test_negation() {
        assert!(Variable::new("x", true).with_known(TruthValue::False).is_satisfied());
        assert!(!Variable::new("x", true).with_known(TruthValue::True).is_satisfied());
        assert!(Variable::new("x", false).with_known(TruthValue::True).is_satisfied());
        assert!(!Variable::new("x", false).with_known(TruthValue::False).is_satisfied());
        assert!(!Variable::new("x", true).with_known(TruthValue::Unknown).is_satisfied());
    }

    #[test]
    fn test_leaves_preorder() {
        let c = Circuit::all(vec![
            Circuit::any(vec![Circuit::var("a", false), Circuit::var("b", false)]),
            Circuit::var("c", false),
            Circuit::all(vec![Circuit::var("d", false)]),
        ]);
        let names: Vec<_> = c.leaves().iter().map(|v| v.text()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(c.leaf(LeafId::new(2)).map(Variable::text), Some("c"));
        assert_eq!(c.leaf(LeafId::new(4)), None);
        assert_eq!(c.find_leaf("d"), Some(LeafId::new(3)));
        assert_eq!(c.find_leaf("z"), None);
        assert_eq!(c.node_count(), 7);
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn test_leaves_mut_order() {
        let mut c = Circuit::all(vec![
            Circuit::any(vec![Circuit::var("a", false), Circuit::var("b", false)]),
            Circuit::var("c", false),
        ]);
        let texts: Vec<String> = c.leaves_mut().iter().map(|v| v.text().to_string()).collect();
        assert_eq!(texts, ["a", "b", "c"]);

        c.leaves_mut()[1].set_known(TruthValue::False);
        assert_eq!(c.leaf(LeafId::new(1)).unwrap().known(), TruthValue::False);
    }

    #[test]
    fn test_leaf_mut() {
        let mut c = Circuit::any(vec![Circuit::var("a", false), Circuit::all(vec![Circuit::var("b", false)])]);
        c.leaf_mut(LeafId::new(1)).unwrap().set_known(TruthValue::True);
        assert_eq!(c.leaf(LeafId::new(1)).unwrap().known(), TruthValue::True);
        assert_eq!(c.leaf(LeafId::new(0)).unwrap().known(), TruthValue::Unset);
        assert!(c.leaf_mut(LeafId::new(2)).is_none());
    }

    #[test]
    fn test_display() {
        let c = Circuit::any(vec![Circuit::var("a", true), Circuit::all(vec![Circuit::var("b", false)])]);
        assert_eq!(c.to_string(), "ANY(¬a, ALL(b))");
    }
}
