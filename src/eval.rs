//! Truth-path evaluation.
//!
//! A [`Witness`] explains *why* a circuit is satisfied: it mirrors the circuit's
//! shape, recording for every ALL node the witnesses of all its children, and for
//! every ANY node the witnesses of the children that hold (`None` for the rest).
//! An unsatisfied circuit has no witness at all.
//!
//! Witnesses are computed from the current `known` values of the leaves and are
//! never cached, so re-evaluate after every value change.
//!
//! # Example
//!
//! ```
//! use ladder_rs::circuit::{Circuit, Variable};
//! use ladder_rs::eval::{evaluate, Witness};
//! use ladder_rs::types::TruthValue;
//!
//! let a = Variable::new("A", false).with_known(TruthValue::False);
//! let b = Variable::new("B", false).with_known(TruthValue::True);
//! let c = Circuit::any(vec![a.into(), b.into()]);
//!
//! assert_eq!(evaluate(&c), Some(Witness::Branches(vec![None, Some(Witness::Leaf)])));
//! ```

use log::debug;
use num_bigint::BigUint;

use crate::circuit::{Circuit, Quantifier, Variable};
use crate::types::QuantifierKind;

/// Proof that a (sub-)circuit is satisfied.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Witness {
    /// A satisfied leaf.
    Leaf,
    /// One entry per child of a quantifier, `None` where the child is unsatisfied.
    Branches(Vec<Option<Witness>>),
}

/// Anything that can be checked for a truth path.
pub trait Evaluate {
    fn truth_path(&self) -> Option<Witness>;

    fn has_truth_path(&self) -> bool {
        self.truth_path().is_some()
    }
}

impl Evaluate for Variable {
    fn truth_path(&self) -> Option<Witness> {
        self.is_satisfied().then_some(Witness::Leaf)
    }
}

impl Evaluate for Circuit {
    fn truth_path(&self) -> Option<Witness> {
        match self {
            Circuit::Variable(v) => v.truth_path(),
            Circuit::All(q) => truth_path_of(QuantifierKind::All, q),
            Circuit::Any(q) => truth_path_of(QuantifierKind::Any, q),
        }
    }
}

fn truth_path_of(kind: QuantifierKind, q: &Quantifier) -> Option<Witness> {
    // Every child is evaluated, so ANY witnesses keep all satisfied branches.
    let branches: Vec<Option<Witness>> = q.children().iter().map(Evaluate::truth_path).collect();
    let satisfied = match kind {
        QuantifierKind::All => branches.iter().all(Option::is_some),
        QuantifierKind::Any => branches.iter().any(Option::is_some),
    };
    debug!(
        "truth_path({}, arity = {}) -> {}",
        kind,
        branches.len(),
        if satisfied { "satisfied" } else { "unsatisfied" }
    );
    satisfied.then_some(Witness::Branches(branches))
}

/// Computes the witness of `circuit`, or `None` if it is unsatisfied.
pub fn evaluate(circuit: &Circuit) -> Option<Witness> {
    circuit.truth_path()
}

pub fn has_truth_path(circuit: &Circuit) -> bool {
    circuit.has_truth_path()
}

impl Witness {
    /// Number of distinct left-to-right routes through the highlighted diagram of `circuit`.
    ///
    /// A route passes every child of an ALL node and exactly one satisfied branch of an
    /// ANY node, so the count multiplies over ALL and adds over ANY. It grows
    /// exponentially with nesting.
    ///
    /// # Panics
    ///
    /// Panics if the witness does not have the shape of `circuit`.
    pub fn route_count(&self, circuit: &Circuit) -> BigUint {
        match (self, circuit) {
            (Witness::Leaf, Circuit::Variable(_)) => BigUint::from(1u32),
            (Witness::Branches(branches), Circuit::All(q)) => {
                assert_eq!(branches.len(), q.arity(), "witness does not match circuit shape");
                branches
                    .iter()
                    .zip(q.children())
                    .map(|(b, c)| b.as_ref().map_or_else(|| BigUint::from(0u32), |w| w.route_count(c)))
                    .product()
            }
            (Witness::Branches(branches), Circuit::Any(q)) => {
                assert_eq!(branches.len(), q.arity(), "witness does not match circuit shape");
                branches
                    .iter()
                    .zip(q.children())
                    .filter_map(|(b, c)| b.as_ref().map(|w| w.route_count(c)))
                    .sum()
            }
            _ => panic!("witness does not match circuit shape"),
        }
    }

    /// Keeps only the first satisfied branch of every ANY node of `circuit`.
    ///
    /// This is the tie-break a renderer uses when it highlights a single route.
    ///
    /// # Panics
    ///
    /// Panics if the witness does not have the shape of `circuit`.
    pub fn first_route(&self, circuit: &Circuit) -> Witness {
        match (self, circuit) {
            (Witness::Leaf, Circuit::Variable(_)) => Witness::Leaf,
            (Witness::Branches(branches), Circuit::All(q)) => {
                assert_eq!(branches.len(), q.arity(), "witness does not match circuit shape");
                Witness::Branches(
                    branches
                        .iter()
                        .zip(q.children())
                        .map(|(b, c)| b.as_ref().map(|w| w.first_route(c)))
                        .collect(),
                )
            }
            (Witness::Branches(branches), Circuit::Any(q)) => {
                assert_eq!(branches.len(), q.arity(), "witness does not match circuit shape");
                let first = branches.iter().position(Option::is_some);
                Witness::Branches(
                    branches
                        .iter()
                        .zip(q.children())
                        .enumerate()
                        .map(|(i, (b, c))| match b {
                            Some(w) if Some(i) == first => Some(w.first_route(c)),
                            _ => None,
                        })
                        .collect(),
                )
            }
            _ => panic!("witness does not match circuit shape"),
        }
    }

    /// Checks that this witness has the same shape as `circuit`, and is consistent with it:
    /// ALL entries are all present, ANY entries have at least one present.
    pub fn conforms_to(&self, circuit: &Circuit) -> bool {
        match (self, circuit) {
            (Witness::Leaf, Circuit::Variable(_)) => true,
            (Witness::Branches(branches), Circuit::All(q)) => {
                branches.len() == q.arity()
                    && branches
                        .iter()
                        .zip(q.children())
                        .all(|(b, c)| b.as_ref().is_some_and(|w| w.conforms_to(c)))
            }
            (Witness::Branches(branches), Circuit::Any(q)) => {
                branches.len() == q.arity()
                    && branches.iter().any(Option::is_some)
                    && branches
                        .iter()
                        .zip(q.children())
                        .all(|(b, c)| b.as_ref().map_or(true, |w| w.conforms_to(c)))
            }
            _ => false,
        }
    }
}
