//! Stateful ladder diagram: a circuit, its layout, and the user's truth values.
//!
//! [`LadderDiagram`] is the one place where leaf values change. A renderer asks it
//! for the [`LayoutTree`] and the current truth path, forwards clicks as
//! [`LadderDiagram::cycle`] calls, and calls [`LadderDiagram::invalidate`] whenever
//! something that affects geometry happens (resize, scroll, fonts loaded).
//!
//! # Example
//!
//! ```
//! use ladder_rs::circuit::Circuit;
//! use ladder_rs::diagram::LadderDiagram;
//! use ladder_rs::types::TruthValue;
//!
//! let circuit = Circuit::any(vec![Circuit::var("rain", false), Circuit::var("sprinkler", false)]);
//! let mut diagram = LadderDiagram::new(circuit);
//! assert!(!diagram.has_truth_path());
//!
//! let id = diagram.leaf_by_text("sprinkler").unwrap();
//! diagram.cycle(id).unwrap();
//! assert_eq!(diagram.circuit().leaf(id).unwrap().known(), TruthValue::True);
//! assert!(diagram.has_truth_path());
//! ```

use log::debug;

use crate::circuit::{Circuit, CircuitError};
use crate::eval::{Evaluate, Witness};
use crate::layout::{layout, normalize, LayoutTree, PathConnector};
use crate::types::{LeafId, TruthValue};

/// Order in which a click steps through a leaf's values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CyclePolicy {
    /// `Unset -> True -> False -> Unset`.
    #[default]
    TrueFalse,
    /// `Unset -> True -> False -> Unknown -> Unset`.
    WithUnknown,
}

impl CyclePolicy {
    pub fn next(self, value: TruthValue) -> TruthValue {
        match (self, value) {
            (_, TruthValue::Unset) => TruthValue::True,
            (_, TruthValue::True) => TruthValue::False,
            (CyclePolicy::TrueFalse, TruthValue::False) => TruthValue::Unset,
            (CyclePolicy::WithUnknown, TruthValue::False) => TruthValue::Unknown,
            (_, TruthValue::Unknown) => TruthValue::Unset,
        }
    }
}

pub struct LadderDiagram {
    circuit: Circuit,
    layout: LayoutTree,
    policy: CyclePolicy,
    generation: u64,
}

impl LadderDiagram {
    pub fn new(circuit: Circuit) -> Self {
        Self::with_policy(circuit, CyclePolicy::default())
    }

    pub fn with_policy(circuit: Circuit, policy: CyclePolicy) -> Self {
        let circuit = normalize(&circuit).into_owned();
        let layout = layout(&circuit);
        debug!("LadderDiagram::new(circuit = {}, policy = {:?})", circuit, policy);
        Self {
            circuit,
            layout,
            policy,
            generation: 0,
        }
    }

    /// The circuit being shown; a bare variable has been wrapped into an ANY node.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    pub fn policy(&self) -> CyclePolicy {
        self.policy
    }

    /// Number of times the layout has been recomputed through [`LadderDiagram::invalidate`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Recomputes the layout. Renderers call this after any geometry-affecting event.
    pub fn invalidate(&mut self) -> &LayoutTree {
        self.layout = layout(&self.circuit);
        self.generation += 1;
        debug!("invalidate: generation = {}", self.generation);
        &self.layout
    }

    /// The current truth path. Evaluated afresh on every call.
    pub fn truth_path(&self) -> Option<Witness> {
        self.circuit.truth_path()
    }

    pub fn has_truth_path(&self) -> bool {
        self.circuit.has_truth_path()
    }

    /// Connectors to highlight for the current truth path, empty if there is none.
    pub fn highlighted(&self) -> Vec<PathConnector> {
        self.truth_path()
            .map(|w| self.layout.path_connectors(&w))
            .unwrap_or_default()
    }

    pub fn leaf_by_text(&self, text: &str) -> Option<LeafId> {
        self.circuit.find_leaf(text)
    }

    pub fn set_known(&mut self, id: LeafId, value: TruthValue) -> Result<(), CircuitError> {
        let leaf = self.circuit.leaf_mut(id).ok_or(CircuitError::UnknownLeaf(id))?;
        debug!("set_known({} '{}': {} -> {})", id, leaf.text(), leaf.known(), value);
        leaf.set_known(value);
        Ok(())
    }

    /// Steps the leaf to its next value under the diagram's [`CyclePolicy`] and returns it.
    pub fn cycle(&mut self, id: LeafId) -> Result<TruthValue, CircuitError> {
        let current = self.circuit.leaf(id).ok_or(CircuitError::UnknownLeaf(id))?.known();
        let next = self.policy.next(current);
        self.set_known(id, next)?;
        Ok(next)
    }

    /// Resets every leaf to [`TruthValue::Unset`].
    pub fn clear(&mut self) {
        let leaves = self.circuit.leaves_mut();
        let count = leaves.len();
        for leaf in leaves {
            leaf.set_known(TruthValue::Unset);
        }
        debug!("clear: {} leaves reset", count);
    }
}
