//! # ladder-rs: Ladder diagrams for AND/OR circuits
//!
//! **`ladder-rs`** lays out a boolean circuit built from ALL (AND) and ANY (OR)
//! quantifiers as a *ladder diagram* and computes, for the truth values the user has
//! asserted so far, a *truth path* showing why the circuit holds.
//!
//! ## What is a ladder diagram?
//!
//! Conjunctions are drawn in series and disjunctions in parallel, like rungs of a
//! ladder. The circuit is satisfied exactly when there is a connected route from the
//! left edge to the right edge passing only through satisfied leaves.
//!
//! ## Key Features
//!
//! - **Renderer-agnostic layout**: [`layout`][crate::layout::layout] produces grid
//!   positions and connector pairings only. Any backend (DOM + canvas, SVG, terminal,
//!   Graphviz via [`dot`]) resolves them to pixels.
//! - **Witnesses, not booleans**: [`evaluate`][crate::eval::evaluate] returns the
//!   satisfied branches of every node, ready to be highlighted.
//! - **Stable leaf identifiers**: leaves are addressed by [`LeafId`][crate::types::LeafId],
//!   not by their display text.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ladder_rs::circuit::Circuit;
//! use ladder_rs::diagram::LadderDiagram;
//! use ladder_rs::types::TruthValue;
//!
//! // ALL( ANY(A, B), C )
//! let circuit = Circuit::all(vec![
//!     Circuit::any(vec![Circuit::var("A", false), Circuit::var("B", false)]),
//!     Circuit::var("C", false),
//! ]);
//! let mut diagram = LadderDiagram::new(circuit);
//!
//! let a = diagram.leaf_by_text("A").unwrap();
//! let c = diagram.leaf_by_text("C").unwrap();
//! diagram.set_known(a, TruthValue::True).unwrap();
//! diagram.set_known(c, TruthValue::True).unwrap();
//!
//! assert!(diagram.has_truth_path());
//! println!("{}", diagram.layout().dump(diagram.circuit()));
//! ```
//!
//! ## Core Components
//!
//! - **[`circuit`]**: The circuit model.
//! - **[`layout`]**: The grid layout engine.
//! - **[`eval`]**: Truth-path evaluation.
//! - **[`diagram`]**: The stateful diagram that owns the user's truth values.

pub mod circuit;
pub mod debug;
pub mod diagram;
pub mod dot;
pub mod eval;
pub mod layout;
pub mod types;
