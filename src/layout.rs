//! Grid layout of a circuit as a ladder diagram.
//!
//! Every quantifier gets its own grid:
//!
//! - **ALL** (series): one row. Column 0 is a hidden start anchor, child `i` sits at
//!   column `1 + 2i`, a hidden junction sits between consecutive children at column
//!   `2 + 2i`, and the hidden end anchor is at column `2n`. Connectors form one chain
//!   `start -> c0 -> j0 -> c1 -> ... -> end`, so every child has to be passed.
//! - **ANY** (parallel): `n` rows, three columns. A shared start anchor at `(0, 0)`,
//!   child `i` at `(i, 1)` and a shared end anchor at `(0, 2)`. Every child is wired
//!   on its own from start to end, so any one branch suffices.
//!
//! A nested quantifier occupies a single cell of its parent and carries its own grid
//! (a *subgraph*). The parent's connectors end at the subgraph's start/end anchors
//! rather than at the subgraph's children, which is what lets nesting compose.
//!
//! The engine only decides grid topology. Turning cells into pixels is up to the
//! renderer, which resolves each [`Endpoint`] against its own geometry.
//!
//! ```text
//! ALL(a, ANY(b, c), d):
//!
//!   S -- a -- J0 -- [ S' -- b -- E' ] -- J1 -- d -- E
//!                   [  \--- c ---/  ]
//! ```

use std::borrow::Cow;

use log::debug;

use crate::circuit::{Circuit, Quantifier};
use crate::eval::Witness;
use crate::types::{GridPos, LeafId, QuantifierKind};

/// A hidden cell of a quantifier grid that connectors attach to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Anchor {
    Start,
    End,
    /// Junction between child `i` and child `i + 1` of an ALL node.
    Junction(usize),
}

/// One end of a connector, relative to the quantifier grid it belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Terminal {
    Anchor(Anchor),
    /// Entry (left side) of child `i`.
    Left(usize),
    /// Exit (right side) of child `i`.
    Right(usize),
}

/// A line the renderer draws between two terminals.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Connector {
    /// The child this connector leads into or out of.
    pub child: usize,
    pub from: Terminal,
    pub to: Terminal,
}

/// Which point of a cell's bounding box an endpoint refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
    Center,
}

/// Where a renderer should place one end of a connector.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    /// A point on a cell of this grid.
    Cell { pos: GridPos, side: Side },
    /// The center of an anchor inside the subgraph occupying `cell`.
    /// `anchor` is in the subgraph's local grid.
    Nested { cell: GridPos, anchor: GridPos },
}

/// A child slot of a quantifier grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Cell {
    Leaf { pos: GridPos, leaf: LeafId },
    Subgraph { pos: GridPos, layout: Box<LayoutTree> },
}

impl Cell {
    pub fn pos(&self) -> GridPos {
        match self {
            Cell::Leaf { pos, .. } | Cell::Subgraph { pos, .. } => *pos,
        }
    }

    pub fn subgraph(&self) -> Option<&LayoutTree> {
        match self {
            Cell::Leaf { .. } => None,
            Cell::Subgraph { layout, .. } => Some(layout.as_ref()),
        }
    }
}

/// Layout of one quantifier: its grid, hidden anchors, children and connectors.
///
/// Mirrors the circuit it was built from: `cells[i]` belongs to child `i`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LayoutTree {
    pub kind: QuantifierKind,
    pub header: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub start: GridPos,
    pub end: GridPos,
    /// Junctions between consecutive children; empty for ANY.
    pub junctions: Vec<GridPos>,
    pub cells: Vec<Cell>,
    pub connectors: Vec<Connector>,
}

/// A connector on a truth path, together with the subgraph it is drawn in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PathConnector {
    /// Child indices leading from the root grid to the grid containing the connector.
    pub subgraph: Vec<usize>,
    pub connector: Connector,
}

/// Wraps a bare variable into a single-child ANY, so the top of a diagram is always a quantifier.
pub fn normalize(circuit: &Circuit) -> Cow<'_, Circuit> {
    match circuit {
        Circuit::Variable(_) => Cow::Owned(Circuit::any(vec![circuit.clone()])),
        Circuit::All(_) | Circuit::Any(_) => Cow::Borrowed(circuit),
    }
}

/// Lays out `circuit` on nested grids.
///
/// Leaf identifiers in the result are pre-order leaf indices of `circuit`, which
/// normalization does not change.
pub fn layout(circuit: &Circuit) -> LayoutTree {
    let root = normalize(circuit);
    debug!("layout(nodes = {}, depth = {})", root.node_count(), root.depth());
    let mut next_leaf = 0;
    match root.as_ref() {
        Circuit::All(q) => LayoutTree::build(QuantifierKind::All, q, &mut next_leaf),
        Circuit::Any(q) => LayoutTree::build(QuantifierKind::Any, q, &mut next_leaf),
        Circuit::Variable(_) => unreachable!("normalized circuit is a quantifier"),
    }
}

impl LayoutTree {
    fn build(kind: QuantifierKind, q: &Quantifier, next_leaf: &mut usize) -> Self {
        let n = q.arity();
        debug!("layout {}(arity = {}, header = {:?})", kind, n, q.header());

        let pos_of = |i: usize| match kind {
            QuantifierKind::All => GridPos::new(0, 1 + 2 * i),
            QuantifierKind::Any => GridPos::new(i, 1),
        };

        let mut cells = Vec::with_capacity(n);
        for (i, child) in q.children().iter().enumerate() {
            let pos = pos_of(i);
            let cell = match child {
                Circuit::Variable(_) => {
                    let leaf = LeafId::new(*next_leaf);
                    *next_leaf += 1;
                    Cell::Leaf { pos, leaf }
                }
                Circuit::All(sub) => Cell::Subgraph {
                    pos,
                    layout: Box::new(Self::build(QuantifierKind::All, sub, next_leaf)),
                },
                Circuit::Any(sub) => Cell::Subgraph {
                    pos,
                    layout: Box::new(Self::build(QuantifierKind::Any, sub, next_leaf)),
                },
            };
            cells.push(cell);
        }

        let (rows, columns, end, junctions, connectors) = match kind {
            QuantifierKind::All => {
                let junctions: Vec<GridPos> = (0..n - 1).map(|i| GridPos::new(0, 2 + 2 * i)).collect();
                let connectors: Vec<Connector> = (0..n)
                    .flat_map(|i| {
                        let before = if i == 0 { Anchor::Start } else { Anchor::Junction(i - 1) };
                        let after = if i + 1 == n { Anchor::End } else { Anchor::Junction(i) };
                        Self::wire(i, before, after)
                    })
                    .collect();
                (1, 2 * n + 1, GridPos::new(0, 2 * n), junctions, connectors)
            }
            QuantifierKind::Any => {
                let connectors: Vec<Connector> =
                    (0..n).flat_map(|i| Self::wire(i, Anchor::Start, Anchor::End)).collect();
                (n, 3, GridPos::new(0, 2), Vec::new(), connectors)
            }
        };

        LayoutTree {
            kind,
            header: q.header().map(str::to_string),
            rows,
            columns,
            start: GridPos::new(0, 0),
            end,
            junctions,
            cells,
            connectors,
        }
    }

    fn wire(child: usize, before: Anchor, after: Anchor) -> [Connector; 2] {
        [
            Connector {
                child,
                from: Terminal::Anchor(before),
                to: Terminal::Left(child),
            },
            Connector {
                child,
                from: Terminal::Right(child),
                to: Terminal::Anchor(after),
            },
        ]
    }

    pub fn arity(&self) -> usize {
        self.cells.len()
    }

    /// Grid position of a hidden anchor.
    ///
    /// # Panics
    ///
    /// Panics if the junction does not exist.
    pub fn anchor_pos(&self, anchor: Anchor) -> GridPos {
        match anchor {
            Anchor::Start => self.start,
            Anchor::End => self.end,
            Anchor::Junction(i) => self.junctions[i],
        }
    }

    /// Resolves a connector terminal to the point a renderer should draw to.
    ///
    /// Hidden anchors resolve to their center, leaves to the midpoint of their left or
    /// right edge, and subgraphs to the center of their own start or end anchor.
    pub fn endpoint(&self, terminal: Terminal) -> Endpoint {
        let child_endpoint = |i: usize, side: Side| {
            let cell = &self.cells[i];
            match cell.subgraph() {
                None => Endpoint::Cell { pos: cell.pos(), side },
                Some(sub) => Endpoint::Nested {
                    cell: cell.pos(),
                    anchor: if side == Side::Left { sub.start } else { sub.end },
                },
            }
        };
        match terminal {
            Terminal::Anchor(anchor) => Endpoint::Cell {
                pos: self.anchor_pos(anchor),
                side: Side::Center,
            },
            Terminal::Left(i) => child_endpoint(i, Side::Left),
            Terminal::Right(i) => child_endpoint(i, Side::Right),
        }
    }

    /// Number of leaves plus quantifier boundaries in this layout.
    pub fn node_count(&self) -> usize {
        1 + self
            .cells
            .iter()
            .map(|c| c.subgraph().map_or(1, LayoutTree::node_count))
            .sum::<usize>()
    }

    /// Whether this layout has the shape of `circuit`: same kinds, same arities, all the way down.
    pub fn mirrors(&self, circuit: &Circuit) -> bool {
        let Some((kind, q)) = circuit.as_quantifier() else {
            return false;
        };
        kind == self.kind
            && q.arity() == self.arity()
            && self.cells.iter().zip(q.children()).all(|(cell, child)| match (cell, child) {
                (Cell::Leaf { .. }, Circuit::Variable(_)) => true,
                (Cell::Subgraph { layout, .. }, _) => layout.mirrors(child),
                _ => false,
            })
    }

    /// Connectors lying on the truth path described by `witness`.
    ///
    /// For ALL nodes every connector is on the path and every subgraph is entered;
    /// for ANY nodes only the connectors of satisfied children are, and only
    /// satisfied subgraphs are entered.
    ///
    /// # Panics
    ///
    /// Panics if `witness` does not have the shape of this layout.
    pub fn path_connectors(&self, witness: &Witness) -> Vec<PathConnector> {
        let mut out = Vec::new();
        self.collect_path_connectors(&self.lift_root(witness), &mut Vec::new(), &mut out);
        out
    }

    /// A bare variable evaluates to a leaf witness but is laid out as a one-child ANY,
    /// so the leaf witness is lifted into that ANY.
    fn lift_root<'a>(&self, witness: &'a Witness) -> Cow<'a, Witness> {
        match (witness, self.cells.as_slice()) {
            (Witness::Leaf, [Cell::Leaf { .. }]) if self.kind == QuantifierKind::Any => {
                Cow::Owned(Witness::Branches(vec![Some(Witness::Leaf)]))
            }
            _ => Cow::Borrowed(witness),
        }
    }

    fn collect_path_connectors(&self, witness: &Witness, subgraph: &mut Vec<usize>, out: &mut Vec<PathConnector>) {
        let Witness::Branches(branches) = witness else {
            panic!("witness does not match layout shape: leaf witness for {} node", self.kind);
        };
        assert_eq!(branches.len(), self.arity(), "witness does not match layout shape");

        for connector in &self.connectors {
            let on_path = match self.kind {
                QuantifierKind::All => true,
                QuantifierKind::Any => branches[connector.child].is_some(),
            };
            if on_path {
                out.push(PathConnector {
                    subgraph: subgraph.clone(),
                    connector: *connector,
                });
            }
        }

        for (i, (cell, branch)) in self.cells.iter().zip(branches).enumerate() {
            match (cell.subgraph(), branch) {
                (Some(sub), Some(w)) => {
                    subgraph.push(i);
                    sub.collect_path_connectors(w, subgraph, out);
                    subgraph.pop();
                }
                (Some(_), None) => {
                    assert_eq!(self.kind, QuantifierKind::Any, "ALL witness is missing child {}", i);
                }
                (None, Some(w)) => {
                    assert_eq!(*w, Witness::Leaf, "witness does not match layout shape");
                }
                (None, None) => {}
            }
        }
    }

    /// The subgraph reached by following `path` (child indices) from this layout.
    pub fn subgraph_at(&self, path: &[usize]) -> Option<&LayoutTree> {
        path.iter().try_fold(self, |layout, &i| layout.cells.get(i)?.subgraph())
    }

    /// Grid position of `leaf` within its own grid, with the subgraph path leading there.
    pub fn locate_leaf(&self, leaf: LeafId) -> Option<(Vec<usize>, GridPos)> {
        for (i, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Leaf { pos, leaf: id } if *id == leaf => return Some((Vec::new(), *pos)),
                Cell::Leaf { .. } => {}
                Cell::Subgraph { layout, .. } => {
                    if let Some((mut path, pos)) = layout.locate_leaf(leaf) {
                        path.insert(0, i);
                        return Some((path, pos));
                    }
                }
            }
        }
        None
    }
}
