//! Ladder diagram to DOT (Graphviz) conversion.
//!
//! The output is a left-to-right digraph that mirrors the grid layout:
//! - **Hidden anchors** (start, end, junctions) are rendered as points
//! - **Leaves** are rendered as boxes labelled with their text, `¬`-prefixed when negated,
//!   filled by their displayed truth value and drawn bold once the user has set a value
//! - **Subgraphs** are rendered as clusters labelled with their header
//! - **Connectors** are thin grey lines; connectors on the truth path are thick black lines
//!
//! # Examples
//!
//! ```
//! use ladder_rs::circuit::Circuit;
//! use ladder_rs::eval::evaluate;
//! use ladder_rs::layout::layout;
//!
//! let c = Circuit::all(vec![Circuit::var("a", false), Circuit::var("b", true)]);
//! let dot = layout(&c).to_dot(&c, evaluate(&c).as_ref()).unwrap();
//! // Write to file and render with: dot -Tsvg output.dot -o output.svg
//! assert!(dot.starts_with("digraph ladder {"));
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::circuit::{Circuit, TruthBucket, Variable};
use crate::eval::Witness;
use crate::layout::{Anchor, Cell, Connector, LayoutTree, Terminal};

/// How leaf boxes are decorated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BoxStyle {
    /// Rounded corners.
    #[default]
    Corners,
    /// Plain rectangle.
    Sides,
}

/// Configuration options for DOT output generation.
///
/// Line widths are given in em, like the on-screen diagram, and scaled by `em_size`.
///
/// ```
/// use ladder_rs::dot::{BoxStyle, DotConfig};
///
/// let config = DotConfig {
///     box_style: BoxStyle::Sides,
///     em_size: 12.0,
///     ..DotConfig::default()
/// };
/// assert_eq!(config.line_color, "#787878");
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    pub box_style: BoxStyle,
    /// Color of ordinary connectors (default: "#787878")
    pub line_color: &'static str,
    /// Width of ordinary connectors in em (default: 0.05)
    pub line_width: f64,
    /// Color of truth-path connectors (default: "black")
    pub path_color: &'static str,
    /// Width of truth-path connectors in em (default: 0.15)
    pub path_width: f64,
    /// Points per em (default: 16)
    pub em_size: f64,
    pub true_fill: &'static str,
    pub false_fill: &'static str,
    pub unknown_fill: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            box_style: BoxStyle::Corners,
            line_color: "#787878",
            line_width: 0.05,
            path_color: "black",
            path_width: 0.15,
            em_size: 16.0,
            true_fill: "palegreen",
            false_fill: "lightpink",
            unknown_fill: "white",
        }
    }
}

fn grid_id(path: &[usize]) -> String {
    let mut id = String::from("g");
    for i in path {
        write!(id, "_{}", i).ok();
    }
    id
}

fn anchor_id(path: &[usize], anchor: Anchor) -> String {
    match anchor {
        Anchor::Start => format!("{}_start", grid_id(path)),
        Anchor::End => format!("{}_end", grid_id(path)),
        Anchor::Junction(i) => format!("{}_j{}", grid_id(path), i),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl LayoutTree {
    /// Converts a layout to DOT format, highlighting `witness` if given.
    ///
    /// `circuit` must be the circuit this layout was built from; it supplies leaf labels
    /// and truth values.
    pub fn to_dot(&self, circuit: &Circuit, witness: Option<&Witness>) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(circuit, witness, &DotConfig::default())
    }

    /// Converts a layout to DOT format with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `witness` does not have the shape of this layout.
    pub fn to_dot_with_config(
        &self,
        circuit: &Circuit,
        witness: Option<&Witness>,
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        let leaves = circuit.leaves();
        let highlighted: HashSet<(Vec<usize>, Connector)> = witness
            .map(|w| self.path_connectors(w))
            .unwrap_or_default()
            .into_iter()
            .map(|p| (p.subgraph, p.connector))
            .collect();

        let mut dot = String::new();
        writeln!(dot, "digraph ladder {{")?;
        writeln!(dot, "rankdir=LR;")?;
        writeln!(dot, "node [shape=point, width=0.05];")?;
        writeln!(dot, "edge [arrowhead=none];")?;
        self.write_grid(&mut dot, &mut Vec::new(), &leaves, &highlighted, config)?;
        writeln!(dot, "}}")?;
        Ok(dot)
    }

    fn write_grid(
        &self,
        dot: &mut String,
        path: &mut Vec<usize>,
        leaves: &[&Variable],
        highlighted: &HashSet<(Vec<usize>, Connector)>,
        config: &DotConfig,
    ) -> std::fmt::Result {
        let nested = !path.is_empty();
        if nested {
            writeln!(dot, "subgraph cluster_{} {{", grid_id(path))?;
            writeln!(dot, "label=\"{}\";", escape(self.header.as_deref().unwrap_or("")))?;
        } else if let Some(header) = &self.header {
            writeln!(dot, "label=\"{}\";", escape(header))?;
            writeln!(dot, "labelloc=t;")?;
        }

        // Hidden anchors
        writeln!(dot, "{};", anchor_id(path, Anchor::Start))?;
        for i in 0..self.junctions.len() {
            writeln!(dot, "{};", anchor_id(path, Anchor::Junction(i)))?;
        }
        writeln!(dot, "{};", anchor_id(path, Anchor::End))?;

        // Children: leaves as boxes, subgraphs as nested clusters
        for (i, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Leaf { leaf, .. } => {
                    let var = leaves[leaf.index()];
                    let style = var.style();
                    let fill = match style.bucket {
                        TruthBucket::True => config.true_fill,
                        TruthBucket::False => config.false_fill,
                        TruthBucket::Unknown => config.unknown_fill,
                    };
                    let mut styles = vec!["filled"];
                    if config.box_style == BoxStyle::Corners {
                        styles.push("rounded");
                    }
                    if style.known {
                        styles.push("bold");
                    }
                    writeln!(
                        dot,
                        "leaf{} [shape=box, width=0, label=\"{}\", style=\"{}\", fillcolor=\"{}\"];",
                        leaf.index(),
                        escape(&var.to_string()),
                        styles.join(","),
                        fill
                    )?;
                }
                Cell::Subgraph { layout, .. } => {
                    path.push(i);
                    layout.write_grid(dot, path, leaves, highlighted, config)?;
                    path.pop();
                }
            }
        }

        // Connectors
        for connector in &self.connectors {
            let (color, width) = if highlighted.contains(&(path.clone(), *connector)) {
                (config.path_color, config.path_width)
            } else {
                (config.line_color, config.line_width)
            };
            writeln!(
                dot,
                "{} -> {} [color=\"{}\", penwidth={:.2}];",
                self.terminal_id(path, connector.from),
                self.terminal_id(path, connector.to),
                color,
                width * config.em_size
            )?;
        }

        if nested {
            writeln!(dot, "}}")?;
        }
        Ok(())
    }

    fn terminal_id(&self, path: &[usize], terminal: Terminal) -> String {
        let child = |i: usize, anchor: Anchor| match &self.cells[i] {
            Cell::Leaf { leaf, .. } => format!("leaf{}", leaf.index()),
            Cell::Subgraph { .. } => {
                let mut sub = path.to_vec();
                sub.push(i);
                anchor_id(&sub, anchor)
            }
        };
        match terminal {
            Terminal::Anchor(anchor) => anchor_id(path, anchor),
            Terminal::Left(i) => child(i, Anchor::Start),
            Terminal::Right(i) => child(i, Anchor::End),
        }
    }
}
