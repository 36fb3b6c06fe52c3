//! Debug utilities for inspecting layouts.
//!
//! These are primarily useful in tests, in log output and during development.

use std::fmt;

use crate::circuit::Circuit;
use crate::layout::{Cell, LayoutTree};
use crate::types::{GridPos, LeafId};

/// What occupies a single grid cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CellInfo {
    Start,
    End,
    Junction(usize),
    Leaf(LeafId),
    Subgraph(usize),
}

/// A flattened view of one quantifier grid, row by row.
#[derive(Debug, Clone)]
pub struct GridInfo {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<(GridPos, CellInfo)>,
}

impl LayoutTree {
    /// Lists every occupied cell of this grid (not of subgraphs) in row-major order.
    pub fn grid_info(&self) -> GridInfo {
        let mut cells = vec![(self.start, CellInfo::Start), (self.end, CellInfo::End)];
        cells.extend(self.junctions.iter().enumerate().map(|(i, &pos)| (pos, CellInfo::Junction(i))));
        for (i, cell) in self.cells.iter().enumerate() {
            let info = match cell {
                Cell::Leaf { leaf, .. } => CellInfo::Leaf(*leaf),
                Cell::Subgraph { .. } => CellInfo::Subgraph(i),
            };
            cells.push((cell.pos(), info));
        }
        cells.sort_by_key(|(pos, _)| *pos);
        GridInfo {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }

    /// Renders the layout as indented text, labelling leaves from `circuit`.
    pub fn dump(&self, circuit: &Circuit) -> String {
        LayoutDump {
            layout: self,
            circuit: Some(circuit),
        }
        .to_string()
    }
}

/// Text rendering of a layout tree; see [`LayoutTree::dump`].
pub struct LayoutDump<'a> {
    pub layout: &'a LayoutTree,
    pub circuit: Option<&'a Circuit>,
}

impl LayoutDump<'_> {
    fn write(&self, f: &mut fmt::Formatter<'_>, layout: &LayoutTree, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        write!(f, "{}{} {}x{}", pad, layout.kind, layout.rows, layout.columns)?;
        if let Some(header) = &layout.header {
            write!(f, " \"{}\"", header)?;
        }
        writeln!(f)?;
        for (pos, info) in layout.grid_info().cells {
            write!(f, "{}  {} ", pad, pos)?;
            match info {
                CellInfo::Start => writeln!(f, "start")?,
                CellInfo::End => writeln!(f, "end")?,
                CellInfo::Junction(i) => writeln!(f, "junction {}", i)?,
                CellInfo::Leaf(id) => match self.circuit.and_then(|c| c.leaf(id)) {
                    Some(var) => writeln!(f, "leaf {} {} [{}]", id, var, var.displayed())?,
                    None => writeln!(f, "leaf {}", id)?,
                },
                CellInfo::Subgraph(i) => {
                    writeln!(f, "subgraph")?;
                    if let Some(sub) = layout.cells[i].subgraph() {
                        self.write(f, sub, indent + 2)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for LayoutDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.layout, 0)
    }
}

impl fmt::Display for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dump = LayoutDump {
            layout: self,
            circuit: None,
        };
        fmt::Display::fmt(&dump, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::circuit::Variable;
    use crate::layout::layout;
    use crate::types::TruthValue;

    #[test]
    fn test_grid_info_all() {
        let c = Circuit::all(vec![Circuit::var("a", false), Circuit::var("b", false)]);
        let info = layout(&c).grid_info();
        assert_eq!((info.rows, info.columns), (1, 5));
        assert_eq!(
            info.cells,
            vec![
                (GridPos::new(0, 0), CellInfo::Start),
                (GridPos::new(0, 1), CellInfo::Leaf(LeafId::new(0))),
                (GridPos::new(0, 2), CellInfo::Junction(0)),
                (GridPos::new(0, 3), CellInfo::Leaf(LeafId::new(1))),
                (GridPos::new(0, 4), CellInfo::End),
            ]
        );
    }

    #[test]
    fn test_grid_info_any() {
        let c = Circuit::any(vec![
            Circuit::var("a", false),
            Circuit::all(vec![Circuit::var("b", false)]),
        ]);
        let info = layout(&c).grid_info();
        assert_eq!(
            info.cells,
            vec![
                (GridPos::new(0, 0), CellInfo::Start),
                (GridPos::new(0, 1), CellInfo::Leaf(LeafId::new(0))),
                (GridPos::new(0, 2), CellInfo::End),
                (GridPos::new(1, 1), CellInfo::Subgraph(1)),
            ]
        );
    }

    #[test]
    fn test_dump() {
        let c = Circuit::all(vec![
            Variable::new("a", true).with_known(TruthValue::False).into(),
            Circuit::any(vec![Circuit::var("b", false), Circuit::var("c", false)]),
        ]);
        let text = layout(&c).dump(&c);
        println!("{}", text);
        let expected = "\
ALL 1x5 \"both\"
  (0, 0) start
  (0, 1) leaf #0 ¬a [F]
  (0, 2) junction 0
  (0, 3) subgraph
    ANY 2x3 \"either\"
      (0, 0) start
      (0, 1) leaf #1 b [-]
      (0, 2) end
      (1, 1) leaf #2 c [-]
  (0, 4) end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_display_without_circuit() {
        let c = Circuit::var("a", false);
        assert_eq!(layout(&c).to_string(), "ANY 1x3\n  (0, 0) start\n  (0, 1) leaf #0\n  (0, 2) end\n");
    }
}
