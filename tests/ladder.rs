//! End-to-end tests: circuits through layout, evaluation and highlighting.

use ladder_rs::circuit::{Circuit, CircuitError, Variable};
use ladder_rs::diagram::{CyclePolicy, LadderDiagram};
use ladder_rs::eval::{evaluate, has_truth_path, Witness};
use ladder_rs::layout::{layout, Cell, LayoutTree};
use ladder_rs::types::{LeafId, QuantifierKind, TruthValue};
use num_bigint::BigUint;

fn leaf(text: &str, known: TruthValue) -> Circuit {
    Variable::new(text, false).with_known(known).into()
}

/// Counts leaves and quantifier boundaries, checking arities against the circuit on the way.
fn count_layout(tree: &LayoutTree, circuit: &Circuit) -> usize {
    let (kind, q) = circuit.as_quantifier().expect("layout node for a variable");
    assert_eq!(tree.kind, kind);
    assert_eq!(tree.cells.len(), q.arity());
    1 + tree
        .cells
        .iter()
        .zip(q.children())
        .map(|(cell, child)| match cell {
            Cell::Leaf { .. } => 1,
            Cell::Subgraph { layout, .. } => count_layout(layout, child),
        })
        .sum::<usize>()
}

fn deep_circuit(depth: usize) -> Circuit {
    let mut c = Circuit::var("x0", false);
    for d in 1..=depth {
        let sibling = Circuit::var(format!("x{}", d), d % 3 == 0);
        c = if d % 2 == 0 {
            Circuit::all(vec![c, sibling])
        } else {
            Circuit::any(vec![sibling, c, Circuit::var(format!("y{}", d), false)])
        };
    }
    c
}

// ─── Model ─────────────────────────────────────────────────────────────────────

#[test]
fn header_defaulting() {
    let v = || Circuit::var("v", false);
    assert_eq!(Circuit::all(vec![v()]).header(), None);
    assert_eq!(Circuit::all(vec![v(), v()]).header(), Some("both"));
    assert_eq!(Circuit::all(vec![v(), v(), v()]).header(), Some("all of"));
    assert_eq!(Circuit::any(vec![v()]).header(), None);
    assert_eq!(Circuit::any(vec![v(), v()]).header(), Some("either"));
    assert_eq!(Circuit::any(vec![v(), v(), v()]).header(), Some("any of"));
    assert_eq!(
        Circuit::all_with_header(vec![v(), v()], Some("together")).unwrap().header(),
        Some("together")
    );
}

#[test]
fn empty_quantifier_is_a_construction_error() {
    let err = Circuit::try_all(vec![]).unwrap_err();
    assert_eq!(err, CircuitError::EmptyQuantifier(QuantifierKind::All));
    assert_eq!(err.to_string(), "ALL quantifier must have at least one child");
}

// ─── Layout ────────────────────────────────────────────────────────────────────

#[test]
fn layout_shape_matches_circuit() {
    for depth in 0..8 {
        let circuit = deep_circuit(depth);
        let tree = layout(&circuit);
        if circuit.as_variable().is_some() {
            // A bare variable is wrapped into a one-child ANY.
            assert_eq!(tree.node_count(), 2);
            continue;
        }
        assert_eq!(count_layout(&tree, &circuit), circuit.node_count());
        assert_eq!(tree.node_count(), circuit.node_count());
        assert!(tree.mirrors(&circuit));
    }
}

#[test]
fn layout_assigns_leaf_ids_in_preorder() {
    let circuit = deep_circuit(5);
    let tree = layout(&circuit);
    let count = circuit.leaves().len();
    let mut seen = Vec::new();
    for i in 0..count {
        let id = LeafId::new(i);
        let (path, pos) = tree.locate_leaf(id).expect("every leaf is placed");
        let grid = tree.subgraph_at(&path).unwrap();
        assert!(pos.row < grid.rows && pos.column < grid.columns);
        seen.push(id);
    }
    assert_eq!(seen.len(), count);
}

// ─── Evaluation ────────────────────────────────────────────────────────────────

#[test]
fn all_quantifier_satisfaction() {
    let a = leaf("A", TruthValue::True);
    assert_eq!(evaluate(&Circuit::all(vec![a.clone(), leaf("B", TruthValue::False)])), None);
    assert_eq!(
        evaluate(&Circuit::all(vec![a, leaf("B", TruthValue::True)])),
        Some(Witness::Branches(vec![Some(Witness::Leaf), Some(Witness::Leaf)]))
    );
}

#[test]
fn any_quantifier_satisfaction() {
    let c = Circuit::any(vec![leaf("A", TruthValue::False), leaf("B", TruthValue::True)]);
    assert_eq!(evaluate(&c), Some(Witness::Branches(vec![None, Some(Witness::Leaf)])));
    assert!(has_truth_path(&c));
}

#[test]
fn exhaustive_assignments_agree_with_boolean_semantics() {
    // ANY( ALL(a, ¬b), ALL(b, c), ¬c )
    let values = [TruthValue::True, TruthValue::False, TruthValue::Unknown, TruthValue::Unset];
    for &a in &values {
        for &b in &values {
            for &c in &values {
                let circuit = Circuit::any(vec![
                    Circuit::all(vec![leaf("a", a), Variable::new("b", true).with_known(b).into()]),
                    Circuit::all(vec![leaf("b", b), leaf("c", c)]),
                    Variable::new("c", true).with_known(c).into(),
                ]);
                let t = |v: TruthValue| v == TruthValue::True;
                let f = |v: TruthValue| v == TruthValue::False;
                let expected = (t(a) && f(b)) || (t(b) && t(c)) || f(c);
                let witness = evaluate(&circuit);
                assert_eq!(witness.is_some(), expected, "a={} b={} c={}", a, b, c);
                if let Some(w) = witness {
                    assert!(w.conforms_to(&circuit));
                    assert!(w.route_count(&circuit) >= BigUint::from(1u32));
                }
            }
        }
    }
}

#[test]
fn nested_composition() {
    let mk = |a, b, c| Circuit::all(vec![Circuit::any(vec![leaf("A", a), leaf("B", b)]), leaf("C", c)]);
    assert_eq!(
        evaluate(&mk(TruthValue::True, TruthValue::False, TruthValue::True)),
        Some(Witness::Branches(vec![
            Some(Witness::Branches(vec![Some(Witness::Leaf), None])),
            Some(Witness::Leaf),
        ]))
    );
    let failing = mk(TruthValue::False, TruthValue::False, TruthValue::True);
    assert_eq!(evaluate(&failing), None);
    assert!(!has_truth_path(&failing));
}

// ─── Diagram ───────────────────────────────────────────────────────────────────

#[test]
fn diagram_walkthrough() {
    let circuit = Circuit::all(vec![
        Circuit::any(vec![Circuit::var("A", false), Circuit::var("B", true)]),
        Circuit::var("C", false),
    ]);
    let mut diagram = LadderDiagram::with_policy(circuit, CyclePolicy::WithUnknown);
    let b = diagram.leaf_by_text("B").unwrap();
    let c = diagram.leaf_by_text("C").unwrap();

    // ¬B needs B = False: Unset -> True -> False.
    diagram.cycle(b).unwrap();
    diagram.cycle(b).unwrap();
    diagram.cycle(c).unwrap();
    assert!(diagram.has_truth_path());

    let highlighted = diagram.highlighted();
    assert!(highlighted.iter().any(|p| p.subgraph == [0] && p.connector.child == 1));
    assert!(!highlighted.iter().any(|p| p.subgraph == [0] && p.connector.child == 0));

    let dot = diagram
        .layout()
        .to_dot(diagram.circuit(), diagram.truth_path().as_ref())
        .unwrap();
    assert!(dot.contains("leaf1 [shape=box"));

    // False -> Unknown breaks the path again.
    assert_eq!(diagram.cycle(b), Ok(TruthValue::Unknown));
    assert!(!diagram.has_truth_path());
    assert!(diagram.highlighted().is_empty());
}
