//! End-to-end editing scenarios driven through `GraphStore`.

mod common;

use common::*;
use slint_dag_editor::{
    apply_best_layout, default_policy, get_suggested_layout, rects_overlap, validate_edge,
    validate_graph, GraphEdge, GraphNode, GraphStore, LayoutStrategy, NoCycleValidator, Position,
    ValidationError, ValidationResult, Violation,
};

// ============================================================================
// Building a valid DAG
// ============================================================================

#[test]
fn test_chain_is_valid_and_laid_out_as_tree() {
    let (mut store, ids) = store_with_nodes(&["A", "B", "C"]);
    store.add_edge(&ids[0], &ids[1]).unwrap();
    store.add_edge(&ids[1], &ids[2]).unwrap();

    let validation = store.validate();
    assert!(validation.is_valid);
    assert!(validation.errors.is_empty());

    assert_eq!(store.suggested_layout(), LayoutStrategy::Tree);
    assert_eq!(store.apply_best_layout(CANVAS), LayoutStrategy::Tree);

    let nodes = store.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert_ne!(a.position, b.position, "{} and {} share a position", a.id, b.id);
            assert!(!rects_overlap(&a.rect(), &b.rect()), "{} overlaps {}", a.id, b.id);
        }
    }
}

#[test]
fn test_new_nodes_do_not_overlap() {
    let (store, _) = store_with_nodes(&["A", "B", "C", "D", "E", "F"]);
    let nodes = store.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert!(!rects_overlap(&a.rect(), &b.rect()));
        }
    }
}

#[test]
fn test_unconnected_nodes_are_reported_by_label() {
    let (mut store, ids) = store_with_nodes(&["A", "B", "C"]);
    store.add_edge(&ids[0], &ids[1]).unwrap();

    let validation = store.validate();
    assert!(!validation.is_valid);
    assert_eq!(validation.messages(), vec!["Disconnected nodes: C".to_string()]);
}

#[test]
fn test_single_node_is_too_small() {
    let (store, _) = store_with_nodes(&["A"]);
    let validation = store.validate();
    assert!(!validation.is_valid);
    assert_eq!(validation.errors, vec![Violation::TooFewNodes]);
}

// ============================================================================
// Admission
// ============================================================================

#[test]
fn test_self_loop_rejected_before_validation() {
    let (mut store, ids) = store_with_nodes(&["A", "B"]);
    let verdict = store.validate_edge(&ids[0], &ids[0]);
    assert_eq!(verdict, ValidationResult::Invalid(ValidationError::SelfConnection));
    assert!(store.add_edge(&ids[0], &ids[0]).is_err());
    assert!(!store.validate().has(&Violation::SelfLoop));
}

#[test]
fn test_direct_cycle_rejected() {
    let (mut store, ids) = store_with_nodes(&["A", "B"]);
    store.add_edge(&ids[1], &ids[0]).unwrap();
    let err = store.add_edge(&ids[0], &ids[1]).unwrap_err();
    assert_eq!(err, ValidationError::DirectCycle);
    assert_eq!(err.to_string(), "Reverse edge already exists; this would create a cycle");
}

#[test]
fn test_rejection_verdict_is_stable() {
    let (mut store, ids) = store_with_nodes(&["A", "B"]);
    store.add_edge(&ids[0], &ids[1]).unwrap();
    let first = store.validate_edge(&ids[0], &ids[1]);
    let second = store.validate_edge(&ids[0], &ids[1]);
    assert_eq!(first, second);
    assert!(!first.is_valid());
}

#[test]
fn test_longer_cycle_gap_then_reported() {
    let nodes = vec![
        GraphNode::new("a", "A", Position::default()),
        GraphNode::new("b", "B", Position::default()),
        GraphNode::new("c", "C", Position::default()),
    ];
    let mut edges = vec![GraphEdge::new("e1", "a", "b"), GraphEdge::new("e2", "b", "c")];

    assert!(validate_edge("c", "a", &edges, &nodes).is_valid());
    edges.push(GraphEdge::new("e3", "c", "a"));

    let validation = validate_graph(&nodes, &edges);
    assert!(!validation.is_valid);
    assert_eq!(validation.errors, vec![Violation::Cycle]);
}

#[test]
fn test_full_cycle_policy_closes_gap() {
    let mut store = GraphStore::new().with_policy(default_policy().add(NoCycleValidator));
    let a = store.add_node(Some("A"), None);
    let b = store.add_node(Some("B"), None);
    let c = store.add_node(Some("C"), None);
    store.add_edge(&a, &b).unwrap();
    store.add_edge(&b, &c).unwrap();
    assert_eq!(store.add_edge(&c, &a), Err(ValidationError::WouldCreateCycle));
    assert!(store.validate().is_valid);
}

#[test]
fn test_cycle_found_whichever_node_is_listed_first() {
    let edges = numbered_edges(&[(0, 1), (1, 2), (2, 0)]);
    let base = numbered_nodes(3);
    for rotation in 0..3 {
        let mut nodes = base.clone();
        nodes.rotate_left(rotation);
        assert!(validate_graph(&nodes, &edges).has_cycle(), "rotation {rotation}");
    }
}

// ============================================================================
// Deletion and identity
// ============================================================================

#[test]
fn test_delete_cascades_and_ids_stay_unique() {
    let (mut store, ids) = store_with_nodes(&["A", "B", "C"]);
    let ab = store.add_edge(&ids[0], &ids[1]).unwrap();
    store.add_edge(&ids[1], &ids[2]).unwrap();

    store.delete_node(&ids[2]);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].id, ab);

    let d = store.add_node(Some("D"), None);
    assert_eq!(d, "node-4");
    let bd = store.add_edge(&ids[1], &d).unwrap();
    assert_eq!(bd, "edge-3");
    assert!(store.validate().is_valid);
}

#[test]
fn test_reload_continues_numbering() {
    let (mut store, ids) = store_with_nodes(&["A", "B"]);
    store.add_edge(&ids[0], &ids[1]).unwrap();

    let mut reloaded = GraphStore::from_parts(store.nodes(), store.edges());
    assert_eq!(reloaded.node_count(), 2);
    assert_eq!(reloaded.add_node(None, None), "node-3");
}

// ============================================================================
// Layout through the free functions
// ============================================================================

#[test]
fn test_layout_keeps_identity_and_order() {
    let nodes = numbered_nodes(7);
    let edges = numbered_edges(&binary_tree_pairs(7));
    let laid_out = apply_best_layout(&nodes, &edges, CANVAS);

    assert_eq!(get_suggested_layout(&nodes, &edges), LayoutStrategy::Tree);
    assert_eq!(laid_out.len(), nodes.len());
    for (before, after) in nodes.iter().zip(&laid_out) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.label, after.label);
    }

    let root = position_of(&laid_out, "node-0");
    let leaf = position_of(&laid_out, "node-6");
    assert!(root.y < leaf.y);
}

#[test]
fn test_empty_graph_layout_and_fit() {
    let mut store = GraphStore::new();
    assert_eq!(store.apply_best_layout(CANVAS), LayoutStrategy::Grid);
    let fit = store.fit_to_view(CANVAS, None);
    assert_eq!(fit.scale, 1.0);
    assert_eq!(fit.offset, Position::default());
}
