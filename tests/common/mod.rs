//! Common test utilities for integration tests.

#![allow(dead_code)]

use slint_dag_editor::{GraphEdge, GraphNode, GraphStore, Position, Size};

/// Canvas used by most layout tests.
pub const CANVAS: Size = Size::new(1200.0, 800.0);

/// Nodes `node-0 .. node-{n-1}`, all parked at the origin.
pub fn numbered_nodes(n: usize) -> Vec<GraphNode> {
    (0..n)
        .map(|i| GraphNode::new(format!("node-{i}"), format!("N{i}"), Position::default()))
        .collect()
}

/// Edges between numbered nodes, named `edge-0 ..` in order.
pub fn numbered_edges(pairs: &[(usize, usize)]) -> Vec<GraphEdge> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(s, t))| GraphEdge::new(format!("edge-{i}"), format!("node-{s}"), format!("node-{t}")))
        .collect()
}

/// `0 -> 1 -> ... -> n-1`
pub fn chain_pairs(n: usize) -> Vec<(usize, usize)> {
    (1..n).map(|i| (i - 1, i)).collect()
}

/// Complete binary tree rooted at 0, in heap order.
pub fn binary_tree_pairs(n: usize) -> Vec<(usize, usize)> {
    (1..n).map(|i| ((i - 1) / 2, i)).collect()
}

/// Store holding one node per label, returned ids in the same order.
pub fn store_with_nodes(labels: &[&str]) -> (GraphStore, Vec<String>) {
    let mut store = GraphStore::new();
    let ids = labels.iter().map(|label| store.add_node(Some(label), None)).collect();
    (store, ids)
}

pub fn position_of(nodes: &[GraphNode], id: &str) -> Position {
    nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.position)
        .unwrap_or_else(|| panic!("node {id} missing from layout"))
}
