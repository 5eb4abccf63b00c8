//! Whole-graph rule checking.
//!
//! [`validate_graph`] is recomputed from scratch after every mutation. It is
//! O(V + E) and never mutates its inputs. Violations are advisory: they are
//! reported to the user but never block further editing.

use std::collections::HashSet;
use std::fmt;

use crate::model::{GraphEdge, GraphNode};
use crate::topology::{has_cycle, Adjacency};

/// A single rule violation found by [`validate_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Fewer than two nodes
    TooFewNodes,
    /// Nodes not touched by any edge, by label
    DisconnectedNodes(Vec<String>),
    /// At least one edge points back at its own source
    SelfLoop,
    /// The edges form a directed cycle
    Cycle,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNodes => write!(f, "Graph must have at least 2 nodes"),
            Self::DisconnectedNodes(labels) => {
                write!(f, "Disconnected nodes: {}", labels.join(", "))
            }
            Self::SelfLoop => write!(f, "Self-loops are not allowed"),
            Self::Cycle => write!(f, "Graph contains a cycle"),
        }
    }
}

/// Verdict of [`validate_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphValidation {
    /// `true` iff `errors` is empty and the graph has at least two nodes.
    pub is_valid: bool,
    /// Violations in rule order.
    pub errors: Vec<Violation>,
}

impl GraphValidation {
    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has(&self, violation: &Violation) -> bool {
        self.errors.contains(violation)
    }

    pub fn has_cycle(&self) -> bool {
        self.has(&Violation::Cycle)
    }
}

/// Check the DAG rules against a graph snapshot.
///
/// Every rule is evaluated and all violations are collected, in order:
///
/// 1. at least two nodes
/// 2. with two or more nodes, every node is an endpoint of some edge
/// 3. no edge is a self-loop (reported once)
/// 4. no directed cycle
pub fn validate_graph(nodes: &[GraphNode], edges: &[GraphEdge]) -> GraphValidation {
    let mut errors = Vec::new();

    if nodes.len() < 2 {
        errors.push(Violation::TooFewNodes);
    }

    if nodes.len() >= 2 {
        let connected: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let disconnected: Vec<String> = nodes
            .iter()
            .filter(|n| !connected.contains(n.id.as_str()))
            .map(|n| n.label.clone())
            .collect();
        if !disconnected.is_empty() {
            errors.push(Violation::DisconnectedNodes(disconnected));
        }
    }

    if edges.iter().any(GraphEdge::is_self_loop) {
        errors.push(Violation::SelfLoop);
    }

    if !nodes.is_empty() && !edges.is_empty() && has_cycle(&Adjacency::build(nodes, edges)) {
        errors.push(Violation::Cycle);
    }

    let is_valid = errors.is_empty() && nodes.len() >= 2;
    tracing::trace!(
        nodes = nodes.len(),
        edges = edges.len(),
        violations = errors.len(),
        is_valid,
        "validated graph"
    );

    GraphValidation { is_valid, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn nodes(ids: &[&str]) -> Vec<GraphNode> {
        ids.iter()
            .map(|id| GraphNode::new(*id, id.to_uppercase(), Position::default()))
            .collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<GraphEdge> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (s, t))| GraphEdge::new(format!("edge-{}", i + 1), *s, *t))
            .collect()
    }

    #[test]
    fn test_empty_graph_is_invalid() {
        let result = validate_graph(&[], &[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![Violation::TooFewNodes]);
    }

    #[test]
    fn test_single_node_is_invalid() {
        let result = validate_graph(&nodes(&["a"]), &[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![Violation::TooFewNodes]);
    }

    #[test]
    fn test_simple_chain_is_valid() {
        let result = validate_graph(&nodes(&["a", "b", "c"]), &edges(&[("a", "b"), ("b", "c")]));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_disconnected_nodes_listed_in_one_message() {
        let result = validate_graph(&nodes(&["a", "b", "c", "d"]), &edges(&[("a", "b")]));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![Violation::DisconnectedNodes(vec!["C".into(), "D".into()])]
        );
        assert_eq!(result.messages(), vec!["Disconnected nodes: C, D".to_string()]);
    }

    #[test]
    fn test_self_loop_reported_once() {
        let result = validate_graph(
            &nodes(&["a", "b"]),
            &edges(&[("a", "a"), ("b", "b"), ("a", "b")]),
        );
        let self_loops = result.errors.iter().filter(|v| **v == Violation::SelfLoop).count();
        assert_eq!(self_loops, 1);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_cycle_detected_regardless_of_node_order() {
        let pairs = edges(&[("a", "b"), ("b", "c"), ("c", "a")]);
        for order in [["a", "b", "c"], ["b", "a", "c"], ["c", "b", "a"]] {
            let result = validate_graph(&nodes(&order), &pairs);
            assert!(result.has_cycle(), "cycle missed for order {order:?}");
            assert!(!result.is_valid);
        }
    }

    #[test]
    fn test_violations_accumulate_in_rule_order() {
        // Single node with a self-loop: size, self-loop and cycle all fire
        let result = validate_graph(&nodes(&["a"]), &edges(&[("a", "a")]));
        assert_eq!(
            result.errors,
            vec![Violation::TooFewNodes, Violation::SelfLoop, Violation::Cycle]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "b"), ("c", "a"), ("b", "c")]);
        assert_eq!(validate_graph(&n, &e), validate_graph(&n, &e));
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(Violation::TooFewNodes.to_string(), "Graph must have at least 2 nodes");
        assert_eq!(Violation::SelfLoop.to_string(), "Self-loops are not allowed");
        assert_eq!(Violation::Cycle.to_string(), "Graph contains a cycle");
        assert_eq!(
            Violation::DisconnectedNodes(vec!["X".into()]).to_string(),
            "Disconnected nodes: X"
        );
    }
}
