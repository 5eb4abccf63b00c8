//! Adjacency and topology statistics.
//!
//! Both the validator and the layout strategy selection look at the graph
//! through [`Adjacency`]: nodes are addressed by their index in the input
//! slice, so every traversal is deterministic in input order.

use std::collections::{HashMap, HashSet};

use crate::model::{GraphEdge, GraphNode};

/// Index-based directed adjacency built from a node/edge snapshot.
///
/// Edges with an endpoint missing from the node set are ignored. Self-loops
/// and parallel edges are kept as given.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// Successor indices per node, in edge order.
    pub outgoing: Vec<Vec<usize>>,
    /// Predecessor indices per node, in edge order.
    pub incoming: Vec<Vec<usize>>,
    /// Number of edges whose endpoints both resolved.
    pub edge_count: usize,
}

impl Adjacency {
    pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        let index = node_index(nodes);
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut edge_count = 0;

        for edge in edges {
            let (Some(&src), Some(&dst)) =
                (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            else {
                continue;
            };
            outgoing[src].push(dst);
            incoming[dst].push(src);
            edge_count += 1;
        }

        Self { outgoing, incoming, edge_count }
    }

    pub fn len(&self) -> usize {
        self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.incoming[node].len()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing[node].len()
    }

    /// Indices of nodes without predecessors, in input order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.in_degree(i) == 0).collect()
    }
}

/// Map from node identity to its index in `nodes` (first occurrence wins).
pub fn node_index(nodes: &[GraphNode]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
    }
    index
}

enum Visit {
    Enter(usize),
    Exit(usize),
}

/// Does the directed graph contain a cycle?
///
/// Depth-first search with an explicit stack, started from every node in
/// turn so cycles unreachable from any root are still found. A self-loop
/// counts as a cycle.
pub fn has_cycle(adjacency: &Adjacency) -> bool {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut on_path = vec![false; n];
    let mut stack = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        stack.push(Visit::Enter(root));

        while let Some(item) = stack.pop() {
            match item {
                Visit::Exit(v) => on_path[v] = false,
                Visit::Enter(v) => {
                    if visited[v] {
                        continue;
                    }
                    visited[v] = true;
                    on_path[v] = true;
                    stack.push(Visit::Exit(v));

                    for &w in adjacency.outgoing[v].iter().rev() {
                        if on_path[w] {
                            return true;
                        }
                        if !visited[w] {
                            stack.push(Visit::Enter(w));
                        }
                    }
                }
            }
        }
    }

    false
}

/// Is `to` reachable from `from` by following edges forward?
pub fn is_reachable(adjacency: &Adjacency, from: usize, to: usize) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(v) = stack.pop() {
        if v == to {
            return true;
        }
        if seen.insert(v) {
            stack.extend(adjacency.outgoing[v].iter().copied());
        }
    }
    false
}

/// Summary numbers over a graph snapshot.
///
/// These drive layout strategy selection and double as the statistics block
/// of exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphStats {
    pub node_count: usize,
    /// Number of edges as given, including dangling ones.
    pub edge_count: usize,
    /// Nodes with in-degree 0.
    pub root_count: usize,
    /// Nodes with out-degree 0.
    pub leaf_count: usize,
    /// Fraction of nodes with in-degree at most 1 (0 for an empty graph).
    pub low_in_degree_ratio: f64,
    /// Edges divided by the number of unordered node pairs (0 below 2 nodes).
    pub density: f64,
}

impl GraphStats {
    pub fn compute(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        Self::from_adjacency(&Adjacency::build(nodes, edges), edges.len())
    }

    pub fn from_adjacency(adjacency: &Adjacency, edge_count: usize) -> Self {
        let n = adjacency.len();
        let root_count = (0..n).filter(|&i| adjacency.in_degree(i) == 0).count();
        let leaf_count = (0..n).filter(|&i| adjacency.out_degree(i) == 0).count();
        let low_in_degree = (0..n).filter(|&i| adjacency.in_degree(i) <= 1).count();

        let low_in_degree_ratio = if n == 0 { 0.0 } else { low_in_degree as f64 / n as f64 };
        let possible_pairs = n * n.saturating_sub(1) / 2;
        let density = if possible_pairs == 0 {
            0.0
        } else {
            edge_count as f64 / possible_pairs as f64
        };

        Self {
            node_count: n,
            edge_count,
            root_count,
            leaf_count,
            low_in_degree_ratio,
            density,
        }
    }

    /// Exactly one root and `n - 1` edges.
    ///
    /// This is a counting test; it does not prove every node hangs off the
    /// root.
    pub fn is_perfect_tree(&self) -> bool {
        self.node_count > 0 && self.root_count == 1 && self.edge_count == self.node_count - 1
    }
}
