use crate::model::{GraphEdge, GraphNode, Position, Size, NODE_WIDTH};
use crate::topology::Adjacency;

use super::with_positions;

/// Tuning for [`calculate_hierarchical_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct HierarchicalConfig {
    /// y of the first level.
    pub top: f64,
    /// Vertical distance between consecutive levels.
    pub level_spacing: f64,
    /// Horizontal distance between neighbours within a level.
    pub node_spacing: f64,
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            top: 100.0,
            level_spacing: 150.0,
            node_spacing: 200.0,
        }
    }
}

/// Group node indices into topological levels.
///
/// Level 0 holds every node without predecessors. A node joins the level
/// after the one in which its last predecessor was placed. Nodes that are
/// never reached (everything on or behind a cycle) form one trailing level.
/// Within a level nodes keep input order of discovery.
pub fn topological_levels(adjacency: &Adjacency) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut pending: Vec<usize> = (0..n).map(|i| adjacency.in_degree(i)).collect();
    let mut placed = vec![false; n];
    let mut levels = Vec::new();

    let mut current = adjacency.roots();
    for &v in &current {
        placed[v] = true;
    }

    while !current.is_empty() {
        let mut next = Vec::new();
        for &v in &current {
            for &w in &adjacency.outgoing[v] {
                if placed[w] {
                    continue;
                }
                pending[w] = pending[w].saturating_sub(1);
                if pending[w] == 0 {
                    placed[w] = true;
                    next.push(w);
                }
            }
        }
        levels.push(current);
        current = next;
    }

    let unreached: Vec<usize> = (0..n).filter(|&i| !placed[i]).collect();
    if !unreached.is_empty() {
        levels.push(unreached);
    }

    levels
}

/// Layered top-down layout; each level is centered on the canvas's vertical
/// axis.
pub fn calculate_hierarchical_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    canvas: Size,
    config: &HierarchicalConfig,
) -> Vec<GraphNode> {
    let adjacency = Adjacency::build(nodes, edges);
    let axis = canvas.width / 2.0;
    let mut positions = vec![Position::default(); nodes.len()];

    for (depth, level) in topological_levels(&adjacency).iter().enumerate() {
        let y = config.top + depth as f64 * config.level_spacing;
        let half_span = (level.len() as f64 - 1.0) * config.node_spacing / 2.0;
        for (slot, &node) in level.iter().enumerate() {
            let center_x = axis - half_span + slot as f64 * config.node_spacing;
            positions[node] = Position::new(center_x - NODE_WIDTH / 2.0, y);
        }
    }

    with_positions(nodes, positions)
}
