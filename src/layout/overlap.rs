use crate::geometry::node_center;
use crate::model::{GraphNode, Position, NODE_WIDTH};

/// Tuning for [`resolve_node_overlaps`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct OverlapConfig {
    /// Required gap on top of the node width between two node centers.
    pub min_spacing: f64,
    /// Extra distance added to every push.
    pub margin: f64,
    pub max_iterations: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            min_spacing: 20.0,
            margin: 1.0,
            max_iterations: 100,
        }
    }
}

impl OverlapConfig {
    /// Minimum distance between two node centers.
    pub fn min_distance(&self) -> f64 {
        NODE_WIDTH + self.min_spacing
    }
}

/// Outcome of [`resolve_overlaps`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapResolution {
    pub nodes: Vec<GraphNode>,
    /// Sweeps performed, including the final clean one.
    pub iterations: usize,
    /// `true` when the last sweep found no pair closer than
    /// [`OverlapConfig::min_distance`].
    pub converged: bool,
}

/// Push apart every pair of nodes whose centers are closer than
/// `NODE_WIDTH + min_spacing`.
///
/// Each sweep visits all pairs; a close pair is moved apart along the line
/// through their centers, each node by half the deficit plus `margin`.
/// Sweeps repeat until one finds nothing to do or `max_iterations` is hit.
pub fn resolve_overlaps(nodes: &[GraphNode], config: &OverlapConfig) -> OverlapResolution {
    let mut nodes = nodes.to_vec();
    let min_distance = config.min_distance();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let mut moved = false;

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let a = node_center(&nodes[i]);
                let b = node_center(&nodes[j]);
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let d = (dx * dx + dy * dy).sqrt();
                if d >= min_distance {
                    continue;
                }

                let (ux, uy) = if d > 1e-9 {
                    (dx / d, dy / d)
                } else {
                    // Stacked nodes: spread pairs over distinct directions
                    let theta = (i + j) as f64 * 2.399_963_229_728_653;
                    (theta.cos(), theta.sin())
                };
                let push = (min_distance - d) / 2.0 + config.margin;

                let pi = nodes[i].position;
                nodes[i].position = Position::new(pi.x - ux * push, pi.y - uy * push);
                let pj = nodes[j].position;
                nodes[j].position = Position::new(pj.x + ux * push, pj.y + uy * push);
                moved = true;
            }
        }

        if !moved {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::debug!(iterations, "overlap resolution hit the iteration cap");
    }

    OverlapResolution { nodes, iterations, converged }
}

/// [`resolve_overlaps`] without the bookkeeping.
pub fn resolve_node_overlaps(nodes: &[GraphNode], config: &OverlapConfig) -> Vec<GraphNode> {
    resolve_overlaps(nodes, config).nodes
}
