use crate::model::{GraphEdge, GraphNode, Position};
use crate::topology::Adjacency;

use super::with_positions;

/// Growth direction of a tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Root at the top, children below.
    #[default]
    Vertical,
    /// Root on the left, children to the right.
    Horizontal,
}

/// Tuning for [`calculate_tree_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct TreeConfig {
    pub orientation: Orientation,
    /// Top-left corner of the first leaf slot / root level.
    pub origin: Position,
    /// Distance between neighbouring leaf slots.
    pub sibling_spacing: f64,
    /// Distance between depths.
    pub level_spacing: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            origin: Position::new(100.0, 100.0),
            sibling_spacing: 180.0,
            level_spacing: 150.0,
        }
    }
}

/// Tidy tree layout rooted at the single node without predecessors.
///
/// Leaves take consecutive slots in depth-first order; an inner node sits
/// over the midpoint of its first and last child. Returns `None` when the
/// graph is not an out-tree (no unique root, a node with two parents, or
/// nodes the root cannot reach).
pub fn calculate_tree_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    config: &TreeConfig,
) -> Option<Vec<GraphNode>> {
    if nodes.is_empty() {
        return Some(Vec::new());
    }

    let adjacency = Adjacency::build(nodes, edges);
    let roots = adjacency.roots();
    let [root] = roots[..] else {
        return None;
    };

    let n = nodes.len();
    let mut visited = vec![false; n];
    let mut depth = vec![0usize; n];
    let mut breadth = vec![0.0f64; n];
    let mut next_slot = 0.0;

    // (node, children already laid out)
    let mut stack = vec![(root, false)];
    visited[root] = true;

    while let Some((v, children_done)) = stack.pop() {
        let children = &adjacency.outgoing[v];
        if children_done {
            breadth[v] = match (children.first(), children.last()) {
                (Some(&first), Some(&last)) => (breadth[first] + breadth[last]) / 2.0,
                _ => {
                    let slot = next_slot;
                    next_slot += 1.0;
                    slot
                }
            };
            continue;
        }

        stack.push((v, true));
        for &child in children.iter().rev() {
            if visited[child] {
                return None;
            }
            visited[child] = true;
            depth[child] = depth[v] + 1;
            stack.push((child, false));
        }
    }

    if visited.iter().any(|seen| !seen) {
        return None;
    }

    let positions = (0..n).map(|i| {
        let along = breadth[i] * config.sibling_spacing;
        let down = depth[i] as f64 * config.level_spacing;
        match config.orientation {
            Orientation::Vertical => Position::new(config.origin.x + along, config.origin.y + down),
            Orientation::Horizontal => Position::new(config.origin.x + down, config.origin.y + along),
        }
    });
    Some(with_positions(nodes, positions))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_chain_is_a_column() {
        let out = calculate_tree_layout(&numbered(3), &chain(3), &TreeConfig::default()).unwrap();
        assert_eq!(out[0].position, Position::new(100.0, 100.0));
        assert_eq!(out[1].position, Position::new(100.0, 250.0));
        assert_eq!(out[2].position, Position::new(100.0, 400.0));
    }

    #[test]
    fn test_parent_centered_over_children() {
        //     a
        //   / | \
        //  b  c  d
        //  |
        //  e
        let n = nodes(&["a", "b", "c", "d", "e"]);
        let e = edges(&[("a", "b"), ("a", "c"), ("a", "d"), ("b", "e")]);
        let out = calculate_tree_layout(&n, &e, &TreeConfig::default()).unwrap();

        // Leaves in DFS order: e (slot 0), c (slot 1), d (slot 2)
        assert_eq!(position_of(&out, "e").x, 100.0);
        assert_eq!(position_of(&out, "b").x, 100.0);
        assert_eq!(position_of(&out, "c").x, 280.0);
        assert_eq!(position_of(&out, "d").x, 460.0);
        // a sits over the midpoint of b and d
        assert_eq!(position_of(&out, "a").x, 280.0);
        assert_eq!(position_of(&out, "e").y, 400.0);
    }

    #[test]
    fn test_horizontal_orientation_swaps_axes() {
        let config = TreeConfig {
            orientation: Orientation::Horizontal,
            ..Default::default()
        };
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "b"), ("a", "c")]);
        let out = calculate_tree_layout(&n, &e, &config).unwrap();
        assert_eq!(position_of(&out, "a"), Position::new(100.0, 190.0));
        assert_eq!(position_of(&out, "b"), Position::new(250.0, 100.0));
        assert_eq!(position_of(&out, "c"), Position::new(250.0, 280.0));
    }

    #[test]
    fn test_rejects_multiple_roots() {
        let n = nodes(&["a", "b", "c"]);
        let e = edges(&[("a", "c"), ("b", "c")]);
        assert!(calculate_tree_layout(&n, &e, &TreeConfig::default()).is_none());
    }

    #[test]
    fn test_rejects_unreachable_nodes() {
        let n = nodes(&["a", "b", "c", "d"]);
        let e = edges(&[("a", "b"), ("c", "d"), ("d", "c")]);
        assert!(calculate_tree_layout(&n, &e, &TreeConfig::default()).is_none());
    }

    #[test]
    fn test_rejects_shared_child() {
        let n = nodes(&["a", "b", "c", "d"]);
        let e = edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        assert!(calculate_tree_layout(&n, &e, &TreeConfig::default()).is_none());
    }

    #[test]
    fn test_single_node() {
        let out = calculate_tree_layout(&numbered(1), &[], &TreeConfig::default()).unwrap();
        assert_eq!(out[0].position, Position::new(100.0, 100.0));
    }

    #[test]
    fn test_tree_is_deterministic() {
        let n = numbered(7);
        let e = edges(&[
            ("node-1", "node-2"),
            ("node-1", "node-3"),
            ("node-2", "node-4"),
            ("node-2", "node-5"),
            ("node-3", "node-6"),
            ("node-3", "node-7"),
        ]);
        let config = TreeConfig::default();
        assert_eq!(
            calculate_tree_layout(&n, &e, &config),
            calculate_tree_layout(&n, &e, &config)
        );
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = numbered(20_000);
        let out = calculate_tree_layout(&n, &chain(20_000), &TreeConfig::default()).unwrap();
        assert_eq!(out[19_999].position.y, 100.0 + 19_999.0 * 150.0);
    }
}
