use std::f64::consts::{FRAC_PI_2, TAU};

use crate::model::{GraphNode, Position, Size, NODE_HEIGHT, NODE_WIDTH};

use super::with_positions;

/// Tuning for [`calculate_circular_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct CircularConfig {
    pub min_radius: f64,
    /// Radius grows by this much per node once it exceeds `min_radius`.
    pub radius_per_node: f64,
}

impl Default for CircularConfig {
    fn default() -> Self {
        Self {
            min_radius: 150.0,
            radius_per_node: 25.0,
        }
    }
}

impl CircularConfig {
    pub fn radius(&self, n: usize) -> f64 {
        self.min_radius.max(self.radius_per_node * n as f64)
    }
}

/// Place node centers evenly on a circle around the canvas center, starting
/// at the top and going clockwise. A single node sits on the center.
pub fn calculate_circular_layout(
    nodes: &[GraphNode],
    canvas: Size,
    config: &CircularConfig,
) -> Vec<GraphNode> {
    let n = nodes.len();
    let cx = canvas.width / 2.0;
    let cy = canvas.height / 2.0;
    let top_left = |x: f64, y: f64| Position::new(x - NODE_WIDTH / 2.0, y - NODE_HEIGHT / 2.0);

    if n == 1 {
        return with_positions(nodes, [top_left(cx, cy)]);
    }

    let radius = config.radius(n);
    let step = TAU / n as f64;
    let positions = (0..n).map(|i| {
        // Screen y grows downwards, so increasing angles run clockwise
        let theta = -FRAC_PI_2 + i as f64 * step;
        top_left(cx + radius * theta.cos(), cy + radius * theta.sin())
    });
    with_positions(nodes, positions)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::geometry::{distance, node_center};

    const CANVAS: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_single_node_centered() {
        let out = calculate_circular_layout(&numbered(1), CANVAS, &CircularConfig::default());
        assert_eq!(node_center(&out[0]), Position::new(500.0, 400.0));
    }

    #[test]
    fn test_radius() {
        let config = CircularConfig::default();
        assert_eq!(config.radius(3), 150.0);
        assert_eq!(config.radius(10), 250.0);
    }

    #[test]
    fn test_nodes_on_circle_starting_at_top_clockwise() {
        let out = calculate_circular_layout(&numbered(4), CANVAS, &CircularConfig::default());
        let center = Position::new(500.0, 400.0);
        for node in &out {
            assert!((distance(node_center(node), center) - 150.0).abs() < 1e-9);
        }
        let first = node_center(&out[0]);
        assert!((first.x - 500.0).abs() < 1e-9);
        assert!((first.y - 250.0).abs() < 1e-9);
        // Second node is a quarter turn clockwise: to the right
        let second = node_center(&out[1]);
        assert!((second.x - 650.0).abs() < 1e-9);
        assert!((second.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_is_deterministic() {
        let n = numbered(9);
        let config = CircularConfig::default();
        assert_eq!(
            calculate_circular_layout(&n, CANVAS, &config),
            calculate_circular_layout(&n, CANVAS, &config)
        );
    }
}
