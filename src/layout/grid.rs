use crate::model::{GraphNode, Position};

use super::with_positions;

/// Tuning for [`calculate_grid_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct GridConfig {
    /// Top-left corner of the first cell.
    pub origin: Position,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(100.0, 100.0),
            spacing_x: 200.0,
            spacing_y: 150.0,
        }
    }
}

/// Number of grid columns for `n` nodes: `ceil(sqrt(n * 1.2))`, at least 1.
pub fn grid_columns(n: usize) -> usize {
    ((n as f64 * 1.2).sqrt().ceil() as usize).max(1)
}

/// Place nodes row-major on a regular grid.
pub fn calculate_grid_layout(nodes: &[GraphNode], config: &GridConfig) -> Vec<GraphNode> {
    let columns = grid_columns(nodes.len());
    let positions = (0..nodes.len()).map(|i| {
        let col = (i % columns) as f64;
        let row = (i / columns) as f64;
        Position::new(
            config.origin.x + col * config.spacing_x,
            config.origin.y + row * config.spacing_y,
        )
    });
    with_positions(nodes, positions)
}
