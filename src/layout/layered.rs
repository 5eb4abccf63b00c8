//! Sugiyama layered layout.
//!
//! Delegates ranking and in-rank ordering to the `rust-sugiyama` crate, which
//! breaks cycles and ranks with a tight-tree heuristic internally. This module
//! maps string identities to the dense `u32` indices the crate wants,
//! re-spaces ranks to `rank_separation`, and converts the crate's center
//! coordinates back to top-left positions.
//!
//! Requires the `layout` feature; without it the layered layout reports
//! [`LayoutError::Unavailable`].

use crate::model::{GraphEdge, GraphNode, Position};

use super::LayoutError;

/// Direction ranks advance in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Direction {
    /// Ranks flow top to bottom.
    TopToBottom,
    /// Ranks flow left to right (default).
    #[default]
    LeftToRight,
}

/// Tuning for [`calculate_layered_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct LayeredConfig {
    pub direction: Direction,
    /// Distance between consecutive ranks.
    pub rank_separation: f64,
    /// Minimum spacing between nodes within a rank.
    pub node_separation: f64,
    /// Top-left corner of the laid-out drawing.
    pub origin: Position,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            direction: Direction::LeftToRight,
            rank_separation: 200.0,
            node_separation: 80.0,
            origin: Position::new(100.0, 100.0),
        }
    }
}

/// Compute a layered layout.
///
/// Self-loops, dangling edges and parallel edges are dropped before the
/// graph is handed to `rust-sugiyama`. Disconnected components come back as
/// separate sub-layouts and are placed side by side along the in-rank axis.
#[cfg(feature = "layout")]
pub fn calculate_layered_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    config: &LayeredConfig,
) -> Result<Vec<GraphNode>, LayoutError> {
    use std::collections::{HashMap, HashSet};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use crate::model::{NODE_HEIGHT, NODE_WIDTH};

    use super::with_positions;

    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let horizontal = config.direction == Direction::LeftToRight;
    // Footprint along (in-rank axis, rank axis)
    let (cross_size, rank_size) = if horizontal {
        (NODE_HEIGHT, NODE_WIDTH)
    } else {
        (NODE_WIDTH, NODE_HEIGHT)
    };

    // Build mapping: node id -> sequential u32 index (first occurrence wins)
    let mut id_to_idx: HashMap<&str, u32> = HashMap::with_capacity(nodes.len());
    let mut idx_count: u32 = 0;
    for node in nodes {
        if let std::collections::hash_map::Entry::Vacant(e) = id_to_idx.entry(node.id.as_str()) {
            e.insert(idx_count);
            idx_count += 1;
        }
    }

    let vertices: Vec<(u32, (f64, f64))> =
        (0..idx_count).map(|idx| (idx, (cross_size, rank_size))).collect();

    // Skip self-loops, unknown endpoints and repeated pairs, keeping edge order
    let mut seen = HashSet::new();
    let mapped_edges: Vec<(u32, u32)> = edges
        .iter()
        .filter_map(|e| {
            let src = *id_to_idx.get(e.source.as_str())?;
            let dst = *id_to_idx.get(e.target.as_str())?;
            (src != dst).then_some((src, dst))
        })
        .filter(|pair| seen.insert(*pair))
        .collect();

    let sg_config = rust_sugiyama::configure::Config {
        vertex_spacing: config.node_separation,
        dummy_vertices: false,
        ..Default::default()
    };

    let subgraphs = catch_unwind(AssertUnwindSafe(|| {
        rust_sugiyama::from_vertices_and_edges(&vertices, &mapped_edges, &sg_config)
    }))
    .map_err(|_| LayoutError::Panicked)?;

    // (in-rank center, rank coordinate) per dense index
    let mut raw: Vec<Option<(f64, f64)>> = vec![None; idx_count as usize];
    // First center sits half a footprint in from the origin
    let mut cursor = cross_size / 2.0;
    for (layout, _width, _height) in &subgraphs {
        let Some(min_cross) = layout.iter().map(|&(_, (x, _))| x).reduce(f64::min) else {
            continue;
        };
        let max_cross = layout.iter().map(|&(_, (x, _))| x).fold(min_cross, f64::max);
        for &(idx, (x, y)) in layout {
            if let Some(slot) = raw.get_mut(idx) {
                *slot = Some((cursor + (x - min_cross), y));
            }
        }
        cursor += (max_cross - min_cross) + cross_size + config.node_separation;
    }

    let placed = raw.iter().filter(|p| p.is_some()).count();
    if placed != raw.len() {
        return Err(LayoutError::IncompleteLayout {
            expected: raw.len(),
            got: placed,
        });
    }
    let raw: Vec<(f64, f64)> = raw.into_iter().flatten().collect();

    // Re-space ranks: distinct rank coordinates in ascending order
    let mut ranks: Vec<f64> = raw.iter().map(|&(_, r)| r).collect();
    ranks.sort_by(f64::total_cmp);
    ranks.dedup_by(|a, b| (*a - *b).abs() < 0.5);
    let rank_of = |r: f64| ranks.iter().position(|&k| (k - r).abs() < 0.5).unwrap_or(0);

    let positions = nodes.iter().map(|node| {
        let idx = id_to_idx.get(node.id.as_str()).copied().unwrap_or(0) as usize;
        let (cross_center, rank_coord) = raw[idx];
        let along = rank_of(rank_coord) as f64 * config.rank_separation;
        let across = cross_center - cross_size / 2.0;
        if horizontal {
            Position::new(config.origin.x + along, config.origin.y + across)
        } else {
            Position::new(config.origin.x + across, config.origin.y + along)
        }
    });

    Ok(with_positions(nodes, positions))
}

/// Without the `layout` feature the layered layout is never available.
#[cfg(not(feature = "layout"))]
pub fn calculate_layered_layout(
    _nodes: &[GraphNode],
    _edges: &[GraphEdge],
    _config: &LayeredConfig,
) -> Result<Vec<GraphNode>, LayoutError> {
    Err(LayoutError::Unavailable)
}
