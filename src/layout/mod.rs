//! Automatic layout.
//!
//! [`get_suggested_layout`] picks a [`LayoutStrategy`] from topology
//! statistics by walking [`LAYOUT_RULES`] top to bottom. [`apply_layout`]
//! runs one strategy and passes the result through the overlap resolver;
//! [`apply_best_layout`] does both.
//!
//! Every function here is pure: the input nodes are never touched and only
//! positions differ between input and output (identities, labels and
//! selection flags are carried over unchanged, in input order).

mod circular;
mod force;
mod grid;
mod hierarchical;
mod layered;
mod overlap;
mod tree;

use std::fmt;

use crate::model::{GraphEdge, GraphNode, Position, Size};
use crate::topology::GraphStats;

pub use circular::{calculate_circular_layout, CircularConfig};
pub use force::{calculate_force_layout, ForceConfig};
pub use grid::{calculate_grid_layout, GridConfig};
pub use hierarchical::{calculate_hierarchical_layout, HierarchicalConfig};
pub use layered::{calculate_layered_layout, Direction, LayeredConfig};
pub use overlap::{resolve_node_overlaps, resolve_overlaps, OverlapConfig, OverlapResolution};
pub use tree::{calculate_tree_layout, Orientation, TreeConfig};

/// The available layout algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutStrategy {
    Grid,
    Circular,
    Hierarchical,
    Tree,
    ForceDirected,
    /// Sugiyama-style ranking via `rust-sugiyama`.
    Layered,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 6] = [
        Self::Grid,
        Self::Circular,
        Self::Hierarchical,
        Self::Tree,
        Self::ForceDirected,
        Self::Layered,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Circular => "circular",
            Self::Hierarchical => "hierarchical",
            Self::Tree => "tree",
            Self::ForceDirected => "force-directed",
            Self::Layered => "layered",
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the layered strategy could not produce positions.
///
/// Never surfaced by [`apply_layout`], which falls back to the hierarchical
/// strategy instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Built without the `layout` feature
    Unavailable,
    /// The external layout algorithm panicked
    Panicked,
    /// The external layout algorithm dropped some nodes
    IncompleteLayout { expected: usize, got: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Layered layout requires the `layout` feature"),
            Self::Panicked => write!(f, "Layered layout algorithm panicked"),
            Self::IncompleteLayout { expected, got } => {
                write!(f, "Layered layout placed {} of {} nodes", got, expected)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Tuning for every strategy plus the overlap resolver.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct LayoutConfig {
    pub grid: GridConfig,
    pub circular: CircularConfig,
    pub hierarchical: HierarchicalConfig,
    pub tree: TreeConfig,
    pub force: ForceConfig,
    pub layered: LayeredConfig,
    pub overlap: OverlapConfig,
}

// ============================================================================
// Strategy selection
// ============================================================================

/// One entry of the strategy decision list.
#[derive(Clone, Copy)]
pub struct LayoutRule {
    /// Short name, used in logs.
    pub name: &'static str,
    pub strategy: LayoutStrategy,
    pub applies: fn(&GraphStats) -> bool,
}

impl LayoutRule {
    pub fn matches(&self, stats: &GraphStats) -> bool {
        (self.applies)(stats)
    }
}

impl fmt::Debug for LayoutRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRule")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .finish()
    }
}

fn at_most_one_node(s: &GraphStats) -> bool {
    s.node_count <= 1
}

fn perfect_tree(s: &GraphStats) -> bool {
    s.is_perfect_tree()
}

fn at_most_four_nodes(s: &GraphStats) -> bool {
    s.node_count <= 4
}

fn mostly_single_parent(s: &GraphStats) -> bool {
    s.low_in_degree_ratio > 0.8 && s.edge_count > 0
}

fn dense(s: &GraphStats) -> bool {
    s.density > 0.3
}

fn small_connected(s: &GraphStats) -> bool {
    s.edge_count > 0 && s.node_count <= 20
}

fn at_most_twelve_nodes(s: &GraphStats) -> bool {
    s.node_count <= 12
}

fn always(_: &GraphStats) -> bool {
    true
}

/// Strategy decision list, evaluated top to bottom; the first match wins.
///
/// The perfect-tree rule sits above the small-graph rule so that a short
/// chain or a star of up to four nodes is still drawn as a tree.
pub const LAYOUT_RULES: &[LayoutRule] = &[
    LayoutRule { name: "trivial", strategy: LayoutStrategy::Grid, applies: at_most_one_node },
    LayoutRule { name: "perfect-tree", strategy: LayoutStrategy::Tree, applies: perfect_tree },
    LayoutRule { name: "small", strategy: LayoutStrategy::Circular, applies: at_most_four_nodes },
    LayoutRule {
        name: "mostly-single-parent",
        strategy: LayoutStrategy::Hierarchical,
        applies: mostly_single_parent,
    },
    LayoutRule { name: "dense", strategy: LayoutStrategy::ForceDirected, applies: dense },
    LayoutRule { name: "small-connected", strategy: LayoutStrategy::Layered, applies: small_connected },
    LayoutRule { name: "medium", strategy: LayoutStrategy::Circular, applies: at_most_twelve_nodes },
    LayoutRule { name: "fallback", strategy: LayoutStrategy::Grid, applies: always },
];

/// First rule of [`LAYOUT_RULES`] matching `stats`.
pub fn matching_rule(stats: &GraphStats) -> Option<&'static LayoutRule> {
    LAYOUT_RULES.iter().find(|rule| rule.matches(stats))
}

/// Pick the strategy best suited to the graph's topology.
pub fn get_suggested_layout(nodes: &[GraphNode], edges: &[GraphEdge]) -> LayoutStrategy {
    let stats = GraphStats::compute(nodes, edges);
    match matching_rule(&stats) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, strategy = %rule.strategy, "suggested layout");
            rule.strategy
        }
        None => LayoutStrategy::Grid,
    }
}

// ============================================================================
// Running strategies
// ============================================================================

/// Outcome of [`run_layout`] and [`best_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// The strategy that produced `nodes`, after any fallback.
    pub strategy: LayoutStrategy,
    pub nodes: Vec<GraphNode>,
}

/// Run `strategy` and resolve overlaps in its output.
///
/// The tree strategy falls back to hierarchical when the graph turns out not
/// to be a tree; the layered strategy falls back to hierarchical when the
/// external algorithm fails.
pub fn apply_layout(
    strategy: LayoutStrategy,
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    canvas: Size,
    config: &LayoutConfig,
) -> Vec<GraphNode> {
    run_layout(strategy, nodes, edges, canvas, config).nodes
}

/// Like [`apply_layout`], but also reports which strategy actually ran.
pub fn run_layout(
    strategy: LayoutStrategy,
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    canvas: Size,
    config: &LayoutConfig,
) -> LayoutResult {
    let hierarchical = || calculate_hierarchical_layout(nodes, edges, canvas, &config.hierarchical);

    let (strategy, laid_out) = match strategy {
        LayoutStrategy::Grid => (strategy, calculate_grid_layout(nodes, &config.grid)),
        LayoutStrategy::Circular => (strategy, calculate_circular_layout(nodes, canvas, &config.circular)),
        LayoutStrategy::Hierarchical => (strategy, hierarchical()),
        LayoutStrategy::Tree => match calculate_tree_layout(nodes, edges, &config.tree) {
            Some(laid_out) => (strategy, laid_out),
            None => {
                tracing::debug!("graph is not a tree, using hierarchical layout");
                (LayoutStrategy::Hierarchical, hierarchical())
            }
        },
        LayoutStrategy::ForceDirected => {
            (strategy, calculate_force_layout(nodes, edges, canvas, &config.force))
        }
        LayoutStrategy::Layered => {
            layered_or_hierarchical(calculate_layered_layout(nodes, edges, &config.layered), hierarchical)
        }
    };

    LayoutResult {
        strategy,
        nodes: resolve_node_overlaps(&laid_out, &config.overlap),
    }
}

fn layered_or_hierarchical<F>(
    layered: Result<Vec<GraphNode>, LayoutError>,
    hierarchical: F,
) -> (LayoutStrategy, Vec<GraphNode>)
where
    F: FnOnce() -> Vec<GraphNode>,
{
    match layered {
        Ok(laid_out) => (LayoutStrategy::Layered, laid_out),
        Err(err) => {
            tracing::warn!(%err, "layered layout failed, using hierarchical layout");
            (LayoutStrategy::Hierarchical, hierarchical())
        }
    }
}

/// Suggest a strategy and apply it.
pub fn best_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    canvas: Size,
    config: &LayoutConfig,
) -> LayoutResult {
    run_layout(get_suggested_layout(nodes, edges), nodes, edges, canvas, config)
}

/// Reposition all nodes with the suggested strategy and default tuning.
pub fn apply_best_layout(nodes: &[GraphNode], edges: &[GraphEdge], canvas: Size) -> Vec<GraphNode> {
    best_layout(nodes, edges, canvas, &LayoutConfig::default()).nodes
}

/// Copy `nodes` with new positions, pairing them up in order.
fn with_positions<I>(nodes: &[GraphNode], positions: I) -> Vec<GraphNode>
where
    I: IntoIterator<Item = Position>,
{
    nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| GraphNode { position, ..node.clone() })
        .collect()
}
