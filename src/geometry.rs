//! Spatial helpers over node rectangles.
//!
//! Everything here is a pure function of its inputs. Degenerate inputs (an
//! empty node set, a zero-sized canvas) produce a degenerate but well-defined
//! result instead of an error.

use crate::model::{GraphNode, Position, Rect, Size, NODE_HEIGHT, NODE_WIDTH};

/// Where new nodes go when the caller has no preference.
pub const DEFAULT_PLACEMENT: Position = Position::new(100.0, 100.0);
/// Clearance kept around a newly placed node.
pub const DEFAULT_PLACEMENT_PADDING: f64 = 20.0;
/// Offset between two probed candidate positions.
pub const PLACEMENT_STEP: f64 = 50.0;
/// Candidates per probe row.
pub const PLACEMENT_COLUMNS: usize = 10;
/// Upper bound on probed candidates (including the preferred position).
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Margin kept between the node bounding box and the canvas edge by
/// [`fit_nodes_to_view`].
pub const DEFAULT_FIT_PADDING: f64 = 50.0;
/// Fitting never zooms in beyond this factor.
pub const MAX_FIT_SCALE: f64 = 1.5;

/// Side of a node rectangle an edge can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Euclidean distance between two points.
pub fn distance(a: Position, b: Position) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle of the vector `from -> to` in radians, in `(-PI, PI]`.
pub fn angle(from: Position, to: Position) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

pub fn node_center(node: &GraphNode) -> Position {
    node.rect().center()
}

/// Midpoint of the given side of a node rectangle.
pub fn connection_point(node: &GraphNode, side: Side) -> Position {
    let Position { x, y } = node.position;
    match side {
        Side::Left => Position::new(x, y + NODE_HEIGHT / 2.0),
        Side::Right => Position::new(x + NODE_WIDTH, y + NODE_HEIGHT / 2.0),
        Side::Top => Position::new(x + NODE_WIDTH / 2.0, y),
        Side::Bottom => Position::new(x + NODE_WIDTH / 2.0, y + NODE_HEIGHT),
    }
}

/// Is `point` inside `rect`? Points on the border count as inside.
pub fn point_in_rect(point: Position, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Do two rectangles overlap?
///
/// Rectangles only count as disjoint when one lies strictly to the left,
/// right, top or bottom of the other, so touching borders overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

/// Node whose center is closest to `point`.
///
/// On a tie the node that comes first in `nodes` wins.
pub fn find_nearest_node(nodes: &[GraphNode], point: Position) -> Option<&GraphNode> {
    let mut nearest: Option<(&GraphNode, f64)> = None;
    for node in nodes {
        let d = distance(node_center(node), point);
        match nearest {
            Some((_, best)) if d >= best => {}
            _ => nearest = Some((node, d)),
        }
    }
    nearest.map(|(node, _)| node)
}

/// Smallest rectangle containing every node rectangle.
///
/// An empty node set yields the zero rectangle.
pub fn bounding_box(nodes: &[GraphNode]) -> Rect {
    let mut iter = nodes.iter().map(GraphNode::rect);
    let Some(first) = iter.next() else {
        return Rect::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        (first.x, first.y, first.right(), first.bottom());
    for r in iter {
        min_x = min_x.min(r.x);
        min_y = min_y.min(r.y);
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.bottom());
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Find a spot for a new node that does not collide with `nodes`.
///
/// Candidates are probed row-major on a grid of [`PLACEMENT_STEP`] offsets
/// starting at `preferred` (or [`DEFAULT_PLACEMENT`]). The first candidate
/// whose rectangle, grown by `padding`, overlaps no existing node wins. When
/// all [`MAX_PLACEMENT_ATTEMPTS`] candidates collide the starting position is
/// returned and the overlap is tolerated.
pub fn find_non_overlapping_position(
    nodes: &[GraphNode],
    preferred: Option<Position>,
    padding: Option<f64>,
) -> Position {
    let base = preferred.unwrap_or(DEFAULT_PLACEMENT);
    let padding = padding.unwrap_or(DEFAULT_PLACEMENT_PADDING);

    (0..MAX_PLACEMENT_ATTEMPTS)
        .map(|attempt| {
            let col = (attempt % PLACEMENT_COLUMNS) as f64;
            let row = (attempt / PLACEMENT_COLUMNS) as f64;
            Position::new(base.x + col * PLACEMENT_STEP, base.y + row * PLACEMENT_STEP)
        })
        .find(|candidate| {
            let padded = Rect::at(*candidate).inflate(padding);
            !nodes.iter().any(|node| rects_overlap(&padded, &node.rect()))
        })
        .unwrap_or(base)
}

/// Result of [`fit_nodes_to_view`]: the transformed nodes and the transform
/// that was applied (`p' = p * scale + offset`).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFit {
    pub nodes: Vec<GraphNode>,
    pub scale: f64,
    pub offset: Position,
}

/// Scale and translate `nodes` so their bounding box plus `padding` fits in
/// `canvas`, centered.
///
/// The scale never exceeds [`MAX_FIT_SCALE`]. An empty node set yields the
/// identity transform.
pub fn fit_nodes_to_view(nodes: &[GraphNode], canvas: Size, padding: Option<f64>) -> ViewFit {
    if nodes.is_empty() {
        return ViewFit {
            nodes: Vec::new(),
            scale: 1.0,
            offset: Position::default(),
        };
    }

    let padding = padding.unwrap_or(DEFAULT_FIT_PADDING);
    let bounds = bounding_box(nodes);

    // Keep the scale positive even when the canvas is smaller than the padding.
    let available_w = (canvas.width - 2.0 * padding).max(1.0);
    let available_h = (canvas.height - 2.0 * padding).max(1.0);
    let scale = (available_w / bounds.width)
        .min(available_h / bounds.height)
        .min(MAX_FIT_SCALE);

    let offset = Position::new(
        (canvas.width - bounds.width * scale) / 2.0 - bounds.x * scale,
        (canvas.height - bounds.height * scale) / 2.0 - bounds.y * scale,
    );

    let nodes = nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            node.position = Position::new(
                node.position.x * scale + offset.x,
                node.position.y * scale + offset.y,
            );
            node
        })
        .collect();

    ViewFit { nodes, scale, offset }
}
