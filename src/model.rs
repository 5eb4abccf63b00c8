//! Core data model shared by the validator, the admission policy, the layout
//! engine and the mutation store.
//!
//! All coordinates are `f64` pixel units. A node's `position` is the top-left
//! corner of its rectangle; every node has the same fixed footprint
//! ([`NODE_WIDTH`] x [`NODE_HEIGHT`]).

/// Width of every node rectangle.
pub const NODE_WIDTH: f64 = 120.0;
/// Height of every node rectangle.
pub const NODE_HEIGHT: f64 = 60.0;

/// Prefix used for node identities handed out by the store.
pub const NODE_ID_PREFIX: &str = "node-";
/// Prefix used for edge identities handed out by the store.
pub const EDGE_ID_PREFIX: &str = "edge-";

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas (or any other) dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle occupied by a node whose top-left corner is at `position`.
    pub fn at(position: Position) -> Self {
        Self::new(position.x, position.y, NODE_WIDTH, NODE_HEIGHT)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rectangle by `padding` on every side.
    pub fn inflate(&self, padding: f64) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }
}

/// A node of the edited graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub position: Position,
    /// UI-only flag, ignored by validation and layout.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub selected: bool,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            selected: false,
        }
    }

    /// The node's rectangle on the canvas.
    pub fn rect(&self) -> Rect {
        Rect::at(self.position)
    }
}

/// A directed edge `source -> target`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// UI-only flag, ignored by validation and layout.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub selected: bool,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            selected: false,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Does this edge touch the given node in either direction?
    pub fn is_incident_to(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Trailing decimal number of an identity, e.g. `7` for `"node-7"`.
///
/// Returns `None` when the identity does not end in a digit or the number does
/// not fit in a `u64`.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    id[start..].parse().ok()
}

/// Highest numeric suffix among `ids`, or 0 when none carries one.
pub fn max_numeric_suffix<'a, I>(ids: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().filter_map(numeric_suffix).max().unwrap_or(0)
}
