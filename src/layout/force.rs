use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::model::{GraphEdge, GraphNode, Position, Size, NODE_HEIGHT, NODE_WIDTH};
use crate::topology::Adjacency;

use super::with_positions;

/// Tuning for [`calculate_force_layout`].
///
/// `charge`, `spring`, `max_force`, `node_speed` and `damping` go straight
/// into `force_graph`'s [`SimulationParameters`]. Edges carry a linear spring
/// with no rest length, so the separation a connected pair settles at is set
/// by the balance of `charge` and `spring`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct ForceConfig {
    pub iterations: usize,
    /// Seconds advanced per simulation step.
    pub time_step: f32,
    /// Inverse-square repulsion strength between every pair of nodes.
    pub charge: f32,
    /// Spring constant along edges.
    pub spring: f32,
    pub max_force: f32,
    pub node_speed: f32,
    /// Velocity multiplier applied every step.
    pub damping: f32,
    pub mass: f32,
    /// Fraction of the distance to the canvas center covered after each step.
    pub centering: f64,
    /// Nodes stay this far from the canvas border.
    pub padding: f64,
    /// Seed for the initial scatter.
    pub seed: u64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            time_step: 0.035,
            charge: 12_000.0,
            spring: 0.05,
            max_force: 280.0,
            node_speed: 7_000.0,
            damping: 0.9,
            mass: 10.0,
            centering: 0.01,
            padding: 50.0,
            seed: 0x5eed,
        }
    }
}

impl ForceConfig {
    fn simulation(&self) -> SimulationParameters {
        SimulationParameters {
            force_charge: self.charge,
            force_spring: self.spring,
            force_max: self.max_force,
            node_speed: self.node_speed,
            damping_factor: self.damping,
        }
    }
}

/// Linear congruential generator for the initial scatter.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Allowed top-left positions: the canvas minus `padding` and the footprint.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Position,
    max: Position,
    center: Position,
}

impl Bounds {
    fn new(canvas: Size, padding: f64) -> Self {
        let min = Position::new(padding, padding);
        let max = Position::new(
            (canvas.width - padding - NODE_WIDTH).max(min.x),
            (canvas.height - padding - NODE_HEIGHT).max(min.y),
        );
        Self {
            min,
            max,
            center: Position::new(canvas.width / 2.0, canvas.height / 2.0),
        }
    }

    fn scatter(&self, rng: &mut Lcg) -> Position {
        Position::new(
            self.min.x + rng.next_f64() * (self.max.x - self.min.x),
            self.min.y + rng.next_f64() * (self.max.y - self.min.y),
        )
    }

    /// Nudge a top-left position towards the center, then clamp it.
    ///
    /// A non-finite coordinate restarts from the node centered on the canvas.
    fn settle(&self, x: f64, y: f64, centering: f64) -> Position {
        let home = Position::new(self.center.x - NODE_WIDTH / 2.0, self.center.y - NODE_HEIGHT / 2.0);
        let x = if x.is_finite() { x } else { home.x };
        let y = if y.is_finite() { y } else { home.y };
        Position::new(
            (x + (home.x - x) * centering).clamp(self.min.x, self.max.x),
            (y + (home.y - y) * centering).clamp(self.min.y, self.max.y),
        )
    }
}

/// Spring-repulsion simulation on `force_graph`.
///
/// Nodes start scattered pseudo-randomly (from `config.seed`) inside the
/// canvas. Each of the `iterations` steps advances the simulation by
/// `time_step`, then pulls every node a little towards the canvas center and
/// clamps it to the canvas minus `padding`.
pub fn calculate_force_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    canvas: Size,
    config: &ForceConfig,
) -> Vec<GraphNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let bounds = Bounds::new(canvas, config.padding);
    let mut rng = Lcg(config.seed);
    let mut graph: ForceGraph<(), ()> = ForceGraph::new(config.simulation());

    let particles: Vec<DefaultNodeIdx> = nodes
        .iter()
        .map(|_| {
            let start = bounds.scatter(&mut rng);
            graph.add_node(NodeData {
                x: start.x as f32,
                y: start.y as f32,
                mass: config.mass,
                is_anchor: false,
                user_data: (),
            })
        })
        .collect();

    // The simulation graph is undirected: a <-> b is one spring
    let adjacency = Adjacency::build(nodes, edges);
    let mut springs = HashSet::new();
    for (s, targets) in adjacency.outgoing.iter().enumerate() {
        for &t in targets {
            if s != t && springs.insert((s.min(t), s.max(t))) {
                graph.add_edge(particles[s], particles[t], EdgeData::default());
            }
        }
    }

    for _ in 0..config.iterations {
        graph.update(config.time_step);
        graph.visit_nodes_mut(|node| {
            let p = bounds.settle(node.data.x as f64, node.data.y as f64, config.centering);
            node.data.x = p.x as f32;
            node.data.y = p.y as f32;
        });
    }

    let mut settled = HashMap::with_capacity(particles.len());
    graph.visit_nodes(|node| {
        settled.insert(node.index(), bounds.settle(node.x() as f64, node.y() as f64, 0.0));
    });

    with_positions(
        nodes,
        particles
            .iter()
            .map(|idx| settled.get(idx).copied().unwrap_or(bounds.min)),
    )
}
