//! Node and edge registries.
//!
//! [`GraphStore`] owns the graph the user is editing. Nodes and edges live in
//! Slint [`VecModel`]s so a UI can bind to them directly; every mutation goes
//! through the store, which assigns identities, gates edges through the
//! admission policy, cascades node deletion to incident edges and keeps the
//! selection flags in sync.
//!
//! Identities are never reused: each kind has a counter that only grows, and
//! [`GraphStore::from_parts`] seeds it from the highest numeric suffix in the
//! loaded data.

use std::collections::HashSet;
use std::rc::Rc;

use slint::{Model, ModelRc, VecModel};

use crate::admission::{default_policy, CompositeValidator, EdgeValidator, ValidationError, ValidationResult};
use crate::geometry::{find_non_overlapping_position, fit_nodes_to_view, ViewFit};
use crate::layout::{best_layout, get_suggested_layout, run_layout, LayoutConfig, LayoutStrategy};
use crate::model::{
    max_numeric_suffix, GraphEdge, GraphNode, Position, Size, EDGE_ID_PREFIX, NODE_ID_PREFIX,
};
use crate::selection::SelectionManager;
use crate::topology::GraphStats;
use crate::validator::{validate_graph, GraphValidation};

/// Collect every row of a model.
fn rows<T: Clone + 'static>(model: &VecModel<T>) -> Vec<T> {
    (0..model.row_count()).filter_map(|i| model.row_data(i)).collect()
}

/// Row index of the first item matching `predicate`.
fn find_row<T, F>(model: &VecModel<T>, predicate: F) -> Option<usize>
where
    T: Clone + 'static,
    F: Fn(&T) -> bool,
{
    (0..model.row_count()).find(|&i| model.row_data(i).is_some_and(|item| predicate(&item)))
}

/// Owner of the edited graph.
pub struct GraphStore {
    nodes: Rc<VecModel<GraphNode>>,
    edges: Rc<VecModel<GraphEdge>>,
    last_node_id: u64,
    last_edge_id: u64,
    policy: CompositeValidator,
    layout_config: LayoutConfig,
    node_selection: SelectionManager,
    edge_selection: SelectionManager,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Empty store with the default admission policy.
    pub fn new() -> Self {
        Self {
            nodes: Rc::new(VecModel::default()),
            edges: Rc::new(VecModel::default()),
            last_node_id: 0,
            last_edge_id: 0,
            policy: default_policy(),
            layout_config: LayoutConfig::default(),
            node_selection: SelectionManager::new(),
            edge_selection: SelectionManager::new(),
        }
    }

    /// Load an existing graph.
    ///
    /// Edges referencing a node that is not in `nodes` are dropped. Id
    /// counters start above the highest numeric suffix found.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let (edges, dangling): (Vec<GraphEdge>, Vec<GraphEdge>) = edges
            .into_iter()
            .partition(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
        if !dangling.is_empty() {
            tracing::warn!(count = dangling.len(), "dropped edges with missing endpoints");
        }

        let last_node_id = max_numeric_suffix(nodes.iter().map(|n| n.id.as_str()));
        let last_edge_id = max_numeric_suffix(edges.iter().map(|e| e.id.as_str()));

        let mut store = Self::new();
        store.node_selection.replace_selection(nodes.iter().filter(|n| n.selected).map(|n| n.id.clone()));
        store.edge_selection.replace_selection(edges.iter().filter(|e| e.selected).map(|e| e.id.clone()));
        store.nodes = Rc::new(VecModel::from(nodes));
        store.edges = Rc::new(VecModel::from(edges));
        store.last_node_id = last_node_id;
        store.last_edge_id = last_edge_id;
        tracing::debug!(
            nodes = store.nodes.row_count(),
            edges = store.edges.row_count(),
            last_node_id,
            last_edge_id,
            "loaded graph"
        );
        store
    }

    /// Replace the admission policy used by [`GraphStore::add_edge`].
    pub fn with_policy(mut self, policy: CompositeValidator) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the tuning used by the layout operations.
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Node model for UI binding.
    pub fn nodes_model(&self) -> ModelRc<GraphNode> {
        ModelRc::from(self.nodes.clone())
    }

    /// Edge model for UI binding.
    pub fn edges_model(&self) -> ModelRc<GraphEdge> {
        ModelRc::from(self.edges.clone())
    }

    /// Snapshot of all nodes, in insertion order.
    pub fn nodes(&self) -> Vec<GraphNode> {
        rows(&self.nodes)
    }

    /// Snapshot of all edges, in insertion order.
    pub fn edges(&self) -> Vec<GraphEdge> {
        rows(&self.edges)
    }

    pub fn node(&self, id: &str) -> Option<GraphNode> {
        find_row(&self.nodes, |n| n.id == id).and_then(|row| self.nodes.row_data(row))
    }

    pub fn edge(&self, id: &str) -> Option<GraphEdge> {
        find_row(&self.edges, |e| e.id == id).and_then(|row| self.edges.row_data(row))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.row_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.row_count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::compute(&self.nodes(), &self.edges())
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    fn next_node_id(&mut self) -> String {
        loop {
            self.last_node_id += 1;
            let id = format!("{NODE_ID_PREFIX}{}", self.last_node_id);
            if find_row(&self.nodes, |n| n.id == id).is_none() {
                return id;
            }
        }
    }

    fn next_edge_id(&mut self) -> String {
        loop {
            self.last_edge_id += 1;
            let id = format!("{EDGE_ID_PREFIX}{}", self.last_edge_id);
            if find_row(&self.edges, |e| e.id == id).is_none() {
                return id;
            }
        }
    }

    /// Add a node and return its identity.
    ///
    /// The node goes to the first free spot near `preferred` (see
    /// [`find_non_overlapping_position`]). Without a label it is called
    /// `Node <n>`.
    pub fn add_node(&mut self, label: Option<&str>, preferred: Option<Position>) -> String {
        let id = self.next_node_id();
        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| format!("Node {}", self.last_node_id));
        let position = find_non_overlapping_position(&self.nodes(), preferred, None);

        tracing::debug!(id = %id, label = %label, x = position.x, y = position.y, "added node");
        self.nodes.push(GraphNode::new(id.clone(), label, position));
        id
    }

    /// Change a node's label. Returns `false` if the node does not exist.
    pub fn rename_node(&mut self, id: &str, label: &str) -> bool {
        self.update_node(id, |node| node.label = label.to_string())
    }

    /// Move a node. Returns `false` if the node does not exist.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        self.update_node(id, |node| node.position = position)
    }

    fn update_node<F: FnOnce(&mut GraphNode)>(&mut self, id: &str, f: F) -> bool {
        let Some(row) = find_row(&self.nodes, |n| n.id == id) else {
            return false;
        };
        let Some(mut node) = self.nodes.row_data(row) else {
            return false;
        };
        f(&mut node);
        self.nodes.set_row_data(row, node);
        true
    }

    /// Delete a node together with every edge touching it.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let Some(row) = find_row(&self.nodes, |n| n.id == id) else {
            return false;
        };
        self.nodes.remove(row);
        self.node_selection.remove(id);

        let mut cascaded = 0;
        for i in (0..self.edges.row_count()).rev() {
            if let Some(edge) = self.edges.row_data(i) {
                if edge.is_incident_to(id) {
                    self.edges.remove(i);
                    self.edge_selection.remove(&edge.id);
                    cascaded += 1;
                }
            }
        }

        tracing::debug!(id, cascaded, "deleted node");
        true
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Check a proposed edge against the store's admission policy.
    pub fn validate_edge(&self, source: &str, target: &str) -> ValidationResult {
        self.policy.validate(source, target, &self.edges(), &self.nodes())
    }

    /// Add an edge if the admission policy allows it.
    ///
    /// Returns the new edge's identity, or the rejection reason; on
    /// rejection nothing changes.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<String, ValidationError> {
        if let Err(err) = self.validate_edge(source, target).into_result() {
            tracing::debug!(source, target, %err, "rejected edge");
            return Err(err);
        }

        let id = self.next_edge_id();
        tracing::debug!(id = %id, source, target, "added edge");
        self.edges.push(GraphEdge::new(id.clone(), source, target));
        Ok(id)
    }

    /// Delete an edge. Returns `false` if it does not exist.
    pub fn delete_edge(&mut self, id: &str) -> bool {
        let Some(row) = find_row(&self.edges, |e| e.id == id) else {
            return false;
        };
        self.edges.remove(row);
        self.edge_selection.remove(id);
        tracing::debug!(id, "deleted edge");
        true
    }

    /// Remove everything. Identity counters keep counting.
    pub fn clear(&mut self) {
        self.nodes.set_vec(Vec::new());
        self.edges.set_vec(Vec::new());
        self.node_selection.clear();
        self.edge_selection.clear();
    }

    // ------------------------------------------------------------------
    // Validation and layout
    // ------------------------------------------------------------------

    /// Validate the current graph.
    pub fn validate(&self) -> GraphValidation {
        validate_graph(&self.nodes(), &self.edges())
    }

    pub fn suggested_layout(&self) -> LayoutStrategy {
        get_suggested_layout(&self.nodes(), &self.edges())
    }

    /// Reposition every node with the suggested strategy.
    pub fn apply_best_layout(&mut self, canvas: Size) -> LayoutStrategy {
        let result = best_layout(&self.nodes(), &self.edges(), canvas, &self.layout_config);
        self.write_positions(&result.nodes);
        tracing::debug!(strategy = %result.strategy, "applied layout");
        result.strategy
    }

    /// Reposition every node with a specific strategy.
    ///
    /// Returns the strategy that ran, which is hierarchical when `strategy`
    /// had to fall back.
    pub fn apply_layout(&mut self, strategy: LayoutStrategy, canvas: Size) -> LayoutStrategy {
        let result = run_layout(strategy, &self.nodes(), &self.edges(), canvas, &self.layout_config);
        self.write_positions(&result.nodes);
        tracing::debug!(requested = %strategy, strategy = %result.strategy, "applied layout");
        result.strategy
    }

    /// Scale and translate node positions so the graph fits `canvas`.
    pub fn fit_to_view(&mut self, canvas: Size, padding: Option<f64>) -> ViewFit {
        let fit = fit_nodes_to_view(&self.nodes(), canvas, padding);
        self.write_positions(&fit.nodes);
        fit
    }

    fn write_positions(&self, laid_out: &[GraphNode]) {
        for (row, updated) in laid_out.iter().enumerate() {
            let Some(mut node) = self.nodes.row_data(row) else {
                continue;
            };
            if node.id == updated.id && node.position != updated.position {
                node.position = updated.position;
                self.nodes.set_row_data(row, node);
            }
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Click on a node; `additive` toggles instead of replacing.
    pub fn select_node(&mut self, id: &str, additive: bool) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if !additive {
            self.edge_selection.clear();
        }
        self.node_selection.handle_interaction(id, additive);
        self.sync_selection_flags();
        true
    }

    /// Click on an edge; `additive` toggles instead of replacing.
    pub fn select_edge(&mut self, id: &str, additive: bool) -> bool {
        if self.edge(id).is_none() {
            return false;
        }
        if !additive {
            self.node_selection.clear();
        }
        self.edge_selection.handle_interaction(id, additive);
        self.sync_selection_flags();
        true
    }

    pub fn clear_selection(&mut self) {
        self.node_selection.clear();
        self.edge_selection.clear();
        self.sync_selection_flags();
    }

    pub fn selected_node_ids(&self) -> Vec<String> {
        self.nodes().into_iter().filter(|n| n.selected).map(|n| n.id).collect()
    }

    pub fn selected_edge_ids(&self) -> Vec<String> {
        self.edges().into_iter().filter(|e| e.selected).map(|e| e.id).collect()
    }

    /// Delete every selected edge and node (cascading to incident edges).
    ///
    /// Returns the number of removed nodes and edges.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.node_count() + self.edge_count();
        for id in self.selected_edge_ids() {
            self.delete_edge(&id);
        }
        for id in self.selected_node_ids() {
            self.delete_node(&id);
        }
        self.clear_selection();
        before - (self.node_count() + self.edge_count())
    }

    fn sync_selection_flags(&self) {
        for row in 0..self.nodes.row_count() {
            if let Some(mut node) = self.nodes.row_data(row) {
                let selected = self.node_selection.contains(&node.id);
                if node.selected != selected {
                    node.selected = selected;
                    self.nodes.set_row_data(row, node);
                }
            }
        }
        for row in 0..self.edges.row_count() {
            if let Some(mut edge) = self.edges.row_data(row) {
                let selected = self.edge_selection.contains(&edge.id);
                if edge.selected != selected {
                    edge.selected = selected;
                    self.edges.set_row_data(row, edge);
                }
            }
        }
    }
}
