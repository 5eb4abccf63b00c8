use std::fmt;

use crate::model::{GraphEdge, GraphNode};
use crate::topology::{is_reachable, node_index, Adjacency};

// ============================================================================
// Edge Admission Framework
// ============================================================================

/// Result of edge validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Edge may be added
    Valid,
    /// Edge is rejected with a reason
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Check if the result is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    /// The rejection reason, if any
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }

    /// Human-readable rejection reason, if any
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Reasons why an edge was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Source and target are the same node
    SelfConnection,
    /// An edge with the same source and target already exists
    DuplicateEdge,
    /// An endpoint is not in the node set
    NodeNotFound(String),
    /// The reverse edge already exists
    DirectCycle,
    /// The target already reaches the source through other edges
    WouldCreateCycle,
    /// Custom validation failure
    Custom(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfConnection => write!(f, "Self-connections are not allowed"),
            Self::DuplicateEdge => write!(f, "Edge already exists"),
            Self::NodeNotFound(id) => write!(f, "Node {} not found", id),
            Self::DirectCycle => write!(f, "Reverse edge already exists; this would create a cycle"),
            Self::WouldCreateCycle => write!(f, "Edge would create a cycle"),
            Self::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trait for edge admission rules.
///
/// Implement this to add custom rules for connecting nodes. Compose rules
/// with [`CompositeValidator`]; the first rejection wins.
///
/// # Example
///
/// ```
/// use slint_dag_editor::{EdgeValidator, GraphEdge, GraphNode, ValidationError, ValidationResult};
///
/// struct MaxFanOut(usize);
///
/// impl EdgeValidator for MaxFanOut {
///     fn validate(
///         &self,
///         source: &str,
///         _target: &str,
///         edges: &[GraphEdge],
///         _nodes: &[GraphNode],
///     ) -> ValidationResult {
///         if edges.iter().filter(|e| e.source == source).count() >= self.0 {
///             ValidationResult::Invalid(ValidationError::Custom("Too many outputs".into()))
///         } else {
///             ValidationResult::Valid
///         }
///     }
/// }
/// ```
pub trait EdgeValidator {
    /// Check if an edge `source -> target` may be added
    ///
    /// # Arguments
    /// * `source` - Identity of the source node
    /// * `target` - Identity of the target node
    /// * `edges` - Current edge set
    /// * `nodes` - Current node set
    fn validate(
        &self,
        source: &str,
        target: &str,
        edges: &[GraphEdge],
        nodes: &[GraphNode],
    ) -> ValidationResult;
}

/// Rejects edges from a node to itself
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSelfConnectionValidator;

impl EdgeValidator for NoSelfConnectionValidator {
    fn validate(&self, source: &str, target: &str, _: &[GraphEdge], _: &[GraphNode]) -> ValidationResult {
        if source == target {
            ValidationResult::Invalid(ValidationError::SelfConnection)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects a second edge with the same ordered (source, target) pair
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatesValidator;

impl EdgeValidator for NoDuplicatesValidator {
    fn validate(&self, source: &str, target: &str, edges: &[GraphEdge], _: &[GraphNode]) -> ValidationResult {
        if edge_exists(source, target, edges) {
            ValidationResult::Invalid(ValidationError::DuplicateEdge)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects edges whose endpoints are missing from the node set
#[derive(Clone, Copy, Debug, Default)]
pub struct EndpointsExistValidator;

impl EdgeValidator for EndpointsExistValidator {
    fn validate(&self, source: &str, target: &str, _: &[GraphEdge], nodes: &[GraphNode]) -> ValidationResult {
        for id in [source, target] {
            if !nodes.iter().any(|n| n.id == id) {
                return ValidationResult::Invalid(ValidationError::NodeNotFound(id.to_string()));
            }
        }
        ValidationResult::Valid
    }
}

/// Rejects an edge whose reverse already exists.
///
/// This only guards against two-node cycles. Longer cycles through
/// intermediate nodes pass and are reported later by
/// [`validate_graph`](crate::validate_graph); add [`NoCycleValidator`] to a
/// policy to reject those too.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDirectCycleValidator;

impl EdgeValidator for NoDirectCycleValidator {
    fn validate(&self, source: &str, target: &str, edges: &[GraphEdge], _: &[GraphNode]) -> ValidationResult {
        if edge_exists(target, source, edges) {
            ValidationResult::Invalid(ValidationError::DirectCycle)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects any edge that would close a directed cycle of any length.
///
/// Not part of [`default_policy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCycleValidator;

impl EdgeValidator for NoCycleValidator {
    fn validate(&self, source: &str, target: &str, edges: &[GraphEdge], nodes: &[GraphNode]) -> ValidationResult {
        let index = node_index(nodes);
        let (Some(&src), Some(&dst)) = (index.get(source), index.get(target)) else {
            return ValidationResult::Valid;
        };
        if is_reachable(&Adjacency::build(nodes, edges), dst, src) {
            ValidationResult::Invalid(ValidationError::WouldCreateCycle)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the edge to be valid (AND logic).
/// Returns the first error encountered (short-circuits on failure).
///
/// # Example
///
/// ```
/// use slint_dag_editor::{CompositeValidator, NoDuplicatesValidator, NoSelfConnectionValidator};
///
/// let validator = CompositeValidator::new()
///     .add(NoSelfConnectionValidator)
///     .add(NoDuplicatesValidator);
/// ```
pub struct CompositeValidator {
    validators: Vec<Box<dyn EdgeValidator>>,
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeValidator {
    /// Create a new empty composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator to the composite
    ///
    /// Validators are checked in the order they were added.
    /// The first validator to return Invalid will short-circuit.
    pub fn add<V: EdgeValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl EdgeValidator for CompositeValidator {
    fn validate(
        &self,
        source: &str,
        target: &str,
        edges: &[GraphEdge],
        nodes: &[GraphNode],
    ) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(source, target, edges, nodes);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

/// The standard admission policy, checked in this order:
///
/// 1. no self-connection
/// 2. no duplicate edge
/// 3. both endpoints exist
/// 4. no direct reverse edge
pub fn default_policy() -> CompositeValidator {
    CompositeValidator::new()
        .add(NoSelfConnectionValidator)
        .add(NoDuplicatesValidator)
        .add(EndpointsExistValidator)
        .add(NoDirectCycleValidator)
}

/// Validate a proposed edge against the [`default_policy`].
///
/// # Example
///
/// ```
/// use slint_dag_editor::{validate_edge, GraphNode, Position, ValidationResult};
///
/// let nodes = vec![
///     GraphNode::new("node-1", "A", Position::default()),
///     GraphNode::new("node-2", "B", Position::default()),
/// ];
/// assert_eq!(validate_edge("node-1", "node-2", &[], &nodes), ValidationResult::Valid);
/// ```
pub fn validate_edge(
    source: &str,
    target: &str,
    edges: &[GraphEdge],
    nodes: &[GraphNode],
) -> ValidationResult {
    default_policy().validate(source, target, edges, nodes)
}

/// Check if an edge with the given direction already exists
pub fn edge_exists(source: &str, target: &str, edges: &[GraphEdge]) -> bool {
    edges.iter().any(|e| e.source == source && e.target == target)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn setup_nodes() -> Vec<GraphNode> {
        ["a", "b", "c"]
            .iter()
            .map(|id| GraphNode::new(*id, id.to_uppercase(), Position::default()))
            .collect()
    }

    fn edge(id: u32, source: &str, target: &str) -> GraphEdge {
        GraphEdge::new(format!("edge-{id}"), source, target)
    }

    #[test]
    fn test_accepts_valid_edge() {
        let result = validate_edge("a", "b", &[], &setup_nodes());
        assert!(result.is_valid());
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_rejects_self_connection() {
        let result = validate_edge("a", "a", &[], &setup_nodes());
        assert_eq!(result, ValidationResult::Invalid(ValidationError::SelfConnection));
    }

    #[test]
    fn test_self_connection_wins_over_missing_node() {
        // Checks run in order; the first failure is reported
        let result = validate_edge("zzz", "zzz", &[], &setup_nodes());
        assert_eq!(result, ValidationResult::Invalid(ValidationError::SelfConnection));
    }

    #[test]
    fn test_rejects_duplicate() {
        let edges = vec![edge(1, "a", "b")];
        let result = validate_edge("a", "b", &edges, &setup_nodes());
        assert_eq!(result, ValidationResult::Invalid(ValidationError::DuplicateEdge));
    }

    #[test]
    fn test_rejects_missing_endpoint() {
        let result = validate_edge("a", "missing", &[], &setup_nodes());
        assert_eq!(
            result,
            ValidationResult::Invalid(ValidationError::NodeNotFound("missing".into()))
        );
        let result = validate_edge("missing", "a", &[], &setup_nodes());
        assert_eq!(
            result,
            ValidationResult::Invalid(ValidationError::NodeNotFound("missing".into()))
        );
    }

    #[test]
    fn test_rejects_direct_cycle() {
        let edges = vec![edge(1, "b", "a")];
        let result = validate_edge("a", "b", &edges, &setup_nodes());
        assert_eq!(result, ValidationResult::Invalid(ValidationError::DirectCycle));
    }

    #[test]
    fn test_longer_cycle_passes_default_policy() {
        let edges = vec![edge(1, "a", "b"), edge(2, "b", "c")];
        assert!(validate_edge("c", "a", &edges, &setup_nodes()).is_valid());
    }

    #[test]
    fn test_no_cycle_validator_rejects_longer_cycle() {
        let edges = vec![edge(1, "a", "b"), edge(2, "b", "c")];
        let policy = default_policy().add(NoCycleValidator);
        let result = policy.validate("c", "a", &edges, &setup_nodes());
        assert_eq!(result, ValidationResult::Invalid(ValidationError::WouldCreateCycle));
        // Forward edges are still fine
        assert!(policy.validate("a", "c", &edges, &setup_nodes()).is_valid());
    }

    #[test]
    fn test_rejection_is_stable() {
        let edges = vec![edge(1, "a", "b")];
        let nodes = setup_nodes();
        assert_eq!(
            validate_edge("a", "b", &edges, &nodes),
            validate_edge("a", "b", &edges, &nodes)
        );
    }

    #[test]
    fn test_validation_result_and_combinator() {
        let valid = ValidationResult::Valid;
        let dup = ValidationResult::Invalid(ValidationError::DuplicateEdge);
        let cyc = ValidationResult::Invalid(ValidationError::DirectCycle);

        assert!(valid.clone().and(ValidationResult::Valid).is_valid());
        assert_eq!(valid.and(dup.clone()), dup);
        assert_eq!(dup.clone().and(cyc), dup);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationResult::Valid.into_result(), Ok(()));
        assert_eq!(
            ValidationResult::Invalid(ValidationError::DuplicateEdge).into_result(),
            Err(ValidationError::DuplicateEdge)
        );
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::SelfConnection.to_string(), "Self-connections are not allowed");
        assert_eq!(ValidationError::DuplicateEdge.to_string(), "Edge already exists");
        assert_eq!(ValidationError::NodeNotFound("x".into()).to_string(), "Node x not found");
        assert_eq!(ValidationError::Custom("nope".into()).to_string(), "nope");
    }

    #[test]
    fn test_custom_validator_in_composite() {
        struct OnlyFromA;
        impl EdgeValidator for OnlyFromA {
            fn validate(&self, source: &str, _: &str, _: &[GraphEdge], _: &[GraphNode]) -> ValidationResult {
                if source == "a" {
                    ValidationResult::Valid
                } else {
                    ValidationResult::Invalid(ValidationError::Custom("only a may connect".into()))
                }
            }
        }

        let policy = default_policy().add(OnlyFromA);
        assert_eq!(policy.len(), 5);
        assert!(policy.validate("a", "c", &[], &setup_nodes()).is_valid());
        assert_eq!(
            policy.validate("b", "c", &[], &setup_nodes()).error_message().as_deref(),
            Some("only a may connect")
        );
    }

    #[test]
    fn test_empty_composite_accepts_everything() {
        let composite = CompositeValidator::new();
        assert!(composite.is_empty());
        assert!(composite.validate("a", "a", &[], &[]).is_valid());
    }
}
