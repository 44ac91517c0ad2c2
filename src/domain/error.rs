//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural violation found while building a classification graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("no root node")]
    NoRoot,

    #[error("multiple root nodes: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("edge {from} -> {to} references an unknown node")]
    DanglingEdge { from: String, to: String },

    #[error("root node has an incoming edge: {0}")]
    RootHasParent(String),

    #[error("node {node} has {count} incoming edges, expected 1")]
    IncomingEdges { node: String, count: usize },

    #[error("question {node} needs exactly one yes and one no branch")]
    Branching { node: String },

    #[error("outcome {0} has outgoing edges")]
    OutcomeHasChildren(String),

    #[error("cycle detected at node: {0}")]
    CycleDetected(String),

    #[error("graph has no outcome nodes")]
    NoOutcomes,
}

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid graph: {0}")]
    InvalidGraph(GraphViolation),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("unknown calculator input {input} for {shape}")]
    UnknownInput { shape: String, input: String },
}

impl From<GraphViolation> for DomainError {
    fn from(violation: GraphViolation) -> Self {
        DomainError::InvalidGraph(violation)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
