//! Error types for graph mutations and connection attempts.
//!
//! Nothing here is fatal: every error leaves the store exactly as it was
//! before the rejected operation.

use crate::types::ElementId;
use thiserror::Error;

/// Reason a connection attempt was refused by policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRejection {
    #[error("handles have the same polarity")]
    SamePolarity,
    #[error("node connects to itself")]
    SelfConnection,
    #[error("node `{0}` does not exist")]
    MissingNode(ElementId),
    #[error("node `{0}` is not connectable")]
    NotConnectable(ElementId),
    #[error("rejected by connection validator")]
    Vetoed,
}

/// Errors that can occur while mutating the flow
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("node not found: {0}")]
    NodeNotFound(ElementId),

    #[error("edge not found: {0}")]
    EdgeNotFound(ElementId),

    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// Edge endpoint references a node that does not exist
    #[error("edge `{edge}` references missing node `{node}`")]
    DanglingEdge { edge: ElementId, node: ElementId },

    #[error("edge `{0}` connects a node to itself")]
    SelfConnection(ElementId),

    #[error("edge `{0}` duplicates an existing connection")]
    DuplicateEdge(ElementId),

    #[error("element id already in use: {0}")]
    DuplicateId(ElementId),

    #[error("invalid connection: {0}")]
    InvalidConnection(#[from] ConnectionRejection),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for flow operations
pub type FlowResult<T> = Result<T, FlowError>;
