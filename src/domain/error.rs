//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violated preconditions of tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("not enough nodes to pick from: need at least {required}, tree has {available}")]
    NotEnoughNodes { required: usize, available: usize },

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
