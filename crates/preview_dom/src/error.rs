//! Error types for preview document operations

use crate::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid preview markup: {0}")]
    InvalidSpec(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DomError>;
