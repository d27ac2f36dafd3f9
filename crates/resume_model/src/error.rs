//! Error types for resume model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid resume JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
