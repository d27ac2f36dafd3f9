//! Error types for DOCX export

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type DocxResult<T> = std::result::Result<T, DocxError>;
