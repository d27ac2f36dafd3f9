//! Export failures as the façade reports them

use crate::docx::DocxError;
use crate::paginate::PaginationError;
use crate::pdf::PdfError;
use crate::raster::RasterError;
use crate::sink::SinkError;
use crate::snapshot::SnapshotError;
use resume_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Preview is not available")]
    PreviewUnavailable,

    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Rasterization failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Pagination failed: {0}")]
    Pagination(#[from] PaginationError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX assembly failed: {0}")]
    Docx(#[from] DocxError),

    #[error("Resume serialization failed: {0}")]
    Model(#[from] ModelError),

    #[error("Saving the export failed: {0}")]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// The user can fix this without retrying blindly
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExportError::PreviewUnavailable)
    }

    /// Message suitable for a notification, free of internal detail
    pub fn user_message(&self) -> String {
        match self {
            ExportError::PreviewUnavailable => {
                "The resume preview isn't ready yet. Open the preview and try again.".to_string()
            }
            ExportError::Snapshot(_) | ExportError::Raster(_) | ExportError::Pagination(_) => {
                "Couldn't capture the resume preview for PDF export. Please try again.".to_string()
            }
            ExportError::Pdf(_) => "Couldn't generate the PDF. Please try again.".to_string(),
            ExportError::Docx(_) => {
                "Couldn't generate the Word document. Please try again.".to_string()
            }
            ExportError::Model(_) => "Couldn't export the resume as text.".to_string(),
            ExportError::Sink(SinkError::Io(_)) => {
                "Couldn't save the exported file. Check the destination and try again.".to_string()
            }
            ExportError::Sink(SinkError::InvalidName(name)) => {
                format!("Couldn't save the export as \"{}\".", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_preview_is_recoverable() {
        assert!(ExportError::PreviewUnavailable.is_recoverable());
        assert!(!ExportError::Raster(RasterError::EmptyBitmap).is_recoverable());
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = ExportError::Raster(RasterError::Capture("canvas tainted at 0x7f".to_string()));
        let message = err.user_message();
        assert!(!message.contains("0x7f"));
        assert!(message.contains("PDF"));
    }
}
