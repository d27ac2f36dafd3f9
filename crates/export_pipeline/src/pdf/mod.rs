//! PDF Export
//!
//! A minimal PDF 1.4 writer for image-only documents and the assembler that
//! feeds it a rasterized, paginated preview.

mod assembler;
mod content;
mod document;
mod images;
mod objects;
mod options;
mod writer;

pub use assembler::PdfAssembler;
pub use content::ContentStream;
pub use document::{create_catalog, create_pages, pdf_date, DocumentInfo, MediaBox, PdfPage, PdfVersion};
pub use images::ImageData;
pub use objects::{format_real, PdfDictionary, PdfObject, PdfSerializer, PdfStream, PdfString};
pub use options::{PdfExportOptions, PdfVersionOption};
pub use writer::{ImagePdfWriter, PdfError, PdfWriter, Result};
