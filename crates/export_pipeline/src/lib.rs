//! Export Pipeline - Resume preview to PDF, DOCX and text files
//!
//! The PDF path snapshots the live preview into an offscreen clone,
//! rewrites colors the rasterizer cannot read, rasterizes the clone at a
//! fixed print width and slices the bitmap onto A4 pages. The DOCX path
//! builds a native document from resume data alone. [`Exporter`] is the
//! single entry point for both, plus a plain JSON text export.

pub mod color;
mod config;
pub mod docx;
mod error;
mod facade;
mod filename;
mod format;
mod notify;
mod paginate;
pub mod pdf;
pub mod raster;
mod sink;
mod snapshot;

pub use color::{
    parse_css_color, ColorError, ColorNormalizer, ColorParser, CssColorParser, NormalizeReport,
    Rgba, COLOR_PROPERTIES, UNSUPPORTED_COLOR_FUNCTIONS,
};
pub use config::{ConfigError, ExportConfig, PageSize};
pub use docx::{DocxAssembler, DocxError};
pub use error::{ExportError, Result};
pub use facade::{Exporter, PreviewHandle};
pub use filename::{export_file_name, safe_name, Clock};
pub use format::{ExportFormat, UnknownFormat};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use paginate::{paginate, PageLayout, PaginationError, Placement};
pub use pdf::{PdfAssembler, PdfError, PdfExportOptions};
pub use raster::{capture, Bitmap, BlockRasterizer, RasterError, RasterOptions, Rasterizer};
pub use sink::{DirectorySink, DownloadSink, ExportedFile, MemorySink, SavedFile, SinkError};
pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotError, COPIED_PROPERTIES, SNAPSHOT_ATTRIBUTE};
