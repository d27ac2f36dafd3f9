//! Preview-to-PDF orchestration

use super::document::DocumentInfo;
use super::writer::ImagePdfWriter;
use crate::color::{ColorNormalizer, ColorParser, CssColorParser};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::filename::{export_file_name, Clock};
use crate::format::ExportFormat;
use crate::paginate::paginate;
use crate::raster::{capture, Rasterizer};
use crate::sink::ExportedFile;
use crate::snapshot::SnapshotBuilder;
use chrono::NaiveDateTime;
use preview_dom::{Document, NodeId};
use resume_model::ResumeData;

/// Runs snapshot, normalize, attach, settle, rasterize, paginate and write.
///
/// The snapshot is a scoped guard: it leaves the document when `render`
/// returns, on every path.
pub struct PdfAssembler<'a, R, P = CssColorParser> {
    rasterizer: &'a R,
    normalizer: &'a ColorNormalizer<P>,
    config: &'a ExportConfig,
}

impl<'a, R: Rasterizer, P: ColorParser> PdfAssembler<'a, R, P> {
    pub fn new(
        rasterizer: &'a R,
        normalizer: &'a ColorNormalizer<P>,
        config: &'a ExportConfig,
    ) -> Self {
        Self {
            rasterizer,
            normalizer,
            config,
        }
    }

    /// Render `preview` to PDF bytes
    pub async fn render(
        &self,
        document: &mut Document,
        preview: NodeId,
        resume: &ResumeData,
        created: NaiveDateTime,
    ) -> Result<Vec<u8>> {
        let bitmap = {
            let mut snapshot = SnapshotBuilder::new(self.config.page_size).build(document, preview)?;
            let root = snapshot.root();
            let report = self.normalizer.normalize(snapshot.document_mut(), root);
            tracing::debug!(
                visited = report.elements_visited,
                rewritten = report.properties_rewritten,
                failed = report.properties_failed,
                "Snapshot colors normalized"
            );
            snapshot.attach()?;
            capture(self.rasterizer, &snapshot, self.config).await?
        };

        let layout = paginate(bitmap.width(), bitmap.height(), self.config.page_size)?;
        let info = DocumentInfo::for_resume(resume, &self.config.pdf, created);
        let bytes = ImagePdfWriter::new(self.config.pdf.clone()).to_bytes(&bitmap, &layout, &info)?;

        tracing::debug!(pages = layout.page_count(), size = bytes.len(), "PDF assembled");
        Ok(bytes)
    }

    /// Render and name the download
    pub async fn export(
        &self,
        document: &mut Document,
        preview: NodeId,
        resume: &ResumeData,
        clock: &Clock,
    ) -> Result<ExportedFile> {
        let bytes = self.render(document, preview, resume, clock.now()).await?;
        let file_name = export_file_name(
            resume.full_name(),
            &self.config.fallback_file_stem,
            clock.today(),
            ExportFormat::Pdf.extension(),
        );
        Ok(ExportedFile::new(file_name, ExportFormat::Pdf, bytes))
    }
}
