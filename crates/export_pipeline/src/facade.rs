//! Export Façade
//!
//! The one entry point the download page calls. Each request runs to
//! completion independently; the exporter keeps no per-request state.

use crate::color::{ColorNormalizer, ColorParser, CssColorParser};
use crate::config::ExportConfig;
use crate::docx::DocxAssembler;
use crate::error::{ExportError, Result};
use crate::filename::{export_file_name, Clock};
use crate::format::ExportFormat;
use crate::notify::{Notifier, TracingNotifier};
use crate::pdf::PdfAssembler;
use crate::raster::Rasterizer;
use crate::sink::{DownloadSink, ExportedFile, SavedFile};
use preview_dom::{Document, NodeId};
use resume_model::ResumeData;

/// Borrowed handle to the live preview element
#[derive(Debug)]
pub struct PreviewHandle<'a> {
    pub document: &'a mut Document,
    pub element: NodeId,
}

impl<'a> PreviewHandle<'a> {
    pub fn new(document: &'a mut Document, element: NodeId) -> Self {
        Self { document, element }
    }
}

/// Dispatches export requests to the matching assembler
pub struct Exporter<R, S, N = TracingNotifier, P = CssColorParser> {
    rasterizer: R,
    sink: S,
    notifier: N,
    normalizer: ColorNormalizer<P>,
    config: ExportConfig,
    clock: Clock,
}

impl<R: Rasterizer, S: DownloadSink> Exporter<R, S> {
    pub fn new(rasterizer: R, sink: S) -> Self {
        Self {
            rasterizer,
            sink,
            notifier: TracingNotifier,
            normalizer: ColorNormalizer::default(),
            config: ExportConfig::default(),
            clock: Clock::System,
        }
    }
}

impl<R: Rasterizer, S: DownloadSink, N: Notifier, P: ColorParser> Exporter<R, S, N, P> {
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier<M: Notifier>(self, notifier: M) -> Exporter<R, S, M, P> {
        Exporter {
            rasterizer: self.rasterizer,
            sink: self.sink,
            notifier,
            normalizer: self.normalizer,
            config: self.config,
            clock: self.clock,
        }
    }

    pub fn with_color_parser<Q: ColorParser>(self, parser: Q) -> Exporter<R, S, N, Q> {
        Exporter {
            rasterizer: self.rasterizer,
            sink: self.sink,
            notifier: self.notifier,
            normalizer: ColorNormalizer::new(parser),
            config: self.config,
            clock: self.clock,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Export `resume` as `format` and hand the file to the sink.
    ///
    /// Exactly one notification is emitted: success with the saved file, or
    /// an error carrying [`ExportError::user_message`].
    pub async fn request_export(
        &self,
        format: ExportFormat,
        resume: &ResumeData,
        preview: Option<PreviewHandle<'_>>,
    ) -> Result<SavedFile> {
        tracing::debug!(%format, "Export requested");
        let result = self.run(format, resume, preview).await;
        match &result {
            Ok(saved) => self.notifier.success(saved),
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!("Export of {} aborted: {}", format, e);
                } else {
                    tracing::error!("Export of {} failed: {}", format, e);
                }
                self.notifier.error(&e.user_message());
            }
        }
        result
    }

    async fn run(
        &self,
        format: ExportFormat,
        resume: &ResumeData,
        preview: Option<PreviewHandle<'_>>,
    ) -> Result<SavedFile> {
        let file = match format {
            ExportFormat::Pdf => {
                let preview = preview.ok_or(ExportError::PreviewUnavailable)?;
                if !preview.document.is_attached(preview.element) {
                    return Err(ExportError::PreviewUnavailable);
                }
                PdfAssembler::new(&self.rasterizer, &self.normalizer, &self.config)
                    .export(preview.document, preview.element, resume, &self.clock)
                    .await?
            }
            ExportFormat::Docx => {
                DocxAssembler::new(self.config.fallback_file_stem.as_str())
                    .export(resume, &self.clock)?
            }
            ExportFormat::Txt => self.text_export(resume)?,
        };
        Ok(self.sink.save(file).await?)
    }

    fn text_export(&self, resume: &ResumeData) -> Result<ExportedFile> {
        let json = resume.to_pretty_json()?;
        let file_name = export_file_name(
            resume.full_name(),
            &self.config.fallback_file_stem,
            self.clock.today(),
            ExportFormat::Txt.extension(),
        );
        Ok(ExportedFile::new(file_name, ExportFormat::Txt, json.into_bytes()))
    }
}
