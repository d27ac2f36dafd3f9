//! Integration tests for the PDF export path

use chrono::NaiveDate;
use export_pipeline::raster::Result as RasterResult;
use export_pipeline::{
    Bitmap, BlockRasterizer, Clock, DirectorySink, ExportConfig, ExportError, ExportFormat,
    Exporter, MemorySink, Notification, PreviewHandle, RasterError, RasterOptions, Rasterizer,
    RecordingNotifier, SNAPSHOT_ATTRIBUTE,
};
use preview_dom::{Document, ElementSpec, NodeId};
use resume_model::ResumeData;
use std::time::Duration;

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    async fn rasterize(
        &self,
        document: &Document,
        root: NodeId,
        _options: &RasterOptions,
    ) -> RasterResult<Bitmap> {
        assert!(document.is_attached(root));
        Err(RasterError::Capture("renderer crashed".to_string()))
    }
}

fn clock() -> Clock {
    Clock::Fixed(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
}

fn no_delay() -> ExportConfig {
    ExportConfig {
        settle_delay_ms: 0,
        ..Default::default()
    }
}

fn alex_lee() -> ResumeData {
    let mut resume = ResumeData::default();
    resume.personal_info.full_name = "Alex Lee".to_string();
    resume
}

/// A preview styled through a sheet the way the app's theme does it
fn mount_preview(doc: &mut Document, body_height_px: u32) -> NodeId {
    doc.mount(
        &ElementSpec::new("div")
            .attr("id", "resume-preview")
            .sheet("color: oklch(0.3 0.05 250); background-color: lab(98 0 0)")
            .style("transform: scale(0.75)")
            .child(
                ElementSpec::new("h1")
                    .style(
                        "font-size: 28px; border-bottom-width: 2px; \
                         border-bottom-style: solid; border-bottom-color: oklch(0.55 0.2 260)",
                    )
                    .text("Alex Lee"),
            )
            .child(ElementSpec::new("section").style(&format!("height: {}px", body_height_px))),
    )
    .unwrap()
}

fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[tokio::test]
async fn test_pdf_export_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::new();
    let preview = mount_preview(&mut doc, 200);
    let before = doc.len();

    let exporter = Exporter::new(BlockRasterizer, DirectorySink::new(dir.path()))
        .with_config(no_delay())
        .with_notifier(RecordingNotifier::new())
        .with_clock(clock());
    let saved = exporter
        .request_export(
            ExportFormat::Pdf,
            &alex_lee(),
            Some(PreviewHandle::new(&mut doc, preview)),
        )
        .await
        .unwrap();

    assert_eq!(saved.file_name, "Alex_Lee_2024-01-15.pdf");
    let path = saved.path.clone().unwrap();
    assert_eq!(path, dir.path().join("Alex_Lee_2024-01-15.pdf"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, saved.size);
    let text = pdf_text(&bytes);
    assert!(text.starts_with("%PDF-1.4"));
    assert!(text.contains("/Count 1"));
    assert!(text.contains("(Alex Lee - Resume)"));
    assert!(text.trim_end().ends_with("%%EOF"));

    // Only the finished file is left behind
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);

    // The document is back to its pre-export shape
    assert_eq!(doc.len(), before);
    assert!(doc.find_by_attribute(doc.body(), SNAPSHOT_ATTRIBUTE).is_empty());
    assert_eq!(doc.inline_style(preview, "transform"), Some("scale(0.75)"));
    assert_eq!(doc.inline_style(preview, "color"), None);
    assert_eq!(
        doc.computed_style(preview, "color").as_deref(),
        Some("oklch(0.3 0.05 250)")
    );

    assert_eq!(
        exporter.notifier().events(),
        vec![Notification::Success("Alex_Lee_2024-01-15.pdf".to_string())]
    );
}

#[tokio::test]
async fn test_tall_preview_spans_pages() {
    let mut doc = Document::new();
    // 1500 CSS px of content renders 3000 device px, about 397mm of A4 width
    let preview = mount_preview(&mut doc, 1500);

    let exporter = Exporter::new(BlockRasterizer, MemorySink::new())
        .with_config(no_delay())
        .with_clock(clock());
    exporter
        .request_export(
            ExportFormat::Pdf,
            &alex_lee(),
            Some(PreviewHandle::new(&mut doc, preview)),
        )
        .await
        .unwrap();

    let files = exporter.sink().files().await;
    let text = pdf_text(&files[0].bytes);
    assert!(text.contains("/Count 2"));
    // One image shared by both pages
    assert_eq!(text.matches("/Subtype /Image").count(), 1);
}

#[tokio::test]
async fn test_failed_capture_cleans_up_and_notifies() {
    let mut doc = Document::new();
    let preview = mount_preview(&mut doc, 200);
    let before = doc.len();

    let exporter = Exporter::new(FailingRasterizer, MemorySink::new())
        .with_config(no_delay())
        .with_notifier(RecordingNotifier::new())
        .with_clock(clock());
    let err = exporter
        .request_export(
            ExportFormat::Pdf,
            &alex_lee(),
            Some(PreviewHandle::new(&mut doc, preview)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Raster(RasterError::Capture(_))));
    assert!(!err.is_recoverable());
    assert_eq!(doc.len(), before);
    assert!(doc.find_by_attribute(doc.body(), SNAPSHOT_ATTRIBUTE).is_empty());
    assert!(exporter.sink().files().await.is_empty());
    assert_eq!(
        exporter.notifier().events(),
        vec![Notification::Error(err.user_message())]
    );
}

#[tokio::test]
async fn test_unconvertible_color_fails_capture() {
    let mut doc = Document::new();
    let preview = doc
        .mount(
            &ElementSpec::new("div")
                .style("background-color: oklch(not a color)")
                .text("Alex Lee"),
        )
        .unwrap();
    let before = doc.len();

    let exporter = Exporter::new(BlockRasterizer, MemorySink::new())
        .with_config(no_delay())
        .with_clock(clock());
    let err = exporter
        .request_export(
            ExportFormat::Pdf,
            &alex_lee(),
            Some(PreviewHandle::new(&mut doc, preview)),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::Raster(RasterError::UnsupportedColor { .. })
    ));
    assert_eq!(doc.len(), before);
}

#[tokio::test]
async fn test_missing_preview_saves_nothing() {
    let exporter = Exporter::new(BlockRasterizer, MemorySink::new())
        .with_notifier(RecordingNotifier::new())
        .with_clock(clock());

    let err = exporter
        .request_export(ExportFormat::Pdf, &alex_lee(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::PreviewUnavailable));
    assert!(err.is_recoverable());
    assert!(exporter.sink().files().await.is_empty());
    assert_eq!(exporter.notifier().events().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_capture_waits_for_layout_to_settle() {
    let mut doc = Document::new();
    let preview = mount_preview(&mut doc, 200);

    let exporter = Exporter::new(BlockRasterizer, MemorySink::new()).with_clock(clock());
    assert_eq!(exporter.config().settle_delay_ms, 100);

    let started = tokio::time::Instant::now();
    exporter
        .request_export(
            ExportFormat::Pdf,
            &alex_lee(),
            Some(PreviewHandle::new(&mut doc, preview)),
        )
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_repeated_exports_are_independent() {
    let mut doc = Document::new();
    let preview = mount_preview(&mut doc, 200);
    let before = doc.len();

    let exporter = Exporter::new(BlockRasterizer, MemorySink::new())
        .with_config(no_delay())
        .with_clock(clock());
    for _ in 0..3 {
        exporter
            .request_export(
                ExportFormat::Pdf,
                &alex_lee(),
                Some(PreviewHandle::new(&mut doc, preview)),
            )
            .await
            .unwrap();
        assert_eq!(doc.len(), before);
    }

    let files = exporter.sink().files().await;
    assert_eq!(files.len(), 3);
    assert_eq!(files[0].bytes, files[2].bytes);
}
