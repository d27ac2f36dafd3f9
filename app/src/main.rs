//! resume-export - headless driver for the resume export pipeline
//!
//! Loads a resume (and for PDF, a preview tree) from JSON fixtures and runs
//! one export through the façade, writing the file into a directory.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use export_pipeline::{
    BlockRasterizer, Clock, DirectorySink, ExportConfig, Exporter, PreviewHandle, SavedFile,
};
use preview_dom::{Document, ElementSpec, NodeId};
use resume_model::ResumeData;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let saved = run(args).await?;
    match &saved.path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", saved.file_name),
    }
    Ok(())
}

async fn run(args: Args) -> Result<SavedFile> {
    let json = tokio::fs::read_to_string(&args.resume)
        .await
        .with_context(|| format!("Failed to read resume {}", args.resume.display()))?;
    let resume = ResumeData::from_json(&json)
        .with_context(|| format!("Invalid resume JSON in {}", args.resume.display()))?;

    let config = match &args.config {
        Some(path) => ExportConfig::load(path).await?,
        None => ExportConfig::default(),
    };
    let clock = args.date.map(Clock::Fixed).unwrap_or(Clock::System);
    tracing::info!(format = %args.format, out = %args.out.display(), "Starting export");

    let exporter = Exporter::new(BlockRasterizer, DirectorySink::new(&args.out))
        .with_config(config)
        .with_clock(clock);

    let mut document = Document::new();
    let preview = match &args.preview {
        Some(path) => Some(mount_preview(&mut document, path).await?),
        None => None,
    };
    let handle = preview.map(|node| PreviewHandle::new(&mut document, node));

    match exporter.request_export(args.format, &resume, handle).await {
        Ok(saved) => Ok(saved),
        Err(e) => {
            let message = e.user_message();
            Err(anyhow::Error::new(e).context(message))
        }
    }
}

/// Mount the preview fixture under the document body
async fn mount_preview(document: &mut Document, path: &Path) -> Result<NodeId> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read preview {}", path.display()))?;
    let spec = ElementSpec::from_json(&json)
        .with_context(|| format!("Invalid preview JSON in {}", path.display()))?;
    Ok(document.mount(&spec)?)
}
