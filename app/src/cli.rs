//! Command-line arguments

use chrono::NaiveDate;
use clap::Parser;
use export_pipeline::ExportFormat;
use std::path::PathBuf;

/// Export a resume as PDF, DOCX or JSON text
#[derive(Debug, Parser)]
#[command(name = "resume-export", version, about)]
pub struct Args {
    /// Resume data as JSON
    #[arg(long)]
    pub resume: PathBuf,

    /// Output format: pdf, docx or txt
    #[arg(long, default_value = "pdf")]
    pub format: ExportFormat,

    /// Preview markup as JSON, required for PDF
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Directory the export is written to
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Export configuration as JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Date stamped into the file name instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["resume-export", "--resume", "r.json"]).unwrap();
        assert_eq!(args.format, ExportFormat::Pdf);
        assert_eq!(args.out, PathBuf::from("."));
        assert!(args.preview.is_none());
        assert!(args.date.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "resume-export",
            "--resume",
            "r.json",
            "--format",
            "docx",
            "--preview",
            "dom.json",
            "--out",
            "exports",
            "--config",
            "cfg.json",
            "--date",
            "2024-01-15",
        ])
        .unwrap();
        assert_eq!(args.format, ExportFormat::Docx);
        assert_eq!(args.preview, Some(PathBuf::from("dom.json")));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["resume-export", "--resume", "r.json", "--format", "odt"]).is_err());
        assert!(Args::try_parse_from(["resume-export", "--resume", "r.json", "--date", "15/01/2024"]).is_err());
    }
}
