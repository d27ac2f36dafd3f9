//! PDF export options

use super::document::PdfVersion;
use serde::{Deserialize, Serialize};

/// Options for the PDF path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Flate-compress the page bitmap and content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub pdf_version: PdfVersionOption,
    /// Info dictionary `Subject`
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Info dictionary `Creator`
    #[serde(default = "default_creator")]
    pub creator: String,
    /// Info dictionary `Producer`
    #[serde(default = "default_producer")]
    pub producer: String,
}

fn default_compress() -> bool {
    true
}

fn default_subject() -> String {
    "Resume".to_string()
}

fn default_creator() -> String {
    "Resume Builder".to_string()
}

fn default_producer() -> String {
    concat!("resume-export ", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            compress: default_compress(),
            pdf_version: PdfVersionOption::default(),
            subject: default_subject(),
            creator: default_creator(),
            producer: default_producer(),
        }
    }
}

/// PDF version as it appears in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PdfVersionOption {
    #[default]
    V14,
    V17,
}

impl From<PdfVersionOption> for PdfVersion {
    fn from(opt: PdfVersionOption) -> Self {
        match opt {
            PdfVersionOption::V14 => PdfVersion::V1_4,
            PdfVersionOption::V17 => PdfVersion::V1_7,
        }
    }
}
