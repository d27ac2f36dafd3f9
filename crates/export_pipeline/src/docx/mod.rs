//! DOCX Export
//!
//! Generates a WordprocessingML package straight from resume data.
//!
//! ## Structure
//!
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Paragraphs and runs
//! - `word/styles.xml` - `Normal` and `SectionHeading`
//! - `word/numbering.xml` - The bullet list
//! - `word/settings.xml`
//! - `word/_rels/document.xml.rels` - Document relationships
//! - `docProps/core.xml` - Title and author

mod assembler;
mod content_types;
mod document_writer;
mod error;
mod model;
mod numbering_writer;
mod relationships;
mod styles_writer;
mod writer;

pub use assembler::{theme_for, DocxAssembler, CONTACT_SEPARATOR};
pub use error::{DocxError, DocxResult};
pub use model::{
    Alignment, DocxDocument, DocxTheme, Paragraph, ParagraphProperties, Run, RunContent,
    RunProperties, RIGHT_TAB_TWIPS,
};
pub use numbering_writer::BULLET_NUM_ID;
pub use styles_writer::SECTION_HEADING_STYLE;
pub use writer::{docx_to_bytes, DocxWriter};

use quick_xml::escape::escape;

/// Escape text for XML content or attribute values.
///
/// XML 1.0 has no escape for C0 controls other than tab, newline and
/// carriage return, nor for U+FFFE/U+FFFF. Those become spaces.
pub(crate) fn escape_xml(text: &str) -> String {
    if !text.chars().any(is_forbidden_in_xml) {
        return escape(text).into_owned();
    }
    let cleaned: String = text
        .chars()
        .map(|c| if is_forbidden_in_xml(c) { ' ' } else { c })
        .collect();
    escape(cleaned.as_str()).into_owned()
}

fn is_forbidden_in_xml(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
    /// Core properties
    pub const CP: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const NUMBERING: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
    pub const SETTINGS: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
}
