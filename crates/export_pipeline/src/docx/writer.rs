//! DOCX package writer
//!
//! Packs the generated parts into a ZIP archive with the OPC structure Word
//! expects.

use super::content_types::{create_default_content_types, ContentTypes};
use super::document_writer::DocumentWriter;
use super::error::DocxResult;
use super::model::DocxDocument;
use super::numbering_writer::NumberingWriter;
use super::relationships::{create_document_rels, create_root_rels, Relationships};
use super::styles_writer::StylesWriter;
use super::namespaces;
use chrono::{DateTime, Utc};
use super::escape_xml;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write every part and finish the archive
    pub fn write(mut self, doc: &DocxDocument, created: DateTime<Utc>) -> DocxResult<W> {
        let document_xml = DocumentWriter::new().write(doc);
        self.write_file("word/document.xml", &document_xml)?;
        self.write_file("word/styles.xml", &StylesWriter::new().write(&doc.theme))?;
        self.write_file("word/numbering.xml", &NumberingWriter::new().write())?;
        self.write_file("word/settings.xml", &generate_settings_xml())?;
        self.write_file(
            "docProps/core.xml",
            &generate_core_xml(doc.title.as_deref(), doc.author.as_deref(), created),
        )?;

        let doc_rels = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels)?;
        let root_rels = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels)?;
        let content_types = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types)?;

        Ok(self.zip.finish()?)
    }

    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Build a complete package in memory
pub fn docx_to_bytes(doc: &DocxDocument, created: DateTime<Utc>) -> DocxResult<Vec<u8>> {
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(doc, created)?;
    Ok(cursor.into_inner())
}

pub fn generate_settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{}"><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        namespaces::W
    )
}

/// docProps/core.xml with title, creator and creation time (W3CDTF, UTC)
pub fn generate_core_xml(title: Option<&str>, author: Option<&str>, created: DateTime<Utc>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
        namespaces::CP,
        namespaces::DC,
        namespaces::DCTERMS,
        namespaces::XSI
    ));
    if let Some(title) = title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    if let Some(author) = author {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(author)));
    }
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        created.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}
