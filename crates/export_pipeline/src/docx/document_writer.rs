//! word/document.xml writer

use super::model::{DocxDocument, Paragraph, ParagraphProperties, Run, RunContent, RunProperties};
use super::namespaces;
use super::escape_xml;

/// A4 portrait in twips
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: u32 = 1440;

#[derive(Debug, Default)]
pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &DocxDocument) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R
        ));
        xml.push_str("<w:body>");
        for paragraph in &doc.paragraphs {
            write_paragraph(&mut xml, paragraph);
        }
        write_section_properties(&mut xml);
        xml.push_str("</w:body></w:document>");
        xml
    }
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<w:p>");
    if !paragraph.props.is_empty() {
        write_paragraph_properties(xml, &paragraph.props);
    }
    for run in &paragraph.runs {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_paragraph_properties(xml: &mut String, props: &ParagraphProperties) {
    xml.push_str("<w:pPr>");
    if let Some(style) = &props.style_id {
        xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style.as_str())));
    }
    if let Some((num_id, level)) = props.numbering {
        xml.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, num_id
        ));
    }
    if let Some(position) = props.right_tab {
        xml.push_str(&format!(
            r#"<w:tabs><w:tab w:val="right" w:pos="{}"/></w:tabs>"#,
            position
        ));
    }
    if props.space_before.is_some() || props.space_after.is_some() {
        xml.push_str("<w:spacing");
        if let Some(before) = props.space_before {
            xml.push_str(&format!(r#" w:before="{}""#, before));
        }
        if let Some(after) = props.space_after {
            xml.push_str(&format!(r#" w:after="{}""#, after));
        }
        xml.push_str("/>");
    }
    if let Some(alignment) = props.alignment {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_str()));
    }
    xml.push_str("</w:pPr>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    if !run.props.is_empty() {
        write_run_properties(xml, &run.props);
    }
    match &run.content {
        RunContent::Text(text) => {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
            xml.push_str(&escape_xml(text.as_str()));
            xml.push_str("</w:t>");
        }
        RunContent::Tab => xml.push_str("<w:tab/>"),
    }
    xml.push_str("</w:r>");
}

fn write_run_properties(xml: &mut String, props: &RunProperties) {
    xml.push_str("<w:rPr>");
    if props.bold {
        xml.push_str("<w:b/>");
    }
    if props.italic {
        xml.push_str("<w:i/>");
    }
    if let Some(color) = &props.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color.as_str())));
    }
    if let Some(size) = props.size {
        xml.push_str(&format!(r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, size));
    }
    xml.push_str("</w:rPr>");
}

fn write_section_properties(xml: &mut String) {
    xml.push_str("<w:sectPr>");
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        PAGE_WIDTH, PAGE_HEIGHT
    ));
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{0}" w:right="{0}" w:bottom="{0}" w:left="{0}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        PAGE_MARGIN
    ));
    xml.push_str("</w:sectPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::{Alignment, RIGHT_TAB_TWIPS};

    fn write(paragraphs: Vec<Paragraph>) -> String {
        DocumentWriter::new().write(&DocxDocument {
            paragraphs,
            ..Default::default()
        })
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = write(vec![Paragraph::new().run(Run::text("R&D <Lead>"))]);
        assert!(xml.contains(r#"<w:t xml:space="preserve">R&amp;D &lt;Lead&gt;</w:t>"#));
    }

    #[test]
    fn test_control_characters_become_spaces() {
        let xml = write(vec![Paragraph::new().run(Run::text("Led\u{B}team\u{7}"))]);
        assert!(xml.contains(r#"<w:t xml:space="preserve">Led team </w:t>"#));
        assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn test_run_properties() {
        let xml = write(vec![Paragraph::new().run(Run::text("Acme").bold().size(24))]);
        assert!(xml.contains(
            r#"<w:r><w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr><w:t xml:space="preserve">Acme</w:t></w:r>"#
        ));
    }

    #[test]
    fn test_paragraph_properties() {
        let xml = write(vec![Paragraph::new()
            .align(Alignment::Center)
            .right_tab(RIGHT_TAB_TWIPS)
            .bullet(1)
            .space_after(80)
            .run(Run::tab())]);
        assert!(xml.contains(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#));
        assert!(xml.contains(r#"<w:tab w:val="right" w:pos="9026"/>"#));
        assert!(xml.contains(r#"<w:spacing w:after="80"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains("<w:r><w:tab/></w:r>"));
    }

    #[test]
    fn test_a4_section() {
        let xml = write(Vec::new());
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }
}
