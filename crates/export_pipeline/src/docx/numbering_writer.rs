//! word/numbering.xml writer

use super::namespaces;

/// Numbering instance used by every bullet paragraph
pub const BULLET_NUM_ID: u32 = 1;

#[derive(Debug, Default)]
pub struct NumberingWriter;

impl NumberingWriter {
    pub fn new() -> Self {
        Self
    }

    /// One single-level bullet list, bound to [`BULLET_NUM_ID`]
    pub fn write(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, namespaces::W));
        xml.push_str(r#"<w:abstractNum w:abstractNumId="0">"#);
        xml.push_str(r#"<w:multiLevelType w:val="singleLevel"/>"#);
        xml.push_str(r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/>"#);
        xml.push_str("<w:lvlText w:val=\"\u{2022}\"/><w:lvlJc w:val=\"left\"/>");
        xml.push_str(r#"<w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr>"#);
        xml.push_str("</w:lvl></w:abstractNum>");
        xml.push_str(&format!(
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="0"/></w:num>"#,
            BULLET_NUM_ID
        ));
        xml.push_str("</w:numbering>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_definition() {
        let xml = NumberingWriter::new().write();
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#));
    }
}
