//! word/styles.xml writer
//!
//! Two styles: `Normal` for body text and `SectionHeading`, an accent
//! colored heading with a bottom rule.

use super::model::DocxTheme;
use super::namespaces;
use super::escape_xml;

pub const SECTION_HEADING_STYLE: &str = "SectionHeading";

#[derive(Debug, Default)]
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, theme: &DocxTheme) -> String {
        let font = escape_xml(theme.font_family.as_str());
        let accent = escape_xml(theme.accent_color.as_str());
        let heading_size = theme.body_size + 4;

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            font
        ));
        xml.push_str(&format!(
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            theme.body_size
        ));
        xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>");
        xml.push_str(&format!(
            r#"<w:spacing w:after="{}" w:line="259" w:lineRule="auto"/>"#,
            theme.paragraph_after
        ));
        xml.push_str("</w:pPr></w:pPrDefault></w:docDefaults>");

        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#);

        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{0}"><w:name w:val="Section Heading"/>"#,
            SECTION_HEADING_STYLE
        ));
        xml.push_str(r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#);
        xml.push_str("<w:pPr><w:keepNext/>");
        xml.push_str(&format!(
            r#"<w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="{}"/></w:pBdr>"#,
            accent
        ));
        xml.push_str(r#"<w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr>"#);
        xml.push_str(&format!(
            r#"<w:rPr><w:b/><w:caps/><w:color w:val="{0}"/><w:sz w:val="{1}"/><w:szCs w:val="{1}"/></w:rPr>"#,
            accent, heading_size
        ));
        xml.push_str("</w:style>");

        xml.push_str("</w:styles>");
        xml
    }
}
