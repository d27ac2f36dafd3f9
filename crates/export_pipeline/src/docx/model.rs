//! Paragraph and run model for generated documents
//!
//! A flat list of paragraphs, each holding formatted runs. Measurements
//! follow WordprocessingML units: twips for spacing and tab positions,
//! half-points for font sizes.

/// Right tab stop at the text-area edge of an A4 page with 1in margins
pub const RIGHT_TAB_TWIPS: u32 = 9026;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Paragraph-level formatting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProperties {
    pub style_id: Option<String>,
    pub alignment: Option<Alignment>,
    pub space_before: Option<u32>,
    pub space_after: Option<u32>,
    /// Right-aligned tab stop position
    pub right_tab: Option<u32>,
    /// Bullet list membership: (numbering id, level)
    pub numbering: Option<(u32, u32)>,
}

impl ParagraphProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Character-level formatting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    pub bold: bool,
    pub italic: bool,
    /// Half-points
    pub size: Option<u32>,
    /// `RRGGBB`
    pub color: Option<String>,
}

impl RunProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    Text(String),
    Tab,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub content: RunContent,
    pub props: RunProperties,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            props: RunProperties::default(),
        }
    }

    pub fn tab() -> Self {
        Self {
            content: RunContent::Tab,
            props: RunProperties::default(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.props.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.props.italic = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.props.size = Some(half_points);
        self
    }

    pub fn color(mut self, hex: &str) -> Self {
        self.props.color = Some(hex.to_string());
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(text) => Some(text),
            RunContent::Tab => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub props: ParagraphProperties,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style_id: &str) -> Self {
        self.props.style_id = Some(style_id.to_string());
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.props.alignment = Some(alignment);
        self
    }

    pub fn space_before(mut self, twips: u32) -> Self {
        self.props.space_before = Some(twips);
        self
    }

    pub fn space_after(mut self, twips: u32) -> Self {
        self.props.space_after = Some(twips);
        self
    }

    pub fn right_tab(mut self, position: u32) -> Self {
        self.props.right_tab = Some(position);
        self
    }

    pub fn bullet(mut self, num_id: u32) -> Self {
        self.props.numbering = Some((num_id, 0));
        self
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Concatenated text, tabs as `\t`
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match &run.content {
                RunContent::Text(text) => text.as_str(),
                RunContent::Tab => "\t",
            })
            .collect()
    }
}

/// Document-wide formatting resolved from the resume's render style
#[derive(Debug, Clone, PartialEq)]
pub struct DocxTheme {
    /// `RRGGBB`
    pub accent_color: String,
    pub font_family: String,
    /// Body text size in half-points
    pub body_size: u32,
    /// Space after body paragraphs in twips
    pub paragraph_after: u32,
}

impl Default for DocxTheme {
    fn default() -> Self {
        Self {
            accent_color: "2563EB".to_string(),
            font_family: "Calibri".to_string(),
            body_size: 22,
            paragraph_after: 160,
        }
    }
}

/// A complete generated document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocxDocument {
    pub theme: DocxTheme,
    pub paragraphs: Vec<Paragraph>,
    /// Core properties: title
    pub title: Option<String>,
    /// Core properties: creator
    pub author: Option<String>,
}

impl DocxDocument {
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn uses_numbering(&self) -> bool {
        self.paragraphs.iter().any(|p| p.props.numbering.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_includes_tabs() {
        let paragraph = Paragraph::new()
            .run(Run::text("Engineer").italic())
            .run(Run::tab())
            .run(Run::text("2020 - 2022"));
        assert_eq!(paragraph.plain_text(), "Engineer\t2020 - 2022");
        assert!(paragraph.runs[0].props.italic);
        assert!(paragraph.runs[1].props.is_empty());
    }

    #[test]
    fn test_uses_numbering() {
        let mut doc = DocxDocument::default();
        doc.push(Paragraph::new().run(Run::text("x")));
        assert!(!doc.uses_numbering());
        doc.push(Paragraph::new().bullet(1).run(Run::text("y")));
        assert!(doc.uses_numbering());
    }
}
