//! Style declarations and property metadata

use serde::{Deserialize, Serialize};

/// Properties whose computed value falls back to the parent's
pub const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "line-height",
    "text-align",
    "visibility",
];

/// Properties whose initial value is `currentcolor`
pub const CURRENT_COLOR_PROPERTIES: &[&str] = &[
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "text-decoration-color",
];

/// Initial value of a property when nothing sets or inherits it
pub fn initial_value(property: &str) -> Option<&'static str> {
    match property {
        "color" => Some("rgb(0, 0, 0)"),
        "background-color" => Some("transparent"),
        "fill" => Some("rgb(0, 0, 0)"),
        "stroke" => Some("none"),
        "font-size" => Some("16px"),
        "font-family" => Some("serif"),
        "line-height" => Some("normal"),
        "display" => Some("block"),
        "position" => Some("static"),
        "overflow" => Some("visible"),
        "transform" => Some("none"),
        _ => None,
    }
}

/// Whether the property inherits by default
pub fn is_inherited(property: &str) -> bool {
    INHERITED_PROPERTIES.contains(&property)
}

/// An ordered list of `property: value` pairs.
///
/// Property names are stored lowercase. Setting an existing property replaces
/// its value in place, keeping declaration order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value` text. Malformed entries are skipped.
    pub fn parse(css_text: &str) -> Self {
        let mut declaration = Self::new();
        for entry in split_top_level(css_text, ';') {
            if let Some((property, value)) = entry.split_once(':') {
                let property = property.trim();
                let value = value.trim();
                if !property.is_empty() && !value.is_empty() {
                    declaration.set(property, value);
                }
            }
        }
        declaration
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = property.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let property = property.trim().to_ascii_lowercase();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == property) {
            entry.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let property = property.to_ascii_lowercase();
        let index = self.entries.iter().position(|(name, _)| *name == property)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialize back to `prop: value;` text
    pub fn to_css_text(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split on `separator` outside parentheses
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
