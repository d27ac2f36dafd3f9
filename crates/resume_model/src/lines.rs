//! Lenient description handling
//!
//! The editor stores bullet points either as a list of strings or as one
//! multi-line text block. Both deserialize into a list of trimmed lines.

use serde::{Deserialize, Deserializer};

/// Leading markers users type in front of bullet lines
const BULLET_MARKERS: &[char] = &['•', '-', '*', '–', '·'];

#[derive(Deserialize)]
#[serde(untagged)]
enum LinesRepr {
    Many(Vec<String>),
    One(String),
    Missing(()),
}

/// Deserialize a description field given as a string or a list of strings
pub(crate) fn deserialize_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let lines = match LinesRepr::deserialize(deserializer)? {
        LinesRepr::Many(items) => items.iter().flat_map(|item| split_lines(item)).collect(),
        LinesRepr::One(text) => split_lines(&text),
        LinesRepr::Missing(()) => Vec::new(),
    };
    Ok(lines)
}

/// Split a text block into bullet lines, dropping markers and blank lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(BULLET_MARKERS)
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_strips_markers() {
        let lines = split_lines("• Built X\n- Shipped Y\n\n   * Led Z  ");
        assert_eq!(lines, vec!["Built X", "Shipped Y", "Led Z"]);
    }

    #[test]
    fn test_split_lines_keeps_inner_hyphens() {
        let lines = split_lines("Re-wrote the build - twice");
        assert_eq!(lines, vec!["Re-wrote the build - twice"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("   \n\n").is_empty());
    }
}
