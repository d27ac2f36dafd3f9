//! Snapshot color normalization
//!
//! Walks a subtree pre-order and rewrites every color-bearing computed value
//! that uses a function from [`UNSUPPORTED_COLOR_FUNCTIONS`] into legacy
//! `rgb()`/`rgba()` on the element's inline style. Conversion failures are
//! logged and skipped; normalization never aborts an export.

use super::{ColorParser, CssColorParser, UNSUPPORTED_COLOR_FUNCTIONS};
use preview_dom::{Document, NodeId};
use std::ops::Range;
use thiserror::Error;

/// Properties inspected on every element
pub const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "fill",
    "stroke",
    "text-decoration-color",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Unparseable color: {0}")]
    Unparseable(String),
}

/// What a normalization pass touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub elements_visited: usize,
    pub properties_rewritten: usize,
    pub properties_failed: usize,
}

/// Rewrites unsupported color syntax through a [`ColorParser`]
#[derive(Debug, Clone)]
pub struct ColorNormalizer<P = CssColorParser> {
    parser: P,
}

impl Default for ColorNormalizer<CssColorParser> {
    fn default() -> Self {
        Self::new(CssColorParser)
    }
}

impl<P: ColorParser> ColorNormalizer<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Normalize every element under (and including) `root`
    pub fn normalize(&self, document: &mut Document, root: NodeId) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        for node in document.descendants(root) {
            if !document.is_element(node) {
                continue;
            }
            report.elements_visited += 1;

            for &property in COLOR_PROPERTIES {
                let Some(value) = document.computed_style(node, property) else {
                    continue;
                };
                match self.rewrite_value(&value) {
                    Ok(None) => {}
                    Ok(Some(converted)) => match document.set_style(node, property, &converted) {
                        Ok(()) => report.properties_rewritten += 1,
                        Err(e) => {
                            tracing::warn!(%node, property, error = %e, "Failed to apply converted color");
                            report.properties_failed += 1;
                        }
                    },
                    Err(e) => {
                        tracing::warn!(
                            %node,
                            property,
                            value = %value,
                            error = %e,
                            "Color conversion failed, leaving property unchanged"
                        );
                        report.properties_failed += 1;
                    }
                }
            }
        }

        tracing::debug!(
            elements = report.elements_visited,
            rewritten = report.properties_rewritten,
            failed = report.properties_failed,
            "Color normalization finished"
        );
        report
    }

    /// Rewrite each unsupported function occurrence in a value.
    ///
    /// Returns `Ok(None)` when the value needs no change. One unparseable
    /// occurrence fails the whole value so it is never half-converted.
    pub fn rewrite_value(&self, value: &str) -> Result<Option<String>, ColorError> {
        let ranges = find_unsupported_functions(value);
        if ranges.is_empty() {
            return Ok(None);
        }

        let mut out = String::with_capacity(value.len());
        let mut cursor = 0;
        for range in ranges {
            let source = &value[range.clone()];
            let rgba = self
                .parser
                .parse_color_to_rgba(source)
                .ok_or_else(|| ColorError::Unparseable(source.to_string()))?;
            out.push_str(&value[cursor..range.start]);
            out.push_str(&rgba.to_css());
            cursor = range.end;
        }
        out.push_str(&value[cursor..]);
        Ok(Some(out))
    }
}

/// Whether a value contains any color function the rasterizer rejects
pub fn contains_unsupported_color(value: &str) -> bool {
    !find_unsupported_functions(value).is_empty()
}

/// Byte ranges of outermost unsupported color function calls
pub fn find_unsupported_functions(value: &str) -> Vec<Range<usize>> {
    let bytes = value.as_bytes();
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'-' || b == b'_';
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let starts_ident = (bytes[i].is_ascii_alphabetic() || bytes[i] == b'-')
            && (i == 0 || !is_ident(bytes[i - 1]));
        if !starts_ident {
            i += 1;
            continue;
        }

        let mut end = i;
        while end < bytes.len() && is_ident(bytes[end]) {
            end += 1;
        }
        if end >= bytes.len() || bytes[end] != b'(' {
            i = end;
            continue;
        }

        let name = value[i..end].to_ascii_lowercase();
        if UNSUPPORTED_COLOR_FUNCTIONS.contains(&name.as_str()) {
            let close = matching_paren(bytes, end).unwrap_or(bytes.len() - 1);
            ranges.push(i..close + 1);
            i = close + 1;
        } else {
            // Keep scanning inside other functions such as gradients
            i = end + 1;
        }
    }
    ranges
}

fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use preview_dom::ElementSpec;

    #[test]
    fn test_find_functions() {
        assert_eq!(find_unsupported_functions("oklch(0.5 0.1 200)"), vec![0..18]);
        assert!(find_unsupported_functions("rgb(0, 0, 0)").is_empty());
        assert!(find_unsupported_functions("colorful(1)").is_empty());
        assert!(find_unsupported_functions("--oklab(1)").is_empty());
    }

    #[test]
    fn test_find_nested_in_gradient() {
        let value = "linear-gradient(oklch(1 0 0), lab(0 0 0))";
        let ranges = find_unsupported_functions(value);
        assert_eq!(ranges.len(), 2);
        assert_eq!(&value[ranges[0].clone()], "oklch(1 0 0)");
        assert_eq!(&value[ranges[1].clone()], "lab(0 0 0)");
    }

    #[test]
    fn test_color_mix_is_one_occurrence() {
        let value = "color-mix(in oklab, oklch(1 0 0), black)";
        assert_eq!(find_unsupported_functions(value), vec![0..value.len()]);
    }

    #[test]
    fn test_rewrite_value() {
        let normalizer = ColorNormalizer::new(CssColorParser);
        assert_eq!(
            normalizer.rewrite_value("oklch(1 0 0)").unwrap().as_deref(),
            Some("rgb(255, 255, 255)")
        );
        assert_eq!(
            normalizer.rewrite_value("oklab(0 0 0 / 50%)").unwrap().as_deref(),
            Some("rgba(0, 0, 0, 0.502)")
        );
        assert_eq!(normalizer.rewrite_value("#fff").unwrap(), None);
    }

    #[test]
    fn test_rewrite_value_fails_whole_value() {
        let normalizer = ColorNormalizer::new(CssColorParser);
        let err = normalizer
            .rewrite_value("linear-gradient(oklch(1 0 0), lab(nope))")
            .unwrap_err();
        assert_eq!(err, ColorError::Unparseable("lab(nope)".to_string()));
    }

    struct FixedParser(Option<Rgba>);

    impl ColorParser for FixedParser {
        fn parse_color_to_rgba(&self, _value: &str) -> Option<Rgba> {
            self.0
        }
    }

    #[test]
    fn test_pluggable_parser() {
        let normalizer = ColorNormalizer::new(FixedParser(Some(Rgba::opaque(1, 2, 3))));
        assert_eq!(
            normalizer.rewrite_value("lch(50 10 10)").unwrap().as_deref(),
            Some("rgb(1, 2, 3)")
        );
    }

    #[test]
    fn test_normalize_rewrites_inline_styles() {
        let mut doc = Document::new();
        let root = doc
            .mount(
                &ElementSpec::new("div")
                    .sheet("color: oklch(0 0 0); background-color: oklch(1 0 0)")
                    .child(ElementSpec::new("p").style("border-top-color: lab(100 0 0)").text("x")),
            )
            .unwrap();

        let report = ColorNormalizer::new(CssColorParser).normalize(&mut doc, root);

        assert_eq!(report.elements_visited, 2);
        assert_eq!(doc.inline_style(root, "color"), Some("rgb(0, 0, 0)"));
        assert_eq!(doc.inline_style(root, "background-color"), Some("rgb(255, 255, 255)"));
        let paragraph = doc.children(root)[0];
        assert_eq!(doc.inline_style(paragraph, "border-top-color"), Some("rgb(255, 255, 255)"));
        // Inherited color resolves through the rewritten parent
        assert_eq!(doc.inline_style(paragraph, "color"), None);
        assert_eq!(report.properties_failed, 0);
    }

    #[test]
    fn test_normalize_skips_failures() {
        let mut doc = Document::new();
        let root = doc
            .mount(
                &ElementSpec::new("div")
                    .style("color: oklch(broken); background-color: oklch(1 0 0)"),
            )
            .unwrap();

        let report = ColorNormalizer::new(CssColorParser).normalize(&mut doc, root);

        // color plus the six currentcolor sides that resolve to it
        assert_eq!(report.properties_failed, 7);
        assert_eq!(report.properties_rewritten, 1);
        assert_eq!(doc.inline_style(root, "color"), Some("oklch(broken)"));
        assert_eq!(doc.inline_style(root, "background-color"), Some("rgb(255, 255, 255)"));
    }
}
