//! Integration tests for color normalization and download naming

use chrono::NaiveDate;
use export_pipeline::{
    export_file_name, parse_css_color, safe_name, ColorNormalizer, ColorParser, PageSize, Rgba,
    SnapshotBuilder, COLOR_PROPERTIES,
};
use preview_dom::{Document, ElementSpec, NodeId};
use proptest::prelude::*;

fn themed_tree(doc: &mut Document) -> NodeId {
    doc.mount(
        &ElementSpec::new("article")
            .style("color: oklch(0.25 0.02 260); background-color: #ffffff")
            .child(
                ElementSpec::new("h2")
                    .style("color: lab(40 20 -50); border-bottom-color: color-mix(in srgb, red 50%, blue)")
                    .text("Experience"),
            )
            .child(
                ElementSpec::new("p")
                    .style("background-color: oklab(0.9 0 0 / 50%)")
                    .text("Built X"),
            ),
    )
    .unwrap()
}

fn inline_colors(doc: &Document, root: NodeId) -> Vec<Option<String>> {
    doc.descendants(root)
        .into_iter()
        .filter(|&node| doc.is_element(node))
        .flat_map(|node| {
            COLOR_PROPERTIES
                .iter()
                .map(move |property| doc.inline_style(node, property).map(str::to_string))
        })
        .collect()
}

#[test]
fn test_normalize_is_idempotent() {
    let mut doc = Document::new();
    let root = themed_tree(&mut doc);
    let normalizer = ColorNormalizer::default();

    let first = normalizer.normalize(&mut doc, root);
    assert_eq!(first.elements_visited, 3);
    assert_eq!(first.properties_failed, 0);
    assert!(first.properties_rewritten >= 4);
    let after_first = inline_colors(&doc, root);

    let second = normalizer.normalize(&mut doc, root);
    assert_eq!(second.properties_rewritten, 0);
    assert_eq!(inline_colors(&doc, root), after_first);
}

#[test]
fn test_normalized_values_are_legacy_syntax() {
    let mut doc = Document::new();
    let root = themed_tree(&mut doc);
    ColorNormalizer::default().normalize(&mut doc, root);

    for node in doc.descendants(root) {
        if !doc.is_element(node) {
            continue;
        }
        for property in COLOR_PROPERTIES {
            if let Some(value) = doc.computed_style(node, property) {
                assert!(
                    value == "none" || parse_css_color(&value).is_some(),
                    "{} = {}",
                    property,
                    value
                );
                assert!(!value.contains("okl") && !value.contains("lab("), "{}", value);
            }
        }
    }

    let p = doc
        .descendants(root)
        .into_iter()
        .find(|&node| doc.element(node).map(|e| e.tag == "p").unwrap_or(false))
        .unwrap();
    let background = doc.inline_style(p, "background-color").unwrap();
    assert!(background.starts_with("rgba("), "{}", background);
}

#[test]
fn test_custom_parser_is_used() {
    struct Magenta;

    impl ColorParser for Magenta {
        fn parse_color_to_rgba(&self, _value: &str) -> Option<Rgba> {
            Some(Rgba::opaque(255, 0, 255))
        }
    }

    let mut doc = Document::new();
    let root = doc
        .mount(&ElementSpec::new("div").style("color: lch(50 30 120)"))
        .unwrap();
    ColorNormalizer::new(Magenta).normalize(&mut doc, root);
    assert_eq!(doc.inline_style(root, "color"), Some("rgb(255, 0, 255)"));
}

/// A mounted chain of `depth` divs; every hundredth level restates its color
fn deep_preview(doc: &mut Document, depth: usize) -> NodeId {
    let mut top = doc.create_text("Built X");
    for level in (0..depth).rev() {
        let div = doc.create_element("div");
        if level % 100 == 0 {
            doc.set_style(div, "color", "oklch(0.4 0.1 30)").unwrap();
        }
        doc.append_child(div, top).unwrap();
        top = div;
    }
    let root = doc.create_element("article");
    doc.set_style(root, "color", "oklch(0.25 0.02 260)").unwrap();
    doc.append_child(root, top).unwrap();
    doc.append_child(doc.body(), root).unwrap();
    root
}

#[test]
fn test_deeply_nested_preview_is_normalized_in_a_snapshot() {
    const DEPTH: usize = 10_000;
    let mut doc = Document::new();
    let live = deep_preview(&mut doc, DEPTH);
    let before = doc.len();

    {
        let mut snapshot = SnapshotBuilder::new(PageSize::A4).build(&mut doc, live).unwrap();
        let root = snapshot.root();
        assert_eq!(snapshot.document().descendants(root).len(), DEPTH + 2);

        let report = ColorNormalizer::default().normalize(snapshot.document_mut(), root);
        assert_eq!(report.elements_visited, DEPTH + 1);
        assert_eq!(report.properties_failed, 0);
        assert_eq!(report.properties_rewritten, DEPTH / 100 + 1);

        let doc = snapshot.document();
        let leaf = *doc.descendants(root).last().unwrap();
        let color = doc.computed_style(leaf, "border-bottom-color").unwrap();
        assert!(color.starts_with("rgb("), "{}", color);
    }

    assert_eq!(doc.len(), before);
    assert_eq!(doc.inline_style(live, "color"), Some("oklch(0.25 0.02 260)"));
}

#[test]
fn test_file_names() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let cases = [
        (Some("Alex Lee"), "pdf", "Alex_Lee_2024-01-15.pdf"),
        (Some("Jane O'Brien-Smith!! "), "docx", "Jane_OBrien-Smith_2024-01-15.docx"),
        (Some("   "), "pdf", "Resume_2024-01-15.pdf"),
        (Some("张伟"), "txt", "Resume_2024-01-15.txt"),
        (None, "docx", "Resume_2024-01-15.docx"),
    ];
    for (name, ext, expected) in cases {
        assert_eq!(export_file_name(name, "Resume", date, ext), expected);
    }
}

proptest! {
    #[test]
    fn prop_file_name_shape(name in "\\PC{0,40}") {
        let date = NaiveDate::from_ymd_opt(2031, 12, 3).unwrap();
        let file = export_file_name(Some(&name), "Resume", date, "pdf");
        prop_assert!(file.ends_with("_2031-12-03.pdf"));
        let stem = file.trim_end_matches("_2031-12-03.pdf");
        prop_assert!(!stem.is_empty());
        prop_assert!(stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        if safe_name(&name).is_none() {
            prop_assert_eq!(stem, "Resume");
        }
    }
}
