//! Integration tests for clone/attach/remove bookkeeping

use preview_dom::{Document, ElementSpec, NodeId};
use proptest::prelude::*;

const DEEP: usize = 10_000;

/// A single chain of `depth` divs under a mounted root; returns (root, leaf text)
fn deep_chain(doc: &mut Document, depth: usize) -> (NodeId, NodeId) {
    let leaf = doc.create_text("leaf");
    let mut top = leaf;
    for _ in 0..depth {
        let div = doc.create_element("div");
        doc.append_child(div, top).unwrap();
        top = div;
    }
    let root = doc.create_element("section");
    doc.set_style(root, "color", "rgb(1, 2, 3)").unwrap();
    doc.append_child(root, top).unwrap();
    doc.append_child(doc.body(), root).unwrap();
    (root, leaf)
}

fn nested(depth: usize, breadth: usize) -> ElementSpec {
    let mut spec = ElementSpec::new("div").style("padding: 2px");
    if depth > 0 {
        for _ in 0..breadth {
            spec = spec.child(nested(depth - 1, breadth));
        }
    } else {
        spec = spec.text("leaf");
    }
    spec
}

#[test]
fn test_clone_attach_remove_restores_document() {
    let mut doc = Document::new();
    let preview = doc.mount(&nested(3, 2)).unwrap();
    let before = doc.len();
    let body_children = doc.children(doc.body()).to_vec();

    let copy = doc.deep_clone(preview).unwrap();
    doc.append_child(doc.body(), copy).unwrap();
    assert!(doc.is_attached(copy));
    assert_eq!(doc.len(), before * 2 - 1);

    doc.remove_subtree(copy).unwrap();
    assert_eq!(doc.len(), before);
    assert_eq!(doc.children(doc.body()), body_children.as_slice());
}

#[test]
fn test_moving_node_between_parents() {
    let mut doc = Document::new();
    let a = doc.mount(&ElementSpec::new("section")).unwrap();
    let b = doc.mount(&ElementSpec::new("section")).unwrap();
    let item = doc.create_element("p");

    doc.append_child(a, item).unwrap();
    doc.append_child(b, item).unwrap();

    assert!(doc.children(a).is_empty());
    assert_eq!(doc.children(b), &[item]);
    assert_eq!(doc.parent(item), Some(b));
}

#[test]
fn test_deep_nesting_resolves_inherited_values() {
    let mut doc = Document::new();
    let (_, leaf) = deep_chain(&mut doc, DEEP);

    assert_eq!(doc.computed_style(leaf, "color").as_deref(), Some("rgb(1, 2, 3)"));
    assert_eq!(
        doc.computed_style(leaf, "border-left-color").as_deref(),
        Some("rgb(1, 2, 3)")
    );
    assert_eq!(doc.computed_style(leaf, "background-color").as_deref(), Some("transparent"));
    assert!(doc.is_attached(leaf));
}

#[test]
fn test_deep_nesting_clone_and_remove() {
    let mut doc = Document::new();
    let (root, _) = deep_chain(&mut doc, DEEP);
    let before = doc.len();

    let copy = doc.deep_clone(root).unwrap();
    assert_eq!(doc.descendants(copy).len(), DEEP + 2);
    assert_eq!(doc.len(), before + DEEP + 2);

    let mut depth = 0;
    let mut node = copy;
    while let Some(&child) = doc.children(node).first() {
        assert_eq!(doc.parent(child), Some(node));
        node = child;
        depth += 1;
    }
    assert_eq!(depth, DEEP + 1);
    assert_eq!(doc.text(node), Some("leaf"));

    assert_eq!(doc.remove_subtree(copy).unwrap(), DEEP + 2);
    assert_eq!(doc.len(), before);
}

#[test]
fn test_deep_markup_builds() {
    let mut spec = ElementSpec::new("p").text("leaf");
    for _ in 0..1_000 {
        spec = ElementSpec::new("div").child(spec);
    }
    let mut doc = Document::new();
    let root = doc.mount(&spec).unwrap();

    let order = doc.descendants(root);
    assert_eq!(order.len(), 1_002);
    assert_eq!(doc.element(order[1_000]).unwrap().tag, "p");
    assert_eq!(doc.text(order[1_001]), Some("leaf"));
}

proptest! {
    #[test]
    fn prop_deep_clone_preserves_shape(depth in 0usize..4, breadth in 1usize..4) {
        let mut doc = Document::new();
        let root = doc.build(&nested(depth, breadth)).unwrap();
        let copy = doc.deep_clone(root).unwrap();

        let original = doc.descendants(root);
        let cloned = doc.descendants(copy);
        prop_assert_eq!(original.len(), cloned.len());
        for (a, b) in original.iter().zip(cloned.iter()) {
            prop_assert_ne!(a, b);
            prop_assert_eq!(doc.kind(*a).unwrap(), doc.kind(*b).unwrap());
        }
    }
}
