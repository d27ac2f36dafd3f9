//! Offscreen snapshot
//!
//! A snapshot is a deep clone of the live preview pinned to print-page
//! dimensions and parked outside the viewport. [`Snapshot`] owns the clone
//! for the duration of one export: dropping it removes the clone from the
//! document whether the export succeeded or not.

use crate::config::PageSize;
use preview_dom::{Document, DomError, NodeId};
use thiserror::Error;

/// Attribute marking a snapshot root in the host document
pub const SNAPSHOT_ATTRIBUTE: &str = "data-export-snapshot";

/// Computed values copied from the live element onto the clone
pub const COPIED_PROPERTIES: &[&str] = &["font-family", "color", "background-color"];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Preview element is not mounted")]
    PreviewDetached,

    #[error("Snapshot is not attached to the document")]
    NotAttached,

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Builds snapshots for a fixed page size
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    page: PageSize,
}

impl SnapshotBuilder {
    pub fn new(page: PageSize) -> Self {
        Self { page }
    }

    /// Style overrides applied to the clone root
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_string()),
            ("left", "-10000px".to_string()),
            ("top", "0px".to_string()),
            ("width", self.page.width_css()),
            ("min-height", self.page.height_css()),
            ("height", "auto".to_string()),
            ("max-width", "none".to_string()),
            ("transform", "none".to_string()),
            ("margin", "0".to_string()),
            ("overflow", "visible".to_string()),
        ]
    }

    /// Clone `preview` into a detached, styled snapshot.
    ///
    /// The live preview is only read. The returned guard is not attached yet;
    /// call [`Snapshot::attach`] once the clone is ready for layout.
    pub fn build<'doc>(
        &self,
        document: &'doc mut Document,
        preview: NodeId,
    ) -> Result<Snapshot<'doc>> {
        document.element(preview)?;
        if !document.is_attached(preview) {
            return Err(SnapshotError::PreviewDetached);
        }

        let inherited: Vec<(&str, String)> = COPIED_PROPERTIES
            .iter()
            .filter_map(|&property| {
                document
                    .computed_style(preview, property)
                    .map(|value| (property, value))
            })
            .collect();

        let root = document.deep_clone(preview)?;
        let snapshot = Snapshot {
            document,
            root,
            attached: false,
        };

        let document = &mut *snapshot.document;
        document.set_attribute(root, SNAPSHOT_ATTRIBUTE, "true")?;
        for (property, value) in &inherited {
            document.set_style(root, property, value)?;
        }
        for (property, value) in self.overrides() {
            document.set_style(root, property, &value)?;
        }

        tracing::debug!(%root, nodes = document.descendants(root).len(), "Snapshot built");
        Ok(snapshot)
    }
}

/// Scoped ownership of one snapshot clone
#[derive(Debug)]
pub struct Snapshot<'doc> {
    document: &'doc mut Document,
    root: NodeId,
    attached: bool,
}

impl<'doc> Snapshot<'doc> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }

    /// Append the clone to the body so it takes part in layout
    pub fn attach(&mut self) -> Result<()> {
        if !self.attached {
            let body = self.document.body();
            self.document.append_child(body, self.root)?;
            self.attached = true;
        }
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attached && self.document.is_attached(self.root)
    }

    /// Fail unless the clone is attached
    pub fn ensure_attached(&self) -> Result<()> {
        if self.is_attached() {
            Ok(())
        } else {
            Err(SnapshotError::NotAttached)
        }
    }
}

impl Drop for Snapshot<'_> {
    fn drop(&mut self) {
        match self.document.remove_subtree(self.root) {
            Ok(removed) => tracing::debug!(root = %self.root, removed, "Snapshot removed"),
            Err(e) => tracing::error!(root = %self.root, error = %e, "Failed to remove snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preview_dom::ElementSpec;

    fn preview(doc: &mut Document) -> NodeId {
        let wrapper = doc
            .mount(&ElementSpec::new("main").style("color: navy; font-family: Georgia"))
            .unwrap();
        let spec = ElementSpec::new("div")
            .attr("id", "resume-preview")
            .style("transform: scale(0.6); width: 480px; margin: 24px")
            .child(ElementSpec::new("h1").text("Alex Lee"));
        let node = doc.build(&spec).unwrap();
        doc.append_child(wrapper, node).unwrap();
        node
    }

    #[test]
    fn test_build_applies_overrides_and_copies_computed_values() {
        let mut doc = Document::new();
        let live = preview(&mut doc);

        let snapshot = SnapshotBuilder::new(PageSize::A4).build(&mut doc, live).unwrap();
        let root = snapshot.root();
        let doc = snapshot.document();

        assert_ne!(root, live);
        assert!(!doc.is_attached(root));
        assert_eq!(doc.inline_style(root, "width"), Some("210mm"));
        assert_eq!(doc.inline_style(root, "min-height"), Some("297mm"));
        assert_eq!(doc.inline_style(root, "transform"), Some("none"));
        assert_eq!(doc.inline_style(root, "margin"), Some("0"));
        assert_eq!(doc.inline_style(root, "overflow"), Some("visible"));
        assert_eq!(doc.inline_style(root, "color"), Some("navy"));
        assert_eq!(doc.inline_style(root, "font-family"), Some("Georgia"));
        assert_eq!(doc.inline_style(root, "background-color"), Some("transparent"));
        assert_eq!(
            doc.element(root).unwrap().attributes.get(SNAPSHOT_ATTRIBUTE).map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_live_preview_untouched() {
        let mut doc = Document::new();
        let live = preview(&mut doc);
        {
            let mut snapshot = SnapshotBuilder::default().build(&mut doc, live).unwrap();
            snapshot.attach().unwrap();
        }
        assert_eq!(doc.inline_style(live, "transform"), Some("scale(0.6)"));
        assert_eq!(doc.inline_style(live, "width"), Some("480px"));
    }

    #[test]
    fn test_drop_removes_attached_clone() {
        let mut doc = Document::new();
        let live = preview(&mut doc);
        let before = doc.len();

        {
            let mut snapshot = SnapshotBuilder::default().build(&mut doc, live).unwrap();
            snapshot.attach().unwrap();
            assert!(snapshot.is_attached());
            let body = snapshot.document().body();
            assert!(snapshot.document().children(body).contains(&snapshot.root()));
        }

        assert_eq!(doc.len(), before);
        assert!(doc.find_by_attribute(doc.body(), SNAPSHOT_ATTRIBUTE).is_empty());
    }

    #[test]
    fn test_drop_removes_detached_clone() {
        let mut doc = Document::new();
        let live = preview(&mut doc);
        let before = doc.len();
        drop(SnapshotBuilder::default().build(&mut doc, live).unwrap());
        assert_eq!(doc.len(), before);
    }

    #[test]
    fn test_detached_preview_rejected() {
        let mut doc = Document::new();
        let orphan = doc.build(&ElementSpec::new("div")).unwrap();
        let err = SnapshotBuilder::default().build(&mut doc, orphan).unwrap_err();
        assert!(matches!(err, SnapshotError::PreviewDetached));
    }

    #[test]
    fn test_text_node_rejected() {
        let mut doc = Document::new();
        let text = doc.create_text("hello");
        let err = SnapshotBuilder::default().build(&mut doc, text).unwrap_err();
        assert!(matches!(err, SnapshotError::Dom(DomError::NotAnElement(_))));
    }

    #[test]
    fn test_ensure_attached() {
        let mut doc = Document::new();
        let live = preview(&mut doc);
        let mut snapshot = SnapshotBuilder::default().build(&mut doc, live).unwrap();
        assert!(matches!(snapshot.ensure_attached(), Err(SnapshotError::NotAttached)));
        snapshot.attach().unwrap();
        assert!(snapshot.ensure_attached().is_ok());
    }
}
