//! Serializable preview markup
//!
//! Previews are described as nested element specs so they can be loaded from
//! JSON fixtures or assembled in code.

use crate::style::StyleDeclaration;
use crate::{Document, NodeId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in serialized preview markup: either plain text or an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Element(ElementSpec),
}

/// An element in serialized preview markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Inline style text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    /// Stylesheet declarations matched to this element
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sheet: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            style: String::new(),
            sheet: String::new(),
            children: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn style(mut self, css_text: &str) -> Self {
        self.style = css_text.to_string();
        self
    }

    pub fn sheet(mut self, css_text: &str) -> Self {
        self.sheet = css_text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(NodeSpec::Element(child));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(NodeSpec::Text(text.to_string()));
        self
    }
}

impl Document {
    /// Build a detached subtree from markup
    pub fn build(&mut self, spec: &ElementSpec) -> Result<NodeId> {
        let root = self.build_element(spec)?;
        let mut pending: Vec<(NodeId, &ElementSpec)> = vec![(root, spec)];

        while let Some((id, spec)) = pending.pop() {
            for child in &spec.children {
                let child_id = match child {
                    NodeSpec::Text(text) => self.create_text(text),
                    NodeSpec::Element(element) => {
                        let child_id = self.build_element(element)?;
                        pending.push((child_id, element));
                        child_id
                    }
                };
                self.append_child(id, child_id)?;
            }
        }
        Ok(root)
    }

    fn build_element(&mut self, spec: &ElementSpec) -> Result<NodeId> {
        let id = self.create_element(&spec.tag);
        let element = self.element_mut(id)?;
        element.attributes = spec.attributes.clone();
        element.style = StyleDeclaration::parse(&spec.style);
        element.sheet = StyleDeclaration::parse(&spec.sheet);
        Ok(id)
    }

    /// Build markup and append it to the body
    pub fn mount(&mut self, spec: &ElementSpec) -> Result<NodeId> {
        let id = self.build(spec)?;
        self.append_child(self.body(), id)?;
        Ok(id)
    }
}
