//! Document tree storage and operations

use crate::style::{initial_value, is_inherited, StyleDeclaration, CURRENT_COLOR_PROPERTIES};
use crate::{DomError, NodeId, Result};
use std::collections::{BTreeMap, HashMap};

/// An element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Inline `style` attribute
    pub style: StyleDeclaration,
    /// Declarations matched from stylesheets (template CSS)
    pub sheet: StyleDeclaration,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            style: StyleDeclaration::new(),
            sheet: StyleDeclaration::new(),
        }
    }

    /// Specified value: inline first, then stylesheet
    pub fn specified(&self, property: &str) -> Option<&str> {
        self.style.get(property).or_else(|| self.sheet.get(property))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// The host document.
///
/// Nodes live in a flat map keyed by `NodeId`. A node is attached when its
/// parent chain reaches the body; detached subtrees stay addressable until
/// removed.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<NodeId, NodeData>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only an empty body
    pub fn new() -> Self {
        let body = NodeId::fresh();
        let mut nodes = HashMap::new();
        nodes.insert(
            body,
            NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Element(Element::new("body")),
            },
        );
        Self { nodes, body }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Total number of nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_node(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert_node(NodeKind::Text(text.to_string()))
    }

    fn insert_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::fresh();
        self.nodes.insert(
            id,
            NodeData {
                parent: None,
                children: Vec::new(),
                kind,
            },
        );
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(&id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(&id).ok_or(DomError::NodeNotFound(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    pub fn element(&self, id: NodeId) -> Result<&Element> {
        match &self.node(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(element) => Ok(element),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Ok(NodeKind::Element(_)))
    }

    /// Text content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Ok(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the node's parent chain reaches the body
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if child == self.body {
            return Err(DomError::InvalidOperation("cannot move the body".to_string()));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::InvalidOperation(format!(
                "cannot append {} inside itself",
                child
            )));
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove the node from its parent. The subtree stays in the document.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        if id == self.body {
            return Err(DomError::InvalidOperation("cannot detach the body".to_string()));
        }
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Detach the node and delete it with all descendants.
    /// Returns the number of nodes deleted.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<usize> {
        self.detach(id)?;
        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(node);
        }
        Ok(doomed.len())
    }

    /// The node and all its descendants in depth-first pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(id) {
            return order;
        }
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        order
    }

    /// Structural deep copy of a subtree. The copy gets fresh ids and is
    /// detached; specified styles and attributes are copied, values the
    /// original inherits from outside the subtree are not.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let kind = self.node(id)?.kind.clone();
        let root = self.insert_node(kind);
        let mut pending: Vec<(NodeId, NodeId)> = self
            .children(id)
            .iter()
            .rev()
            .map(|&child| (child, root))
            .collect();

        while let Some((source, parent_copy)) = pending.pop() {
            let kind = self.node(source)?.kind.clone();
            let copy = self.insert_node(kind);
            self.node_mut(parent_copy)?.children.push(copy);
            self.node_mut(copy)?.parent = Some(parent_copy);
            pending.extend(self.children(source).iter().rev().map(|&child| (child, copy)));
        }
        Ok(root)
    }

    /// Elements under `root` (inclusive) carrying the attribute
    pub fn find_by_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| {
                self.element(*id)
                    .map(|e| e.attributes.contains_key(name))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Set an inline style property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.style.set(property, value);
        Ok(())
    }

    pub fn inline_style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).ok().and_then(|e| e.style.get(property))
    }

    /// Resolve the computed value of a property.
    ///
    /// Order: inline, stylesheet, inherited from the parent (inherited
    /// properties or an explicit `inherit`), then the initial value.
    /// `currentcolor` resolves to the computed `color`. Text nodes resolve
    /// against their parent element.
    ///
    /// Walks up the parent chain without recursing, so nesting depth is
    /// bounded only by the document size.
    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<String> {
        let mut property = property.to_ascii_lowercase();
        let mut current = id;
        loop {
            let element = match self.kind(current).ok()? {
                NodeKind::Element(element) => element,
                NodeKind::Text(_) => {
                    current = self.parent(current)?;
                    continue;
                }
            };

            let specified = element.specified(&property).map(str::trim);
            let inherit_from_parent = match specified {
                Some(value) => value.eq_ignore_ascii_case("inherit"),
                None => is_inherited(&property),
            };

            match specified {
                _ if inherit_from_parent => {
                    if let Some(parent) = self.parent(current) {
                        current = parent;
                        continue;
                    }
                }
                Some(value)
                    if value.eq_ignore_ascii_case("currentcolor") && property != "color" =>
                {
                    property = "color".to_string();
                    continue;
                }
                Some(value) if value.eq_ignore_ascii_case("initial") => {}
                Some(value) => return Some(value.to_string()),
                None => {}
            }

            // Border and outline colors start out as `currentcolor`
            if CURRENT_COLOR_PROPERTIES.contains(&property.as_str()) {
                property = "color".to_string();
                continue;
            }
            return initial_value(&property).map(str::to_string);
        }
    }
}
