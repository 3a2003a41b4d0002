//! Element view over the `markup5ever_rcdom` tree.

use markup5ever_rcdom::{Handle, NodeData};
use std::fmt;

/// An element node. Cheap to clone (reference-counted handle).
#[derive(Clone)]
pub struct Element {
    handle: Handle,
}

impl Element {
    /// Wrap a handle if it refers to an element
    pub fn from_handle(handle: Handle) -> Option<Self> {
        if matches!(handle.data, NodeData::Element { .. }) {
            Some(Element { handle })
        } else {
            None
        }
    }

    /// Lowercase local tag name
    pub fn name(&self) -> &str {
        match &self.handle.data {
            NodeData::Element { name, .. } => &name.local,
            _ => "",
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|a| a.name.local.as_ref() == name)
                .map(|a| a.value.to_string()),
            _ => None,
        }
    }

    /// Whether the attribute is present (possibly empty)
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// All attributes in source order
    pub fn attributes(&self) -> Vec<(String, String)> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Child elements in document order (text and comments skipped)
    pub fn children(&self) -> Vec<Element> {
        self.handle
            .children
            .borrow()
            .iter()
            .filter_map(|child| Element::from_handle(child.clone()))
            .collect()
    }

    /// Concatenated descendant text, trimmed
    pub fn text(&self) -> String {
        let mut text = String::new();
        collect_text(&self.handle, &mut text);
        text.trim().to_string()
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, out),
            _ => {}
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("attributes", &self.attributes())
            .finish()
    }
}
