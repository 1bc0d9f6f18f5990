//! Textual element tree.

use std::fmt;

use indexmap::IndexMap;

/// Namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    #[must_use]
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        }
    }

    /// A name without namespace.
    #[must_use]
    pub fn local(local: &str) -> Self {
        Self::new(None, local)
    }
}

/// Clark notation: `{namespace}local`, or just `local`.
impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// A child of a node: an element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    Element(Node),
    Text(String),
}

/// An element with ordered attributes and mixed content.
///
/// Attribute names are stored as written, with `xml:` and `xsi:`
/// prefixes kept for the two reserved namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: QualifiedName,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<NodeContent>,
}

impl Node {
    #[must_use]
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Local name of the element.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.name.local
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute; a new name goes after the existing ones.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn push_element(&mut self, child: Node) {
        self.children.push(NodeContent::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(NodeContent::Text(text.into()));
    }

    /// Iterate over element children (excludes text runs).
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|c| match c {
            NodeContent::Element(node) => Some(node),
            NodeContent::Text(_) => None,
        })
    }

    /// Find the first child element with the given local name.
    #[must_use]
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.element_children().find(|child| child.tag() == tag)
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                NodeContent::Text(text) => Some(text.as_str()),
                NodeContent::Element(_) => None,
            })
            .collect()
    }

    /// True when some direct text run contains non-whitespace characters.
    #[must_use]
    pub fn has_significant_text(&self) -> bool {
        self.children
            .iter()
            .any(|c| matches!(c, NodeContent::Text(text) if !text.trim().is_empty()))
    }
}
