use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use crate::writer::render;

/// A generic XML tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements.
    pub children: Vec<XmlNode>,
    /// Optional text content.
    pub text: Option<String>,
}

impl XmlNode {
    /// Create a new XML node with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create a leaf node carrying `text`.
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create an `<entry name="...">` style node.
    pub fn named(tag: impl Into<String>, name: impl Into<String>) -> Self {
        let mut node = Self::new(tag);
        node.attributes.insert("name".to_string(), name.into());
        node
    }

    /// The `name` attribute, if any.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// True when the node has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }

    /// Return the first child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Return all children with the provided tag.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }

    /// Walk a nested child path and return terminal node text if found.
    pub fn get_text<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        let mut current = self;
        for segment in path {
            current = current.get_child(segment)?;
        }
        current.text.as_deref()
    }

    /// Append a child and return `self` for chained construction.
    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append a text leaf unless `value` is empty.
    pub fn push_text_opt(&mut self, tag: &str, value: &str) {
        if !value.is_empty() {
            self.children.push(XmlNode::with_text(tag, value));
        }
    }

    /// Append a text leaf, writing an empty element for an empty value.
    pub fn push_text(&mut self, tag: &str, value: &str) {
        if value.is_empty() {
            self.children.push(XmlNode::new(tag));
        } else {
            self.children.push(XmlNode::with_text(tag, value));
        }
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rendered = render(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::XmlNode;

    #[test]
    fn get_text_walks_nested_path() {
        let root = XmlNode::new("root")
            .child(XmlNode::new("parent").child(XmlNode::with_text("child", "value")));

        assert_eq!(root.get_text(&["parent", "child"]), Some("value"));
        assert_eq!(root.get_text(&["parent", "missing"]), None);
    }

    #[test]
    fn display_renders_compact_escaped_xml() {
        let node = XmlNode::named("entry", "a&b").child(XmlNode::with_text("comment", "x<y"));
        assert_eq!(
            node.to_string(),
            r#"<entry name="a&amp;b"><comment>x&lt;y</comment></entry>"#
        );
    }

    #[test]
    fn push_text_opt_skips_empty_values() {
        let mut node = XmlNode::new("layer3");
        node.push_text_opt("mtu", "");
        node.push_text("comment", "");
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].is_empty());
    }
}
