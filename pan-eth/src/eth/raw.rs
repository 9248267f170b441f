//! Opaque sub-trees carried through a record without being modelled.
//!
//! A fragment is the inner XML of its wrapper element. Capturing drops the
//! wrapper and the device's change-tracking attributes; replaying wraps the
//! text in the wrapper tag again.

use xml_tree_core::{parse_fragment, render_inner, ParseError, WriteError, XmlNode};

/// Attributes the device stamps on configuration nodes for change tracking.
const BOOKKEEPING_ATTRIBUTES: [&str; 3] = ["admin", "dirtyId", "time"];

/// Inner XML of an element the record does not model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXml {
    pub text: String,
}

impl RawXml {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Capture the cleaned inner XML of `node`.
    pub fn capture(node: &XmlNode) -> Result<Self, WriteError> {
        let mut cleaned = node.clone();
        strip_bookkeeping(&mut cleaned);
        Ok(Self {
            text: render_inner(&cleaned)?,
        })
    }

    /// Rebuild the wrapper element around the preserved text.
    pub fn replay(&self, tag: &str) -> Result<XmlNode, ParseError> {
        parse_fragment(tag, &self.text)
    }
}

fn strip_bookkeeping(node: &mut XmlNode) {
    for attr in BOOKKEEPING_ATTRIBUTES {
        node.attributes.remove(attr);
    }
    for child in &mut node.children {
        strip_bookkeeping(child);
    }
}
