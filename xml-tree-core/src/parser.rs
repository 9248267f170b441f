use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlNode`] tree.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(start_node(&e, &reader)?),
            Event::Empty(e) => {
                let node = start_node(&e, &reader)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?;
                append_text(&mut stack, text);
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Parse the inner XML of an element by re-wrapping it in `tag`.
///
/// This is the inverse of [`crate::render_inner`]: rendering the inner XML of
/// the returned node yields `inner` again for text produced by that function.
pub fn parse_fragment(tag: &str, inner: &str) -> Result<XmlNode, ParseError> {
    let wrapped = format!("<{tag}>{inner}</{tag}>");
    parse(wrapped.as_bytes())
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    *root = Some(node);
    Ok(())
}

// Whitespace-only runs are layout, not content.
fn append_text(stack: &mut [XmlNode], text: &str) {
    let Some(current) = stack.last_mut() else {
        return;
    };
    if text.trim().is_empty() {
        return;
    }
    match &mut current.text {
        Some(existing) => existing.push_str(text),
        None => current.text = Some(text.to_string()),
    }
}

fn start_node(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::new(qname_to_string(e.name())?);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse, parse_fragment};

    #[test]
    fn fragment_returns_sibling_elements_in_order() {
        let node = parse_fragment("units", r#"<entry name="a"/><entry name="b"><tag>x</tag></entry>"#)
            .expect("fragment");
        assert_eq!(node.tag, "units");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].name(), Some("a"));
        assert_eq!(node.children[1].get_text(&["tag"]), Some("x"));
    }

    #[test]
    fn empty_fragment_is_an_empty_element() {
        assert!(parse_fragment("arp", "").expect("fragment").is_empty());
    }

    #[test]
    fn fragment_keeps_loose_text() {
        let node = parse_fragment("address", "fd00::1/64").expect("fragment");
        assert_eq!(node.text.as_deref(), Some("fd00::1/64"));
    }

    #[test]
    fn unbalanced_fragment_is_rejected() {
        assert!(parse_fragment("arp", "<entry>").is_err());
    }

    #[test]
    fn rejects_multiple_roots() {
        assert!(parse(b"<a/><b/>").is_err());
    }
}
