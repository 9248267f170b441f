//! Contract with the component that actually talks to a firewall.
//!
//! Everything here is request plumbing: paths, verbs and the error type a
//! transport reports. The ethernet layer only builds paths and payloads and
//! hands them to an [`Xapi`] implementation.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;
use xml_tree_core::{ParseError, WriteError, XmlNode};

use crate::version::Version;

/// Device entry every configuration path starts from.
pub const DEVICE: &str = "localhost.localdomain";

/// Errors reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Nothing exists at the requested path.
    #[error("object not found: {0}")]
    NotFound(String),
    /// The device refused the request.
    #[error("device rejected request: {0}")]
    Device(String),
    /// A path segment could not be understood or cannot be created.
    #[error("invalid xpath {path}: {reason}")]
    InvalidPath { path: String, reason: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An ordered list of xpath segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPath(Vec<String>);

impl XPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Drop the `count` trailing segments.
    pub fn truncated(&self, count: usize) -> XPath {
        let keep = self.0.len().saturating_sub(count);
        XPath(self.0[..keep].to_vec())
    }

    /// Append one segment.
    pub fn join(&self, segment: impl Into<String>) -> XPath {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        XPath(segments)
    }
}

impl Display for XPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Build an `entry` selector: all entries for no names, otherwise a
/// `@name` predicate joined with `or`.
pub fn as_entry_xpath<S: AsRef<str>>(names: &[S]) -> String {
    selector("entry", "@name", names)
}

/// Build a `member` selector matching members by text.
pub fn as_member_xpath<S: AsRef<str>>(names: &[S]) -> String {
    selector("member", "text()", names)
}

fn selector<S: AsRef<str>>(tag: &str, key: &str, names: &[S]) -> String {
    if names.is_empty() || (names.len() == 1 && names[0].as_ref().is_empty()) {
        return tag.to_string();
    }
    let terms: Vec<String> = names
        .iter()
        .map(|name| format!("{key}='{}'", name.as_ref()))
        .collect();
    format!("{tag}[{}]", terms.join(" or "))
}

/// Path of the interface import list of `vsys`.
pub fn vsys_import_xpath(vsys: &str) -> XPath {
    XPath::new([
        "config".to_string(),
        "devices".to_string(),
        as_entry_xpath(&[DEVICE]),
        "vsys".to_string(),
        as_entry_xpath(&[vsys]),
        "import".to_string(),
        "network".to_string(),
        "interface".to_string(),
    ])
}

/// Read flavour: `Get` reads the candidate config, `Show` the running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadVerb {
    Get,
    Show,
}

impl ReadVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Show => "show",
        }
    }
}

/// Requests a firewall configuration API understands.
///
/// Reads return the whole `<response>` document; the object itself sits
/// under `response/result`.
pub trait Xapi {
    fn get(&self, path: &XPath) -> Result<XmlNode, TransportError>;
    fn show(&self, path: &XPath) -> Result<XmlNode, TransportError>;

    /// Merge `element` under the node at `path`.
    fn set(&mut self, path: &XPath, element: &XmlNode) -> Result<(), TransportError>;
    /// Replace the node at `path` with `element`.
    fn edit(&mut self, path: &XPath, element: &XmlNode) -> Result<(), TransportError>;
    fn delete(&mut self, path: &XPath) -> Result<(), TransportError>;

    /// Make `names` usable from `vsys`. An empty vsys is a no-op.
    fn import_interfaces(&mut self, vsys: &str, names: &[String]) -> Result<(), TransportError>;
    /// Remove `names` from `vsys`. An empty vsys is a no-op.
    fn unimport_interfaces(&mut self, vsys: &str, names: &[String])
        -> Result<(), TransportError>;

    /// Software version the device reports.
    fn versioning(&self) -> Version;

    fn log_query(&self, msg: fmt::Arguments<'_>);
    fn log_action(&self, msg: fmt::Arguments<'_>);

    fn read(&self, verb: ReadVerb, path: &XPath) -> Result<XmlNode, TransportError> {
        match verb {
            ReadVerb::Get => self.get(path),
            ReadVerb::Show => self.show(path),
        }
    }

    /// Names of the entries inside the container at `path`.
    ///
    /// A missing container is an empty list, not an error.
    fn entry_list_using(&self, verb: ReadVerb, path: &XPath) -> Result<Vec<String>, TransportError> {
        match self.read(verb, path) {
            Ok(response) => Ok(entry_names(&response)),
            Err(TransportError::NotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}

/// Collect `response/result/*/entry/@name` in document order.
pub fn entry_names(response: &XmlNode) -> Vec<String> {
    response
        .get_child("result")
        .and_then(|result| result.children.first())
        .map(|container| {
            container
                .get_children("entry")
                .into_iter()
                .filter_map(XmlNode::name)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
