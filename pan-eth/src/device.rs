//! A transport that applies configuration requests to an XML file.
//!
//! The file plays the part of the device: reads return the same
//! `<response><result>` envelope a firewall would, and writes follow the
//! device rules (set merges, edit replaces, delete removes). Every successful
//! write is flushed to disk right away, so a failing follow-up step leaves
//! the first step visible exactly like it would on a real device.

use std::fmt;
use std::path::{Path, PathBuf};

use xml_tree_core::{parse_file, write_file, XmlNode};

use crate::eth::Mode;
use crate::version::Version;
use crate::xapi::{as_member_xpath, vsys_import_xpath, TransportError, XPath, Xapi};

/// One parsed xpath segment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    tag: String,
    filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Any,
    Names(Vec<String>),
    Texts(Vec<String>),
}

impl Step {
    /// Understands `tag`, `tag[@name='a' or @name='b']` and
    /// `tag[text()='a' or text()='b']`.
    fn parse(segment: &str) -> Option<Self> {
        let Some((tag, rest)) = segment.split_once('[') else {
            return (!segment.is_empty()).then(|| Self {
                tag: segment.to_string(),
                filter: Filter::Any,
            });
        };

        let predicate = rest.strip_suffix(']')?;
        let mut names = Vec::new();
        let mut texts = Vec::new();
        for term in predicate.split(" or ") {
            let (key, value) = term.trim().split_once('=')?;
            let value = value.strip_prefix('\'')?.strip_suffix('\'')?.to_string();
            match key {
                "@name" => names.push(value),
                "text()" => texts.push(value),
                _ => return None,
            }
        }

        let filter = match (names.is_empty(), texts.is_empty()) {
            (false, true) => Filter::Names(names),
            (true, false) => Filter::Texts(texts),
            _ => return None,
        };
        Some(Self {
            tag: tag.to_string(),
            filter,
        })
    }

    fn matches(&self, node: &XmlNode) -> bool {
        if node.tag != self.tag {
            return false;
        }
        match &self.filter {
            Filter::Any => true,
            Filter::Names(names) => node.name().is_some_and(|n| names.iter().any(|x| x == n)),
            Filter::Texts(texts) => node
                .text
                .as_deref()
                .is_some_and(|t| texts.iter().any(|x| x == t)),
        }
    }

    /// Node created when a write walks through a missing segment.
    fn create(&self) -> Option<XmlNode> {
        match &self.filter {
            Filter::Any => Some(XmlNode::new(self.tag.as_str())),
            Filter::Names(names) if names.len() == 1 => {
                Some(XmlNode::named(self.tag.as_str(), names[0].as_str()))
            }
            _ => None,
        }
    }
}

/// Configuration file acting as a firewall.
#[derive(Debug, Clone)]
pub struct FileDevice {
    root: XmlNode,
    version: Version,
    path: Option<PathBuf>,
}

impl FileDevice {
    /// Load `path`. Without an explicit `version`, the `version` attribute
    /// of the config root is used, falling back to 0.0.0.
    pub fn open(path: &Path, version: Option<Version>) -> Result<Self, TransportError> {
        let root = parse_file(path)?;
        let mut device = Self::from_node(root, version);
        device.path = Some(path.to_path_buf());
        Ok(device)
    }

    /// A device kept in memory only.
    pub fn from_node(root: XmlNode, version: Option<Version>) -> Self {
        let version = version
            .or_else(|| config_version(&root))
            .unwrap_or_default();
        Self {
            root,
            version,
            path: None,
        }
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    fn flush(&self) -> Result<(), TransportError> {
        if let Some(path) = &self.path {
            write_file(&self.root, path)?;
        }
        Ok(())
    }

    /// Parse `path`; the first step must address the config root.
    fn steps(&self, path: &XPath) -> Result<Vec<Step>, TransportError> {
        let steps = path
            .segments()
            .iter()
            .map(|segment| {
                Step::parse(segment)
                    .ok_or_else(|| invalid(path, format!("unsupported segment {segment:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match steps.first() {
            Some(first) if first.matches(&self.root) => Ok(steps),
            _ => Err(invalid(path, "path does not start at the configuration root")),
        }
    }

    fn lookup(&self, path: &XPath) -> Result<XmlNode, TransportError> {
        let steps = self.steps(path)?;
        let mut current = vec![&self.root];
        for step in &steps[1..] {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| step.matches(c)))
                .collect();
        }
        if current.is_empty() {
            return Err(TransportError::NotFound(path.to_string()));
        }

        let mut result = XmlNode::new("result");
        result
            .attributes
            .insert("total-count".to_string(), current.len().to_string());
        result
            .attributes
            .insert("count".to_string(), current.len().to_string());
        result.children = current.into_iter().cloned().collect();

        let mut response = XmlNode::new("response").child(result);
        response
            .attributes
            .insert("status".to_string(), "success".to_string());
        Ok(response)
    }

    fn require_vsys(&self, vsys: &str) -> Result<(), TransportError> {
        match self.lookup(&vsys_import_xpath(vsys).truncated(3)) {
            Ok(_) => Ok(()),
            Err(TransportError::NotFound(_)) => Err(TransportError::Device(format!(
                "vsys {vsys:?} does not exist"
            ))),
            Err(err) => Err(err),
        }
    }
}

impl Xapi for FileDevice {
    // A file has a single configuration, so candidate and running are the same.
    fn get(&self, path: &XPath) -> Result<XmlNode, TransportError> {
        self.lookup(path)
    }

    fn show(&self, path: &XPath) -> Result<XmlNode, TransportError> {
        self.lookup(path)
    }

    fn set(&mut self, path: &XPath, element: &XmlNode) -> Result<(), TransportError> {
        let steps = self.steps(path)?;
        let parent = ensure(&mut self.root, &steps[1..], path)?;
        merge_child(parent, element);
        self.flush()
    }

    fn edit(&mut self, path: &XPath, element: &XmlNode) -> Result<(), TransportError> {
        let steps = self.steps(path)?;
        let Some((last, parents)) = steps[1..].split_last() else {
            return Err(invalid(path, "cannot replace the configuration root"));
        };
        if !last.matches(element) {
            return Err(TransportError::Device(format!(
                "edit element <{}> does not match {path}",
                element.tag
            )));
        }

        let parent = ensure(&mut self.root, parents, path)?;
        match parent.children.iter().position(|c| last.matches(c)) {
            Some(idx) => parent.children[idx] = element.clone(),
            None => parent.children.push(element.clone()),
        }
        self.flush()
    }

    fn delete(&mut self, path: &XPath) -> Result<(), TransportError> {
        let steps = self.steps(path)?;
        let Some((last, parents)) = steps[1..].split_last() else {
            return Err(invalid(path, "cannot delete the configuration root"));
        };

        let Some(parent) = find_mut(&mut self.root, parents) else {
            return Ok(());
        };
        let before = parent.children.len();
        parent.children.retain(|c| !last.matches(c));
        if parent.children.len() != before {
            self.flush()?;
        }
        Ok(())
    }

    fn import_interfaces(&mut self, vsys: &str, names: &[String]) -> Result<(), TransportError> {
        if vsys.is_empty() || names.is_empty() {
            return Ok(());
        }
        self.require_vsys(vsys)?;

        let mut interface = XmlNode::new("interface");
        for name in names {
            interface
                .children
                .push(XmlNode::with_text("member", name.as_str()));
        }
        self.set(&vsys_import_xpath(vsys).truncated(1), &interface)
    }

    fn unimport_interfaces(&mut self, vsys: &str, names: &[String]) -> Result<(), TransportError> {
        if vsys.is_empty() || names.is_empty() {
            return Ok(());
        }
        self.require_vsys(vsys)?;
        self.delete(&vsys_import_xpath(vsys).join(as_member_xpath(names)))
    }

    fn versioning(&self) -> Version {
        self.version.clone()
    }

    fn log_query(&self, msg: fmt::Arguments<'_>) {
        log::debug!("{msg}");
    }

    fn log_action(&self, msg: fmt::Arguments<'_>) {
        log::info!("{msg}");
    }
}

fn config_version(root: &XmlNode) -> Option<Version> {
    let raw = root.attr("version")?;
    match raw.parse() {
        Ok(version) => Some(version),
        Err(err) => {
            log::warn!("ignoring configuration version: {err}");
            None
        }
    }
}

fn invalid(path: &XPath, reason: impl Into<String>) -> TransportError {
    TransportError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Walk `steps` below `node`, creating missing nodes on the way.
fn ensure<'a>(
    node: &'a mut XmlNode,
    steps: &[Step],
    path: &XPath,
) -> Result<&'a mut XmlNode, TransportError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(node);
    };
    let Some(created) = step.create() else {
        return Err(invalid(
            path,
            format!("segment <{}> must address a single node", step.tag),
        ));
    };

    let idx = match node.children.iter().position(|c| step.matches(c)) {
        Some(idx) => idx,
        None => {
            node.children.push(created);
            node.children.len() - 1
        }
    };
    ensure(&mut node.children[idx], rest, path)
}

fn find_mut<'a>(node: &'a mut XmlNode, steps: &[Step]) -> Option<&'a mut XmlNode> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(node);
    };
    let child = node.children.iter_mut().find(|c| step.matches(c))?;
    find_mut(child, rest)
}

/// Merge `incoming` into `parent` as one of its children.
///
/// Entries merge by tag and name, `member` leaves are a set of texts, and
/// anything else merges by tag. An interface mode element replaces any other
/// mode element of the same entry.
fn merge_child(parent: &mut XmlNode, incoming: &XmlNode) {
    if incoming.tag == "member" {
        let present = parent
            .children
            .iter()
            .any(|c| c.tag == "member" && c.text == incoming.text);
        if !present {
            parent.children.push(incoming.clone());
        }
        return;
    }

    match parent
        .children
        .iter_mut()
        .find(|c| c.tag == incoming.tag && c.name() == incoming.name())
    {
        Some(existing) => {
            for (key, value) in &incoming.attributes {
                existing.attributes.insert(key.clone(), value.clone());
            }
            if incoming.text.is_some() {
                existing.text = incoming.text.clone();
            }
            if incoming.tag == "entry" {
                if let Some(mode) = incoming.children.iter().find(|c| is_mode(c)) {
                    existing
                        .children
                        .retain(|c| !is_mode(c) || c.tag == mode.tag);
                }
            }
            for child in &incoming.children {
                merge_child(existing, child);
            }
        }
        None => parent.children.push(incoming.clone()),
    }
}

fn is_mode(node: &XmlNode) -> bool {
    Mode::ALL.iter().any(|mode| mode.as_str() == node.tag)
}
