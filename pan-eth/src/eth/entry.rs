use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Operating mode of an ethernet interface.
///
/// Variants are listed in the order a normalizer checks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Layer3,
    Layer2,
    VirtualWire,
    Tap,
    Ha,
    DecryptMirror,
    AggregateGroup,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Layer3,
        Mode::Layer2,
        Mode::VirtualWire,
        Mode::Tap,
        Mode::Ha,
        Mode::DecryptMirror,
        Mode::AggregateGroup,
    ];

    /// Wire tag of the mode element, which is also the record's tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer3 => "layer3",
            Self::Layer2 => "layer2",
            Self::VirtualWire => "virtual-wire",
            Self::Tap => "tap",
            Self::Ha => "ha",
            Self::DecryptMirror => "decrypt-mirror",
            Self::AggregateGroup => "aggregate-group",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == raw)
            .ok_or_else(|| format!("unknown interface mode {raw:?}"))
    }
}

/// Sub-trees a record carries verbatim instead of modelling them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKey {
    /// Static ARP entries of a layer3 interface.
    Arp,
    /// Layer3 subinterfaces (`units`).
    L3Subinterface,
    /// Layer2 subinterfaces (`units`).
    L2Subinterface,
    /// IPv6 address block.
    Ipv6,
}

impl FragmentKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arp => "arp",
            Self::L3Subinterface => "l3subinterface",
            Self::L2Subinterface => "l2subinterface",
            Self::Ipv6 => "ipv6",
        }
    }
}

/// Version independent view of one ethernet interface.
///
/// `mode` decides which group of fields means anything; fields of the other
/// modes stay at their zero value and are ignored when writing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Entry {
    pub name: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_mode"
    )]
    pub mode: Option<Mode>,
    pub static_ips: Vec<String>,
    pub enable_dhcp: bool,
    pub create_dhcp_default_route: bool,
    pub dhcp_default_route_metric: u32,
    pub ipv6_enabled: bool,
    pub management_profile: String,
    pub mtu: u32,
    pub adjust_tcp_mss: bool,
    pub netflow_profile: String,
    pub lldp_enabled: bool,
    pub lldp_profile: String,
    pub link_speed: String,
    pub link_duplex: String,
    pub link_state: String,
    pub comment: String,
    pub ipv4_mss_adjust: u32,
    pub ipv6_mss_adjust: u32,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) raw: BTreeMap<FragmentKey, String>,
}

/// An empty or unrecognized mode tag means no mode.
fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<Mode>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse() {
        Ok(mode) => Ok(Some(mode)),
        Err(err) => {
            log::warn!("treating interface as having no mode: {err}");
            Ok(None)
        }
    }
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Preserved XML for `key`, if the source data had that sub-tree.
    pub fn fragment(&self, key: FragmentKey) -> Option<&str> {
        self.raw.get(&key).map(String::as_str)
    }

    pub fn fragments(&self) -> &BTreeMap<FragmentKey, String> {
        &self.raw
    }

    pub(crate) fn keep_fragment(&mut self, key: FragmentKey, text: String) {
        self.raw.insert(key, text);
    }
}

/// Something that names an interface to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Name(String),
    Entry(Box<Entry>),
}

impl Identifier {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Entry(entry) => &entry.name,
        }
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Entry> for Identifier {
    fn from(entry: Entry) -> Self {
        Self::Entry(Box::new(entry))
    }
}

impl From<&Entry> for Identifier {
    fn from(entry: &Entry) -> Self {
        Self::Entry(Box::new(entry.clone()))
    }
}

/// Dynamic input: a JSON string is a name, a JSON object is a record.
///
/// Either must carry a non-empty name; an empty selector would address every
/// interface.
impl TryFrom<Value> for Identifier {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let id = match &value {
            Value::String(name) => Self::Name(name.clone()),
            Value::Object(_) => serde_json::from_value::<Entry>(value.clone())
                .map(Self::from)
                .map_err(|_| Error::UnknownIdentifier(value.to_string()))?,
            other => return Err(Error::UnknownIdentifier(other.to_string())),
        };
        if id.name().is_empty() {
            return Err(Error::UnknownIdentifier(value.to_string()));
        }
        Ok(id)
    }
}
