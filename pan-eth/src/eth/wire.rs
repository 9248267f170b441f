//! XML shapes of an ethernet interface entry, per schema revision.
//!
//! Both revisions share everything except how TCP MSS adjustment is written,
//! so the wire types are generic over a [`TcpMss`] encoding:
//!
//! - before 7.1: `<adjust-tcp-mss>yes</adjust-tcp-mss>`
//! - 7.1 and later: `<adjust-tcp-mss><enable>yes</enable><ipv4-mss-adjustment>..`

use std::fmt::Debug;

use thiserror::Error;
use xml_tree_core::{ParseError, WriteError, XmlNode};

use super::entry::Mode;
use super::raw::RawXml;

/// Errors converting between XML and wire objects.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid {field} value {value:?}: expected an unsigned integer")]
    InvalidNumber { field: &'static str, value: String },
    #[error("failed to capture <{tag}> block: {source}")]
    Capture {
        tag: &'static str,
        #[source]
        source: WriteError,
    },
    #[error("preserved <{tag}> block is not valid XML: {source}")]
    Replay {
        tag: &'static str,
        #[source]
        source: ParseError,
    },
}

/// Encoding of the TCP MSS adjustment settings inside `<layer3>`.
pub trait TcpMss: Debug + Clone + Default + PartialEq + Eq {
    fn decode(layer3: &XmlNode) -> Result<Self, WireError>;
    fn encode(&self, layer3: &mut XmlNode);
    /// Build from the yes/no enable flag and the per-family adjustments.
    fn from_parts(enable: String, ipv4: u32, ipv6: u32) -> Self;
    fn enable(&self) -> &str;
    /// `(ipv4, ipv6)` adjustments; zero where the revision has none.
    fn adjustments(&self) -> (u32, u32);
}

/// Pre-7.1 encoding: a bare yes/no flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TcpMssV1 {
    pub enable: String,
}

impl TcpMss for TcpMssV1 {
    fn decode(layer3: &XmlNode) -> Result<Self, WireError> {
        Ok(Self {
            enable: text(layer3, &["adjust-tcp-mss"]),
        })
    }

    fn encode(&self, layer3: &mut XmlNode) {
        layer3.push_text("adjust-tcp-mss", &self.enable);
    }

    fn from_parts(enable: String, _ipv4: u32, _ipv6: u32) -> Self {
        Self { enable }
    }

    fn enable(&self) -> &str {
        &self.enable
    }

    fn adjustments(&self) -> (u32, u32) {
        (0, 0)
    }
}

/// 7.1+ encoding: enable flag plus per-family adjustment values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TcpMssV2 {
    pub enable: String,
    pub ipv4_mss_adjustment: u32,
    pub ipv6_mss_adjustment: u32,
}

impl TcpMss for TcpMssV2 {
    fn decode(layer3: &XmlNode) -> Result<Self, WireError> {
        Ok(Self {
            enable: text(layer3, &["adjust-tcp-mss", "enable"]),
            ipv4_mss_adjustment: number(
                layer3,
                &["adjust-tcp-mss", "ipv4-mss-adjustment"],
                "ipv4-mss-adjustment",
            )?,
            ipv6_mss_adjustment: number(
                layer3,
                &["adjust-tcp-mss", "ipv6-mss-adjustment"],
                "ipv6-mss-adjustment",
            )?,
        })
    }

    fn encode(&self, layer3: &mut XmlNode) {
        let mut mss = XmlNode::new("adjust-tcp-mss");
        mss.push_text("enable", &self.enable);
        push_number_opt(&mut mss, "ipv4-mss-adjustment", self.ipv4_mss_adjustment);
        push_number_opt(&mut mss, "ipv6-mss-adjustment", self.ipv6_mss_adjustment);
        layer3.children.push(mss);
    }

    fn from_parts(enable: String, ipv4: u32, ipv6: u32) -> Self {
        Self {
            enable,
            ipv4_mss_adjustment: ipv4,
            ipv6_mss_adjustment: ipv6,
        }
    }

    fn enable(&self) -> &str {
        &self.enable
    }

    fn adjustments(&self) -> (u32, u32) {
        (self.ipv4_mss_adjustment, self.ipv6_mss_adjustment)
    }
}

/// One `<entry>` under the ethernet container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireEntry<M> {
    pub name: String,
    pub mode: Option<WireMode<M>>,
    pub link_speed: String,
    pub link_duplex: String,
    pub link_state: String,
    pub comment: String,
}

pub type EntryV1 = WireEntry<TcpMssV1>;
pub type EntryV2 = WireEntry<TcpMssV2>;

/// The mode element of an entry; the device allows only one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireMode<M> {
    Layer3(Layer3<M>),
    Layer2(OtherMode),
    VirtualWire(OtherMode),
    Tap,
    Ha,
    DecryptMirror,
    AggregateGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer3<M> {
    pub ipv6: Ipv6,
    pub management_profile: String,
    pub mtu: u32,
    pub netflow_profile: String,
    pub adjust_tcp_mss: M,
    pub static_ips: Vec<String>,
    pub dhcp: Option<DhcpSettings>,
    pub arp: Option<RawXml>,
    pub units: Option<RawXml>,
}

pub type Layer3V1 = Layer3<TcpMssV1>;
pub type Layer3V2 = Layer3<TcpMssV2>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ipv6 {
    pub enabled: String,
    pub address: Option<RawXml>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpSettings {
    pub enable: String,
    pub create_default_route: String,
    pub metric: u32,
}

/// Body of `layer2` and `virtual-wire`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtherMode {
    pub lldp_enabled: String,
    pub lldp_profile: String,
    pub netflow_profile: String,
    pub units: Option<RawXml>,
}

impl<M: TcpMss> WireEntry<M> {
    /// Decode an `<entry>` element.
    pub fn decode(node: &XmlNode) -> Result<Self, WireError> {
        Ok(Self {
            name: node.name().unwrap_or_default().to_string(),
            mode: WireMode::decode(node)?,
            link_speed: text(node, &["link-speed"]),
            link_duplex: text(node, &["link-duplex"]),
            link_state: text(node, &["link-state"]),
            comment: text(node, &["comment"]),
        })
    }

    pub fn encode(&self) -> Result<XmlNode, WireError> {
        let mut node = XmlNode::named("entry", self.name.as_str());
        if let Some(mode) = &self.mode {
            node.children.push(mode.encode()?);
        }
        node.push_text_opt("link-speed", &self.link_speed);
        node.push_text_opt("link-duplex", &self.link_duplex);
        node.push_text_opt("link-state", &self.link_state);
        node.push_text("comment", &self.comment);
        Ok(node)
    }
}

impl<M: TcpMss> WireMode<M> {
    /// Pick the first mode element present, checking in [`Mode::ALL`] order.
    pub fn decode(entry: &XmlNode) -> Result<Option<Self>, WireError> {
        for mode in Mode::ALL {
            let Some(node) = entry.get_child(mode.as_str()) else {
                continue;
            };
            let decoded = match mode {
                Mode::Layer3 => Self::Layer3(Layer3::decode(node)?),
                Mode::Layer2 => Self::Layer2(OtherMode::decode(node)?),
                Mode::VirtualWire => Self::VirtualWire(OtherMode::decode(node)?),
                Mode::Tap => Self::Tap,
                Mode::Ha => Self::Ha,
                Mode::DecryptMirror => Self::DecryptMirror,
                Mode::AggregateGroup => Self::AggregateGroup,
            };
            return Ok(Some(decoded));
        }
        Ok(None)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Layer3(_) => Mode::Layer3,
            Self::Layer2(_) => Mode::Layer2,
            Self::VirtualWire(_) => Mode::VirtualWire,
            Self::Tap => Mode::Tap,
            Self::Ha => Mode::Ha,
            Self::DecryptMirror => Mode::DecryptMirror,
            Self::AggregateGroup => Mode::AggregateGroup,
        }
    }

    pub fn encode(&self) -> Result<XmlNode, WireError> {
        let tag = self.mode().as_str();
        match self {
            Self::Layer3(layer3) => layer3.encode(),
            Self::Layer2(body) | Self::VirtualWire(body) => body.encode(tag),
            Self::Tap | Self::Ha | Self::DecryptMirror | Self::AggregateGroup => {
                Ok(XmlNode::new(tag))
            }
        }
    }
}

impl<M: TcpMss> Layer3<M> {
    pub fn decode(node: &XmlNode) -> Result<Self, WireError> {
        let ipv6 = match node.get_child("ipv6") {
            Some(ipv6) => Ipv6 {
                enabled: text(ipv6, &["enabled"]),
                address: capture(ipv6, "address")?,
            },
            None => Ipv6::default(),
        };
        let static_ips = node
            .get_child("ip")
            .map(|ip| {
                ip.get_children("entry")
                    .into_iter()
                    .filter_map(XmlNode::name)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let dhcp = match node.get_child("dhcp-client") {
            Some(dhcp) => Some(DhcpSettings {
                enable: text(dhcp, &["enable"]),
                create_default_route: text(dhcp, &["create-default-route"]),
                metric: number(dhcp, &["default-route-metric"], "default-route-metric")?,
            }),
            None => None,
        };

        Ok(Self {
            ipv6,
            management_profile: text(node, &["interface-management-profile"]),
            mtu: number(node, &["mtu"], "mtu")?,
            netflow_profile: text(node, &["netflow-profile"]),
            adjust_tcp_mss: M::decode(node)?,
            static_ips,
            dhcp,
            arp: capture(node, "arp")?,
            units: capture(node, "units")?,
        })
    }

    pub fn encode(&self) -> Result<XmlNode, WireError> {
        let mut node = XmlNode::new("layer3");

        let mut ipv6 = XmlNode::new("ipv6");
        ipv6.push_text("enabled", &self.ipv6.enabled);
        replay(&mut ipv6, self.ipv6.address.as_ref(), "address")?;
        node.children.push(ipv6);

        node.push_text_opt("interface-management-profile", &self.management_profile);
        push_number_opt(&mut node, "mtu", self.mtu);
        node.push_text_opt("netflow-profile", &self.netflow_profile);
        self.adjust_tcp_mss.encode(&mut node);

        if !self.static_ips.is_empty() {
            let mut ip = XmlNode::new("ip");
            for address in &self.static_ips {
                ip.children.push(XmlNode::named("entry", address.as_str()));
            }
            node.children.push(ip);
        }

        if let Some(dhcp) = &self.dhcp {
            let mut client = XmlNode::new("dhcp-client");
            client.push_text("enable", &dhcp.enable);
            client.push_text("create-default-route", &dhcp.create_default_route);
            push_number_opt(&mut client, "default-route-metric", dhcp.metric);
            node.children.push(client);
        }

        replay(&mut node, self.arp.as_ref(), "arp")?;
        replay(&mut node, self.units.as_ref(), "units")?;
        Ok(node)
    }
}

impl OtherMode {
    pub fn decode(node: &XmlNode) -> Result<Self, WireError> {
        Ok(Self {
            lldp_enabled: text(node, &["lldp", "enable"]),
            lldp_profile: text(node, &["lldp", "profile"]),
            netflow_profile: text(node, &["netflow-profile"]),
            units: capture(node, "units")?,
        })
    }

    pub fn encode(&self, tag: &str) -> Result<XmlNode, WireError> {
        let mut node = XmlNode::new(tag);
        let mut lldp = XmlNode::new("lldp");
        lldp.push_text("enable", &self.lldp_enabled);
        lldp.push_text("profile", &self.lldp_profile);
        node.children.push(lldp);
        node.push_text_opt("netflow-profile", &self.netflow_profile);
        replay(&mut node, self.units.as_ref(), "units")?;
        Ok(node)
    }
}

fn text(node: &XmlNode, path: &[&str]) -> String {
    node.get_text(path).unwrap_or_default().to_string()
}

fn number(node: &XmlNode, path: &[&str], field: &'static str) -> Result<u32, WireError> {
    match node.get_text(path) {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| WireError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn push_number_opt(node: &mut XmlNode, tag: &str, value: u32) {
    if value != 0 {
        node.children.push(XmlNode::with_text(tag, value.to_string()));
    }
}

fn capture(node: &XmlNode, tag: &'static str) -> Result<Option<RawXml>, WireError> {
    node.get_child(tag)
        .map(|child| RawXml::capture(child).map_err(|source| WireError::Capture { tag, source }))
        .transpose()
}

fn replay(parent: &mut XmlNode, raw: Option<&RawXml>, tag: &'static str) -> Result<(), WireError> {
    if let Some(raw) = raw {
        let node = raw
            .replay(tag)
            .map_err(|source| WireError::Replay { tag, source })?;
        parent.children.push(node);
    }
    Ok(())
}
