use super::entry::{Entry, FragmentKey};
use super::wire::{TcpMss, WireEntry, WireMode};

/// Device booleans are the literal strings `yes` and `no`.
pub(crate) fn as_bool(value: &str) -> bool {
    value == "yes"
}

/// Convert a decoded wire entry into a version independent record.
///
/// Only the fields of the entry's mode are filled in. An entry without a
/// mode element yields a record with `mode: None`.
pub fn normalize<M: TcpMss>(wire: &WireEntry<M>) -> Entry {
    let mut ans = Entry {
        name: wire.name.clone(),
        link_speed: wire.link_speed.clone(),
        link_duplex: wire.link_duplex.clone(),
        link_state: wire.link_state.clone(),
        comment: wire.comment.clone(),
        ..Entry::default()
    };

    let Some(mode) = &wire.mode else {
        return ans;
    };
    ans.mode = Some(mode.mode());

    match mode {
        WireMode::Layer3(layer3) => {
            ans.ipv6_enabled = as_bool(&layer3.ipv6.enabled);
            ans.management_profile = layer3.management_profile.clone();
            ans.mtu = layer3.mtu;
            ans.netflow_profile = layer3.netflow_profile.clone();
            ans.adjust_tcp_mss = as_bool(layer3.adjust_tcp_mss.enable());
            (ans.ipv4_mss_adjust, ans.ipv6_mss_adjust) = layer3.adjust_tcp_mss.adjustments();
            ans.static_ips = layer3.static_ips.clone();
            if let Some(dhcp) = &layer3.dhcp {
                ans.enable_dhcp = as_bool(&dhcp.enable);
                ans.create_dhcp_default_route = as_bool(&dhcp.create_default_route);
                ans.dhcp_default_route_metric = dhcp.metric;
            }
            if let Some(arp) = &layer3.arp {
                ans.keep_fragment(FragmentKey::Arp, arp.text.clone());
            }
            if let Some(units) = &layer3.units {
                ans.keep_fragment(FragmentKey::L3Subinterface, units.text.clone());
            }
            if let Some(address) = &layer3.ipv6.address {
                ans.keep_fragment(FragmentKey::Ipv6, address.text.clone());
            }
        }
        WireMode::Layer2(body) => {
            ans.lldp_enabled = as_bool(&body.lldp_enabled);
            ans.lldp_profile = body.lldp_profile.clone();
            ans.netflow_profile = body.netflow_profile.clone();
            if let Some(units) = &body.units {
                ans.keep_fragment(FragmentKey::L2Subinterface, units.text.clone());
            }
        }
        WireMode::VirtualWire(body) => {
            ans.lldp_enabled = as_bool(&body.lldp_enabled);
            ans.lldp_profile = body.lldp_profile.clone();
            ans.netflow_profile = body.netflow_profile.clone();
        }
        WireMode::Tap | WireMode::Ha | WireMode::DecryptMirror | WireMode::AggregateGroup => {}
    }

    ans
}
