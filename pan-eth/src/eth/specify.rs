use super::entry::{Entry, FragmentKey, Mode};
use super::raw::RawXml;
use super::wire::{DhcpSettings, Ipv6, Layer3, OtherMode, TcpMss, WireEntry, WireMode};

pub(crate) fn yes_no(value: bool) -> String {
    String::from(if value { "yes" } else { "no" })
}

/// Build the wire entry for `entry`, driven by its mode.
///
/// A record without a mode produces an entry carrying only the identity and
/// link fields.
pub fn specify<M: TcpMss>(entry: &Entry) -> WireEntry<M> {
    WireEntry {
        name: entry.name.clone(),
        mode: entry.mode.map(|mode| specify_mode(entry, mode)),
        link_speed: entry.link_speed.clone(),
        link_duplex: entry.link_duplex.clone(),
        link_state: entry.link_state.clone(),
        comment: entry.comment.clone(),
    }
}

fn specify_mode<M: TcpMss>(entry: &Entry, mode: Mode) -> WireMode<M> {
    match mode {
        Mode::Layer3 => WireMode::Layer3(specify_layer3(entry)),
        Mode::Layer2 => WireMode::Layer2(OtherMode {
            units: fragment(entry, FragmentKey::L2Subinterface),
            ..other_mode(entry)
        }),
        Mode::VirtualWire => WireMode::VirtualWire(other_mode(entry)),
        Mode::Tap => WireMode::Tap,
        Mode::Ha => WireMode::Ha,
        Mode::DecryptMirror => WireMode::DecryptMirror,
        Mode::AggregateGroup => WireMode::AggregateGroup,
    }
}

fn specify_layer3<M: TcpMss>(entry: &Entry) -> Layer3<M> {
    // Without any DHCP setting the block is left out so the device default applies.
    let dhcp = (entry.enable_dhcp
        || entry.create_dhcp_default_route
        || entry.dhcp_default_route_metric != 0)
        .then(|| DhcpSettings {
            enable: yes_no(entry.enable_dhcp),
            create_default_route: yes_no(entry.create_dhcp_default_route),
            metric: entry.dhcp_default_route_metric,
        });

    Layer3 {
        ipv6: Ipv6 {
            enabled: yes_no(entry.ipv6_enabled),
            address: fragment(entry, FragmentKey::Ipv6),
        },
        management_profile: entry.management_profile.clone(),
        mtu: entry.mtu,
        netflow_profile: entry.netflow_profile.clone(),
        adjust_tcp_mss: M::from_parts(
            yes_no(entry.adjust_tcp_mss),
            entry.ipv4_mss_adjust,
            entry.ipv6_mss_adjust,
        ),
        static_ips: entry.static_ips.clone(),
        dhcp,
        arp: fragment(entry, FragmentKey::Arp),
        units: fragment(entry, FragmentKey::L3Subinterface),
    }
}

fn other_mode(entry: &Entry) -> OtherMode {
    OtherMode {
        lldp_enabled: yes_no(entry.lldp_enabled),
        lldp_profile: entry.lldp_profile.clone(),
        netflow_profile: entry.netflow_profile.clone(),
        units: None,
    }
}

fn fragment(entry: &Entry, key: FragmentKey) -> Option<RawXml> {
    entry.fragment(key).map(RawXml::new)
}

#[cfg(test)]
mod tests {
    use super::specify;
    use crate::eth::entry::{Entry, FragmentKey, Mode};
    use crate::eth::wire::{EntryV1, EntryV2, TcpMssV1, TcpMssV2, WireMode};
    use xml_tree_core::render;

    fn layer3_record() -> Entry {
        let mut entry = Entry::new("ethernet1/1");
        entry.mode = Some(Mode::Layer3);
        entry.static_ips = vec!["10.0.0.1/24".to_string()];
        entry
    }

    #[test]
    fn layer3_without_dhcp_settings_omits_dhcp_block() {
        let wire: EntryV2 = specify(&layer3_record());
        let Some(WireMode::Layer3(layer3)) = &wire.mode else {
            panic!("expected layer3");
        };
        assert_eq!(layer3.static_ips, vec!["10.0.0.1/24"]);
        assert!(layer3.dhcp.is_none());
        assert_eq!(layer3.adjust_tcp_mss.enable, "no");
        assert_eq!(layer3.ipv6.enabled, "no");

        let xml = render(&wire.encode().expect("encode")).expect("render");
        assert_eq!(
            xml,
            r#"<entry name="ethernet1/1"><layer3><ipv6><enabled>no</enabled></ipv6><adjust-tcp-mss><enable>no</enable></adjust-tcp-mss><ip><entry name="10.0.0.1/24"/></ip></layer3><comment/></entry>"#
        );
    }

    #[test]
    fn any_dhcp_setting_emits_the_full_block() {
        let mut metric_only = layer3_record();
        metric_only.dhcp_default_route_metric = 20;
        let wire: EntryV1 = specify(&metric_only);
        let Some(WireMode::Layer3(layer3)) = wire.mode else {
            panic!("expected layer3");
        };
        let dhcp = layer3.dhcp.expect("dhcp block");
        assert_eq!(dhcp.enable, "no");
        assert_eq!(dhcp.create_default_route, "no");
        assert_eq!(dhcp.metric, 20);

        let mut enabled = layer3_record();
        enabled.enable_dhcp = true;
        let wire: EntryV1 = specify(&enabled);
        let Some(WireMode::Layer3(layer3)) = wire.mode else {
            panic!("expected layer3");
        };
        assert_eq!(layer3.dhcp.expect("dhcp block").enable, "yes");
    }

    #[test]
    fn v1_drops_mss_adjustments_and_v2_keeps_them() {
        let mut entry = layer3_record();
        entry.adjust_tcp_mss = true;
        entry.ipv4_mss_adjust = 40;
        entry.ipv6_mss_adjust = 60;

        let wire: EntryV1 = specify(&entry);
        let Some(WireMode::Layer3(layer3)) = wire.mode else {
            panic!("expected layer3");
        };
        assert_eq!(layer3.adjust_tcp_mss, TcpMssV1 { enable: "yes".to_string() });

        let wire: EntryV2 = specify(&entry);
        let Some(WireMode::Layer3(layer3)) = wire.mode else {
            panic!("expected layer3");
        };
        assert_eq!(
            layer3.adjust_tcp_mss,
            TcpMssV2 {
                enable: "yes".to_string(),
                ipv4_mss_adjustment: 40,
                ipv6_mss_adjustment: 60,
            }
        );
    }

    #[test]
    fn fields_of_other_modes_are_ignored() {
        let mut entry = Entry::new("ethernet1/3");
        entry.mode = Some(Mode::VirtualWire);
        entry.lldp_enabled = true;
        entry.static_ips = vec!["10.9.9.9/32".to_string()];
        entry.mtu = 1400;
        entry.enable_dhcp = true;
        entry.keep_fragment(FragmentKey::L2Subinterface, "<entry name=\"x\"/>".to_string());

        let wire: EntryV2 = specify(&entry);
        let xml = render(&wire.encode().expect("encode")).expect("render");
        assert_eq!(
            xml,
            r#"<entry name="ethernet1/3"><virtual-wire><lldp><enable>yes</enable><profile/></lldp></virtual-wire><comment/></entry>"#
        );
    }

    #[test]
    fn layer2_reattaches_its_units_fragment() {
        let mut entry = Entry::new("ethernet1/2");
        entry.mode = Some(Mode::Layer2);
        entry.keep_fragment(
            FragmentKey::L2Subinterface,
            r#"<entry name="ethernet1/2.4"><tag>4</tag></entry>"#.to_string(),
        );
        entry.keep_fragment(FragmentKey::Arp, "<entry name=\"1.1.1.1\"/>".to_string());

        let wire: EntryV1 = specify(&entry);
        let Some(WireMode::Layer2(body)) = wire.mode else {
            panic!("expected layer2");
        };
        assert_eq!(
            body.units.map(|raw| raw.text).as_deref(),
            Some(r#"<entry name="ethernet1/2.4"><tag>4</tag></entry>"#)
        );
    }

    #[test]
    fn marker_modes_emit_empty_elements() {
        for (mode, tag) in [
            (Mode::Tap, "tap"),
            (Mode::Ha, "ha"),
            (Mode::DecryptMirror, "decrypt-mirror"),
            (Mode::AggregateGroup, "aggregate-group"),
        ] {
            let mut entry = Entry::new("ethernet1/6");
            entry.mode = Some(mode);
            entry.lldp_enabled = true;
            let wire: EntryV2 = specify(&entry);
            let xml = render(&wire.encode().expect("encode")).expect("render");
            assert_eq!(xml, format!(r#"<entry name="ethernet1/6"><{tag}/><comment/></entry>"#));
        }
    }

    #[test]
    fn record_without_mode_writes_identity_only() {
        let mut entry = Entry::new("ethernet1/8");
        entry.link_speed = "10000".to_string();
        entry.comment = "spare".to_string();
        entry.static_ips = vec!["10.0.0.1/24".to_string()];

        let wire: EntryV1 = specify(&entry);
        assert!(wire.mode.is_none());
        let xml = render(&wire.encode().expect("encode")).expect("render");
        assert_eq!(
            xml,
            r#"<entry name="ethernet1/8"><link-speed>10000</link-speed><comment>spare</comment></entry>"#
        );
    }
}
