use std::path::PathBuf;

use pan_eth::eth::{FragmentKey, Mode, Schema};
use pretty_assertions::assert_eq;
use xml_tree_core::{parse, parse_file, render, XmlNode};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn fixture_entries() -> Vec<XmlNode> {
    let root = parse_file(&fixture("fixtures/running-config.xml")).expect("parse fixture");
    root.get_child("devices")
        .and_then(|d| d.get_child("entry"))
        .and_then(|e| e.get_child("network"))
        .and_then(|n| n.get_child("interface"))
        .and_then(|i| i.get_child("ethernet"))
        .map(|e| e.children.clone())
        .expect("ethernet container")
}

fn strip_bookkeeping(node: &mut XmlNode) {
    for key in ["admin", "dirtyId", "time"] {
        node.attributes.remove(key);
    }
    node.children.iter_mut().for_each(strip_bookkeeping);
}

fn round_trip(schema: Schema, node: &XmlNode) -> XmlNode {
    let entry = schema.normalize(node).expect("normalize");
    schema.specify(&entry).expect("specify")
}

#[test]
fn fixture_entries_survive_v2_round_trip() {
    for original in fixture_entries() {
        let mut expected = original.clone();
        strip_bookkeeping(&mut expected);
        assert_eq!(round_trip(Schema::V2, &original), expected);
    }
}

#[test]
fn fixture_fragments_are_kept_byte_exact() {
    let entries = fixture_entries();
    let layer3 = Schema::V2.normalize(&entries[0]).expect("normalize");
    assert_eq!(layer3.mode, Some(Mode::Layer3));
    assert_eq!(
        layer3.fragment(FragmentKey::Arp),
        Some(r#"<entry name="10.1.1.50"><hw-address>00:11:22:33:44:55</hw-address></entry>"#)
    );
    assert_eq!(
        layer3.fragment(FragmentKey::L3Subinterface),
        Some(r#"<entry name="ethernet1/1.10"><tag>10</tag></entry>"#)
    );

    let layer2 = Schema::V2.normalize(&entries[1]).expect("normalize");
    assert_eq!(
        layer2.fragment(FragmentKey::L2Subinterface),
        Some(r#"<entry name="ethernet1/2.20"><tag>20</tag></entry>"#)
    );

    let rebuilt = Schema::V2.specify(&layer2).expect("specify");
    let units = rebuilt
        .get_child("layer2")
        .and_then(|l2| l2.get_child("units"))
        .expect("units");
    assert_eq!(
        render(units).expect("render"),
        r#"<units><entry name="ethernet1/2.20"><tag>20</tag></entry></units>"#
    );
}

#[test]
fn every_mode_round_trips_in_both_revisions() {
    let v1_layer3 = r#"<entry name="ethernet1/1"><layer3><ipv6><enabled>yes</enabled><address><entry name="fd00::1/64"><enable-on-interface>yes</enable-on-interface></entry></address></ipv6><interface-management-profile>mgmt</interface-management-profile><mtu>9000</mtu><netflow-profile>nf</netflow-profile><adjust-tcp-mss>yes</adjust-tcp-mss><ip><entry name="10.0.0.1/24"/></ip><dhcp-client><enable>yes</enable><create-default-route>no</create-default-route><default-route-metric>10</default-route-metric></dhcp-client><arp><entry name="10.0.0.9"><hw-address>00:11:22:33:44:55</hw-address></entry></arp><units><entry name="ethernet1/1.5"><tag>5</tag></entry></units></layer3><link-speed>1000</link-speed><link-duplex>full</link-duplex><link-state>up</link-state><comment>wan</comment></entry>"#;
    let v2_layer3 = r#"<entry name="ethernet1/1"><layer3><ipv6><enabled>no</enabled></ipv6><adjust-tcp-mss><enable>yes</enable><ipv4-mss-adjustment>40</ipv4-mss-adjustment><ipv6-mss-adjustment>60</ipv6-mss-adjustment></adjust-tcp-mss><ip><entry name="10.0.0.1/24"/><entry name="10.0.1.1/24"/></ip></layer3><comment/></entry>"#;
    let layer2 = r#"<entry name="ethernet1/2"><layer2><lldp><enable>yes</enable><profile>lp</profile></lldp><netflow-profile>nf</netflow-profile><units><entry name="ethernet1/2.3"><tag>3</tag></entry></units></layer2><comment/></entry>"#;
    let virtual_wire = r#"<entry name="ethernet1/3"><virtual-wire><lldp><enable>no</enable><profile/></lldp></virtual-wire><comment>vw</comment></entry>"#;

    let mut cases = vec![
        (Schema::V1, v1_layer3.to_string()),
        (Schema::V2, v2_layer3.to_string()),
    ];
    for schema in [Schema::V1, Schema::V2] {
        cases.push((schema, layer2.to_string()));
        cases.push((schema, virtual_wire.to_string()));
        for tag in ["tap", "ha", "decrypt-mirror", "aggregate-group"] {
            cases.push((
                schema,
                format!(r#"<entry name="ethernet1/6"><{tag}/><link-speed>auto</link-speed><comment/></entry>"#),
            ));
        }
    }

    for (schema, xml) in cases {
        let original = parse(xml.as_bytes()).expect("parse");
        let rebuilt = round_trip(schema, &original);
        assert_eq!(render(&rebuilt).expect("render"), xml, "{schema:?}");
    }
}

#[test]
fn only_one_mode_is_written_back() {
    let both = parse(
        br#"<entry name="ethernet1/1"><layer2><lldp><enable>no</enable><profile/></lldp></layer2><layer3><ipv6><enabled>no</enabled></ipv6><adjust-tcp-mss><enable>no</enable></adjust-tcp-mss></layer3><comment/></entry>"#,
    )
    .expect("parse");

    let rebuilt = round_trip(Schema::V2, &both);
    assert!(rebuilt.get_child("layer3").is_some());
    assert!(rebuilt.get_child("layer2").is_none());
}

#[test]
fn v2_adjustments_are_dropped_when_written_as_v1() {
    let v2 = parse(
        br#"<entry name="ethernet1/1"><layer3><ipv6><enabled>no</enabled></ipv6><adjust-tcp-mss><enable>yes</enable><ipv4-mss-adjustment>40</ipv4-mss-adjustment></adjust-tcp-mss></layer3><comment/></entry>"#,
    )
    .expect("parse");

    let entry = Schema::V2.normalize(&v2).expect("normalize");
    assert_eq!(entry.ipv4_mss_adjust, 40);
    let v1 = Schema::V1.specify(&entry).expect("specify");
    assert_eq!(
        render(&v1).expect("render"),
        r#"<entry name="ethernet1/1"><layer3><ipv6><enabled>no</enabled></ipv6><adjust-tcp-mss>yes</adjust-tcp-mss></layer3><comment/></entry>"#
    );
}
