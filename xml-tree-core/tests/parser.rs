use std::path::PathBuf;

use xml_tree_core::{parse, parse_file};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_running_config_root_and_entries() {
    let node = parse_file(&fixture("fixtures/running-config.xml")).expect("parse should succeed");
    assert_eq!(node.tag, "config");
    assert_eq!(node.attr("version"), Some("8.0.0"));

    let device = node
        .get_child("devices")
        .and_then(|d| d.get_child("entry"))
        .expect("device entry should exist");
    assert_eq!(device.name(), Some("localhost.localdomain"));

    let ethernet = device
        .get_child("network")
        .and_then(|n| n.get_child("interface"))
        .and_then(|i| i.get_child("ethernet"))
        .expect("ethernet container should exist");
    let names: Vec<_> = ethernet
        .get_children("entry")
        .iter()
        .filter_map(|e| e.name())
        .collect();
    assert_eq!(names, vec!["ethernet1/1", "ethernet1/2", "ethernet1/3"]);
}

#[test]
fn empty_elements_parse_as_empty_nodes() {
    let node = parse(b"<entry name=\"e\"><tap/><comment></comment></entry>").expect("parse");
    assert!(node.get_child("tap").expect("tap").is_empty());
    assert!(node.get_child("comment").expect("comment").is_empty());
}

#[test]
fn unescapes_text_and_attributes() {
    let node =
        parse(br#"<entry name="a&amp;b"><comment>x &lt; y</comment></entry>"#).expect("parse");
    assert_eq!(node.name(), Some("a&b"));
    assert_eq!(node.get_text(&["comment"]), Some("x < y"));
}

#[test]
fn unclosed_document_is_malformed() {
    let err = parse(b"<config><devices>").expect_err("should fail");
    assert!(err.to_string().contains("malformed") || err.to_string().contains("failed to parse"));
}
