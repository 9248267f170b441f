use colored::Colorize;

use crate::eth::specify::yes_no;
use crate::eth::{Entry, Mode};

/// Render interface names, one per line.
pub fn render_list(names: &[String]) -> String {
    if names.is_empty() {
        return "no ethernet interfaces".dimmed().to_string();
    }
    names.join("\n")
}

/// Render one interface for terminal output.
///
/// Only the fields meaningful for the interface's mode are shown, and empty
/// values are skipped.
pub fn render_entry(entry: &Entry) -> String {
    let mut out = Vec::new();
    let mode = entry
        .mode
        .map(|mode| mode.as_str().to_string())
        .unwrap_or_else(|| "unset".to_string());
    out.push(format!("{} ({})", entry.name.bold(), mode.cyan()));

    match entry.mode {
        Some(Mode::Layer3) => {
            for ip in &entry.static_ips {
                push(&mut out, "ip", ip);
            }
            if entry.enable_dhcp
                || entry.create_dhcp_default_route
                || entry.dhcp_default_route_metric != 0
            {
                push(&mut out, "dhcp", &yes_no(entry.enable_dhcp));
                push(&mut out, "dhcp-default-route", &yes_no(entry.create_dhcp_default_route));
                if entry.dhcp_default_route_metric != 0 {
                    push(&mut out, "dhcp-route-metric", &entry.dhcp_default_route_metric.to_string());
                }
            }
            push(&mut out, "ipv6", &yes_no(entry.ipv6_enabled));
            push(&mut out, "management-profile", &entry.management_profile);
            if entry.mtu != 0 {
                push(&mut out, "mtu", &entry.mtu.to_string());
            }
            if entry.adjust_tcp_mss {
                push(
                    &mut out,
                    "adjust-tcp-mss",
                    &format!("ipv4 {} ipv6 {}", entry.ipv4_mss_adjust, entry.ipv6_mss_adjust),
                );
            }
            push(&mut out, "netflow-profile", &entry.netflow_profile);
        }
        Some(Mode::Layer2) | Some(Mode::VirtualWire) => {
            push(&mut out, "lldp", &yes_no(entry.lldp_enabled));
            push(&mut out, "lldp-profile", &entry.lldp_profile);
            push(&mut out, "netflow-profile", &entry.netflow_profile);
        }
        _ => {}
    }

    push(&mut out, "link-speed", &entry.link_speed);
    push(&mut out, "link-duplex", &entry.link_duplex);
    push(&mut out, "link-state", &entry.link_state);
    push(&mut out, "comment", &entry.comment);

    for key in entry.fragments().keys() {
        out.push(format!("  {} {}", "preserved".yellow(), key.as_str()));
    }

    out.join("\n")
}

fn push(out: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        out.push(format!("  {label}: {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{render_entry, render_list};
    use crate::eth::{Entry, Mode};

    #[test]
    fn layer3_shows_addresses_and_hides_layer2_fields() {
        colored::control::set_override(false);
        let mut entry = Entry::new("ethernet1/1");
        entry.mode = Some(Mode::Layer3);
        entry.static_ips = vec!["10.0.0.1/24".to_string()];
        entry.mtu = 1500;
        entry.lldp_profile = "ignored".to_string();

        let out = render_entry(&entry);
        assert!(out.starts_with("ethernet1/1 (layer3)"));
        assert!(out.contains("  ip: 10.0.0.1/24"));
        assert!(out.contains("  mtu: 1500"));
        assert!(!out.contains("lldp"));
        assert!(!out.contains("dhcp"));
    }

    #[test]
    fn dhcp_block_shows_when_any_setting_is_present() {
        colored::control::set_override(false);
        let mut entry = Entry::new("ethernet1/1");
        entry.mode = Some(Mode::Layer3);
        entry.dhcp_default_route_metric = 20;

        let out = render_entry(&entry);
        assert!(out.contains("  dhcp: no"));
        assert!(out.contains("  dhcp-default-route: no"));
        assert!(out.contains("  dhcp-route-metric: 20"));
    }

    #[test]
    fn entry_without_mode_is_unset() {
        colored::control::set_override(false);
        let out = render_entry(&Entry::new("ethernet1/9"));
        assert_eq!(out, "ethernet1/9 (unset)");
    }

    #[test]
    fn empty_list_has_placeholder() {
        colored::control::set_override(false);
        assert_eq!(render_list(&[]), "no ethernet interfaces");
        assert_eq!(
            render_list(&["a".to_string(), "b".to_string()]),
            "a\nb"
        );
    }
}
