use super::{attr, drop_chars};
use crate::domain::model::EndpointRow;
use serde_json::Value;

/// `paths-101` in `topology/pod-1/paths-101/pathep-[eth1/1]`.
fn node_from_path(path: &str) -> Option<String> {
    path.split('/').nth(2).map(|segment| drop_chars(segment, 6))
}

/// `eth1/1` in `topology/pod-1/paths-101/pathep-[eth1/1]`.
fn interface_from_path(path: &str) -> String {
    path.rsplit('[')
        .next()
        .unwrap_or_default()
        .trim_end_matches(']')
        .to_string()
}

fn dn_segment(dn: &str, index: usize, prefix_len: usize) -> String {
    dn.split('/')
        .nth(index)
        .map(|segment| drop_chars(segment, prefix_len))
        .unwrap_or_default()
}

/// Flattens one `fvCEp` entry into a table row.
pub fn build_endpoint_row(host: &str, entry: &Value) -> EndpointRow {
    let endpoint = &entry["fvCEp"];
    let attributes = &endpoint["attributes"];

    let dn = attr(attributes, "dn").unwrap_or_default();
    let tenant = if dn.contains("tn-") {
        dn_segment(&dn, 1, 3)
    } else {
        String::new()
    };
    let epg = if dn.contains("epg-") {
        dn_segment(&dn, 3, 4)
    } else {
        String::new()
    };

    let mut ip = Vec::new();
    let mut encap = Vec::new();
    let mut node = Vec::new();
    let mut interface = Vec::new();

    let children = endpoint["children"].as_array().map(Vec::as_slice).unwrap_or_default();
    for child in children {
        let Some(fv_ip) = child.get("fvIp") else {
            continue;
        };
        let ip_attributes = &fv_ip["attributes"];

        if let Some(addr) = attr(ip_attributes, "addr") {
            ip.push(addr);
        }
        if let Some(path) = attr(ip_attributes, "fabricPathDn") {
            node.extend(node_from_path(&path));
            interface.push(interface_from_path(&path));
        }
        // VMM-learned addresses report "unknown" at the IP level.
        match attr(ip_attributes, "encap") {
            Some(value) if value != "unknown" => encap.push(drop_chars(&value, 5)),
            Some(_) => {}
            None => tracing::debug!("Unable to find encap key at fvIp level"),
        }
    }

    if encap.is_empty() {
        if let Some(value) = attr(attributes, "encap") {
            encap.push(drop_chars(&value, 5));
        }
    }

    let top_path = attr(attributes, "fabricPathDn");
    if interface.is_empty() {
        if let Some(path) = &top_path {
            interface.push(interface_from_path(path));
        }
    }
    if node.is_empty() {
        match top_path.as_deref().and_then(node_from_path) {
            Some(value) => node.push(value),
            None => tracing::debug!("Unable to add node for endpoint on {}", host),
        }
    }

    EndpointRow {
        host: host.to_string(),
        mac: attr(attributes, "mac").unwrap_or_default(),
        ip: ip.join("\n"),
        tenant,
        epg,
        encap: encap.join("\n"),
        node: node.join("\n"),
        interface: interface.join("\n"),
        source: attr(attributes, "lcC").unwrap_or_default(),
    }
}
