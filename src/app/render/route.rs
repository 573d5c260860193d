use super::attr;
use crate::domain::model::RouteRow;
use serde_json::Value;

/// Flattens one `uribv4Route` entry and its next hops into a table row.
pub fn build_route_row(host: &str, entry: &Value) -> RouteRow {
    let route = &entry["uribv4Route"];
    let attributes = &route["attributes"];

    // topology/pod-1/node-101/sys/uribv4/... -> 101
    let node = attr(attributes, "dn")
        .and_then(|dn| {
            dn.split('/')
                .nth(2)
                .and_then(|segment| segment.rsplit('-').next())
                .map(str::to_string)
        })
        .unwrap_or_default();

    let mut next_hop = Vec::new();
    let mut interface = Vec::new();
    let mut metric = Vec::new();
    let mut pref = Vec::new();
    let mut route_type = Vec::new();
    let mut vrf = Vec::new();

    let children = route["children"].as_array().map(Vec::as_slice).unwrap_or_default();
    for child in children {
        let Some(hop) = child.get("uribv4Nexthop") else {
            continue;
        };
        let hop = &hop["attributes"];
        next_hop.push(attr(hop, "addr").unwrap_or_default());
        interface.push(attr(hop, "if").unwrap_or_default());
        metric.push(attr(hop, "metric").unwrap_or_default());
        pref.push(attr(hop, "pref").unwrap_or_default());
        route_type.push(attr(hop, "routeType").unwrap_or_default());
        vrf.push(attr(hop, "vrf").unwrap_or_default());
    }

    RouteRow {
        host: host.to_string(),
        route: attr(attributes, "prefix").unwrap_or_default(),
        route_type: route_type.join("\n"),
        metric: metric.join("\n"),
        pref: pref.join("\n"),
        next_hop: next_hop.join("\n"),
        node,
        interface: interface.join("\n"),
        vrf: vrf.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn next_hop(addr: &str, iface: &str, route_type: &str) -> Value {
        json!({
            "uribv4Nexthop": {
                "attributes": {
                    "addr": addr,
                    "if": iface,
                    "metric": "0",
                    "pref": "1",
                    "routeType": route_type,
                    "vrf": "overlay-1"
                }
            }
        })
    }

    #[test]
    fn test_route_with_two_next_hops() {
        let entry = json!({
            "uribv4Route": {
                "attributes": {
                    "dn": "topology/pod-1/node-101/sys/uribv4/dom-common:default/db-rt/rt-[0.0.0.0/0]",
                    "prefix": "0.0.0.0/0"
                },
                "children": [
                    next_hop("10.0.0.1/32", "eth1/49", "static"),
                    next_hop("10.0.0.2/32", "eth1/50", "ospf")
                ]
            }
        });

        let row = build_route_row("site-a", &entry);

        assert_eq!(row.host, "site-a");
        assert_eq!(row.route, "0.0.0.0/0");
        assert_eq!(row.node, "101");
        assert_eq!(row.next_hop, "10.0.0.1/32\n10.0.0.2/32");
        assert_eq!(row.interface, "eth1/49\neth1/50");
        assert_eq!(row.route_type, "static\nospf");
        assert_eq!(row.metric, "0\n0");
        assert_eq!(row.pref, "1\n1");
        assert_eq!(row.vrf, "overlay-1\noverlay-1");
    }

    #[test]
    fn test_route_without_children_or_dn() {
        let entry = json!({"uribv4Route": {"attributes": {"prefix": "10.1.0.0/16"}}});

        let row = build_route_row("site-b", &entry);

        assert_eq!(row.route, "10.1.0.0/16");
        assert_eq!(row.node, "");
        assert_eq!(row.next_hop, "");
    }

    #[test]
    fn test_numeric_metric_is_stringified() {
        let entry = json!({
            "uribv4Route": {
                "attributes": {"dn": "topology/pod-2/node-2101/sys", "prefix": "10.2.0.0/16"},
                "children": [{"uribv4Nexthop": {"attributes": {"addr": "10.9.9.9/32", "metric": 110}}}]
            }
        });

        let row = build_route_row("site-a", &entry);

        assert_eq!(row.node, "2101");
        assert_eq!(row.metric, "110");
        assert_eq!(row.interface, "");
    }
}
