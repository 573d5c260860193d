use crate::domain::model::QuerySpec;
use crate::domain::search::{IpSearch, SearchMode};

const ENDPOINT_CLASS_PATH: &str = "/node/class/fvCEp.json";
const ENDPOINT_SUBTREE: &str = "rsp-subtree=full&rsp-subtree-class=fvIp,fvRsToVm,fvRsVm,fvRsHyper,tagTagDef,fvRsCEpToPathEp,fvPrimaryEncap,fvRsToEpMacTag&rsp-subtree-include=required";

const ROUTE_CLASS_PATH: &str = "/node/class/uribv4Route.json";
const ROUTE_SUBTREE: &str =
    "rsp-subtree=children&rsp-subtree-class=uribv4Nexthop&rsp-subtree-include=required";

pub const DEFAULT_ROUTE: &str = "0.0.0.0/0";

fn match_op(partial: bool) -> &'static str {
    if partial {
        "wcard"
    } else {
        "eq"
    }
}

fn endpoint_query(filter: String) -> QuerySpec {
    QuerySpec::new(format!(
        "{}?{}&{}",
        ENDPOINT_CLASS_PATH, filter, ENDPOINT_SUBTREE
    ))
}

/// Builds the class query for a search. Addresses are passed through untouched.
pub fn build_query(mode: &SearchMode) -> QuerySpec {
    match mode {
        SearchMode::Mac { address, partial } => {
            tracing::info!("Building MAC search query");
            endpoint_query(format!(
                "query-target-filter=and({}(fvCEp.mac,\"{}\"))",
                match_op(*partial),
                address
            ))
        }
        SearchMode::Ip(IpSearch::Host { address, partial }) => {
            tracing::info!("Building IP search query");
            let filter = if *partial {
                format!("rsp-subtree-filter=and(wcard(fvIp.dn,\"{}\"))", address)
            } else {
                format!("rsp-subtree-filter=eq(fvIp.addr,\"{}\")", address)
            };
            endpoint_query(filter)
        }
        SearchMode::Ip(IpSearch::Network { network }) => {
            tracing::info!("Building IP network search query");
            endpoint_query(format!(
                "rsp-subtree-filter=and(wcard(fvIp.addr,\"{}\"))",
                network
            ))
        }
        SearchMode::Node { id } => {
            tracing::info!("Building Node search query");
            endpoint_query(format!(
                "rsp-subtree-filter=and(wcard(fvRsCEpToPathEp.tDn,\"{}\"))",
                id
            ))
        }
        SearchMode::Route { prefix, vrf, exact } => {
            tracing::info!("Building route search query");
            // A wildcard on the default route matches every prefix.
            let exact = *exact || prefix == DEFAULT_ROUTE;
            let mut filter = format!(
                "query-target-filter=and({}(uribv4Route.prefix,\"{}\"))",
                match_op(!exact),
                prefix
            );
            if let Some(vrf) = vrf {
                filter.push_str(&format!(
                    "&rsp-subtree-filter=and(wcard(uribv4Nexthop.vrf,\"{}\"))",
                    vrf
                ));
            }
            QuerySpec::new(format!("{}?{}&{}", ROUTE_CLASS_PATH, filter, ROUTE_SUBTREE))
        }
    }
}
