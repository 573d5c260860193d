#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpSearch {
    Host { address: String, partial: bool },
    Network { network: String },
}

/// What the user asked to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    Mac { address: String, partial: bool },
    Ip(IpSearch),
    Node { id: String },
    Route {
        prefix: String,
        vrf: Option<String>,
        exact: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFamily {
    Endpoint,
    Route,
}

impl SearchMode {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Mac { .. } => "mac",
            SearchMode::Ip(_) => "ip",
            SearchMode::Node { .. } => "node",
            SearchMode::Route { .. } => "route",
        }
    }

    pub fn family(&self) -> SearchFamily {
        match self {
            SearchMode::Route { .. } => SearchFamily::Route,
            _ => SearchFamily::Endpoint,
        }
    }
}
