use crate::domain::search::SearchMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// A controller loaded from the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub host: Url,
}

impl Target {
    pub fn new(name: impl Into<String>, host: Url) -> Self {
        Self {
            name: name.into(),
            host,
        }
    }

    /// Base URL of the REST API, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.host.as_str().trim_end_matches('/'))
    }
}

/// Raw inventory entry before the host has been validated.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryEntry {
    pub name: String,
    pub host: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated handle returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"***").finish()
    }
}

/// Sessions keyed by position in the target list, since display names may repeat.
/// A target missing from the map is never queried.
pub type SessionMap = HashMap<usize, Session>;

/// Query path plus filter expression, built once per run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySpec(String);

impl QuerySpec {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Payload(serde_json::Value),
    /// No session existed, so no request was sent.
    NotAuthenticated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub host: String,
    pub outcome: QueryOutcome,
}

impl QueryResult {
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            QueryOutcome::Payload(value) => Some(value),
            QueryOutcome::NotAuthenticated | QueryOutcome::Failed(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.payload().is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub mode: SearchMode,
    pub results: Vec<QueryResult>,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn skipped_hosts(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_skipped())
            .map(|r| r.host.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRow {
    pub host: String,
    pub mac: String,
    pub ip: String,
    pub tenant: String,
    pub epg: String,
    pub encap: String,
    pub node: String,
    pub interface: String,
    pub source: String,
}

impl EndpointRow {
    pub const HEADERS: [&'static str; 9] = [
        "Host",
        "MAC",
        "IP",
        "Tenant",
        "EPG",
        "Encap",
        "Node",
        "Interface",
        "Source",
    ];

    pub fn cells(&self) -> [&str; 9] {
        [
            self.host.as_str(),
            self.mac.as_str(),
            self.ip.as_str(),
            self.tenant.as_str(),
            self.epg.as_str(),
            self.encap.as_str(),
            self.node.as_str(),
            self.interface.as_str(),
            self.source.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRow {
    pub host: String,
    pub route: String,
    pub route_type: String,
    pub metric: String,
    pub pref: String,
    pub next_hop: String,
    pub node: String,
    pub interface: String,
    pub vrf: String,
}

impl RouteRow {
    pub const HEADERS: [&'static str; 9] = [
        "Host",
        "Route",
        "Type",
        "Metric",
        "Pref",
        "Next Hop",
        "Node",
        "Interface",
        "Vrf",
    ];

    pub fn cells(&self) -> [&str; 9] {
        [
            self.host.as_str(),
            self.route.as_str(),
            self.route_type.as_str(),
            self.metric.as_str(),
            self.pref.as_str(),
            self.next_hop.as_str(),
            self.node.as_str(),
            self.interface.as_str(),
            self.vrf.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_strips_trailing_slash() {
        let target = Target::new("site-a", Url::parse("https://apic1.example.com/").unwrap());
        assert_eq!(target.api_base(), "https://apic1.example.com/api");
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let creds = Credentials::new("admin", "hunter2");
        let session = Session::new("secret-token");
        assert!(!format!("{:?}", creds).contains("hunter2"));
        assert!(!format!("{:?}", session).contains("secret-token"));
    }

    #[test]
    fn test_payload_is_none_for_failures() {
        let skipped = QueryResult {
            host: "a".to_string(),
            outcome: QueryOutcome::NotAuthenticated,
        };
        let failed = QueryResult {
            host: "b".to_string(),
            outcome: QueryOutcome::Failed("boom".to_string()),
        };
        assert!(skipped.payload().is_none());
        assert!(failed.is_skipped());
    }
}
