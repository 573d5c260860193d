use crate::config::settings::DEFAULT_SETTINGS_FILE;
use crate::domain::search::{IpSearch, SearchMode};
use crate::utils::error::{FabricError, Result};
use crate::utils::logger::LogLevel;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fabric-search", version)]
#[command(about = "Iterate over an inventory of fabric controllers and search for endpoints or routes")]
pub struct Cli {
    /// Provide logging level
    #[arg(long = "loglevel", global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Settings file; missing is fine, environment variables are used instead
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Inventory file, overrides INVENTORY_PATH and the settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search endpoints based on MAC address
    Mac {
        /// Mac Address for example: 00:50:56:85:EF:89
        #[arg(long = "mac-address", short = 'm')]
        mac_address: String,

        /// Wildcard match instead of requiring the full address
        #[arg(long = "partial", short = 'p')]
        partial: bool,
    },
    /// Search endpoints based on IP address or network
    #[command(group(ArgGroup::new("ip_target").required(true).args(["host", "network"])))]
    Ip {
        /// IP Address for example: 10.96.255.10
        #[arg(long)]
        host: Option<String>,

        /// Network Address for example: 10.0.0.0/8
        #[arg(long)]
        network: Option<String>,

        /// Wildcard match instead of requiring the full address
        #[arg(long = "partial", short = 'p')]
        partial: bool,
    },
    /// Search endpoints based on Node
    Node {
        /// Node ID to query
        #[arg(long)]
        id: String,
    },
    /// Search routes based on network
    Route {
        /// Prefix to query, e.g. 10.1.0.0/16
        #[arg(long)]
        prefix: String,

        /// Filter route search by VRF
        #[arg(long)]
        vrf: Option<String>,

        /// Whether the prefix should be an exact match
        #[arg(long)]
        exact: bool,
    },
}

impl Command {
    /// Fails only for an `Ip` command built without `--host` or `--network`,
    /// which the parser itself never produces.
    pub fn search_mode(&self) -> Result<SearchMode> {
        let mode = match self {
            Command::Mac {
                mac_address,
                partial,
            } => SearchMode::Mac {
                address: mac_address.clone(),
                partial: *partial,
            },
            Command::Ip {
                host,
                network,
                partial,
            } => match (host, network) {
                (Some(address), _) => SearchMode::Ip(IpSearch::Host {
                    address: address.clone(),
                    partial: *partial,
                }),
                (None, Some(network)) => SearchMode::Ip(IpSearch::Network {
                    network: network.clone(),
                }),
                (None, None) => {
                    return Err(FabricError::ConfigError {
                        message: "ip search needs either --host or --network".to_string(),
                    })
                }
            },
            Command::Node { id } => SearchMode::Node { id: id.clone() },
            Command::Route { prefix, vrf, exact } => SearchMode::Route {
                prefix: prefix.clone(),
                vrf: vrf.clone(),
                exact: *exact,
            },
        };
        Ok(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fabric-search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mac_subcommand() {
        let cli = parse(&["mac", "--mac-address", "00:11:22:33:44:55"]);
        assert_eq!(cli.loglevel, LogLevel::Info);
        assert_eq!(
            cli.command.search_mode().unwrap(),
            SearchMode::Mac {
                address: "00:11:22:33:44:55".to_string(),
                partial: false
            }
        );

        let cli = parse(&["mac", "-m", "00:11", "-p", "--loglevel", "debug"]);
        assert_eq!(cli.loglevel, LogLevel::Debug);
        assert!(matches!(
            cli.command.search_mode().unwrap(),
            SearchMode::Mac { partial: true, .. }
        ));
    }

    #[test]
    fn test_ip_requires_exactly_one_target() {
        let cli = parse(&["ip", "--network", "10.0.0.0/8"]);
        assert_eq!(
            cli.command.search_mode().unwrap(),
            SearchMode::Ip(IpSearch::Network {
                network: "10.0.0.0/8".to_string()
            })
        );

        let cli = parse(&["ip", "--host", "10.96.255.10", "--partial"]);
        assert!(matches!(
            cli.command.search_mode().unwrap(),
            SearchMode::Ip(IpSearch::Host { partial: true, .. })
        ));

        assert!(Cli::try_parse_from(["fabric-search", "ip"]).is_err());
        assert!(Cli::try_parse_from([
            "fabric-search",
            "ip",
            "--host",
            "10.0.0.1",
            "--network",
            "10.0.0.0/8"
        ])
        .is_err());
    }

    #[test]
    fn test_ip_without_target_is_an_error() {
        let command = Command::Ip {
            host: None,
            network: None,
            partial: true,
        };
        assert!(matches!(
            command.search_mode(),
            Err(FabricError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_route_and_node_subcommands() {
        let cli = parse(&["route", "--prefix", "0.0.0.0/0", "--vrf", "common:default"]);
        assert_eq!(
            cli.command.search_mode().unwrap(),
            SearchMode::Route {
                prefix: "0.0.0.0/0".to_string(),
                vrf: Some("common:default".to_string()),
                exact: false,
            }
        );

        let cli = parse(&["node", "--id", "101"]);
        assert_eq!(cli.command.search_mode().unwrap().name(), "node");

        assert!(Cli::try_parse_from(["fabric-search", "route"]).is_err());
    }

    #[test]
    fn test_global_options() {
        let cli = parse(&[
            "--inventory",
            "lab.yml",
            "node",
            "--id",
            "101",
            "--loglevel",
            "critical",
        ]);
        assert_eq!(cli.inventory, Some(PathBuf::from("lab.yml")));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_SETTINGS_FILE));
        assert_eq!(cli.loglevel, LogLevel::Critical);

        assert!(Cli::try_parse_from(["fabric-search", "--loglevel", "verbose", "node", "--id", "1"]).is_err());
    }
}
