use crate::domain::model::{InventoryEntry, Target};
use crate::utils::error::{FabricError, Result};
use crate::utils::validation::validate_url;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TomlInventory {
    #[serde(default)]
    hosts: Vec<InventoryEntry>,
}

/// Loads targets from `path`. Any failure is logged and yields an empty inventory.
pub fn load_inventory(path: &Path) -> Vec<Target> {
    tracing::info!("Loading inventory data.");
    match read_inventory(path) {
        Ok(targets) => {
            tracing::debug!("Loaded {} targets from {}", targets.len(), path.display());
            targets
        }
        Err(FabricError::IoError(e)) => {
            tracing::error!("Unable to find inventory file at path: {}", path.display());
            tracing::debug!("{}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::error!("Unable to parse inventory file at path: {}", path.display());
            tracing::debug!("{}", e);
            Vec::new()
        }
    }
}

pub fn read_inventory(path: &Path) -> Result<Vec<Target>> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let entries = if is_toml {
        parse_toml_inventory(&content)?
    } else {
        parse_yaml_inventory(&content)?
    };

    Ok(into_targets(entries))
}

pub fn parse_yaml_inventory(content: &str) -> Result<Vec<InventoryEntry>> {
    // An empty document deserializes as null rather than an empty list.
    let entries: Option<Vec<InventoryEntry>> = serde_yaml::from_str(content)?;
    Ok(entries.unwrap_or_default())
}

pub fn parse_toml_inventory(content: &str) -> Result<Vec<InventoryEntry>> {
    let inventory: TomlInventory = toml::from_str(content).map_err(|e| FabricError::ConfigError {
        message: format!("TOML parsing error: {}", e),
    })?;
    Ok(inventory.hosts)
}

fn into_targets(entries: Vec<InventoryEntry>) -> Vec<Target> {
    entries
        .into_iter()
        .filter_map(|entry| match validate_url("host", &entry.host) {
            Ok(host) => Some(Target::new(entry.name, host)),
            Err(e) => {
                tracing::warn!("⚠️ Skipping inventory entry '{}': {}", entry.name, e);
                None
            }
        })
        .collect()
}
