use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};
use tokio::fs::read_to_string;
use toml::from_str;

/// One environment entry of the registry file.
///
/// Entries may carry additional keys (hostnames and the like); only
/// `base_file_url` is required here.
#[derive(Clone, Debug, Deserialize)]
pub struct Environment {
    pub base_file_url: String,
}

/// Registry of deployment environments, one table per environment.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    environments: BTreeMap<String, Environment>,
}

impl Registry {
    pub async fn load(path: &Path) -> Result<Self> {
        let data = read_to_string(path)
            .await
            .with_context(|| format!("failed to read registry from {}", path.display()))?;

        Self::parse(&data)
            .with_context(|| format!("failed to parse registry from {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let registry: Self = from_str(data)?;

        Ok(registry)
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }
}
