use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::recording::OfficePathMap;
use crate::storage::MetadataTag;

/// Environment variables override the file, e.g. `CDR_SYNC__STORAGE__BUCKET`
pub const ENV_PREFIX: &str = "CDR_SYNC";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    /// Office this host holds recordings for
    pub office: String,
    /// Office tag -> recording base directory
    pub offices: HashMap<String, String>,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long to wait for a pooled connection before giving up
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Override for S3-compatible stores (MinIO, etc.)
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    #[serde(default = "default_metadata_key")]
    pub metadata_key: String,
    #[serde(default = "default_metadata_value")]
    pub metadata_value: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncConfig {
    /// Recordings processed at once; 1 keeps the batch strictly sequential
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_connections() -> u32 {
    2
}

fn default_acquire_timeout_ms() -> u64 {
    5000
}

fn default_concurrency() -> usize {
    1
}

fn default_metadata_key() -> String {
    MetadataTag::default().key
}

fn default_metadata_value() -> String {
    MetadataTag::default().value
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    /// Load `path`, overlaid by `<env_prefix>__SECTION__KEY` variables
    pub fn load_with_env_prefix(path: &str, env_prefix: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        let cfg: Self = settings
            .try_deserialize()
            .context("Failed to parse config")?;
        cfg.validate()?;

        Ok(cfg)
    }

    /// Reject settings that would otherwise only fail per recording
    pub fn validate(&self) -> Result<()> {
        let offices = self.office_paths()?;

        if offices.is_empty() {
            anyhow::bail!("[offices] must map at least one office to a base path");
        }
        if !offices.contains(&self.office) {
            anyhow::bail!(
                "Office {:?} has no entry in [offices] (known: {})",
                self.office,
                offices.offices().collect::<Vec<_>>().join(", ")
            );
        }
        if self.storage.bucket.trim().is_empty() {
            anyhow::bail!("storage.bucket must not be empty");
        }
        if self.storage.region.trim().is_empty() {
            anyhow::bail!("storage.region must not be empty");
        }
        if self.sync.concurrency == 0 {
            anyhow::bail!("sync.concurrency must be at least 1");
        }

        Ok(())
    }

    /// Office table with `~` and `$VAR` expanded in each base path
    pub fn office_paths(&self) -> Result<OfficePathMap> {
        let mut map = OfficePathMap::new();
        for (office, prefix) in &self.offices {
            let expanded = shellexpand::full(prefix)
                .with_context(|| format!("Failed to expand base path for office {}", office))?;
            map.insert(office, expanded.into_owned())?;
        }
        Ok(map)
    }

    pub fn metadata_tag(&self) -> MetadataTag {
        MetadataTag {
            key: self.storage.metadata_key.clone(),
            value: self.storage.metadata_value.clone(),
        }
    }
}
