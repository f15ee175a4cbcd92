use crate::config::toml_config::TomlConfig;
use crate::config::RelayConfig;
use crate::core::ObjectStorage;
use crate::utils::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "relay")]
#[command(about = "Replay a stored submission record into Airtable")]
pub struct CliConfig {
    /// Object key, relative to <root>/<bucket>
    #[arg(long)]
    pub key: String,

    #[arg(long, default_value = "")]
    pub bucket: String,

    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// TOML config file; environment variables are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Key is form-encoded as in an S3 notification
    #[arg(long)]
    pub encoded_key: bool,

    #[arg(long, help = "Print the update instead of sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn relay_config(&self) -> Result<RelayConfig> {
        match &self.config {
            Some(path) => {
                TomlConfig::from_file(path)?.into_relay_config(|name| std::env::var(name).ok())
            }
            None => RelayConfig::from_env(),
        }
    }
}

/// Reads objects from `<base_path>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }
}

impl ObjectStorage for LocalStorage {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(bucket).join(key);
        tracing::debug!("Reading {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}
