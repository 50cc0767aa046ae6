//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, StorageKind};

#[derive(Debug, Parser)]
#[command(name = "pairchat", version, about = "Two-user local chat demo")]
pub struct Cli {
    /// Config file (default: <config_dir>/pairchat/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted conversation
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep the conversation in memory only
    #[arg(long, conflicts_with = "data_dir")]
    pub memory: bool,

    /// Log in directly as this user (e.g. user_1), skipping the login screen
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let path = self.config.clone().unwrap_or_else(Config::config_path);
        let mut config = Config::load_from(&path)?;
        if let Some(dir) = &self.data_dir {
            config.storage.backend = StorageKind::File;
            config.storage.dir = Some(dir.clone());
        }
        if self.memory {
            config.storage.backend = StorageKind::Memory;
        }
        Ok(config)
    }
}
