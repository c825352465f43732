use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::podman_adapter::DEFAULT_ENGINE;

pub const DEFAULT_CONFIG_NAME: &str = "devomail.toml";
pub const DEFAULT_DATA_SUBDIR: &str = "mail";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/home/dev"))
        .join(".config/devomail")
}

#[derive(Deserialize, Debug, Default)]
pub struct StorageConfig {
    /// Directory holding the registry document
    pub data_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct EngineConfig {
    /// Container CLI to drive (podman, docker)
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(dir) = other.storage.data_dir {
            self.storage.data_dir = Some(dir);
        }
        if let Some(binary) = other.engine.binary {
            self.engine.binary = Some(binary);
        }
    }

    /// Registry directory, with `~` expanded. Defaults to `<config_dir>/mail`.
    pub fn data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            None => config_dir.join(DEFAULT_DATA_SUBDIR),
        }
    }

    pub fn engine_binary(&self) -> &str {
        self.engine.binary.as_deref().unwrap_or(DEFAULT_ENGINE)
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("lendo config em {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("parse de config em {:?}", path))
}

/// Loads `devomail.toml` from the config dir, then lets a `./devomail.toml`
/// in the working directory override it.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("./"))
}

pub fn load_app_config_from(config_dir: &Path, local_dir: &Path) -> Result<AppConfig> {
    let global_config_path = config_dir.join(DEFAULT_CONFIG_NAME);
    let mut app_config = AppConfig::default();

    if global_config_path.exists() {
        app_config = read_config(&global_config_path)?;
    }

    let local_config_path = local_dir.join(DEFAULT_CONFIG_NAME);
    if local_config_path.exists() {
        app_config.merge(read_config(&local_config_path)?);
    }

    Ok(app_config)
}
