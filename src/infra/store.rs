use crate::domain::ConfigStore;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON documents stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl ConfigStore for FsStore {
    fn exists(&self, path: &str) -> bool {
        self.path(path).exists()
    }

    fn read_json(&self, path: &str) -> Result<Value> {
        let path = self.path(path);
        let content = fs::read_to_string(&path).with_context(|| format!("lendo {:?}", path))?;

        serde_json::from_str(&content).with_context(|| format!("parse de {:?}", path))
    }

    fn write_json(&self, path: &str, value: &Value) -> Result<()> {
        let path = self.path(path);
        let mut content = serde_json::to_string_pretty(value)
            .with_context(|| format!("serializando {:?}", path))?;
        content.push('\n');

        fs::write(&path, content).with_context(|| format!("escrevendo {:?}", path))
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        let path = self.path(path);
        fs::create_dir_all(&path).with_context(|| format!("criando {:?}", path))
    }
}
