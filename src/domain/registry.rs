use super::{ConfigStore, MailError, ServiceDefinition};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Registry document name inside the store.
pub const REGISTRY_FILE: &str = "config.json";

/// Named mail services plus the one selected as default.
///
/// The registry is plain data; persistence goes through the [`ConfigStore`]
/// handed to [`Registry::load`] and [`Registry::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(default)]
    services: Vec<ServiceDefinition>,
}

impl Registry {
    /// Loads the registry document, returning an empty registry when none exists yet.
    pub fn load(store: &dyn ConfigStore) -> Result<Self> {
        if !store.exists(REGISTRY_FILE) {
            return Ok(Self::default());
        }

        let document = store.read_json(REGISTRY_FILE)?;
        serde_json::from_value(document).with_context(|| format!("parse de {REGISTRY_FILE}"))
    }

    pub fn save(&self, store: &dyn ConfigStore) -> Result<()> {
        if !store.exists("") {
            store.ensure_dir("")?;
        }

        let document = serde_json::to_value(self).context("serializando registro de serviços")?;
        store.write_json(REGISTRY_FILE, &document)
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn is_default(&self, name: &str) -> bool {
        self.default.as_deref() == Some(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.services.iter().any(|svc| svc.name == name)
    }

    pub fn get(&self, name: &str) -> Result<&ServiceDefinition, MailError> {
        self.services
            .iter()
            .find(|svc| svc.name == name)
            .ok_or_else(|| MailError::NotFound(name.to_string()))
    }

    /// Resolves `name`, or the default service when no name is given.
    pub fn get_or_default(&self, name: Option<&str>) -> Result<&ServiceDefinition, MailError> {
        match name {
            Some(name) => self.get(name),
            None => {
                let default = self.default.as_deref().ok_or(MailError::NoDefault)?;
                self.get(default)
            }
        }
    }

    /// Inserts or replaces by name. A newly inserted service becomes the
    /// default when the registry has none.
    pub fn set(&mut self, definition: ServiceDefinition) {
        match self.services.iter_mut().find(|svc| svc.name == definition.name) {
            Some(existing) => *existing = definition,
            None => {
                if self.default.is_none() {
                    self.default = Some(definition.name.clone());
                }
                self.services.push(definition);
            }
        }
    }

    /// Removes `name`; clears the default if it pointed there. No-op when absent.
    pub fn unset(&mut self, name: &str) {
        self.services.retain(|svc| svc.name != name);

        if self.is_default(name) {
            self.default = None;
        }
    }

    pub fn set_default(&mut self, name: &str) -> Result<(), MailError> {
        let name = self.get(name)?.name.clone();
        self.default = Some(name);
        Ok(())
    }
}
