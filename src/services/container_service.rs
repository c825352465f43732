use crate::domain::{Container, ContainerRuntime, ContainerSpec, ContainerState};
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn get_status(&self, name: &str) -> Result<Container> {
        self.runtime.get_container(name)
    }

    /// Starts the container unless it is already running.
    /// Returns `true` when a start was issued.
    pub fn ensure_running(&self, name: &str) -> Result<bool> {
        let container = self.runtime.get_container(name)?;

        match container.state {
            ContainerState::Running => {
                debug!("{name} já está rodando");
                Ok(false)
            }
            ContainerState::Stopped => {
                info!(" Iniciando {name}...");
                self.runtime.start_container(name)?;
                Ok(true)
            }
            ContainerState::NotCreated => {
                bail!("Container {name} não existe")
            }
        }
    }

    pub fn create(&self, spec: &ContainerSpec) -> Result<()> {
        info!(" Criando {} ({})...", spec.name, spec.image);
        self.runtime.create_container(spec)
    }

    pub fn recreate(&self, spec: &ContainerSpec) -> Result<()> {
        self.remove(spec.name)?;
        self.create(spec)
    }

    /// Removes the container; absent containers are not an error.
    pub fn remove(&self, name: &str) -> Result<()> {
        info!(" Removendo {name}...");
        self.runtime.remove_container(name)
    }
}
