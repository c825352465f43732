use crate::domain::{
    ConfigStore, ContainerSpec, MailError, Prompter, Registry, RestartPolicy, ServiceDefinition,
    ServiceKind,
};
use crate::services::ContainerService;
use crate::services::table::render_table;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

const LIST_HEADERS: [&str; 4] = ["NAME", "TYPE", "CONTAINER", "IMAGE"];

/// Result of [`MailService::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The container was (re)started; holds its name.
    Started(String),
    /// The container was already running; nothing was done.
    AlreadyRunning(String),
}

/// Keeps the mail service registry and the mail containers in line.
///
/// The registry is read from the store on first use and written back after
/// every operation that changes it. Container removal always happens before
/// the registry forgets a service.
pub struct MailService {
    containers: Arc<ContainerService>,
    store: Arc<dyn ConfigStore>,
    prompter: Arc<dyn Prompter>,
    registry: Option<Registry>,
}

impl MailService {
    pub fn new(
        containers: Arc<ContainerService>,
        store: Arc<dyn ConfigStore>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            containers,
            store,
            prompter,
            registry: None,
        }
    }

    /// Registry loaded from the store, read once per instance.
    pub fn registry(&mut self) -> Result<&mut Registry> {
        if self.registry.is_none() {
            debug!("carregando registro de serviços");
            self.registry = Some(Registry::load(self.store.as_ref())?);
        }

        self.registry
            .as_mut()
            .context("registro de serviços não carregado")
    }

    fn save(&mut self) -> Result<()> {
        let store = Arc::clone(&self.store);
        self.registry()?.save(store.as_ref())
    }

    pub fn list(&mut self) -> Result<String> {
        let registry = self.registry()?;

        let rows: Vec<Vec<String>> = registry
            .services()
            .iter()
            .map(|svc| {
                let name = if registry.is_default(&svc.name) {
                    format!("{} (default)", svc.name)
                } else {
                    svc.name.clone()
                };
                let image = svc
                    .image_reference()
                    .unwrap_or_else(|_| "-".to_string());

                vec![name, svc.kind.to_string(), svc.container_name(), image]
            })
            .collect();

        Ok(render_table(&LIST_HEADERS, &rows))
    }

    /// Registers a new service. Missing or clashing names and unknown kinds
    /// are asked for interactively. No container is created here.
    pub fn create(
        &mut self,
        name: Option<&str>,
        kind: Option<&str>,
        image: Option<&str>,
        image_version: Option<&str>,
    ) -> Result<()> {
        let prompter = Arc::clone(&self.prompter);
        let registry = self.registry()?;

        let name = match non_empty(name) {
            Some(name) if !registry.has(&name) => name,
            Some(name) => {
                warn!("  {}", MailError::AlreadyExists(name));
                prompt_name(prompter.as_ref(), registry)?
            }
            None => prompt_name(prompter.as_ref(), registry)?,
        };

        let kind = match kind.map(ServiceKind::parse) {
            Some(Ok(kind)) => kind,
            Some(Err(err)) => {
                warn!("  {err}");
                prompt_kind(prompter.as_ref())?
            }
            None => prompt_kind(prompter.as_ref())?,
        };

        let service = ServiceDefinition::new(name, kind)
            .with_image(non_empty(image), non_empty(image_version));

        info!(" Registrando serviço {} ({})", service.name, service.kind);
        registry.set(service);
        self.save()
    }

    /// Changes kind or image of an existing service. Writes nothing when no
    /// field was given.
    pub fn upgrade(
        &mut self,
        name: Option<&str>,
        kind: Option<&str>,
        image: Option<&str>,
        image_version: Option<&str>,
    ) -> Result<()> {
        let registry = self.registry()?;
        let mut service = registry.get_or_default(name)?.clone();
        let mut changed = false;

        if let Some(kind) = non_empty(kind) {
            service.change_kind(ServiceKind::parse(&kind)?);
            changed = true;
        }

        if let Some(image) = non_empty(image) {
            service.image = Some(image);
            changed = true;
        }

        if let Some(version) = non_empty(image_version) {
            service.image_version = Some(version);
            changed = true;
        }

        if !changed {
            debug!("nada a alterar em {}", service.name);
            return Ok(());
        }

        info!(" Atualizando serviço {}", service.name);
        registry.set(service);
        self.save()
    }

    /// Removes the service's container and then the service itself.
    pub fn destroy(&mut self, name: &str, force: bool, yes: bool) -> Result<()> {
        let prompter = Arc::clone(&self.prompter);
        let registry = self.registry()?;
        let service = registry.get(name)?.clone();

        if !force && registry.is_default(&service.name) {
            return Err(MailError::CannotDestroyDefault(service.name).into());
        }

        if !yes {
            let message = format!(
                "Tem certeza que deseja remover o serviço \"{name}\"? Esta ação não pode ser desfeita e todos os dados serão perdidos."
            );

            if !prompter.confirm(&message, false)? {
                return Err(MailError::Aborted.into());
            }
        }

        self.containers.remove(&service.container_name())?;

        info!(" Removendo serviço {name} do registro");
        self.registry()?.unset(name);
        self.save()
    }

    /// Creates the container on first use (or again with `restart`) and
    /// starts it if it is not running. With no name and no default service,
    /// a first service is created interactively.
    pub fn start(&mut self, name: Option<&str>, restart: bool) -> Result<StartOutcome> {
        if name.is_none() && self.registry()?.default_name().is_none() {
            info!(" Nenhum serviço padrão, criando um novo");
            self.create(None, None, None, None)?;
        }

        let service = self.registry()?.get_or_default(name)?.clone();
        let profile = service.kind.profile()?;
        let image = service.image_reference()?;
        let container_name = service.container_name();
        let env = vec![
            format!("VIRTUAL_HOST={container_name}"),
            format!("VIRTUAL_PORT={}", profile.port),
        ];
        let spec = ContainerSpec {
            name: &container_name,
            image: &image,
            restart: RestartPolicy::Always,
            env: &env,
        };

        let container = self.containers.get_status(&container_name)?;

        if !container.exists() {
            self.containers.create(&spec)?;
        } else if restart {
            self.containers.recreate(&spec)?;
        }

        if self.containers.ensure_running(&container_name)? {
            Ok(StartOutcome::Started(container_name))
        } else {
            Ok(StartOutcome::AlreadyRunning(container_name))
        }
    }

    /// Removes the service's container. The registry is left untouched.
    pub fn stop(&mut self, name: Option<&str>) -> Result<()> {
        let service = self.registry()?.get_or_default(name)?.clone();

        self.containers.remove(&service.container_name())
    }

    /// Without a name, returns the default service's name. With a name,
    /// makes that service the default.
    pub fn select_default(&mut self, name: Option<&str>) -> Result<Option<String>> {
        let Some(name) = name else {
            let service = self.registry()?.get_or_default(None)?;
            return Ok(Some(service.name.clone()));
        };

        self.registry()?.set_default(name)?;
        info!(" Serviço padrão: {name}");
        self.save()?;

        Ok(None)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn prompt_name(prompter: &dyn Prompter, registry: &Registry) -> Result<String> {
    let validate = |value: &str| -> Result<(), String> {
        if value.is_empty() {
            return Err("Nome do serviço é obrigatório".to_string());
        }
        if registry.has(value) {
            return Err(MailError::AlreadyExists(value.to_string()).to_string());
        }
        Ok(())
    };

    prompter.text("Nome do serviço:", &validate)
}

fn prompt_kind(prompter: &dyn Prompter) -> Result<ServiceKind> {
    let kinds = ServiceKind::supported();
    let options: Vec<&str> = kinds.iter().map(ServiceKind::as_str).collect();
    let index = prompter.select("Tipo do serviço:", &options)?;

    kinds
        .into_iter()
        .nth(index)
        .with_context(|| format!("seleção de tipo inválida: {index}"))
}
