use crate::infra::config::load_app_config;
use crate::infra::{DialoguerPrompter, FsStore, PodmanAdapter};
use crate::services::{ContainerService, MailService, StartOutcome};
use anyhow::Result;
use clap::Subcommand;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MailCommand {
    /// Lista os serviços de e-mail registrados
    #[command(name = "mail:ls")]
    Ls,
    /// Registra um novo serviço de e-mail
    #[command(name = "mail:create")]
    Create {
        name: Option<String>,
        /// maildev ou mailhog
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Imagem a usar no lugar da padrão do tipo
        #[arg(short = 'i', long)]
        image: Option<String>,
        /// Tag da imagem (padrão: latest)
        #[arg(short = 'I', long)]
        image_version: Option<String>,
    },
    /// Altera tipo ou imagem de um serviço (padrão se nenhum nome for dado)
    #[command(name = "mail:upgrade")]
    Upgrade {
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short = 'i', long)]
        image: Option<String>,
        #[arg(short = 'I', long)]
        image_version: Option<String>,
    },
    /// Remove o container e o registro de um serviço
    #[command(name = "mail:destroy")]
    Destroy {
        name: String,
        /// Permite remover o serviço padrão
        #[arg(short, long)]
        force: bool,
        /// Não pede confirmação
        #[arg(short, long)]
        yes: bool,
    },
    /// Sobe o container do serviço
    #[command(name = "mail:start")]
    Start {
        name: Option<String>,
        /// Recria o container antes de iniciar
        #[arg(short, long)]
        restart: bool,
    },
    /// Remove o container do serviço
    #[command(name = "mail:stop")]
    Stop { name: Option<String> },
    /// Mostra ou define o serviço padrão
    #[command(name = "mail:use")]
    Use { name: Option<String> },
}

/// Wires the mail service to podman, the JSON registry and terminal prompts.
pub fn build_service(config_dir: &Path) -> Result<MailService> {
    let app_config = load_app_config(config_dir)?;
    let data_dir = app_config.data_dir(config_dir);
    debug!(
        "registro em {:?}, engine {}",
        data_dir,
        app_config.engine_binary()
    );

    let runtime = Arc::new(PodmanAdapter::with_binary(app_config.engine_binary()));
    let containers = Arc::new(ContainerService::new(runtime));
    let store = Arc::new(FsStore::new(data_dir));

    Ok(MailService::new(
        containers,
        store,
        Arc::new(DialoguerPrompter::new()),
    ))
}

/// Runs one command, returning the text to print, if any.
pub fn execute(cmd: MailCommand, service: &mut MailService) -> Result<Option<String>> {
    match cmd {
        MailCommand::Ls => service.list().map(Some),
        MailCommand::Create {
            name,
            kind,
            image,
            image_version,
        } => {
            service.create(
                name.as_deref(),
                kind.as_deref(),
                image.as_deref(),
                image_version.as_deref(),
            )?;
            Ok(None)
        }
        MailCommand::Upgrade {
            name,
            kind,
            image,
            image_version,
        } => {
            service.upgrade(
                name.as_deref(),
                kind.as_deref(),
                image.as_deref(),
                image_version.as_deref(),
            )?;
            Ok(None)
        }
        MailCommand::Destroy { name, force, yes } => {
            service.destroy(&name, force, yes)?;
            Ok(None)
        }
        MailCommand::Start { name, restart } => match service.start(name.as_deref(), restart)? {
            StartOutcome::Started(container) => Ok(Some(format!("Iniciado em {container}"))),
            StartOutcome::AlreadyRunning(_) => Ok(None),
        },
        MailCommand::Stop { name } => {
            service.stop(name.as_deref())?;
            Ok(None)
        }
        MailCommand::Use { name } => service.select_default(name.as_deref()),
    }
}

pub fn run(cmd: MailCommand, config_dir: &Path) -> Result<()> {
    let mut service = build_service(config_dir)?;

    if let Some(output) = execute(cmd, &mut service)? {
        println!("{output}");
    }

    Ok(())
}
