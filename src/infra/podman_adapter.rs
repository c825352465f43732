use crate::domain::{Container, ContainerRuntime, ContainerSpec, ContainerState};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

pub const DEFAULT_ENGINE: &str = "podman";

/// Container engine driven through its CLI (`podman`, or `docker` with the same flags).
#[derive(Debug, Clone)]
pub struct PodmanAdapter {
    binary: String,
}

impl PodmanAdapter {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_ENGINE)
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    fn run<I, S>(&self, args: I, context: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self.status(args, context)?;
        ensure_success(&self.binary, status, context)
    }

    fn status<I, S>(&self, args: I, context: &str) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command()
            .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
            .stdout(Stdio::null())
            .status()
            .with_context(|| context.to_string())
    }

    fn container_exists(&self, name: &str) -> Result<bool> {
        let status = self
            .command()
            .args(["container", "inspect", name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("checando existência do container {name}"))?;

        Ok(status.success())
    }

    fn container_running(&self, name: &str) -> Result<bool> {
        let output = self
            .command()
            .args([
                "container",
                "inspect",
                name,
                "--format",
                "{{.State.Running}}",
            ])
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("checando estado do container {name}"))?;

        if !output.status.success() {
            return Ok(false);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim() == "true")
    }
}

impl Default for PodmanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for PodmanAdapter {
    fn get_container(&self, name: &str) -> Result<Container> {
        let state = if !self.container_exists(name)? {
            ContainerState::NotCreated
        } else if self.container_running(name)? {
            ContainerState::Running
        } else {
            ContainerState::Stopped
        };

        debug!("container {name}: {state:?}");
        Ok(Container::new(state))
    }

    fn create_container(&self, spec: &ContainerSpec) -> Result<()> {
        self.run(
            create_args(spec),
            &format!("criando container {}", spec.name),
        )
    }

    fn start_container(&self, name: &str) -> Result<()> {
        self.run(["start", name], &format!("iniciando container {name}"))
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        if !self.container_exists(name)? {
            debug!("container {name} não existe, nada a remover");
            return Ok(());
        }

        self.run(["rm", "-f", name], &format!("removendo container {name}"))
    }
}

fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "create".into(),
        "--name".into(),
        spec.name.into(),
        "--restart".into(),
        spec.restart.as_str().into(),
    ];

    for env in spec.env {
        args.push("-e".into());
        args.push(env.clone());
    }

    args.push(spec.image.into());
    args
}

fn ensure_success(binary: &str, status: ExitStatus, context: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    bail!("{binary} retornou status {:?} ({context})", status)
}
