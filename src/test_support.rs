use crate::domain::{
    Container, ContainerRuntime, ContainerSpec, ContainerState, Prompter, RestartPolicy,
    TextValidator,
};
use anyhow::{Result, bail};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct MockContainer {
    pub name: String,
    pub state: ContainerState,
    pub spec: Option<MockContainerSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockContainerSpec {
    pub image: String,
    pub restart: RestartPolicy,
    pub env: Vec<String>,
}

#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<HashMap<String, MockContainer>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    pub fn add_container(&self, name: &str, state: ContainerState) {
        self.containers.write().unwrap().insert(
            name.to_string(),
            MockContainer {
                name: name.to_string(),
                state,
                spec: None,
            },
        );
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn container_exists(&self, name: &str) -> bool {
        self.containers.read().unwrap().contains_key(name)
    }

    pub fn get_state(&self, name: &str) -> Option<ContainerState> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.state.clone())
    }

    /// Spec the container was last created with
    pub fn get_spec(&self, name: &str) -> Option<MockContainerSpec> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .and_then(|c| c.spec.clone())
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn get_container(&self, name: &str) -> Result<Container> {
        self.record_command(&format!("get_container:{}", name));
        self.check_fail("get_container")?;

        let state = self
            .get_state(name)
            .unwrap_or(ContainerState::NotCreated);

        Ok(Container::new(state))
    }

    fn create_container(&self, spec: &ContainerSpec) -> Result<()> {
        self.record_command(&format!("create:{}", spec.name));
        self.check_fail("create")?;

        self.containers.write().unwrap().insert(
            spec.name.to_string(),
            MockContainer {
                name: spec.name.to_string(),
                state: ContainerState::Stopped,
                spec: Some(MockContainerSpec {
                    image: spec.image.to_string(),
                    restart: spec.restart,
                    env: spec.env.to_vec(),
                }),
            },
        );
        Ok(())
    }

    fn start_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("start:{}", name));
        self.check_fail("start")?;

        if let Some(container) = self.containers.write().unwrap().get_mut(name) {
            container.state = ContainerState::Running;
        }
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("remove:{}", name));
        self.check_fail("remove")?;

        self.containers.write().unwrap().remove(name);
        Ok(())
    }
}

/// Scripted answers for interactive prompts.
///
/// Text answers rejected by the validator are consumed and recorded, the
/// same way a user would be asked again.
#[derive(Debug, Default)]
pub struct MockPrompter {
    texts: RwLock<VecDeque<String>>,
    selections: RwLock<VecDeque<usize>>,
    confirms: RwLock<VecDeque<bool>>,
    prompts: RwLock<Vec<String>>,
    rejections: RwLock<Vec<String>>,
}

impl MockPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, answer: &str) {
        self.texts.write().unwrap().push_back(answer.to_string());
    }

    pub fn push_selection(&self, index: usize) {
        self.selections.write().unwrap().push_back(index);
    }

    pub fn push_confirm(&self, answer: bool) {
        self.confirms.write().unwrap().push_back(answer);
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    pub fn get_rejections(&self) -> Vec<String> {
        self.rejections.read().unwrap().clone()
    }

    fn record_prompt(&self, prompt: &str) {
        self.prompts.write().unwrap().push(prompt.to_string());
    }
}

impl Prompter for MockPrompter {
    fn text(&self, message: &str, validate: TextValidator<'_>) -> Result<String> {
        self.record_prompt(&format!("text:{}", message));

        loop {
            let Some(answer) = self.texts.write().unwrap().pop_front() else {
                bail!("Mock sem resposta para: {}", message);
            };

            match validate(answer.as_str()) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.rejections.write().unwrap().push(reason),
            }
        }
    }

    fn select(&self, message: &str, options: &[&str]) -> Result<usize> {
        self.record_prompt(&format!("select:{}", message));

        match self.selections.write().unwrap().pop_front() {
            Some(index) if index < options.len() => Ok(index),
            Some(index) => bail!("Mock seleção fora do intervalo: {}", index),
            None => bail!("Mock sem resposta para: {}", message),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        self.record_prompt(&format!("confirm:{}", message));

        match self.confirms.write().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("Mock sem resposta para: {}", message),
        }
    }
}
