#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    NotCreated,
}

#[derive(Debug, Clone)]
pub struct Container {
    pub state: ContainerState,
}

impl Container {
    pub fn new(state: ContainerState) -> Self {
        Self { state }
    }

    pub fn exists(&self) -> bool {
        self.state != ContainerState::NotCreated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    Always,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContainerSpec<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub restart: RestartPolicy,
    pub env: &'a [String],
}
