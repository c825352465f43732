mod container;
pub mod error;
pub mod registry;
pub mod service;
pub mod traits;

pub use container::{Container, ContainerSpec, ContainerState, RestartPolicy};
pub use error::MailError;
pub use registry::{REGISTRY_FILE, Registry};
pub use service::{CONTAINER_SUFFIX, KindProfile, ServiceDefinition, ServiceKind};
pub use traits::{ConfigStore, ContainerRuntime, Prompter, TextValidator};
