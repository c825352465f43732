pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    ConfigStore, ContainerRuntime, MailError, Prompter, Registry, ServiceDefinition, ServiceKind,
};
pub use infra::{DialoguerPrompter, FsStore, PodmanAdapter};
pub use services::{ContainerService, MailService, StartOutcome};
