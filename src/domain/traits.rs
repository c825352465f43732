use super::{Container, ContainerSpec};
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Get the current state of a container (`NotCreated` when absent)
    fn get_container(&self, name: &str) -> Result<Container>;

    /// Create a new container from a spec
    fn create_container(&self, spec: &ContainerSpec) -> Result<()>;

    /// Start an existing container
    fn start_container(&self, name: &str) -> Result<()>;

    /// Remove a container; succeeds when it does not exist
    fn remove_container(&self, name: &str) -> Result<()>;
}

/// Key-value document store rooted at a directory.
///
/// Paths are relative to the store root; `""` is the root itself.
pub trait ConfigStore: Send + Sync + Debug {
    fn exists(&self, path: &str) -> bool;

    fn read_json(&self, path: &str) -> Result<Value>;

    fn write_json(&self, path: &str, value: &Value) -> Result<()>;

    fn ensure_dir(&self, path: &str) -> Result<()>;
}

/// Validation callback for free text prompts. `Err` carries the message
/// shown before asking again.
pub type TextValidator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Interactive prompting primitives
pub trait Prompter: Send + Sync {
    /// Ask for a line of text until `validate` accepts it
    fn text(&self, message: &str, validate: TextValidator<'_>) -> Result<String>;

    /// Pick one of `options`, returning its index
    fn select(&self, message: &str, options: &[&str]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}
