pub mod config;
pub mod podman_adapter;
pub mod prompt;
pub mod store;

pub use podman_adapter::PodmanAdapter;
pub use prompt::DialoguerPrompter;
pub use store::FsStore;
