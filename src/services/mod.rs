mod container_service;
mod mail_service;
pub mod table;

pub use container_service::ContainerService;
pub use mail_service::{MailService, StartOutcome};
