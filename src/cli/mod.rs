pub mod mail;

pub use mail::{MailCommand, build_service, execute, run};
