use thiserror::Error;

/// Errors raised by registry lookups and mail service operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("Serviço \"{0}\" não encontrado")]
    NotFound(String),

    #[error("Nenhum serviço definido como padrão")]
    NoDefault,

    #[error("Tipo de serviço inválido: \"{0}\" (use maildev ou mailhog)")]
    InvalidKind(String),

    #[error("Tipo de serviço não suportado: \"{0}\"")]
    UnsupportedKind(String),

    #[error("Serviço \"{0}\" já existe")]
    AlreadyExists(String),

    #[error("Não é possível destruir o serviço padrão \"{0}\" (use --force)")]
    CannotDestroyDefault(String),

    #[error("Operação abortada")]
    Aborted,
}
