// Error types for schemadeclare core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Dependency injection error: {0}")]
    DependencyInjection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error means the requested type has no registration
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProviderNotFound(_))
    }
}
