// Error taxonomy for resolver dispatch

use thiserror::Error;

/// Failure raised by a handler, kept as the handler's own error value
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// An argument could not be coerced to its parameter's declared type
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value for argument \"{argument}\", expected {expected}: {message}")]
pub struct BindingError {
    pub argument: String,
    pub expected: String,
    pub message: String,
}

impl BindingError {
    pub fn new(
        argument: impl Into<String>,
        expected: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self {
            argument: argument.into(),
            expected: expected.to_string(),
            message: message.into(),
        }
    }
}

/// Default construction was required but the controller has no constructor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot construct {type_name}: it has no no-argument constructor")]
pub struct ConstructionError {
    pub type_name: &'static str,
}

/// Everything a generated resolver can fail with
///
/// Each variant carries the originating error untouched.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Resolution(#[from] schemadeclare_core::Error),

    #[error("{0}")]
    Handler(HandlerError),
}

/// Discriminant of [`DispatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Binding,
    Construction,
    Resolution,
    Handler,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Binding(_) => ErrorKind::Binding,
            DispatchError::Construction(_) => ErrorKind::Construction,
            DispatchError::Resolution(_) => ErrorKind::Resolution,
            DispatchError::Handler(_) => ErrorKind::Handler,
        }
    }

    /// The handler's error, if it is of type `E`
    pub fn handler_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            DispatchError::Handler(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Take back the handler's error
    pub fn into_handler_error(self) -> Result<HandlerError, Self> {
        match self {
            DispatchError::Handler(err) => Ok(err),
            other => Err(other),
        }
    }
}

/// Failures while declaring a schema
#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error("Root type {0} declares no fields")]
    EmptyRoot(String),

    #[error("Field {type_name}.{field} is declared twice")]
    DuplicateField { type_name: String, field: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(#[from] schemadeclare_config::ConfigError),
}
