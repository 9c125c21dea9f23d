// schemadeclare - declare GraphQL fields from controller handlers
//
// Handlers live on controllers. Each one is described once (name, parameters,
// output type) and served through a generated resolver that obtains the
// controller from a DI container, binds caller arguments positionally and
// invokes the handler synchronously or asynchronously.

// Re-export core functionality
pub use schemadeclare_core::*;

// Re-export optional crates
#[cfg(feature = "graphql")]
pub use schemadeclare_graphql;

#[cfg(feature = "config")]
pub use schemadeclare_config;

#[cfg(feature = "config")]
use schemadeclare_config::{ConfigError, ConfigManager};

/// Configuration section holding [`logging::LogConfig`]
pub const LOG_SECTION: &str = "log";

/// Read the `log` section; a missing section yields the defaults
#[cfg(feature = "config")]
pub fn log_config(config: &ConfigManager) -> Result<logging::LogConfig, ConfigError> {
    config.section(LOG_SECTION)
}

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CapabilityResolver, Container, Controller, ControllerType, Error, Instance, Provider,
    };

    pub use crate::logging::{LogConfig, LogFormat, LogLevel, LogOutput};

    #[cfg(feature = "config")]
    pub use schemadeclare_config::{ConfigManager, FileFormat};

    #[cfg(feature = "graphql")]
    pub use schemadeclare_graphql::{
        ArgumentBag, BoundArguments, DeclaredSchema, DispatchError, ErrorKind, FieldDescriptor,
        FieldResolver, GraphQLConfig, GraphQLRequest, GraphQLResponse, HandlerError,
        InstanceProvider, NamingConvention, ParameterDescriptor, ResolverGenerator,
        SchemaDeclaration, TypeRef, Value,
    };
}
