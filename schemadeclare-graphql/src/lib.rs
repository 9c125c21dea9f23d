// Argument-bound GraphQL resolver dispatch
//
// Controllers own handler functions; each handler is described by a
// `FieldDescriptor`. A `ResolverGenerator` turns descriptors into resolvers that
// obtain a controller instance, bind the caller's arguments to the handler's
// parameters and invoke it. `SchemaDeclaration` mounts the resolvers into an
// async-graphql dynamic schema.

pub mod arguments;
pub mod binder;
pub mod coercion;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod provider;
pub mod resolver;
pub mod schema_builder;

pub use async_graphql;
pub use async_graphql::dynamic::TypeRef;
pub use async_graphql::Value;

pub use arguments::*;
pub use binder::*;
pub use coercion::*;
pub use config::*;
pub use descriptor::*;
pub use error::*;
pub use naming::*;
pub use provider::*;
pub use resolver::*;
pub use schema_builder::*;

pub use schemadeclare_core::{CapabilityResolver, Container, Controller, ControllerType, Instance};

use serde::Serialize;

/// GraphQL request handling
#[derive(Debug, Clone)]
pub struct GraphQLRequest {
    pub query: String,
    pub variables: Option<serde_json::Value>,
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_operation(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }
}

/// GraphQL response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQLResponse {
    pub data: Option<serde_json::Value>,
    pub errors: Vec<String>,
}

impl GraphQLResponse {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for GraphQLResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("data", &self.data)?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        map.end()
    }
}
