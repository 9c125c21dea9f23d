// Resolver generation and invocation

use crate::{
    ArgumentBag, ArgumentCoercion, BoundArguments, DispatchError, FieldDescriptor, GraphQLConfig,
    Handler, InstanceProvider, NamingPolicy, ParameterBinder,
};
use async_graphql::Value;
use futures::future::{self, BoxFuture, FutureExt};
use schemadeclare_core::Instance;
use std::sync::Arc;
use tracing::debug;

/// Produces one resolver per field descriptor
#[derive(Debug, Clone, Default)]
pub struct ResolverGenerator {
    provider: InstanceProvider,
    binder: ParameterBinder,
}

impl ResolverGenerator {
    pub fn new(provider: InstanceProvider) -> Self {
        Self {
            provider,
            binder: ParameterBinder::default(),
        }
    }

    /// Generator configured from the `graphql` configuration section
    pub fn from_config(provider: InstanceProvider, config: &GraphQLConfig) -> Self {
        Self::new(provider).with_naming(config.naming.policy())
    }

    pub fn with_naming(mut self, naming: Arc<dyn NamingPolicy>) -> Self {
        self.binder = self.binder.with_naming(naming);
        self
    }

    pub fn with_coercion(mut self, coercion: Arc<dyn ArgumentCoercion>) -> Self {
        self.binder = self.binder.with_coercion(coercion);
        self
    }

    pub fn with_binder(mut self, binder: ParameterBinder) -> Self {
        self.binder = binder;
        self
    }

    pub fn binder(&self) -> &ParameterBinder {
        &self.binder
    }

    pub fn provider(&self) -> &InstanceProvider {
        &self.provider
    }

    /// Generate the resolver for a field
    ///
    /// The resolver variant follows the handler variant and is fixed here.
    pub fn generate(&self, field: Arc<FieldDescriptor>) -> FieldResolver {
        debug!(
            field = field.name(),
            controller = field.controller().type_name(),
            params = field.params().len(),
            is_async = field.is_async(),
            "Generating resolver"
        );

        let dispatch = Dispatch {
            field,
            provider: self.provider.clone(),
            binder: self.binder.clone(),
        };

        match dispatch.field.handler() {
            Handler::Synchronous(_) => FieldResolver::Synchronous(SyncResolver { dispatch }),
            Handler::Asynchronous(_) => FieldResolver::Asynchronous(AsyncResolver { dispatch }),
        }
    }
}

#[derive(Debug, Clone)]
struct Dispatch {
    field: Arc<FieldDescriptor>,
    provider: InstanceProvider,
    binder: ParameterBinder,
}

impl Dispatch {
    fn prepare(
        &self,
        bag: Option<&ArgumentBag>,
    ) -> Result<(Instance, BoundArguments), DispatchError> {
        let instance = self.provider.instance_for(self.field.controller())?;
        let args = self.binder.bind_field(&self.field, bag)?;
        Ok((instance, args))
    }
}

/// Resolver for a handler that completes before returning
#[derive(Debug, Clone)]
pub struct SyncResolver {
    dispatch: Dispatch,
}

impl SyncResolver {
    pub fn call(&self, bag: Option<&ArgumentBag>) -> Result<Value, DispatchError> {
        let (instance, args) = self.dispatch.prepare(bag)?;
        match self.dispatch.field.handler() {
            Handler::Synchronous(handler) => handler(&instance, &args),
            Handler::Asynchronous(_) => Err(variant_mismatch(&self.dispatch.field)),
        }
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.dispatch.field
    }
}

/// Resolver for a handler that returns a future
///
/// Instance lookup and binding happen when `call` is made; the returned
/// future is the handler's own.
#[derive(Debug, Clone)]
pub struct AsyncResolver {
    dispatch: Dispatch,
}

impl AsyncResolver {
    pub fn call(
        &self,
        bag: Option<&ArgumentBag>,
    ) -> BoxFuture<'static, Result<Value, DispatchError>> {
        let (instance, args) = match self.dispatch.prepare(bag) {
            Ok(prepared) => prepared,
            Err(err) => return future::ready(Err(err)).boxed(),
        };

        match self.dispatch.field.handler() {
            Handler::Asynchronous(handler) => handler(instance, args),
            Handler::Synchronous(_) => {
                future::ready(Err(variant_mismatch(&self.dispatch.field))).boxed()
            }
        }
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.dispatch.field
    }
}

// Unreachable through `generate`, which picks the variant from the handler.
fn variant_mismatch(field: &FieldDescriptor) -> DispatchError {
    DispatchError::Resolution(schemadeclare_core::Error::Internal(format!(
        "Resolver variant does not match handler of field {}",
        field.name()
    )))
}

/// A generated resolver
#[derive(Debug, Clone)]
pub enum FieldResolver {
    Synchronous(SyncResolver),
    Asynchronous(AsyncResolver),
}

impl FieldResolver {
    /// Invoke the resolver regardless of its variant
    pub async fn resolve(&self, bag: Option<&ArgumentBag>) -> Result<Value, DispatchError> {
        match self {
            FieldResolver::Synchronous(resolver) => resolver.call(bag),
            FieldResolver::Asynchronous(resolver) => resolver.call(bag).await,
        }
    }

    pub fn field(&self) -> &FieldDescriptor {
        match self {
            FieldResolver::Synchronous(resolver) => resolver.field(),
            FieldResolver::Asynchronous(resolver) => resolver.field(),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, FieldResolver::Asynchronous(_))
    }
}
