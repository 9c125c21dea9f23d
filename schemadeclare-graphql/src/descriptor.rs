// Field and parameter descriptors

use crate::{BoundArguments, DispatchError, HandlerError};
use async_graphql::Value;
use async_graphql::dynamic::TypeRef;
use futures::future::{self, BoxFuture, FutureExt};
use schemadeclare_core::{Controller, ControllerType, Instance};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

pub type SyncHandlerFn =
    dyn Fn(&Instance, &BoundArguments) -> Result<Value, DispatchError> + Send + Sync;

pub type AsyncHandlerFn = dyn Fn(Instance, BoundArguments) -> BoxFuture<'static, Result<Value, DispatchError>>
    + Send
    + Sync;

/// A handler with its synchrony fixed at declaration
#[derive(Clone)]
pub enum Handler {
    Synchronous(Arc<SyncHandlerFn>),
    Asynchronous(Arc<AsyncHandlerFn>),
}

impl Handler {
    pub fn is_async(&self) -> bool {
        matches!(self, Handler::Asynchronous(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Synchronous(_) => f.write_str("Handler::Synchronous"),
            Handler::Asynchronous(_) => f.write_str("Handler::Asynchronous"),
        }
    }
}

fn instance_mismatch<C>() -> DispatchError {
    DispatchError::Resolution(schemadeclare_core::Error::DependencyInjection(format!(
        "Resolved instance is not a {}",
        std::any::type_name::<C>()
    )))
}

/// One handler parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    name: String,
    ty: TypeRef,
    default: Option<Value>,
    description: Option<String>,
}

impl ParameterDescriptor {
    /// A parameter without a default value
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            description: None,
        }
    }

    /// Declare a default; `Value::Null` is a valid default distinct from none
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Handler-side spelling of the name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One invokable field backed by a controller handler
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    description: Option<String>,
    controller: ControllerType,
    params: Vec<ParameterDescriptor>,
    output: TypeRef,
    handler: Handler,
}

impl FieldDescriptor {
    /// Declare a field whose handler completes on the caller's task
    ///
    /// ```
    /// use schemadeclare_graphql::async_graphql::dynamic::TypeRef;
    /// use schemadeclare_graphql::{
    ///     BoundArguments, Controller, FieldDescriptor, HandlerError, ParameterDescriptor,
    /// };
    ///
    /// #[derive(Default)]
    /// struct Calculator;
    ///
    /// impl Controller for Calculator {
    ///     fn construct() -> Option<Self> {
    ///         Some(Calculator)
    ///     }
    /// }
    ///
    /// let add = FieldDescriptor::synchronous(
    ///     "add",
    ///     TypeRef::named_nn(TypeRef::INT),
    ///     |_: &Calculator, args: &BoundArguments| -> Result<i32, HandlerError> {
    ///         Ok(args.get::<i32>(0)? + args.get::<i32>(1)?)
    ///     },
    /// )
    /// .param(ParameterDescriptor::new("A", TypeRef::named_nn(TypeRef::INT)))
    /// .param(ParameterDescriptor::new("B", TypeRef::named_nn(TypeRef::INT)));
    ///
    /// assert!(!add.is_async());
    /// assert_eq!(add.params().len(), 2);
    /// ```
    pub fn synchronous<C, F, R, E>(
        name: impl Into<String>,
        output: impl Into<TypeRef>,
        handler: F,
    ) -> Self
    where
        C: Controller,
        F: Fn(&C, &BoundArguments) -> Result<R, E> + Send + Sync + 'static,
        R: Into<Value> + 'static,
        E: Into<HandlerError> + 'static,
    {
        let handler =
            move |instance: &Instance, args: &BoundArguments| -> Result<Value, DispatchError> {
                let controller = instance
                    .downcast_ref::<C>()
                    .ok_or_else(instance_mismatch::<C>)?;
                handler(controller, args)
                    .map(Into::<Value>::into)
                    .map_err(|err| DispatchError::Handler(err.into()))
            };

        Self::with_handler(
            name,
            ControllerType::of::<C>(),
            output,
            Handler::Synchronous(Arc::new(handler)),
        )
    }

    /// Declare a field whose handler returns a future
    pub fn asynchronous<C, F, Fut, R, E>(
        name: impl Into<String>,
        output: impl Into<TypeRef>,
        handler: F,
    ) -> Self
    where
        C: Controller,
        F: Fn(Arc<C>, BoundArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Into<Value> + 'static,
        E: Into<HandlerError> + 'static,
    {
        let handler = move |instance: Instance,
                            args: BoundArguments|
                            -> BoxFuture<'static, Result<Value, DispatchError>> {
            match instance.downcast::<C>() {
                Ok(controller) => handler(controller, args)
                    .map(|result| {
                        result
                            .map(Into::<Value>::into)
                            .map_err(|err| DispatchError::Handler(err.into()))
                    })
                    .boxed(),
                Err(_) => future::ready(Err(instance_mismatch::<C>())).boxed(),
            }
        };

        Self::with_handler(
            name,
            ControllerType::of::<C>(),
            output,
            Handler::Asynchronous(Arc::new(handler)),
        )
    }

    /// Declare a field from an already type-erased handler
    pub fn with_handler(
        name: impl Into<String>,
        controller: ControllerType,
        output: impl Into<TypeRef>,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            controller,
            params: Vec::new(),
            output: output.into(),
            handler,
        }
    }

    /// Append a parameter; declaration order is invocation order
    pub fn param(mut self, param: ParameterDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn controller(&self) -> &ControllerType {
        &self.controller
    }

    pub fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    pub fn output(&self) -> &TypeRef {
        &self.output
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn is_async(&self) -> bool {
        self.handler.is_async()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Library;

    impl Controller for Library {
        fn construct() -> Option<Self> {
            Some(Library)
        }
    }

    impl Library {
        fn title(&self, id: i32) -> String {
            format!("book-{id}")
        }
    }

    struct Other;

    impl Controller for Other {}

    fn title_field() -> FieldDescriptor {
        FieldDescriptor::synchronous(
            "title",
            TypeRef::named_nn(TypeRef::STRING),
            |library: &Library, args: &BoundArguments| -> Result<String, HandlerError> {
                Ok(library.title(args.get::<i32>(0)?))
            },
        )
        .param(ParameterDescriptor::new("Id", TypeRef::named_nn(TypeRef::INT)))
        .description("Book title")
    }

    #[test]
    fn test_descriptor_accessors() {
        let field = title_field();
        assert_eq!(field.name(), "title");
        assert_eq!(field.get_description(), Some("Book title"));
        assert_eq!(field.controller(), &ControllerType::of::<Library>());
        assert_eq!(field.params()[0].name(), "Id");
        assert_eq!(field.output(), &TypeRef::named_nn(TypeRef::STRING));
        assert!(!field.is_async());
    }

    #[test]
    fn test_parameter_default_sentinel() {
        let none = ParameterDescriptor::new("Limit", TypeRef::named(TypeRef::INT));
        let null = none.clone().with_default(Value::Null);
        let ten = none.clone().with_default(10);

        assert_eq!(none.default_value(), None);
        assert_eq!(null.default_value(), Some(&Value::Null));
        assert_eq!(ten.default_value(), Some(&Value::from(10)));
    }

    #[test]
    fn test_sync_handler_invocation() {
        let field = title_field();
        let Handler::Synchronous(handler) = field.handler() else {
            panic!("expected a synchronous handler");
        };

        let instance: Instance = Arc::new(Library);
        let args = BoundArguments::from(vec![Value::from(3)]);
        assert_eq!(handler(&instance, &args).unwrap(), Value::from("book-3"));
    }

    #[test]
    fn test_wrong_instance_type() {
        let field = title_field();
        let Handler::Synchronous(handler) = field.handler() else {
            panic!("expected a synchronous handler");
        };

        let instance: Instance = Arc::new(Other);
        let err = handler(&instance, &BoundArguments::from(vec![Value::from(1)])).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Resolution);
    }

    #[tokio::test]
    async fn test_async_handler_invocation() {
        let field = FieldDescriptor::asynchronous(
            "slowTitle",
            TypeRef::named_nn(TypeRef::STRING),
            |library: Arc<Library>, args: BoundArguments| async move {
                tokio::task::yield_now().await;
                Ok::<_, HandlerError>(library.title(args.get::<i32>(0)?))
            },
        );
        assert!(field.is_async());

        let Handler::Asynchronous(handler) = field.handler() else {
            panic!("expected an asynchronous handler");
        };
        let value = handler(Arc::new(Library), BoundArguments::from(vec![Value::from(9)]))
            .await
            .unwrap();
        assert_eq!(value, Value::from("book-9"));
    }
}
