// Parameter binding: argument bag -> ordered handler arguments

use crate::{
    ArgumentBag, ArgumentCoercion, BindingError, FieldDescriptor, InputCoercion, LowerCamelCase,
    NamingPolicy, ParameterDescriptor,
};
use async_graphql::{InputType, Pos, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Handler arguments in parameter declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: Vec<Value>,
}

impl BoundArguments {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at a position
    pub fn raw(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Parse the value at a position as `T`
    ///
    /// Null (or an out-of-range position) parses only into `Option<_>`.
    pub fn get<T: InputType>(&self, index: usize) -> Result<T, BindingError> {
        T::parse(self.values.get(index).cloned()).map_err(|err| {
            BindingError::new(
                format!("#{index}"),
                T::type_name(),
                err.into_server_error(Pos::default()).message,
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for BoundArguments {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// Binds argument bags to handler parameters
#[derive(Clone)]
pub struct ParameterBinder {
    naming: Arc<dyn NamingPolicy>,
    coercion: Arc<dyn ArgumentCoercion>,
}

impl ParameterBinder {
    pub fn new(naming: Arc<dyn NamingPolicy>, coercion: Arc<dyn ArgumentCoercion>) -> Self {
        Self { naming, coercion }
    }

    pub fn with_naming(mut self, naming: Arc<dyn NamingPolicy>) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_coercion(mut self, coercion: Arc<dyn ArgumentCoercion>) -> Self {
        self.coercion = coercion;
        self
    }

    /// Caller-facing name of a parameter
    pub fn argument_name(&self, param: &ParameterDescriptor) -> String {
        self.naming.argument_name(param.name())
    }

    /// Bind one parameter
    ///
    /// Without a bag the declared default is used, or null when there is none.
    /// With a bag the caller-facing name is looked up: an unset entry binds
    /// null, anything else goes through coercion.
    pub fn bind(
        &self,
        param: &ParameterDescriptor,
        bag: Option<&ArgumentBag>,
    ) -> Result<Value, BindingError> {
        let Some(bag) = bag else {
            return Ok(param.default_value().cloned().unwrap_or(Value::Null));
        };

        let name = self.argument_name(param);
        if bag.is_unset(&name) {
            return Ok(Value::Null);
        }

        self.coercion.coerce(bag, &name, param.ty())
    }

    /// Bind every parameter, in declaration order
    pub fn bind_all(
        &self,
        params: &[ParameterDescriptor],
        bag: Option<&ArgumentBag>,
    ) -> Result<BoundArguments, BindingError> {
        params
            .iter()
            .map(|param| self.bind(param, bag))
            .collect::<Result<Vec<_>, _>>()
            .map(BoundArguments::from)
    }

    /// Build the argument list for a field
    pub fn bind_field(
        &self,
        field: &FieldDescriptor,
        bag: Option<&ArgumentBag>,
    ) -> Result<BoundArguments, BindingError> {
        trace!(
            field = field.name(),
            params = field.params().len(),
            absent = bag.is_none(),
            "Binding arguments"
        );
        self.bind_all(field.params(), bag)
    }
}

impl fmt::Debug for ParameterBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBinder").finish_non_exhaustive()
    }
}

impl Default for ParameterBinder {
    fn default() -> Self {
        Self::new(Arc::new(LowerCamelCase), Arc::new(InputCoercion))
    }
}
