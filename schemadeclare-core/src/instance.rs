// Type-erased controller instances

use crate::Controller;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A controller instance as handed to handlers
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Runtime description of a controller type
#[derive(Clone, Copy)]
pub struct ControllerType {
    type_id: TypeId,
    type_name: &'static str,
    constructor: fn() -> Option<Instance>,
}

fn construct_erased<C: Controller>() -> Option<Instance> {
    C::construct().map(|controller| Arc::new(controller) as Instance)
}

impl ControllerType {
    pub fn of<C: Controller>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            constructor: construct_erased::<C>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build a fresh instance with the type's no-argument constructor
    pub fn construct(&self) -> Option<Instance> {
        (self.constructor)()
    }

    /// Whether an instance is of this controller type
    pub fn matches(&self, instance: &Instance) -> bool {
        (**instance).type_id() == self.type_id
    }
}

impl PartialEq for ControllerType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ControllerType {}

impl fmt::Debug for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerType")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
