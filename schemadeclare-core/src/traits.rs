// Core traits for schemadeclare

use crate::{ControllerType, Error, Instance};
use std::any::TypeId;

/// Trait for types that can be provided by the DI container
pub trait Provider: Send + Sync + 'static {
    /// Returns the TypeId of the provider
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Trait for types that own resolver handlers
///
/// Handlers are invoked against an instance of the controller. The instance
/// comes from a [`CapabilityResolver`] when one is configured, otherwise from
/// [`Controller::construct`].
///
/// ```
/// use schemadeclare_core::Controller;
///
/// #[derive(Default)]
/// struct MathController;
///
/// impl Controller for MathController {
///     fn construct() -> Option<Self> {
///         Some(Self::default())
///     }
/// }
///
/// assert!(MathController::construct().is_some());
/// ```
pub trait Controller: Send + Sync + 'static {
    /// No-argument constructor; `None` when the type cannot be built without
    /// its dependencies
    fn construct() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// Capability-based instance lookup, e.g. a DI container
pub trait CapabilityResolver: Send + Sync {
    /// Resolve an instance of the given controller type
    fn resolve(&self, controller: &ControllerType) -> Result<Instance, Error>;
}
