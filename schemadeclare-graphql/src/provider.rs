// Instance provider: where handler-owning instances come from

use crate::{ConstructionError, DispatchError};
use schemadeclare_core::{CapabilityResolver, ControllerType, Instance};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Source of controller instances
///
/// A configured resolver is authoritative: its failures are returned as-is
/// and default construction is never attempted.
#[derive(Clone, Default)]
pub enum InstanceProvider {
    Resolver(Arc<dyn CapabilityResolver>),
    #[default]
    DefaultConstruct,
}

impl InstanceProvider {
    pub fn resolver(resolver: impl CapabilityResolver + 'static) -> Self {
        InstanceProvider::Resolver(Arc::new(resolver))
    }

    /// Resolver when one is configured, default construction otherwise
    pub fn from_optional(resolver: Option<Arc<dyn CapabilityResolver>>) -> Self {
        match resolver {
            Some(resolver) => InstanceProvider::Resolver(resolver),
            None => InstanceProvider::DefaultConstruct,
        }
    }

    /// Obtain an instance of the controller type
    pub fn instance_for(&self, controller: &ControllerType) -> Result<Instance, DispatchError> {
        match self {
            InstanceProvider::Resolver(resolver) => {
                trace!(controller = controller.type_name(), "Resolving controller instance");
                Ok(resolver.resolve(controller)?)
            }
            InstanceProvider::DefaultConstruct => {
                trace!(controller = controller.type_name(), "Constructing controller instance");
                controller.construct().ok_or_else(|| {
                    ConstructionError {
                        type_name: controller.type_name(),
                    }
                    .into()
                })
            }
        }
    }

    pub fn is_resolver(&self) -> bool {
        matches!(self, InstanceProvider::Resolver(_))
    }
}

impl fmt::Debug for InstanceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceProvider::Resolver(_) => f.write_str("InstanceProvider::Resolver"),
            InstanceProvider::DefaultConstruct => f.write_str("InstanceProvider::DefaultConstruct"),
        }
    }
}

impl From<Arc<dyn CapabilityResolver>> for InstanceProvider {
    fn from(resolver: Arc<dyn CapabilityResolver>) -> Self {
        InstanceProvider::Resolver(resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use schemadeclare_core::{Container, Controller, Error, Provider};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILT: AtomicUsize = AtomicUsize::new(0);

    struct Counter {
        serial: usize,
    }

    impl Controller for Counter {
        fn construct() -> Option<Self> {
            Some(Counter {
                serial: BUILT.fetch_add(1, Ordering::SeqCst),
            })
        }
    }

    struct NeedsDatabase;

    impl Controller for NeedsDatabase {}
    impl Provider for NeedsDatabase {}

    struct Failing;

    impl CapabilityResolver for Failing {
        fn resolve(&self, controller: &ControllerType) -> Result<Instance, Error> {
            Err(Error::DependencyInjection(format!(
                "{} is unavailable",
                controller.type_name()
            )))
        }
    }

    #[test]
    fn test_default_construct_builds_new_instance_each_time() {
        let provider = InstanceProvider::default();
        let ty = ControllerType::of::<Counter>();

        let first = provider.instance_for(&ty).unwrap();
        let second = provider.instance_for(&ty).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        let first = first.downcast::<Counter>().unwrap();
        let second = second.downcast::<Counter>().unwrap();
        assert!(second.serial > first.serial);
    }

    #[test]
    fn test_default_construct_without_constructor() {
        let err = InstanceProvider::DefaultConstruct
            .instance_for(&ControllerType::of::<NeedsDatabase>())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Construction);
        assert!(err.to_string().contains("NeedsDatabase"));
    }

    #[test]
    fn test_resolver_is_used() {
        let container = Container::new();
        container.register(NeedsDatabase);

        let provider = InstanceProvider::resolver(container);
        assert!(provider.is_resolver());

        let instance = provider
            .instance_for(&ControllerType::of::<NeedsDatabase>())
            .unwrap();
        assert!(instance.downcast_ref::<NeedsDatabase>().is_some());
    }

    #[test]
    fn test_resolver_failure_does_not_fall_back() {
        let provider = InstanceProvider::resolver(Failing);

        let err = provider
            .instance_for(&ControllerType::of::<Counter>())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(err.to_string().contains("is unavailable"));
    }

    #[test]
    fn test_from_optional() {
        assert!(!InstanceProvider::from_optional(None).is_resolver());

        let resolver: Arc<dyn CapabilityResolver> = Arc::new(Container::new());
        assert!(InstanceProvider::from_optional(Some(resolver)).is_resolver());
    }
}
