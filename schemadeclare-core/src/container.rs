// Dependency injection container

use crate::{CapabilityResolver, ControllerType, Error, Instance, Provider};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// A registration: either one shared instance or a factory run per lookup
#[derive(Clone)]
enum Registration {
    Singleton(Instance),
    Transient(Factory),
}

/// The dependency injection container
#[derive(Clone)]
pub struct Container {
    registrations: Arc<RwLock<HashMap<TypeId, Registration>>>,
}

impl Container {
    pub fn new() -> Self {
        debug!("Creating new DI container");
        Self {
            registrations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a provider instance, shared by every lookup
    pub fn register<T: Provider>(&self, instance: T) {
        let type_name = std::any::type_name::<T>();

        self.registrations
            .write()
            .insert(TypeId::of::<T>(), Registration::Singleton(Arc::new(instance)));

        debug!(provider = type_name, "Provider registered in DI container");
    }

    /// Register a factory; every lookup gets a new instance
    pub fn register_transient<T: Provider, F>(&self, factory: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let factory: Factory = Arc::new(move || Arc::new(factory()) as Instance);

        self.registrations
            .write()
            .insert(TypeId::of::<T>(), Registration::Transient(factory));

        debug!(provider = type_name, "Transient provider registered");
    }

    /// Resolve a provider by type
    pub fn resolve<T: Provider>(&self) -> Result<Arc<T>, Error> {
        let type_name = std::any::type_name::<T>();

        self.resolve_by_id(TypeId::of::<T>(), type_name)?
            .downcast::<T>()
            .map_err(|_| {
                Error::DependencyInjection(format!(
                    "Registered instance is not a {}",
                    type_name
                ))
            })
    }

    /// Resolve a type-erased instance by TypeId
    pub fn resolve_by_id(&self, type_id: TypeId, type_name: &str) -> Result<Instance, Error> {
        trace!(provider = type_name, "Attempting to resolve provider");

        // Clone out of the lock so factories never run while it is held
        let registration = self.registrations.read().get(&type_id).cloned();

        match registration {
            Some(Registration::Singleton(instance)) => {
                debug!(provider = type_name, "Provider resolved successfully");
                Ok(instance)
            }
            Some(Registration::Transient(factory)) => {
                debug!(provider = type_name, "Transient provider constructed");
                Ok(factory())
            }
            None => {
                debug!(provider = type_name, "Provider not found in container");
                Err(Error::ProviderNotFound(type_name.to_string()))
            }
        }
    }

    /// Check if a provider is registered
    pub fn has<T: Provider>(&self) -> bool {
        let exists = self.registrations.read().contains_key(&TypeId::of::<T>());

        trace!(
            provider = std::any::type_name::<T>(),
            exists = exists,
            "Checked provider existence"
        );
        exists
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Clear all providers
    pub fn clear(&self) {
        let mut registrations = self.registrations.write();
        let count = registrations.len();
        registrations.clear();

        debug!(provider_count = count, "Cleared all providers from container");
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityResolver for Container {
    fn resolve(&self, controller: &ControllerType) -> Result<Instance, Error> {
        self.resolve_by_id(controller.type_id(), controller.type_name())
    }
}
