//! In-memory reference container.
//!
//! The container is an external collaborator: the registrar
//! works against the [`MutableResolver`] / [`ResolverCore`] seam and any
//! implementation will do. `ServiceLocator` is the crate's own minimal one:
//! enough for composition roots that do not already have a container, and
//! for exercising registration passes end to end.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::resolver::{AnyArc, MutableResolver, ResolverCore, ServiceFactory};

struct RegistrationEntry {
    lifetime: Lifetime,
    factory: ServiceFactory,
    instance: OnceCell<AnyArc>,
}

impl RegistrationEntry {
    fn resolve(&self, locator: &ServiceLocator) -> DiResult<AnyArc> {
        match self.lifetime {
            Lifetime::Singleton => self
                .instance
                .get_or_try_init(|| (self.factory)(locator))
                .map(Arc::clone),
            Lifetime::Transient => (self.factory)(locator),
        }
    }
}

/// Simple (key, contract)-indexed container.
///
/// Registrations append in order and are never deduplicated: single-service
/// resolution returns the most recent registration (last write wins),
/// all-services resolution returns every registration oldest first.
/// Singleton registrations memoize their first successful factory result;
/// transient factories run on every resolution.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{Resolver, ServiceLocator};
///
/// struct Theme {
///     name: &'static str,
/// }
///
/// let mut locator = ServiceLocator::new();
/// locator.register_constant(Theme { name: "light" });
/// locator.register_constant(Theme { name: "dark" });
///
/// // Last registration wins for single-service lookups.
/// assert_eq!(locator.get::<Theme>()?.name, "dark");
/// # Ok::<(), mvvm_conventions::DiError>(())
/// ```
#[derive(Default)]
pub struct ServiceLocator {
    registry: HashMap<ServiceKey, HashMap<Box<str>, Vec<RegistrationEntry>>>,
}

impl ServiceLocator {
    /// Creates an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already-constructed value as a singleton under the
    /// default contract.
    pub fn register_constant<T: Send + Sync + 'static>(&mut self, value: T) {
        self.register_constant_with_contract(value, "");
    }

    /// Registers an already-constructed value as a singleton under `contract`.
    pub fn register_constant_with_contract<T: Send + Sync + 'static>(
        &mut self,
        value: T,
        contract: &str,
    ) {
        let instance: AnyArc = Arc::new(value);
        let factory: ServiceFactory = Arc::new(move |_| Ok(instance.clone()));
        self.push(Lifetime::Singleton, factory, ServiceKey::of::<T>(), contract);
    }

    /// Number of registrations under a (key, contract) pair.
    ///
    /// Duplicate registration is not an error, so this is the way to observe
    /// that a repeated pass appended rather than replaced.
    pub fn registration_count(&self, key: &ServiceKey, contract: &str) -> usize {
        self.entries(key, contract).map_or(0, Vec::len)
    }

    fn entries(&self, key: &ServiceKey, contract: &str) -> Option<&Vec<RegistrationEntry>> {
        self.registry
            .get(key)
            .and_then(|by_contract| by_contract.get(contract))
    }

    fn push(&mut self, lifetime: Lifetime, factory: ServiceFactory, key: ServiceKey, contract: &str) {
        self.registry
            .entry(key)
            .or_default()
            .entry(Box::from(contract))
            .or_default()
            .push(RegistrationEntry {
                lifetime,
                factory,
                instance: OnceCell::new(),
            });
    }
}

impl ResolverCore for ServiceLocator {
    fn resolve_any(&self, key: &ServiceKey, contract: &str) -> DiResult<AnyArc> {
        let entry = self
            .entries(key, contract)
            .and_then(|entries| entries.last())
            .ok_or_else(|| DiError::NotFound {
                service: key.type_name(),
                contract: contract.to_string(),
            })?;
        entry.resolve(self)
    }

    fn resolve_all_any(&self, key: &ServiceKey, contract: &str) -> DiResult<Vec<AnyArc>> {
        match self.entries(key, contract) {
            Some(entries) => entries.iter().map(|entry| entry.resolve(self)).collect(),
            None => Ok(Vec::new()),
        }
    }
}

impl MutableResolver for ServiceLocator {
    fn register(&mut self, factory: ServiceFactory, key: ServiceKey, contract: &str) {
        self.push(Lifetime::Transient, factory, key, contract);
    }

    fn register_singleton(&mut self, factory: ServiceFactory, key: ServiceKey, contract: &str) {
        self.push(Lifetime::Singleton, factory, key, contract);
    }
}
