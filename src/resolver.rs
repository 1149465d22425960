//! Resolver traits: the seam between this crate and the container.
//!
//! The container itself is an external collaborator. This module defines the
//! minimal surface the registration orchestrator and the factories it builds
//! need from one: appending registrations ([`MutableResolver`]) and resolving
//! them ([`ResolverCore`], with [`Resolver`] layering type-safe sugar on
//! top). [`ServiceLocator`](crate::ServiceLocator) is the in-crate reference
//! implementation; any other container can implement the same traits.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;

/// Type-erased service instance handed out by a container.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Factory registered for a candidate type.
///
/// Invoked once per resolution request (or once ever, when the container
/// wraps it in singleton semantics). The resolving container passes itself
/// in, so the factory can look up constructor dependencies at invocation
/// time; the factory itself holds no cached state.
pub type ServiceFactory = Arc<dyn Fn(&dyn ResolverCore) -> DiResult<AnyArc> + Send + Sync>;

/// Object-safe resolution surface.
///
/// These two operations are all the built factories require of a container:
/// a single-service lookup and an all-services lookup. Everything else in
/// [`Resolver`] is sugar layered over them.
pub trait ResolverCore {
    /// Resolves the most recent registration under `key` and `contract`.
    ///
    /// The empty contract is the default registration space. A missing
    /// registration is `DiError::NotFound`.
    fn resolve_any(&self, key: &ServiceKey, contract: &str) -> DiResult<AnyArc>;

    /// Resolves every registration under `key` and `contract`, oldest first.
    ///
    /// No registrations is an empty vector, not an error; collection
    /// parameters rely on that.
    fn resolve_all_any(&self, key: &ServiceKey, contract: &str) -> DiResult<Vec<AnyArc>>;
}

/// Type-safe resolution sugar over [`ResolverCore`].
///
/// Blanket-implemented for every `ResolverCore`, including trait objects.
/// Concrete types are stored erased as `Arc<T>`; trait-keyed services are
/// stored as `Arc<Arc<dyn Trait>>`, which is what the `*_trait` accessors
/// unwrap.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{Resolver, ServiceLocator};
///
/// struct Config {
///     name: &'static str,
/// }
///
/// let mut locator = ServiceLocator::new();
/// locator.register_constant(Config { name: "app" });
///
/// let config = locator.get::<Config>()?;
/// assert_eq!(config.name, "app");
/// # Ok::<(), mvvm_conventions::DiError>(())
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a concrete service registered under the default contract.
    fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.get_with_contract::<T>("")
    }

    /// Resolves a concrete service registered under `contract`.
    fn get_with_contract<T: Send + Sync + 'static>(&self, contract: &str) -> DiResult<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let any = self.resolve_any(&key, contract)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(key.type_name()))
    }

    /// Resolves a trait-keyed service registered under the default contract.
    ///
    /// ```rust
    /// use mvvm_conventions::{AnyArc, MutableResolver, Resolver, ServiceFactory, ServiceKey, ServiceLocator};
    /// use std::sync::Arc;
    ///
    /// trait Logger: Send + Sync {
    ///     fn log(&self, message: &str);
    /// }
    ///
    /// struct ConsoleLogger;
    /// impl Logger for ConsoleLogger {
    ///     fn log(&self, message: &str) {
    ///         println!("[log] {}", message);
    ///     }
    /// }
    ///
    /// // Trait-keyed registrations store Arc<Arc<dyn Trait>>.
    /// let factory: ServiceFactory = Arc::new(|_| {
    ///     let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger);
    ///     Ok(Arc::new(logger) as AnyArc)
    /// });
    ///
    /// let mut locator = ServiceLocator::new();
    /// locator.register(factory, ServiceKey::of::<dyn Logger>(), "");
    ///
    /// let logger = locator.get_trait::<dyn Logger>()?;
    /// logger.log("resolved");
    /// # Ok::<(), mvvm_conventions::DiError>(())
    /// ```
    fn get_trait<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.get_trait_with_contract::<T>("")
    }

    /// Resolves a trait-keyed service registered under `contract`.
    fn get_trait_with_contract<T: ?Sized + Send + Sync + 'static>(
        &self,
        contract: &str,
    ) -> DiResult<Arc<T>> {
        let key = ServiceKey::of::<T>();
        let any = self.resolve_any(&key, contract)?;
        any.downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(key.type_name()))
    }

    /// Resolves every trait-keyed registration under the default contract,
    /// in registration order.
    fn get_all_trait<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Vec<Arc<T>>> {
        let key = ServiceKey::of::<T>();
        let anys = self.resolve_all_any(&key, "")?;
        let mut results = Vec::with_capacity(anys.len());
        for any in anys {
            let arc = any
                .downcast::<Arc<T>>()
                .map(|boxed| (*boxed).clone())
                .map_err(|_| DiError::TypeMismatch(key.type_name()))?;
            results.push(arc);
        }
        Ok(results)
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

/// Registration surface of a container.
///
/// Mirrors the minimum the orchestrator needs: append a transient factory or
/// a singleton factory under a (key, contract) pair. Registrations are never
/// deduplicated; for single-service lookups the last registration wins, per
/// the container's own semantics.
pub trait MutableResolver: ResolverCore {
    /// Appends a transient registration under `key` and `contract`.
    fn register(&mut self, factory: ServiceFactory, key: ServiceKey, contract: &str);

    /// Appends a singleton registration under `key` and `contract`.
    ///
    /// The container memoizes the first successful factory result and hands
    /// the same instance to every subsequent resolution.
    fn register_singleton(&mut self, factory: ServiceFactory, key: ServiceKey, contract: &str);
}
