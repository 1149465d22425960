//! Registration orchestration: catalog in, container registrations out.

use std::sync::Arc;

use crate::classify::{classify, classify_view, classify_view_model, Classification, Conventions};
use crate::error::{DiError, DiResult};
use crate::factory::{FactoryStrategy, WidestConstructor};
use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::metadata::{InterfaceMetadata, TypeCatalog, TypeMetadata};
use crate::observer::{RegistrationEvent, RegistrationObserver};
use crate::resolver::{MutableResolver, ResolverCore, ServiceFactory};

/// Resolves the contract for a registration of `meta`.
///
/// A non-empty explicit contract wins verbatim (the view-model
/// base-capability registration passes the type's own full name here).
/// Otherwise the type's declared contract applies, and absent that, the
/// empty string. Never fails; a missing declaration is the normal case.
pub fn resolve_contract(meta: &TypeMetadata, explicit: Option<&str>) -> String {
    match explicit {
        Some(contract) if !contract.is_empty() => contract.to_string(),
        _ => meta.declared_contract().unwrap_or("").to_string(),
    }
}

enum ServiceTarget<'a> {
    SelfKey,
    Interface(&'a InterfaceMetadata),
}

/// Registration orchestrator.
///
/// Walks a [`TypeCatalog`], classifies each candidate, builds a factory with
/// the configured [`FactoryStrategy`] and submits the resulting entries to
/// the container. Entries are never deduplicated or validated against prior
/// identical keys: the last registration for a (key, contract) pair wins at
/// resolution time, per the container's own semantics. Failures are
/// fail-fast: a mid-catalog error leaves earlier registrations in place.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{
///     Conventions, Registrar, Resolver, ServiceKey, ServiceLocator, TypeCatalog, TypeMetadata,
/// };
///
/// trait ViewModel: Send + Sync {}
///
/// struct HomeViewModel;
/// impl ViewModel for HomeViewModel {}
///
/// trait AnyView: Send + Sync {}
///
/// let catalog = TypeCatalog::new().with(
///     TypeMetadata::builder::<HomeViewModel>()
///         .implements::<dyn ViewModel, _>(&[], |vm| vm)
///         .constructor(vec![], |_| Ok(HomeViewModel))
///         .build(),
/// );
///
/// let mut locator = ServiceLocator::new();
/// Registrar::new().register_views_and_view_models(
///     &mut locator,
///     &catalog,
///     &Conventions {
///         view_marker: ServiceKey::of::<dyn AnyView>(),
///         view_model_base: ServiceKey::of::<dyn ViewModel>(),
///     },
/// )?;
///
/// // Registered under itself and, contract-scoped, under the base capability.
/// let by_type = locator.get::<HomeViewModel>()?;
/// let by_base = locator
///     .get_trait_with_contract::<dyn ViewModel>(std::any::type_name::<HomeViewModel>())?;
/// # drop((by_type, by_base));
/// # Ok::<(), mvvm_conventions::DiError>(())
/// ```
pub struct Registrar<S: FactoryStrategy = WidestConstructor> {
    strategy: S,
    observers: Vec<Arc<dyn RegistrationObserver>>,
}

impl Registrar {
    /// A registrar with the default [`WidestConstructor`] strategy.
    pub fn new() -> Self {
        Self::with_strategy(WidestConstructor)
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FactoryStrategy> Registrar<S> {
    /// A registrar with an explicit factory strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            observers: Vec::new(),
        }
    }

    /// Attaches a registration observer.
    pub fn add_observer(&mut self, observer: Arc<dyn RegistrationObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Registers every view and view-model in the catalog.
    ///
    /// Each candidate goes through classification once: the view branch
    /// first, the view-model branch second, mutually exclusive. Candidates
    /// matching neither are skipped.
    pub fn register_views_and_view_models<R>(
        &self,
        resolver: &mut R,
        catalog: &TypeCatalog,
        conventions: &Conventions,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        for meta in catalog {
            match classify(meta, conventions) {
                Classification::View { targets } => {
                    self.register_view_targets(resolver, meta, &conventions.view_marker, &targets, false)?;
                }
                Classification::ViewModel { specifics } => {
                    self.register_view_model_entries(
                        resolver,
                        meta,
                        &conventions.view_model_base,
                        &specifics,
                    )?;
                }
                Classification::Neither => self.notify_skipped(meta.type_name()),
            }
        }
        Ok(())
    }

    /// Registers every view in the catalog.
    ///
    /// With `register_direct_also` set, each view is additionally registered
    /// under the bare `view_marker` capability; by default only the
    /// specializing interfaces are registered.
    pub fn register_views<R>(
        &self,
        resolver: &mut R,
        catalog: &TypeCatalog,
        view_marker: &ServiceKey,
        register_direct_also: bool,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        for meta in catalog {
            self.register_view(resolver, meta, view_marker, register_direct_also)?;
        }
        Ok(())
    }

    /// Registers every view-model in the catalog.
    pub fn register_view_models<R>(
        &self,
        resolver: &mut R,
        catalog: &TypeCatalog,
        view_model_base: &ServiceKey,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        for meta in catalog {
            self.register_view_model(resolver, meta, view_model_base)?;
        }
        Ok(())
    }

    /// Registers one candidate as a view, if it qualifies.
    pub fn register_view<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        view_marker: &ServiceKey,
        register_direct_also: bool,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        match classify_view(meta, view_marker) {
            Some(targets) => {
                self.register_view_targets(resolver, meta, view_marker, &targets, register_direct_also)
            }
            None => Ok(()),
        }
    }

    /// Registers one candidate as a view-model, if it qualifies.
    ///
    /// A qualifying candidate is registered under itself, under the base
    /// capability with its own fully qualified name as contract, and under
    /// each further declared interface that specializes the base.
    pub fn register_view_model<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        view_model_base: &ServiceKey,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        match classify_view_model(meta, view_model_base) {
            Some(specifics) => {
                self.register_view_model_entries(resolver, meta, view_model_base, &specifics)
            }
            None => Ok(()),
        }
    }

    /// Registers `meta` under one of its declared service keys, transient.
    ///
    /// `service` may be the candidate's own key or any declared interface;
    /// anything else is `DiError::UndeclaredInterface`.
    pub fn register_type<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        service: &ServiceKey,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        let target = target_for(meta, service)?;
        self.register_entry(resolver, meta, target, None, false)
    }

    /// Like [`register_type`](Self::register_type), but forces singleton
    /// lifetime regardless of the candidate's own declaration.
    pub fn register_lazy_singleton<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        service: &ServiceKey,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        let target = target_for(meta, service)?;
        self.register_entry(resolver, meta, target, None, true)
    }

    fn register_view_targets<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        view_marker: &ServiceKey,
        targets: &[&InterfaceMetadata],
        register_direct_also: bool,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        if targets.is_empty() && !register_direct_also {
            // Implements the bare marker with no specialization: nothing to
            // register, and the raw marker itself is never a default target.
            self.notify_skipped(meta.type_name());
            return Ok(());
        }
        for target in targets {
            self.register_entry(resolver, meta, ServiceTarget::Interface(target), None, false)?;
        }
        if register_direct_also {
            if let Some(marker) = meta.interface(view_marker) {
                self.register_entry(resolver, meta, ServiceTarget::Interface(marker), None, false)?;
            }
        }
        Ok(())
    }

    fn register_view_model_entries<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        view_model_base: &ServiceKey,
        specifics: &[&InterfaceMetadata],
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        self.register_entry(resolver, meta, ServiceTarget::SelfKey, None, false)?;
        let base_target = meta
            .interface(view_model_base)
            .map(ServiceTarget::Interface)
            .unwrap_or(ServiceTarget::SelfKey);
        self.register_entry(resolver, meta, base_target, Some(meta.type_name()), false)?;
        for target in specifics {
            self.register_entry(resolver, meta, ServiceTarget::Interface(target), None, false)?;
        }
        Ok(())
    }

    fn register_entry<R>(
        &self,
        resolver: &mut R,
        meta: &TypeMetadata,
        target: ServiceTarget<'_>,
        explicit_contract: Option<&str>,
        force_single: bool,
    ) -> DiResult<()>
    where
        R: MutableResolver + ?Sized,
    {
        let contract = resolve_contract(meta, explicit_contract);
        let factory = self.strategy.build(meta)?;
        let (key, factory): (ServiceKey, ServiceFactory) = match target {
            ServiceTarget::SelfKey => (*meta.key(), factory),
            ServiceTarget::Interface(interface) => {
                let adapt = interface.adapt_fn();
                let adapted: ServiceFactory =
                    Arc::new(move |resolver: &dyn ResolverCore| {
                        adapt(factory(resolver)?)
                    });
                (*interface.key(), adapted)
            }
        };
        let lifetime = if force_single || meta.is_single_instance() {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        };
        match lifetime {
            Lifetime::Singleton => resolver.register_singleton(factory, key, &contract),
            Lifetime::Transient => resolver.register(factory, key, &contract),
        }
        self.notify_registered(&RegistrationEvent {
            implementation: meta.type_name(),
            service: key.type_name(),
            contract: &contract,
            lifetime,
        });
        Ok(())
    }

    fn notify_registered(&self, event: &RegistrationEvent<'_>) {
        for observer in &self.observers {
            observer.registered(event);
        }
    }

    fn notify_skipped(&self, type_name: &'static str) {
        for observer in &self.observers {
            observer.skipped(type_name);
        }
    }
}

fn target_for<'a>(meta: &'a TypeMetadata, service: &ServiceKey) -> DiResult<ServiceTarget<'a>> {
    if *service == *meta.key() {
        return Ok(ServiceTarget::SelfKey);
    }
    meta.interface(service)
        .map(ServiceTarget::Interface)
        .ok_or(DiError::UndeclaredInterface {
            type_name: meta.type_name(),
            service: service.type_name(),
        })
}
