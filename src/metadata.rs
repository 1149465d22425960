//! Candidate type descriptors and the catalog that feeds registration.
//!
//! Rust has no runtime reflection, so candidate types self-declare what a
//! reflective scan would otherwise discover: the interfaces they
//! implement (with the capabilities those interfaces extend), their declared
//! contract and single-instance markers, and their constructors. A
//! [`TypeCatalog`] of these descriptors, built once at composition-root
//! time, is the candidate set the classifier and registrar operate over.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::resolver::AnyArc;

pub(crate) type AdaptFn = Arc<dyn Fn(AnyArc) -> DiResult<AnyArc> + Send + Sync>;
pub(crate) type ConstructFn = Arc<dyn Fn(&Args) -> DiResult<AnyArc> + Send + Sync>;

/// One interface a candidate type implements.
///
/// Carries the interface's own service key, the transitive set of
/// capabilities the interface extends (the classifier matches against this),
/// and a type-erased adapter that turns a constructed concrete instance into
/// the interface's stored representation (`Arc<Arc<dyn Interface>>`).
pub struct InterfaceMetadata {
    pub(crate) key: ServiceKey,
    pub(crate) extends: Vec<ServiceKey>,
    pub(crate) adapt: AdaptFn,
}

impl InterfaceMetadata {
    /// The interface's service key.
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// Capabilities this interface extends, transitively.
    pub fn extends(&self) -> &[ServiceKey] {
        &self.extends
    }

    /// Whether this interface is a specialization of `capability`.
    ///
    /// The capability's own entry never specializes itself: an interface
    /// does not appear in its own extends set.
    pub fn specializes(&self, capability: &ServiceKey) -> bool {
        self.extends.contains(capability)
    }

    pub(crate) fn adapt_fn(&self) -> AdaptFn {
        Arc::clone(&self.adapt)
    }
}

impl std::fmt::Debug for InterfaceMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceMetadata")
            .field("key", &self.key)
            .field("extends", &self.extends)
            .finish_non_exhaustive()
    }
}

/// Declared constructor parameter.
///
/// The factory builder turns each spec into a resolution plan at
/// registration time: primitive-like single parameters become null
/// arguments, other single parameters become one-service lookups, and
/// collection parameters become all-services lookups over the element type.
#[derive(Debug, Clone, Copy)]
pub enum ParamSpec {
    /// A single service of the named type.
    Service(ServiceKey),
    /// Every registered service of the element type, in registration order.
    Collection(ServiceKey),
}

impl ParamSpec {
    /// A single-service parameter of type `P`.
    pub fn service<P: ?Sized + 'static>() -> Self {
        ParamSpec::Service(ServiceKey::of::<P>())
    }

    /// A collection parameter with element type `E`.
    pub fn collection_of<E: ?Sized + 'static>() -> Self {
        ParamSpec::Collection(ServiceKey::of::<E>())
    }

    /// The parameter's service key (element key for collections).
    pub fn key(&self) -> &ServiceKey {
        match self {
            ParamSpec::Service(key) | ParamSpec::Collection(key) => key,
        }
    }
}

pub(crate) enum Arg {
    Null,
    One(AnyArc),
    Many(Vec<AnyArc>),
}

/// Resolved constructor arguments, in declaration order.
///
/// Handed to the construction closure on every factory invocation. Slots are
/// accessed by parameter index; the typed accessors fail with
/// `DiError::TypeMismatch` when the slot shape or type does not line up with
/// the declaration.
pub struct Args {
    slots: Vec<Arg>,
}

impl Args {
    pub(crate) fn new(slots: Vec<Arg>) -> Self {
        Self { slots }
    }

    pub(crate) fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of argument slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no argument slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The single concrete service resolved for parameter `index`.
    pub fn one<P: Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<P>> {
        match self.slots.get(index) {
            Some(Arg::One(any)) => any
                .clone()
                .downcast::<P>()
                .map_err(|_| DiError::TypeMismatch(std::any::type_name::<P>())),
            _ => Err(DiError::TypeMismatch(std::any::type_name::<P>())),
        }
    }

    /// The single concrete service for parameter `index`, or `None` when the
    /// parameter was planned as a null argument (primitive-like types).
    pub fn opt<P: Send + Sync + 'static>(&self, index: usize) -> DiResult<Option<Arc<P>>> {
        match self.slots.get(index) {
            Some(Arg::Null) => Ok(None),
            _ => self.one::<P>(index).map(Some),
        }
    }

    /// The single trait-keyed service resolved for parameter `index`.
    pub fn one_trait<I: ?Sized + Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<I>> {
        match self.slots.get(index) {
            Some(Arg::One(any)) => any
                .clone()
                .downcast::<Arc<I>>()
                .map(|boxed| (*boxed).clone())
                .map_err(|_| DiError::TypeMismatch(std::any::type_name::<I>())),
            _ => Err(DiError::TypeMismatch(std::any::type_name::<I>())),
        }
    }

    /// Every concrete service resolved for collection parameter `index`.
    ///
    /// Zero registered services is an empty vector.
    pub fn many<P: Send + Sync + 'static>(&self, index: usize) -> DiResult<Vec<Arc<P>>> {
        match self.slots.get(index) {
            Some(Arg::Many(list)) => list
                .iter()
                .map(|any| {
                    any.clone()
                        .downcast::<P>()
                        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<P>()))
                })
                .collect(),
            _ => Err(DiError::TypeMismatch(std::any::type_name::<P>())),
        }
    }

    /// Every trait-keyed service resolved for collection parameter `index`.
    pub fn many_trait<I: ?Sized + Send + Sync + 'static>(
        &self,
        index: usize,
    ) -> DiResult<Vec<Arc<I>>> {
        match self.slots.get(index) {
            Some(Arg::Many(list)) => list
                .iter()
                .map(|any| {
                    any.clone()
                        .downcast::<Arc<I>>()
                        .map(|boxed| (*boxed).clone())
                        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<I>()))
                })
                .collect(),
            _ => Err(DiError::TypeMismatch(std::any::type_name::<I>())),
        }
    }
}

/// One declared constructor: ordered parameter specs plus the construction
/// closure that assembles the instance from resolved arguments.
pub struct ConstructorMetadata {
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) construct: ConstructFn,
}

impl ConstructorMetadata {
    /// Declares a constructor for `T`.
    ///
    /// The closure runs on every factory invocation with the arguments
    /// resolved per the parameter specs; its failures propagate uncaught to
    /// the resolution caller.
    pub fn new<T, F>(params: Vec<ParamSpec>, construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Args) -> DiResult<T> + Send + Sync + 'static,
    {
        let construct: ConstructFn = Arc::new(move |args| {
            let value = construct(args)?;
            let any: AnyArc = Arc::new(value);
            Ok(any)
        });
        Self { params, construct }
    }

    /// Number of declared parameters.
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// The declared parameter specs, in order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

impl std::fmt::Debug for ConstructorMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorMetadata")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Descriptor of one concrete, instantiable candidate type.
///
/// Immutable once built. Everything the classifier and factory builder need
/// is declared here: the interfaces set mirrors what reflection's
/// transitively-implemented-interfaces walk would report, the contract and
/// single-instance flags play the role of per-type attributes, and declared
/// constructors replace constructor discovery.
///
/// # Examples
///
/// ```rust
/// use mvvm_conventions::{ServiceKey, TypeMetadata};
///
/// trait ViewModel: Send + Sync {}
///
/// struct SettingsViewModel;
/// impl ViewModel for SettingsViewModel {}
///
/// let meta = TypeMetadata::builder::<SettingsViewModel>()
///     .implements::<dyn ViewModel, _>(&[], |vm| vm)
///     .constructor(vec![], |_| Ok(SettingsViewModel))
///     .build();
///
/// assert!(meta.implements(&ServiceKey::of::<dyn ViewModel>()));
/// assert!(meta.is_assignable_to(&ServiceKey::of::<dyn ViewModel>()));
/// assert_eq!(meta.constructors().len(), 1);
/// ```
pub struct TypeMetadata {
    key: ServiceKey,
    interfaces: Vec<InterfaceMetadata>,
    contract: Option<Box<str>>,
    single_instance: bool,
    constructors: Vec<ConstructorMetadata>,
}

impl TypeMetadata {
    /// Starts a descriptor for the concrete type `T`.
    pub fn builder<T: Send + Sync + 'static>() -> TypeMetadataBuilder<T> {
        TypeMetadataBuilder {
            inner: TypeMetadata {
                key: ServiceKey::of::<T>(),
                interfaces: Vec::new(),
                contract: None,
                single_instance: false,
                constructors: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    /// The candidate's own service key.
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// The candidate's fully qualified type name.
    pub fn type_name(&self) -> &'static str {
        self.key.type_name()
    }

    /// Every declared interface.
    pub fn interfaces(&self) -> &[InterfaceMetadata] {
        &self.interfaces
    }

    /// Contract string declared on the type, if any.
    pub fn declared_contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    /// Whether the type forces singleton lifetime for its registrations.
    pub fn is_single_instance(&self) -> bool {
        self.single_instance
    }

    /// The declared constructors.
    pub fn constructors(&self) -> &[ConstructorMetadata] {
        &self.constructors
    }

    /// Whether `capability` appears among the declared interfaces.
    pub fn implements(&self, capability: &ServiceKey) -> bool {
        self.interfaces.iter().any(|i| i.key == *capability)
    }

    /// The declared interface entry for `capability`, if any.
    pub fn interface(&self, capability: &ServiceKey) -> Option<&InterfaceMetadata> {
        self.interfaces.iter().find(|i| i.key == *capability)
    }

    /// Declared interfaces that specialize `capability`, in declaration order.
    pub fn interfaces_extending(
        &self,
        capability: &ServiceKey,
    ) -> impl Iterator<Item = &InterfaceMetadata> + '_ {
        let capability = *capability;
        self.interfaces
            .iter()
            .filter(move |i| i.specializes(&capability))
    }

    /// Whether the candidate equals `capability` or declares it implemented.
    pub fn is_assignable_to(&self, capability: &ServiceKey) -> bool {
        self.key == *capability || self.implements(capability)
    }
}

impl std::fmt::Debug for TypeMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMetadata")
            .field("key", &self.key)
            .field("interfaces", &self.interfaces)
            .field("contract", &self.contract)
            .field("single_instance", &self.single_instance)
            .field("constructors", &self.constructors)
            .finish()
    }
}

/// Fluent builder for [`TypeMetadata`].
pub struct TypeMetadataBuilder<T: ?Sized> {
    inner: TypeMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeMetadataBuilder<T> {
    /// Declares that `T` implements the interface `I`.
    ///
    /// `extends` is the transitive set of capabilities `I` itself extends;
    /// the classifier matches specializations against it. `cast` coerces a
    /// constructed instance to the interface; for plain supertrait
    /// relationships `|value| value` suffices.
    pub fn implements<I, F>(mut self, extends: &[ServiceKey], cast: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let adapt: AdaptFn = Arc::new(move |any: AnyArc| {
            let concrete = any
                .downcast::<T>()
                .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))?;
            let erased: AnyArc = Arc::new(cast(concrete));
            Ok(erased)
        });
        self.inner.interfaces.push(InterfaceMetadata {
            key: ServiceKey::of::<I>(),
            extends: extends.to_vec(),
            adapt,
        });
        self
    }

    /// Declares the contract string registrations default to.
    ///
    /// Plays the role of a per-type contract attribute; an explicit
    /// caller-supplied contract still takes precedence.
    pub fn contract(mut self, contract: impl Into<String>) -> Self {
        self.inner.contract = Some(contract.into().into_boxed_str());
        self
    }

    /// Forces singleton lifetime for every registration of this type.
    pub fn single_instance(mut self) -> Self {
        self.inner.single_instance = true;
        self
    }

    /// Declares a constructor.
    ///
    /// Types with several constructors get the widest one picked by the
    /// default factory strategy; a parameter-count tie is a registration
    /// error.
    pub fn constructor<F>(mut self, params: Vec<ParamSpec>, construct: F) -> Self
    where
        F: Fn(&Args) -> DiResult<T> + Send + Sync + 'static,
    {
        self.inner
            .constructors
            .push(ConstructorMetadata::new(params, construct));
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeMetadata {
        self.inner
    }
}

/// Ordered set of candidate type descriptors for one registration pass.
///
/// The explicit stand-in for "all concrete types of an assembly": the
/// composition root lists every registrable type once, and the registrar
/// walks the catalog in order.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: Vec<TypeMetadata>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor, builder-style.
    pub fn with(mut self, meta: TypeMetadata) -> Self {
        self.types.push(meta);
        self
    }

    /// Adds a descriptor in place.
    pub fn add(&mut self, meta: TypeMetadata) -> &mut Self {
        self.types.push(meta);
        self
    }

    /// Iterates descriptors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeMetadata> {
        self.types.iter()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> IntoIterator for &'a TypeCatalog {
    type Item = &'a TypeMetadata;
    type IntoIter = std::slice::Iter<'a, TypeMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
