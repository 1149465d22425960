//! # mvvm-conventions
//!
//! Convention-based view and view-model registration for dependency
//! injection containers, inspired by Splat's ReactiveUI extensions.
//!
//! Given a catalog of candidate type descriptors, the registrar decides by
//! capability matching whether each type is a *view* (implements the UI
//! framework's view marker) or a *view-model* (assignable to the
//! application's view-model base), builds a constructor-injection factory
//! for it, and registers the factory with the container: transient by
//! default, singleton when the type says so, optionally under a string
//! contract.
//!
//! ## Features
//!
//! - **Explicit catalog**: candidate types self-declare interfaces,
//!   contracts and constructors through a builder API; no runtime type
//!   scanning.
//! - **Constructor injection**: the widest declared constructor wins,
//!   parameters resolve from the container at invocation time, collection
//!   parameters gather every registered service of their element type.
//! - **Swappable factory strategy**: construction policy is an explicit
//!   collaborator, not process-wide state.
//! - **Cycle detection**: circular constructor graphs fail with the full
//!   dependency path instead of overflowing the stack.
//! - **Container-agnostic**: everything runs against two small resolver
//!   traits; [`ServiceLocator`] is the bundled reference implementation.
//!
//! ## Quick start
//!
//! ```rust
//! use mvvm_conventions::{
//!     Conventions, ParamSpec, Registrar, Resolver, ServiceKey, ServiceLocator,
//!     TypeCatalog, TypeMetadata,
//! };
//! use std::sync::Arc;
//!
//! // Marker capabilities supplied by the UI framework / application.
//! trait AnyView: Send + Sync {}
//! trait ViewFor<VM>: AnyView {}
//! trait ViewModel: Send + Sync {}
//!
//! struct FooViewModel;
//! impl ViewModel for FooViewModel {}
//!
//! struct FooView {
//!     view_model: Arc<FooViewModel>,
//! }
//! impl AnyView for FooView {}
//! impl ViewFor<FooViewModel> for FooView {}
//!
//! let view_marker = ServiceKey::of::<dyn AnyView>();
//! let view_model_base = ServiceKey::of::<dyn ViewModel>();
//!
//! let catalog = TypeCatalog::new()
//!     .with(
//!         TypeMetadata::builder::<FooViewModel>()
//!             .implements::<dyn ViewModel, _>(&[], |vm| vm)
//!             .constructor(vec![], |_| Ok(FooViewModel))
//!             .build(),
//!     )
//!     .with(
//!         TypeMetadata::builder::<FooView>()
//!             .implements::<dyn AnyView, _>(&[], |view| view)
//!             .implements::<dyn ViewFor<FooViewModel>, _>(&[view_marker], |view| view)
//!             .constructor(vec![ParamSpec::service::<FooViewModel>()], |args| {
//!                 Ok(FooView {
//!                     view_model: args.one::<FooViewModel>(0)?,
//!                 })
//!             })
//!             .build(),
//!     );
//!
//! let mut locator = ServiceLocator::new();
//! Registrar::new().register_views_and_view_models(
//!     &mut locator,
//!     &catalog,
//!     &Conventions { view_marker, view_model_base },
//! )?;
//!
//! // The view is registered under its specific view-for capability...
//! let view = locator.get_trait::<dyn ViewFor<FooViewModel>>()?;
//! // ...and the view-model under itself, with its dependencies injected.
//! let view_model = locator.get::<FooViewModel>()?;
//! # drop((view, view_model));
//! # Ok::<(), mvvm_conventions::DiError>(())
//! ```
//!
//! ## Registration shape
//!
//! For a view `FooView` implementing `ViewFor<FooViewModel>`, one transient
//! entry: service key `dyn ViewFor<FooViewModel>`, empty contract. A type
//! implementing only the bare marker registers nothing.
//!
//! For a view-model `FooViewModel`, at least two entries: one under
//! `FooViewModel` itself, and one under the base capability with the
//! type's fully qualified name as contract, plus one entry per further
//! declared interface that specializes the base.

// Module declarations
pub mod classify;
pub mod error;
pub mod factory;
pub mod key;
pub mod lifetime;
pub mod locator;
pub mod metadata;
pub mod observer;
pub mod register;
pub mod resolver;

// Internal modules
mod internal;

// Re-export core types
pub use classify::{classify, classify_view, classify_view_model, Classification, Conventions};
pub use error::{DiError, DiResult};
pub use factory::{FactoryStrategy, WidestConstructor};
pub use key::ServiceKey;
pub use lifetime::Lifetime;
pub use locator::ServiceLocator;
pub use metadata::{
    Args, ConstructorMetadata, InterfaceMetadata, ParamSpec, TypeCatalog, TypeMetadata,
    TypeMetadataBuilder,
};
pub use observer::{LoggingObserver, RegistrationEvent, RegistrationObserver};
pub use register::{resolve_contract, Registrar};
pub use resolver::{AnyArc, MutableResolver, Resolver, ResolverCore, ServiceFactory};
