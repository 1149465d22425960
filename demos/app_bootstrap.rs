//! Composition-root walkthrough: declare a catalog, run one registration
//! pass, resolve views and view-models back out of the container.
//!
//! Run with: cargo run --example app_bootstrap

use mvvm_conventions::{
    Conventions, DiResult, LoggingObserver, ParamSpec, Registrar, Resolver, ServiceKey,
    ServiceLocator, TypeCatalog, TypeMetadata,
};
use std::sync::Arc;

// ----- Capabilities the UI framework / application would supply -----

trait AnyView: Send + Sync {
    fn render(&self) -> String;
}

trait ViewFor<VM>: AnyView {}

trait ViewModel: Send + Sync {
    fn name(&self) -> &'static str;
}

// ----- Application services -----

struct Clock;

impl Clock {
    fn tick(&self) -> &'static str {
        "12:00"
    }
}

struct Widget {
    label: &'static str,
}

// ----- View-models -----

struct StatusViewModel {
    clock: Arc<Clock>,
}

impl ViewModel for StatusViewModel {
    fn name(&self) -> &'static str {
        "status"
    }
}

struct DashboardViewModel {
    widgets: Vec<Arc<Widget>>,
}

impl ViewModel for DashboardViewModel {
    fn name(&self) -> &'static str {
        "dashboard"
    }
}

// ----- Views -----

struct StatusView {
    view_model: Arc<StatusViewModel>,
}

impl AnyView for StatusView {
    fn render(&self) -> String {
        format!("[{}] {}", self.view_model.name(), self.view_model.clock.tick())
    }
}

impl ViewFor<StatusViewModel> for StatusView {}

struct DashboardView {
    view_model: Arc<DashboardViewModel>,
}

impl AnyView for DashboardView {
    fn render(&self) -> String {
        let labels: Vec<&str> = self
            .view_model
            .widgets
            .iter()
            .map(|w| w.label)
            .collect();
        format!("[{}] widgets: {}", self.view_model.name(), labels.join(", "))
    }
}

impl ViewFor<DashboardViewModel> for DashboardView {}

fn catalog(view_marker: ServiceKey) -> TypeCatalog {
    TypeCatalog::new()
        .with(
            TypeMetadata::builder::<StatusViewModel>()
                .implements::<dyn ViewModel, _>(&[], |vm| vm)
                .constructor(vec![ParamSpec::service::<Clock>()], |args| {
                    Ok(StatusViewModel {
                        clock: args.one::<Clock>(0)?,
                    })
                })
                .build(),
        )
        .with(
            TypeMetadata::builder::<DashboardViewModel>()
                .implements::<dyn ViewModel, _>(&[], |vm| vm)
                .single_instance()
                .constructor(vec![ParamSpec::collection_of::<Widget>()], |args| {
                    Ok(DashboardViewModel {
                        widgets: args.many::<Widget>(0)?,
                    })
                })
                .build(),
        )
        .with(
            TypeMetadata::builder::<StatusView>()
                .implements::<dyn AnyView, _>(&[], |v| v)
                .implements::<dyn ViewFor<StatusViewModel>, _>(&[view_marker], |v| v)
                .constructor(vec![ParamSpec::service::<StatusViewModel>()], |args| {
                    Ok(StatusView {
                        view_model: args.one::<StatusViewModel>(0)?,
                    })
                })
                .build(),
        )
        .with(
            TypeMetadata::builder::<DashboardView>()
                .implements::<dyn AnyView, _>(&[], |v| v)
                .implements::<dyn ViewFor<DashboardViewModel>, _>(&[view_marker], |v| v)
                .constructor(vec![ParamSpec::service::<DashboardViewModel>()], |args| {
                    Ok(DashboardView {
                        view_model: args.one::<DashboardViewModel>(0)?,
                    })
                })
                .build(),
        )
}

fn main() -> DiResult<()> {
    let view_marker = ServiceKey::of::<dyn AnyView>();
    let view_model_base = ServiceKey::of::<dyn ViewModel>();

    let mut locator = ServiceLocator::new();
    locator.register_constant(Clock);
    locator.register_constant(Widget { label: "cpu" });
    locator.register_constant(Widget { label: "network" });

    let mut registrar = Registrar::new();
    registrar.add_observer(Arc::new(LoggingObserver));
    registrar.register_views_and_view_models(
        &mut locator,
        &catalog(view_marker),
        &Conventions {
            view_marker,
            view_model_base,
        },
    )?;

    let status = locator.get_trait::<dyn ViewFor<StatusViewModel>>()?;
    println!("{}", status.render());

    let dashboard = locator.get_trait::<dyn ViewFor<DashboardViewModel>>()?;
    println!("{}", dashboard.render());

    // The dashboard view-model declared single-instance: every resolution
    // shares one memoized instance.
    let first = locator.get::<DashboardViewModel>()?;
    let second = locator.get::<DashboardViewModel>()?;
    println!(
        "dashboard view-model shared: {}",
        Arc::ptr_eq(&first, &second)
    );

    // View-models also answer under the base capability, discriminated by
    // their fully qualified type name.
    let by_contract = locator
        .get_trait_with_contract::<dyn ViewModel>(std::any::type_name::<StatusViewModel>())?;
    println!("resolved by contract: {}", by_contract.name());

    Ok(())
}
