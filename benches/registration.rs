use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mvvm_conventions::{
    classify, Classification, Conventions, FactoryStrategy, ParamSpec, Registrar, Resolver,
    ServiceKey, ServiceLocator, TypeCatalog, TypeMetadata, WidestConstructor,
};
use std::sync::Arc;

trait AnyView: Send + Sync {}
trait ViewFor<VM>: AnyView {}
trait ViewModel: Send + Sync {}

struct FooViewModel;
impl ViewModel for FooViewModel {}

struct FooView {
    _view_model: Arc<FooViewModel>,
}
impl AnyView for FooView {}
impl ViewFor<FooViewModel> for FooView {}

fn view_marker() -> ServiceKey {
    ServiceKey::of::<dyn AnyView>()
}

fn conventions() -> Conventions {
    Conventions {
        view_marker: view_marker(),
        view_model_base: ServiceKey::of::<dyn ViewModel>(),
    }
}

fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with(
            TypeMetadata::builder::<FooViewModel>()
                .implements::<dyn ViewModel, _>(&[], |vm| vm)
                .constructor(vec![], |_| Ok(FooViewModel))
                .build(),
        )
        .with(
            TypeMetadata::builder::<FooView>()
                .implements::<dyn AnyView, _>(&[], |v| v)
                .implements::<dyn ViewFor<FooViewModel>, _>(&[view_marker()], |v| v)
                .constructor(vec![ParamSpec::service::<FooViewModel>()], |args| {
                    Ok(FooView {
                        _view_model: args.one::<FooViewModel>(0)?,
                    })
                })
                .build(),
        )
}

fn bench_classify(c: &mut Criterion) {
    let catalog = catalog();
    let conventions = conventions();

    c.bench_function("classify_catalog", |b| {
        b.iter(|| {
            for meta in &catalog {
                match classify(meta, &conventions) {
                    Classification::View { targets } => {
                        black_box(targets.len());
                    }
                    Classification::ViewModel { specifics } => {
                        black_box(specifics.len());
                    }
                    Classification::Neither => {}
                }
            }
        })
    });
}

fn bench_factory_invocation(c: &mut Criterion) {
    let zero_param = TypeMetadata::builder::<FooViewModel>()
        .constructor(vec![], |_| Ok(FooViewModel))
        .build();
    let zero_factory = WidestConstructor.build(&zero_param).unwrap();

    let catalog = catalog();
    let mut locator = ServiceLocator::new();
    Registrar::new()
        .register_views_and_view_models(&mut locator, &catalog, &conventions())
        .unwrap();
    let injected = WidestConstructor
        .build(catalog.iter().nth(1).unwrap())
        .unwrap();

    c.bench_function("factory_zero_params", |b| {
        b.iter(|| {
            let instance = zero_factory(&locator).unwrap();
            black_box(instance);
        })
    });

    c.bench_function("factory_one_injected_param", |b| {
        b.iter(|| {
            let instance = injected(&locator).unwrap();
            black_box(instance);
        })
    });
}

fn bench_locator_resolution(c: &mut Criterion) {
    let catalog = catalog();
    let mut locator = ServiceLocator::new();
    Registrar::new()
        .register_views_and_view_models(&mut locator, &catalog, &conventions())
        .unwrap();

    c.bench_function("resolve_view_transient", |b| {
        b.iter(|| {
            let view = locator.get_trait::<dyn ViewFor<FooViewModel>>().unwrap();
            black_box(view);
        })
    });

    c.bench_function("resolve_view_model_by_contract", |b| {
        b.iter(|| {
            let view_model = locator
                .get_trait_with_contract::<dyn ViewModel>(std::any::type_name::<FooViewModel>())
                .unwrap();
            black_box(view_model);
        })
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_factory_invocation,
    bench_locator_resolution
);
criterion_main!(benches);
