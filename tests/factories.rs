use mvvm_conventions::{
    AnyArc, DiError, DiResult, FactoryStrategy, MutableResolver, ParamSpec, Resolver,
    ResolverCore, ServiceKey, ServiceLocator, TypeMetadata, WidestConstructor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Resolver double that counts lookups and resolves nothing.
#[derive(Default)]
struct CountingResolver {
    lookups: AtomicUsize,
}

impl CountingResolver {
    fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ResolverCore for CountingResolver {
    fn resolve_any(&self, key: &ServiceKey, contract: &str) -> DiResult<AnyArc> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(DiError::NotFound {
            service: key.type_name(),
            contract: contract.to_string(),
        })
    }

    fn resolve_all_any(&self, _key: &ServiceKey, _contract: &str) -> DiResult<Vec<AnyArc>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

#[test]
fn zero_param_factory_constructs_without_lookups() {
    struct Widget;

    let meta = TypeMetadata::builder::<Widget>()
        .constructor(vec![], |_| Ok(Widget))
        .build();

    let factory = WidestConstructor.build(&meta).unwrap();
    let resolver = CountingResolver::default();

    let first = factory(&resolver).unwrap();
    let second = factory(&resolver).unwrap();

    assert_eq!(resolver.lookup_count(), 0);
    assert!(!Arc::ptr_eq(&first, &second)); // New instance per invocation
    assert!(first.downcast::<Widget>().is_ok());
}

#[test]
fn widest_constructor_is_selected() {
    struct Gadget {
        via: &'static str,
    }

    let meta = TypeMetadata::builder::<Gadget>()
        .constructor(vec![], |_| Ok(Gadget { via: "narrow" }))
        .constructor(vec![ParamSpec::service::<String>()], |_| {
            Ok(Gadget { via: "wide" })
        })
        .build();

    let factory = WidestConstructor.build(&meta).unwrap();
    let resolver = CountingResolver::default();

    let gadget = factory(&resolver).unwrap().downcast::<Gadget>().ok().unwrap();
    assert_eq!(gadget.via, "wide");
}

#[test]
fn parameter_count_tie_is_a_hard_error() {
    struct Gadget;

    let meta = TypeMetadata::builder::<Gadget>()
        .constructor(vec![ParamSpec::service::<String>()], |_| Ok(Gadget))
        .constructor(vec![ParamSpec::service::<u32>()], |_| Ok(Gadget))
        .build();

    match WidestConstructor.build(&meta) {
        Err(DiError::AmbiguousConstructor {
            parameter_count, ..
        }) => assert_eq!(parameter_count, 1),
        other => panic!("expected ambiguous constructor error, got {:?}", other.err()),
    }
}

#[test]
fn missing_constructor_is_a_hard_error() {
    struct Bare;

    let meta = TypeMetadata::builder::<Bare>().build();

    assert!(matches!(
        WidestConstructor.build(&meta),
        Err(DiError::NoConstructor(_))
    ));
}

#[test]
fn primitive_and_string_params_are_supplied_null() {
    struct Labeled {
        label: Option<Arc<String>>,
        count: Option<Arc<u32>>,
    }

    let meta = TypeMetadata::builder::<Labeled>()
        .constructor(
            vec![
                ParamSpec::service::<String>(),
                ParamSpec::service::<u32>(),
            ],
            |args| {
                Ok(Labeled {
                    label: args.opt::<String>(0)?,
                    count: args.opt::<u32>(1)?,
                })
            },
        )
        .build();

    let factory = WidestConstructor.build(&meta).unwrap();
    let resolver = CountingResolver::default();

    let labeled = factory(&resolver).unwrap().downcast::<Labeled>().ok().unwrap();
    assert!(labeled.label.is_none());
    assert!(labeled.count.is_none());
    // Null arguments never touch the container.
    assert_eq!(resolver.lookup_count(), 0);
}

#[test]
fn collection_param_materializes_every_registration() {
    struct Plugin {
        id: u32,
    }

    struct Host {
        plugins: Vec<Arc<Plugin>>,
    }

    let meta = TypeMetadata::builder::<Host>()
        .constructor(vec![ParamSpec::collection_of::<Plugin>()], |args| {
            Ok(Host {
                plugins: args.many::<Plugin>(0)?,
            })
        })
        .build();

    let mut locator = ServiceLocator::new();
    locator.register_constant(Plugin { id: 1 });
    locator.register_constant(Plugin { id: 2 });
    locator.register_constant(Plugin { id: 3 });

    let factory = WidestConstructor.build(&meta).unwrap();
    let host = factory(&locator).unwrap().downcast::<Host>().ok().unwrap();

    let ids: Vec<u32> = host.plugins.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]); // Registration order preserved
}

#[test]
fn empty_collection_is_an_empty_vec_not_an_error() {
    struct Plugin;

    struct Host {
        plugins: Vec<Arc<Plugin>>,
    }

    let meta = TypeMetadata::builder::<Host>()
        .constructor(vec![ParamSpec::collection_of::<Plugin>()], |args| {
            Ok(Host {
                plugins: args.many::<Plugin>(0)?,
            })
        })
        .build();

    let locator = ServiceLocator::new();
    let factory = WidestConstructor.build(&meta).unwrap();
    let host = factory(&locator).unwrap().downcast::<Host>().ok().unwrap();

    assert_eq!(host.plugins.len(), 0);
}

#[test]
fn unresolvable_single_param_propagates_not_found() {
    struct Missing;

    struct Needy {
        _dep: Arc<Missing>,
    }

    let meta = TypeMetadata::builder::<Needy>()
        .constructor(vec![ParamSpec::service::<Missing>()], |args| {
            Ok(Needy {
                _dep: args.one::<Missing>(0)?,
            })
        })
        .build();

    let locator = ServiceLocator::new();
    let factory = WidestConstructor.build(&meta).unwrap();

    assert!(matches!(
        factory(&locator),
        Err(DiError::NotFound { .. })
    ));
}

#[test]
fn construction_failure_propagates() {
    struct Fragile;

    let meta = TypeMetadata::builder::<Fragile>()
        .constructor(vec![ParamSpec::service::<String>()], |_| {
            Err::<Fragile, _>(DiError::TypeMismatch("deliberate"))
        })
        .build();

    let factory = WidestConstructor.build(&meta).unwrap();
    let resolver = CountingResolver::default();

    assert!(matches!(
        factory(&resolver),
        Err(DiError::TypeMismatch("deliberate"))
    ));
}

#[test]
fn self_cycle_is_detected() {
    struct Ouroboros {
        _inner: Arc<Ouroboros>,
    }

    let meta = TypeMetadata::builder::<Ouroboros>()
        .constructor(vec![ParamSpec::service::<Ouroboros>()], |args| {
            Ok(Ouroboros {
                _inner: args.one::<Ouroboros>(0)?,
            })
        })
        .build();

    let factory = WidestConstructor.build(&meta).unwrap();
    let mut locator = ServiceLocator::new();
    locator.register(factory, ServiceKey::of::<Ouroboros>(), "");

    match locator.get::<Ouroboros>() {
        Err(DiError::Circular(path)) => {
            assert_eq!(path.len(), 2);
            assert_eq!(path[0], path[1]);
        }
        other => panic!("expected circular error, got {:?}", other.err()),
    }
}

#[test]
fn two_step_cycle_reports_the_full_path() {
    struct Ping {
        _pong: Arc<Pong>,
    }
    struct Pong {
        _ping: Arc<Ping>,
    }

    let ping_meta = TypeMetadata::builder::<Ping>()
        .constructor(vec![ParamSpec::service::<Pong>()], |args| {
            Ok(Ping {
                _pong: args.one::<Pong>(0)?,
            })
        })
        .build();
    let pong_meta = TypeMetadata::builder::<Pong>()
        .constructor(vec![ParamSpec::service::<Ping>()], |args| {
            Ok(Pong {
                _ping: args.one::<Ping>(0)?,
            })
        })
        .build();

    let mut locator = ServiceLocator::new();
    locator.register(
        WidestConstructor.build(&ping_meta).unwrap(),
        ServiceKey::of::<Ping>(),
        "",
    );
    locator.register(
        WidestConstructor.build(&pong_meta).unwrap(),
        ServiceKey::of::<Pong>(),
        "",
    );

    match locator.get::<Ping>() {
        Err(DiError::Circular(path)) => {
            assert_eq!(path.len(), 3);
            assert_eq!(path[0], path[2]);
        }
        other => panic!("expected circular error, got {:?}", other.err()),
    }
}

#[test]
fn diamond_dependencies_are_not_a_cycle() {
    struct Shared;
    struct Left {
        _shared: Arc<Shared>,
    }
    struct Right {
        _shared: Arc<Shared>,
    }
    struct Root {
        _left: Arc<Left>,
        _right: Arc<Right>,
    }

    let mut locator = ServiceLocator::new();
    for (meta, key) in [
        (
            TypeMetadata::builder::<Shared>()
                .constructor(vec![], |_| Ok(Shared))
                .build(),
            ServiceKey::of::<Shared>(),
        ),
        (
            TypeMetadata::builder::<Left>()
                .constructor(vec![ParamSpec::service::<Shared>()], |args| {
                    Ok(Left {
                        _shared: args.one::<Shared>(0)?,
                    })
                })
                .build(),
            ServiceKey::of::<Left>(),
        ),
        (
            TypeMetadata::builder::<Right>()
                .constructor(vec![ParamSpec::service::<Shared>()], |args| {
                    Ok(Right {
                        _shared: args.one::<Shared>(0)?,
                    })
                })
                .build(),
            ServiceKey::of::<Right>(),
        ),
        (
            TypeMetadata::builder::<Root>()
                .constructor(
                    vec![ParamSpec::service::<Left>(), ParamSpec::service::<Right>()],
                    |args| {
                        Ok(Root {
                            _left: args.one::<Left>(0)?,
                            _right: args.one::<Right>(1)?,
                        })
                    },
                )
                .build(),
            ServiceKey::of::<Root>(),
        ),
    ] {
        locator.register(WidestConstructor.build(&meta).unwrap(), key, "");
    }

    assert!(locator.get::<Root>().is_ok());
}
