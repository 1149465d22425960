use mvvm_conventions::{
    classify, classify_view, classify_view_model, resolve_contract, Classification, Conventions,
    ServiceKey, TypeMetadata,
};

trait AnyView: Send + Sync {}
trait ViewFor<VM>: AnyView {}
trait ViewModel: Send + Sync {}
trait ListViewModel: ViewModel {}

fn view_marker() -> ServiceKey {
    ServiceKey::of::<dyn AnyView>()
}

fn view_model_base() -> ServiceKey {
    ServiceKey::of::<dyn ViewModel>()
}

fn conventions() -> Conventions {
    Conventions {
        view_marker: view_marker(),
        view_model_base: view_model_base(),
    }
}

#[test]
fn view_with_single_specialization_yields_that_target() {
    struct FooViewModel;
    struct FooView;
    impl AnyView for FooView {}
    impl ViewFor<FooViewModel> for FooView {}

    let meta = TypeMetadata::builder::<FooView>()
        .implements::<dyn AnyView, _>(&[], |v| v)
        .implements::<dyn ViewFor<FooViewModel>, _>(&[view_marker()], |v| v)
        .constructor(vec![], |_| Ok(FooView))
        .build();

    let targets = classify_view(&meta, &view_marker()).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(
        *targets[0].key(),
        ServiceKey::of::<dyn ViewFor<FooViewModel>>()
    );
}

#[test]
fn bare_marker_implementer_has_no_targets() {
    struct RawView;
    impl AnyView for RawView {}

    let meta = TypeMetadata::builder::<RawView>()
        .implements::<dyn AnyView, _>(&[], |v| v)
        .constructor(vec![], |_| Ok(RawView))
        .build();

    // Qualifies as a view, but nothing specializes the marker: no targets,
    // and in particular the marker itself is not one.
    let targets = classify_view(&meta, &view_marker()).unwrap();
    assert!(targets.is_empty());
}

#[test]
fn non_view_is_not_classified_as_view() {
    struct Plain;

    let meta = TypeMetadata::builder::<Plain>()
        .constructor(vec![], |_| Ok(Plain))
        .build();

    assert!(classify_view(&meta, &view_marker()).is_none());
}

#[test]
fn every_specialization_qualifies() {
    struct FirstViewModel;
    struct SecondViewModel;
    struct DualView;
    impl AnyView for DualView {}
    impl ViewFor<FirstViewModel> for DualView {}
    impl ViewFor<SecondViewModel> for DualView {}

    let meta = TypeMetadata::builder::<DualView>()
        .implements::<dyn AnyView, _>(&[], |v| v)
        .implements::<dyn ViewFor<FirstViewModel>, _>(&[view_marker()], |v| v)
        .implements::<dyn ViewFor<SecondViewModel>, _>(&[view_marker()], |v| v)
        .constructor(vec![], |_| Ok(DualView))
        .build();

    let targets = classify_view(&meta, &view_marker()).unwrap();
    let keys: Vec<_> = targets.iter().map(|t| *t.key()).collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&ServiceKey::of::<dyn ViewFor<FirstViewModel>>()));
    assert!(keys.contains(&ServiceKey::of::<dyn ViewFor<SecondViewModel>>()));
}

#[test]
fn view_model_specifics_exclude_the_base_itself() {
    struct OrdersViewModel;
    impl ViewModel for OrdersViewModel {}
    impl ListViewModel for OrdersViewModel {}

    let meta = TypeMetadata::builder::<OrdersViewModel>()
        .implements::<dyn ViewModel, _>(&[], |vm| vm)
        .implements::<dyn ListViewModel, _>(&[view_model_base()], |vm| vm)
        .constructor(vec![], |_| Ok(OrdersViewModel))
        .build();

    let specifics = classify_view_model(&meta, &view_model_base()).unwrap();
    assert_eq!(specifics.len(), 1);
    assert_eq!(*specifics[0].key(), ServiceKey::of::<dyn ListViewModel>());
}

#[test]
fn plain_view_model_has_no_specifics() {
    struct FooViewModel;
    impl ViewModel for FooViewModel {}

    let meta = TypeMetadata::builder::<FooViewModel>()
        .implements::<dyn ViewModel, _>(&[], |vm| vm)
        .constructor(vec![], |_| Ok(FooViewModel))
        .build();

    let specifics = classify_view_model(&meta, &view_model_base()).unwrap();
    assert!(specifics.is_empty());
}

#[test]
fn unassignable_type_is_not_a_view_model() {
    struct Plain;

    let meta = TypeMetadata::builder::<Plain>()
        .constructor(vec![], |_| Ok(Plain))
        .build();

    assert!(classify_view_model(&meta, &view_model_base()).is_none());
}

#[test]
fn view_branch_wins_over_view_model_branch() {
    struct HybridViewModel;
    struct Hybrid;
    impl AnyView for Hybrid {}
    impl ViewFor<HybridViewModel> for Hybrid {}
    impl ViewModel for Hybrid {}

    let meta = TypeMetadata::builder::<Hybrid>()
        .implements::<dyn AnyView, _>(&[], |v| v)
        .implements::<dyn ViewFor<HybridViewModel>, _>(&[view_marker()], |v| v)
        .implements::<dyn ViewModel, _>(&[], |v| v)
        .constructor(vec![], |_| Ok(Hybrid))
        .build();

    match classify(&meta, &conventions()) {
        Classification::View { targets } => assert_eq!(targets.len(), 1),
        other => panic!("expected view classification, got {:?}", other),
    }
}

#[test]
fn unmatched_type_classifies_as_neither() {
    struct Plain;

    let meta = TypeMetadata::builder::<Plain>()
        .constructor(vec![], |_| Ok(Plain))
        .build();

    assert!(matches!(
        classify(&meta, &conventions()),
        Classification::Neither
    ));
}

#[test]
fn explicit_contract_wins_over_declared() {
    struct FooView;

    let meta = TypeMetadata::builder::<FooView>()
        .contract("landscape")
        .constructor(vec![], |_| Ok(FooView))
        .build();

    assert_eq!(resolve_contract(&meta, Some("portrait")), "portrait");
}

#[test]
fn declared_contract_applies_when_no_explicit_one() {
    struct FooView;

    let meta = TypeMetadata::builder::<FooView>()
        .contract("landscape")
        .constructor(vec![], |_| Ok(FooView))
        .build();

    assert_eq!(resolve_contract(&meta, None), "landscape");
    // An empty explicit contract is treated as absent.
    assert_eq!(resolve_contract(&meta, Some("")), "landscape");
}

#[test]
fn missing_contract_is_the_empty_string() {
    struct FooView;

    let meta = TypeMetadata::builder::<FooView>()
        .constructor(vec![], |_| Ok(FooView))
        .build();

    assert_eq!(resolve_contract(&meta, None), "");
}
