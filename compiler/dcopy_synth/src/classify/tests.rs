use dcopy_ir::{
    Capabilities, ClassId, ClassModel, ClassSink, ContainerShape, FunctionKind, TypeRef,
};
use pretty_assertions::assert_eq;

use crate::test_helpers::Fixture;
use crate::ContainerRegistry;

use super::ClassCapabilities;

#[test]
fn opted_in_aggregate_targets_with_overrides() {
    let mut fx = Fixture::new();
    let point = fx.point();
    let info = fx.classifier().class_capabilities(point);
    assert_eq!(
        info,
        ClassCapabilities {
            caps: Capabilities::AGGREGATE | Capabilities::SELF_COPYABLE,
            deep_copy: Some(fx.config.names.with_overrides),
            shallow_copy: None,
        }
    );
}

#[test]
fn declared_capability_targets_direct_copy() {
    let mut fx = Fixture::new();
    let node = fx.node();
    let info = fx.classifier().class_capabilities(node);
    assert!(info.caps.contains(Capabilities::AGGREGATE | Capabilities::SELF_COPYABLE));
    assert_eq!(info.deep_copy, Some(fx.config.names.direct));
}

#[test]
fn with_overrides_preferred_over_direct() {
    let mut fx = Fixture::new();
    let both = fx.add("Both", |fx, c, _| {
        c.with_field(fx.field("n", Fixture::int()))
            .with_field_constructor()
            .with_opt_in()
            .with_declared(Capabilities::SELF_COPYABLE)
    });
    let info = fx.classifier().class_capabilities(both);
    assert_eq!(info.deep_copy, Some(fx.config.names.with_overrides));
}

#[test]
fn shallow_copy_requires_aggregate() {
    let mut fx = Fixture::new();
    let money = fx.money();
    let loose = fx.add("Loose", |fx, c, _| {
        c.with_field(fx.field("a", Fixture::int()))
            .with_function(fx.name("copy"), FunctionKind::ShallowCopy)
    });

    let mut classifier = fx.classifier();
    let info = classifier.class_capabilities(money);
    assert_eq!(
        info.caps,
        Capabilities::AGGREGATE | Capabilities::SHALLOW_COPYABLE
    );
    assert_eq!(info.shallow_copy, Some(fx.name("copy")));
    assert_eq!(classifier.class_capabilities(loose), ClassCapabilities::default());
}

#[test]
fn host_authored_deep_copy_counts() {
    let mut fx = Fixture::new();
    let legacy = fx.add("Legacy", |fx, c, _| {
        c.with_function(fx.name("clone_deep"), FunctionKind::DeepCopy)
    });
    let info = fx.classifier().class_capabilities(legacy);
    assert_eq!(info.caps, Capabilities::SELF_COPYABLE);
    assert_eq!(info.deep_copy, Some(fx.name("clone_deep")));
}

#[test]
fn disabled_unit_is_not_copyable_before_synthesis() {
    let mut fx = Fixture::new();
    let point = fx.point();
    let node = fx.node();
    fx.config = fx.config.clone().disable_unit(fx.unit);

    let mut classifier = fx.classifier();
    assert_eq!(classifier.classify(&TypeRef::class(point)), Capabilities::AGGREGATE);
    assert_eq!(classifier.classify(&TypeRef::class(node)), Capabilities::AGGREGATE);
}

#[test]
fn malformed_constructor_is_not_aggregate() {
    let mut fx = Fixture::new();
    let bad = fx.add("Bad", |fx, c, _| {
        c.with_field(fx.field("a", Fixture::int()))
            .with_constructor(vec![dcopy_ir::ConstructorParam {
                name: fx.name("b"),
                ty: Fixture::int(),
                span: dcopy_ir::Span::DUMMY,
            }])
            .with_opt_in()
    });
    let handle = fx.handle();

    let mut classifier = fx.classifier();
    assert_eq!(classifier.classify(&TypeRef::class(bad)), Capabilities::empty());
    assert_eq!(classifier.classify(&TypeRef::class(handle)), Capabilities::empty());
}

#[test]
fn classes_outside_the_graph_have_nothing() {
    let fx = Fixture::new();
    let caps = fx.classifier().classify(&TypeRef::class(ClassId::from_raw(99)));
    assert_eq!(caps, Capabilities::empty());
}

#[test]
fn containers_follow_the_registry() {
    let mut fx = Fixture::new();
    let node = fx.node();
    let list = TypeRef::list(TypeRef::class(node));

    assert_eq!(
        fx.classifier().classify(&list),
        Capabilities::CONTAINER_COPYABLE
    );
    assert_eq!(
        fx.classifier().classify(&list.clone().nullable()),
        Capabilities::CONTAINER_COPYABLE
    );

    fx.registry = ContainerRegistry::empty();
    assert_eq!(fx.classifier().classify(&list), Capabilities::empty());
}

#[test]
fn scalars_have_no_capabilities() {
    let fx = Fixture::new();
    let mut classifier = fx.classifier();
    for ty in [
        Fixture::int(),
        TypeRef::Text,
        TypeRef::Top,
        TypeRef::Param(fx.name("T")),
    ] {
        assert_eq!(classifier.classify(&ty), Capabilities::empty(), "{ty:?}");
    }
}

#[test]
fn results_are_memoized_per_class() {
    let mut fx = Fixture::new();
    let point = fx.point();
    let node = fx.node();

    let mut classifier = fx.classifier();
    classifier.classify(&TypeRef::class(point));
    classifier.classify(&TypeRef::class(point).nullable());
    classifier.classify(&TypeRef::container(
        ContainerShape::Map,
        vec![TypeRef::Text, TypeRef::class(node)],
    ));
    assert_eq!(classifier.memo_len(), 1);
    classifier.classify(&TypeRef::class(node));
    assert_eq!(classifier.memo_len(), 2);
}

#[test]
fn classification_ignores_attachment_state() {
    let mut fx = Fixture::new();
    let point = fx.point();
    let node = fx.node();

    let before = fx.classifier().class_capabilities(point);
    let function = {
        let mut synth = crate::Synthesizer::new(fx.resolver(), fx.config.names, &fx.interner);
        let class = fx.table.class(node).expect("node is in the table");
        synth.direct(class).expect("node synthesizes")
    };
    let attached = fx.table.attach(function);
    assert_eq!(attached, Ok(()));

    assert_eq!(fx.classifier().class_capabilities(point), before);
    assert_eq!(
        fx.classifier().class_capabilities(node).deep_copy,
        Some(fx.config.names.direct)
    );
}

#[test]
fn reserved_name_must_be_a_deep_copy() {
    let mut fx = Fixture::new();
    let direct = fx.config.names.direct;
    let with_overrides = fx.config.names.with_overrides;
    let clash = fx.add("Clash", |fx, c, _| {
        c.with_field(fx.field("n", Fixture::int()))
            .with_field_constructor()
            .with_declared(Capabilities::SELF_COPYABLE)
            .with_function(direct, FunctionKind::Other)
    });
    let manual = fx.add("Manual", |fx, c, _| {
        c.with_field(fx.field("n", Fixture::int()))
            .with_field_constructor()
            .with_function(with_overrides, FunctionKind::DeepCopyWithOverrides)
    });

    let mut classifier = fx.classifier();
    assert_eq!(classifier.class_capabilities(clash), ClassCapabilities {
        caps: Capabilities::AGGREGATE,
        deep_copy: None,
        shallow_copy: None,
    });
    assert_eq!(
        classifier.class_capabilities(manual).deep_copy,
        Some(with_overrides)
    );
}
