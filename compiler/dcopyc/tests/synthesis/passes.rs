//! Pass-level behavior.

use std::collections::BTreeMap;

use dcopy_ir::{
    Capabilities, ClassId, ConstructorParam, ContainerShape, CopyKind, FunctionKind, Span,
    StringInterner, TypeRef,
};
use dcopyc::{ErrorCode, OutcomeStatus, Session, SkipReason, SynthConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{int, Unit};

#[test]
fn second_pass_attaches_nothing() {
    let mut u = Unit::new();
    let node = u.reserve();
    u.define(node, "Node", &[("child", TypeRef::class(node).nullable())], |c| {
        c.with_opt_in().with_declared(Capabilities::SELF_COPYABLE)
    });

    let first = u.run();
    assert_eq!(first.report.synthesized_count(), 2);
    let rendered = u.rendered(node);
    assert_eq!(
        rendered,
        vec![
            "fn deep_copy_with(self, child: Node? = self.child) -> Node = \
             Node(child = child?.deep_copy_with())",
            "fn deep_copy(self) -> Node = Node(child = self.child?.deep_copy_with())",
        ]
    );

    let second = u.run();
    assert_eq!(second.report.synthesized_count(), 0);
    assert_eq!(
        second.report.outcome(node, CopyKind::Direct),
        Some(OutcomeStatus::Skipped(SkipReason::AlreadyDefined))
    );
    assert_eq!(u.rendered(node), rendered);
    assert_eq!(u.table.attached_count(), 2);
}

#[test]
fn hand_written_copy_is_called_not_replaced() {
    let mut u = Unit::new();
    let deep_copy = u.name("deep_copy");
    let tree = u.class("Tree", &[("size", int())], |c| {
        c.with_declared(Capabilities::SELF_COPYABLE)
            .with_function(deep_copy, FunctionKind::DeepCopy)
    });
    let grove = u.class("Grove", &[("tree", TypeRef::class(tree))], |c| c.with_opt_in());

    let result = u.run();
    assert_eq!(
        result.report.outcome(tree, CopyKind::Direct),
        Some(OutcomeStatus::Skipped(SkipReason::AlreadyDefined))
    );
    assert!(u.rendered(tree).is_empty());
    assert_eq!(
        u.rendered(grove),
        vec!["fn deep_copy_with(self, tree: Tree = self.tree) -> Grove = Grove(tree = tree.deep_copy())"]
    );
}

#[test]
fn disabled_unit_is_left_alone_and_referenced_by_identity() {
    let interner = StringInterner::new();
    let config = SynthConfig::from_vars(&interner, None, Some("legacy"));
    let mut u = Unit::with_session(Session::with_config(interner, config), "app");
    let legacy_unit = u.name("legacy");

    let old = u.class("Old", &[("n", int())], |mut c| {
        c.unit = legacy_unit;
        c.with_declared(Capabilities::SELF_COPYABLE)
    });
    let new = u.class("New", &[("old", TypeRef::class(old))], |c| {
        c.with_declared(Capabilities::SELF_COPYABLE)
    });

    let result = u.run();
    assert_eq!(
        result.report.outcome(old, CopyKind::Direct),
        Some(OutcomeStatus::Skipped(SkipReason::Disabled))
    );
    assert!(u.rendered(old).is_empty());
    assert_eq!(
        u.rendered(new),
        vec!["fn deep_copy(self) -> New = New(old = self.old)"]
    );
}

#[test]
fn malformed_class_is_reported_and_others_continue() {
    let mut u = Unit::new();
    let z = u.name("z");
    let bad = u.class("Bad", &[("a", int())], |c| {
        c.with_constructor(vec![ConstructorParam {
            name: z,
            ty: int(),
            span: Span::new(10, 11),
        }])
        .with_span(Span::new(0, 30))
        .with_opt_in()
    });
    let good = u.class("Good", &[("a", int())], |c| c.with_opt_in());

    let result = u.run();
    assert_eq!(
        result.report.outcome(bad, CopyKind::WithOverrides),
        Some(OutcomeStatus::Failed(ErrorCode::E1001))
    );
    assert_eq!(
        result.report.outcome(good, CopyKind::WithOverrides),
        Some(OutcomeStatus::Synthesized)
    );
    assert!(result.check().is_err());
    assert_eq!(
        result.render_diagnostics(),
        "error[E1001]: constructor parameter `z` of `Bad` does not map to any field\n\
         \x20 --> 10..11: parameter declared here\n\
         \x20 ::: 0..30: in class `Bad`\n\
         \x20 = note: every canonical constructor parameter must name a field of the same name\n"
    );
}

#[test]
fn hand_written_copy_shields_a_malformed_constructor() {
    let mut u = Unit::new();
    let (z, deep_copy) = (u.name("z"), u.name("deep_copy"));
    let legacy = u.class("Legacy", &[("a", int())], |c| {
        c.with_constructor(vec![ConstructorParam {
            name: z,
            ty: int(),
            span: Span::new(4, 5),
        }])
        .with_declared(Capabilities::SELF_COPYABLE)
        .with_function(deep_copy, FunctionKind::DeepCopy)
    });

    let result = u.run();
    assert_eq!(
        result.report.outcome(legacy, CopyKind::Direct),
        Some(OutcomeStatus::Skipped(SkipReason::AlreadyDefined))
    );
    assert!(result.diagnostics.is_empty());
    assert!(result.check().is_ok());
}

#[test]
fn every_malformed_class_gets_its_diagnostic() {
    const CLASSES: u32 = 150;
    let mut u = Unit::new();
    let z = u.name("z");
    for i in 0..CLASSES {
        u.class(&format!("Bad{i}"), &[("a", int())], |c| {
            c.with_constructor(vec![ConstructorParam {
                name: z,
                ty: int(),
                span: Span::new(i * 10, i * 10 + 1),
            }])
            .with_opt_in()
        });
    }

    let result = u.run();
    assert_eq!(result.report.failed_count(), CLASSES as usize);
    assert_eq!(result.diagnostics.len(), CLASSES as usize);
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.code == ErrorCode::E1001));
}

#[test]
fn generic_classes_construct_with_top_type_arguments() {
    let mut u = Unit::new();
    let t = u.name("T");
    let pair = u.class(
        "Pair",
        &[("first", TypeRef::Param(t)), ("rest", TypeRef::list(TypeRef::Param(t)))],
        |c| c.with_type_param(t).with_opt_in(),
    );
    u.run();
    assert_eq!(
        u.rendered(pair),
        vec![
            "fn deep_copy_with(self, first: T = self.first, rest: List<T> = self.rest) -> Pair<T> = \
             Pair<Any>(first = first, rest = rest.deep_copy_list())"
        ]
    );
}

/// One field slot of a generated class graph; targets index into the graph.
#[derive(Clone, Debug)]
enum Slot {
    Int,
    Text,
    Ref { target: usize, nullable: bool },
    List(usize),
    Map(usize),
}

#[derive(Clone, Debug)]
struct Shape {
    opt_in: bool,
    declared: bool,
    shallow: bool,
    slots: Vec<Slot>,
}

fn arb_slot(classes: usize) -> impl Strategy<Value = Slot> {
    prop_oneof![
        Just(Slot::Int),
        Just(Slot::Text),
        (0..classes, any::<bool>()).prop_map(|(target, nullable)| Slot::Ref { target, nullable }),
        (0..classes).prop_map(Slot::List),
        (0..classes).prop_map(Slot::Map),
    ]
}

fn arb_graph() -> impl Strategy<Value = Vec<Shape>> {
    (1usize..6).prop_flat_map(|classes| {
        let shape = (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(arb_slot(classes), 0..4),
        )
            .prop_map(|(opt_in, declared, shallow, slots)| Shape {
                opt_in,
                declared,
                shallow,
                slots,
            });
        prop::collection::vec(shape, classes)
    })
}

/// Build the graph with class ids assigned in `order`, run one pass and
/// render every attached function keyed by class name.
fn synthesize(graph: &[Shape], order: &[usize]) -> BTreeMap<String, Vec<String>> {
    let mut u = Unit::new();
    let mut ids = vec![ClassId::from_raw(0); graph.len()];
    for &index in order {
        ids[index] = u.reserve();
    }

    let copy = u.name("copy");
    for (index, shape) in graph.iter().enumerate() {
        let fields: Vec<(String, TypeRef)> = shape
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let ty = match *slot {
                    Slot::Int => int(),
                    Slot::Text => TypeRef::Text,
                    Slot::Ref { target, nullable } if nullable => {
                        TypeRef::class(ids[target]).nullable()
                    }
                    Slot::Ref { target, .. } => TypeRef::class(ids[target]),
                    Slot::List(target) => TypeRef::list(TypeRef::class(ids[target])),
                    Slot::Map(target) => TypeRef::container(
                        ContainerShape::Map,
                        vec![TypeRef::Text, TypeRef::class(ids[target])],
                    ),
                };
                (format!("f{i}"), ty)
            })
            .collect();
        let fields: Vec<(&str, TypeRef)> =
            fields.iter().map(|(n, ty)| (n.as_str(), ty.clone())).collect();

        let shape = shape.clone();
        u.define(ids[index], &format!("C{index}"), &fields, move |mut c| {
            c.opt_in = shape.opt_in;
            if shape.declared {
                c = c.with_declared(Capabilities::SELF_COPYABLE);
            }
            if shape.shallow {
                c = c.with_function(copy, FunctionKind::ShallowCopy);
            }
            c
        });
    }

    let result = u.run();
    assert!(result.check().is_ok());
    (0..graph.len())
        .map(|index| (format!("C{index}"), u.rendered(ids[index])))
        .collect()
}

proptest! {
    #[test]
    fn output_does_not_depend_on_class_order(graph in arb_graph()) {
        let forward: Vec<usize> = (0..graph.len()).collect();
        let backward: Vec<usize> = forward.iter().rev().copied().collect();
        prop_assert_eq!(synthesize(&graph, &forward), synthesize(&graph, &backward));
    }
}
