//! Runtime behavior of generated copies.

use dcopy_ir::{Capabilities, ClassDescriptor, FieldDescriptor, FunctionKind, TypeRef};
use dcopyc::Value;
use pretty_assertions::assert_eq;

use crate::common::{int, Unit};

fn self_copyable(c: ClassDescriptor) -> ClassDescriptor {
    c.with_declared(Capabilities::SELF_COPYABLE)
}

#[test]
fn point_copy_keeps_fields_and_identity_is_fresh() {
    let mut u = Unit::new();
    let point = u.class("Point", &[("x", int()), ("y", int())], ClassDescriptor::with_opt_in);
    assert!(u.run().check().is_ok());

    let p = u.object(point, &[("x", Value::Int(1)), ("y", Value::Int(2))]);
    let copy = u.copy_with(&p, &[]);
    assert_eq!(copy, p);
    assert!(!copy.same_instance(&p));
}

#[test]
fn point_copy_with_override() {
    let mut u = Unit::new();
    let point = u.class("Point", &[("x", int()), ("y", int())], ClassDescriptor::with_opt_in);
    u.run();

    let p = u.object(point, &[("x", Value::Int(1)), ("y", Value::Int(2))]);
    let moved = u.copy_with(&p, &[("x", Value::Int(5))]);
    assert_eq!(u.get(&moved, "x"), Value::Int(5));
    assert_eq!(u.get(&moved, "y"), Value::Int(2));
    assert!(!moved.same_instance(&p));
    assert_eq!(u.get(&p, "x"), Value::Int(1), "original is untouched");
}

#[test]
fn overriding_values_are_copied_too() {
    let mut u = Unit::new();
    let node = u.reserve();
    u.define(node, "Node", &[("child", TypeRef::class(node).nullable())], self_copyable);
    let slot = u.class("Slot", &[("node", TypeRef::class(node))], ClassDescriptor::with_opt_in);
    u.run();

    let original = u.object(node, &[("child", Value::Null)]);
    let replacement = u.object(node, &[("child", Value::Null)]);
    let s = u.object(slot, &[("node", original.clone())]);

    let kept = u.copy_with(&s, &[]);
    assert!(!u.get(&kept, "node").same_instance(&original));

    let swapped = u.copy_with(&s, &[("node", replacement.clone())]);
    let swapped_node = u.get(&swapped, "node");
    assert_eq!(swapped_node, replacement);
    assert!(!swapped_node.same_instance(&replacement));
}

#[test]
fn recursive_copy_is_independent_at_every_depth() {
    let mut u = Unit::new();
    let node = u.reserve();
    u.define(node, "Node", &[("child", TypeRef::class(node).nullable())], self_copyable);
    u.run();
    assert_eq!(
        u.rendered(node),
        vec!["fn deep_copy(self) -> Node = Node(child = self.child?.deep_copy())"]
    );

    let mut chain = Value::Null;
    for _ in 0..200 {
        chain = u.object(node, &[("child", chain)]);
    }
    let copy = u.deep_copy(&chain);
    assert_eq!(copy, chain);

    let (mut a, mut b) = (chain, copy);
    let mut depth = 0;
    while !a.is_null() {
        assert!(!a.same_instance(&b), "shared instance at depth {depth}");
        a = u.get(&a, "child");
        b = u.get(&b, "child");
        depth += 1;
    }
    assert!(b.is_null());
    assert_eq!(depth, 200);
}

#[test]
fn list_elements_are_copied_in_order() {
    let mut u = Unit::new();
    let leaf = u.class("Leaf", &[("n", int())], self_copyable);
    let forest = u.class("Forest", &[("leaves", TypeRef::list(TypeRef::class(leaf)))], self_copyable);
    u.run();

    let leaves: Vec<_> = (0..4)
        .map(|n| u.object(leaf, &[("n", Value::Int(n))]))
        .collect();
    let list = Value::list(leaves.clone());
    let f = u.object(forest, &[("leaves", list.clone())]);

    let copied = u.get(&u.deep_copy(&f), "leaves");
    assert!(!copied.same_instance(&list));
    let copied = copied.elements().unwrap();
    assert_eq!(copied.len(), leaves.len());
    for (i, (before, after)) in leaves.iter().zip(copied).enumerate() {
        assert_eq!(after, before);
        assert!(!after.same_instance(before), "element {i} shared");
    }
}

#[test]
fn immutable_values_are_shared() {
    let mut u = Unit::new();
    let record = u.class("Record", &[("id", int()), ("label", TypeRef::Text)], self_copyable);
    u.run();

    let label = Value::text("first");
    let r = u.object(record, &[("id", Value::Int(7)), ("label", label.clone())]);
    let copy = u.deep_copy(&r);
    assert!(!copy.same_instance(&r));
    assert!(u.get(&copy, "label").same_instance(&label));
    assert!(u.get(&copy, "id").same_instance(&Value::Int(7)));
}

#[test]
fn shallow_copyable_fields_get_one_level_copies() {
    let mut u = Unit::new();
    let copy_fn = u.name("copy");
    let money = u.class(
        "Money",
        &[("cents", int()), ("currency", TypeRef::Text)],
        |c| c.with_function(copy_fn, FunctionKind::ShallowCopy),
    );
    let account = u.class("Account", &[("balance", TypeRef::class(money))], self_copyable);
    u.run();

    let currency = Value::text("EUR");
    let balance = u.object(money, &[("cents", Value::Int(100)), ("currency", currency.clone())]);
    let a = u.object(account, &[("balance", balance.clone())]);

    let copied_balance = u.get(&u.deep_copy(&a), "balance");
    assert_eq!(copied_balance, balance);
    assert!(!copied_balance.same_instance(&balance));
    assert!(u.get(&copied_balance, "currency").same_instance(&currency));
}

#[test]
fn uncopyable_references_are_shared() {
    let mut u = Unit::new();
    let handle = u.reserve();
    let descriptor = ClassDescriptor::new(handle, u.name("Handle"), u.unit)
        .with_field(FieldDescriptor::new(u.name("fd"), int()));
    u.table.insert(descriptor);
    let owner = u.class("Owner", &[("handle", TypeRef::class(handle))], self_copyable);
    u.run();

    let h = u.object(handle, &[("fd", Value::Int(3))]);
    let o = u.object(owner, &[("handle", h.clone())]);
    assert!(u.get(&u.deep_copy(&o), "handle").same_instance(&h));
}
