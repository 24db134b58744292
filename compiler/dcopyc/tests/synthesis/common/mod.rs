//! Shared builder for end-to-end tests.

use dcopy_ir::{
    ClassDescriptor, ClassId, ClassTable, FieldDescriptor, Name, Primitive, TypeRef,
};
use dcopyc::{Session, UnitResult, Value};

pub fn int() -> TypeRef {
    TypeRef::Primitive(Primitive::Int)
}

/// A compilation unit under construction, with its session.
pub struct Unit {
    pub session: Session,
    pub table: ClassTable,
    pub unit: Name,
}

impl Unit {
    pub fn new() -> Self {
        Self::with_session(Session::new(), "app")
    }

    pub fn with_session(session: Session, unit: &str) -> Self {
        dcopyc::init_tracing();
        let unit = session.interner().intern(unit);
        Unit {
            session,
            table: ClassTable::new(),
            unit,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.session.interner().intern(s)
    }

    pub fn reserve(&mut self) -> ClassId {
        self.table.reserve()
    }

    /// Define a reserved class; the constructor takes every field in order.
    pub fn define(
        &mut self,
        id: ClassId,
        name: &str,
        fields: &[(&str, TypeRef)],
        build: impl FnOnce(ClassDescriptor) -> ClassDescriptor,
    ) {
        let mut class = ClassDescriptor::new(id, self.name(name), self.unit);
        for (field, ty) in fields {
            class = class.with_field(FieldDescriptor::new(self.name(field), ty.clone()));
        }
        self.table.insert(build(class.with_field_constructor()));
    }

    pub fn class(
        &mut self,
        name: &str,
        fields: &[(&str, TypeRef)],
        build: impl FnOnce(ClassDescriptor) -> ClassDescriptor,
    ) -> ClassId {
        let id = self.reserve();
        self.define(id, name, fields, build);
        id
    }

    pub fn run(&mut self) -> UnitResult {
        self.session.run_unit(&mut self.table)
    }

    pub fn rendered(&self, class: ClassId) -> Vec<String> {
        self.session.render_attached(&self.table, class)
    }

    pub fn object(&self, class: ClassId, fields: &[(&str, Value)]) -> Value {
        Value::object(
            class,
            fields
                .iter()
                .map(|(n, v)| (self.name(n), v.clone()))
                .collect(),
        )
    }

    pub fn call(&self, receiver: &Value, method: &str, args: &[(&str, Value)]) -> Value {
        let args: Vec<_> = args.iter().map(|(n, v)| (self.name(n), v.clone())).collect();
        self.session
            .interpreter(&self.table)
            .call(receiver, self.name(method), &args)
            .unwrap_or_else(|err| panic!("{method} failed: {err}"))
    }

    pub fn deep_copy(&self, receiver: &Value) -> Value {
        self.call(receiver, "deep_copy", &[])
    }

    pub fn copy_with(&self, receiver: &Value, args: &[(&str, Value)]) -> Value {
        self.call(receiver, "deep_copy_with", args)
    }

    pub fn get(&self, value: &Value, field: &str) -> Value {
        value
            .field(self.name(field))
            .cloned()
            .unwrap_or_else(|| panic!("no field {field} in {value:?}"))
    }
}
