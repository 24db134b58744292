//! Shared fixtures for unit tests.

use dcopy_ir::{
    ClassDescriptor, ClassId, ClassTable, FieldDescriptor, FunctionKind, Name, Primitive,
    StringInterner, TypeRef,
};

use crate::{Classifier, ContainerRegistry, Resolver, SynthConfig};

/// A class graph under construction plus the engine's configuration.
pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub table: ClassTable,
    pub config: SynthConfig,
    pub registry: ContainerRegistry,
    pub unit: Name,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let config = SynthConfig::new(&interner);
        let registry = ContainerRegistry::with_defaults(&interner);
        let unit = interner.intern("app");
        Fixture {
            interner,
            table: ClassTable::new(),
            config,
            registry,
            unit,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn int() -> TypeRef {
        TypeRef::Primitive(Primitive::Int)
    }

    pub fn field(&self, name: &str, ty: TypeRef) -> FieldDescriptor {
        FieldDescriptor::new(self.name(name), ty)
    }

    /// Add a class to the default unit. `build` receives the empty
    /// descriptor and the class's own id.
    pub fn add(
        &mut self,
        name: &str,
        build: impl FnOnce(&Self, ClassDescriptor, ClassId) -> ClassDescriptor,
    ) -> ClassId {
        let id = self.table.reserve();
        let class = ClassDescriptor::new(id, self.name(name), self.unit);
        let class = build(&*self, class, id);
        self.table.insert(class);
        id
    }

    /// `Point(x: Int, y: Int)` opted into copy-with-overrides.
    pub fn point(&mut self) -> ClassId {
        self.add("Point", |fx, c, _| {
            c.with_field(fx.field("x", Self::int()))
                .with_field(fx.field("y", Self::int()))
                .with_field_constructor()
                .with_opt_in()
        })
    }

    /// `Node(child: Node?)` declaring the copy capability.
    pub fn node(&mut self) -> ClassId {
        self.add("Node", |fx, c, id| {
            c.with_field(fx.field("child", TypeRef::class(id).nullable()))
                .with_field_constructor()
                .with_declared(dcopy_ir::Capabilities::SELF_COPYABLE)
        })
    }

    /// `Money(cents: Long)` with a host shallow copy function `copy`.
    pub fn money(&mut self) -> ClassId {
        self.add("Money", |fx, c, _| {
            c.with_field(fx.field("cents", TypeRef::Primitive(Primitive::Long)))
                .with_field_constructor()
                .with_function(fx.name("copy"), FunctionKind::ShallowCopy)
        })
    }

    /// `Handle` with a field but no canonical constructor.
    pub fn handle(&mut self) -> ClassId {
        self.add("Handle", |fx, c, _| c.with_field(fx.field("fd", Self::int())))
    }

    pub fn classifier(&self) -> Classifier<'_, ClassTable> {
        Classifier::new(&self.table, &self.config, self.config.names, &self.registry)
    }

    pub fn resolver(&self) -> Resolver<'_, ClassTable> {
        Resolver::new(self.classifier())
    }
}
