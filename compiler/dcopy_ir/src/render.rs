//! Human-readable rendering of generated functions.
//!
//! Output is a single line per function, e.g.
//!
//! ```text
//! fn deep_copy(self) -> Node = Node(child = self.child?.deep_copy())
//! ```
//!
//! Direct storage reads render as `recv.field`, accessor reads as
//! `recv.field()`.

use std::fmt::Write;

use crate::{ClassId, ClassModel, ExprId, ExprKind, GeneratedFunction, StringInterner, TypeRef};

/// Renders types and generated functions against a class model.
pub struct Renderer<'a, M: ClassModel + ?Sized> {
    model: &'a M,
    interner: &'a StringInterner,
}

impl<'a, M: ClassModel + ?Sized> Renderer<'a, M> {
    pub fn new(model: &'a M, interner: &'a StringInterner) -> Self {
        Renderer { model, interner }
    }

    /// Render a type reference.
    pub fn ty(&self, ty: &TypeRef) -> String {
        let mut out = String::new();
        self.write_ty(&mut out, ty);
        out
    }

    fn write_ty(&self, out: &mut String, ty: &TypeRef) {
        match ty {
            TypeRef::Primitive(p) => out.push_str(p.as_str()),
            TypeRef::Text => out.push_str("String"),
            TypeRef::Top => out.push_str("Any"),
            TypeRef::Param(name) => out.push_str(self.interner.lookup(*name)),
            TypeRef::Class { id, args } => {
                out.push_str(&self.class_name(*id));
                self.write_args(out, args);
            }
            TypeRef::Container { shape, args } => {
                out.push_str(shape.as_str());
                self.write_args(out, args);
            }
            TypeRef::Nullable(inner) => {
                self.write_ty(out, inner);
                out.push('?');
            }
        }
    }

    fn write_args(&self, out: &mut String, args: &[TypeRef]) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_ty(out, arg);
        }
        out.push('>');
    }

    fn class_name(&self, id: ClassId) -> String {
        match self.model.class(id) {
            Some(class) => self.interner.lookup(class.name).to_owned(),
            None => format!("<class {}>", id.raw()),
        }
    }

    /// Render a generated function as one line.
    pub fn function(&self, function: &GeneratedFunction) -> String {
        let mut out = String::new();
        let _ = write!(out, "fn {}(self", self.interner.lookup(function.name));
        for param in &function.params {
            let _ = write!(
                out,
                ", {}: {}",
                self.interner.lookup(param.name),
                self.ty(&param.ty)
            );
            if let Some(default) = param.default {
                out.push_str(" = ");
                self.write_expr(&mut out, function, default);
            }
        }
        out.push_str(") -> ");
        out.push_str(&self.class_name(function.owner));
        if let Some(owner) = self.model.class(function.owner) {
            let params: Vec<TypeRef> = owner.type_params.iter().map(|p| TypeRef::Param(*p)).collect();
            self.write_args(&mut out, &params);
        }
        out.push_str(" = ");
        self.write_expr(&mut out, function, function.body);
        out
    }

    fn write_expr(&self, out: &mut String, function: &GeneratedFunction, id: ExprId) {
        let Some(expr) = function.arena.get(id) else {
            let _ = write!(out, "<missing {}>", id.raw());
            return;
        };
        match expr {
            ExprKind::SelfRef => out.push_str("self"),
            ExprKind::Param { index } => {
                match function.params.get(*index as usize) {
                    Some(param) => out.push_str(self.interner.lookup(param.name)),
                    None => {
                        let _ = write!(out, "<param {index}>");
                    }
                }
            }
            ExprKind::FieldRead { receiver, field } => {
                self.write_expr(out, function, *receiver);
                out.push('.');
                out.push_str(self.interner.lookup(*field));
            }
            ExprKind::GetterCall { receiver, field } => {
                self.write_expr(out, function, *receiver);
                out.push('.');
                out.push_str(self.interner.lookup(*field));
                out.push_str("()");
            }
            ExprKind::MethodCall {
                receiver,
                method,
                null_safe,
            } => {
                self.write_expr(out, function, *receiver);
                out.push_str(if *null_safe { "?." } else { "." });
                out.push_str(self.interner.lookup(*method));
                out.push_str("()");
            }
            ExprKind::HelperCall {
                helper,
                receiver,
                null_safe,
                ..
            } => {
                self.write_expr(out, function, *receiver);
                out.push_str(if *null_safe { "?." } else { "." });
                out.push_str(self.interner.lookup(*helper));
                out.push_str("()");
            }
            ExprKind::Construct {
                class,
                type_args,
                args,
            } => {
                out.push_str(&self.class_name(*class));
                self.write_args(out, type_args);
                out.push('(');
                let params = self
                    .model
                    .class(*class)
                    .and_then(|c| c.constructor.as_ref())
                    .map(|ctor| ctor.params.as_slice())
                    .unwrap_or_default();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if let Some(param) = params.get(i) {
                        out.push_str(self.interner.lookup(param.name));
                        out.push_str(" = ");
                    }
                    self.write_expr(out, function, *arg);
                }
                out.push(')');
            }
        }
    }
}
