//! Tree-walking interpreter over generated function bodies.

use dcopy_ir::{
    ClassModel, ContainerShape, ElementCopy, ExprId, ExprKind, FunctionKind, GeneratedFunction,
    Name, StringInterner, Strategy, TypeRef,
};
use dcopy_synth::{ensure_sufficient_stack, Classifier, ContainerRegistry, Resolver, SynthConfig};

use crate::{EvalError, EvalResult, Object, Value};

/// One activation: the function being run, its receiver and arguments.
struct Frame<'f> {
    function: &'f GeneratedFunction,
    receiver: &'f Value,
    args: &'f [Value],
}

/// Executes attached functions against runtime values.
///
/// Calls dispatch on the receiver's runtime class. Generated functions run
/// their bodies; host shallow copies run natively. Erased container
/// elements are resolved against the element's runtime class.
pub struct Interpreter<'a, M: ClassModel + ?Sized> {
    model: &'a M,
    resolver: Resolver<'a, M>,
    registry: &'a ContainerRegistry,
    interner: &'a StringInterner,
}

impl<'a, M: ClassModel + ?Sized> Interpreter<'a, M> {
    pub fn new(
        model: &'a M,
        config: &'a SynthConfig,
        registry: &'a ContainerRegistry,
        interner: &'a StringInterner,
    ) -> Self {
        let classifier = Classifier::new(model, config, config.names, registry);
        Interpreter {
            model,
            resolver: Resolver::new(classifier),
            registry,
            interner,
        }
    }

    /// Call `method` on `receiver` with named arguments. Omitted parameters
    /// take their defaults.
    pub fn call(&mut self, receiver: &Value, method: Name, args: &[(Name, Value)]) -> EvalResult {
        let Value::Object(obj) = receiver else {
            if receiver.is_null() {
                return Err(EvalError::NullReceiver {
                    member: self.name(method),
                });
            }
            return Err(EvalError::NotAnObject {
                found: receiver.kind(),
            });
        };
        let model = self.model;
        let class = model
            .class(obj.class)
            .ok_or(EvalError::UnknownClass(obj.class.raw()))?;
        tracing::trace!(
            class = self.interner.lookup(class.name),
            method = self.interner.lookup(method),
            "call"
        );

        if let Some(function) = model.generated(obj.class, method) {
            return self.invoke(function, receiver, args);
        }
        match class.function(method).map(|f| f.kind) {
            Some(FunctionKind::ShallowCopy) => Ok(Value::object(obj.class, obj.fields.clone())),
            Some(_) => Err(EvalError::HostFunction {
                class: self.name(class.name),
                method: self.name(method),
            }),
            None => Err(EvalError::NoSuchMethod {
                class: self.name(class.name),
                method: self.name(method),
            }),
        }
    }

    fn invoke(
        &mut self,
        function: &GeneratedFunction,
        receiver: &Value,
        named: &[(Name, Value)],
    ) -> EvalResult {
        if let Some((unknown, _)) = named
            .iter()
            .find(|(name, _)| function.param_index(*name).is_none())
        {
            return Err(EvalError::UnknownParameter {
                function: self.name(function.name),
                param: self.name(*unknown),
            });
        }

        let mut args = Vec::with_capacity(function.params.len());
        for param in &function.params {
            let value = match named.iter().find(|(name, _)| *name == param.name) {
                Some((_, value)) => value.clone(),
                None => {
                    let Some(default) = param.default else {
                        return Err(EvalError::MissingArgument {
                            function: self.name(function.name),
                            param: self.name(param.name),
                        });
                    };
                    // Defaults see the receiver but no parameters.
                    let frame = Frame {
                        function,
                        receiver,
                        args: &[],
                    };
                    self.eval(&frame, default)?
                }
            };
            args.push(value);
        }

        let frame = Frame {
            function,
            receiver,
            args: &args,
        };
        self.eval(&frame, function.body)
    }

    fn eval(&mut self, frame: &Frame<'_>, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let Some(expr) = frame.function.arena.get(id) else {
                return Err(self.malformed(frame));
            };
            match expr {
                ExprKind::SelfRef => Ok(frame.receiver.clone()),
                ExprKind::Param { index } => frame
                    .args
                    .get(*index as usize)
                    .cloned()
                    .ok_or_else(|| self.malformed(frame)),
                ExprKind::FieldRead { receiver, field } | ExprKind::GetterCall { receiver, field } => {
                    let value = self.eval(frame, *receiver)?;
                    self.read_field(&value, *field)
                }
                ExprKind::MethodCall {
                    receiver,
                    method,
                    null_safe,
                } => {
                    let value = self.eval(frame, *receiver)?;
                    if value.is_null() && *null_safe {
                        return Ok(Value::Null);
                    }
                    self.call(&value, *method, &[])
                }
                ExprKind::HelperCall {
                    helper,
                    shape,
                    receiver,
                    elements,
                    null_safe,
                } => {
                    let value = self.eval(frame, *receiver)?;
                    if value.is_null() {
                        if *null_safe {
                            return Ok(Value::Null);
                        }
                        return Err(EvalError::NullReceiver {
                            member: self.name(*helper),
                        });
                    }
                    self.copy_container(*helper, *shape, &value, elements)
                }
                ExprKind::Construct { class, args, .. } => {
                    let descriptor = self
                        .model
                        .class(*class)
                        .ok_or(EvalError::UnknownClass(class.raw()))?;
                    let params = descriptor
                        .constructor
                        .as_ref()
                        .map(|ctor| ctor.params.as_slice())
                        .unwrap_or_default();
                    if params.len() != args.len() {
                        return Err(self.malformed(frame));
                    }
                    let mut fields = Vec::with_capacity(args.len());
                    for (param, arg) in params.iter().zip(args) {
                        fields.push((param.name, self.eval(frame, *arg)?));
                    }
                    Ok(Value::object(*class, fields))
                }
            }
        })
    }

    fn read_field(&self, value: &Value, field: Name) -> EvalResult {
        match value {
            Value::Object(obj) => obj.field(field).cloned().ok_or_else(|| EvalError::NoSuchField {
                class: self.class_name(obj),
                field: self.name(field),
            }),
            Value::Null => Err(EvalError::NullReceiver {
                member: self.name(field),
            }),
            other => Err(EvalError::NotAnObject {
                found: other.kind(),
            }),
        }
    }

    /// Element-wise copy through a registered helper.
    fn copy_container(
        &mut self,
        helper: Name,
        shape: ContainerShape,
        value: &Value,
        elements: &[ElementCopy],
    ) -> EvalResult {
        if self.registry.shape_of(helper) != Some(shape) {
            return Err(EvalError::UnknownHelper {
                helper: self.name(helper),
            });
        }
        let mismatch = |this: &Self| EvalError::ContainerMismatch {
            helper: this.name(helper),
            expected: shape.as_str(),
            found: value.kind(),
        };

        match (shape, value) {
            (ContainerShape::Map, Value::Map(entries)) => {
                let (Some(key), Some(val)) = (elements.first(), elements.get(1)) else {
                    return Err(mismatch(self));
                };
                let mut out = Vec::with_capacity(entries.len());
                for (k, v) in entries.iter() {
                    out.push((self.copy_element(key, k)?, self.copy_element(val, v)?));
                }
                Ok(Value::map(out))
            }
            (ContainerShape::List, Value::List(items))
            | (ContainerShape::Set, Value::Set(items))
            | (ContainerShape::Array, Value::Array(items)) => {
                let Some(plan) = elements.first() else {
                    return Err(mismatch(self));
                };
                let copied = items
                    .iter()
                    .map(|item| self.copy_element(plan, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::sequence(shape, copied))
            }
            _ => Err(mismatch(self)),
        }
    }

    fn copy_element(&mut self, plan: &ElementCopy, value: &Value) -> EvalResult {
        match plan {
            ElementCopy::Static(strategy) => self.apply(strategy, value),
            ElementCopy::Erased => self.copy_erased(value),
        }
    }

    /// Apply a resolved strategy. Null elements pass through.
    fn apply(&mut self, strategy: &Strategy, value: &Value) -> EvalResult {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match strategy {
            Strategy::Identity => Ok(value.clone()),
            Strategy::RecursiveCopyCall { function } | Strategy::ShallowCopyCall { function } => {
                self.call(value, *function, &[])
            }
            Strategy::ContainerCopyCall {
                helper,
                shape,
                elements,
            } => self.copy_container(*helper, *shape, value, elements),
        }
    }

    /// Runtime dispatch for elements whose static type was a type parameter.
    fn copy_erased(&mut self, value: &Value) -> EvalResult {
        let shape = match value {
            Value::Object(obj) => {
                let strategy = self.resolver.resolve(&TypeRef::class(obj.class))?;
                return self.apply(&strategy, value);
            }
            Value::List(_) => ContainerShape::List,
            Value::Set(_) => ContainerShape::Set,
            Value::Array(_) => ContainerShape::Array,
            Value::Map(_) => ContainerShape::Map,
            Value::Null | Value::Int(_) | Value::Bool(_) | Value::Text(_) => {
                return Ok(value.clone());
            }
        };
        let Some(helper) = self.registry.helper(shape) else {
            return Ok(value.clone());
        };
        let elements = vec![ElementCopy::Erased; shape.arity()];
        self.copy_container(helper, shape, value, &elements)
    }

    fn malformed(&self, frame: &Frame<'_>) -> EvalError {
        EvalError::MalformedBody {
            function: self.name(frame.function.name),
        }
    }

    fn class_name(&self, obj: &Object) -> String {
        self.model
            .class(obj.class)
            .map_or_else(|| format!("#{}", obj.class.raw()), |c| self.name(c.name))
    }

    fn name(&self, name: Name) -> String {
        self.interner.lookup(name).to_owned()
    }
}
