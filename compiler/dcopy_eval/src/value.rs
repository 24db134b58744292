//! Runtime values.
//!
//! Heap values carry identity: two values can be structurally equal
//! (`==`) while being different instances ([`Value::same_instance`]).
//! Copy semantics are observed through that distinction.

mod heap;

use std::fmt;

use dcopy_ir::{ClassId, ContainerShape, Name};

pub use heap::Heap;

/// An instance of a user class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    pub class: ClassId,
    /// Field values in constructor order.
    pub fields: Vec<(Name, Value)>,
}

impl Object {
    pub fn field(&self, name: Name) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// Runtime value.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Bool(bool),
    /// Immutable text; shared, never copied.
    Text(Heap<String>),
    Object(Heap<Object>),
    List(Heap<Vec<Value>>),
    Set(Heap<Vec<Value>>),
    Array(Heap<Vec<Value>>),
    Map(Heap<Vec<(Value, Value)>>),
}

impl Value {
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Heap::new(s.into()))
    }

    #[inline]
    pub fn object(class: ClassId, fields: Vec<(Name, Value)>) -> Self {
        Value::Object(Heap::new(Object { class, fields }))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Set elements are kept in insertion order.
    #[inline]
    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(Heap::new(items))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// A sequence of the given shape. Maps take pairs, see [`Value::map`].
    pub(crate) fn sequence(shape: ContainerShape, items: Vec<Value>) -> Self {
        match shape {
            ContainerShape::Set => Value::set(items),
            ContainerShape::Array => Value::array(items),
            ContainerShape::List | ContainerShape::Map => Value::list(items),
        }
    }

    /// Elements of a list, set or array.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) | Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Field of an object value.
    pub fn field(&self, name: Name) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.field(name))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Identity comparison. Heap values compare by allocation, scalars by
    /// value.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b))
            | (Value::Set(a), Value::Set(b))
            | (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Text(_) => "String",
            Value::Object(_) => "object",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{:?}", &**s),
            Value::Object(obj) => {
                write!(f, "#{}", obj.class.raw())?;
                f.debug_map()
                    .entries(obj.fields.iter().map(|(n, v)| (n.raw(), v)))
                    .finish()
            }
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Set(items) => f.debug_set().entries(items.iter()).finish(),
            Value::Array(items) => {
                f.write_str("array")?;
                f.debug_list().entries(items.iter()).finish()
            }
            Value::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}
