//! Runtime values.
//!
//! Values are immutable once built. Heap payloads sit behind [`Heap`], which
//! can only be constructed here, so all allocation goes through the
//! `Value::` factory methods below.
//!
//! # Thread safety
//! Every payload is `Arc`-shared and immutable, so `Value` is `Send + Sync`
//! and may cross threads when runs execute in parallel.

mod composite;
mod heap;
mod scalar_int;

use std::fmt;
use std::sync::Arc;

use cooma_ir::{Lambda, Literal, Name, StringLookup};

pub use composite::{bind_rec_group, ClosureCode, ClosureValue, RecordValue, VariantValue};
pub use heap::Heap;
pub use scalar_int::ScalarInt;

use crate::capability::CapabilityHandle;
use crate::Rho;

/// A Cooma runtime value.
#[derive(Clone)]
pub enum Value {
    Int(ScalarInt),
    Bool(bool),
    Str(Heap<str>),
    /// The empty record `{}`.
    Unit,
    Closure(ClosureValue),
    Record(RecordValue),
    Variant(VariantValue),
    Capability(CapabilityHandle),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(ScalarInt::new(n))
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(Heap::from_arc(s.into()))
    }

    pub fn closure(lambda: Arc<Lambda>, env: Rho) -> Self {
        Value::Closure(ClosureValue::new(lambda, env))
    }

    /// Build a record. Field names are assumed distinct.
    pub fn record(fields: Vec<(Name, Value)>) -> Self {
        if fields.is_empty() {
            return Value::Unit;
        }
        Value::Record(RecordValue::new(fields))
    }

    pub fn variant(tag: Name, payload: Value) -> Self {
        Value::Variant(VariantValue::new(tag, payload))
    }

    pub fn from_literal(lit: &Literal) -> Self {
        match lit {
            Literal::Int(n) => Value::int(*n),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Str(s) => Value::string(s.as_str()),
            Literal::Unit => Value::Unit,
        }
    }

    /// Name of this value's variant, as shown in type faults.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Bool(_) => "Boolean",
            Value::Str(_) => "String",
            Value::Unit => "Unit",
            Value::Closure(_) => "Function",
            Value::Record(_) => "Record",
            Value::Variant(_) => "Variant",
            Value::Capability(_) => "Capability",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n.raw()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Closures and capabilities have identity, not structure.
    pub fn is_first_order(&self) -> bool {
        !matches!(self, Value::Closure(_) | Value::Capability(_))
    }

    /// Render this value in Cooma syntax, resolving names through `names`.
    pub fn display<'a>(&'a self, names: &'a dyn StringLookup) -> ValueDisplay<'a> {
        ValueDisplay { value: self, names }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            (Value::Closure(a), Value::Closure(b)) => a.ptr_eq(b),
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Variant(a), Value::Variant(b)) => a == b,
            (Value::Capability(a), Value::Capability(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Unit => write!(f, "Unit"),
            Value::Closure(c) => fmt::Debug::fmt(c, f),
            Value::Record(r) => write!(f, "Record({r:?})"),
            Value::Variant(v) => write!(f, "Variant({v:?})"),
            Value::Capability(c) => fmt::Debug::fmt(c, f),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// [`Value`] rendered with resolved names.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    names: &'a dyn StringLookup,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Unit => write!(f, "{{}}"),
            Value::Closure(_) => write!(f, "<function>"),
            Value::Record(record) => {
                write!(f, "{{")?;
                for (i, (name, value)) in record.fields().iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(
                        f,
                        "{sep}{} = {}",
                        self.names.lookup(*name),
                        value.display(self.names)
                    )?;
                }
                write!(f, " }}")
            }
            Value::Variant(variant) => write!(
                f,
                "<{} = {}>",
                self.names.lookup(variant.tag),
                variant.payload().display(self.names)
            ),
            Value::Capability(handle) => {
                write!(f, "<capability {}>", self.names.lookup(handle.name()))
            }
        }
    }
}
