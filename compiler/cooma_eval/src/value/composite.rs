//! Composite values: closures, records and variants.

use std::fmt;
use std::sync::Arc;

use cooma_ir::{Lambda, Name, RecGroup};

use super::{Heap, Value};
use crate::Rho;

/// Code of a closure.
#[derive(Clone)]
pub enum ClosureCode {
    /// A plain abstraction.
    Lambda(Arc<Lambda>),
    /// Function `index` of a recursive group.
    ///
    /// The group is re-bound around the captured environment on every call,
    /// so the environment never has to point back at the closure.
    Rec { group: Arc<RecGroup>, index: usize },
}

/// A function value: code plus the environment it was created in.
///
/// The captured environment is frozen at creation.
#[derive(Clone)]
pub struct ClosureValue {
    code: ClosureCode,
    env: Rho,
}

impl ClosureValue {
    pub fn new(lambda: Arc<Lambda>, env: Rho) -> Self {
        ClosureValue {
            code: ClosureCode::Lambda(lambda),
            env,
        }
    }

    /// Function `index` of `group`. Only built by [`bind_rec_group`], which
    /// keeps `index` in range.
    fn recursive(group: Arc<RecGroup>, index: usize, env: Rho) -> Self {
        ClosureValue {
            code: ClosureCode::Rec { group, index },
            env,
        }
    }

    pub fn code(&self) -> &ClosureCode {
        &self.code
    }

    pub fn lambda(&self) -> &Lambda {
        match &self.code {
            ClosureCode::Lambda(lambda) => lambda,
            ClosureCode::Rec { group, index } => &group.functions[*index].lambda,
        }
    }

    /// The binder name for recursive functions, or the lambda's own name.
    pub fn name(&self) -> Option<Name> {
        match &self.code {
            ClosureCode::Lambda(lambda) => lambda.name,
            ClosureCode::Rec { group, index } => Some(group.functions[*index].name),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.lambda().arity()
    }

    /// The environment captured at creation.
    pub fn env(&self) -> &Rho {
        &self.env
    }

    /// Environment the body runs in, before parameters are bound.
    pub fn body_env(&self) -> Rho {
        match &self.code {
            ClosureCode::Lambda(_) => self.env.clone(),
            ClosureCode::Rec { group, .. } => bind_rec_group(group, &self.env),
        }
    }

    /// Identity: same code and same captured environment.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        let same_code = match (&self.code, &other.code) {
            (ClosureCode::Lambda(a), ClosureCode::Lambda(b)) => Arc::ptr_eq(a, b),
            (
                ClosureCode::Rec { group: a, index: i },
                ClosureCode::Rec { group: b, index: j },
            ) => Arc::ptr_eq(a, b) && i == j,
            _ => false,
        };
        same_code && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Debug for ClosureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureValue")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("env_depth", &self.env.depth())
            .finish()
    }
}

/// Extend `env` with one frame binding every function of `group`.
///
/// Each closure captures `env` itself, not the extended frame.
pub fn bind_rec_group(group: &Arc<RecGroup>, env: &Rho) -> Rho {
    env.extend_many(group.functions.iter().enumerate().map(|(index, function)| {
        let closure = ClosureValue::recursive(Arc::clone(group), index, env.clone());
        (function.name, Value::Closure(closure))
    }))
}

/// Record fields in declaration order.
///
/// Equality ignores field order, matching the `Equal` primitive.
#[derive(Clone)]
pub struct RecordValue {
    fields: Heap<Vec<(Name, Value)>>,
}

impl RecordValue {
    pub(super) fn new(fields: Vec<(Name, Value)>) -> Self {
        RecordValue {
            fields: Heap::new(fields),
        }
    }

    pub fn get(&self, field: Name) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(Name, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        // Field names are unique within a record.
        self.fields.ptr_eq(&other.fields)
            || (self.len() == other.len()
                && self
                    .fields
                    .iter()
                    .all(|(name, value)| other.get(*name) == Some(value)))
    }
}

impl Drop for RecordValue {
    fn drop(&mut self) {
        if let Some(fields) = self.fields.get_mut() {
            if fields.iter().any(|(_, value)| has_nested_payload(value)) {
                release(fields.drain(..).map(|(_, value)| value).collect());
            }
        }
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, value)| (name, value)))
            .finish()
    }
}

/// A tagged payload `<tag = payload>`.
#[derive(Clone, PartialEq)]
pub struct VariantValue {
    pub tag: Name,
    payload: Heap<Value>,
}

impl VariantValue {
    pub(super) fn new(tag: Name, payload: Value) -> Self {
        VariantValue {
            tag,
            payload: Heap::new(payload),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

impl Drop for VariantValue {
    fn drop(&mut self) {
        if let Some(payload) = self.payload.get_mut() {
            if has_nested_payload(payload) {
                release(vec![std::mem::replace(payload, Value::Unit)]);
            }
        }
    }
}

impl fmt::Debug for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?} = {:?}>", self.tag, &*self.payload)
    }
}

fn has_nested_payload(value: &Value) -> bool {
    matches!(value, Value::Record(_) | Value::Variant(_))
}

/// Free record and variant payloads from a worklist. A list built by a
/// recursive program is as long as its recursion was deep, and nested drop
/// glue would need native stack in proportion. Shared payloads are left to
/// their other owners.
fn release(mut pending: Vec<Value>) {
    while let Some(mut value) = pending.pop() {
        match &mut value {
            Value::Variant(variant) => {
                if let Some(payload) = variant.payload.get_mut() {
                    pending.push(std::mem::replace(payload, Value::Unit));
                }
            }
            Value::Record(record) => {
                if let Some(fields) = record.fields.get_mut() {
                    pending.extend(fields.drain(..).map(|(_, value)| value));
                }
            }
            _ => {}
        }
    }
}
