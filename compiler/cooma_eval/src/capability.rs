//! Host capabilities.
//!
//! A capability is a host object that IR can reach only through the
//! `Capability(name)` and `Invoke(method)` primitives. The registry is
//! filled while building a `Runtime` and is read-only afterwards, so runs on
//! different threads share it without locking.
//!
//! Two capabilities ship with the runtime:
//! - [`Writer`]: `write(s)` appends text to stdout or a capture buffer
//! - [`Reader`]: `read()` returns all input from stdin or a fixed string

use std::fmt;
use std::io::Read as _;
use std::sync::Arc;

use cooma_ir::Name;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::errors::{
    arity_mismatch, capability_failed, type_mismatch, unknown_capability_method, EvalError,
    EvalResult,
};
use crate::Value;

/// A host object callable from IR.
pub trait Capability: Send + Sync {
    /// Name of the capability kind, used in faults (e.g. `"Writer"`).
    fn kind(&self) -> &'static str;

    /// Call `method` with already-evaluated arguments.
    fn invoke(&self, method: &str, args: &[Value]) -> EvalResult;
}

/// A capability as seen by IR: the registered name plus the shared object.
#[derive(Clone)]
pub struct CapabilityHandle {
    name: Name,
    object: Arc<dyn Capability>,
}

impl CapabilityHandle {
    pub fn new(name: Name, object: Arc<dyn Capability>) -> Self {
        CapabilityHandle { name, object }
    }

    /// The name the capability was registered under.
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn kind(&self) -> &'static str {
        self.object.kind()
    }

    pub fn invoke(&self, method: &str, args: &[Value]) -> EvalResult {
        self.object.invoke(method, args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for CapabilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({:?}: {})", self.name, self.kind())
    }
}

/// Capabilities available to a runtime, keyed by name.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    entries: FxHashMap<Name, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `object` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: Name, object: Arc<dyn Capability>) {
        self.entries.insert(name, object);
    }

    pub fn get(&self, name: Name) -> Option<CapabilityHandle> {
        self.entries
            .get(&name)
            .map(|object| CapabilityHandle::new(name, Arc::clone(object)))
    }

    pub fn contains(&self, name: Name) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, object)| (name, object.kind())))
            .finish()
    }
}

fn string_arg<'a>(args: &'a [Value], index: usize) -> Result<&'a str, EvalError> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        Some(other) => Err(type_mismatch("String", other.type_name())),
        None => Err(arity_mismatch("", index.saturating_add(1), args.len())),
    }
}

/// Text output.
pub enum Writer {
    Stdout,
    /// Captures output for inspection.
    Buffer(Mutex<String>),
    /// Discards output.
    Silent,
}

impl Writer {
    pub fn stdout() -> Self {
        Writer::Stdout
    }

    pub fn buffer() -> Self {
        Writer::Buffer(Mutex::new(String::new()))
    }

    /// Captured output; empty for stdout and silent writers.
    pub fn output(&self) -> String {
        match self {
            Writer::Buffer(buf) => buf.lock().clone(),
            Writer::Stdout | Writer::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Writer::Buffer(buf) = self {
            buf.lock().clear();
        }
    }

    fn write(&self, text: &str) {
        match self {
            Writer::Stdout => print!("{text}"),
            Writer::Buffer(buf) => buf.lock().push_str(text),
            Writer::Silent => {}
        }
    }
}

impl Capability for Writer {
    fn kind(&self) -> &'static str {
        "Writer"
    }

    fn invoke(&self, method: &str, args: &[Value]) -> EvalResult {
        match method {
            "write" => {
                let text = string_arg(args, 0)?;
                self.write(text);
                Ok(Value::Unit)
            }
            _ => Err(unknown_capability_method(self.kind(), method)),
        }
    }
}

/// Text input.
pub enum Reader {
    Stdin,
    /// Fixed input.
    Text(String),
}

impl Reader {
    pub fn stdin() -> Self {
        Reader::Stdin
    }

    pub fn text(input: impl Into<String>) -> Self {
        Reader::Text(input.into())
    }
}

impl Capability for Reader {
    fn kind(&self) -> &'static str {
        "Reader"
    }

    fn invoke(&self, method: &str, args: &[Value]) -> EvalResult {
        match method {
            "read" if !args.is_empty() => Err(arity_mismatch("", 0, args.len())),
            "read" => match self {
                Reader::Text(input) => Ok(Value::string(input.as_str())),
                Reader::Stdin => {
                    let mut input = String::new();
                    std::io::stdin()
                        .read_to_string(&mut input)
                        .map_err(|e| capability_failed(self.kind(), e.to_string()))?;
                    Ok(Value::string(input))
                }
            },
            _ => Err(unknown_capability_method(self.kind(), method)),
        }
    }
}

#[cfg(test)]
mod tests;
