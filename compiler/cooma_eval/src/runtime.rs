//! The execution root.
//!
//! A `Runtime` is built once from a `RuntimeBuilder` and is immutable
//! afterwards. Each call to [`Runtime::run`] starts from a fresh, empty
//! environment and a fresh call stack, so runs never observe each other and
//! may execute on different threads at the same time.

use std::sync::Arc;

use cooma_ir::{free_variables, SharedInterner, Term};
use rayon::prelude::*;

use crate::capability::{Capability, CapabilityRegistry};
use crate::diagnostics::EvalCounters;
use crate::errors::{unbound_variable, EvalNote, EvalResult, FaultSite};
use crate::eval_mode::EvalMode;
use crate::interpreter::Interpreter;
use crate::Rho;

/// Builder for [`Runtime`].
///
/// ```
/// use std::sync::Arc;
/// use cooma_eval::{EvalMode, Runtime, Value, Writer};
/// use cooma_ir::{PrimOp, SharedInterner, Term};
///
/// let names = SharedInterner::new();
/// let out = Arc::new(Writer::buffer());
/// let runtime = Runtime::builder(names.clone())
///     .mode(EvalMode::Bounded { max_depth: 64 })
///     .capability("out", out.clone())
///     .build();
///
/// let write = Term::prim(
///     PrimOp::Invoke(names.intern("write")),
///     vec![
///         Term::prim(PrimOp::Capability(names.intern("out")), vec![]),
///         Term::string("hello"),
///     ],
/// );
/// assert_eq!(runtime.run(&write).ok(), Some(Value::Unit));
/// assert_eq!(out.output(), "hello");
/// ```
pub struct RuntimeBuilder {
    names: SharedInterner,
    mode: EvalMode,
    capabilities: CapabilityRegistry,
}

impl RuntimeBuilder {
    pub fn new(names: SharedInterner) -> Self {
        RuntimeBuilder {
            names,
            mode: EvalMode::default(),
            capabilities: CapabilityRegistry::new(),
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Make `object` reachable from IR as `Capability(name)`.
    #[must_use]
    pub fn capability(mut self, name: &str, object: Arc<dyn Capability>) -> Self {
        let name = self.names.intern(name);
        self.capabilities.register(name, object);
        self
    }

    pub fn build(self) -> Runtime {
        Runtime {
            names: self.names,
            mode: self.mode,
            capabilities: Arc::new(self.capabilities),
        }
    }
}

/// Evaluates terms built against one interner.
#[derive(Clone)]
pub struct Runtime {
    names: SharedInterner,
    mode: EvalMode,
    capabilities: Arc<CapabilityRegistry>,
}

impl Runtime {
    /// A runtime with the default mode and no capabilities.
    pub fn new(names: SharedInterner) -> Self {
        RuntimeBuilder::new(names).build()
    }

    pub fn builder(names: SharedInterner) -> RuntimeBuilder {
        RuntimeBuilder::new(names)
    }

    pub fn names(&self) -> &SharedInterner {
        &self.names
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Evaluate `root` in a fresh, empty environment.
    #[tracing::instrument(level = "debug", skip_all, fields(root = root.label()))]
    pub fn run(&self, root: &Term) -> EvalResult {
        let mut interpreter = self.interpreter();
        let result = interpreter.eval(root, &Rho::new());
        trace_outcome(&result);
        result
    }

    /// Like [`Runtime::run`], also returning evaluation counters.
    #[tracing::instrument(level = "debug", skip_all, fields(root = root.label()))]
    pub fn run_profiled(&self, root: &Term) -> (EvalResult, EvalCounters) {
        let mut interpreter = self.interpreter().with_counters();
        let result = interpreter.eval(root, &Rho::new());
        trace_outcome(&result);
        let counters = interpreter.into_counters().unwrap_or_default();
        (result, counters)
    }

    /// Run independent roots in parallel. Results keep the order of `roots`.
    #[tracing::instrument(level = "debug", skip_all, fields(count = roots.len()))]
    pub fn run_all(&self, roots: &[Term]) -> Vec<EvalResult> {
        roots.par_iter().map(|root| self.run(root)).collect()
    }

    /// Reject `root` if it has free variables, otherwise run it.
    ///
    /// The first free variable becomes the fault, located at its first
    /// reference; any others are listed as notes. Nothing is evaluated when
    /// the check fails.
    pub fn check_and_run(&self, root: &Term) -> EvalResult {
        let free = free_variables(root);
        if let Some((first, rest)) = free.split_first() {
            let mut err = unbound_variable(self.names.lookup(first.name)).with_site(FaultSite {
                span: first.span,
                term: "VariableReference",
            });
            for other in rest {
                let message = format!("`{}` is also unbound", self.names.lookup(other.name));
                err = err.with_note(match other.span {
                    Some(span) => EvalNote::with_span(message, span),
                    None => EvalNote::new(message),
                });
            }
            tracing::debug!(count = free.len(), "free variables in root");
            return Err(err);
        }
        self.run(root)
    }

    fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(&self.names, &self.capabilities, &self.mode)
    }
}

fn trace_outcome(result: &EvalResult) {
    if let Err(err) = result {
        tracing::debug!(class = %err.class(), error = %err, "run faulted");
    }
}

#[cfg(test)]
mod tests;
