#![deny(clippy::arithmetic_side_effects)]

//! Cooma evaluation core.
//!
//! A tree-walking interpreter for CoomaIR terms:
//!
//! - `Value`: immutable runtime values
//! - `Rho`: the persistent lexical environment
//! - `Interpreter`: per-run evaluator over `cooma_ir::Term`
//! - `Runtime`: the execution root, `run(root) -> Result<Value, EvalError>`
//! - `EvalError`: runtime faults with the innermost source location
//! - `Capability`: host objects reachable from IR
//!
//! # Example
//!
//! ```
//! use cooma_eval::{Runtime, Value};
//! use cooma_ir::{SharedInterner, Term};
//!
//! let names = SharedInterner::new();
//! let x = names.intern("x");
//! // (fun (x) x) 42
//! let root = Term::app(Term::lambda(vec![x], Term::var(x)), vec![Term::int(42)]);
//!
//! let runtime = Runtime::new(names);
//! assert_eq!(runtime.run(&root).ok(), Some(Value::int(42)));
//! ```

mod capability;
mod diagnostics;
mod errors;
mod eval_mode;
mod interpreter;
mod primitives;
mod rho;
mod runtime;
mod value;

pub use cooma_stack::ensure_sufficient_stack;

pub use capability::{Capability, CapabilityHandle, CapabilityRegistry, Reader, Writer};
pub use diagnostics::{CallFrame, CallStack, EvalCounters};
pub use errors::{
    arity_mismatch, capability_failed, division_by_zero, index_out_of_bounds, integer_overflow,
    missing_capability, missing_field, modulo_by_zero, negative_exponent, non_exhaustive_match,
    not_applicable, not_comparable, stack_overflow, type_mismatch, unbound_variable,
    unknown_capability_method, BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind,
    EvalNote, EvalResult, FaultClass, FaultSite,
};
pub use eval_mode::{EvalMode, DEFAULT_MAX_CALL_DEPTH};
pub use interpreter::{match_pattern, Interpreter};
pub use primitives::{eval_primitive, values_equal, PrimitiveContext};
pub use rho::Rho;
pub use runtime::{Runtime, RuntimeBuilder};
pub use value::{
    ClosureCode, ClosureValue, Heap, RecordValue, ScalarInt, Value, ValueDisplay, VariantValue,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
/// Example: `RUST_LOG=cooma_eval=trace` logs every application and case
/// dispatch.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // An embedder may already have installed a subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests;
