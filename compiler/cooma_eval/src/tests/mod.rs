//! Evaluator scenario tests, run through `Runtime`.

mod recursion_tests;

use cooma_ir::{Name, SharedInterner, Term};

use crate::{EvalError, EvalMode, EvalResult, Runtime, Value};

/// A runtime plus the interner its terms are built against.
struct Fixture {
    names: SharedInterner,
    runtime: Runtime,
}

impl Fixture {
    fn new() -> Self {
        Self::with_mode(EvalMode::default())
    }

    fn with_mode(mode: EvalMode) -> Self {
        let names = SharedInterner::new();
        let runtime = Runtime::builder(names.clone()).mode(mode).build();
        Fixture { names, runtime }
    }

    fn name(&self, text: &str) -> Name {
        self.names.intern(text)
    }

    fn run(&self, term: &Term) -> EvalResult {
        self.runtime.run(term)
    }

    fn value(&self, term: &Term) -> Value {
        match self.run(term) {
            Ok(value) => value,
            Err(err) => panic!("expected a value, got fault: {err}"),
        }
    }

    fn fault(&self, term: &Term) -> EvalError {
        match self.run(term) {
            Ok(value) => panic!("expected a fault, got {value:?}"),
            Err(err) => err,
        }
    }
}
