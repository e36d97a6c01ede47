use super::*;
use crate::errors::{EvalError, EvalErrorKind, FaultClass};
use crate::Value;
use cooma_ir::{PrimOp, Span};
use pretty_assertions::assert_eq;

#[test]
fn builder_defaults() {
    let runtime = Runtime::new(SharedInterner::new());
    assert_eq!(runtime.mode(), &EvalMode::Interpret);
    assert!(runtime.capabilities().is_empty());
}

#[test]
fn builder_registers_capabilities_by_name() {
    let names = SharedInterner::new();
    let runtime = Runtime::builder(names.clone())
        .mode(EvalMode::Unbounded)
        .capability("out", Arc::new(crate::Writer::Silent))
        .build();
    assert_eq!(runtime.mode(), &EvalMode::Unbounded);
    assert!(runtime.capabilities().contains(names.intern("out")));
}

#[test]
fn check_and_run_reports_every_free_variable() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let y = names.intern("y");
    let root = Term::prim(
        PrimOp::IntAdd,
        vec![
            Term::var(x).at(Span::new(0, 1)),
            Term::var(y).at(Span::new(4, 5)),
        ],
    );
    let err = Runtime::new(names).check_and_run(&root).err();
    let Some(err) = err else {
        panic!("free variables must be rejected");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundVariable {
            name: "x".to_string()
        }
    );
    assert_eq!(err.span(), Some(Span::new(0, 1)));
    assert_eq!(err.notes.len(), 1);
    assert_eq!(err.notes[0].message, "`y` is also unbound");
    assert_eq!(err.notes[0].span, Some(Span::new(4, 5)));
}

#[test]
fn check_and_run_runs_closed_terms() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let root = Term::let_in(x, Term::int(2), Term::var(x));
    assert_eq!(
        Runtime::new(names).check_and_run(&root).ok(),
        Some(Value::int(2))
    );
}

#[test]
fn run_profiled_returns_counters() {
    let names = SharedInterner::new();
    let root = Term::prim(PrimOp::IntAdd, vec![Term::int(1), Term::int(2)]);
    let (result, counters) = Runtime::new(names).run_profiled(&root);
    assert_eq!(result.ok(), Some(Value::int(3)));
    assert_eq!(counters.terms_evaluated, 3);
    assert_eq!(counters.primitive_calls, 1);
    assert_eq!(counters.applications, 0);
}

#[test]
fn run_all_keeps_input_order() {
    let names = SharedInterner::new();
    let roots: Vec<Term> = (0..64)
        .map(|i| {
            if i % 7 == 0 {
                Term::prim(PrimOp::IntDiv, vec![Term::int(i), Term::int(0)])
            } else {
                Term::prim(PrimOp::IntMul, vec![Term::int(i), Term::int(i)])
            }
        })
        .collect();

    let results = Runtime::new(names).run_all(&roots);
    assert_eq!(results.len(), 64);
    for (i, result) in (0i64..).zip(&results) {
        if i % 7 == 0 {
            assert_eq!(
                result.as_ref().err().map(EvalError::class),
                Some(FaultClass::ArithmeticFault)
            );
        } else {
            assert_eq!(result.as_ref().ok(), Some(&Value::int(i * i)));
        }
    }
}

#[test]
fn runtime_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Runtime>();
}

#[test]
fn check_and_run_handles_deeply_nested_roots() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let mut root = Term::var(x);
    for _ in 0..200_000 {
        root = Term::let_in(x, Term::int(1), root);
    }
    let runtime = Runtime::new(names);
    assert_eq!(runtime.run(&root).ok(), Some(Value::int(1)));
    assert_eq!(runtime.check_and_run(&root).ok(), Some(Value::int(1)));
}
