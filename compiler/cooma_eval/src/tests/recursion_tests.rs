//! Recursive bindings and call depth limits.

use cooma_ir::{PrimOp, Span, Term};
use pretty_assertions::assert_eq;

use super::Fixture;
use crate::{
    EvalErrorKind, EvalMode, FaultClass, Interpreter, Value, DEFAULT_MAX_CALL_DEPTH,
};

fn int_prim(op: PrimOp, a: Term, b: Term) -> Term {
    Term::prim(op, vec![a, b])
}

/// `letrec fact(n) = if n <= 1 then 1 else n * fact(n - 1) in fact(arg)`
fn factorial(fx: &Fixture, arg: i64) -> Term {
    let (fact, n) = (fx.name("fact"), fx.name("n"));
    Term::letrec(
        vec![(
            fact,
            vec![n],
            Term::if_then_else(
                int_prim(PrimOp::IntLe, Term::var(n), Term::int(1)),
                Term::int(1),
                int_prim(
                    PrimOp::IntMul,
                    Term::var(n),
                    Term::app(
                        Term::var(fact),
                        vec![int_prim(PrimOp::IntSub, Term::var(n), Term::int(1))],
                    ),
                ),
            ),
        )],
        Term::app(Term::var(fact), vec![Term::int(arg)]),
    )
}

/// `letrec count(n) = if n == 0 then 0 else count(n - 1) in count(arg)`
fn countdown(fx: &Fixture, arg: i64) -> Term {
    let (count, n) = (fx.name("count"), fx.name("n"));
    Term::letrec(
        vec![(
            count,
            vec![n],
            Term::if_then_else(
                int_prim(PrimOp::Equal, Term::var(n), Term::int(0)),
                Term::int(0),
                Term::app(
                    Term::var(count),
                    vec![int_prim(PrimOp::IntSub, Term::var(n), Term::int(1))],
                )
                .at(Span::new(40, 55)),
            ),
        )],
        Term::app(Term::var(count), vec![Term::int(arg)]),
    )
}

#[test]
fn recursive_function() {
    let fx = Fixture::new();
    assert_eq!(fx.value(&factorial(&fx, 10)), Value::int(3_628_800));
}

#[test]
fn factorial_overflow_faults() {
    let fx = Fixture::new();
    let err = fx.fault(&factorial(&fx, 25));
    assert!(matches!(err.kind, EvalErrorKind::IntegerOverflow { .. }));
}

#[test]
fn mutually_recursive_functions() {
    let fx = Fixture::new();
    let (even, odd, n) = (fx.name("even"), fx.name("odd"), fx.name("n"));
    let step = |target| {
        Term::if_then_else(
            int_prim(PrimOp::Equal, Term::var(n), Term::int(0)),
            Term::boolean(target == even),
            Term::app(
                Term::var(if target == even { odd } else { even }),
                vec![int_prim(PrimOp::IntSub, Term::var(n), Term::int(1))],
            ),
        )
    };
    let root = Term::letrec(
        vec![(even, vec![n], step(even)), (odd, vec![n], step(odd))],
        Term::app(Term::var(odd), vec![Term::int(7)]),
    );
    assert_eq!(fx.value(&root), Value::Bool(true));
}

#[test]
fn deep_recursion_within_the_default_limit() {
    let fx = Fixture::new();
    assert_eq!(
        fx.value(&countdown(&fx, (DEFAULT_MAX_CALL_DEPTH - 10) as i64)),
        Value::int(0)
    );
}

#[test]
fn runaway_recursion_hits_the_bounded_limit() {
    let fx = Fixture::with_mode(EvalMode::Bounded { max_depth: 100 });
    let err = fx.fault(&countdown(&fx, 1_000));
    assert_eq!(err.class(), FaultClass::StackOverflow);
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 100 });
    assert_eq!(err.span(), Some(Span::new(40, 55)));
    assert_eq!(err.backtrace.map(|bt| bt.len()), Some(100));
}

#[test]
fn default_limit_applies_without_configuration() {
    let fx = Fixture::new();
    let err = fx.fault(&countdown(&fx, -1));
    assert_eq!(
        err.kind,
        EvalErrorKind::StackOverflow {
            depth: DEFAULT_MAX_CALL_DEPTH,
        }
    );
}

#[test]
fn unbounded_mode_relies_on_stack_growth() {
    let fx = Fixture::with_mode(EvalMode::Unbounded);
    assert_eq!(fx.value(&countdown(&fx, 20_000)), Value::int(0));
}

#[test]
fn recursive_closure_outlives_its_run() {
    let fx = Fixture::new();
    let (fact, n) = (fx.name("fact"), fx.name("n"));
    // letrec fact(n) = ... in fact
    let root = match &factorial(&fx, 0).kind {
        cooma_ir::TermKind::LetRec { group, .. } => Term::new(cooma_ir::TermKind::LetRec {
            group: group.clone(),
            body: Box::new(Term::var(fact)),
        }),
        _ => unreachable!("factorial builds a letrec"),
    };
    let Value::Closure(closure) = fx.value(&root) else {
        panic!("letrec body returns the function");
    };
    assert_eq!(closure.name(), Some(fact));
    assert_eq!(closure.lambda().params, vec![n]);

    let capabilities = crate::CapabilityRegistry::new();
    let mut interpreter = Interpreter::new(&fx.names, &capabilities, &EvalMode::default());
    let result = interpreter.apply(&Term::unit(), &closure, [Value::int(5)]);
    assert_eq!(result.ok(), Some(Value::int(120)));
    assert!(closure.env().is_empty());
}

/// `letrec build(n) = if n <= 0 then <Nil = {}> else <Cons = build(n - 1)> in build(arg)`
fn build_list(fx: &Fixture, arg: i64) -> Term {
    let (build, n) = (fx.name("build"), fx.name("n"));
    Term::letrec(
        vec![(
            build,
            vec![n],
            Term::if_then_else(
                int_prim(PrimOp::IntLe, Term::var(n), Term::int(0)),
                Term::variant(fx.name("Nil"), Term::unit()),
                Term::variant(
                    fx.name("Cons"),
                    Term::app(
                        Term::var(build),
                        vec![int_prim(PrimOp::IntSub, Term::var(n), Term::int(1))],
                    ),
                ),
            ),
        )],
        Term::app(Term::var(build), vec![Term::int(arg)]),
    )
}

#[test]
fn deep_result_is_dropped_without_overflow() {
    let fx = Fixture::new();
    let list = fx.value(&build_list(&fx, 9900));
    let Value::Variant(head) = &list else {
        panic!("expected a list");
    };
    assert_eq!(head.tag, fx.name("Cons"));
    drop(list);
}
