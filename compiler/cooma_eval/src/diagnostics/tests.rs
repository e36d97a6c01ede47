#![expect(clippy::expect_used, reason = "Tests use expect for brevity")]

use super::*;
use crate::errors::{EvalErrorKind, FaultClass};
use cooma_ir::StringInterner;
use pretty_assertions::assert_eq;

fn frame(name: Option<Name>, span: Option<Span>) -> CallFrame {
    CallFrame {
        name,
        call_span: span,
    }
}

#[test]
fn push_and_pop() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let mut stack = CallStack::new(Some(10));
    assert!(stack.is_empty());
    stack.push(frame(Some(f), None)).expect("within limit");
    assert_eq!(stack.depth(), 1);
    stack.pop();
    assert!(stack.is_empty());
}

#[test]
fn depth_limit_is_enforced() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame(None, None)).expect("first");
    stack.push(frame(None, None)).expect("second");

    let err = stack.push(frame(None, None)).expect_err("third exceeds limit");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(err.class(), FaultClass::StackOverflow);
    assert_eq!(stack.depth(), 2);
}

#[test]
fn unlimited_stack_never_overflows() {
    let mut stack = CallStack::default();
    for _ in 0..50_000 {
        stack.push(frame(None, None)).expect("no limit");
    }
    assert_eq!(stack.depth(), 50_000);
}

#[test]
fn capture_lists_most_recent_first() {
    let interner = StringInterner::new();
    let outer = interner.intern("outer");
    let inner = interner.intern("inner");
    let mut stack = CallStack::new(None);
    stack
        .push(frame(Some(outer), Some(Span::new(0, 9))))
        .expect("push");
    stack.push(frame(None, Some(Span::new(3, 8)))).expect("push");
    stack
        .push(frame(Some(inner), Some(Span::new(4, 7))))
        .expect("push");

    let bt = stack.capture(&interner);
    let names: Vec<_> = bt.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "<anonymous>", "outer"]);
    assert_eq!(bt.frames()[0].span, Some(Span::new(4, 7)));
}

#[test]
fn attach_backtrace_skips_empty_stack() {
    let interner = StringInterner::new();
    let err = CallStack::new(None).attach_backtrace(crate::errors::division_by_zero(), &interner);
    assert!(err.backtrace.is_none());
}

#[test]
fn counters_merge_and_report() {
    let mut a = EvalCounters::default();
    a.count_term();
    a.count_application(3);
    let mut b = EvalCounters::default();
    b.count_primitive();
    b.count_case();
    b.count_application(5);
    a.merge(&b);

    assert_eq!(a.terms_evaluated, 1);
    assert_eq!(a.applications, 2);
    assert_eq!(a.primitive_calls, 1);
    assert_eq!(a.case_dispatches, 1);
    assert_eq!(a.max_call_depth, 5);
    assert!(a.report().contains("Applications:     2"));
}
