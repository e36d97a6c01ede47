use super::*;
use crate::errors::{EvalErrorKind, FaultClass};
use cooma_ir::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn buffer_writer_captures_output() {
    let writer = Writer::buffer();
    let written = writer
        .invoke("write", &[Value::string("hello, ")])
        .and_then(|_| writer.invoke("write", &[Value::string("world")]));
    assert_eq!(written.ok(), Some(Value::Unit));
    assert_eq!(writer.output(), "hello, world");
    writer.clear();
    assert_eq!(writer.output(), "");
}

#[test]
fn writer_rejects_non_strings() {
    let err = Writer::Silent
        .invoke("write", &[Value::int(3)])
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(EvalErrorKind::TypeMismatch {
            expected: "String".to_string(),
            got: "Int".to_string(),
        })
    );
}

#[test]
fn unknown_method_is_a_capability_fault() {
    let err = Writer::Silent.invoke("read", &[]).err();
    assert_eq!(err.map(|e| e.class()), Some(FaultClass::CapabilityFault));
}

#[test]
fn text_reader_returns_its_input() {
    let reader = Reader::text("line one\n");
    assert_eq!(
        reader.invoke("read", &[]).ok(),
        Some(Value::string("line one\n"))
    );
}

#[test]
fn reader_rejects_arguments() {
    let err = Reader::text("ignored")
        .invoke("read", &[Value::int(1)])
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(EvalErrorKind::ArityMismatch {
            name: String::new(),
            expected: 0,
            got: 1,
        })
    );
}

#[test]
fn registry_hands_out_shared_handles() {
    let names = StringInterner::new();
    let out = names.intern("out");
    let writer = Arc::new(Writer::buffer());
    let mut registry = CapabilityRegistry::new();
    registry.register(out, writer.clone());

    assert!(registry.contains(out));
    assert!(!registry.contains(names.intern("in")));

    let first = registry.get(out);
    let second = registry.get(out);
    match (first, second) {
        (Some(a), Some(b)) => {
            assert!(a.ptr_eq(&b));
            assert_eq!(a.name(), out);
            assert_eq!(a.kind(), "Writer");
            assert!(a.invoke("write", &[Value::string("via handle")]).is_ok());
        }
        other => panic!("expected two handles, got {other:?}"),
    }
    assert_eq!(writer.output(), "via handle");
}
