use super::*;

#[test]
fn binary_ops_take_two_operands() {
    for op in [PrimOp::IntAdd, PrimOp::IntDiv, PrimOp::Equal, PrimOp::StrConcat] {
        assert!(op.arity().accepts(2), "{op}");
        assert!(!op.arity().accepts(1), "{op}");
        assert!(!op.arity().accepts(3), "{op}");
    }
}

#[test]
fn invoke_is_variadic_after_the_capability() {
    let op = PrimOp::Invoke(Name::EMPTY);
    assert!(!op.arity().accepts(0));
    assert!(op.arity().accepts(1));
    assert!(op.arity().accepts(4));
    assert_eq!(op.arity().expected(), 1);
}

#[test]
fn capability_takes_no_operands() {
    let op = PrimOp::Capability(Name::EMPTY);
    assert_eq!(op.arity(), Arity::Exact(0));
    assert_eq!(op.to_string(), "Capability");
}
