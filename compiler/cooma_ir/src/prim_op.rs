//! Primitive operation tags.
//!
//! The set of primitives is closed: the evaluator dispatches on `PrimOp` with
//! a single `match`, so adding an operation means adding a variant here and
//! an arm in the evaluator's primitive table.

use std::fmt;

use crate::Name;

/// Operand count accepted by a primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// The count named in an arity fault.
    #[inline]
    pub fn expected(self) -> usize {
        match self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
        }
    }
}

/// Tag of a primitive operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimOp {
    // Integer arithmetic
    IntAdd,
    IntSub,
    IntMul,
    IntDiv,
    IntMod,
    IntPow,
    IntNeg,
    IntAbs,

    // Integer comparison
    IntLt,
    IntLe,
    IntGt,
    IntGe,

    // Boolean
    BoolAnd,
    BoolOr,
    BoolNot,

    // String
    StrConcat,
    StrLength,
    StrSubstr,

    /// Structural equality on first-order values.
    Equal,

    /// Fetch the named capability from the runtime's registry.
    Capability(Name),
    /// Call a method on a capability: `(capability, args...)`.
    Invoke(Name),
}

impl PrimOp {
    /// Operand count this primitive accepts.
    pub fn arity(self) -> Arity {
        match self {
            PrimOp::Capability(_) => Arity::Exact(0),
            PrimOp::IntNeg | PrimOp::IntAbs | PrimOp::BoolNot | PrimOp::StrLength => {
                Arity::Exact(1)
            }
            PrimOp::IntAdd
            | PrimOp::IntSub
            | PrimOp::IntMul
            | PrimOp::IntDiv
            | PrimOp::IntMod
            | PrimOp::IntPow
            | PrimOp::IntLt
            | PrimOp::IntLe
            | PrimOp::IntGt
            | PrimOp::IntGe
            | PrimOp::BoolAnd
            | PrimOp::BoolOr
            | PrimOp::StrConcat
            | PrimOp::StrSubstr
            | PrimOp::Equal => Arity::Exact(2),
            PrimOp::Invoke(_) => Arity::AtLeast(1),
        }
    }

    /// Stable name used in faults and traces.
    pub fn name(self) -> &'static str {
        match self {
            PrimOp::IntAdd => "IntAdd",
            PrimOp::IntSub => "IntSub",
            PrimOp::IntMul => "IntMul",
            PrimOp::IntDiv => "IntDiv",
            PrimOp::IntMod => "IntMod",
            PrimOp::IntPow => "IntPow",
            PrimOp::IntNeg => "IntNeg",
            PrimOp::IntAbs => "IntAbs",
            PrimOp::IntLt => "IntLt",
            PrimOp::IntLe => "IntLe",
            PrimOp::IntGt => "IntGt",
            PrimOp::IntGe => "IntGe",
            PrimOp::BoolAnd => "BoolAnd",
            PrimOp::BoolOr => "BoolOr",
            PrimOp::BoolNot => "BoolNot",
            PrimOp::StrConcat => "StrConcat",
            PrimOp::StrLength => "StrLength",
            PrimOp::StrSubstr => "StrSubstr",
            PrimOp::Equal => "Equal",
            PrimOp::Capability(_) => "Capability",
            PrimOp::Invoke(_) => "Invoke",
        }
    }
}

impl fmt::Display for PrimOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
