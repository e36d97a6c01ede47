//! The primitive operation table.
//!
//! Dispatch is a single `match` over `(PrimOp, operands)`. Operands arrive
//! already evaluated, left to right. An operand slice that fits no arm for
//! its op is an arity fault; a value of the wrong variant is a type fault.

use cooma_ir::{PrimOp, StringInterner};

use crate::capability::CapabilityRegistry;
use crate::errors::{
    arity_mismatch, division_by_zero, index_out_of_bounds, integer_overflow, missing_capability,
    modulo_by_zero, negative_exponent, not_comparable, type_mismatch, EvalError, EvalResult,
};
use crate::value::{ScalarInt, Value};

/// Read-only state a primitive may consult.
#[derive(Clone, Copy)]
pub struct PrimitiveContext<'a> {
    pub names: &'a StringInterner,
    pub capabilities: &'a CapabilityRegistry,
}

/// Apply `op` to evaluated `args`.
pub fn eval_primitive(op: PrimOp, args: &[Value], ctx: PrimitiveContext<'_>) -> EvalResult {
    match (op, args) {
        (PrimOp::IntAdd, [a, b]) => checked_arith(int(a)?.checked_add(int(b)?), "addition"),
        (PrimOp::IntSub, [a, b]) => checked_arith(int(a)?.checked_sub(int(b)?), "subtraction"),
        (PrimOp::IntMul, [a, b]) => {
            checked_arith(int(a)?.checked_mul(int(b)?), "multiplication")
        }
        (PrimOp::IntDiv, [a, b]) => {
            let (a, b) = (int(a)?, int(b)?);
            if b.is_zero() {
                return Err(division_by_zero());
            }
            checked_arith(a.checked_div(b), "division")
        }
        (PrimOp::IntMod, [a, b]) => {
            let (a, b) = (int(a)?, int(b)?);
            if b.is_zero() {
                return Err(modulo_by_zero());
            }
            checked_arith(a.checked_rem(b), "remainder")
        }
        (PrimOp::IntPow, [a, b]) => int_pow(int(a)?, int(b)?),
        (PrimOp::IntNeg, [a]) => checked_arith(int(a)?.checked_neg(), "negation"),
        (PrimOp::IntAbs, [a]) => checked_arith(int(a)?.checked_abs(), "absolute value"),

        (PrimOp::IntLt, [a, b]) => Ok(Value::Bool(int(a)? < int(b)?)),
        (PrimOp::IntLe, [a, b]) => Ok(Value::Bool(int(a)? <= int(b)?)),
        (PrimOp::IntGt, [a, b]) => Ok(Value::Bool(int(a)? > int(b)?)),
        (PrimOp::IntGe, [a, b]) => Ok(Value::Bool(int(a)? >= int(b)?)),

        (PrimOp::BoolAnd, [a, b]) => {
            let (a, b) = (boolean(a)?, boolean(b)?);
            Ok(Value::Bool(a && b))
        }
        (PrimOp::BoolOr, [a, b]) => {
            let (a, b) = (boolean(a)?, boolean(b)?);
            Ok(Value::Bool(a || b))
        }
        (PrimOp::BoolNot, [a]) => Ok(Value::Bool(!boolean(a)?)),

        (PrimOp::StrConcat, [a, b]) => {
            let (a, b) = (string(a)?, string(b)?);
            let mut joined = String::with_capacity(a.len().saturating_add(b.len()));
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (PrimOp::StrLength, [s]) => {
            let len = string(s)?.chars().count();
            i64::try_from(len)
                .map(Value::int)
                .map_err(|_| integer_overflow("string length"))
        }
        (PrimOp::StrSubstr, [s, from]) => substring(string(s)?, int(from)?),

        (PrimOp::Equal, [a, b]) => values_equal(a, b).map(Value::Bool),

        (PrimOp::Capability(name), []) => ctx
            .capabilities
            .get(name)
            .map(Value::Capability)
            .ok_or_else(|| missing_capability(ctx.names.lookup(name))),
        (PrimOp::Invoke(method), [target, rest @ ..]) => match target {
            Value::Capability(handle) => handle.invoke(ctx.names.lookup(method), rest),
            other => Err(type_mismatch("Capability", other.type_name())),
        },

        _ => Err(arity_mismatch(
            &format!("primitive {op}"),
            op.arity().expected(),
            args.len(),
        )),
    }
}

/// Structural equality on first-order values.
///
/// Records are equal when they have the same fields with equal values,
/// regardless of field order. Closures and capabilities have no structural
/// equality and fault.
pub fn values_equal(a: &Value, b: &Value) -> Result<bool, EvalError> {
    match (a, b) {
        (Value::Closure(_) | Value::Capability(_), _) => Err(not_comparable(a.type_name())),
        (_, Value::Closure(_) | Value::Capability(_)) => Err(not_comparable(b.type_name())),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Str(x), Value::Str(y)) => Ok(**x == **y),
        (Value::Unit, Value::Unit) => Ok(true),
        (Value::Record(x), Value::Record(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (name, left) in x.fields() {
                match y.get(*name) {
                    Some(right) => {
                        if !values_equal(left, right)? {
                            return Ok(false);
                        }
                    }
                    None => return Ok(false),
                }
            }
            Ok(true)
        }
        (Value::Variant(x), Value::Variant(y)) => {
            if x.tag != y.tag {
                return Ok(false);
            }
            values_equal(x.payload(), y.payload())
        }
        _ => Err(type_mismatch(a.type_name(), b.type_name())),
    }
}

#[inline]
fn checked_arith(result: Option<ScalarInt>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

fn int_pow(base: ScalarInt, exp: ScalarInt) -> EvalResult {
    if exp.is_negative() {
        return Err(negative_exponent());
    }
    let exp = u32::try_from(exp.raw()).map_err(|_| integer_overflow("exponentiation"))?;
    checked_arith(base.checked_pow(exp), "exponentiation")
}

fn substring(s: &str, from: ScalarInt) -> EvalResult {
    let len = s.chars().count();
    let start = usize::try_from(from.raw())
        .ok()
        .filter(|start| *start <= len)
        .ok_or_else(|| index_out_of_bounds(from.raw(), len))?;
    Ok(Value::string(s.chars().skip(start).collect::<String>()))
}

#[inline]
fn int(value: &Value) -> Result<ScalarInt, EvalError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(type_mismatch("Int", other.type_name())),
    }
}

#[inline]
fn boolean(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(type_mismatch("Boolean", other.type_name())),
    }
}

#[inline]
fn string(value: &Value) -> Result<&str, EvalError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(type_mismatch("String", other.type_name())),
    }
}
