//! Structural pattern matching for `case`.

use cooma_ir::{Literal, Name, Pattern};
use smallvec::SmallVec;

use crate::value::Value;

/// Test `value` against `pattern`, pushing bindings onto `bindings`.
///
/// On failure `bindings` may hold partial bindings; callers discard them.
pub fn match_pattern(
    pattern: &Pattern,
    value: &Value,
    bindings: &mut SmallVec<[(Name, Value); 4]>,
) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Bind(name) => {
            bindings.push((*name, value.clone()));
            true
        }
        Pattern::Literal(lit) => literal_matches(lit, value),
        Pattern::Variant { tag, payload } => match value {
            Value::Variant(variant) if variant.tag == *tag => {
                match_pattern(payload, variant.payload(), bindings)
            }
            _ => false,
        },
        Pattern::Record(fields) => match value {
            Value::Record(record) => fields.iter().all(|(name, field_pattern)| {
                record
                    .get(*name)
                    .is_some_and(|field| match_pattern(field_pattern, field, bindings))
            }),
            Value::Unit => fields.is_empty(),
            _ => false,
        },
    }
}

fn literal_matches(lit: &Literal, value: &Value) -> bool {
    match (lit, value) {
        (Literal::Int(n), Value::Int(m)) => m.raw() == *n,
        (Literal::Bool(a), Value::Bool(b)) => a == b,
        (Literal::Str(a), Value::Str(b)) => a.as_str() == &**b,
        (Literal::Unit, Value::Unit) => true,
        _ => false,
    }
}
