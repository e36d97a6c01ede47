//! Patterns for `case` alternatives.

use crate::{Literal, Name};

/// A structural pattern tested against a case discriminant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `_`: matches anything, binds nothing.
    Wildcard,
    /// `x`: matches anything, binds it to `x`.
    Bind(Name),
    /// Matches a value equal to the literal.
    Literal(Literal),
    /// `<tag = p>`: matches a variant with this tag whose payload matches `p`.
    Variant { tag: Name, payload: Box<Pattern> },
    /// `{f1 = p1, ...}`: matches a record that has at least the listed
    /// fields, each matching its sub-pattern. Other fields are ignored.
    Record(Vec<(Name, Pattern)>),
}

impl Pattern {
    pub fn variant(tag: Name, payload: Pattern) -> Self {
        Pattern::Variant {
            tag,
            payload: Box::new(payload),
        }
    }

    /// Names bound by this pattern, in left-to-right order.
    pub fn bound_names(&self) -> Vec<Name> {
        fn collect(pattern: &Pattern, out: &mut Vec<Name>) {
            match pattern {
                Pattern::Wildcard | Pattern::Literal(_) => {}
                Pattern::Bind(name) => out.push(*name),
                Pattern::Variant { payload, .. } => collect(payload, out),
                Pattern::Record(fields) => {
                    for (_, field) in fields {
                        collect(field, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}
