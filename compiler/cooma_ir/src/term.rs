//! The executable term tree.
//!
//! A `Term` owns its children, so a compiled program is a tree with no
//! sharing between siblings. The one exception is function code: lambda
//! bodies sit behind an `Arc` so a closure value can keep its code alive after
//! the run that created it has returned, without copying the body.
//!
//! Terms are immutable once built and `Send + Sync`; the same tree can be
//! evaluated by several runs at once.

use std::sync::Arc;

use crate::{Literal, Name, Pattern, PrimOp, Span};

/// A node of the executable tree plus its optional source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub kind: TermKind,
    pub span: Option<Span>,
}

/// The closed set of term variants.
#[derive(Clone, Debug, PartialEq)]
pub enum TermKind {
    Literal(Literal),
    /// Variable reference.
    Var(Name),
    /// Function abstraction; evaluates to a closure.
    Abs(Arc<Lambda>),
    /// Function application.
    App { func: Box<Term>, args: Vec<Term> },
    /// `let name = value in body`.
    Let {
        name: Name,
        value: Box<Term>,
        body: Box<Term>,
    },
    /// Mutually recursive function bindings visible in every body and in `body`.
    LetRec { group: Arc<RecGroup>, body: Box<Term> },
    /// Two-way conditional on a boolean.
    If {
        cond: Box<Term>,
        then_branch: Box<Term>,
        else_branch: Box<Term>,
    },
    /// Ordered, first-match-wins dispatch.
    Case {
        scrutinee: Box<Term>,
        alts: Vec<Alternative>,
    },
    /// Record construction; field names are unique.
    Record(Vec<FieldInit>),
    /// Record field access.
    Field { base: Box<Term>, field: Name },
    /// Variant construction `<tag = payload>`.
    Variant { tag: Name, payload: Box<Term> },
    /// Primitive operation.
    Prim { op: PrimOp, args: Vec<Term> },
}

impl TermKind {
    /// Label naming the term variant in fault sites and traces.
    pub fn label(&self) -> &'static str {
        match self {
            TermKind::Literal(_) => "Literal",
            TermKind::Var(_) => "VariableReference",
            TermKind::Abs(_) => "Abstraction",
            TermKind::App { .. } => "Application",
            TermKind::Let { .. } => "Let",
            TermKind::LetRec { .. } => "LetRec",
            TermKind::If { .. } => "Conditional",
            TermKind::Case { .. } => "Case",
            TermKind::Record(_) => "Record",
            TermKind::Field { .. } => "FieldAccess",
            TermKind::Variant { .. } => "Variant",
            TermKind::Prim { .. } => "PrimitiveOperation",
        }
    }
}

/// Parameters and body of a function.
#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    /// Name for call-stack frames; `None` for anonymous functions.
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: Term,
}

impl Lambda {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A group of mutually recursive functions bound by one `LetRec`.
#[derive(Clone, Debug, PartialEq)]
pub struct RecGroup {
    pub functions: Vec<RecFunction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecFunction {
    pub name: Name,
    pub lambda: Lambda,
}

/// One `case` alternative.
#[derive(Clone, Debug, PartialEq)]
pub struct Alternative {
    pub pattern: Pattern,
    pub body: Term,
}

/// One field of a record literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInit {
    pub name: Name,
    pub value: Term,
}

// Factory methods. Front ends and tests build trees through these rather than
// spelling out `Box`/`Arc` plumbing.

impl Term {
    #[inline]
    pub fn new(kind: TermKind) -> Self {
        Term { kind, span: None }
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn literal(lit: impl Into<Literal>) -> Self {
        Term::new(TermKind::Literal(lit.into()))
    }

    pub fn int(n: i64) -> Self {
        Term::new(TermKind::Literal(Literal::Int(n)))
    }

    pub fn boolean(b: bool) -> Self {
        Term::new(TermKind::Literal(Literal::Bool(b)))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Term::new(TermKind::Literal(Literal::Str(s.into())))
    }

    pub fn unit() -> Self {
        Term::new(TermKind::Literal(Literal::Unit))
    }

    pub fn var(name: Name) -> Self {
        Term::new(TermKind::Var(name))
    }

    pub fn lambda(params: Vec<Name>, body: Term) -> Self {
        Term::new(TermKind::Abs(Arc::new(Lambda {
            name: None,
            params,
            body,
        })))
    }

    pub fn named_lambda(name: Name, params: Vec<Name>, body: Term) -> Self {
        Term::new(TermKind::Abs(Arc::new(Lambda {
            name: Some(name),
            params,
            body,
        })))
    }

    pub fn app(func: Term, args: Vec<Term>) -> Self {
        Term::new(TermKind::App {
            func: Box::new(func),
            args,
        })
    }

    pub fn let_in(name: Name, value: Term, body: Term) -> Self {
        Term::new(TermKind::Let {
            name,
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    /// `letrec` over `(name, params, body)` triples.
    pub fn letrec(functions: Vec<(Name, Vec<Name>, Term)>, body: Term) -> Self {
        let functions = functions
            .into_iter()
            .map(|(name, params, fn_body)| RecFunction {
                name,
                lambda: Lambda {
                    name: Some(name),
                    params,
                    body: fn_body,
                },
            })
            .collect();
        Term::new(TermKind::LetRec {
            group: Arc::new(RecGroup { functions }),
            body: Box::new(body),
        })
    }

    pub fn if_then_else(cond: Term, then_branch: Term, else_branch: Term) -> Self {
        Term::new(TermKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn case(scrutinee: Term, alts: Vec<(Pattern, Term)>) -> Self {
        Term::new(TermKind::Case {
            scrutinee: Box::new(scrutinee),
            alts: alts
                .into_iter()
                .map(|(pattern, body)| Alternative { pattern, body })
                .collect(),
        })
    }

    pub fn record(fields: Vec<(Name, Term)>) -> Self {
        Term::new(TermKind::Record(
            fields
                .into_iter()
                .map(|(name, value)| FieldInit { name, value })
                .collect(),
        ))
    }

    pub fn field(base: Term, field: Name) -> Self {
        Term::new(TermKind::Field {
            base: Box::new(base),
            field,
        })
    }

    pub fn variant(tag: Name, payload: Term) -> Self {
        Term::new(TermKind::Variant {
            tag,
            payload: Box::new(payload),
        })
    }

    pub fn prim(op: PrimOp, args: Vec<Term>) -> Self {
        Term::new(TermKind::Prim { op, args })
    }

    /// Label of this term's variant.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

// Trees have no depth limit, so children are freed from a worklist rather
// than by nested drop glue.
impl Drop for Term {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.kind, &mut pending);
        while let Some(mut term) = pending.pop() {
            detach_children(&mut term.kind, &mut pending);
        }
    }
}

/// Move the owned children of `kind` into `out`, leaving a leaf behind.
/// Shared lambda code is only taken apart by its last owner.
fn detach_children(kind: &mut TermKind, out: &mut Vec<Term>) {
    match std::mem::replace(kind, TermKind::Literal(Literal::Unit)) {
        TermKind::Literal(_) | TermKind::Var(_) => {}
        TermKind::Abs(lambda) => {
            if let Some(lambda) = Arc::into_inner(lambda) {
                out.push(lambda.body);
            }
        }
        TermKind::App { func, args } => {
            out.push(*func);
            out.extend(args);
        }
        TermKind::Let { value, body, .. } => {
            out.push(*value);
            out.push(*body);
        }
        TermKind::LetRec { group, body } => {
            if let Some(group) = Arc::into_inner(group) {
                out.extend(group.functions.into_iter().map(|f| f.lambda.body));
            }
            out.push(*body);
        }
        TermKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push(*cond);
            out.push(*then_branch);
            out.push(*else_branch);
        }
        TermKind::Case { scrutinee, alts } => {
            out.push(*scrutinee);
            out.extend(alts.into_iter().map(|alt| alt.body));
        }
        TermKind::Record(fields) => out.extend(fields.into_iter().map(|field| field.value)),
        TermKind::Field { base, .. } => out.push(*base),
        TermKind::Variant { payload, .. } => out.push(*payload),
        TermKind::Prim { args, .. } => out.extend(args),
    }
}
