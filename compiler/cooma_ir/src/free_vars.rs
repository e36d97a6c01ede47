//! Well-scopedness analysis.
//!
//! Reports variable references that no enclosing binder introduces. A front
//! end can run this once after building a tree; the evaluator still faults on
//! an unbound reference at run time, so skipping the check is safe.

use cooma_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::{Name, Span, Term, TermKind};

/// A reference to a variable that nothing binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FreeVariable {
    pub name: Name,
    /// Location of the first such reference.
    pub span: Option<Span>,
}

/// Collect the free variables of `term`, each reported once at its first
/// reference in evaluation order.
pub fn free_variables(term: &Term) -> Vec<FreeVariable> {
    let mut walker = Walker {
        scope: Vec::new(),
        seen: FxHashSet::default(),
        free: Vec::new(),
    };
    walker.walk(term);
    walker.free
}

/// `true` when `term` has no free variables.
pub fn is_closed(term: &Term) -> bool {
    free_variables(term).is_empty()
}

struct Walker {
    /// Names bound at the current point, innermost last.
    scope: Vec<Name>,
    seen: FxHashSet<Name>,
    free: Vec<FreeVariable>,
}

impl Walker {
    fn walk(&mut self, term: &Term) {
        ensure_sufficient_stack(|| self.walk_inner(term));
    }

    fn walk_inner(&mut self, term: &Term) {
        match &term.kind {
            TermKind::Literal(_) => {}
            TermKind::Var(name) => {
                if !self.scope.contains(name) && self.seen.insert(*name) {
                    self.free.push(FreeVariable {
                        name: *name,
                        span: term.span,
                    });
                }
            }
            TermKind::Abs(lambda) => self.scoped(&lambda.params, |w| w.walk(&lambda.body)),
            TermKind::App { func, args } => {
                self.walk(func);
                for arg in args {
                    self.walk(arg);
                }
            }
            TermKind::Let { name, value, body } => {
                self.walk(value);
                self.scoped(std::slice::from_ref(name), |w| w.walk(body));
            }
            TermKind::LetRec { group, body } => {
                let names: Vec<Name> = group.functions.iter().map(|f| f.name).collect();
                self.scoped(&names, |w| {
                    for function in &group.functions {
                        w.scoped(&function.lambda.params, |w| w.walk(&function.lambda.body));
                    }
                    w.walk(body);
                });
            }
            TermKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.walk(cond);
                self.walk(then_branch);
                self.walk(else_branch);
            }
            TermKind::Case { scrutinee, alts } => {
                self.walk(scrutinee);
                for alt in alts {
                    let bound = alt.pattern.bound_names();
                    self.scoped(&bound, |w| w.walk(&alt.body));
                }
            }
            TermKind::Record(fields) => {
                for field in fields {
                    self.walk(&field.value);
                }
            }
            TermKind::Field { base, .. } => self.walk(base),
            TermKind::Variant { payload, .. } => self.walk(payload),
            TermKind::Prim { args, .. } => {
                for arg in args {
                    self.walk(arg);
                }
            }
        }
    }

    fn scoped(&mut self, names: &[Name], f: impl FnOnce(&mut Self)) {
        let mark = self.scope.len();
        self.scope.extend_from_slice(names);
        f(self);
        self.scope.truncate(mark);
    }
}
