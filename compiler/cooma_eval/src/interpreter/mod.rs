//! Tree-walking evaluator for CoomaIR.
//!
//! `Interpreter::eval` dispatches on the closed `TermKind` set. Children are
//! evaluated left to right with the environment threaded through; a fault
//! returns through every frame by `?`, tagged with the innermost term that
//! detected it.
//!
//! One `Interpreter` serves one run: it owns the call stack and the
//! optional counters, and borrows everything else read-only.

mod apply;
mod matching;

use cooma_ir::{Alternative, FieldInit, Name, PrimOp, StringInterner, Term, TermKind};
use cooma_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::capability::CapabilityRegistry;
use crate::diagnostics::{CallStack, EvalCounters};
use crate::errors::{
    missing_field, non_exhaustive_match, type_mismatch, unbound_variable, EvalError, EvalNote,
    EvalResult,
};
use crate::eval_mode::EvalMode;
use crate::primitives::{eval_primitive, PrimitiveContext};
use crate::value::{bind_rec_group, Value};
use crate::Rho;

pub use matching::match_pattern;

/// Per-run evaluator state.
pub struct Interpreter<'a> {
    names: &'a StringInterner,
    capabilities: &'a CapabilityRegistry,
    call_stack: CallStack,
    counters: Option<EvalCounters>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        names: &'a StringInterner,
        capabilities: &'a CapabilityRegistry,
        mode: &EvalMode,
    ) -> Self {
        Interpreter {
            names,
            capabilities,
            call_stack: CallStack::new(mode.max_call_depth()),
            counters: None,
        }
    }

    /// Start counting terms, applications, primitives and case dispatches.
    #[must_use]
    pub fn with_counters(mut self) -> Self {
        self.counters = Some(EvalCounters::default());
        self
    }

    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }

    pub fn into_counters(self) -> Option<EvalCounters> {
        self.counters
    }

    /// Current number of active applications.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate `term` in `rho`.
    #[tracing::instrument(level = "trace", skip_all, fields(term = term.label()))]
    pub fn eval(&mut self, term: &Term, rho: &Rho) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(term, rho))
    }

    fn eval_inner(&mut self, term: &Term, rho: &Rho) -> EvalResult {
        if let Some(counters) = &mut self.counters {
            counters.count_term();
        }

        match &term.kind {
            TermKind::Literal(lit) => Ok(Value::from_literal(lit)),
            TermKind::Var(name) => rho
                .lookup(*name)
                .ok_or_else(|| unbound_variable(self.names.lookup(*name)).at(term)),
            TermKind::Abs(lambda) => Ok(Value::closure(lambda.clone(), rho.clone())),
            TermKind::App { func, args } => self.eval_app(term, func, args, rho),
            TermKind::Let { name, value, body } => {
                let value = self.eval(value, rho)?;
                self.eval(body, &rho.extend(*name, value))
            }
            TermKind::LetRec { group, body } => self.eval(body, &bind_rec_group(group, rho)),
            TermKind::If {
                cond,
                then_branch,
                else_branch,
            } => match self.eval(cond, rho)? {
                Value::Bool(true) => self.eval(then_branch, rho),
                Value::Bool(false) => self.eval(else_branch, rho),
                other => Err(type_mismatch("Boolean", other.type_name()).at(term)),
            },
            TermKind::Case { scrutinee, alts } => self.eval_case(term, scrutinee, alts, rho),
            TermKind::Record(fields) => self.eval_record(fields, rho),
            TermKind::Field { base, field } => self.eval_field(term, base, *field, rho),
            TermKind::Variant { tag, payload } => {
                let payload = self.eval(payload, rho)?;
                Ok(Value::variant(*tag, payload))
            }
            TermKind::Prim { op, args } => self.eval_prim(term, *op, args, rho),
        }
    }

    /// Evaluate `terms` left to right, stopping at the first fault.
    fn eval_all(&mut self, terms: &[Term], rho: &Rho) -> Result<SmallVec<[Value; 4]>, EvalError> {
        let mut values = SmallVec::with_capacity(terms.len());
        for term in terms {
            values.push(self.eval(term, rho)?);
        }
        Ok(values)
    }

    fn eval_record(&mut self, fields: &[FieldInit], rho: &Rho) -> EvalResult {
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            values.push((field.name, self.eval(&field.value, rho)?));
        }
        Ok(Value::record(values))
    }

    fn eval_field(&mut self, term: &Term, base: &Term, field: Name, rho: &Rho) -> EvalResult {
        match self.eval(base, rho)? {
            Value::Record(record) => record
                .get(field)
                .cloned()
                .ok_or_else(|| missing_field(self.names.lookup(field)).at(term)),
            Value::Unit => Err(missing_field(self.names.lookup(field)).at(term)),
            other => Err(type_mismatch("Record", other.type_name()).at(term)),
        }
    }

    fn eval_case(
        &mut self,
        term: &Term,
        scrutinee: &Term,
        alts: &[Alternative],
        rho: &Rho,
    ) -> EvalResult {
        let value = self.eval(scrutinee, rho)?;
        if let Some(counters) = &mut self.counters {
            counters.count_case();
        }

        for (index, alt) in alts.iter().enumerate() {
            let mut bindings = SmallVec::<[(Name, Value); 4]>::new();
            if match_pattern(&alt.pattern, &value, &mut bindings) {
                tracing::trace!(alternative = index, "case matched");
                return self.eval(&alt.body, &rho.extend_many(bindings));
            }
        }

        Err(non_exhaustive_match()
            .at(term)
            .with_note(EvalNote::new(format!(
                "scrutinee was {}",
                value.display(self.names)
            ))))
    }

    fn eval_prim(&mut self, term: &Term, op: PrimOp, args: &[Term], rho: &Rho) -> EvalResult {
        let values = self.eval_all(args, rho)?;
        if let Some(counters) = &mut self.counters {
            counters.count_primitive();
        }
        let ctx = PrimitiveContext {
            names: self.names,
            capabilities: self.capabilities,
        };
        eval_primitive(op, &values, ctx).map_err(|err| err.at(term))
    }
}
