//! Closure application.

use cooma_ir::Term;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, not_applicable, EvalResult};
use crate::value::{ClosureValue, Value};
use crate::Rho;

impl Interpreter<'_> {
    pub(super) fn eval_app(
        &mut self,
        term: &Term,
        func: &Term,
        args: &[Term],
        rho: &Rho,
    ) -> EvalResult {
        let callee = self.eval(func, rho)?;
        let closure = match callee {
            Value::Closure(closure) => closure,
            other => return Err(not_applicable(other.type_name()).at(term)),
        };
        let values = self.eval_all(args, rho)?;
        self.apply(term, &closure, values)
    }

    /// Call `closure` with evaluated `args`; `call_site` becomes the site of
    /// arity and depth faults.
    ///
    /// The body runs in the closure's captured environment extended with one
    /// frame of parameters. A fault leaving the body gets a backtrace here if
    /// it has none yet, so the snapshot is taken at the innermost call.
    pub fn apply<I>(&mut self, call_site: &Term, closure: &ClosureValue, args: I) -> EvalResult
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: ExactSizeIterator,
    {
        let args = args.into_iter();
        let lambda = closure.lambda();
        if lambda.arity() != args.len() {
            return Err(arity_mismatch(&self.callee_name(closure), lambda.arity(), args.len())
                .at(call_site));
        }

        self.call_stack
            .push(CallFrame {
                name: closure.name(),
                call_span: call_site.span,
            })
            .map_err(|err| err.at(call_site))?;
        let depth = self.call_stack.depth();
        if let Some(counters) = &mut self.counters {
            counters.count_application(depth);
        }
        tracing::trace!(
            function = closure.name().map(|name| self.names.lookup(name)),
            depth,
            "apply"
        );

        let env = closure
            .body_env()
            .extend_many(lambda.params.iter().copied().zip(args));
        let result = self.eval(&lambda.body, &env).map_err(|err| {
            if err.backtrace.is_some() {
                err
            } else {
                self.call_stack.attach_backtrace(err, self.names)
            }
        });
        self.call_stack.pop();
        result
    }

    fn callee_name(&self, closure: &ClosureValue) -> String {
        closure
            .name()
            .map(|name| format!("function `{}`", self.names.lookup(name)))
            .unwrap_or_default()
    }
}
