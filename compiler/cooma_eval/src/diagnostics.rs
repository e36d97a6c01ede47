//! Call tracking for the interpreter.
//!
//! - `CallStack`: live frames of the current run, with the depth limit
//! - `CallFrame`: one closure application
//! - `EvalCounters`: optional counters filled by `Runtime::run_profiled`

use cooma_ir::{Name, Span, StringInterner};

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// One closure application in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function name, if the closure has one.
    pub name: Option<Name>,
    /// Span of the application term (the call site, not the definition).
    pub call_span: Option<Span>,
}

/// Live call stack for one run.
///
/// Each application pushes a frame and pops it when the body returns. The
/// depth check happens in `push`.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` of `None` means no limit.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, or fail with `StackOverflow` if the limit is reached.
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame
                    .name
                    .map_or("<anonymous>", |name| interner.lookup(name))
                    .to_string(),
                span: frame.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot to `err`, unless the stack is empty.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Evaluation counters.
///
/// Held as `Option<EvalCounters>` by the interpreter; when `None` nothing is
/// counted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub terms_evaluated: u64,
    pub applications: u64,
    pub primitive_calls: u64,
    pub case_dispatches: u64,
    /// Deepest call stack reached.
    pub max_call_depth: usize,
}

impl EvalCounters {
    #[inline]
    pub fn count_term(&mut self) {
        self.terms_evaluated = self.terms_evaluated.wrapping_add(1);
    }

    #[inline]
    pub fn count_application(&mut self, depth: usize) {
        self.applications = self.applications.wrapping_add(1);
        self.max_call_depth = self.max_call_depth.max(depth);
    }

    #[inline]
    pub fn count_primitive(&mut self) {
        self.primitive_calls = self.primitive_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_case(&mut self) {
        self.case_dispatches = self.case_dispatches.wrapping_add(1);
    }

    /// Add another run's counters into these.
    pub fn merge(&mut self, other: &EvalCounters) {
        self.terms_evaluated = self.terms_evaluated.wrapping_add(other.terms_evaluated);
        self.applications = self.applications.wrapping_add(other.applications);
        self.primitive_calls = self.primitive_calls.wrapping_add(other.primitive_calls);
        self.case_dispatches = self.case_dispatches.wrapping_add(other.case_dispatches);
        self.max_call_depth = self.max_call_depth.max(other.max_call_depth);
    }

    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Terms evaluated:  {}\n  \
             Applications:     {}\n  \
             Primitive calls:  {}\n  \
             Case dispatches:  {}\n  \
             Max call depth:   {}",
            self.terms_evaluated,
            self.applications,
            self.primitive_calls,
            self.case_dispatches,
            self.max_call_depth,
        )
    }
}

#[cfg(test)]
mod tests;
