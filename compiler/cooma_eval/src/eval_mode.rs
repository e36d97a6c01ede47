//! Evaluation policy.
//!
//! `EvalMode` bounds how deep closure applications may nest in one run.
//! The limit turns runaway recursion into a `StackOverflow` fault at the
//! offending application instead of exhausting memory.

/// Call depth limit used by [`EvalMode::Interpret`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Evaluation mode, chosen once per `Runtime`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode, limited to [`DEFAULT_MAX_CALL_DEPTH`] nested calls.
    #[default]
    Interpret,
    /// A caller-chosen call depth limit, e.g. for sandboxed or test runs.
    Bounded { max_depth: usize },
    /// No call depth limit; only the native stack growth applies.
    Unbounded,
}

impl EvalMode {
    /// Maximum nested applications, or `None` for no limit.
    #[inline]
    pub fn max_call_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => Some(DEFAULT_MAX_CALL_DEPTH),
            Self::Bounded { max_depth } => Some(*max_depth),
            Self::Unbounded => None,
        }
    }
}
