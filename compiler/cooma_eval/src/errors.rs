//! Runtime faults.
//!
//! A fault is an `Err(EvalError)` carried out of the evaluator by `?`. No
//! term catches or rewrites one. `EvalErrorKind` is the structured category;
//! the `#[cold]` factory functions at the bottom of this module are the
//! construction API and fill in both `kind` and `message`.
//!
//! The fault site is recorded once, by the innermost term that detects the
//! fault. [`EvalError::at`] only fills an empty site, so outer terms passing
//! the fault along cannot overwrite it.

mod diagnostics;

use std::fmt;

use cooma_ir::{Span, Term};

use crate::Value;

/// Result of evaluating a term.
pub type EvalResult = Result<Value, EvalError>;

/// Typed fault category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },
    #[error("negative exponent in exponentiation")]
    NegativeExponent,
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    // Types
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("equality is not defined on {type_name} values")]
    NotComparable { type_name: String },
    #[error("{type_name} is not a function")]
    NotApplicable { type_name: String },

    // Access
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },
    #[error("record has no field {field}")]
    MissingField { field: String },

    // Calls
    #[error("{}", arity_message(.name, .expected, .got))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    // Matching
    #[error("non-exhaustive match")]
    NonExhaustiveMatch,

    // Capabilities
    #[error("missing capability: {capability}")]
    MissingCapability { capability: String },
    #[error("capability {capability} has no method {method}")]
    UnknownCapabilityMethod { capability: String, method: String },
    #[error("{capability} failed: {message}")]
    CapabilityFailed { capability: String, message: String },

    /// Catch-all for host faults with no structured kind.
    #[error("{message}")]
    Custom { message: String },
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "called with field references from the derived Display"
)]
fn arity_message(name: &str, expected: &usize, got: &usize) -> String {
    let arg_word = if *expected == 1 {
        "argument"
    } else {
        "arguments"
    };
    if name.is_empty() {
        format!("expected {expected} {arg_word}, got {got}")
    } else {
        format!("{name} expects {expected} {arg_word}, got {got}")
    }
}

/// Coarse fault class reported to embedders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaultClass {
    UnboundVariable,
    TypeFault,
    ArityFault,
    MatchFault,
    FieldFault,
    ArithmeticFault,
    StackOverflow,
    CapabilityFault,
    /// Host-raised fault with no structured kind.
    Other,
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultClass::UnboundVariable => "UnboundVariable",
            FaultClass::TypeFault => "TypeFault",
            FaultClass::ArityFault => "ArityFault",
            FaultClass::MatchFault => "MatchFault",
            FaultClass::FieldFault => "FieldFault",
            FaultClass::ArithmeticFault => "ArithmeticFault",
            FaultClass::StackOverflow => "StackOverflow",
            FaultClass::CapabilityFault => "CapabilityFault",
            FaultClass::Other => "Fault",
        };
        f.write_str(name)
    }
}

impl EvalErrorKind {
    pub fn class(&self) -> FaultClass {
        match self {
            Self::UnboundVariable { .. } => FaultClass::UnboundVariable,
            Self::TypeMismatch { .. } | Self::NotComparable { .. } | Self::NotApplicable { .. } => {
                FaultClass::TypeFault
            }
            Self::ArityMismatch { .. } => FaultClass::ArityFault,
            Self::NonExhaustiveMatch => FaultClass::MatchFault,
            Self::MissingField { .. } => FaultClass::FieldFault,
            Self::DivisionByZero
            | Self::ModuloByZero
            | Self::IntegerOverflow { .. }
            | Self::NegativeExponent
            | Self::IndexOutOfBounds { .. } => FaultClass::ArithmeticFault,
            Self::StackOverflow { .. } => FaultClass::StackOverflow,
            Self::MissingCapability { .. }
            | Self::UnknownCapabilityMethod { .. }
            | Self::CapabilityFailed { .. } => FaultClass::CapabilityFault,
            Self::Custom { .. } => FaultClass::Other,
        }
    }
}

/// The innermost term that detected a fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaultSite {
    pub span: Option<Span>,
    /// Term-kind label, e.g. `"Application"`.
    pub term: &'static str,
}

impl FaultSite {
    pub fn of(term: &Term) -> Self {
        FaultSite {
            span: term.span,
            term: term.label(),
        }
    }
}

impl fmt::Display for FaultSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {span}", self.term),
            None => f.write_str(self.term),
        }
    }
}

/// Secondary information attached to a fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        EvalNote {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        EvalNote {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// One call in a backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, or `<anonymous>`.
    pub name: String,
    /// Where the call happened.
    pub span: Option<Span>,
}

/// Snapshot of the call stack when a fault left a closure body, most
/// recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        write!(f, "call stack:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "\n  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
        }
        Ok(())
    }
}

/// A runtime fault.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory faults.
    pub message: String,
    /// Innermost offending term, once known.
    pub site: Option<FaultSite>,
    /// Call stack at the point the fault left the innermost closure body.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// A fault with no structured kind, for host code such as capabilities.
    pub fn new(message: impl Into<String>) -> Self {
        EvalError::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            site: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    pub fn class(&self) -> FaultClass {
        self.kind.class()
    }

    /// Record `term` as the fault site unless one is already recorded.
    #[must_use]
    pub fn at(self, term: &Term) -> Self {
        self.with_site(FaultSite::of(term))
    }

    /// Record `site` unless one is already recorded.
    #[must_use]
    pub fn with_site(mut self, site: FaultSite) -> Self {
        if self.site.is_none() {
            self.site = Some(site);
        }
        self
    }

    pub fn span(&self) -> Option<Span> {
        self.site.and_then(|site| site.span)
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(span) = self.span() {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Factory functions

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn negative_exponent() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeExponent)
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn not_comparable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotComparable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_applicable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotApplicable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn missing_field(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingField {
        field: field.to_string(),
    })
}

/// `name` is the callee as shown to users; empty for anonymous functions.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn non_exhaustive_match() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonExhaustiveMatch)
}

#[cold]
pub fn missing_capability(capability: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingCapability {
        capability: capability.to_string(),
    })
}

#[cold]
pub fn unknown_capability_method(capability: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownCapabilityMethod {
        capability: capability.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn capability_failed(capability: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CapabilityFailed {
        capability: capability.to_string(),
        message: message.into(),
    })
}
