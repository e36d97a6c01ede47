//! Fault to diagnostic conversion.
//!
//! # Error code ranges (E6xxx)
//!
//! - E6001–E6005: arithmetic
//! - E6010–E6011: type faults on values
//! - E6020–E6023: unbound variables and missing fields
//! - E6030–E6032: calls (arity, depth, applicability)
//! - E6040: pattern matching
//! - E6060–E6062: capabilities
//! - E6099: uncategorized

use cooma_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind};

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero => ErrorCode::E6001,
            Self::ModuloByZero => ErrorCode::E6002,
            Self::IntegerOverflow { .. } => ErrorCode::E6003,
            Self::NegativeExponent => ErrorCode::E6004,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6005,
            Self::TypeMismatch { .. } => ErrorCode::E6010,
            Self::NotComparable { .. } => ErrorCode::E6011,
            Self::UnboundVariable { .. } => ErrorCode::E6020,
            Self::MissingField { .. } => ErrorCode::E6023,
            Self::ArityMismatch { .. } => ErrorCode::E6030,
            Self::StackOverflow { .. } => ErrorCode::E6031,
            Self::NotApplicable { .. } => ErrorCode::E6032,
            Self::NonExhaustiveMatch => ErrorCode::E6040,
            Self::MissingCapability { .. } => ErrorCode::E6060,
            Self::UnknownCapabilityMethod { .. } => ErrorCode::E6061,
            Self::CapabilityFailed { .. } => ErrorCode::E6062,
            Self::Custom { .. } => ErrorCode::E6099,
        }
    }

    /// Short label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division by zero here",
            Self::ModuloByZero => "modulo by zero here",
            Self::IntegerOverflow { .. } => "overflow occurred here",
            Self::NegativeExponent => "negative exponent",
            Self::IndexOutOfBounds { .. } => "index out of bounds",
            Self::TypeMismatch { .. } => "type mismatch",
            Self::NotComparable { .. } => "cannot be compared",
            Self::UnboundVariable { .. } => "not found in this scope",
            Self::MissingField { .. } => "field not found",
            Self::ArityMismatch { .. } => "wrong number of arguments",
            Self::StackOverflow { .. } => "call depth limit exceeded",
            Self::NotApplicable { .. } => "not a function",
            Self::NonExhaustiveMatch => "no alternative matched",
            Self::MissingCapability { .. } => "capability not provided",
            Self::UnknownCapabilityMethod { .. } => "method not found",
            Self::CapabilityFailed { .. } => "capability call failed",
            Self::Custom { .. } => "runtime error",
        }
    }

    /// Actionable suggestion, for faults that have an obvious fix.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DivisionByZero | Self::ModuloByZero => {
                Some("add a zero check before dividing".to_string())
            }
            Self::NonExhaustiveMatch => {
                Some("add a wildcard `_` alternative to cover remaining cases".to_string())
            }
            Self::StackOverflow { .. } => {
                Some("check the recursion has a reachable base case".to_string())
            }
            Self::MissingCapability { capability } => Some(format!(
                "register a `{capability}` capability with the runtime"
            )),
            _ => None,
        }
    }
}

impl EvalError {
    /// Convert this fault into a `Diagnostic` with its E6xxx code.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code()).with_message(&self.message);

        if let Some(span) = self.span() {
            diag = diag.with_label(span, self.kind.primary_label());
        }

        for note in &self.notes {
            diag = match note.span {
                Some(span) => diag.with_secondary_label(span, &note.message),
                None => diag.with_note(&note.message),
            };
        }

        if let Some(bt) = &self.backtrace {
            if !bt.is_empty() {
                diag = diag.with_note(bt.to_string());
            }
        }

        if let Some(suggestion) = self.kind.suggestion() {
            diag = diag.with_suggestion(suggestion);
        }

        diag
    }
}
