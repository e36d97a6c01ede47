//! Diagnostics for runtime faults.
//!
//! A diagnostic has:
//! - an error code for searchability (E6xxx for runtime faults)
//! - a message saying what went wrong
//! - a primary span saying where
//! - notes and suggestions for context
//!
//! The evaluator converts its faults into `Diagnostic`s; rendering them is up
//! to the embedding layer, with [`emitter::TerminalEmitter`] as the default.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
