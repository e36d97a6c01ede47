//! Cooma IR - the executable term representation consumed by the evaluator.
//!
//! This crate provides:
//! - `Term`/`TermKind`: the closed, immutable term tree
//! - `Pattern`, `Literal`, `PrimOp`: the data terms are built from
//! - `Name`/`StringInterner`: interned identifiers
//! - `Span`: source locations carried into runtime faults
//! - `free_variables`: a well-scopedness check for front ends

mod free_vars;
mod interner;
mod literal;
mod name;
mod pattern;
mod prim_op;
mod span;
mod term;

pub use free_vars::{free_variables, is_closed, FreeVariable};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use literal::Literal;
pub use name::Name;
pub use pattern::Pattern;
pub use prim_op::{Arity, PrimOp};
pub use span::{Span, SpanError};
pub use term::{Alternative, FieldInit, Lambda, RecFunction, RecGroup, Term, TermKind};
