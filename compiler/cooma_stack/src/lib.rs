//! Native stack growth for deep recursion.
//!
//! Term trees have no depth limit, so every pass that recurses over them
//! (scope analysis, evaluation) routes each level through
//! [`ensure_sufficient_stack`]. On native targets the stack is grown with
//! `stacker` when less than the red zone remains; WASM manages its own stack
//! and runs the closure directly.

/// Grow when less than this much stack is left (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the native stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
