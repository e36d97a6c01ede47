//! The lexical environment (Rho).
//!
//! A persistent chain of immutable frames. Extending creates a child frame
//! and leaves the receiver untouched, so closures can capture a `Rho` by
//! cloning an `Arc` and later extensions never disturb them.

use std::fmt;
use std::sync::Arc;

use cooma_ir::Name;
use smallvec::SmallVec;

use crate::Value;

/// Bindings introduced by one scope. Most scopes bind a handful of names.
type Bindings = SmallVec<[(Name, Value); 4]>;

struct Frame {
    bindings: Bindings,
    parent: Rho,
}

/// Immutable, shareable environment mapping names to values.
#[derive(Clone, Default)]
pub struct Rho {
    frame: Option<Arc<Frame>>,
}

impl Rho {
    /// The empty top-level environment.
    pub fn new() -> Self {
        Rho { frame: None }
    }

    /// Find the innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut current = self.frame.as_deref();
        while let Some(frame) = current {
            // Later bindings in a batch shadow earlier ones.
            if let Some((_, value)) = frame.bindings.iter().rev().find(|(n, _)| *n == name) {
                return Some(value.clone());
            }
            current = frame.parent.frame.as_deref();
        }
        None
    }

    pub fn contains(&self, name: Name) -> bool {
        self.frames()
            .any(|frame| frame.bindings.iter().any(|(n, _)| *n == name))
    }

    /// A child environment binding `name` to `value`.
    #[must_use]
    pub fn extend(&self, name: Name, value: Value) -> Rho {
        let mut bindings = Bindings::new();
        bindings.push((name, value));
        self.push_frame(bindings)
    }

    /// A child environment with all `bindings` in one frame.
    ///
    /// An empty batch returns the receiver. If a name repeats, the later
    /// binding wins.
    #[must_use]
    pub fn extend_many<I>(&self, bindings: I) -> Rho
    where
        I: IntoIterator<Item = (Name, Value)>,
    {
        let bindings: Bindings = bindings.into_iter().collect();
        if bindings.is_empty() {
            return self.clone();
        }
        self.push_frame(bindings)
    }

    /// Number of frames in the chain.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    /// Names bound by the innermost frame, in binding order.
    pub fn local_names(&self) -> Vec<Name> {
        self.frame
            .as_deref()
            .map(|frame| frame.bindings.iter().map(|(name, _)| *name).collect())
            .unwrap_or_default()
    }

    /// Whether both environments are the same chain.
    pub fn ptr_eq(&self, other: &Rho) -> bool {
        match (&self.frame, &other.frame) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn push_frame(&self, bindings: Bindings) -> Rho {
        Rho {
            frame: Some(Arc::new(Frame {
                bindings,
                parent: self.clone(),
            })),
        }
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.frame.as_deref(), |frame| frame.parent.frame.as_deref())
    }
}

// A chain is as long as the deepest nesting of binders, so the last owner
// unlinks it frame by frame instead of through nested drop glue.
impl Drop for Frame {
    fn drop(&mut self) {
        let mut parent = self.parent.frame.take();
        while let Some(frame) = parent {
            parent = Arc::into_inner(frame).and_then(|mut frame| frame.parent.frame.take());
        }
    }
}

impl fmt::Debug for Rho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| {
                frame
                    .bindings
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests;
