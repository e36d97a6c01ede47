//! Shared, immutable heap payloads for `Value`.
//!
//! `Heap<T>` can only be built inside the `value` module, so every heap
//! allocation goes through a `Value::` factory method.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted payload of a `Value`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(super) fn from_arc(inner: Arc<T>) -> Self {
        Heap(inner)
    }

    /// Mutable access when this handle is the only owner.
    #[inline]
    pub(super) fn get_mut(&mut self) -> Option<&mut T> {
        Arc::get_mut(&mut self.0)
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl<T: ?Sized + Eq> Eq for Heap<T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_allocation() {
        let a = Heap::new(String::from("shared"));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(&*b, "shared");
    }

    #[test]
    fn unique_handles_allow_mutation() {
        let mut a = Heap::new(1);
        if let Some(value) = a.get_mut() {
            *value = 2;
        }
        assert_eq!(*a, 2);
        let b = a.clone();
        assert!(a.get_mut().is_none());
        drop(b);
        assert!(a.get_mut().is_some());
    }

    #[test]
    fn equality_is_structural() {
        let a = Heap::new(vec![1, 2, 3]);
        let b = Heap::new(vec![1, 2, 3]);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_ne!(a, Heap::new(vec![3]));
    }
}
