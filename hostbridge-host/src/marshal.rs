//! Argument marshaling for message-like events.
//!
//! Host argument collections are turned into a contiguous array of borrowed
//! element pointers plus a count, the shape callbacks on the far side of the
//! ABI expect. The array only borrows; it never owns or clones a value, and
//! it cannot outlive the collection it was built from.
//!
//! An empty collection never allocates: it marshals to a null array with a
//! count of zero.

use std::fmt;
use std::ptr;

/// A borrowed, ordered array of element references.
pub struct Marshaled<'a, T: ?Sized> {
    items: Option<Box<[&'a T]>>,
}

impl<'a, T: ?Sized> Marshaled<'a, T> {
    /// The null/zero marshaling of an empty collection.
    pub const fn empty() -> Self {
        Self { items: None }
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_none()
    }

    /// Pointer to the first element reference, or null when empty.
    pub fn as_ptr(&self) -> *const &'a T {
        match &self.items {
            Some(items) => items.as_ptr(),
            None => ptr::null(),
        }
    }

    pub fn as_slice(&self) -> &[&'a T] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.as_slice().iter().copied()
    }
}

impl<'a, T> Marshaled<'a, T> {
    /// ABI view: an array of thin element pointers and its length.
    ///
    /// The pointers are valid only while `self` and the source collection
    /// are alive.
    pub fn as_raw_parts(&self) -> (*const *const T, u64) {
        (self.as_ptr().cast(), self.len() as u64)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Marshaled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Builds the element-pointer array for `items`, preserving order.
pub fn marshal<'a, T, I>(items: I) -> Marshaled<'a, T>
where
    T: ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: ExactSizeIterator,
{
    let iter = items.into_iter();
    if iter.len() == 0 {
        return Marshaled::empty();
    }
    Marshaled {
        items: Some(iter.collect()),
    }
}
