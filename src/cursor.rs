//! Bidirectional cursors over the elements of a [`ChunkedDeque`].
//!
//! A [`Cursor`] is created by [`ChunkedDeque::front`] or [`ChunkedDeque::back`]
//! and steps one element at a time with [`next`](Cursor::next) and
//! [`prev`](Cursor::prev), crossing chunk boundaries as needed. Stepping past
//! either end consumes the cursor and yields [`None`].
//!
//! The cursor borrows the deque, so it cannot outlive a structural change:
//!
//! ```compile_fail
//! let mut deque = chunked_deque::ChunkedDeque::<i32>::new();
//! deque.push_back(1);
//! let cursor = deque.front().unwrap();
//! deque.push_back(2);
//! assert_eq!(*cursor.get(), 1);
//! ```

use core::fmt::{self, Debug, Formatter};

use crate::deque::{ChunkedDeque, Position, DEFAULT_CHUNK_CAPACITY};

/// A movable position referring to one live element of a deque.
///
/// # Examples
/// ```
/// let deque: chunked_deque::ChunkedDeque<u32> = (0..10).collect();
///
/// let mut forward = Vec::new();
/// let mut cursor = deque.front();
/// while let Some(c) = cursor {
///     forward.push(*c.get());
///     cursor = c.next();
/// }
/// assert_eq!(forward, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
///
/// let mut backward = Vec::new();
/// let mut cursor = deque.back();
/// while let Some(c) = cursor {
///     backward.push(*c.get());
///     cursor = c.prev();
/// }
/// assert_eq!(backward, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
/// ```
pub struct Cursor<'a, T, const C: usize = DEFAULT_CHUNK_CAPACITY> {
    deque: &'a ChunkedDeque<T, C>,
    at: Position,
    position: usize,
    value: &'a T,
}

impl<'a, T, const C: usize> Cursor<'a, T, C> {
    /// `at` must hold the live element at logical offset `position`.
    pub(crate) fn new(deque: &'a ChunkedDeque<T, C>, at: Position, position: usize) -> Self {
        debug_assert!(position < deque.len());
        let value = unsafe { deque.get_unchecked(at) };
        Cursor {
            deque,
            at,
            position,
            value,
        }
    }

    /// Returns a reference to the element under the cursor.
    #[inline]
    pub fn get(&self) -> &'a T {
        self.value
    }

    /// Returns the offset of the element under the cursor from the front of
    /// the deque.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to the following element, or returns [`None`] if it
    /// is at the back of the deque.
    pub fn next(mut self) -> Option<Self> {
        let position = self.position + 1;
        if position >= self.deque.len() {
            return None;
        }

        self.at = self.deque.step_forward(self.at);
        self.position = position;
        self.value = unsafe { self.deque.get_unchecked(self.at) };
        Some(self)
    }

    /// Moves the cursor to the preceding element, or returns [`None`] if it
    /// is at the front of the deque.
    pub fn prev(mut self) -> Option<Self> {
        if self.position == 0 {
            return None;
        }

        self.at = self.deque.step_backward(self.at);
        self.position -= 1;
        self.value = unsafe { self.deque.get_unchecked(self.at) };
        Some(self)
    }
}

impl<T, const C: usize> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const C: usize> Copy for Cursor<'_, T, C> {}

impl<T: Debug, const C: usize> Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("value", self.value)
            .finish()
    }
}
