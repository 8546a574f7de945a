//! A double-ended queue built from a linked sequence of fixed-size chunks.
//!
//! This queue has amortized O(1) inserts and removals at both ends. Unlike a
//! growable ring buffer it never moves existing elements: storage grows and
//! shrinks one chunk of `C` slots at a time, and only the chunks at either end
//! of the sequence may be partially occupied.

use alloc::boxed::Box;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::MaybeUninit;

use crate::cursor::Cursor;
use crate::pool::{Handle, Pool};

/// The number of element slots per chunk used when no capacity is specified.
pub const DEFAULT_CHUNK_CAPACITY: usize = 32;

pub(crate) struct Chunk<T, const C: usize> {
    slots: Box<[MaybeUninit<T>; C]>,
    prev: Option<Handle>,
    next: Option<Handle>,
}

impl<T, const C: usize> Chunk<T, C> {
    fn new(prev: Option<Handle>, next: Option<Handle>) -> Self {
        Chunk {
            slots: Box::new(core::array::from_fn(|_| MaybeUninit::uninit())),
            prev,
            next,
        }
    }
}

/// A slot in a specific chunk.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Position {
    pub(crate) chunk: Handle,
    pub(crate) slot: usize,
}

/// A double-ended queue storing its elements in a doubly linked list of
/// chunks, each holding `C` elements.
///
/// The "default" usage of this type as a queue is to use [`push_back`](ChunkedDeque::push_back)
/// to add to the queue, and [`pop_front`](ChunkedDeque::pop_front) to remove from it.
/// [`front`](ChunkedDeque::front) and [`back`](ChunkedDeque::back) return a
/// [`Cursor`] that walks the elements in either direction; for plain
/// iteration, [`iter`](ChunkedDeque::iter) is also available.
///
/// A fresh (or freshly drained) deque holds a single chunk with the front and
/// back indices meeting in its middle, so runs of pushes at either end fill
/// about half a chunk before the next one is allocated. A chunk is released
/// as soon as pops leave it empty, except for the last one.
///
/// `C` must be at least 3; smaller values are rejected at compile time.
///
/// # Examples
/// ```
/// use chunked_deque::ChunkedDeque;
///
/// let mut deque = ChunkedDeque::<char>::new();
/// deque.push_back('b');
/// deque.push_back('c');
/// deque.push_front('a');
/// assert_eq!(deque, ['a', 'b', 'c']);
///
/// assert_eq!(deque.pop_front(), Some('a'));
/// assert_eq!(deque.pop_back(), Some('c'));
/// assert_eq!(deque.pop_back(), Some('b'));
/// assert_eq!(deque.pop_back(), None);
/// ```
pub struct ChunkedDeque<T, const C: usize = DEFAULT_CHUNK_CAPACITY> {
    chunks: Pool<Chunk<T, C>>,
    first: Handle,
    last: Handle,
    front: usize,
    back: usize,
    len: usize,
}

impl<T, const C: usize> ChunkedDeque<T, C> {
    /// The number of element slots in each chunk.
    pub const CHUNK_CAPACITY: usize = C;

    const EMPTY_FRONT: usize = C / 2 + 1;
    const EMPTY_BACK: usize = C / 2;

    const CAPACITY_CHECK: () = assert!(C >= 3, "chunk capacity must be at least 3");

    /// Constructs a new, empty deque holding a single chunk.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_CHECK;

        let mut chunks = Pool::new();
        let handle = chunks.insert(Chunk::new(None, None));
        ChunkedDeque {
            chunks,
            first: handle,
            last: handle,
            front: Self::EMPTY_FRONT,
            back: Self::EMPTY_BACK,
            len: 0,
        }
    }

    /// Returns the number of elements currently in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` exactly when the deque contains zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of chunks currently allocated. This is never zero.
    ///
    /// # Examples
    /// ```
    /// let mut deque = chunked_deque::ChunkedDeque::<u8, 4>::new();
    /// assert_eq!(deque.chunk_count(), 1);
    /// deque.extend(0..10);
    /// assert_eq!(deque.chunk_count(), 4);
    /// deque.clear();
    /// assert_eq!(deque.chunk_count(), 1);
    /// ```
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the deque contains an element equal to the given value.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == x)
    }

    /// Prepends an element to the front of the deque, allocating a new chunk
    /// if the first one is full at its low end.
    pub fn push_front(&mut self, value: T) {
        let slot = if self.front == 0 {
            self.link_front();
            C - 1
        } else {
            self.front - 1
        };

        self.chunks[self.first].slots[slot] = MaybeUninit::new(value);
        self.front = slot;
        self.len += 1;
    }

    /// Appends an element to the back of the deque, allocating a new chunk
    /// if the last one is full at its high end.
    pub fn push_back(&mut self, value: T) {
        let slot = if self.back == C - 1 {
            self.link_back();
            0
        } else {
            self.back + 1
        };

        self.chunks[self.last].slots[slot] = MaybeUninit::new(value);
        self.back = slot;
        self.len += 1;
    }

    /// Removes the first element and returns it, or [`None`] if the deque is empty.
    ///
    /// # Examples
    /// ```
    /// let mut deque = chunked_deque::ChunkedDeque::<i32>::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.pop_front(), Some(1));
    /// assert_eq!(deque.pop_front(), Some(2));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = unsafe { self.chunks[self.first].slots[self.front].assume_init_read() };
        self.len -= 1;

        if self.len == 0 {
            self.reset();
        } else if self.front == C - 1 {
            self.unlink_front();
            self.front = 0;
        } else {
            self.front += 1;
        }

        Some(value)
    }

    /// Removes the last element and returns it, or [`None`] if the deque is empty.
    ///
    /// # Examples
    /// ```
    /// let mut deque = chunked_deque::ChunkedDeque::<i32>::new();
    /// deque.push_back(1);
    /// deque.push_back(3);
    /// assert_eq!(deque.pop_back(), Some(3));
    /// assert_eq!(deque.pop_back(), Some(1));
    /// assert_eq!(deque.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = unsafe { self.chunks[self.last].slots[self.back].assume_init_read() };
        self.len -= 1;

        if self.len == 0 {
            self.reset();
        } else if self.back == 0 {
            self.unlink_back();
            self.back = C - 1;
        } else {
            self.back -= 1;
        }

        Some(value)
    }

    /// Returns a reference to the front element, or [`None`] if the deque is empty.
    #[inline]
    pub fn front_item(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        unsafe { Some(self.chunks[self.first].slots[self.front].assume_init_ref()) }
    }

    /// Returns a mutable reference to the front element, or [`None`] if the deque is empty.
    #[inline]
    pub fn front_item_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        unsafe { Some(self.chunks[self.first].slots[self.front].assume_init_mut()) }
    }

    /// Returns a reference to the back element, or [`None`] if the deque is empty.
    #[inline]
    pub fn back_item(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        unsafe { Some(self.chunks[self.last].slots[self.back].assume_init_ref()) }
    }

    /// Returns a mutable reference to the back element, or [`None`] if the deque is empty.
    #[inline]
    pub fn back_item_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        unsafe { Some(self.chunks[self.last].slots[self.back].assume_init_mut()) }
    }

    /// Returns a cursor positioned at the front element, or [`None`] if the
    /// deque is empty.
    ///
    /// # Examples
    /// ```
    /// let mut deque = chunked_deque::ChunkedDeque::<i32>::new();
    /// deque.extend([1, 2, 3]);
    ///
    /// let mut seen = Vec::new();
    /// let mut cursor = deque.front();
    /// while let Some(c) = cursor {
    ///     seen.push(*c.get());
    ///     cursor = c.next();
    /// }
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn front(&self) -> Option<Cursor<'_, T, C>> {
        if self.is_empty() {
            return None;
        }

        Some(Cursor::new(self, self.front_position(), 0))
    }

    /// Returns a cursor positioned at the back element, or [`None`] if the
    /// deque is empty.
    pub fn back(&self) -> Option<Cursor<'_, T, C>> {
        if self.is_empty() {
            return None;
        }

        Some(Cursor::new(self, self.back_position(), self.len - 1))
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    /// ```
    /// let deque: chunked_deque::ChunkedDeque<i32, 4> = (0..10).collect();
    /// assert!(deque.iter().copied().eq(0..10));
    /// assert!(deque.iter().rev().copied().eq((0..10).rev()));
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            deque: self,
            head: self.front_position(),
            tail: self.back_position(),
            remaining: self.len,
        }
    }

    /// Clears the deque, dropping all values and releasing every chunk.
    ///
    /// Afterwards the deque behaves exactly like a newly constructed one. The
    /// chunk pool keeps its slot array, so refilling it does not grow the
    /// pool again.
    ///
    /// # Examples
    /// ```
    /// let mut deque: chunked_deque::ChunkedDeque<i32, 4> = (0..10).collect();
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.chunk_count(), 1);
    /// assert_eq!(deque.pop_back(), None);
    /// ```
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        let retired = self.chunk_count();
        self.drop_live_elements();

        self.chunks.clear();
        let handle = self.chunks.insert(Chunk::new(None, None));
        self.first = handle;
        self.last = handle;
        self.front = Self::EMPTY_FRONT;
        self.back = Self::EMPTY_BACK;
        trace!(chunks = retired, "cleared deque");
    }

    #[inline]
    pub(crate) fn front_position(&self) -> Position {
        Position {
            chunk: self.first,
            slot: self.front,
        }
    }

    #[inline]
    pub(crate) fn back_position(&self) -> Position {
        Position {
            chunk: self.last,
            slot: self.back,
        }
    }

    /// Returns the position following `at`, crossing into the next chunk
    /// when `at` is the last slot of its chunk.
    ///
    /// # Panics
    /// Panics if `at` is the last slot of the last chunk.
    pub(crate) fn step_forward(&self, at: Position) -> Position {
        if at.slot + 1 == C {
            let next = self.chunks[at.chunk].next.expect("stepped past the last chunk");
            Position { chunk: next, slot: 0 }
        } else {
            Position {
                chunk: at.chunk,
                slot: at.slot + 1,
            }
        }
    }

    /// Returns the position preceding `at`, crossing into the previous chunk
    /// when `at` is the first slot of its chunk.
    ///
    /// # Panics
    /// Panics if `at` is the first slot of the first chunk.
    pub(crate) fn step_backward(&self, at: Position) -> Position {
        if at.slot == 0 {
            let prev = self.chunks[at.chunk].prev.expect("stepped past the first chunk");
            Position {
                chunk: prev,
                slot: C - 1,
            }
        } else {
            Position {
                chunk: at.chunk,
                slot: at.slot - 1,
            }
        }
    }

    /// # Safety
    /// `at` must refer to a slot holding a live element.
    #[inline]
    pub(crate) unsafe fn get_unchecked(&self, at: Position) -> &T {
        debug_assert!(self.is_live(at));
        self.chunks[at.chunk].slots[at.slot].assume_init_ref()
    }

    fn is_live(&self, at: Position) -> bool {
        if self.is_empty() || !self.chunks.contains(at.chunk) {
            return false;
        }

        let start = if at.chunk == self.first { self.front } else { 0 };
        let end = if at.chunk == self.last { self.back + 1 } else { C };
        (start..end).contains(&at.slot)
    }

    /// Drops every live element in place and zeroes the length; chunk links
    /// and indices are left for the caller to rebuild.
    fn drop_live_elements(&mut self) {
        if self.is_empty() {
            return;
        }

        let (first, last, front, back) = (self.first, self.last, self.front, self.back);
        self.len = 0;
        if !core::mem::needs_drop::<T>() {
            return;
        }

        let mut next = Some(first);
        while let Some(handle) = next {
            let chunk = &mut self.chunks[handle];
            let start = if handle == first { front } else { 0 };
            let end = if handle == last { back + 1 } else { C };
            for slot in &mut chunk.slots[start..end] {
                unsafe { slot.assume_init_drop() };
            }
            next = chunk.next;
        }
    }

    fn reset(&mut self) {
        debug_assert_eq!(self.first, self.last);
        self.front = Self::EMPTY_FRONT;
        self.back = Self::EMPTY_BACK;
        trace!("recentered empty deque");
    }

    fn link_front(&mut self) {
        let old = self.first;
        let handle = self.chunks.insert(Chunk::new(None, Some(old)));
        self.chunks[old].prev = Some(handle);
        self.first = handle;
        trace!(chunks = self.chunks.len(), "linked chunk at front");
    }

    fn link_back(&mut self) {
        let old = self.last;
        let handle = self.chunks.insert(Chunk::new(Some(old), None));
        self.chunks[old].next = Some(handle);
        self.last = handle;
        trace!(chunks = self.chunks.len(), "linked chunk at back");
    }

    fn unlink_front(&mut self) {
        let retired = self.first;
        let next = self.chunks[retired].next.expect("front chunk has a successor");
        self.chunks.remove(retired);
        self.chunks[next].prev = None;
        self.first = next;
        trace!(chunks = self.chunks.len(), "unlinked chunk at front");
    }

    fn unlink_back(&mut self) {
        let retired = self.last;
        let prev = self.chunks[retired].prev.expect("back chunk has a predecessor");
        self.chunks.remove(retired);
        self.chunks[prev].next = None;
        self.last = prev;
        trace!(chunks = self.chunks.len(), "unlinked chunk at back");
    }
}

impl<T, const C: usize> Default for ChunkedDeque<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const C: usize> Drop for ChunkedDeque<T, C> {
    fn drop(&mut self) {
        self.drop_live_elements();
    }
}

impl<T: Clone, const C: usize> Clone for ChunkedDeque<T, C> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Debug, const C: usize> Debug for ChunkedDeque<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Hash, const C: usize> Hash for ChunkedDeque<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.iter().for_each(|item| item.hash(state));
    }
}

impl<A, B, const CA: usize, const CB: usize> PartialEq<ChunkedDeque<B, CB>> for ChunkedDeque<A, CA>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &ChunkedDeque<B, CB>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const C: usize> Eq for ChunkedDeque<T, C> {}

impl<T: PartialEq, R: AsRef<[T]>, const C: usize> PartialEq<R> for ChunkedDeque<T, C> {
    fn eq(&self, other: &R) -> bool {
        let other = other.as_ref();
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T, const C: usize> Extend<T> for ChunkedDeque<T, C> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Clone, const C: usize> Extend<&'a T> for ChunkedDeque<T, C> {
    fn extend<It: IntoIterator<Item = &'a T>>(&mut self, iter: It) {
        iter.into_iter().for_each(|item| self.push_back(item.clone()));
    }
}

impl<T, const C: usize> FromIterator<T> for ChunkedDeque<T, C> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

/// An iterator over the elements of a deque.
///
/// This `struct` is created by the [`iter`](ChunkedDeque::iter) method on
/// [`ChunkedDeque`]. See its documentation for more.
pub struct Iter<'a, T, const C: usize> {
    deque: &'a ChunkedDeque<T, C>,
    head: Position,
    tail: Position,
    remaining: usize,
}

impl<T, const C: usize> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            deque: self.deque,
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
        }
    }
}

impl<T: Debug, const C: usize> Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<alloc::vec::Vec<_>>()).finish()
    }
}

impl<'a, T, const C: usize> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let item = unsafe { self.deque.get_unchecked(self.head) };
        self.remaining -= 1;
        if self.remaining > 0 {
            self.head = self.deque.step_forward(self.head);
        }

        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, const C: usize> DoubleEndedIterator for Iter<'a, T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let item = unsafe { self.deque.get_unchecked(self.tail) };
        self.remaining -= 1;
        if self.remaining > 0 {
            self.tail = self.deque.step_backward(self.tail);
        }

        Some(item)
    }
}

impl<T, const C: usize> ExactSizeIterator for Iter<'_, T, C> {}
impl<T, const C: usize> FusedIterator for Iter<'_, T, C> {}

/// An owning iterator over the elements of a deque.
///
/// This `struct` is created by the [`into_iter`](ChunkedDeque::into_iter) method on
/// [`ChunkedDeque`] (provided by the `IntoIterator` trait). Chunks are released
/// as the iterator drains them.
pub struct IntoIter<T, const C: usize> {
    deque: ChunkedDeque<T, C>,
}

impl<T: Debug, const C: usize> Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<T, const C: usize> Iterator for IntoIter<T, C> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const C: usize> DoubleEndedIterator for IntoIter<T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T, const C: usize> ExactSizeIterator for IntoIter<T, C> {}
impl<T, const C: usize> FusedIterator for IntoIter<T, C> {}

impl<T, const C: usize> IntoIterator for ChunkedDeque<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, const C: usize> IntoIterator for &'a ChunkedDeque<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    fn assert_invariants<T, const C: usize>(deque: &ChunkedDeque<T, C>) {
        let mut chunks = 0;
        let mut prev = None;
        let mut next = Some(deque.first);
        while let Some(handle) = next {
            let chunk = &deque.chunks[handle];
            assert_eq!(chunk.prev, prev);
            prev = Some(handle);
            next = chunk.next;
            chunks += 1;
        }
        assert_eq!(prev, Some(deque.last));
        assert_eq!(chunks, deque.chunk_count());

        if deque.is_empty() {
            assert_eq!(chunks, 1);
            assert_eq!(deque.front, C / 2 + 1);
            assert_eq!(deque.back, C / 2);
            return;
        }

        assert!(deque.front < C);
        assert!(deque.back < C);
        let counted = if chunks == 1 {
            assert!(deque.front <= deque.back);
            deque.back - deque.front + 1
        } else {
            (C - deque.front) + (chunks - 2) * C + (deque.back + 1)
        };
        assert_eq!(counted, deque.len());
    }

    #[test]
    fn empty_deque_reports_absence() {
        let mut deque = ChunkedDeque::<&str>::new();
        for _ in 0..3 {
            assert_eq!(deque.pop_front(), None);
            assert_eq!(deque.pop_back(), None);
        }
        assert_eq!(deque.front_item(), None);
        assert_eq!(deque.back_item(), None);
        assert_eq!(deque.front_item_mut(), None);
        assert_eq!(deque.back_item_mut(), None);
        assert!(deque.front().is_none());
        assert!(deque.back().is_none());
        assert_eq!(deque.len(), 0);
        assert_invariants(&deque);
    }

    #[test]
    fn push_then_peek() {
        let mut deque = ChunkedDeque::<&str>::new();
        deque.push_front("a");
        assert_eq!(deque.front_item(), Some(&"a"));
        assert_eq!(deque.back_item(), Some(&"a"));

        deque.push_back("z");
        assert_eq!(deque.front_item(), Some(&"a"));
        assert_eq!(deque.back_item(), Some(&"z"));

        *deque.front_item_mut().unwrap() = "b";
        *deque.back_item_mut().unwrap() = "y";
        assert_eq!(deque, ["b", "y"]);
    }

    #[test]
    fn mixed_ends_pop_in_order() {
        let mut deque = ChunkedDeque::<&str>::new();
        deque.push_front("a");
        deque.push_back("z");
        assert_eq!(deque.pop_front(), Some("a"));
        assert_eq!(deque.pop_back(), Some("z"));
        assert!(deque.is_empty());
        assert_invariants(&deque);
    }

    #[test]
    fn same_end_pops_in_stack_order() {
        let mut deque = ChunkedDeque::<u32, 4>::new();
        for i in 0..50 {
            deque.push_front(i);
        }
        for i in (0..50).rev() {
            assert_eq!(deque.pop_front(), Some(i));
        }
        assert_eq!(deque.pop_front(), None);

        for i in 0..50 {
            deque.push_back(i);
        }
        for i in (0..50).rev() {
            assert_eq!(deque.pop_back(), Some(i));
        }
        assert_eq!(deque.pop_back(), None);
        assert_invariants(&deque);
    }

    #[test]
    fn len_tracks_pushes_and_pops() {
        const N: usize = 10;
        let mut deque = ChunkedDeque::<usize>::new();
        assert_eq!(deque.len(), 0);

        for i in 0..N {
            deque.push_front(i);
        }
        assert_eq!(deque.len(), N);
        while !deque.is_empty() {
            deque.pop_front();
        }
        assert_eq!(deque.len(), 0);

        for i in 0..N {
            deque.push_back(i);
        }
        assert_eq!(deque.len(), N);
        while deque.pop_back().is_some() {}
        assert_eq!(deque.len(), 0);
    }

    #[test]
    fn chunks_are_allocated_and_retired_at_boundaries() {
        const C: usize = DEFAULT_CHUNK_CAPACITY;
        let mut deque = ChunkedDeque::<usize>::new();

        for i in 0..3 * C {
            deque.push_back(i);
            assert_invariants(&deque);
        }
        assert_eq!(deque.chunk_count(), 4);

        for i in 0..3 * C {
            assert_eq!(deque.pop_front(), Some(i));
            assert_invariants(&deque);
        }
        assert!(deque.is_empty());
        assert_eq!(deque.chunk_count(), 1);
    }

    #[test]
    fn fresh_deque_starts_centered() {
        let mut deque = ChunkedDeque::<u8>::new();
        for i in 0..15 {
            deque.push_back(i);
        }
        assert_eq!(deque.chunk_count(), 1);
        deque.push_back(15);
        assert_eq!(deque.chunk_count(), 2);

        let mut deque = ChunkedDeque::<u8>::new();
        for i in 0..17 {
            deque.push_front(i);
        }
        assert_eq!(deque.chunk_count(), 1);
        deque.push_front(17);
        assert_eq!(deque.chunk_count(), 2);
    }

    #[test]
    fn draining_recenters_without_a_boundary_crossing() {
        let mut deque = ChunkedDeque::<u8, 8>::new();
        deque.push_back(1);
        deque.push_back(2);
        deque.pop_front();
        deque.pop_front();
        assert_eq!((deque.front, deque.back), (5, 4));

        deque.push_front(1);
        assert_eq!(deque.pop_back(), Some(1));
        assert_eq!((deque.front, deque.back), (5, 4));
        assert_invariants(&deque);
    }

    #[test]
    fn clear_behaves_like_a_fresh_deque() {
        let mut deque = ChunkedDeque::<i32, 4>::new();
        for i in 0..10 {
            deque.push_front(i);
        }
        assert!(deque.chunk_count() > 1);

        let (old_first, old_last) = (deque.first, deque.last);
        deque.clear();
        assert_eq!(deque.len(), 0);
        assert_eq!(deque.chunk_count(), 1);
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.pop_back(), None);
        assert_eq!(deque.front_item(), None);
        assert_eq!(deque.back_item(), None);
        assert!(deque.front().is_none());
        assert!(deque.back().is_none());
        assert!(!deque.chunks.contains(old_first));
        assert!(!deque.chunks.contains(old_last));
        assert_invariants(&deque);

        let mut fresh = ChunkedDeque::<i32, 4>::new();
        for i in 0..7 {
            deque.push_back(i);
            fresh.push_back(i);
        }
        assert_eq!(deque, fresh);
        assert_eq!(deque.chunk_count(), fresh.chunk_count());
        assert_eq!((deque.front, deque.back), (fresh.front, fresh.back));
    }

    #[test]
    fn smallest_chunk_capacity() {
        let mut deque = ChunkedDeque::<u32, 3>::new();
        for i in 0..20 {
            if i % 2 == 0 {
                deque.push_back(i);
            } else {
                deque.push_front(i);
            }
            assert_invariants(&deque);
        }

        let expected: Vec<u32> = (0..20).filter(|i| i % 2 == 1).rev().chain((0..20).filter(|i| i % 2 == 0)).collect();
        assert_eq!(deque, expected);

        while deque.pop_back().is_some() {
            assert_invariants(&deque);
        }
        assert_invariants(&deque);
    }

    fn randomized_against_vec_deque<const C: usize>() {
        use rand::{rngs::SmallRng, Rng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(crate::test_utils::RNG_SEED);

        let mut deque = ChunkedDeque::<u32, C>::new();
        let mut reference = VecDeque::new();

        for push_bias in [0.6, 0.4, 0.5] {
            for _ in 0..4000 {
                let push = rng.gen_bool(push_bias);
                let at_front = rng.gen_bool(0.5);
                match (push, at_front) {
                    (true, true) => {
                        let v = rng.gen();
                        deque.push_front(v);
                        reference.push_front(v);
                    }
                    (true, false) => {
                        let v = rng.gen();
                        deque.push_back(v);
                        reference.push_back(v);
                    }
                    (false, true) => assert_eq!(deque.pop_front(), reference.pop_front()),
                    (false, false) => assert_eq!(deque.pop_back(), reference.pop_back()),
                }

                assert_eq!(deque.len(), reference.len());
                assert_eq!(deque.front_item(), reference.front());
                assert_eq!(deque.back_item(), reference.back());
                assert_invariants(&deque);
            }

            assert!(deque.iter().eq(reference.iter()));
            assert!(deque.iter().rev().eq(reference.iter().rev()));
        }
    }

    #[test]
    fn randomized_differential_default_capacity() {
        randomized_against_vec_deque::<DEFAULT_CHUNK_CAPACITY>();
    }

    #[test]
    fn randomized_differential_small_capacity() {
        randomized_against_vec_deque::<4>();
        randomized_against_vec_deque::<5>();
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let deque: ChunkedDeque<u32, 4> = (0..9).collect();
        let mut iter = deque.iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&8));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.len(), 6);

        let rest: Vec<u32> = iter.by_ref().copied().collect();
        assert_eq!(rest, [1, 2, 3, 4, 5, 6]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        let empty = ChunkedDeque::<u32>::new();
        assert_eq!(empty.iter().next(), None);
        assert_eq!(empty.iter().next_back(), None);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let mut deque = ChunkedDeque::<u32, 4>::new();
        deque.extend(&[3, 4, 5]);
        deque.push_front(2);
        deque.push_front(1);

        let mut iter = deque.into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.collect::<Vec<_>>(), [2, 3, 4]);
    }

    #[test]
    fn live_elements_drop_exactly_once() {
        use crate::test_utils::DropCounter;

        let drop_count = DropCounter::new();
        let mut deque = ChunkedDeque::<_, 4>::new();
        for i in 0..20 {
            deque.push_back(drop_count.new_droppable(i));
        }
        for i in 0..5 {
            deque.push_front(drop_count.new_droppable(100 + i));
        }

        let popped = deque.pop_front();
        assert_eq!(popped.as_ref().map(|d| d.value), Some(104));
        assert_eq!(drop_count.dropped(), 0);
        drop(popped);
        assert_eq!(drop_count.dropped(), 1);

        deque.pop_back();
        assert_eq!(drop_count.dropped(), 2);

        deque.clear();
        assert_eq!(drop_count.dropped(), 25);

        for i in 0..10 {
            deque.push_front(drop_count.new_droppable(i));
        }
        let mut iter = deque.into_iter();
        iter.next();
        iter.next_back();
        assert_eq!(drop_count.dropped(), 27);
        drop(iter);
        assert_eq!(drop_count.dropped(), 35);
    }

    #[test]
    fn equality_ignores_layout() {
        let mut a = ChunkedDeque::<i32, 4>::new();
        let mut b = ChunkedDeque::<i32>::new();
        for i in (0..10).rev() {
            a.push_front(i);
        }
        b.extend(0..10);

        assert_eq!(a, b);
        assert_eq!(a, (0..10).collect::<Vec<i32>>());
        assert!(a.contains(&9));
        assert!(!a.contains(&10));

        b.pop_back();
        assert_ne!(a, b);
        assert_ne!(b, [0, 1, 2]);
    }

    #[test]
    fn equal_deques_hash_equally() {
        use core::hash::{BuildHasher, BuildHasherDefault};
        use rustc_hash::FxHasher;

        let build = BuildHasherDefault::<FxHasher>::default();
        let hash_of = |deque: &ChunkedDeque<i32, 4>| {
            let mut hasher = build.build_hasher();
            deque.hash(&mut hasher);
            hasher.finish()
        };

        let mut a = ChunkedDeque::<i32, 4>::new();
        let mut b = ChunkedDeque::<i32, 4>::new();
        for i in 0..13 {
            a.push_back(i);
        }
        for i in (0..13).rev() {
            b.push_front(i);
        }
        assert_eq!(hash_of(&a), hash_of(&b));

        b.pop_front();
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn clone_is_independent() {
        let original: ChunkedDeque<alloc::string::String, 4> =
            ["a", "b", "c", "d", "e"].iter().map(|s| alloc::string::String::from(*s)).collect();
        let mut copy = original.clone();
        assert_eq!(original, copy);

        copy.pop_front();
        copy.push_back("f".into());
        assert_eq!(original.len(), 5);
        assert_eq!(original.front_item().map(|s| s.as_str()), Some("a"));
        assert_eq!(copy.back_item().map(|s| s.as_str()), Some("f"));
    }

    #[test]
    fn debug_impl() {
        let deque: ChunkedDeque<u8, 4> = (0..6).collect();
        assert_eq!(alloc::format!("{:?}", deque), "[0, 1, 2, 3, 4, 5]");

        let mut iter = deque.iter();
        iter.next();
        assert_eq!(alloc::format!("{:?}", iter), "Iter([1, 2, 3, 4, 5])");
        assert_eq!(alloc::format!("{:?}", ChunkedDeque::<u8>::new()), "[]");
    }

    #[test]
    fn integer_deque_distinguishes_zero_from_empty() {
        let mut deque = crate::IntDeque::new();
        deque.push_back(0);
        assert_eq!(deque.front_item(), Some(&0));
        assert_eq!(deque.pop_front(), Some(0));
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.back_item(), None);
    }
}
