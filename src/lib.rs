#![no_std]
#![warn(missing_docs)]

//! A double-ended queue stored in a linked sequence of fixed-size chunks.
//!
//! [`ChunkedDeque`] offers amortized O(1) pushes and pops at both ends without
//! ever moving stored elements, and without allocating per element: storage
//! is added and released one chunk of `C` slots at a time. The chunk
//! capacity is a const generic parameter defaulting to
//! [`DEFAULT_CHUNK_CAPACITY`].
//!
//! Traversal uses a [`Cursor`], which steps forward and backward across chunk
//! boundaries, or the standard iterator returned by [`ChunkedDeque::iter`].
//!
//! ```
//! use chunked_deque::ChunkedDeque;
//!
//! let mut deque = ChunkedDeque::<i32>::new();
//! for i in 0..10 {
//!     deque.push_back(i);
//! }
//!
//! let mut out = String::new();
//! let mut cursor = deque.front();
//! while let Some(c) = cursor {
//!     out.push_str(&c.get().to_string());
//!     cursor = c.next();
//! }
//! assert_eq!(out, "0123456789");
//!
//! out.clear();
//! let mut cursor = deque.back();
//! while let Some(c) = cursor {
//!     out.push_str(&c.get().to_string());
//!     cursor = c.prev();
//! }
//! assert_eq!(out, "9876543210");
//! ```
//!
//! The deque does no internal synchronization. Sharing it between threads
//! requires the usual `Mutex` or similar around the whole structure.
//!
//! With the `tracing` feature enabled, chunk allocation and release are
//! reported as `TRACE` level events.

extern crate alloc;

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}

pub mod cursor;
pub mod deque;
mod pool;

#[cfg(test)]
mod test_utils;

pub use crate::cursor::Cursor;
pub use crate::deque::{ChunkedDeque, DEFAULT_CHUNK_CAPACITY};

/// A chunked deque of 64-bit integers.
///
/// Empty pops and peeks return [`None`], so a stored zero is never confused
/// with absence.
///
/// # Examples
/// ```
/// let mut deque = chunked_deque::IntDeque::new();
/// deque.push_front(0);
/// assert_eq!(deque.pop_back(), Some(0));
/// assert_eq!(deque.pop_back(), None);
/// ```
pub type IntDeque = ChunkedDeque<i64>;
