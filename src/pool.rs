//! Growable object pools with direct indexing using stable handles.
//!
//! Values are stored in an incontiguously populated array of slots. Removed
//! slots are threaded onto a free list and reused by later insertions, so a
//! [`Handle`] carries a generation counter alongside its index: reusing a slot
//! bumps the counter, and handles issued for the previous occupant stop
//! resolving instead of silently aliasing the new one.
//!
//! [`ChunkedDeque`](crate::ChunkedDeque) keeps its chunk list in a pool, with
//! the links between chunks stored as handles. Clearing a deque clears its
//! pool, so the slot array is kept and refilled from index zero.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut};

const FREE_LIST_SENTINEL: u32 = u32::MAX;

/// A stable reference to a value stored in a [`Pool`].
///
/// Handles are only meaningful for the pool that issued them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
enum Slot<V> {
    Occupied { generation: u32, value: V },
    Vacant { generation: u32, next_free_slot: u32 },
}

/// A direct-mapped object pool that grows on demand.
pub(crate) struct Pool<V> {
    slots: Vec<Slot<V>>,
    len: usize,
    next_free_slot: u32,
}

#[cold]
#[inline(never)]
fn pool_index_space_exhausted() -> ! {
    panic!("pool cannot hold more than {} values", FREE_LIST_SENTINEL)
}

impl<V> Pool<V> {
    /// Constructs a new, empty pool.
    #[inline]
    pub fn new() -> Self {
        Pool {
            slots: Vec::new(),
            len: 0,
            next_free_slot: FREE_LIST_SENTINEL,
        }
    }

    /// Returns the number of values currently in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns [`true`] if the specified handle is valid for this pool.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns a reference to the value corresponding to the handle.
    ///
    /// Returns [`None`] if the handle is invalid for this pool.
    pub fn get(&self, handle: Handle) -> Option<&V> {
        match self.slots.get(handle.index as usize)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value corresponding to the handle.
    ///
    /// Returns [`None`] if the handle is invalid for this pool.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        match self.slots.get_mut(handle.index as usize)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Inserts a value into the pool, returning a unique handle to access it.
    ///
    /// # Panics
    /// Panics if every representable slot index is already in use.
    pub fn insert(&mut self, value: V) -> Handle {
        if self.next_free_slot != FREE_LIST_SENTINEL {
            let index = self.next_free_slot;
            let slot = &mut self.slots[index as usize];
            let (generation, next_free_slot) = match slot {
                Slot::Vacant { generation, next_free_slot } => (generation.wrapping_add(1), *next_free_slot),
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            debug_assert_eq!(generation % 2, 1);

            *slot = Slot::Occupied { generation, value };
            self.next_free_slot = next_free_slot;
            self.len += 1;
            return Handle { index, generation };
        }

        let index = self.slots.len();
        if index >= FREE_LIST_SENTINEL as usize {
            pool_index_space_exhausted();
        }

        self.slots.push(Slot::Occupied { generation: 1, value });
        self.len += 1;
        Handle {
            index: index as u32,
            generation: 1,
        }
    }

    /// Removes the value referred to by the specified handle from the pool,
    /// returning it unless the handle is invalid. This invalidates the handle.
    pub fn remove(&mut self, handle: Handle) -> Option<V> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        let generation = match slot {
            Slot::Occupied { generation, .. } if *generation == handle.generation => generation.wrapping_add(1),
            _ => return None,
        };

        let vacant = Slot::Vacant {
            generation,
            next_free_slot: self.next_free_slot,
        };
        let value = match core::mem::replace(slot, vacant) {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!(),
        };

        self.next_free_slot = handle.index;
        self.len -= 1;
        Some(value)
    }

    /// Removes and drops all values in the pool, invalidating every handle it
    /// has issued so far.
    ///
    /// The slot array is kept; subsequent insertions reuse slots in ascending
    /// index order.
    pub fn clear(&mut self) {
        let mut next_free_slot = FREE_LIST_SENTINEL;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => *generation,
            };
            *slot = Slot::Vacant { generation, next_free_slot };
            next_free_slot = index as u32;
        }

        self.next_free_slot = next_free_slot;
        self.len = 0;
    }
}

impl<V> Index<Handle> for Pool<V> {
    type Output = V;

    fn index(&self, handle: Handle) -> &V {
        self.get(handle).expect("indexed with invalid pool handle")
    }
}

impl<V> IndexMut<Handle> for Pool<V> {
    fn index_mut(&mut self, handle: Handle) -> &mut V {
        self.get_mut(handle).expect("indexed with invalid pool handle")
    }
}

impl<V: Debug> Debug for Pool<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len)
            .field("next_free_slot", &self.next_free_slot)
            .field("slots", &self.slots)
            .finish()
    }
}
