use core::cell::Cell;

pub(crate) const RNG_SEED: u64 = 0x5432_1012_3454_3210;

pub(crate) struct DropCounter {
    drop_count: Cell<usize>,
}

impl DropCounter {
    pub(crate) fn new() -> Self {
        DropCounter {
            drop_count: Cell::new(0),
        }
    }

    pub(crate) fn dropped(&self) -> usize {
        self.drop_count.get()
    }

    pub(crate) fn new_droppable<T>(&self, value: T) -> Droppable<'_, T> {
        Droppable {
            value,
            counter: self,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Droppable<'a, T> {
    pub(crate) value: T,
    counter: &'a DropCounter,
}

impl<T> Drop for Droppable<'_, T> {
    fn drop(&mut self) {
        let count = self.counter.drop_count.get();
        self.counter.drop_count.set(count + 1);
    }
}

impl core::fmt::Debug for DropCounter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropCounter").field("dropped", &self.dropped()).finish()
    }
}
