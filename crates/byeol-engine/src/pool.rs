//! Slot pool for trail sparkles.

/// Arena of reusable slots with index-based liveness tracking.
///
/// Live slots are listed in `live` in insertion order; the tick pass
/// compacts that list with [`SlotPool::retain`] so survivors stay dense
/// and ordered. Freed slots are recycled through the free list instead of
/// reallocating.
#[derive(Debug)]
pub struct SlotPool<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    live: Vec<usize>,
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotPool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: Vec::new(),
        }
    }

    /// Store `value`, reusing a freed slot when one exists. Returns the
    /// slot index, which stays valid until the value is removed.
    pub fn insert(&mut self, value: T) -> usize {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(value);
                index
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        };
        self.live.push(index);
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(|slot| slot.as_mut())
    }

    /// Remove one value by index.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index).and_then(|slot| slot.take())?;
        self.free.push(index);
        self.live.retain(|&i| i != index);
        Some(value)
    }

    /// Drop every live value failing `keep`, handing each removed value
    /// to `on_remove`. Survivor order is preserved and the live list is
    /// left dense.
    pub fn retain(
        &mut self,
        mut keep: impl FnMut(usize, &T) -> bool,
        mut on_remove: impl FnMut(usize, T),
    ) {
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.live.retain(|&index| match slots[index].take() {
            Some(value) if keep(index, &value) => {
                slots[index] = Some(value);
                true
            }
            Some(value) => {
                free.push(index);
                on_remove(index, value);
                false
            }
            None => false,
        });
    }

    /// Live slot indices, oldest first.
    pub fn live(&self) -> &[usize] {
        &self.live
    }

    /// Index of the oldest live slot, if any.
    pub fn oldest(&self) -> Option<usize> {
        self.live.first().copied()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Total slots allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
