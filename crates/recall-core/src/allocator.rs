use slab::Slab;
use static_assertions::const_assert_eq;
use std::{mem, num::NonZeroU32};

/// Handle to a value owned by an [`Allocator32`]. Fits in 32 bits even when wrapped in an `Option`.
pub type AllocId32 = NonZeroU32;

const_assert_eq!(
    mem::size_of::<Option<AllocId32>>(),
    mem::size_of::<AllocId32>()
);

/// Arena that owns its values and hands out [`AllocId32`] handles to them.
///
/// Handles of removed values get reused, so tables of handles must be rebuilt after [`remove`](Self::remove) or
/// [`clear`](Self::clear).
pub struct Allocator32<T> {
    slots: Slab<T>,
}

impl<T> Default for Allocator32<T> {
    fn default() -> Self {
        Self { slots: Slab::new() }
    }
}

impl<T> Allocator32<T> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AllocId32) -> Option<&T> {
        self.slots.get(slot_of(id))
    }

    #[inline]
    pub fn get_mut(&mut self, id: AllocId32) -> Option<&mut T> {
        self.slots.get_mut(slot_of(id))
    }

    /// # Panics
    ///
    /// If the arena already holds `u32::MAX` values.
    pub fn insert(&mut self, value: T) -> AllocId32 {
        id_of(self.slots.insert(value))
    }

    /// Takes the value for `id` out of the arena, or `None` if there is none.
    pub fn remove(&mut self, id: AllocId32) -> Option<T> {
        self.slots.try_remove(slot_of(id))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

fn slot_of(id: AllocId32) -> usize {
    (id.get() - 1) as usize
}

fn id_of(slot: usize) -> AllocId32 {
    u32::try_from(slot + 1)
        .ok()
        .and_then(AllocId32::new)
        .unwrap_or_else(|| panic!("Allocator32 is full"))
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
