//! # Slot pool.
//!
//! [Pool] keeps a fixed number of `T` slots and hands them out as [Unique]
//! handles whose [PoolDeleter] drops the value and returns the slot. Slot
//! indices are managed by a buddy allocator behind a spin lock, the same way
//! physical frames are managed.

use crate::{deleter::Deleter, error::PoolError, unique::Unique};
use alloc::{boxed::Box, vec, vec::Vec};
use buddy_system_allocator::FrameAllocator;
use core::{cell::UnsafeCell, fmt::Debug, mem::MaybeUninit, ptr::NonNull};
use log::{debug, trace, warn};
use spin::{Mutex, MutexGuard};

/// Maximum order for the buddy system.
pub const MAX_ORDER: usize = 32;

/// A [Unique] handle to a pool slot.
pub type Pooled<'a, T> = Unique<T, PoolDeleter<'a, T>>;

/// Slot index bookkeeping.
struct SlotAllocator {
    inner: FrameAllocator<MAX_ORDER>,
    live: Vec<bool>,
    in_use: usize,
}

impl SlotAllocator {
    fn new(slots: usize) -> Self {
        let mut inner = FrameAllocator::new();
        inner.add_frame(0, slots);
        SlotAllocator {
            inner,
            live: vec![false; slots],
            in_use: 0,
        }
    }

    fn alloc(&mut self) -> Option<usize> {
        let index = self.inner.alloc(1)?;
        debug_assert!(!self.live[index]);
        self.live[index] = true;
        self.in_use += 1;
        Some(index)
    }

    /// Mark a live slot as released. Its index is not reusable until [SlotAllocator::recycle].
    fn retire(&mut self, index: usize) {
        assert!(self.live[index], "slot already released");
        self.live[index] = false;
        self.in_use -= 1;
    }

    fn recycle(&mut self, index: usize) {
        self.inner.dealloc(index, 1);
    }
}

/// Fixed-capacity pool of `T` slots.
pub struct Pool<T> {
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    alloc: Mutex<SlotAllocator>,
}

impl<T> Pool<T> {
    /// Create a pool with `slots` slots.
    ///
    /// Panics if `T` is zero-sized, since slots are told apart by address.
    pub fn new(slots: usize) -> Self {
        assert!(
            size_of::<T>() != 0,
            "zero-sized types cannot be pooled"
        );
        debug!("slot pool created with {} slots", slots);
        Pool {
            slots: (0..slots)
                .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
                .collect(),
            alloc: Mutex::new(SlotAllocator::new(slots)),
        }
    }

    /// Create a pool with the configured `POOL_SLOTS` capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(config::build_flags::POOL_SLOTS)
    }

    #[inline(always)]
    fn lock(&self) -> MutexGuard<'_, SlotAllocator> {
        self.alloc.lock()
    }

    /// Move `value` into a free slot and own it with a [Unique].
    pub fn alloc(&self, value: T) -> Result<Pooled<'_, T>, PoolError> {
        let index = match self.lock().alloc() {
            Some(index) => index,
            None => {
                return Err(PoolError::Exhausted {
                    capacity: self.capacity(),
                });
            }
        };
        let slot = self.slots[index].get();
        unsafe { (*slot).write(value) };
        trace!("pool slot #{} allocated", index);
        Ok(unsafe { Unique::from_raw_with(slot.cast::<T>(), self.deleter()) })
    }

    /// A deleter returning slots to this pool, e.g. for [Unique::empty_with].
    pub fn deleter(&self) -> PoolDeleter<'_, T> {
        PoolDeleter { pool: self }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a value.
    pub fn live(&self) -> usize {
        self.lock().in_use
    }

    /// Number of free slots.
    pub fn available(&self) -> usize {
        self.capacity() - self.live()
    }

    fn index_of(&self, ptr: NonNull<T>) -> usize {
        let base = self.slots.as_ptr() as usize;
        let addr = ptr.as_ptr() as usize;
        let offset = addr.wrapping_sub(base);
        let index = offset / size_of::<T>();
        assert!(
            addr >= base && offset % size_of::<T>() == 0 && index < self.capacity(),
            "pointer {:#x} does not belong to this pool",
            addr
        );
        index
    }

    /// Drop the value in the slot behind `ptr` and make the slot free again.
    fn release_slot(&self, ptr: NonNull<T>) {
        let index = self.index_of(ptr);
        // The lock is not held while the value drops: its destructor may use the pool.
        self.lock().retire(index);
        unsafe { ptr.as_ptr().drop_in_place() };
        self.lock().recycle(index);
        trace!("pool slot #{} released", index);
    }
}

impl<T> Drop for Pool<T> {
    fn drop(&mut self) {
        let alloc = self.alloc.get_mut();
        if alloc.in_use > 0 {
            warn!("slot pool dropped with {} live slots", alloc.in_use);
        }
        for (slot, live) in self.slots.iter_mut().zip(alloc.live.iter()) {
            if *live {
                unsafe { slot.get_mut().assume_init_drop() };
            }
        }
    }
}

impl<T> Debug for Pool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("Pool({}/{})", self.live(), self.capacity()))
    }
}

/// [Deleter] for handles created by [Pool::alloc].
pub struct PoolDeleter<'a, T> {
    pool: &'a Pool<T>,
}

impl<T> Clone for PoolDeleter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PoolDeleter<'_, T> {}

impl<T> Debug for PoolDeleter<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("PoolDeleter").field(self.pool).finish()
    }
}

impl<T> Deleter<T> for PoolDeleter<'_, T> {
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        self.pool.release_slot(ptr);
    }
}
