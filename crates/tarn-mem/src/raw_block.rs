//! Uninitialized storage for a fixed number of slots.
//!
//! [`RawBlock`] owns one allocation and nothing else: it never constructs
//! or drops the values living in its slots. Every unsafe pointer operation
//! of the crate goes through this module.

use core::{
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

use std::alloc::{self, Layout};

use tarn_log::warn;

use crate::errors::CapacityError;

pub struct RawBlock<T> {
    data: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the block uniquely owns its allocation.
unsafe impl<T: Send> Send for RawBlock<T> {}
unsafe impl<T: Sync> Sync for RawBlock<T> {}

impl<T> RawBlock<T> {

    /// The empty block. Owns no allocation.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for `capacity` values.
    ///
    /// A capacity of zero, or a zero-sized `T`, performs no allocation.
    pub fn allocate(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Ok(Self::new())
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| CapacityError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(Self {
                data: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            })
        }
        let ptr = unsafe { alloc::alloc(layout) };
        let Some(data) = NonNull::new(ptr.cast::<T>()) else {
            warn!("allocation of {} slots ({} bytes) failed", capacity, layout.size());
            return Err(CapacityError::AllocFailed { new_capacity: capacity })
        };
        Ok(Self {
            data,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Moves the allocation out, leaving `self` empty.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    #[inline(always)]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Address of slot `index`.
    ///
    /// # Safety
    /// `index` must be less than [`capacity`](Self::capacity). This is only
    /// checked by a debug assertion.
    #[inline(always)]
    pub unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index < self.capacity, "slot {} out of bounds of capacity {}", index, self.capacity);
        unsafe { self.data.add(index) }
    }

    #[inline(always)]
    pub(crate) fn data(&self) -> NonNull<T> {
        self.data
    }

    /// # Safety
    /// Slot `index` must be in bounds and uninitialized.
    #[inline(always)]
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        unsafe { self.slot(index).write(value) }
    }

    /// # Safety
    /// Slot `index` must be in bounds and initialized. The slot is logically
    /// uninitialized afterwards.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        unsafe { self.slot(index).read() }
    }

    /// # Safety
    /// Slot `index` must be in bounds and initialized.
    #[inline(always)]
    pub(crate) unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        unsafe { self.slot(index).as_mut() }
    }

    /// Drops the values in `[start, start + len)`.
    ///
    /// # Safety
    /// The range must be in bounds and every slot in it initialized.
    #[inline(always)]
    pub(crate) unsafe fn drop_range(&mut self, start: usize, len: usize) {
        debug_assert!(start + len <= self.capacity);
        if len == 0 { return }
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.add(start).as_ptr(), len))
        }
    }

    /// Bitwise moves `len` values from `[src, src + len)` of `self` into
    /// `[dst, dst + len)` of `to`.
    ///
    /// # Safety
    /// Both ranges must be in bounds, the source initialized and the
    /// destination uninitialized. The source slots are logically
    /// uninitialized afterwards.
    #[inline(always)]
    pub(crate) unsafe fn relocate(&self, src: usize, to: &mut Self, dst: usize, len: usize) {
        debug_assert!(src + len <= self.capacity);
        debug_assert!(dst + len <= to.capacity);
        unsafe {
            self.data.add(src).copy_to_nonoverlapping(to.data.add(dst), len);
        }
    }

    /// Bitwise moves `len` values from `src` to `dst` within the block. The
    /// ranges may overlap.
    ///
    /// # Safety
    /// Both ranges must be in bounds and the source initialized. Slots of
    /// the destination not covered by the source are overwritten without
    /// being dropped.
    #[inline(always)]
    pub(crate) unsafe fn shift(&mut self, src: usize, len: usize, dst: usize) {
        debug_assert!(src + len <= self.capacity);
        debug_assert!(dst + len <= self.capacity);
        unsafe {
            self.data.add(src).copy_to(self.data.add(dst), len);
        }
    }
}

impl<T> Default for RawBlock<T> {

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {

    fn drop(&mut self) {
        let size = mem::size_of::<T>() * self.capacity;
        if size == 0 { return }
        // SAFETY: the same layout was accepted by `allocate`
        unsafe {
            let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
            alloc::dealloc(self.data.as_ptr().cast::<u8>(), layout);
        }
    }
}

impl<T> core::fmt::Debug for RawBlock<T> {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawBlock")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Slots constructed during an unfinished operation.
///
/// Dropping the guard drops every value it wrote. [`disarm`](Self::disarm)
/// hands them over to the caller instead.
pub(crate) struct SlotGuard<'a, T> {
    block: &'a mut RawBlock<T>,
    start: usize,
    len: usize,
}

impl<'a, T> SlotGuard<'a, T> {

    #[inline(always)]
    pub fn new(block: &'a mut RawBlock<T>, start: usize) -> Self {
        Self {
            block,
            start,
            len: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, value: T) {
        let index = self.start + self.len;
        assert!(index < self.block.capacity(), "guarded slot {} out of bounds", index);
        unsafe { self.block.write(index, value) }
        self.len += 1;
    }

    /// Number of values written so far, which now belong to the caller.
    #[inline(always)]
    pub fn disarm(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T> Drop for SlotGuard<'_, T> {

    fn drop(&mut self) {
        unsafe { self.block.drop_range(self.start, self.len) }
    }
}
