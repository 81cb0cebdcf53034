use core::{
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::ManuallyDrop,
    ops::{Deref, DerefMut, Index, IndexMut},
    slice::{self, SliceIndex},
};

use tarn_log::trace;

use crate::{
    capacity_policy::{CapacityPolicy, Doubling, Fixed},
    errors::CapacityError,
    raw_block::{RawBlock, SlotGuard},
};

use super::{
    Iter,
    IterMut,
    IntoIter,
    Result,
};

use CapacityError::{FixedCapacity, CapacityOverflow};

/// A growable array that owns one [`RawBlock`] and tracks how many of its
/// slots are live.
///
/// Slots `[0, len)` hold values, `[len, capacity)` are uninitialized.
/// Operations that replace the block either complete or leave the array as
/// it was, both on allocation failure and when a constructor panics.
pub struct DynVec<T, CapacityPol: CapacityPolicy = Doubling> {
    block: RawBlock<T>,
    len: usize,
    _marker: PhantomData<CapacityPol>,
}

pub type FixedVec<T> = DynVec<T, Fixed>;

const_assert!(size_of!(DynVec<u32>) == size_of!(Option<DynVec<u32>>));

#[cold]
#[track_caller]
fn capacity_panic(err: CapacityError) -> ! {
    panic!("{}", err)
}

impl<T, CapacityPol: CapacityPolicy> DynVec<T, CapacityPol> {

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            block: RawBlock::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            block: RawBlock::allocate(capacity)?,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Creates `len` default values in a block of exactly `len` slots.
    pub fn with_len(len: usize) -> Result<Self>
        where
            T: Default
    {
        Self::with_len_with(len, T::default)
    }

    pub fn with_len_with<F>(len: usize, mut f: F) -> Result<Self>
        where
            F: FnMut() -> T
    {
        let mut block = RawBlock::allocate(len)?;
        let mut guard = SlotGuard::new(&mut block, 0);
        for _ in 0..len {
            guard.push(f());
        }
        let len = guard.disarm();
        Ok(Self {
            block,
            len,
            _marker: PhantomData,
        })
    }

    /// `n` clones of `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn from_elem(value: T, n: usize) -> Self
        where
            T: Clone
    {
        Self::with_len_with(n, || value.clone())
            .unwrap_or_else(|err| capacity_panic(err))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.block.data().as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.block.data().as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            Some(unsafe { self.get_unchecked(index) })
        }
        else {
            None
        }
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(unsafe { self.get_unchecked_mut(index) })
        }
        else {
            None
        }
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len). Only checked by a debug
    /// assertion.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.block.slot(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len). Only checked by a debug
    /// assertion.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.block.slot_mut(index) }
    }

    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).map(|i| unsafe { self.get_unchecked(i) })
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len.checked_sub(1).map(|i| unsafe { self.get_unchecked_mut(i) })
    }

    fn next_capacity(&self) -> Result<usize> {
        if !CapacityPol::can_grow() {
            return Err(FixedCapacity { capacity: self.capacity() })
        }
        CapacityPol::grow(self.capacity()).ok_or(CapacityOverflow)
    }

    /// Capacity for at least `required` slots, following the policy's growth
    /// curve.
    fn capacity_for(&self, required: usize) -> Result<usize> {
        if !CapacityPol::can_grow() {
            return Err(FixedCapacity { capacity: self.capacity() })
        }
        Ok(CapacityPol::grow(self.capacity()).map_or(required, |grown| grown.max(required)))
    }

    /// Swaps in `block`, whose `[0, len)` must already hold the values moved
    /// out of the current block. The old block is released without dropping.
    #[inline(always)]
    fn replace_block(&mut self, block: RawBlock<T>) {
        trace!("reallocated {} -> {} slots", self.block.capacity(), block.capacity());
        self.block = block;
    }

    fn reallocate(&mut self, capacity: usize) -> Result<()> {
        let mut block = RawBlock::allocate(capacity)?;
        unsafe { self.block.relocate(0, &mut block, 0, self.len) };
        self.replace_block(block);
        Ok(())
    }

    /// Grows the capacity to exactly `capacity` if it is smaller.
    ///
    /// Length and values are left untouched, also on failure.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(())
        }
        if !CapacityPol::can_grow() {
            return Err(FixedCapacity { capacity: self.capacity() })
        }
        self.reallocate(capacity)
    }

    #[inline(always)]
    pub fn push(&mut self, value: T) -> Result<&mut T> {
        self.emplace_with(|| value)
    }

    /// Appends the value returned by `f`.
    ///
    /// When the storage is full, `f` runs after the new block is allocated
    /// and its value is placed there before any existing value is moved, so
    /// neither a failed allocation nor a panic in `f` changes `self`.
    pub fn emplace_with<F>(&mut self, f: F) -> Result<&mut T>
        where
            F: FnOnce() -> T
    {
        let len = self.len;
        if len < self.capacity() {
            unsafe { self.block.write(len, f()) };
        }
        else {
            let mut block = RawBlock::allocate(self.next_capacity()?)?;
            unsafe {
                block.write(len, f());
                self.block.relocate(0, &mut block, 0, len);
            }
            self.replace_block(block);
        }
        self.len += 1;
        Ok(unsafe { self.block.slot_mut(len) })
    }

    #[inline(always)]
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        self.emplace_at_with(index, || value)
    }

    /// Inserts the value returned by `f` at `index`, shifting the values
    /// after it one slot right.
    ///
    /// `f` runs before any value is shifted or migrated, so a panic in `f`
    /// or a failed allocation leaves `self` unchanged.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn emplace_at_with<F>(&mut self, index: usize, f: F) -> Result<&mut T>
        where
            F: FnOnce() -> T
    {
        let len = self.len;
        if index > len {
            panic!("insertion index {} out of bounds for length {}", index, len)
        }
        if index == len {
            return self.emplace_with(f)
        }
        if len < self.capacity() {
            let value = f();
            unsafe {
                self.block.shift(index, len - index, index + 1);
                self.block.write(index, value);
            }
        }
        else {
            let mut block = RawBlock::allocate(self.next_capacity()?)?;
            unsafe {
                block.write(index, f());
                self.block.relocate(0, &mut block, 0, index);
                self.block.relocate(index, &mut block, index + 1, len - index);
            }
            self.replace_block(block);
        }
        self.len += 1;
        Ok(unsafe { self.block.slot_mut(index) })
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 { return None }
        self.len -= 1;
        Some(unsafe { self.block.read(self.len) })
    }

    /// Removes the value at `index`, shifting the values after it one slot
    /// left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("removal index {} out of bounds for length {}", index, len)
        }
        unsafe {
            let removed = self.block.read(index);
            self.block.shift(index + 1, len - index - 1, index);
            self.len -= 1;
            removed
        }
    }

    /// Removes the value at `index`, moving the last value into its place.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("swap_remove index {} out of bounds for length {}", index, len)
        }
        unsafe {
            let removed = self.block.read(index);
            self.len -= 1;
            if index != self.len {
                self.block.shift(self.len, 1, index);
            }
            removed
        }
    }

    /// Drops the values at `[len, self.len)`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return }
        let tail = self.len - len;
        self.len = len;
        unsafe { self.block.drop_range(len, tail) }
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Resizes to `len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, len: usize) -> Result<()>
        where
            T: Default
    {
        self.resize_with(len, T::default)
    }

    /// Resizes to `len`, truncating or filling new slots with values from
    /// `f`.
    ///
    /// Growth first reserves exactly `len` slots. If `f` panics the values
    /// it already produced are dropped and the length is unchanged.
    pub fn resize_with<F>(&mut self, len: usize, mut f: F) -> Result<()>
        where
            F: FnMut() -> T
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(())
        }
        self.reserve(len)?;
        let mut guard = SlotGuard::new(&mut self.block, self.len);
        for _ in self.len..len {
            guard.push(f());
        }
        self.len += guard.disarm();
        Ok(())
    }

    /// Appends clones of `values`.
    ///
    /// Capacity is secured up front. Clones are appended one by one, so a
    /// panicking clone leaves the values appended before it.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()>
        where
            T: Clone
    {
        let required = self.len.checked_add(values.len()).ok_or(CapacityOverflow)?;
        if required > self.capacity() {
            let capacity = self.capacity_for(required)?;
            self.reallocate(capacity)?;
        }
        for value in values {
            unsafe { self.block.write(self.len, value.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Deep copy with capacity equal to `len`.
    ///
    /// A panicking clone drops the clones made so far and releases the new
    /// storage. `self` is never touched.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        let mut block = RawBlock::allocate(self.len)?;
        let mut guard = SlotGuard::new(&mut block, 0);
        for value in self {
            guard.push(value.clone());
        }
        let len = guard.disarm();
        Ok(Self {
            block,
            len,
            _marker: PhantomData,
        })
    }

    /// Makes `self` a copy of `from`.
    ///
    /// If `from` does not fit the current capacity a full copy is built and
    /// swapped in, so failure leaves `self` as it was. Otherwise the storage
    /// is reused: the common prefix is assigned in place, then the tail is
    /// dropped or cloned in.
    pub fn try_clone_from(&mut self, from: &Self) -> Result<()>
        where
            T: Clone
    {
        if from.len > self.capacity() {
            if !CapacityPol::can_grow() {
                return Err(FixedCapacity { capacity: self.capacity() })
            }
            let mut copy = from.try_clone()?;
            self.swap_with(&mut copy);
            return Ok(())
        }
        let common = self.len.min(from.len);
        for (dst, src) in self[..common].iter_mut().zip(&from[..common]) {
            dst.clone_from(src);
        }
        if from.len < self.len {
            self.truncate(from.len);
        }
        else {
            for value in &from[common..] {
                unsafe { self.block.write(self.len, value.clone()) };
                self.len += 1;
            }
        }
        Ok(())
    }

    /// Takes over the storage and values of `from`, which ends up empty.
    ///
    /// The values previously held by `self` are dropped.
    pub fn move_from(&mut self, from: &mut Self) {
        self.swap_with(from);
        from.clear();
    }

    /// Moves the storage out, leaving `self` empty with no capacity.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        Self {
            block: self.block.take(),
            len: core::mem::replace(&mut self.len, 0),
            _marker: PhantomData,
        }
    }

    /// Exchanges storage and values with `other`.
    ///
    /// Element swaps within one array go through the slice, as `v.swap(a, b)`.
    #[inline(always)]
    pub fn swap_with(&mut self, other: &mut Self) {
        self.block.swap(&mut other.block);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.block.data(), self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.block.data(), self.len) }
    }
}

impl<T, CapacityPol: CapacityPolicy> Drop for DynVec<T, CapacityPol> {

    fn drop(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe { self.block.drop_range(0, len) }
    }
}

impl<T, CapacityPol: CapacityPolicy> Default for DynVec<T, CapacityPol> {

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, CapacityPol: CapacityPolicy> Clone for DynVec<T, CapacityPol> {

    /// # Panics
    /// Panics if the allocation fails. See [`DynVec::try_clone`].
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| capacity_panic(err))
    }

    /// # Panics
    /// Panics if the allocation fails. See [`DynVec::try_clone_from`].
    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source).unwrap_or_else(|err| capacity_panic(err))
    }
}

impl<T, CapacityPol, I> Index<I> for DynVec<T, CapacityPol>
    where
        CapacityPol: CapacityPolicy,
        I: SliceIndex<[T]>,
{

    type Output = I::Output;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, CapacityPol, I> IndexMut<I> for DynVec<T, CapacityPol>
    where
        CapacityPol: CapacityPolicy,
        I: SliceIndex<[T]>,
{

    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, CapacityPol: CapacityPolicy> Deref for DynVec<T, CapacityPol> {

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, CapacityPol: CapacityPolicy> DerefMut for DynVec<T, CapacityPol> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, CapacityPol: CapacityPolicy> AsRef<[T]> for DynVec<T, CapacityPol> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, CapacityPol: CapacityPolicy> AsMut<[T]> for DynVec<T, CapacityPol> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: core::fmt::Debug, CapacityPol: CapacityPolicy> core::fmt::Debug for DynVec<T, CapacityPol> {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, P, Q> PartialEq<DynVec<U, Q>> for DynVec<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
        Q: CapacityPolicy,
{

    fn eq(&self, other: &DynVec<U, Q>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, P, const N: usize> PartialEq<[U; N]> for DynVec<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
{

    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, CapacityPol: CapacityPolicy> Eq for DynVec<T, CapacityPol> {}

impl<T: Hash, CapacityPol: CapacityPolicy> Hash for DynVec<T, CapacityPol> {

    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> FromIterator<T> for DynVec<T> {

    /// # Panics
    /// Panics if an allocation fails.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, CapacityPol: CapacityPolicy> Extend<T> for DynVec<T, CapacityPol> {

    /// # Panics
    /// Panics if an allocation fails or a fixed capacity is exceeded.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Some(required) = self.len.checked_add(lower) {
            if required > self.capacity() && CapacityPol::can_grow() {
                self.capacity_for(required)
                    .and_then(|capacity| self.reallocate(capacity))
                    .unwrap_or_else(|err| capacity_panic(err));
            }
        }
        for value in iter {
            self.push(value).unwrap_or_else(|err| capacity_panic(err));
        }
    }
}

impl<T, CapacityPol: CapacityPolicy> IntoIterator for DynVec<T, CapacityPol> {

    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut this = ManuallyDrop::new(self);
        let block = this.block.take();
        unsafe { IntoIter::new(block, this.len) }
    }
}

impl<'vec, T, CapacityPol: CapacityPolicy> IntoIterator for &'vec DynVec<T, CapacityPol> {

    type Item = &'vec T;
    type IntoIter = Iter<'vec, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'vec, T, CapacityPol: CapacityPolicy> IntoIterator for &'vec mut DynVec<T, CapacityPol> {

    type Item = &'vec mut T;
    type IntoIter = IterMut<'vec, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dyn_vec;

    #[test]
    fn starts_empty() {
        let v: DynVec<u32> = DynVec::new();
        assert_eq!((v.len(), v.capacity()), (0, 0));
        assert!(v.is_empty());
        assert_eq!(v.back(), None);
    }

    #[test]
    fn push_doubles_from_one() {
        let mut v: DynVec<i32> = DynVec::new();
        let mut capacities = Vec::new();
        for i in 0..9 {
            v.push(i).unwrap();
            capacities.push(v.capacity());
        }
        assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn push_returns_the_new_element() {
        let mut v: DynVec<i32> = DynVec::new();
        *v.push(1).unwrap() += 41;
        assert_eq!(v[0], 42);
    }

    #[test]
    fn with_len_defaults_every_slot() {
        let v: DynVec<i32> = DynVec::with_len(4).unwrap();
        assert_eq!(v, [0, 0, 0, 0]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn with_capacity_is_exact() {
        let v: DynVec<u8> = DynVec::with_capacity(3).unwrap();
        assert_eq!((v.len(), v.capacity()), (0, 3));
    }

    #[test]
    fn insert_in_place_keeps_capacity() {
        let mut v: DynVec<i32> = DynVec::with_capacity(8).unwrap();
        v.extend_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(*v.insert(0, 0).unwrap(), 0);
        assert_eq!(*v.insert(2, 9).unwrap(), 9);
        assert_eq!(v, [0, 1, 9, 2, 3]);
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn insert_when_full_doubles() {
        let mut v = dyn_vec![1, 2, 3, 4];
        assert_eq!(v.capacity(), 4);
        v.insert(1, 7).unwrap();
        assert_eq!(v, [1, 7, 2, 3, 4]);
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn insert_at_len_appends() {
        let mut v = dyn_vec![1, 2];
        v.insert(2, 3).unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "insertion index 3 out of bounds for length 1")]
    fn insert_past_len_panics() {
        let mut v = dyn_vec![1];
        let _ = v.insert(3, 2);
    }

    #[test]
    fn pop_takes_the_last() {
        let mut v = dyn_vec![1, 2];
        assert_eq!(v.pop(), Some(2));
        assert_eq!(v.pop(), Some(1));
        assert_eq!(v.pop(), None);
        assert_eq!(v.capacity(), 2);
    }

    #[test]
    fn remove_shifts_left() {
        let mut v = dyn_vec![1, 2, 3, 4];
        assert_eq!(v.remove(1), 2);
        assert_eq!(v, [1, 3, 4]);
        assert_eq!(v.remove(2), 4);
        assert_eq!(v, [1, 3]);
    }

    #[test]
    #[should_panic(expected = "removal index 2 out of bounds for length 2")]
    fn remove_at_len_panics() {
        let mut v = dyn_vec![1, 2];
        v.remove(2);
    }

    #[test]
    fn swap_remove_fills_with_last() {
        let mut v = dyn_vec![1, 2, 3, 4];
        assert_eq!(v.swap_remove(0), 1);
        assert_eq!(v, [4, 2, 3]);
        assert_eq!(v.swap_remove(2), 3);
        assert_eq!(v, [4, 2]);
    }

    #[test]
    fn reserve_is_exact_and_never_shrinks() {
        let mut v = dyn_vec![1, 2];
        v.reserve(13).unwrap();
        assert_eq!(v.capacity(), 13);
        v.reserve(3).unwrap();
        assert_eq!(v.capacity(), 13);
        assert_eq!(v, [1, 2]);
    }

    #[test]
    fn resize_truncates_and_extends() {
        let mut v = dyn_vec![1, 2, 3];
        v.resize(1).unwrap();
        assert_eq!(v, [1]);
        assert_eq!(v.capacity(), 3);
        v.resize(4).unwrap();
        assert_eq!(v, [1, 0, 0, 0]);
        assert_eq!(v.capacity(), 4);
        v.resize(4).unwrap();
        assert_eq!(v, [1, 0, 0, 0]);
    }

    #[test]
    fn resize_with_calls_the_closure_per_slot() {
        let mut v: DynVec<i32> = DynVec::new();
        let mut next = 0;
        v.resize_with(3, || { next += 1; next }).unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn clone_is_deep_and_tight() {
        let mut v: DynVec<String> = DynVec::with_capacity(10).unwrap();
        v.extend_from_slice(&[String::from("a"), String::from("b")]).unwrap();
        let mut copy = v.clone();
        assert_eq!(copy.capacity(), 2);
        copy[0].push('!');
        assert_eq!(v[0], "a");
        assert_eq!(copy[0], "a!");
    }

    #[test]
    fn clone_from_reuses_storage_when_it_fits() {
        let mut v = dyn_vec![1, 2, 3, 4, 5];
        let shorter = dyn_vec![7, 8];
        v.clone_from(&shorter);
        assert_eq!(v, [7, 8]);
        assert_eq!(v.capacity(), 5);
        let mut longer = dyn_vec![9; 4];
        longer.push(10).unwrap();
        v.clone_from(&longer);
        assert_eq!(v, [9, 9, 9, 9, 10]);
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn clone_from_swaps_in_a_copy_when_too_small() {
        let mut v = dyn_vec![1];
        let source = dyn_vec![1, 2, 3];
        v.clone_from(&source);
        assert_eq!(v, source);
        assert_eq!(v.capacity(), 3);
    }

    #[test]
    fn take_leaves_an_empty_source() {
        let mut v = dyn_vec![1, 2, 3];
        let moved = v.take();
        assert_eq!(moved, [1, 2, 3]);
        assert_eq!((v.len(), v.capacity()), (0, 0));
    }

    #[test]
    fn move_from_empties_the_source() {
        let mut a = dyn_vec![1];
        let mut b = dyn_vec![2, 3];
        a.move_from(&mut b);
        assert_eq!(a, [2, 3]);
        assert!(b.is_empty());
    }

    #[test]
    fn swap_exchanges_everything() {
        let mut a = dyn_vec![1];
        let mut b = dyn_vec![2, 3];
        a.swap_with(&mut b);
        assert_eq!((a.len(), b.len()), (2, 1));
        assert_eq!(a, [2, 3]);
        assert_eq!(b, [1]);
    }

    #[test]
    fn element_swap_reaches_the_slice() {
        let mut v = dyn_vec![1, 2, 3];
        v.swap(0, 2);
        assert_eq!(v, [3, 2, 1]);
    }

    #[test]
    fn extend_from_slice_follows_the_growth_curve() {
        let mut v = dyn_vec![0; 4];
        v.extend_from_slice(&[1]).unwrap();
        assert_eq!(v.capacity(), 8);
        v.extend_from_slice(&[2; 20]).unwrap();
        assert_eq!(v.capacity(), 25);
        assert_eq!(v.len(), 25);
    }

    #[test]
    fn fixed_vec_refuses_to_grow() {
        let mut v = FixedVec::with_capacity(2).unwrap();
        v.push(1).unwrap();
        v.push(2).unwrap();
        assert_eq!(v.push(3).unwrap_err(), FixedCapacity { capacity: 2 });
        assert_eq!(v.insert(0, 3).unwrap_err(), FixedCapacity { capacity: 2 });
        assert_eq!(v.reserve(4).unwrap_err(), FixedCapacity { capacity: 2 });
        assert_eq!(v.resize(3).unwrap_err(), FixedCapacity { capacity: 2 });
        assert_eq!(v, [1, 2]);
        v.reserve(2).unwrap();
        v.insert(1, 5).unwrap_err();
        v.pop();
        v.insert(1, 5).unwrap();
        assert_eq!(v, [1, 5]);
    }

    #[test]
    fn growth_overflow_is_reported() {
        let mut v: DynVec<()> = DynVec::with_capacity(usize::MAX / 2 + 1).unwrap();
        v.len = v.capacity();
        assert_eq!(v.push(()).unwrap_err(), CapacityOverflow);
        assert_eq!((v.len(), v.capacity()), (usize::MAX / 2 + 1, usize::MAX / 2 + 1));
    }

    #[test]
    fn insert_growth_overflow_is_reported() {
        let mut v: DynVec<()> = DynVec::with_capacity(usize::MAX / 2 + 1).unwrap();
        v.len = v.capacity();
        assert_eq!(v.insert(0, ()).unwrap_err(), CapacityOverflow);
        assert_eq!((v.len(), v.capacity()), (usize::MAX / 2 + 1, usize::MAX / 2 + 1));
    }

    #[test]
    fn fixed_vec_refuses_a_larger_copy() {
        let mut v: FixedVec<i32> = FixedVec::with_capacity(2).unwrap();
        v.push(1).unwrap();
        let mut larger: FixedVec<i32> = FixedVec::with_capacity(3).unwrap();
        larger.extend_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(v.try_clone_from(&larger).unwrap_err(), FixedCapacity { capacity: 2 });
        assert_eq!((v.len(), v.capacity()), (1, 2));
        assert_eq!(v, [1]);
    }

    #[test]
    fn zero_sized_values_are_tracked() {
        let mut v: DynVec<()> = DynVec::new();
        for _ in 0..100 {
            v.push(()).unwrap();
        }
        assert_eq!(v.len(), 100);
        assert_eq!(v.capacity(), 128);
        v.insert(50, ()).unwrap();
        v.remove(0);
        assert_eq!(v.len(), 100);
    }

    #[test]
    fn checked_access() {
        let mut v = dyn_vec![1, 2];
        assert_eq!(v.get(1), Some(&2));
        assert_eq!(v.get(2), None);
        *v.get_mut(0).unwrap() = 5;
        *v.back_mut().unwrap() = 6;
        assert_eq!(v, [5, 6]);
        assert_eq!(unsafe { *v.get_unchecked(1) }, 6);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the len is 2 but the index is 2")]
    fn index_past_len_panics() {
        let v = dyn_vec![1, 2];
        let _ = v[2];
    }

    #[test]
    fn debug_lists_the_values() {
        assert_eq!(format!("{:?}", dyn_vec![1, 2]), "[1, 2]");
    }
}
