use core::{
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull,
};

use crate::raw_block::RawBlock;

/// Cursor pair over `[index, end)` of a live range.
///
/// Cursors are indices rather than addresses, which keeps zero-sized
/// element types working without special cases.
pub struct Iter<'a, T> {
    data: NonNull<T>,
    index: usize,
    end: usize,
    _marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {

    /// # Safety
    /// `[0, len)` of `data` must be initialized and borrowed for `'a`.
    #[inline(always)]
    pub(crate) unsafe fn new(data: NonNull<T>, len: usize) -> Self {
        Self {
            data,
            index: 0,
            end: len,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {

    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            let item = unsafe { self.data.add(self.index).as_ref() };
            self.index += 1;
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.index;
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {

    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            self.end -= 1;
            Some(unsafe { self.data.add(self.end).as_ref() })
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    data: NonNull<T>,
    index: usize,
    end: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {

    /// # Safety
    /// `[0, len)` of `data` must be initialized and exclusively borrowed
    /// for `'a`.
    #[inline(always)]
    pub(crate) unsafe fn new(data: NonNull<T>, len: usize) -> Self {
        Self {
            data,
            index: 0,
            end: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            // each index is handed out once
            let item = unsafe { self.data.add(self.index).as_mut() };
            self.index += 1;
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.index;
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {

    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            self.end -= 1;
            Some(unsafe { self.data.add(self.end).as_mut() })
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator of a [`DynVec`](crate::DynVec).
///
/// Values not yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    block: RawBlock<T>,
    index: usize,
    end: usize,
}

impl<T> IntoIter<T> {

    /// # Safety
    /// `[0, len)` of `block` must be initialized.
    #[inline(always)]
    pub(crate) unsafe fn new(block: RawBlock<T>, len: usize) -> Self {
        Self {
            block,
            index: 0,
            end: len,
        }
    }

    /// Values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            core::slice::from_raw_parts(self.block.data().add(self.index).as_ptr(), self.end - self.index)
        }
    }
}

impl<T> Iterator for IntoIter<T> {

    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            let item = unsafe { self.block.read(self.index) };
            self.index += 1;
            Some(item)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.index;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {

    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        }
        else {
            self.end -= 1;
            Some(unsafe { self.block.read(self.end) })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {

    fn drop(&mut self) {
        let (index, len) = (self.index, self.end - self.index);
        self.index = self.end;
        unsafe { self.block.drop_range(index, len) }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for IntoIter<T> {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
