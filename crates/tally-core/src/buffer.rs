//! Owned, contiguous blocks of `i32` elements.
//!
//! A [`Buffer`] is the in-memory form of a record: a length and exactly
//! that many elements in one heap block. It has a single owner at a time;
//! releasing it consumes the handle, so a second release does not compile.

use std::fmt;
use std::ops::Deref;

use crate::error::{Result, TallyError};
use crate::MAX_RECORD_LEN;

/// A flat, exclusively owned sequence of 32-bit signed integers.
///
/// Allocation is fallible: [`Buffer::allocate`] reports
/// [`TallyError::OutOfMemory`] instead of aborting when the allocator
/// refuses the request.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    data: Vec<i32>,
}

impl Buffer {
    /// Allocate a zero-initialised buffer of `count` elements.
    ///
    /// Returns `InvalidArgument` if `count` exceeds [`MAX_RECORD_LEN`] and
    /// `OutOfMemory` if the allocator cannot provide the block.
    pub fn allocate(count: usize) -> Result<Self> {
        check_len(count)?;
        let mut data = Vec::new();
        data.try_reserve_exact(count)
            .map_err(|_| TallyError::OutOfMemory { requested: count })?;
        // Capacity is already reserved; this fills without reallocating.
        data.resize(count, 0);
        Ok(Self { data })
    }

    /// Adopt an existing vector as a buffer.
    pub fn from_vec(data: Vec<i32>) -> Result<Self> {
        check_len(data.len())?;
        Ok(Self { data })
    }

    /// Return the memory to the allocator.
    ///
    /// Equivalent to dropping the buffer; provided so call sites can make
    /// the end of ownership explicit.
    pub fn release(self) {
        drop(self);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.data.get(index).copied()
    }

    /// Overwrite the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize, value: i32) {
        self.data[index] = value;
    }

    /// Shared view of the elements.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Mutable view of the elements. The length cannot change through it.
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.data
    }

    /// Consume the buffer and return its backing vector.
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }

    /// Heap bytes held by the element block.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<i32>()
    }
}

fn check_len(count: usize) -> Result<()> {
    if count > MAX_RECORD_LEN {
        return Err(TallyError::invalid(format!(
            "{count} elements exceeds the record limit of {MAX_RECORD_LEN}"
        )));
    }
    Ok(())
}

impl Deref for Buffer {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.data
    }
}

impl AsRef<[i32]> for Buffer {
    fn as_ref(&self) -> &[i32] {
        &self.data
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl PartialEq<[i32]> for Buffer {
    fn eq(&self, other: &[i32]) -> bool {
        self.data == other
    }
}

impl<const N: usize> PartialEq<[i32; N]> for Buffer {
    fn eq(&self, other: &[i32; N]) -> bool {
        self.data == other
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
