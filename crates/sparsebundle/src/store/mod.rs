//! Backing stores for a [`Bundle`](crate::Bundle).
//!
//! A store owns the actual image content and answers positioned reads and writes. It never
//! sees the cursor of the bundle, which is why all I/O methods take an explicit offset and a
//! shared reference.

use std::path::Path;

use crate::{error::StoreError, options::BundleOptions};

mod memory;
mod raw;

pub use memory::MemoryStore;
pub use raw::RawImageStore;

/// The storage engine behind a [`Bundle`](crate::Bundle).
pub trait BlockStore {
    /// Reads up to `buf.len()` bytes at `offset`, returning `0` at or past the end.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, StoreError>;

    /// Writes `buf` at `offset`, growing the image if the store supports it.
    fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, StoreError>;

    /// The total addressable length of the image, in bytes.
    fn size(&self) -> u64;

    /// Forces pending writes down to the underlying storage.
    fn flush(&self) -> Result<(), StoreError>;

    /// Releases `len` bytes of storage at `offset`, returning how many bytes were released.
    ///
    /// Stores that can't reclaim space keep the default, which releases nothing.
    fn trim(&self, offset: u64, len: u64) -> Result<u64, StoreError> {
        let _ = (offset, len);
        Ok(0)
    }

    /// Releases the store. Consuming `self` guarantees this happens at most once.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// A store that can be opened from a path.
pub trait OpenStore: BlockStore + Sized {
    fn open(path: &Path, options: &BundleOptions) -> Result<Self, StoreError>;
}
