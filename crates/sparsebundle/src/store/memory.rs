use spin::RwLock;

use super::BlockStore;
use crate::error::StoreError;

/// An in-memory store, growing on writes past the end.
///
/// Reads take a shared lock, so positioned reads from several threads don't block each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Vec<u8>>,
}

impl MemoryStore {
    /// Creates a zero-filled store of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self::from_vec(vec![0; size])
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of the current content.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

fn to_index(offset: u64) -> Result<usize, StoreError> {
    usize::try_from(offset)
        .map_err(|_| StoreError::new(format!("offset {offset} is not addressable in memory")))
}

impl BlockStore for MemoryStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, StoreError> {
        let data = self.data.read();
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= data.len() {
            return Ok(0);
        }
        let len = buf.len().min(data.len() - start);
        buf[..len].copy_from_slice(&data[start..start + len]);
        Ok(len)
    }

    fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, StoreError> {
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| StoreError::new("write extends past the addressable range"))?;
        let mut data = self.data.write();
        if end > data.len() {
            let additional = end - data.len();
            data.try_reserve(additional).map_err(|_| {
                StoreError::new(format!("cannot grow in-memory image to {end}b"))
            })?;
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    fn size(&self) -> u64 {
        self.data.read().len() as u64
    }

    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Zeroes the range, the closest an in-memory image gets to releasing space.
    fn trim(&self, offset: u64, len: u64) -> Result<u64, StoreError> {
        let mut data = self.data.write();
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= data.len() {
            return Ok(0);
        }
        let len = usize::try_from(len).unwrap_or(usize::MAX).min(data.len() - start);
        data[start..start + len].fill(0);
        Ok(len as u64)
    }

    fn close(self) -> Result<(), StoreError> {
        log::trace!("Releasing {}b memory image", self.data.read().len());
        Ok(())
    }
}
