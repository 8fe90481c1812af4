use std::{
    fs::{File, OpenOptions},
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use sparsebundle_io::{ReadAt, WriteAt};

use super::{BlockStore, OpenStore};
use crate::{error::StoreError, options::BundleOptions};

/// A store over a single flat image file, such as a `.img` or `.dmg` (UDRW) file.
///
/// Reads and writes use positioned file I/O, so the file cursor is never relied upon.
#[derive(Debug)]
pub struct RawImageStore {
    file: File,
    // Cached, since writes past the end grow the file
    size: AtomicU64,
    read_only: bool,
}

impl RawImageStore {
    pub fn from_file(file: File, read_only: bool) -> Result<Self, StoreError> {
        let size = file.metadata()?.len();
        Ok(Self {
            file,
            size: AtomicU64::new(size),
            read_only,
        })
    }
}

impl OpenStore for RawImageStore {
    fn open(path: &Path, options: &BundleOptions) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .read(true)
            .write(!options.read_only)
            .open(path)?;
        if !file.metadata()?.is_file() {
            return Err(StoreError::new("not a regular file"));
        }
        Self::from_file(file, options.read_only)
    }
}

impl BlockStore for RawImageStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, StoreError> {
        Ok(ReadAt::read_at(&self.file, buf, offset)?)
    }

    fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, StoreError> {
        if self.read_only {
            return Err(StoreError::new("image is opened read-only"));
        }
        let written = WriteAt::write_at(&self.file, buf, offset)?;
        self.size
            .fetch_max(offset.saturating_add(written as u64), Ordering::AcqRel);
        Ok(written)
    }

    fn size(&self) -> u64 {
        self.size.load(Ordering::Acquire)
    }

    fn flush(&self) -> Result<(), StoreError> {
        if !self.read_only {
            self.file.sync_all()?;
        }
        Ok(())
    }

    fn close(self) -> Result<(), StoreError> {
        self.flush()?;
        log::debug!("Closed raw image ({}b)", self.size());
        Ok(())
    }
}
