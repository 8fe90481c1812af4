use std::path::{Path, PathBuf};

use sparsebundle_io::{ReadAt, SeekFrom, WriteAt};

use crate::{
    error::BundleError,
    options::BundleOptions,
    store::{BlockStore, OpenStore},
};

/// The reference point of a seek, using the lseek codes for its raw form.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Relative to the start of the image (`SEEK_SET`)
    Start = 0,
    /// Relative to the cursor (`SEEK_CUR`)
    Current = 1,
    /// Relative to the end of the image (`SEEK_END`)
    End = 2,
}

impl TryFrom<i32> for Whence {
    type Error = BundleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Start),
            1 => Ok(Self::Current),
            2 => Ok(Self::End),
            other => Err(BundleError::InvalidWhence(other)),
        }
    }
}

/// A block device over a sparse disk image.
///
/// The bundle owns its [`BlockStore`] and keeps a single cursor, which is used by
/// [`Self::read`], [`Self::write`], [`Self::seek`] and [`Self::trim`]. Those take `&mut self`,
/// so the cursor can't be raced. The positioned [`Self::read_at`] and [`Self::write_at`] take
/// `&self` and never touch the cursor.
///
/// The store is released by [`Self::close`], or when the bundle is dropped. Once closed, every
/// operation fails with [`BundleError::NotOpen`], and [`Self::size`] returns a negative value.
#[derive(Debug)]
pub struct Bundle<S: BlockStore> {
    store: Option<S>,
    path: Option<PathBuf>,
    offset: u64,
}

impl<S: OpenStore> Bundle<S> {
    /// Opens the image at `path`.
    ///
    /// The options are validated first, so an invalid configuration never reaches the store.
    pub fn open<P: AsRef<Path>>(path: P, options: BundleOptions) -> Result<Self, BundleError> {
        let path = path.as_ref();
        options.validate()?;
        let store = S::open(path, &options).map_err(|source| BundleError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Opened {:?} ({}b)", path, store.size());
        Ok(Self {
            store: Some(store),
            path: Some(path.to_path_buf()),
            offset: 0,
        })
    }
}

impl<S: BlockStore> Bundle<S> {
    /// Wraps an already opened store, validating `options` the same way [`Self::open`] does.
    pub fn with_store(store: S, options: BundleOptions) -> Result<Self, BundleError> {
        options.validate()?;
        Ok(Self {
            store: Some(store),
            path: None,
            offset: 0,
        })
    }

    fn store(&self) -> Result<&S, BundleError> {
        self.store.as_ref().ok_or(BundleError::NotOpen)
    }

    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// The path the bundle was opened from, if it was opened from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The current cursor.
    pub fn position(&self) -> u64 {
        self.offset
    }

    /// The size of the image in bytes, or `-1` if the bundle is not open.
    pub fn size(&self) -> i64 {
        match &self.store {
            Some(store) => i64::try_from(store.size()).unwrap_or(i64::MAX),
            None => -1,
        }
    }

    /// Moves the cursor, returning the new position.
    ///
    /// Seeking past the end is allowed, a read there returns `0` bytes. A target outside
    /// `0..=i64::MAX` fails with [`BundleError::InvalidOffset`] and leaves the cursor where it was.
    pub fn seek_whence(&mut self, delta: i64, whence: Whence) -> Result<u64, BundleError> {
        let store = self.store()?;
        let base: i128 = match whence {
            Whence::Start => 0,
            Whence::Current => self.offset.into(),
            Whence::End => store.size().into(),
        };
        let target = base + i128::from(delta);
        let offset = i64::try_from(target)
            .ok()
            .and_then(|offset| u64::try_from(offset).ok())
            .ok_or(BundleError::InvalidOffset(target))?;
        self.offset = offset;
        Ok(offset)
    }

    /// Same as [`Self::seek_whence`], with an lseek style raw whence.
    pub fn seek_raw(&mut self, delta: i64, whence: i32) -> Result<u64, BundleError> {
        self.seek_whence(delta, Whence::try_from(whence)?)
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, BundleError> {
        match pos {
            SeekFrom::Start(offset) => {
                let offset =
                    i64::try_from(offset).map_err(|_| BundleError::InvalidOffset(offset.into()))?;
                self.seek_whence(offset, Whence::Start)
            }
            SeekFrom::Current(delta) => self.seek_whence(delta, Whence::Current),
            SeekFrom::End(delta) => self.seek_whence(delta, Whence::End),
        }
    }

    /// Reads at `offset` without moving the cursor.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, BundleError> {
        self.store()?
            .read_at(buf, offset)
            .map_err(BundleError::Read)
    }

    /// Reads at the cursor, advancing it by the number of bytes read.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, BundleError> {
        let n = self.read_at(buf, self.offset)?;
        self.offset += n as u64;
        Ok(n)
    }

    /// Writes at `offset` without moving the cursor.
    pub fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, BundleError> {
        self.store()?
            .write_at(buf, offset)
            .map_err(BundleError::Write)
    }

    /// Writes at the cursor, advancing it by the number of bytes written.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, BundleError> {
        let n = self.write_at(buf, self.offset)?;
        self.offset += n as u64;
        Ok(n)
    }

    /// Releases `len` bytes of storage at the cursor. The cursor doesn't move.
    ///
    /// Returns how many bytes the store actually released, which is `0` for stores that can't
    /// reclaim space.
    pub fn trim(&mut self, len: u64) -> Result<u64, BundleError> {
        self.store()?
            .trim(self.offset, len)
            .map_err(BundleError::Trim)
    }

    pub fn flush(&self) -> Result<(), BundleError> {
        self.store()?.flush().map_err(BundleError::Flush)
    }

    /// Closes the bundle and releases the store.
    ///
    /// The store is released even if it reports an error while closing. Closing twice fails
    /// with [`BundleError::NotOpen`].
    pub fn close(&mut self) -> Result<(), BundleError> {
        let store = self.store.take().ok_or(BundleError::NotOpen)?;
        log::debug!("Closing {:?}", self.path);
        store.close().map_err(BundleError::Close)
    }
}

impl<S: BlockStore> Drop for Bundle<S> {
    fn drop(&mut self) {
        if let Some(store) = self.store.take() {
            if let Err(err) = store.close() {
                log::warn!("Failed to close {:?} on drop: {}", self.path, err);
            }
        }
    }
}

impl<S: BlockStore> sparsebundle_io::Read for Bundle<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(Bundle::read(self, buf)?)
    }
}

impl<S: BlockStore> sparsebundle_io::Write for Bundle<S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Bundle::write(self, buf)?)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(Bundle::flush(self)?)
    }
}

impl<S: BlockStore> sparsebundle_io::Seek for Bundle<S> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        Ok(Bundle::seek(self, pos)?)
    }
}

impl<S: BlockStore> ReadAt for Bundle<S> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        Ok(Bundle::read_at(self, buf, offset)?)
    }
}

impl<S: BlockStore> WriteAt for Bundle<S> {
    fn write_at(&self, buf: &[u8], offset: u64) -> std::io::Result<usize> {
        Ok(Bundle::write_at(self, buf, offset)?)
    }
}
