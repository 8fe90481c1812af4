//! Sparsebundle
//!
//! A random-access block device over a sparse disk image. The image content is provided by a
//! [`BlockStore`], and [`Bundle`] adds a cursor on top of it, so the image can be used wherever
//! a [`Read`] + [`Write`] + [`Seek`] stream is expected.
//!
//! ```
//! use sparsebundle::{Bundle, BundleOptions, MemoryStore};
//! use sparsebundle::{Read, Seek, SeekFrom, Write};
//!
//! let store = MemoryStore::new(4096);
//! let mut bundle = Bundle::with_store(store, BundleOptions::default())?;
//! bundle.write_all(b"hello")?;
//! bundle.seek(SeekFrom::Start(0))?;
//! let mut buf = [0u8; 5];
//! bundle.read_exact(&mut buf)?;
//! assert_eq!(&buf, b"hello");
//! bundle.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bundle;
mod error;
mod options;
mod store;

pub use bundle::{Bundle, Whence};
pub use error::{BundleError, StoreError};
pub use options::BundleOptions;
pub use store::{BlockStore, MemoryStore, OpenStore, RawImageStore};
// Re-exported because they show up in the public API
pub use sparsebundle_io::{Read, ReadAt, Seek, SeekFrom, Write, WriteAt};
