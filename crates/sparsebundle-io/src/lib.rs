//! Sparsebundle IO
//!
//! This re-exports the `std::io` traits used throughout the sparsebundle crates, and adds the
//! positioned [`ReadAt`] and [`WriteAt`] traits, which read and write at an explicit offset
//! without touching any cursor.

pub use std::io::{Error, ErrorKind, Read, Result, Seek, SeekFrom, Write};

mod positioned;
pub use positioned::{ReadAt, WriteAt};
