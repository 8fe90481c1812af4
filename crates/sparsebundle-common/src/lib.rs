//! Common types used by the sparsebundle crates.
//!
//! Everything in here describes bytes as they sit on disk: little-endian integers, GUIDs,
//! fixed width UTF-16 names and the GPT/MBR records built from them.

/// Algorithms
pub mod alg;
/// Partitions
pub mod part;
/// Strings
pub mod str;
/// Types
pub mod types;
