//! A crate for listing the partitions of a GPT partitioned disk image.
//!
//! The [`PartitionCatalog`] works on anything that is [`Read`](sparsebundle_io::Read) +
//! [`Seek`](sparsebundle_io::Seek), most notably a [`sparsebundle`] `Bundle`. The table itself is
//! decoded by a [`GptDecoder`], [`GptReader`] by default, and the catalog turns the raw entries
//! into [`Partition`]s.
//!
//! ```no_run
//! use sparsebundle::{Bundle, BundleOptions, RawImageStore};
//!
//! let mut bundle: Bundle<RawImageStore> = Bundle::open("disk.img", BundleOptions::default())?;
//! for partition in sparsebundle_part::partitions(&mut bundle)? {
//!     println!("{partition}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod catalog;
mod decoder;
mod error;
mod partition;
pub mod types;

pub use catalog::{PartitionCatalog, partitions};
pub use decoder::{GptDecoder, GptReader};
pub use error::PartitionError;
pub use partition::Partition;
pub use sparsebundle_common::part::gpt::{GptPartitionEntry, Guid};

/// The sector size of the images, used both to locate the GPT and to turn LBAs into bytes.
pub const SECTOR_SIZE: u64 = 512;
