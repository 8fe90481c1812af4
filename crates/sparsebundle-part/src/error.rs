/// Errors that can occur when reading a partition table
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    /// The sector size is too small to hold a GPT header
    #[error("invalid sector size {0}b")]
    InvalidSectorSize(u64),

    /// There is no GPT header at the expected position, the image is likely not GPT partitioned
    #[error("invalid GPT signature {0:02x?}")]
    InvalidSignature([u8; 8]),

    #[error("invalid GPT header size {0}b")]
    InvalidHeaderSize(u32),

    #[error("GPT header checksum mismatch, expected {expected:#010x}, got {actual:#010x}")]
    HeaderChecksum { expected: u32, actual: u32 },

    /// Entries must be 128 * 2^n bytes
    #[error("invalid GPT partition entry size {0}b")]
    InvalidEntrySize(u32),

    #[error("GPT partition entry array too large, {count} entries of {size}b")]
    TooManyEntries { count: u32, size: u32 },

    #[error(
        "GPT partition entry array checksum mismatch, expected {expected:#010x}, got {actual:#010x}"
    )]
    ArrayChecksum { expected: u32, actual: u32 },

    /// Only returned by [`GptReader::strict`](crate::GptReader::strict)
    #[error("no protective MBR in front of the GPT header")]
    MissingProtectiveMbr,

    /// The image ended before the whole table could be read
    #[error("image is too small to hold the GPT")]
    Truncated,

    /// An IO error occurred, including errors of the underlying device
    #[error(transparent)]
    Io(#[from] sparsebundle_io::Error),
}
