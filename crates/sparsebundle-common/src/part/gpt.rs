use core::{fmt, str::FromStr};

use crate::{
    alg::hash::Crc32HasherIsoHdlc,
    str::utf16::FixedUtf16Str,
    types::number::{Le32, Le64},
};

/// A GUID in its on-disk GPT form.
///
/// The first three groups are stored little-endian and the last two as plain bytes, so
/// `C12A7328-F81F-11D2-BA4B-00A0C93EC93B` is stored as `28 73 2A C1 1F F8 D2 11 BA 4B ...`.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Guid([u8; 16]);

impl Guid {
    /// The all-zero GUID, which marks an unused partition type.
    pub const UNUSED: Self = Self([0; 16]);
    pub const BASIC_DATA_PART: Self = Self::from_fields(
        0xEBD0A0A2,
        0xB9E5,
        0x4433,
        [0x87, 0xC0, 0x68, 0xB6, 0xB7, 0x26, 0x99, 0xC7],
    );
    pub const EFI_SYSTEM_PART: Self = Self::from_fields(
        0xC12A7328,
        0xF81F,
        0x11D2,
        [0xBA, 0x4B, 0x00, 0xA0, 0xC9, 0x3E, 0xC9, 0x3B],
    );
    pub const LINUX_FILESYSTEM: Self = Self::from_fields(
        0x0FC63DAF,
        0x8483,
        0x4772,
        [0x8E, 0x79, 0x3D, 0x69, 0xD8, 0x47, 0x7D, 0xE4],
    );
    pub const APPLE_APFS: Self = Self::from_fields(
        0x7C3457EF,
        0x0000,
        0x11AA,
        [0xAA, 0x11, 0x00, 0x30, 0x65, 0x43, 0xEC, 0xAC],
    );

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Builds a GUID from the groups as they are written in text form.
    pub const fn from_fields(d1: u32, d2: u16, d3: u16, d4: [u8; 8]) -> Self {
        let a = d1.to_le_bytes();
        let b = d2.to_le_bytes();
        let c = d3.to_le_bytes();
        Self([
            a[0], a[1], a[2], a[3], b[0], b[1], c[0], c[1], d4[0], d4[1], d4[2], d4[3], d4[4],
            d4[5], d4[6], d4[7],
        ])
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_unused(&self) -> bool {
        *self == Self::UNUSED
    }
}

/// Formats as the canonical uppercase hyphenated string.
impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            u16::from_le_bytes([b[4], b[5]]),
            u16::from_le_bytes([b[6], b[7]]),
            b[8],
            b[9],
            b[10],
            b[11],
            b[12],
            b[13],
            b[14],
            b[15]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuidParseError {
    #[error("expected 36 characters, got {0}")]
    InvalidLength(usize),
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Parses the hyphenated form, in either case.
impl FromStr for Guid {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const HYPHENS: [usize; 4] = [8, 13, 18, 23];

        if s.len() != 36 {
            return Err(GuidParseError::InvalidLength(s.chars().count()));
        }
        let mut digits = [0u8; 32];
        let mut count = 0;
        for (position, character) in s.char_indices() {
            let invalid = GuidParseError::InvalidCharacter {
                character,
                position,
            };
            if HYPHENS.contains(&position) {
                if character != '-' {
                    return Err(invalid);
                }
                continue;
            }
            digits[count] = character.to_digit(16).ok_or(invalid)? as u8;
            count += 1;
        }

        let mut text = [0u8; 16];
        for (i, pair) in digits.chunks_exact(2).enumerate() {
            text[i] = (pair[0] << 4) | pair[1];
        }
        let mut d4 = [0u8; 8];
        d4.copy_from_slice(&text[8..]);
        Ok(Self::from_fields(
            u32::from_be_bytes([text[0], text[1], text[2], text[3]]),
            u16::from_be_bytes([text[4], text[5]]),
            u16::from_be_bytes([text[6], text[7]]),
            d4,
        ))
    }
}

/// The GPT header, found at LBA 1 (primary) and the last LBA of the disk (backup).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GptHeader {
    /// The signature for the GPT header, must be "EFI PART".
    pub signature: [u8; 8],
    pub revision: Le32,
    /// The number of bytes covered by `crc32`, at least [`GptHeader::SIZE`].
    pub header_size: Le32,
    pub crc32: Le32,
    pub reserved: Le32,
    pub current_lba: Le64,
    pub backup_lba: Le64,
    pub first_usable_lba: Le64,
    pub last_usable_lba: Le64,
    pub disk_guid: Guid,
    pub partition_entry_lba: Le64,
    pub num_partition_entries: Le32,
    /// The size of each partition entry, in bytes.
    ///
    /// Must be a 128 * 2^n bytes
    pub size_of_partition_entry: Le32,
    pub partition_entry_array_crc32: Le32,
}

impl GptHeader {
    pub const SIGNATURE: [u8; 8] = *b"EFI PART";
    pub const SIZE: usize = size_of::<Self>();
    const CRC_RANGE: core::ops::Range<usize> = 16..20;

    pub fn has_valid_signature(&self) -> bool {
        self.signature == Self::SIGNATURE
    }

    /// Computes the header checksum over `raw`, which must hold exactly `header_size` bytes of
    /// the header. The stored checksum field is treated as zero.
    pub fn compute_crc32(raw: &[u8]) -> u32 {
        Crc32HasherIsoHdlc::checksum_parts(&[
            &raw[..Self::CRC_RANGE.start],
            &[0; 4],
            &raw[Self::CRC_RANGE.end..],
        ])
    }

    /// Recomputes `crc32` for a header whose `header_size` is [`GptHeader::SIZE`].
    pub fn update_crc32(&mut self) {
        self.crc32.set(0);
        let crc = Crc32HasherIsoHdlc::checksum(bytemuck::bytes_of(self));
        self.crc32.set(crc);
    }
}

impl Default for GptHeader {
    fn default() -> Self {
        Self {
            signature: Self::SIGNATURE,
            revision: Le32::new(0x00010000),
            header_size: Le32::new(Self::SIZE as u32),
            crc32: Le32::new(0),
            reserved: Le32::new(0),
            current_lba: Le64::new(1),
            backup_lba: Le64::new(0),
            first_usable_lba: Le64::new(0),
            last_usable_lba: Le64::new(0),
            disk_guid: Guid::default(),
            partition_entry_lba: Le64::new(2),
            num_partition_entries: Le32::new(0),
            size_of_partition_entry: Le32::new(GptPartitionEntry::SIZE as u32),
            partition_entry_array_crc32: Le32::new(0),
        }
    }
}

/// A single slot of the GPT partition entry array.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GptPartitionEntry {
    type_guid: Guid,
    unique_partition_guid: Guid,
    starting_lba: Le64,
    ending_lba: Le64,
    attributes: Le64,
    partition_name: FixedUtf16Str<36>,
}

impl GptPartitionEntry {
    pub const SIZE: usize = size_of::<Self>();

    pub fn new(
        type_guid: Guid,
        unique_partition_guid: Guid,
        starting_lba: u64,
        ending_lba: u64,
        attributes: u64,
        partition_name: FixedUtf16Str<36>,
    ) -> Self {
        Self {
            type_guid,
            unique_partition_guid,
            starting_lba: Le64::new(starting_lba),
            ending_lba: Le64::new(ending_lba),
            attributes: Le64::new(attributes),
            partition_name,
        }
    }

    /// Reads an entry from the first [`GptPartitionEntry::SIZE`] bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`GptPartitionEntry::SIZE`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        *bytemuck::from_bytes::<Self>(&bytes[..Self::SIZE])
    }

    /// An unused slot has both its first and last LBA set to zero.
    pub fn is_unused(&self) -> bool {
        self.starting_lba.get() == 0 && self.ending_lba.get() == 0
    }

    pub fn type_guid(&self) -> Guid {
        self.type_guid
    }

    pub fn unique_partition_guid(&self) -> Guid {
        self.unique_partition_guid
    }

    pub fn starting_lba(&self) -> u64 {
        self.starting_lba.get()
    }

    /// The last LBA of the partition, inclusive.
    pub fn ending_lba(&self) -> u64 {
        self.ending_lba.get()
    }

    pub fn attributes(&self) -> u64 {
        self.attributes.get()
    }

    pub fn partition_name(&self) -> &FixedUtf16Str<36> {
        &self.partition_name
    }
}
