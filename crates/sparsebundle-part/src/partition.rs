use core::fmt;

use sparsebundle_common::{
    part::gpt::{GptPartitionEntry, Guid},
    str::utf16::FixedUtf16Str,
};

use crate::{
    SECTOR_SIZE,
    types::{UNKNOWN_TYPE, type_name},
};

/// A used slot of a GUID Partition Table.
///
/// This is an immutable view over the raw entry. Everything beyond the raw fields, such as the
/// type description, the decoded name or the byte extents, is computed on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    entry: GptPartitionEntry,
}

impl From<GptPartitionEntry> for Partition {
    fn from(entry: GptPartitionEntry) -> Self {
        Self { entry }
    }
}

impl Partition {
    pub fn type_guid(&self) -> Guid {
        self.entry.type_guid()
    }

    pub fn unique_guid(&self) -> Guid {
        self.entry.unique_partition_guid()
    }

    pub fn first_lba(&self) -> u64 {
        self.entry.starting_lba()
    }

    /// The last LBA of the partition, inclusive.
    pub fn last_lba(&self) -> u64 {
        self.entry.ending_lba()
    }

    pub fn attributes(&self) -> u64 {
        self.entry.attributes()
    }

    /// The name field as stored on disk.
    pub fn raw_name(&self) -> &FixedUtf16Str<36> {
        self.entry.partition_name()
    }

    /// The description of the partition type, or `"unknown"`.
    pub fn type_name(&self) -> &'static str {
        type_name(&self.type_guid()).unwrap_or(UNKNOWN_TYPE)
    }

    /// The partition label, up to the first null character.
    pub fn name(&self) -> String {
        self.raw_name().to_string_lossy()
    }

    /// `(last_lba - first_lba) * SECTOR_SIZE`, or `None` for a malformed entry whose last LBA
    /// lies before its first.
    ///
    /// Note the last sector is not counted, so a partition of a single sector has a size of 0.
    pub fn size(&self) -> Option<u64> {
        self.last_lba()
            .checked_sub(self.first_lba())?
            .checked_mul(SECTOR_SIZE)
    }

    /// The byte offset of the first sector.
    pub fn start_offset(&self) -> Option<u64> {
        self.first_lba().checked_mul(SECTOR_SIZE)
    }

    /// The byte offset of the last sector.
    pub fn end_offset(&self) -> Option<u64> {
        self.last_lba().checked_mul(SECTOR_SIZE)
    }
}

struct Bytes(Option<u64>);

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("invalid"),
        }
    }
}

/// A diagnostic rendering, meant for logs rather than parsing.
impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Partition type={:?} name={:?} first={} last={} size={}/>",
            self.type_name(),
            self.name(),
            Bytes(self.start_offset()),
            Bytes(self.end_offset()),
            Bytes(self.size()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn partition(type_guid: Guid, first: u64, last: u64, name: &str) -> Partition {
        GptPartitionEntry::new(
            type_guid,
            Guid::UNUSED,
            first,
            last,
            0,
            FixedUtf16Str::encode(name),
        )
        .into()
    }

    #[test]
    fn test_size() {
        assert_eq!(partition(Guid::UNUSED, 100, 200, "").size(), Some(51200));
        assert_eq!(partition(Guid::UNUSED, 300, 300, "").size(), Some(0));
        assert_eq!(partition(Guid::UNUSED, 300, 299, "").size(), None);
        assert_eq!(partition(Guid::UNUSED, 0, u64::MAX, "").size(), None);
    }

    #[test]
    fn test_offsets() {
        let p = partition(Guid::UNUSED, 2048, 4095, "");
        assert_eq!(p.start_offset(), Some(1048576));
        assert_eq!(p.end_offset(), Some(4095 * 512));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            partition(Guid::EFI_SYSTEM_PART, 40, 409639, "").type_name(),
            "EFI System (ESP)"
        );
        let unknown = Guid::from_fields(0x12345678, 0x9abc, 0xdef0, [0; 8]);
        assert_eq!(partition(unknown, 40, 80, "").type_name(), "unknown");
    }

    #[test]
    fn test_name() {
        assert_eq!(partition(Guid::UNUSED, 1, 2, "").name(), "");
        assert_eq!(
            partition(Guid::UNUSED, 1, 2, "EFI system partition").name(),
            "EFI system partition"
        );
    }

    #[test]
    fn test_display() {
        let p = partition(Guid::LINUX_FILESYSTEM, 2048, 4096, "root");
        assert_eq!(
            p.to_string(),
            r#"<Partition type="Linux filesystem" name="root" first=1048576 last=2097152 size=1048576/>"#
        );
        let p = partition(Guid::UNUSED, 10, 5, "");
        assert_eq!(
            p.to_string(),
            r#"<Partition type="unknown" name="" first=5120 last=2560 size=invalid/>"#
        );
    }
}
