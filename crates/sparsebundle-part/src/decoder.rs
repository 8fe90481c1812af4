use sparsebundle_common::part::{
    gpt::{GptHeader, GptPartitionEntry},
    mbr::MasterBootRecord,
};
use sparsebundle_io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::PartitionError;

/// The largest partition entry array that will be read. The usual table is 16KiB.
const MAX_ENTRY_ARRAY_BYTES: u64 = 1024 * 1024;

/// Decodes the raw entries of a GUID Partition Table.
pub trait GptDecoder {
    /// Reads the GPT header at the current position of `reader`, and returns every slot of the
    /// partition entry array in on-disk order, unused slots included.
    ///
    /// The position of `reader` is unspecified afterwards.
    fn decode<R: Read + Seek + ?Sized>(
        &self,
        reader: &mut R,
        sector_size: u64,
    ) -> Result<Vec<GptPartitionEntry>, PartitionError>;
}

/// The default [`GptDecoder`], which validates the primary header and entry array.
///
/// The backup header is not consulted, a damaged primary table is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GptReader {
    require_protective_mbr: bool,
}

impl GptReader {
    /// A reader that only warns about a missing protective MBR.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reader that fails with [`PartitionError::MissingProtectiveMbr`] when the sector in
    /// front of the header is not a protective (or hybrid) MBR.
    pub fn strict() -> Self {
        Self {
            require_protective_mbr: true,
        }
    }

    fn check_protective_mbr<R: Read + Seek + ?Sized>(
        &self,
        reader: &mut R,
    ) -> Result<(), PartitionError> {
        reader.seek(SeekFrom::Start(0))?;
        let mut sector = [0u8; MasterBootRecord::SIZE];
        read_exact(reader, &mut sector)?;
        let mbr = MasterBootRecord::from_bytes(&sector);
        if mbr.is_protective() {
            return Ok(());
        }
        if self.require_protective_mbr {
            return Err(PartitionError::MissingProtectiveMbr);
        }
        log::warn!("GPT disk without a protective MBR: {:?}", mbr.partitions);
        Ok(())
    }
}

fn read_exact<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<(), PartitionError> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => PartitionError::Truncated,
        _ => PartitionError::Io(err),
    })
}

fn is_valid_entry_size(size: u32) -> bool {
    size >= GptPartitionEntry::SIZE as u32
        && size % GptPartitionEntry::SIZE as u32 == 0
        && (size / GptPartitionEntry::SIZE as u32).is_power_of_two()
}

impl GptDecoder for GptReader {
    fn decode<R: Read + Seek + ?Sized>(
        &self,
        reader: &mut R,
        sector_size: u64,
    ) -> Result<Vec<GptPartitionEntry>, PartitionError> {
        if sector_size < GptHeader::SIZE as u64 || sector_size > MAX_ENTRY_ARRAY_BYTES {
            return Err(PartitionError::InvalidSectorSize(sector_size));
        }
        let header_lba = reader.stream_position()? / sector_size;
        let mut sector = vec![0u8; sector_size as usize];
        read_exact(reader, &mut sector)?;

        let header: GptHeader = bytemuck::pod_read_unaligned(&sector[..GptHeader::SIZE]);
        if !header.has_valid_signature() {
            return Err(PartitionError::InvalidSignature(header.signature));
        }
        let header_size = header.header_size.get();
        if header_size < GptHeader::SIZE as u32 || u64::from(header_size) > sector_size {
            return Err(PartitionError::InvalidHeaderSize(header_size));
        }
        let actual = GptHeader::compute_crc32(&sector[..header_size as usize]);
        if actual != header.crc32.get() {
            return Err(PartitionError::HeaderChecksum {
                expected: header.crc32.get(),
                actual,
            });
        }

        log::trace!(
            "Found GPT partition table with {} entries",
            header.num_partition_entries
        );
        log::trace!("\tRevision: {:x}", header.revision);
        log::trace!("\tHeader size: {}", header.header_size);
        log::trace!("\tCRC32: {:x}", header.crc32);
        log::trace!("\tDisk GUID: {}", header.disk_guid);
        log::trace!("\tCurrent LBA: {}", header.current_lba);
        log::trace!("\tBackup LBA: {}", header.backup_lba);
        log::trace!("\tFirst usable LBA: {}", header.first_usable_lba);
        log::trace!("\tLast usable LBA: {}", header.last_usable_lba);
        log::trace!("\tPartition entry LBA: {}", header.partition_entry_lba);
        log::trace!(
            "\tSize of partition entry: {}",
            header.size_of_partition_entry
        );
        if header.current_lba.get() != header_lba {
            log::warn!(
                "GPT header found at LBA {}, but claims to be at LBA {}",
                header_lba,
                header.current_lba
            );
        }

        if header_lba >= 1 {
            self.check_protective_mbr(reader)?;
        }

        let count = header.num_partition_entries.get();
        let size = header.size_of_partition_entry.get();
        if !is_valid_entry_size(size) {
            return Err(PartitionError::InvalidEntrySize(size));
        }
        let array_len = u64::from(count) * u64::from(size);
        if array_len > MAX_ENTRY_ARRAY_BYTES {
            return Err(PartitionError::TooManyEntries { count, size });
        }

        let array_start = header
            .partition_entry_lba
            .get()
            .checked_mul(sector_size)
            .ok_or(PartitionError::Truncated)?;
        reader.seek(SeekFrom::Start(array_start))?;
        let mut array = vec![0u8; array_len as usize];
        read_exact(reader, &mut array)?;

        let expected = header.partition_entry_array_crc32.get();
        let actual = sparsebundle_common::alg::hash::Crc32HasherIsoHdlc::checksum(&array);
        if actual != expected {
            return Err(PartitionError::ArrayChecksum { expected, actual });
        }

        Ok(array
            .chunks_exact(size as usize)
            .map(GptPartitionEntry::from_bytes)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_sizes() {
        assert!(is_valid_entry_size(128));
        assert!(is_valid_entry_size(256));
        assert!(is_valid_entry_size(1024));
        assert!(!is_valid_entry_size(0));
        assert!(!is_valid_entry_size(64));
        assert!(!is_valid_entry_size(136));
        assert!(!is_valid_entry_size(384));
    }

    #[test]
    fn test_sector_size() {
        let mut reader = std::io::Cursor::new(vec![0u8; 4096]);
        assert!(matches!(
            GptReader::new().decode(&mut reader, 64),
            Err(PartitionError::InvalidSectorSize(64))
        ));
    }
}
