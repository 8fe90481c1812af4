#![allow(dead_code)]

use sparsebundle_common::{
    alg::hash::Crc32HasherIsoHdlc,
    part::{
        gpt::{GptHeader, GptPartitionEntry, Guid},
        mbr::MasterBootRecord,
    },
    str::utf16::FixedUtf16Str,
    types::number::{Le32, Le64},
};

pub const SECTOR: usize = 512;
pub const TOTAL_SECTORS: u64 = 2048;
pub const ENTRY_COUNT: usize = 128;

/// Builds a GPT disk image in memory, with a protective MBR, the primary header at LBA 1 and the
/// entry array at LBA 2.
pub struct ImageBuilder {
    entries: Vec<GptPartitionEntry>,
    header: GptHeader,
    protective_mbr: bool,
}

impl ImageBuilder {
    pub fn new() -> Self {
        let header = GptHeader {
            backup_lba: Le64::new(TOTAL_SECTORS - 1),
            first_usable_lba: Le64::new(34),
            last_usable_lba: Le64::new(TOTAL_SECTORS - 34),
            disk_guid: Guid::from_fields(
                0x0a1b2c3d,
                0x4e5f,
                0x6071,
                [0x82, 0x93, 0xa4, 0xb5, 0xc6, 0xd7, 0xe8, 0xf9],
            ),
            num_partition_entries: Le32::new(ENTRY_COUNT as u32),
            ..Default::default()
        };
        Self {
            entries: vec![GptPartitionEntry::default(); ENTRY_COUNT],
            header,
            protective_mbr: true,
        }
    }

    /// Sets the slot `slot` of the entry array.
    pub fn partition(
        mut self,
        slot: usize,
        type_guid: Guid,
        first: u64,
        last: u64,
        name: &str,
    ) -> Self {
        let unique = Guid::from_fields(slot as u32 + 1, 0x1111, 0x2222, [0x33; 8]);
        let name = FixedUtf16Str::encode(name);
        self.entries[slot] = GptPartitionEntry::new(type_guid, unique, first, last, 0, name);
        self
    }

    pub fn without_protective_mbr(mut self) -> Self {
        self.protective_mbr = false;
        self
    }

    /// Changes the header before it is sealed.
    pub fn header(mut self, f: impl FnOnce(&mut GptHeader)) -> Self {
        f(&mut self.header);
        self
    }

    /// Returns the image with both checksums computed.
    pub fn build(mut self) -> Vec<u8> {
        let mut image = vec![0u8; TOTAL_SECTORS as usize * SECTOR];
        if self.protective_mbr {
            let mbr = MasterBootRecord::protective(TOTAL_SECTORS);
            image[..SECTOR].copy_from_slice(bytemuck::bytes_of(&mbr));
        }

        let array: Vec<u8> = self
            .entries
            .iter()
            .flat_map(|entry| bytemuck::bytes_of(entry).iter().copied())
            .collect();
        let array_start = 2 * SECTOR;
        image[array_start..array_start + array.len()].copy_from_slice(&array);

        self.header.partition_entry_array_crc32 =
            Le32::new(Crc32HasherIsoHdlc::checksum(&array));
        self.header.update_crc32();
        image[SECTOR..SECTOR + GptHeader::SIZE].copy_from_slice(bytemuck::bytes_of(&self.header));
        image
    }
}

/// Recomputes the header checksum of `image` after its header was modified in place.
pub fn reseal_header(image: &mut [u8], header_size: usize) {
    let header = &mut image[SECTOR..SECTOR + header_size];
    let crc = GptHeader::compute_crc32(header);
    header[16..20].copy_from_slice(&crc.to_le_bytes());
}
