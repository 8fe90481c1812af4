use crate::types::number::Le32;

/// The MBR partition type of a GPT protective partition.
pub const PROTECTIVE_PARTITION_TYPE: u8 = 0xEE;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MbrPartition {
    pub boot_indicator: u8,
    pub start_chs: [u8; 3],
    pub part_type: u8,
    pub end_chs: [u8; 3],
    pub start_sector: Le32,
    pub block_count: Le32,
}

impl MbrPartition {
    /// Returns whether the partition is empty
    ///
    /// Like most tools, this only looks at the partition type.
    pub fn is_empty(&self) -> bool {
        self.part_type == 0x00
    }
}

/// The first sector of a disk.
///
/// On a GPT disk this holds a protective MBR, a single partition of type `0xEE` spanning the
/// disk, so that legacy tools don't consider the disk to be unpartitioned.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MasterBootRecord {
    pub bootstrap: [u8; 440],
    pub disk_signature: Le32,
    pub reserved: [u8; 2],
    pub partitions: [MbrPartition; 4],
    pub boot_signature: [u8; 2],
}

impl MasterBootRecord {
    pub const BOOT_SIGNATURE: [u8; 2] = [0x55, 0xAA];
    pub const SIZE: usize = size_of::<Self>();

    /// Reads the record from the first [`MasterBootRecord::SIZE`] bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than a sector.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        *bytemuck::from_bytes::<Self>(&bytes[..Self::SIZE])
    }

    /// Creates a protective MBR for a disk of `total_sectors` sectors.
    pub fn protective(total_sectors: u64) -> Self {
        let mut mbr = <Self as bytemuck::Zeroable>::zeroed();
        let count = u32::try_from(total_sectors.saturating_sub(1)).unwrap_or(u32::MAX);
        mbr.partitions[0] = MbrPartition {
            boot_indicator: 0,
            start_chs: [0x00, 0x02, 0x00],
            part_type: PROTECTIVE_PARTITION_TYPE,
            end_chs: [0xFF, 0xFF, 0xFF],
            start_sector: Le32::new(1),
            block_count: Le32::new(count),
        };
        mbr.boot_signature = Self::BOOT_SIGNATURE;
        mbr
    }

    pub fn has_boot_signature(&self) -> bool {
        self.boot_signature == Self::BOOT_SIGNATURE
    }

    /// Whether the record declares a GPT disk, either through a protective partition or a
    /// hybrid MBR that contains one.
    pub fn is_protective(&self) -> bool {
        self.has_boot_signature()
            && self
                .partitions
                .iter()
                .any(|p| p.part_type == PROTECTIVE_PARTITION_TYPE)
    }
}

impl core::fmt::Debug for MasterBootRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MasterBootRecord")
            .field("disk_signature", &self.disk_signature)
            .field("partitions", &self.partitions)
            .field("boot_signature", &self.boot_signature)
            .finish()
    }
}
