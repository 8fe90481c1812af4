use sparsebundle_io::{Read, Seek, SeekFrom};

use crate::{
    SECTOR_SIZE,
    decoder::{GptDecoder, GptReader},
    error::PartitionError,
    partition::Partition,
};

/// Lists the partitions of a GPT partitioned device.
///
/// The device is only used as a stream; the table is decoded by `D`.
#[derive(Debug, Clone, Default)]
pub struct PartitionCatalog<D = GptReader> {
    decoder: D,
}

impl PartitionCatalog<GptReader> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: GptDecoder> PartitionCatalog<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Reads the partition table at LBA 1 of `device`.
    ///
    /// Unused slots are skipped, the others are returned in slot order, which is not necessarily
    /// the order on disk. A table without any used slot results in an empty list.
    pub fn list_partitions<R: Read + Seek + ?Sized>(
        &self,
        device: &mut R,
    ) -> Result<Vec<Partition>, PartitionError> {
        device.seek(SeekFrom::Start(SECTOR_SIZE))?;
        let entries = self.decoder.decode(device, SECTOR_SIZE)?;

        let mut partitions = Vec::new();
        for (slot, entry) in entries.into_iter().enumerate() {
            if entry.is_unused() {
                continue;
            }
            let partition = Partition::from(entry);
            log::trace!("\tPartition {}: {}", slot, partition);
            log::trace!("\t\tUnique GUID: {}", partition.unique_guid());
            log::trace!("\t\tAttributes: {:#018x}", partition.attributes());
            partitions.push(partition);
        }
        log::debug!("Found {} partitions", partitions.len());
        Ok(partitions)
    }
}

/// Lists the partitions of `device` using the default [`GptReader`].
pub fn partitions<R: Read + Seek + ?Sized>(
    device: &mut R,
) -> Result<Vec<Partition>, PartitionError> {
    PartitionCatalog::new().list_partitions(device)
}
