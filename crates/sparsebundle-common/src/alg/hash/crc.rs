use crc::{CRC_32_ISO_HDLC, Crc};

const HASHER_ISO_HDLC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// The CRC32 variant used by GPT headers and partition entry arrays.
pub struct Crc32HasherIsoHdlc;

impl Crc32HasherIsoHdlc {
    pub fn checksum(data: &[u8]) -> u32 {
        HASHER_ISO_HDLC.checksum(data)
    }

    /// Computes the checksum over several slices, as if they were concatenated.
    pub fn checksum_parts(parts: &[&[u8]]) -> u32 {
        let mut digest = HASHER_ISO_HDLC.digest();
        for part in parts {
            digest.update(part);
        }
        digest.finalize()
    }
}
