mod crc;
pub use crc::Crc32HasherIsoHdlc;
