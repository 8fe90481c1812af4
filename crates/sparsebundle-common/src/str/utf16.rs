use crate::types::number::Le16;

/// A fixed width, null padded UTF-16LE string, as used for GPT partition names.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedUtf16Str<const N: usize> {
    data: [Le16; N],
}

impl<const N: usize> FixedUtf16Str<N> {
    /// The size of the field in bytes.
    pub const BYTE_LEN: usize = N * 2;

    /// Builds a string from raw little-endian bytes.
    ///
    /// # Panics
    /// Panics if `bytes` is not exactly [`Self::BYTE_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        *bytemuck::from_bytes::<Self>(bytes)
    }

    /// Encodes `value`, truncating it to `N` code units. A surrogate pair that would be split by
    /// the truncation is dropped entirely.
    pub fn encode(value: &str) -> Self {
        let mut data = [Le16::default(); N];
        let mut len = 0;
        for ch in value.chars() {
            let mut units = [0u16; 2];
            let units = ch.encode_utf16(&mut units);
            if len + units.len() > N {
                break;
            }
            for unit in units.iter() {
                data[len] = Le16::new(*unit);
                len += 1;
            }
        }
        Self { data }
    }

    /// The code units up to, but not including, the first null unit.
    pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
        self.data.iter().map(Le16::get).take_while(|&unit| unit != 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn is_empty(&self) -> bool {
        self.units().next().is_none()
    }

    /// Decodes the string, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        char::decode_utf16(self.units())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Decodes the string, failing on the first unpaired surrogate.
    pub fn to_string(&self) -> Result<String, core::char::DecodeUtf16Error> {
        char::decode_utf16(self.units()).collect()
    }
}

impl<const N: usize> Default for FixedUtf16Str<N> {
    fn default() -> Self {
        Self {
            data: [Le16::default(); N],
        }
    }
}

impl<const N: usize> core::fmt::Debug for FixedUtf16Str<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

// SAFETY: the struct is a transparent array of `Le16`, which is `Pod`, with no padding.
unsafe impl<const N: usize> bytemuck::Pod for FixedUtf16Str<N> {}
unsafe impl<const N: usize> bytemuck::Zeroable for FixedUtf16Str<N> {}
