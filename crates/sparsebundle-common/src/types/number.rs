//! Little-endian integers with an alignment of 1.
//!
//! GPT and MBR records are little-endian and are read straight out of sector buffers, so the
//! fields are stored as byte arrays. This keeps the records free of padding, which is required
//! for deriving [`bytemuck::Pod`], and lets them be cast from unaligned buffers.

macro_rules! le_number {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $size:literal, $width:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const fn new(value: $inner) -> Self {
                Self(value.to_le_bytes())
            }

            pub const fn get(&self) -> $inner {
                <$inner>::from_le_bytes(self.0)
            }

            pub fn set(&mut self, value: $inner) {
                self.0 = value.to_le_bytes();
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.get()
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.get(), f)
            }
        }

        impl core::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!("0x{:0", $width, "x}"), self.get())
            }
        }

        impl core::fmt::UpperHex for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!("0x{:0", $width, "X}"), self.get())
            }
        }
    };
}

le_number!(
    /// A little-endian `u16`.
    Le16, u16, 2, 4
);
le_number!(
    /// A little-endian `u32`.
    Le32, u32, 4, 8
);
le_number!(
    /// A little-endian `u64`.
    Le64, u64, 8, 16
);

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(Le16, u16);
    assert_eq_size!(Le32, u32);
    assert_eq_size!(Le64, u64);
    assert_eq_align!(Le64, u8);

    #[test]
    fn test_le_repr() {
        assert_eq!(Le16::new(0x1234).0, [0x34, 0x12]);
        assert_eq!(Le32::new(0x12345678).0, [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(
            Le64::new(0x123456789abcdef0).0,
            [0xf0, 0xde, 0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12]
        );
    }

    #[test]
    fn test_set_and_format() {
        let mut value = Le32::default();
        value.set(0xdeadbeef);
        assert_eq!(value.get(), 0xdeadbeef);
        assert_eq!(format!("{value:x}"), "0xdeadbeef");
        assert_eq!(format!("{value:X}"), "0xDEADBEEF");
        assert_eq!(format!("{}", Le16::new(512)), "512");
        assert_eq!(format!("{:?}", Le64::new(7)), "Le64(7)");
    }

    #[test]
    fn test_cast_from_unaligned() {
        let bytes = [0u8, 0x01, 0x02, 0x00, 0x00];
        let value: &Le32 = bytemuck::from_bytes(&bytes[1..5]);
        assert_eq!(value.get(), 0x0201);
    }
}
