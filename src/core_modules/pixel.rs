// THEORY:
// The `Pixel` module is the most fundamental unit of the engine: a "dumb" data
// container for one pixel's three color channels, plus the packing codec that
// moves those channels in and out of the 24-bit integer form the rasters store.
//
// Key architectural principles:
// 1.  **Big-endian channel order**: The packed form puts R in the most
//     significant byte of the 24-bit value, G in the middle, B in the least.
//     Every shift-and-mask in the crate goes through this one module, so the
//     channel order is a local invariant rather than a repo-wide convention.
// 2.  **Total functions**: `pack` and `unpack` have no error conditions. Any
//     byte triple packs, any 24-bit value unpacks, and the two are exact
//     inverses of each other.
// 3.  **Indexed channel access**: The oil filter scans windows one channel at a
//     time, so `channel(0..=2)` exposes (R,G,B) positionally without the caller
//     repeating the unpacking arithmetic.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    /// A pixel's three channels packed into the low 24 bits of a `u32`,
    /// R most significant.
    pub type PackedRgb = u32;

    /// Maximum value of an 8-bit channel sample.
    pub const CHANNEL_MAX: Channel = 255;

    /// Number of color channels per pixel. No alpha: rasters are strictly RGB.
    pub const CHANNELS: usize = 3;

    /// A "dumb" data container for one pixel's unpacked channel values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        /// Packs the three channels into a 24-bit integer, R in bits 16..24.
        pub fn pack(&self) -> PackedRgb {
            ((self.red as PackedRgb) << 16)
                | ((self.green as PackedRgb) << 8)
                | (self.blue as PackedRgb)
        }

        /// Extracts the three channels of a packed value by shifting and
        /// masking with `0xFF`. Inverse of [`Pixel::pack`].
        pub fn unpack(packed: PackedRgb) -> Self {
            Pixel {
                red: ((packed >> 16) & 0xFF) as Channel,
                green: ((packed >> 8) & 0xFF) as Channel,
                blue: (packed & 0xFF) as Channel,
            }
        }

        /// Positional channel access: 0 = R, 1 = G, 2 = B.
        pub fn channel(&self, index: usize) -> Channel {
            match index {
                0 => self.red,
                1 => self.green,
                2 => self.blue,
                _ => panic!("Channel index {index} out of range for an RGB pixel."),
            }
        }

        pub fn channels(&self) -> [Channel; CHANNELS] {
            [self.red, self.green, self.blue]
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue]
        }
    }
}
