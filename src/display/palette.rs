// Palette - Maps 8-bit colour indices to RGBA colours
//
// Legacy asset palettes are stored as consecutive blocks of 256 RGB triplets
// using 6-bit VGA DAC components (0-63), each block followed by 6 bytes of
// padding. Components are scaled by 4 to reach 8-bit range.
//
// Index 0 is reserved as the transparent colour for sprites.

use crate::archive::{Archive, ArchiveError};
use std::io::Read;

/// Number of entries in a full palette
pub const PALETTE_SIZE: usize = 256;

/// Size of one palette block in a legacy palette file (768 colour bytes + 6 padding)
pub const VGA_PALETTE_STRIDE: usize = PALETTE_SIZE * 3 + 6;

/// A single RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, also used as the fallback for unknown indices
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 0xFF);

    /// Opaque white
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);

    /// Create a colour from its components
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour from a 0xRRGGBB value
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xFF)
    }

    /// Convert to [R, G, B, A] bytes
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a colour from [R, G, B, A] bytes
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Composite `self` over `dst` using straight (non-premultiplied) alpha
    ///
    /// The destination keeps its own alpha; render targets are always opaque
    /// once presented.
    #[inline]
    pub fn blend_over(self, dst: Rgba) -> Rgba {
        match self.a {
            0 => dst,
            0xFF => self,
            a => {
                let a = a as u32;
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
                Rgba::new(
                    mix(self.r, dst.r),
                    mix(self.g, dst.g),
                    mix(self.b, dst.b),
                    dst.a.max(self.a),
                )
            }
        }
    }
}

/// Anything that can turn a palette index into a colour
///
/// Returns `None` for indices that have no colour assigned.
pub trait PaletteResolver {
    fn resolve(&self, index: u8) -> Option<Rgba>;
}

/// Indexed colour table with up to 256 entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Create a palette from an explicit colour list
    ///
    /// Entries beyond the 256th are ignored since they can never be addressed.
    pub fn new(mut colors: Vec<Rgba>) -> Self {
        colors.truncate(PALETTE_SIZE);
        Self { colors }
    }

    /// Number of defined entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette defines no colours at all
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All defined colours, in index order
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Decode one palette from the contents of a legacy palette file
    ///
    /// # Arguments
    /// * `bytes` - Whole palette file
    /// * `palette_index` - Which 774-byte block to decode
    ///
    /// # Returns
    /// `None` if the file is too short to hold the requested block
    pub fn from_vga_bytes(bytes: &[u8], palette_index: usize) -> Option<Self> {
        let start = palette_index.checked_mul(VGA_PALETTE_STRIDE)?;
        let block = bytes.get(start..start + PALETTE_SIZE * 3)?;

        let colors = block
            .chunks_exact(3)
            .enumerate()
            .map(|(i, rgb)| {
                if i == 0 {
                    Rgba::TRANSPARENT
                } else {
                    Rgba::new(
                        vga_component(rgb[0]),
                        vga_component(rgb[1]),
                        vga_component(rgb[2]),
                        0xFF,
                    )
                }
            })
            .collect();

        Some(Self { colors })
    }

    /// Load one palette block from an archive
    pub fn load(
        archive: &dyn Archive,
        path: &str,
        palette_index: usize,
    ) -> Result<Self, ArchiveError> {
        let mut stream = archive.open_for_read(path)?;
        let mut bytes = Vec::with_capacity(stream.len() as usize);
        stream.read_to_end(&mut bytes)?;

        Self::from_vga_bytes(&bytes, palette_index).ok_or_else(|| {
            ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "{} holds no palette #{} ({} bytes)",
                    path,
                    palette_index,
                    bytes.len()
                ),
            ))
        })
    }

    /// Greyscale ramp, used when no palette file is available
    pub fn greyscale() -> Self {
        let colors = (0..PALETTE_SIZE)
            .map(|i| {
                if i == 0 {
                    Rgba::TRANSPARENT
                } else {
                    let v = i as u8;
                    Rgba::new(v, v, v, 0xFF)
                }
            })
            .collect();
        Self { colors }
    }
}

impl PaletteResolver for Palette {
    #[inline]
    fn resolve(&self, index: u8) -> Option<Rgba> {
        self.colors.get(index as usize).copied()
    }
}

/// Scale a 6-bit VGA DAC component to 8 bits
#[inline]
fn vga_component(value: u8) -> u8 {
    (value & 0x3F) << 2
}
