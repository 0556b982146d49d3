// Rasters - Palette-indexed source images and their resolved RGBA form
//
// An IndexedRaster lives only between decoding and palette resolution.
// A RenderableFrame is immutable once built and is what renderers draw.

use super::palette::{PaletteResolver, Rgba};

/// Fallback colour for indices the palette does not define
pub const INVALID_INDEX_COLOR: Rgba = Rgba::TRANSPARENT;

/// A width×height grid of palette indices, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRaster {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl IndexedRaster {
    /// Create a raster from row-major indices
    ///
    /// # Panics
    /// Panics if `indices.len() != width * height`
    pub fn new(width: usize, height: usize, indices: Vec<u8>) -> Self {
        assert_eq!(
            indices.len(),
            width * height,
            "Raster buffer must hold exactly {}×{} indices",
            width,
            height
        );
        Self {
            width,
            height,
            indices,
        }
    }

    /// Raster width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette index at (x, y)
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.indices[y * self.width + x]
    }

    /// Raw row-major indices
    pub fn as_slice(&self) -> &[u8] {
        &self.indices
    }

    /// Resolve every index through `palette`
    ///
    /// Indices the palette does not define become [`INVALID_INDEX_COLOR`];
    /// malformed legacy data degrades to missing pixels instead of failing.
    pub fn resolve(&self, palette: &dyn PaletteResolver) -> RenderableFrame {
        let pixels = self
            .indices
            .iter()
            .map(|&index| palette.resolve(index).unwrap_or(INVALID_INDEX_COLOR))
            .collect();

        RenderableFrame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// A fully resolved RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableFrame {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl RenderableFrame {
    /// Create a frame from row-major colours
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "Frame buffer must hold exactly {}×{} pixels",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A frame filled with a single colour
    pub fn solid(width: usize, height: usize, color: Rgba) -> Self {
        Self::from_pixels(width, height, vec![color; width * height])
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour at (x, y)
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x]
    }

    /// Raw row-major colours
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks_exact(self.width.max(1))
    }
}
