// Render target - An RGBA surface that drawing operations write into
//
// Coordinates are signed so sprites anchored partly off-screen (a cursor
// near the left edge, for instance) clip instead of wrapping.

use super::palette::Rgba;
use super::raster::RenderableFrame;

/// Integer screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The origin (0, 0)
    pub const ORIGIN: Position = Position::new(0, 0);

    /// Create a position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with a `width`×`height` surface anchored at the origin
    ///
    /// # Returns
    /// `(x0, y0, x1, y1)` as exclusive pixel bounds, or `None` if nothing is left
    fn clip(&self, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);

        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
        }
    }
}

/// RGBA drawing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl RenderTarget {
    /// Create a target cleared to opaque black
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width * height],
        }
    }

    /// Target width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Target height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour at (x, y)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x]
    }

    /// Overwrite the colour at (x, y)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x] = color;
    }

    /// Raw row-major colours
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Fill the whole target with `color`
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Blend `color` over every pixel inside `rect`
    ///
    /// The rectangle is clipped to the target.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x0, y0, x1, y1)) = rect.clip(self.width, self.height) else {
            return;
        };

        for y in y0..y1 {
            let row = &mut self.pixels[y * self.width..(y + 1) * self.width];
            for px in &mut row[x0..x1] {
                *px = color.blend_over(*px);
            }
        }
    }

    /// Draw `frame` with its top-left corner at `position`
    ///
    /// Fully transparent pixels are skipped; partially transparent ones blend.
    pub fn blit(&mut self, frame: &RenderableFrame, position: Position) {
        let dest = Rect::new(
            position.x,
            position.y,
            frame.width() as u32,
            frame.height() as u32,
        );
        let Some((x0, y0, x1, y1)) = dest.clip(self.width, self.height) else {
            return;
        };

        for y in y0..y1 {
            let src_y = (y as i64 - position.y as i64) as usize;
            for x in x0..x1 {
                let src_x = (x as i64 - position.x as i64) as usize;
                let src = frame.pixel(src_x, src_y);
                let dst = &mut self.pixels[y * self.width + x];
                *dst = src.blend_over(*dst);
            }
        }
    }

    /// Replace every pixel with `f(pixel)`
    pub fn map_pixels(&mut self, f: &mut dyn FnMut(Rgba) -> Rgba) {
        for px in &mut self.pixels {
            *px = f(*px);
        }
    }

    /// Write the target as RGBA bytes
    ///
    /// # Panics
    /// Panics if `output` is shorter than width × height × 4 bytes
    pub fn copy_to(&self, output: &mut [u8]) {
        assert!(
            output.len() >= self.pixels.len() * 4,
            "Output buffer too small for RGBA conversion"
        );

        for (dst, px) in output.chunks_exact_mut(4).zip(&self.pixels) {
            dst.copy_from_slice(&px.to_bytes());
        }
    }

    /// The target as packed RGB bytes (alpha dropped)
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            rgb.extend_from_slice(&[px.r, px.g, px.b]);
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_creation() {
        let target = RenderTarget::new(8, 4);
        assert_eq!(target.pixels().len(), 32);
        assert_eq!(target.pixel(7, 3), Rgba::BLACK);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut target = RenderTarget::new(4, 4);
        target.clear(Rgba::WHITE);
        target.fill_rect(Rect::new(-2, 2, 4, 10), Rgba::BLACK);

        assert_eq!(target.pixel(0, 2), Rgba::BLACK);
        assert_eq!(target.pixel(1, 3), Rgba::BLACK);
        assert_eq!(target.pixel(2, 2), Rgba::WHITE);
        assert_eq!(target.pixel(0, 1), Rgba::WHITE);
    }

    #[test]
    fn test_fill_rect_outside_is_noop() {
        let mut target = RenderTarget::new(4, 4);
        let before = target.clone();
        target.fill_rect(Rect::new(10, 10, 5, 5), Rgba::WHITE);
        target.fill_rect(Rect::new(0, 0, 0, 5), Rgba::WHITE);
        assert_eq!(target, before);
    }

    #[test]
    fn test_fill_rect_translucent() {
        let mut target = RenderTarget::new(2, 1);
        target.clear(Rgba::WHITE);
        target.fill_rect(Rect::new(0, 0, 1, 1), Rgba::new(0, 0, 0, 128));

        assert_eq!(target.pixel(0, 0).r, 127);
        assert_eq!(target.pixel(1, 0), Rgba::WHITE);
    }

    #[test]
    fn test_blit_skips_transparent_and_clips() {
        let mut target = RenderTarget::new(4, 4);
        let frame = RenderableFrame::from_pixels(
            2,
            2,
            vec![Rgba::WHITE, Rgba::TRANSPARENT, Rgba::WHITE, Rgba::WHITE],
        );

        target.blit(&frame, Position::new(0, 0));
        assert_eq!(target.pixel(0, 0), Rgba::WHITE);
        assert_eq!(target.pixel(1, 0), Rgba::BLACK);
        assert_eq!(target.pixel(1, 1), Rgba::WHITE);

        target.blit(&frame, Position::new(3, -1));
        assert_eq!(target.pixel(3, 0), Rgba::WHITE);

        target.blit(&frame, Position::new(-5, -5));
    }

    #[test]
    fn test_copy_to() {
        let mut target = RenderTarget::new(2, 1);
        target.set_pixel(1, 0, Rgba::new(1, 2, 3, 4));

        let mut out = vec![0u8; 8];
        target.copy_to(&mut out);
        assert_eq!(out, vec![0, 0, 0, 255, 1, 2, 3, 4]);
        assert_eq!(target.to_rgb_bytes(), vec![0, 0, 0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "Output buffer too small")]
    fn test_copy_to_short_buffer() {
        let target = RenderTarget::new(2, 2);
        let mut out = vec![0u8; 8];
        target.copy_to(&mut out);
    }
}
