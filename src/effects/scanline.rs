// Scanline overlay - Darkens evenly spaced horizontal bands
//
// Bands start at y = non_scan_height and repeat every
// non_scan_height + scan_height rows while the band start is still inside
// the target. Each band spans the full width in translucent black.

use super::{Effect, EffectError, ScanlineConfig};
use crate::display::{Rect, Rgba};
use crate::render::Renderer;

/// CRT-style scanline overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanlineEffect {
    non_scan_height: u32,
    scan_height: u32,
    alpha: u8,
}

impl ScanlineEffect {
    /// Create the overlay
    ///
    /// # Arguments
    /// * `non_scan_height` - Untouched rows before each band
    /// * `scan_height` - Rows per band (at least 1)
    /// * `alpha` - Band opacity
    pub fn new(non_scan_height: u32, scan_height: u32, alpha: u8) -> Result<Self, EffectError> {
        if scan_height == 0 {
            return Err(EffectError::InvalidParameter(
                "scanline height must be at least 1".to_string(),
            ));
        }
        if non_scan_height.checked_add(scan_height).is_none() {
            return Err(EffectError::InvalidParameter(format!(
                "scanline period {} + {} overflows",
                non_scan_height, scan_height
            )));
        }

        Ok(Self {
            non_scan_height,
            scan_height,
            alpha,
        })
    }

    /// Build from configuration
    pub fn from_config(config: &ScanlineConfig) -> Result<Self, EffectError> {
        Self::new(config.non_scan_height, config.scan_height, config.alpha)
    }

    /// Rows between the starts of consecutive bands
    pub fn period(&self) -> u32 {
        self.non_scan_height + self.scan_height
    }

    /// Colour painted over each band
    pub fn band_color(&self) -> Rgba {
        Rgba::new(0, 0, 0, self.alpha)
    }

    /// First row of every band drawn on a target `height` rows tall
    pub fn band_rows(&self, height: usize) -> Vec<u32> {
        (self.non_scan_height as u64..height as u64)
            .step_by(self.period() as usize)
            .map(|y| y as u32)
            .collect()
    }
}

impl Effect for ScanlineEffect {
    fn name(&self) -> &str {
        "scanlines"
    }

    fn process(
        &self,
        renderer: &mut dyn Renderer,
        width: usize,
        height: usize,
    ) -> Result<(), EffectError> {
        if self.alpha == 0 {
            return Ok(());
        }

        let color = self.band_color();
        for y in self.band_rows(height) {
            renderer.fill_rect(
                Rect::new(0, y as i32, width as u32, self.scan_height),
                color,
            );
        }
        Ok(())
    }
}
