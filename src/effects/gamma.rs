// Gamma correction - Per-channel brightness curve
//
// Each RGB channel is remapped as 255 * (c / 255)^(1 / gamma) through a
// 256-entry lookup table. Alpha is left untouched.

use super::{Effect, EffectError, GammaConfig};
use crate::display::Rgba;
use crate::render::Renderer;

/// Accepted gamma range
const GAMMA_RANGE: (f32, f32) = (0.1, 5.0);

/// Gamma correction
#[derive(Debug, Clone)]
pub struct GammaEffect {
    gamma: f32,
    table: [u8; 256],
}

impl GammaEffect {
    /// Create the effect; `gamma` is clamped to 0.1-5.0
    pub fn new(gamma: f32) -> Result<Self, EffectError> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(EffectError::InvalidParameter(format!(
                "gamma must be a positive number, got {}",
                gamma
            )));
        }

        let gamma = gamma.clamp(GAMMA_RANGE.0, GAMMA_RANGE.1);
        let exponent = 1.0 / gamma;
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let normalized = i as f32 / 255.0;
            *entry = (normalized.powf(exponent) * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Ok(Self { gamma, table })
    }

    /// Build from configuration
    pub fn from_config(config: &GammaConfig) -> Result<Self, EffectError> {
        Self::new(config.value)
    }

    /// Effective gamma after clamping
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Whether the curve leaves every value unchanged
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }

    /// Apply the curve to one colour
    #[inline]
    pub fn correct(&self, color: Rgba) -> Rgba {
        Rgba::new(
            self.table[color.r as usize],
            self.table[color.g as usize],
            self.table[color.b as usize],
            color.a,
        )
    }
}

impl Effect for GammaEffect {
    fn name(&self) -> &str {
        "gamma"
    }

    fn process(
        &self,
        renderer: &mut dyn Renderer,
        _width: usize,
        _height: usize,
    ) -> Result<(), EffectError> {
        if self.is_identity() {
            return Ok(());
        }

        renderer.map_pixels(&mut |color| self.correct(color));
        Ok(())
    }
}
