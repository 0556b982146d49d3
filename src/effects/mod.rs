// Effects module - Post-processing applied to a fully rendered frame
//
// An effect draws into whichever target it is given. Effect::apply makes
// that target active for the duration of the transform and restores the
// previously active target afterwards, on success, error or panic alike,
// so effects compose in any order without leaking render-target state.
//
// Effects darken or remap pixels in place, so applying one twice to the
// same target compounds. The frontend applies the pipeline exactly once per
// presented frame.

pub mod gamma;
pub mod pipeline;
pub mod scanline;

pub use gamma::GammaEffect;
pub use pipeline::EffectPipeline;
pub use scanline::ScanlineEffect;

use crate::render::{Renderer, ScopedTarget, TargetId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised by effects
#[derive(Debug, Clone, PartialEq)]
pub enum EffectError {
    /// The renderer has no such target
    TargetMissing(TargetId),

    /// A configuration value is outside the accepted range
    InvalidParameter(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::TargetMissing(target) => write!(f, "Render target missing: {}", target),
            EffectError::InvalidParameter(msg) => write!(f, "Invalid effect parameter: {}", msg),
        }
    }
}

impl std::error::Error for EffectError {}

/// A post-processing step
pub trait Effect {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Transform the active target, which is `width`×`height`
    fn process(
        &self,
        renderer: &mut dyn Renderer,
        width: usize,
        height: usize,
    ) -> Result<(), EffectError>;

    /// Run the effect against `target`
    ///
    /// The active target is switched to `target` for the transform and
    /// restored before returning.
    fn apply(&self, renderer: &mut dyn Renderer, target: TargetId) -> Result<(), EffectError> {
        let (width, height) = renderer
            .target_size(target)
            .ok_or(EffectError::TargetMissing(target))?;

        let mut scope = ScopedTarget::new(renderer, target);
        self.process(&mut *scope, width, height)
    }
}

/// Scanline overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanlineConfig {
    /// Enable the overlay
    pub enabled: bool,

    /// Rows left untouched before each band
    pub non_scan_height: u32,

    /// Rows per darkened band
    pub scan_height: u32,

    /// Opacity of the black bands (0-255)
    pub alpha: u8,
}

impl Default for ScanlineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            non_scan_height: 2,
            scan_height: 1,
            alpha: 64,
        }
    }
}

/// Gamma correction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaConfig {
    /// Enable gamma correction
    pub enabled: bool,

    /// 1.0 = no change. Applied as exponent 1/gamma.
    pub value: f32,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            value: 1.0,
        }
    }
}

/// Post-processing settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub scanlines: ScanlineConfig,
    pub gamma: GammaConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rgba;
    use crate::render::{RecordedCall, RecordingRenderer, SoftwareRenderer};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    struct Failing;

    impl Effect for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn process(&self, _: &mut dyn Renderer, _: usize, _: usize) -> Result<(), EffectError> {
            Err(EffectError::InvalidParameter("always fails".to_string()))
        }
    }

    struct Panicking;

    impl Effect for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn process(&self, _: &mut dyn Renderer, _: usize, _: usize) -> Result<(), EffectError> {
            panic!("effect blew up");
        }
    }

    struct Whiteout;

    impl Effect for Whiteout {
        fn name(&self) -> &str {
            "whiteout"
        }

        fn process(
            &self,
            renderer: &mut dyn Renderer,
            _: usize,
            _: usize,
        ) -> Result<(), EffectError> {
            renderer.map_pixels(&mut |_| Rgba::WHITE);
            Ok(())
        }
    }

    #[test]
    fn test_apply_draws_into_target_and_restores() {
        let mut renderer = SoftwareRenderer::new(4, 4);
        let scene = renderer.create_target(4, 4);

        Whiteout.apply(&mut renderer, scene).unwrap();

        assert_eq!(renderer.active_target(), TargetId::SCREEN);
        assert_eq!(renderer.target(scene).unwrap().pixel(3, 3), Rgba::WHITE);
        assert_eq!(renderer.screen().pixel(3, 3), Rgba::BLACK);
    }

    #[test]
    fn test_apply_restores_after_error() {
        let mut renderer = RecordingRenderer::new(4, 4);
        let scene = renderer.create_target(4, 4);

        assert!(Failing.apply(&mut renderer, scene).is_err());
        assert_eq!(renderer.active_target(), TargetId::SCREEN);
        assert_eq!(
            renderer.calls().last(),
            Some(&RecordedCall::SetActiveTarget {
                target: TargetId::SCREEN,
                previous: scene
            })
        );
    }

    #[test]
    fn test_apply_restores_after_panic() {
        let mut renderer = RecordingRenderer::new(4, 4);
        let scene = renderer.create_target(4, 4);

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = Panicking.apply(&mut renderer, scene);
        }));

        assert!(result.is_err());
        assert_eq!(renderer.active_target(), TargetId::SCREEN);
    }

    #[test]
    fn test_apply_to_missing_target() {
        let mut renderer = RecordingRenderer::new(4, 4);
        assert_eq!(
            Whiteout.apply(&mut renderer, TargetId(5)),
            Err(EffectError::TargetMissing(TargetId(5)))
        );
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let config = EffectsConfig::default();
        assert!(config.scanlines.enabled);
        assert_eq!(config.scanlines.non_scan_height, 2);
        assert!(!config.gamma.enabled);
        assert_eq!(config.gamma.value, 1.0);
    }
}
