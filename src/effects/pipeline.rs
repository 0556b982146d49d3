// Effect pipeline - Ordered list of post-processing effects
//
// Effects run in registration order against the same target; each one sees
// the previous one's output. The pipeline keeps no per-effect state.

use super::{Effect, EffectError, EffectsConfig, GammaEffect, ScanlineEffect};
use crate::render::{Renderer, TargetId};
use std::fmt;

/// Ordered post-processing effects
#[derive(Default)]
pub struct EffectPipeline {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configured effects
    ///
    /// Gamma runs before scanlines so the bands keep their configured
    /// darkness regardless of the curve.
    pub fn from_config(config: &EffectsConfig) -> Result<Self, EffectError> {
        let mut pipeline = Self::new();

        if config.gamma.enabled {
            pipeline.push(GammaEffect::from_config(&config.gamma)?);
        }
        if config.scanlines.enabled {
            pipeline.push(ScanlineEffect::from_config(&config.scanlines)?);
        }

        log::info!("Effect pipeline: [{}]", pipeline.names().join(", "));
        Ok(pipeline)
    }

    /// Append an effect
    pub fn push<E: Effect + 'static>(&mut self, effect: E) {
        self.effects.push(Box::new(effect));
    }

    /// Builder-style variant of [`EffectPipeline::push`]
    pub fn with<E: Effect + 'static>(mut self, effect: E) -> Self {
        self.push(effect);
        self
    }

    /// Number of effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the pipeline has no effects
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names in application order
    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Apply every effect to `target`, in order
    ///
    /// Stops at the first failing effect. The active target is the same
    /// after this call as before it, whatever happens.
    pub fn apply(&self, renderer: &mut dyn Renderer, target: TargetId) -> Result<(), EffectError> {
        for effect in &self.effects {
            effect.apply(renderer, target).map_err(|e| {
                log::error!("Effect '{}' failed on {}: {}", effect.name(), target, e);
                e
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EffectPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectPipeline")
            .field("effects", &self.names())
            .finish()
    }
}
