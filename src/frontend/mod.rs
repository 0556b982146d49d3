// Frontend - Composes each presented frame
//
// Per frame: the scene is drawn into an offscreen scene target, the cursor
// is drawn on top, then the effect pipeline runs once over the result so
// the cursor is post-processed along with everything else. The finished
// scene target is what gets presented.

pub mod config;
pub mod screenshot;

pub use config::{AssetConfig, FrontendConfig, VideoConfig, CONFIG_FILE};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::archive::{open_archive, Archive, ArchiveError};
use crate::cursor::{Cursor, CursorError, CursorMode};
use crate::display::{Palette, Rect, RenderTarget, Rgba};
use crate::effects::{EffectError, EffectPipeline};
use crate::input::InputEvent;
use crate::render::{Renderer, ScopedTarget, SoftwareRenderer, TargetId};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors raised while starting the frontend
#[derive(Debug)]
pub enum FrontendError {
    /// The asset archive could not be opened
    Archive(ArchiveError),

    /// The cursor could not be created
    Cursor(CursorError),

    /// The effect pipeline could not be built
    Effect(EffectError),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Archive(e) => write!(f, "Asset archive error: {}", e),
            FrontendError::Cursor(e) => write!(f, "Cursor initialization failed: {}", e),
            FrontendError::Effect(e) => write!(f, "Effect pipeline error: {}", e),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Archive(e) => Some(e),
            FrontendError::Cursor(e) => Some(e),
            FrontendError::Effect(e) => Some(e),
        }
    }
}

impl From<ArchiveError> for FrontendError {
    fn from(e: ArchiveError) -> Self {
        FrontendError::Archive(e)
    }
}

impl From<CursorError> for FrontendError {
    fn from(e: CursorError) -> Self {
        FrontendError::Cursor(e)
    }
}

impl From<EffectError> for FrontendError {
    fn from(e: EffectError) -> Self {
        FrontendError::Effect(e)
    }
}

/// Frame composer owning the renderer, cursor and effects
#[derive(Debug)]
pub struct Frontend {
    renderer: SoftwareRenderer,
    scene: TargetId,
    cursor: Cursor,
    pipeline: EffectPipeline,
    effects_enabled: bool,
}

impl Frontend {
    /// Create a frontend with a `width`×`height` scene
    pub fn new(width: usize, height: usize, cursor: Cursor, pipeline: EffectPipeline) -> Self {
        let mut renderer = SoftwareRenderer::new(width, height);
        let scene = renderer.create_target(width, height);

        Self {
            renderer,
            scene,
            cursor,
            pipeline,
            effects_enabled: true,
        }
    }

    /// Open the configured archive and build everything from it
    pub fn from_config(config: &FrontendConfig) -> Result<Self, FrontendError> {
        let archive = open_archive(&config.assets.archive)?;
        Self::from_archive(config, archive.as_ref())
    }

    /// Build from an already opened archive
    ///
    /// A missing palette falls back to a greyscale ramp; a missing cursor
    /// sheet is fatal.
    pub fn from_archive(
        config: &FrontendConfig,
        archive: &dyn Archive,
    ) -> Result<Self, FrontendError> {
        let palette = Palette::load(archive, &config.assets.palette, config.assets.palette_index)
            .unwrap_or_else(|e| {
                log::warn!(
                    "Palette {} unavailable ({}), using greyscale",
                    config.assets.palette,
                    e
                );
                Palette::greyscale()
            });

        let cursor = Cursor::load(
            archive,
            &config.assets.cursor,
            &palette,
            config.assets.strict_cursor_modes,
        )?;
        let pipeline = EffectPipeline::from_config(&config.effects)?;

        Ok(Self::new(
            config.video.width as usize,
            config.video.height as usize,
            cursor,
            pipeline,
        ))
    }

    /// Forward an input event to the cursor
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.cursor.handle_event(event);
    }

    /// Compose one frame into the scene target
    ///
    /// `draw_scene` draws the game scene with the scene target active. The
    /// cursor is drawn next, then the effect pipeline is applied once. The
    /// renderer's active target is unchanged afterwards.
    pub fn compose_frame<F>(&mut self, draw_scene: F) -> Result<(), EffectError>
    where
        F: FnOnce(&mut dyn Renderer),
    {
        if let Some(scene) = self.renderer.target_mut(self.scene) {
            scene.clear(Rgba::BLACK);
        }

        {
            let mut scope = ScopedTarget::new(&mut self.renderer, self.scene);
            draw_scene(&mut *scope);
            self.cursor.render(&mut *scope);
        }

        if self.effects_enabled {
            self.pipeline.apply(&mut self.renderer, self.scene)?;
        }
        Ok(())
    }

    /// Copy the composed scene into an RGBA output buffer
    pub fn present(&self, output: &mut [u8]) {
        self.scene().copy_to(output);
    }

    /// The composed scene
    pub fn scene(&self) -> &RenderTarget {
        // The scene target is created in `new` and never removed
        match self.renderer.target(self.scene) {
            Some(target) => target,
            None => unreachable!("scene target missing"),
        }
    }

    /// Scene width and height
    pub fn size(&self) -> (usize, usize) {
        (self.scene().width(), self.scene().height())
    }

    /// The cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Mutable cursor access for game logic
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The effect pipeline
    pub fn pipeline(&self) -> &EffectPipeline {
        &self.pipeline
    }

    /// The renderer
    pub fn renderer(&self) -> &SoftwareRenderer {
        &self.renderer
    }

    /// Whether post-processing runs
    pub fn effects_enabled(&self) -> bool {
        self.effects_enabled
    }

    /// Flip post-processing on or off
    ///
    /// # Returns
    /// The new state
    pub fn toggle_effects(&mut self) -> bool {
        self.effects_enabled = !self.effects_enabled;
        log::info!(
            "Effects {}",
            if self.effects_enabled { "enabled" } else { "disabled" }
        );
        self.effects_enabled
    }

    /// Advance the cursor to the next mode that has a frame
    pub fn cycle_cursor_mode(&mut self) -> CursorMode {
        let mode = self.cursor.next_available_mode();
        self.cursor.set_mode(mode);
        log::info!("Cursor mode: {}", mode);
        mode
    }

    /// Save the composed scene as a PNG in `directory`
    pub fn save_screenshot(&self, directory: &Path) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(self.scene(), directory)
    }
}

/// Draw a backdrop of colour bars, used when no game scene is attached
pub fn draw_test_pattern(renderer: &mut dyn Renderer, width: usize, height: usize) {
    const BARS: [u32; 8] = [
        0xC0C0C0, 0xC0C000, 0x00C0C0, 0x00C000, 0xC000C0, 0xC00000, 0x0000C0, 0x202020,
    ];

    let bar_width = (width / BARS.len()).max(1);
    for (i, &rgb) in BARS.iter().enumerate() {
        renderer.fill_rect(
            Rect::new((i * bar_width) as i32, 0, bar_width as u32, height as u32),
            Rgba::from_rgb(rgb),
        );
    }
}
