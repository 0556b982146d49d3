// UFO Frontend Library
// Asset decoding, cursor and post-processing for a tactical game frontend

// Public modules
pub mod archive;
pub mod cursor;
pub mod display;
pub mod effects;
pub mod frontend;
pub mod input;
pub mod render;

// Re-export main types for convenience
pub use archive::{open_archive, Archive, ArchiveError, ArchiveStream};
pub use cursor::{Cursor, CursorError, CursorMode};
pub use display::{
    decode_frames, FrameLayout, IndexedRaster, Palette, PaletteResolver, Position, Rect,
    RenderTarget, RenderableFrame, Rgba, WindowConfig,
};
pub use effects::{Effect, EffectError, EffectPipeline, GammaEffect, ScanlineEffect};
pub use frontend::{Frontend, FrontendConfig, FrontendError};
pub use input::{InputEvent, PointerButton};
pub use render::{Renderer, ScopedTarget, SoftwareRenderer, TargetId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that all components can be instantiated
        let _palette = Palette::greyscale();
        let _renderer = SoftwareRenderer::new(4, 4);
        let _pipeline = EffectPipeline::new();
        let _config = FrontendConfig::default();
        let _archive = archive::MemoryArchive::new();
        let _frame = RenderableFrame::solid(1, 1, Rgba::WHITE);
    }
}
