// Display module - Turns legacy indexed assets into pixels on screen
//
// This module provides:
// - Palettes (legacy VGA palette files, index → RGBA)
// - Indexed rasters and their resolved RGBA frames
// - The fixed-record frame decoder for sprite sheets
// - RGBA render targets with clipping blits and fills
// - The window that presents composed frames using winit + pixels

pub mod decoder;
pub mod palette;
pub mod raster;
pub mod target;
pub mod window;

pub use decoder::{decode_archive_frames, decode_frames, FrameLayout, CURSOR_LAYOUT};
pub use palette::{Palette, PaletteResolver, Rgba, PALETTE_SIZE};
pub use raster::{IndexedRaster, RenderableFrame, INVALID_INDEX_COLOR};
pub use target::{Position, Rect, RenderTarget};
pub use window::{run_frontend, FrontendWindow, WindowConfig};
