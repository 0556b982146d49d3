// Cursor module - Mode-driven animated cursor
//
// The cursor owns the resolved frames of the cursor sprite sheet, follows
// pointer-move events, and draws the frame for its current mode at the
// pointer position each render tick. Mode changes come only from game
// logic through set_mode; position and mode change independently.
//
// The mode → frame table is built once when the cursor is created. Modes
// whose frame is missing from the sheet are reported then, and selecting
// one later is a fatal contract violation.

pub mod mode;

pub use mode::CursorMode;

use crate::archive::{Archive, ArchiveError};
use crate::display::{
    decode_archive_frames, PaletteResolver, Position, RenderableFrame, CURSOR_LAYOUT,
};
use crate::input::InputEvent;
use crate::render::Renderer;
use std::fmt;

/// Errors that prevent a cursor from being created
#[derive(Debug)]
pub enum CursorError {
    /// The cursor sheet does not exist in the archive
    ResourceNotFound(String),

    /// The cursor sheet exists but could not be read
    Archive { path: String, source: ArchiveError },

    /// The cursor sheet holds no complete frame
    NoFrames(String),

    /// Strict loading found modes without a frame
    MissingModes(Vec<CursorMode>),
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::ResourceNotFound(path) => {
                write!(f, "Cursor sprite sheet not found: {}", path)
            }
            CursorError::Archive { path, source } => {
                write!(f, "Failed to read cursor sprite sheet {}: {}", path, source)
            }
            CursorError::NoFrames(path) => {
                write!(f, "Cursor sprite sheet {} contains no frames", path)
            }
            CursorError::MissingModes(modes) => {
                let names: Vec<_> = modes.iter().map(|m| m.name()).collect();
                write!(f, "Cursor sprite sheet has no frame for: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for CursorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CursorError::Archive { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Mutable cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    /// Top-left anchor of the cursor frame
    pub position: Position,

    /// Current mode
    pub mode: CursorMode,
}

/// Animated mouse cursor
#[derive(Debug, Clone)]
pub struct Cursor {
    frames: Vec<RenderableFrame>,
    frame_table: [Option<usize>; CursorMode::COUNT],
    state: CursorState,
}

impl Cursor {
    /// Decode and resolve the cursor sheet at `path`
    ///
    /// # Arguments
    /// * `archive` - Asset archive
    /// * `path` - Logical path of the cursor sheet
    /// * `palette` - Palette used to resolve every frame
    /// * `strict` - Fail if any mode has no frame
    ///
    /// # Returns
    /// The cursor in `Normal` mode at the origin
    pub fn load(
        archive: &dyn Archive,
        path: &str,
        palette: &dyn PaletteResolver,
        strict: bool,
    ) -> Result<Self, CursorError> {
        let rasters =
            decode_archive_frames(archive, path, CURSOR_LAYOUT).map_err(|e| match e {
                ArchiveError::NotFound(_) => CursorError::ResourceNotFound(path.to_string()),
                source => CursorError::Archive {
                    path: path.to_string(),
                    source,
                },
            })?;

        let frames = rasters.iter().map(|raster| raster.resolve(palette)).collect();
        let cursor = Self::build(frames, strict, path)?;

        log::info!(
            "Loaded cursor from {} ({} frames, {} of {} modes available)",
            path,
            cursor.frame_count(),
            CursorMode::COUNT - cursor.missing_modes().len(),
            CursorMode::COUNT
        );
        Ok(cursor)
    }

    /// Create a cursor from already resolved frames
    pub fn from_frames(frames: Vec<RenderableFrame>, strict: bool) -> Result<Self, CursorError> {
        Self::build(frames, strict, "<frames>")
    }

    fn build(
        frames: Vec<RenderableFrame>,
        strict: bool,
        source: &str,
    ) -> Result<Self, CursorError> {
        if frames.is_empty() {
            return Err(CursorError::NoFrames(source.to_string()));
        }

        let mut frame_table = [None; CursorMode::COUNT];
        for mode in CursorMode::ALL {
            let index = mode.frame_index();
            if index < frames.len() {
                frame_table[index] = Some(index);
            }
        }

        let cursor = Self {
            frames,
            frame_table,
            state: CursorState::default(),
        };

        let missing = cursor.missing_modes();
        if !missing.is_empty() {
            if strict {
                return Err(CursorError::MissingModes(missing));
            }
            log::warn!(
                "Cursor sheet {} has {} frames; modes without a frame: {:?}",
                source,
                cursor.frames.len(),
                missing
            );
        }

        Ok(cursor)
    }

    /// Apply an input event
    ///
    /// Pointer moves update the position; every other event is ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::PointerMoved { x, y } = *event {
            self.state.position = Position::new(x, y);
        }
    }

    /// Switch to `mode`
    ///
    /// # Panics
    /// Panics if the sprite sheet has no frame for `mode`. That means the
    /// asset and the mode list disagree, which cannot be recovered from.
    pub fn set_mode(&mut self, mode: CursorMode) {
        assert!(
            self.is_mode_available(mode),
            "Cursor mode '{}' needs frame {} but the sheet holds only {} frames",
            mode,
            mode.frame_index(),
            self.frames.len()
        );

        if self.state.mode != mode {
            log::debug!("Cursor mode {} -> {}", self.state.mode, mode);
        }
        self.state.mode = mode;
    }

    /// Draw the current mode's frame at the current position
    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(frame) = self.frame(self.state.mode) {
            renderer.draw(frame, self.state.position);
        }
    }

    /// Current pointer position
    pub fn position(&self) -> Position {
        self.state.position
    }

    /// Current mode
    pub fn mode(&self) -> CursorMode {
        self.state.mode
    }

    /// Current state (position and mode)
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of frames in the sprite sheet
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether `mode` has a frame
    pub fn is_mode_available(&self, mode: CursorMode) -> bool {
        self.frame_table[mode.frame_index()].is_some()
    }

    /// Modes without a frame, in declaration order
    pub fn missing_modes(&self) -> Vec<CursorMode> {
        CursorMode::ALL
            .into_iter()
            .filter(|&mode| !self.is_mode_available(mode))
            .collect()
    }

    /// Frame used for `mode`, if the sheet has one
    pub fn frame(&self, mode: CursorMode) -> Option<&RenderableFrame> {
        self.frame_table[mode.frame_index()].map(|index| &self.frames[index])
    }

    /// The next mode after the current one that has a frame
    pub fn next_available_mode(&self) -> CursorMode {
        let mut mode = self.state.mode.next();
        while !self.is_mode_available(mode) {
            mode = mode.next();
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::display::{Palette, Rgba};
    use crate::input::PointerButton;
    use crate::render::{RecordingRenderer, TargetId};

    const CURSOR_PATH: &str = "UFOGRAPH/CURSOR.DAT";

    fn frames(count: usize) -> Vec<RenderableFrame> {
        (0..count)
            .map(|i| RenderableFrame::solid(24, 24, Rgba::new(i as u8, 0, 0, 0xFF)))
            .collect()
    }

    fn sheet(count: usize) -> Vec<u8> {
        (0..count * 576).map(|i| (i / 576 % 2) as u8).collect()
    }

    #[test]
    fn test_initial_state() {
        let cursor = Cursor::from_frames(frames(9), true).unwrap();
        assert_eq!(cursor.mode(), CursorMode::Normal);
        assert_eq!(cursor.position(), Position::ORIGIN);
        assert!(cursor.missing_modes().is_empty());
    }

    #[test]
    fn test_no_frames_is_an_error() {
        assert!(matches!(
            Cursor::from_frames(Vec::new(), false),
            Err(CursorError::NoFrames(_))
        ));
    }

    #[test]
    fn test_every_mode_maps_to_its_frame() {
        let mut cursor = Cursor::from_frames(frames(9), true).unwrap();

        for mode in CursorMode::ALL {
            cursor.set_mode(mode);
            assert_eq!(cursor.mode(), mode);
            assert_eq!(cursor.frame(mode).unwrap().pixel(0, 0).r, mode.frame_index() as u8);
        }
    }

    #[test]
    fn test_short_sheet_reports_missing_modes() {
        let cursor = Cursor::from_frames(frames(3), false).unwrap();
        assert_eq!(cursor.missing_modes().len(), 6);
        assert!(cursor.is_mode_available(CursorMode::PsiTarget));
        assert!(!cursor.is_mode_available(CursorMode::NoTarget));
    }

    #[test]
    fn test_strict_rejects_short_sheet() {
        match Cursor::from_frames(frames(8), true) {
            Err(CursorError::MissingModes(modes)) => {
                assert_eq!(modes, vec![CursorMode::NoTeleport])
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.frame_count())),
        }
    }

    #[test]
    #[should_panic(expected = "needs frame 5")]
    fn test_set_mode_without_frame_panics() {
        let mut cursor = Cursor::from_frames(frames(3), false).unwrap();
        cursor.set_mode(CursorMode::Shoot);
    }

    #[test]
    fn test_pointer_move_updates_position() {
        let mut cursor = Cursor::from_frames(frames(1), false).unwrap();
        cursor.handle_event(&InputEvent::pointer_moved(50, 60));
        assert_eq!(cursor.position(), Position::new(50, 60));
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut cursor = Cursor::from_frames(frames(1), false).unwrap();
        cursor.handle_event(&InputEvent::pointer_moved(5, 6));

        cursor.handle_event(&InputEvent::FocusLost);
        cursor.handle_event(&InputEvent::PointerButton {
            button: PointerButton::Left,
            pressed: true,
        });
        assert_eq!(cursor.position(), Position::new(5, 6));
        assert_eq!(cursor.mode(), CursorMode::Normal);
    }

    #[test]
    fn test_render_draws_current_frame_at_position() {
        let mut cursor = Cursor::from_frames(frames(9), false).unwrap();
        let mut renderer = RecordingRenderer::new(320, 200);

        cursor.render(&mut renderer);
        cursor.set_mode(CursorMode::Shoot);
        cursor.handle_event(&InputEvent::pointer_moved(10, 20));
        cursor.render(&mut renderer);

        let draws = renderer.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0, TargetId::SCREEN);
        assert_eq!(draws[0].1, cursor.frame(CursorMode::Normal).unwrap());
        assert_eq!(draws[0].2, Position::ORIGIN);
        assert_eq!(draws[1].1, cursor.frame(CursorMode::Shoot).unwrap());
        assert_eq!(draws[1].2, Position::new(10, 20));
    }

    #[test]
    fn test_next_available_mode_skips_missing() {
        let mut cursor = Cursor::from_frames(frames(2), false).unwrap();
        assert_eq!(cursor.next_available_mode(), CursorMode::ThrowTarget);

        cursor.set_mode(CursorMode::ThrowTarget);
        assert_eq!(cursor.next_available_mode(), CursorMode::Normal);
    }

    #[test]
    fn test_load_from_archive() {
        let archive = MemoryArchive::new().with_entry(CURSOR_PATH, sheet(9));
        let palette = Palette::new(vec![Rgba::BLACK, Rgba::WHITE]);

        let cursor = Cursor::load(&archive, CURSOR_PATH, &palette, true).unwrap();
        assert_eq!(cursor.frame_count(), 9);
        assert_eq!(cursor.frame(CursorMode::Normal).unwrap().pixel(0, 0), Rgba::BLACK);
        assert_eq!(cursor.frame(CursorMode::ThrowTarget).unwrap().pixel(0, 0), Rgba::WHITE);
    }

    #[test]
    fn test_load_errors_name_the_path() {
        let palette = Palette::greyscale();

        let missing = Cursor::load(&MemoryArchive::new(), CURSOR_PATH, &palette, false).unwrap_err();
        assert!(matches!(missing, CursorError::ResourceNotFound(_)));
        assert!(missing.to_string().contains(CURSOR_PATH));

        // Shorter than one record
        let archive = MemoryArchive::new().with_entry(CURSOR_PATH, vec![0; 100]);
        let empty = Cursor::load(&archive, CURSOR_PATH, &palette, false).unwrap_err();
        assert!(matches!(empty, CursorError::NoFrames(_)));
        assert!(empty.to_string().contains(CURSOR_PATH));
    }
}
