// Recording renderer - Captures draw calls instead of rasterising them
//
// Used by tests and headless tools to check what would have been drawn,
// and where, without comparing pixels.

use super::{Renderer, TargetId};
use crate::display::{Position, Rect, RenderableFrame, Rgba};

/// A single call made against a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `draw` on `target`
    Draw {
        target: TargetId,
        frame: RenderableFrame,
        position: Position,
    },
    /// `fill_rect` on `target`
    FillRect {
        target: TargetId,
        rect: Rect,
        color: Rgba,
    },
    /// `map_pixels` on `target`
    MapPixels { target: TargetId },
    /// `set_active_target` switching from `previous` to `target`
    SetActiveTarget {
        target: TargetId,
        previous: TargetId,
    },
}

/// Renderer that only records what it is asked to do
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    sizes: Vec<(usize, usize)>,
    active: TargetId,
    calls: Vec<RecordedCall>,
}

impl RecordingRenderer {
    /// Create a recorder whose screen target reports `width`×`height`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            sizes: vec![(width, height)],
            active: TargetId::SCREEN,
            calls: Vec::new(),
        }
    }

    /// Register an extra target of the given size
    pub fn create_target(&mut self, width: usize, height: usize) -> TargetId {
        self.sizes.push((width, height));
        TargetId(self.sizes.len() - 1)
    }

    /// Every call recorded so far, oldest first
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Only the draw calls, as (target, frame, position)
    pub fn draws(&self) -> Vec<(TargetId, &RenderableFrame, Position)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Draw {
                    target,
                    frame,
                    position,
                } => Some((*target, frame, *position)),
                _ => None,
            })
            .collect()
    }

    /// Only the rectangles filled, in call order
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Forget all recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &RenderableFrame, position: Position) {
        self.calls.push(RecordedCall::Draw {
            target: self.active,
            frame: frame.clone(),
            position,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(RecordedCall::FillRect {
            target: self.active,
            rect,
            color,
        });
    }

    fn map_pixels(&mut self, _f: &mut dyn FnMut(Rgba) -> Rgba) {
        self.calls.push(RecordedCall::MapPixels {
            target: self.active,
        });
    }

    fn set_active_target(&mut self, target: TargetId) -> TargetId {
        let previous = std::mem::replace(&mut self.active, target);
        self.calls
            .push(RecordedCall::SetActiveTarget { target, previous });
        previous
    }

    fn active_target(&self) -> TargetId {
        self.active
    }

    fn target_size(&self, target: TargetId) -> Option<(usize, usize)> {
        self.sizes.get(target.0).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut renderer = RecordingRenderer::new(10, 10);
        let offscreen = renderer.create_target(5, 5);
        let frame = RenderableFrame::solid(1, 1, Rgba::WHITE);

        renderer.draw(&frame, Position::new(1, 2));
        let previous = renderer.set_active_target(offscreen);
        renderer.fill_rect(Rect::new(0, 0, 5, 1), Rgba::BLACK);
        renderer.set_active_target(previous);

        assert_eq!(renderer.calls().len(), 4);
        assert_eq!(renderer.draws().len(), 1);
        assert_eq!(renderer.draws()[0].0, TargetId::SCREEN);
        assert_eq!(renderer.draws()[0].2, Position::new(1, 2));
        assert_eq!(renderer.filled_rects(), vec![Rect::new(0, 0, 5, 1)]);
        assert_eq!(renderer.active_target(), TargetId::SCREEN);
        assert_eq!(renderer.target_size(offscreen), Some((5, 5)));
    }
}
