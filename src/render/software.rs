// Software renderer - Draws into CPU-side RGBA targets
//
// Target 0 is the screen and exists for the renderer's whole lifetime.
// Further targets are created on demand for offscreen composition.

use super::{Renderer, TargetId};
use crate::display::{Position, Rect, RenderTarget, RenderableFrame, Rgba};

/// Renderer that owns a set of in-memory render targets
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    targets: Vec<RenderTarget>,
    active: TargetId,
}

impl SoftwareRenderer {
    /// Create a renderer whose screen target is `width`×`height`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            targets: vec![RenderTarget::new(width, height)],
            active: TargetId::SCREEN,
        }
    }

    /// Allocate a new offscreen target
    pub fn create_target(&mut self, width: usize, height: usize) -> TargetId {
        self.targets.push(RenderTarget::new(width, height));
        TargetId(self.targets.len() - 1)
    }

    /// Borrow a target
    pub fn target(&self, id: TargetId) -> Option<&RenderTarget> {
        self.targets.get(id.0)
    }

    /// Mutably borrow a target
    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut RenderTarget> {
        self.targets.get_mut(id.0)
    }

    /// The screen target
    pub fn screen(&self) -> &RenderTarget {
        &self.targets[TargetId::SCREEN.0]
    }

    fn active_mut(&mut self) -> &mut RenderTarget {
        &mut self.targets[self.active.0]
    }
}

impl Renderer for SoftwareRenderer {
    fn draw(&mut self, frame: &RenderableFrame, position: Position) {
        self.active_mut().blit(frame, position);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.active_mut().fill_rect(rect, color);
    }

    fn map_pixels(&mut self, f: &mut dyn FnMut(Rgba) -> Rgba) {
        self.active_mut().map_pixels(f);
    }

    /// # Panics
    /// Panics if `target` was not created by this renderer
    fn set_active_target(&mut self, target: TargetId) -> TargetId {
        assert!(
            target.0 < self.targets.len(),
            "Unknown render target {}",
            target
        );
        std::mem::replace(&mut self.active, target)
    }

    fn active_target(&self) -> TargetId {
        self.active
    }

    fn target_size(&self, target: TargetId) -> Option<(usize, usize)> {
        self.targets.get(target.0).map(|t| (t.width(), t.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_is_active_by_default() {
        let renderer = SoftwareRenderer::new(320, 200);
        assert_eq!(renderer.active_target(), TargetId::SCREEN);
        assert_eq!(renderer.target_size(TargetId::SCREEN), Some((320, 200)));
        assert_eq!(renderer.target_size(TargetId(1)), None);
    }

    #[test]
    fn test_draw_goes_to_active_target() {
        let mut renderer = SoftwareRenderer::new(4, 4);
        let offscreen = renderer.create_target(4, 4);
        let frame = RenderableFrame::solid(1, 1, Rgba::WHITE);

        let previous = renderer.set_active_target(offscreen);
        assert_eq!(previous, TargetId::SCREEN);
        renderer.draw(&frame, Position::new(2, 2));
        renderer.set_active_target(previous);

        assert_eq!(renderer.target(offscreen).unwrap().pixel(2, 2), Rgba::WHITE);
        assert_eq!(renderer.screen().pixel(2, 2), Rgba::BLACK);
    }

    #[test]
    fn test_map_pixels() {
        let mut renderer = SoftwareRenderer::new(2, 2);
        renderer.map_pixels(&mut |_| Rgba::WHITE);
        assert!(renderer.screen().pixels().iter().all(|&p| p == Rgba::WHITE));
    }

    #[test]
    #[should_panic(expected = "Unknown render target")]
    fn test_unknown_target_panics() {
        let mut renderer = SoftwareRenderer::new(2, 2);
        renderer.set_active_target(TargetId(7));
    }
}
