// Render module - Drawing interface shared by the cursor and effects
//
// The active render target is one mutable resource owned by the renderer.
// Code that needs to draw somewhere else swaps it with set_active_target,
// which hands back the previous target so it can be restored. ScopedTarget
// wraps that pattern so the restore happens on every exit path.

pub mod recording;
pub mod software;

pub use recording::{RecordedCall, RecordingRenderer};
pub use software::SoftwareRenderer;

use crate::display::{Position, Rect, RenderableFrame, Rgba};
use std::ops::{Deref, DerefMut};

/// Handle to a render target owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl TargetId {
    /// The on-screen target every renderer starts with
    pub const SCREEN: TargetId = TargetId(0);
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == TargetId::SCREEN {
            write!(f, "screen")
        } else {
            write!(f, "target #{}", self.0)
        }
    }
}

/// Drawing backend
///
/// All drawing calls write into the currently active target.
pub trait Renderer {
    /// Draw `frame` with its top-left corner at `position`
    fn draw(&mut self, frame: &RenderableFrame, position: Position);

    /// Blend `color` over `rect`
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Replace every pixel of the active target with `f(pixel)`
    fn map_pixels(&mut self, f: &mut dyn FnMut(Rgba) -> Rgba);

    /// Make `target` active and return the previously active target
    fn set_active_target(&mut self, target: TargetId) -> TargetId;

    /// Currently active target
    fn active_target(&self) -> TargetId;

    /// Size of `target` as (width, height), or `None` if it does not exist
    fn target_size(&self, target: TargetId) -> Option<(usize, usize)>;
}

/// Keeps a target active for the lifetime of the guard
///
/// The previous target is restored when the guard is dropped, including
/// during unwinding.
pub struct ScopedTarget<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
    previous: TargetId,
}

impl<'a, R: Renderer + ?Sized> ScopedTarget<'a, R> {
    /// Activate `target` on `renderer`
    pub fn new(renderer: &'a mut R, target: TargetId) -> Self {
        let previous = renderer.set_active_target(target);
        Self { renderer, previous }
    }

    /// Target that will be restored on drop
    pub fn previous(&self) -> TargetId {
        self.previous
    }
}

impl<R: Renderer + ?Sized> Deref for ScopedTarget<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for ScopedTarget<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for ScopedTarget<'_, R> {
    fn drop(&mut self) {
        self.renderer.set_active_target(self.previous);
    }
}
