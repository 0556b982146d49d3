// Cursor modes
//
// Each mode is drawn with one frame of the cursor sprite sheet. The sheet
// stores frames in the same order the modes are declared here.

use serde::{Deserialize, Serialize};

/// Interaction state shown by the cursor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum CursorMode {
    /// Plain pointer
    #[default]
    Normal,
    /// Choosing where to throw an item
    ThrowTarget,
    /// Choosing a psionic target
    PsiTarget,
    /// Action selected but nothing valid under the pointer
    NoTarget,
    /// Adding to a selection
    Add,
    /// Aiming a shot
    Shoot,
    /// Taking control of a unit
    Control,
    /// Valid teleport destination
    Teleport,
    /// Invalid teleport destination
    NoTeleport,
}

impl CursorMode {
    /// Number of modes
    pub const COUNT: usize = 9;

    /// Every mode, in sprite sheet order
    pub const ALL: [CursorMode; Self::COUNT] = [
        CursorMode::Normal,
        CursorMode::ThrowTarget,
        CursorMode::PsiTarget,
        CursorMode::NoTarget,
        CursorMode::Add,
        CursorMode::Shoot,
        CursorMode::Control,
        CursorMode::Teleport,
        CursorMode::NoTeleport,
    ];

    /// Index of this mode's frame in the sprite sheet
    #[inline]
    pub fn frame_index(self) -> usize {
        self as usize
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            CursorMode::Normal => "normal",
            CursorMode::ThrowTarget => "throw target",
            CursorMode::PsiTarget => "psi target",
            CursorMode::NoTarget => "no target",
            CursorMode::Add => "add",
            CursorMode::Shoot => "shoot",
            CursorMode::Control => "control",
            CursorMode::Teleport => "teleport",
            CursorMode::NoTeleport => "no teleport",
        }
    }

    /// The following mode, wrapping back to `Normal`
    pub fn next(self) -> CursorMode {
        Self::ALL[(self.frame_index() + 1) % Self::COUNT]
    }
}

impl std::fmt::Display for CursorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
