// Input module - Events delivered to the frontend
//
// Window-system events are translated into InputEvent so the cursor and
// game logic never depend on winit's event types directly. Pointer
// coordinates are always in logical framebuffer pixels.

pub mod hotkeys;

pub use hotkeys::{HotkeyAction, HotkeyConfig, Hotkeys};

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pointer buttons the frontend distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Back => PointerButton::Other(3),
            MouseButton::Forward => PointerButton::Other(4),
            MouseButton::Other(n) => PointerButton::Other(n),
        }
    }
}

/// An input event in logical screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The pointer moved to (x, y)
    PointerMoved { x: i32, y: i32 },
    /// A pointer button changed state
    PointerButton { button: PointerButton, pressed: bool },
    /// A key changed state
    Key { key: KeyCode, pressed: bool },
    /// The window lost focus
    FocusLost,
}

impl InputEvent {
    /// Pointer-move event at (x, y)
    pub fn pointer_moved(x: i32, y: i32) -> Self {
        InputEvent::PointerMoved { x, y }
    }

    /// Translate a winit window event
    ///
    /// # Arguments
    /// * `event` - Event received by the window
    /// * `to_logical` - Maps a physical window position to logical pixels
    ///
    /// # Returns
    /// `None` for events the frontend does not use
    pub fn from_window_event<F>(event: &WindowEvent, to_logical: F) -> Option<Self>
    where
        F: FnOnce(PhysicalPosition<f64>) -> (i32, i32),
    {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = to_logical(*position);
                Some(InputEvent::PointerMoved { x, y })
            }
            WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
                button: (*button).into(),
                pressed: *state == ElementState::Pressed,
            }),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => Some(InputEvent::Key {
                    key,
                    pressed: event.state == ElementState::Pressed,
                }),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            _ => None,
        }
    }
}

/// Map a physical window position to logical pixels with a uniform scale
///
/// Used when the presented surface fills the window exactly.
pub fn scale_to_logical(position: PhysicalPosition<f64>, scale: f64) -> (i32, i32) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    (
        (position.x / scale).floor() as i32,
        (position.y / scale).floor() as i32,
    )
}
