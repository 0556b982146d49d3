// Hotkey bindings
//
// Bindings are stored as winit KeyCode names (e.g. "Tab", "F9") so they can
// be edited in the TOML configuration file.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Actions the frontend binds to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Switch the cursor to the next mode that has a frame
    NextCursorMode,
    /// Turn post-processing on or off
    ToggleEffects,
    /// Save the composed frame as a PNG
    Screenshot,
    /// Close the window
    Quit,
}

/// Serializable hotkey configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Next cursor mode (default: Tab)
    pub next_cursor_mode: String,

    /// Toggle effects (default: F2)
    pub toggle_effects: String,

    /// Screenshot (default: F9)
    pub screenshot: String,

    /// Quit (default: Escape)
    pub quit: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            next_cursor_mode: "Tab".to_string(),
            toggle_effects: "F2".to_string(),
            screenshot: "F9".to_string(),
            quit: "Escape".to_string(),
        }
    }
}

impl HotkeyConfig {
    /// Resolve key names into runtime bindings
    ///
    /// # Returns
    /// Result containing the bindings or an error naming the bad key
    pub fn to_hotkeys(&self) -> Result<Hotkeys, String> {
        Ok(Hotkeys {
            next_cursor_mode: string_to_keycode(&self.next_cursor_mode)?,
            toggle_effects: string_to_keycode(&self.toggle_effects)?,
            screenshot: string_to_keycode(&self.screenshot)?,
            quit: string_to_keycode(&self.quit)?,
        })
    }
}

/// Runtime hotkey bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkeys {
    pub next_cursor_mode: KeyCode,
    pub toggle_effects: KeyCode,
    pub screenshot: KeyCode,
    pub quit: KeyCode,
}

impl Hotkeys {
    /// Action bound to `key`, if any
    pub fn action_for(&self, key: KeyCode) -> Option<HotkeyAction> {
        if key == self.next_cursor_mode {
            Some(HotkeyAction::NextCursorMode)
        } else if key == self.toggle_effects {
            Some(HotkeyAction::ToggleEffects)
        } else if key == self.screenshot {
            Some(HotkeyAction::Screenshot)
        } else if key == self.quit {
            Some(HotkeyAction::Quit)
        } else {
            None
        }
    }
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            next_cursor_mode: KeyCode::Tab,
            toggle_effects: KeyCode::F2,
            screenshot: KeyCode::F9,
            quit: KeyCode::Escape,
        }
    }
}

/// Convert a key name to KeyCode
fn string_to_keycode(s: &str) -> Result<KeyCode, String> {
    match s {
        "Tab" => Ok(KeyCode::Tab),
        "Space" => Ok(KeyCode::Space),
        "Enter" => Ok(KeyCode::Enter),
        "Escape" => Ok(KeyCode::Escape),
        "Backspace" => Ok(KeyCode::Backspace),
        "F1" => Ok(KeyCode::F1),
        "F2" => Ok(KeyCode::F2),
        "F3" => Ok(KeyCode::F3),
        "F4" => Ok(KeyCode::F4),
        "F5" => Ok(KeyCode::F5),
        "F6" => Ok(KeyCode::F6),
        "F7" => Ok(KeyCode::F7),
        "F8" => Ok(KeyCode::F8),
        "F9" => Ok(KeyCode::F9),
        "F10" => Ok(KeyCode::F10),
        "F11" => Ok(KeyCode::F11),
        "F12" => Ok(KeyCode::F12),
        "KeyC" => Ok(KeyCode::KeyC),
        "KeyE" => Ok(KeyCode::KeyE),
        "KeyM" => Ok(KeyCode::KeyM),
        "KeyP" => Ok(KeyCode::KeyP),
        "KeyQ" => Ok(KeyCode::KeyQ),
        "KeyS" => Ok(KeyCode::KeyS),
        "Digit1" => Ok(KeyCode::Digit1),
        "Digit2" => Ok(KeyCode::Digit2),
        "Digit3" => Ok(KeyCode::Digit3),
        "Digit4" => Ok(KeyCode::Digit4),
        "PrintScreen" => Ok(KeyCode::PrintScreen),
        _ => Err(format!("Unknown key code: {}", s)),
    }
}
