// Configuration management
//
// Handles frontend configuration and settings persistence.

use crate::effects::EffectsConfig;
use crate::input::HotkeyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "frontend_config.toml";

/// Frontend configuration
///
/// Stores all user-configurable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Asset locations
    pub assets: AssetConfig,

    /// Post-processing settings
    pub effects: EffectsConfig,

    /// Hotkeys
    pub hotkeys: HotkeyConfig,

    /// Screenshot directory
    pub screenshot_directory: PathBuf,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Logical screen width in pixels
    pub width: u32,

    /// Logical screen height in pixels
    pub height: u32,

    /// Window scale (1-8)
    pub scale: u32,

    /// Target FPS
    pub fps: u32,

    /// Enable VSync
    pub vsync: bool,
}

/// Asset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Game data directory or zip file
    pub archive: PathBuf,

    /// Logical path of the cursor sprite sheet
    pub cursor: String,

    /// Logical path of the palette file
    pub palette: String,

    /// Which palette inside the palette file to use
    pub palette_index: usize,

    /// Refuse to start if the cursor sheet lacks a frame for any mode
    pub strict_cursor_modes: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            video: VideoConfig {
                width: 320,
                height: 200,
                scale: 3,
                fps: 60,
                vsync: true,
            },
            assets: AssetConfig {
                archive: PathBuf::from("data"),
                cursor: "UFOGRAPH/CURSOR.DAT".to_string(),
                palette: "GEODATA/PALETTES.DAT".to_string(),
                palette_index: 0,
                strict_cursor_modes: false,
            },
            effects: EffectsConfig::default(),
            hotkeys: HotkeyConfig::default(),
            screenshot_directory: PathBuf::from("screenshots"),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from `path`, or create and save defaults
    ///
    /// A missing or unreadable file is not an error; defaults are used and
    /// written back so the user has a file to edit.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::warn!(
                "Could not load {} ({}), using defaults",
                path.display(),
                e
            );
            let config = Self::default();
            if let Err(e) = config.save(path) {
                log::warn!("Could not save default config: {}", e);
            } else {
                log::info!("Created default configuration file {}", path.display());
            }
            config
        })
    }

    /// Load configuration from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}
