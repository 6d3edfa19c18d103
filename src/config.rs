//! Game configuration loaded from TOML.
//!
//! Every field has a default, so a config file only needs to mention what it
//! changes (or can be missing entirely).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::input::gamepad::DEFAULT_DEADZONE;
use crate::input::history::DEFAULT_HISTORY_LEN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub pointer: PointerConfig,
    pub gamepad: GamepadConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// RGBA color the screen is cleared to before each draw.
    pub clear_color: [u8; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "rzero".to_string(),
            width: 800,
            height: 600,
            clear_color: [0, 0, 0, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub recent_pos_max: usize,
    pub recent_rel_max: usize,
    pub visible: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            recent_pos_max: DEFAULT_HISTORY_LEN,
            recent_rel_max: DEFAULT_HISTORY_LEN,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    /// Stick values within this distance of center read as 0.
    pub deadzone: f32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorldConfig {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("CONFIG: {:?} not found, using defaults", path);
                Self::default()
            }
            Err(e) => {
                log::error!("CONFIG: {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}
