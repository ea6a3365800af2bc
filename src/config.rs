//! Mapper settings persistence
//!
//! Stores user preferences in `~/.config/keymapper/config.yaml`:
//!
//! ```yaml
//! mapperfile: mapper-keymapper.map
//! usescancodes: true
//! host_layout: xorg
//! joysticktype: auto
//! autofire: false
//! buttonwrap: false
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config_paths;
use crate::mapper::{HostLayout, HostStick, JoystickType, MapperOptions, Translation};

/// Errors reading or writing the settings file
#[derive(Debug)]
pub enum SettingsError {
    IoError(String),
    ParseError(String),
    NoConfigDir,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::NoConfigDir => write!(f, "No config directory available"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Mapper configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    /// Mapper file; relative paths resolve against the config dir
    pub mapperfile: PathBuf,
    /// Translate host scancodes through the layout tables
    pub usescancodes: bool,
    pub host_layout: HostLayout,
    pub joysticktype: JoystickType,
    /// Toggle held joystick buttons on every poll
    pub autofire: bool,
    /// Fold extra host buttons onto the emulated ones
    pub buttonwrap: bool,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            mapperfile: PathBuf::from(config_paths::DEFAULT_MAPPER_FILE),
            usescancodes: true,
            host_layout: HostLayout::default(),
            joysticktype: JoystickType::default(),
            autofire: false,
            buttonwrap: false,
        }
    }
}

impl MapperSettings {
    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to load settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        // An empty document is a valid "all defaults" file
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SettingsError::ParseError(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        serde_yaml::to_string(self)
            .map_err(|e| SettingsError::ParseError(format!("Failed to serialize settings: {}", e)))
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = config_paths::config_file().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = self.to_yaml()?;
        std::fs::write(path, content).map_err(|e| {
            SettingsError::IoError(format!("Failed to write settings to {}: {}", path.display(), e))
        })?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Where the mapper file lives
    pub fn mapper_file_path(&self) -> Option<PathBuf> {
        config_paths::resolve(&self.mapperfile)
    }

    pub fn translation(&self) -> Translation {
        if self.usescancodes {
            Translation::Scancodes(self.host_layout)
        } else {
            Translation::Bypass
        }
    }

    pub fn mapper_options(&self, sticks: Vec<HostStick>) -> MapperOptions {
        MapperOptions {
            translation: self.translation(),
            joystick_type: self.joysticktype,
            sticks,
            autofire: self.autofire,
            button_wrap: self.buttonwrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = MapperSettings::from_yaml("joysticktype: 4axis_2\nautofire: true\n").unwrap();
        assert_eq!(settings.joysticktype, JoystickType::FourAxisSecond);
        assert!(settings.autofire);
        assert!(settings.usescancodes);
        assert_eq!(
            settings.mapperfile,
            PathBuf::from(config_paths::DEFAULT_MAPPER_FILE)
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(MapperSettings::from_yaml("  \n").unwrap(), MapperSettings::default());
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = MapperSettings::from_yaml("joysticktype: 3axis\n").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_translation_follows_usescancodes() {
        let mut settings = MapperSettings {
            host_layout: HostLayout::Evdev,
            ..Default::default()
        };
        assert_eq!(
            settings.translation(),
            Translation::Scancodes(HostLayout::Evdev)
        );
        settings.usescancodes = false;
        assert_eq!(settings.translation(), Translation::Bypass);
    }

    #[test]
    fn test_absolute_mapper_file_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.map");
        let settings = MapperSettings {
            mapperfile: path.clone(),
            ..Default::default()
        };
        assert_eq!(settings.mapper_file_path(), Some(path));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.yaml");
        let settings = MapperSettings {
            joysticktype: JoystickType::Ch,
            buttonwrap: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(MapperSettings::load_from(&path).unwrap(), settings);
    }
}
