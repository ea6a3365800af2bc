//! Where keymapper keeps its settings, mapper file and logs
//!
//! The base directory is `$XDG_CONFIG_HOME/keymapper` or `~/.config/keymapper`
//! on Unix and macOS, and the platform config dir (`%APPDATA%`) on Windows.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "keymapper";
const SETTINGS_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// File name of the mapper file when the settings don't name one
pub const DEFAULT_MAPPER_FILE: &str = "mapper-keymapper.map";

pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        dirs::config_dir()
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

/// The YAML settings file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Resolve a settings path against the config dir
pub fn resolve(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    config_dir().map(|dir| resolve_in(&dir, path))
}

/// `path` unchanged when absolute, otherwise joined onto `base`
pub fn resolve_in(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Create the logs dir (and the config dir above it) if needed
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no config directory available")
    })?;
    fs::create_dir_all(&logs)?;
    Ok(logs)
}
