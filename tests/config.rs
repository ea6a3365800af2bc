//! Configuration system tests
//!
//! Tests for config paths and mapper settings.

use std::path::Path;

use keymapper::config::{MapperSettings, SettingsError};
use keymapper::config_paths;
use keymapper::mapper::{HostLayout, HostStick, JoystickType, Translation};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("keymapper"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

#[test]
fn test_relative_paths_resolve_into_config_dir() {
    if let Some(config) = config_paths::config_dir() {
        let resolved = config_paths::resolve(Path::new("custom.map")).unwrap();
        assert_eq!(resolved, config.join("custom.map"));
    }
}

#[test]
fn test_resolve_in_keeps_absolute_paths() {
    let base = Path::new("/base");
    assert_eq!(
        config_paths::resolve_in(base, Path::new("maps/custom.map")),
        base.join("maps/custom.map")
    );
    let absolute = std::env::temp_dir().join("custom.map");
    assert_eq!(config_paths::resolve_in(base, &absolute), absolute);
}

// ========================================================================
// Mapper Settings Tests
// ========================================================================

#[test]
fn test_default_settings() {
    let settings = MapperSettings::default();
    assert!(settings.usescancodes);
    assert!(!settings.autofire);
    assert!(!settings.buttonwrap);
    assert_eq!(settings.joysticktype, JoystickType::Auto);
    assert_eq!(
        settings.mapperfile,
        Path::new(config_paths::DEFAULT_MAPPER_FILE)
    );
}

#[test]
fn test_settings_yaml_round_trip() {
    let settings = MapperSettings {
        host_layout: HostLayout::Os2,
        joysticktype: JoystickType::Fcs,
        autofire: true,
        ..Default::default()
    };
    let yaml = settings.to_yaml().unwrap();
    assert!(yaml.contains("joysticktype: fcs"));
    assert!(yaml.contains("host_layout: os2"));
    assert_eq!(MapperSettings::from_yaml(&yaml).unwrap(), settings);
}

#[test]
fn test_all_joystick_types_parse() {
    for (text, expected) in [
        ("auto", JoystickType::Auto),
        ("none", JoystickType::None),
        ("2axis", JoystickType::TwoAxis),
        ("4axis", JoystickType::FourAxis),
        ("4axis_2", JoystickType::FourAxisSecond),
        ("fcs", JoystickType::Fcs),
        ("ch", JoystickType::Ch),
    ] {
        let settings = MapperSettings::from_yaml(&format!("joysticktype: {}", text)).unwrap();
        assert_eq!(settings.joysticktype, expected, "{}", text);
    }
}

#[test]
fn test_missing_settings_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = MapperSettings::load_from(&tmp.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}

#[test]
fn test_mapper_options_from_settings() {
    let settings = MapperSettings {
        usescancodes: false,
        joysticktype: JoystickType::TwoAxis,
        buttonwrap: true,
        ..Default::default()
    };
    let options = settings.mapper_options(vec![HostStick::new("Pad", 2, 4, 0)]);
    assert_eq!(options.translation, Translation::Bypass);
    assert_eq!(options.joystick_type, JoystickType::TwoAxis);
    assert!(options.button_wrap);
    assert_eq!(options.sticks.len(), 1);
}
