//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Configuration loading and saving
//! - Default configuration values
//! - Hand-written YAML with missing or invalid fields
//! - Feeding the configuration into GamePaths and ArchiveLayout

use camino::Utf8PathBuf;
use skymm::config::USER_CONFIG_FILE;
use skymm::{ArchiveLayout, ConfigManager, GamePaths, UserConfig};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.user_config_path(), config_path.join(USER_CONFIG_FILE));
}

#[test]
fn test_config_dir_is_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("SkyMM Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_load_default_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let user_config = manager.load_user_config().unwrap();

    assert_eq!(user_config.skymm_settings.romfs_dir, "romfs");
    assert_eq!(user_config.skymm_settings.language, "en");
    assert_eq!(user_config.skymm_settings.base_archive, "Skyrim");
    assert!(!user_config.skymm_settings.debug_mode);
}

#[test]
fn test_save_and_reload_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = UserConfig::default();
    config.skymm_settings.romfs_dir = "/switch/skyrim/romfs".to_string();
    config.skymm_settings.language = "ja".to_string();
    config.skymm_settings.debug_mode = true;
    manager.save_user_config(&config).unwrap();

    let saved = fs::read_to_string(manager.user_config_path()).unwrap();
    assert!(saved.contains("SkyMM_Settings"));
    assert!(saved.contains("Romfs Dir"));

    let loaded = manager.load_user_config().unwrap();
    assert_eq!(loaded.skymm_settings.romfs_dir, "/switch/skyrim/romfs");
    assert_eq!(loaded.skymm_settings.language, "ja");
    assert!(loaded.skymm_settings.debug_mode);
}

#[test]
fn test_hand_written_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(USER_CONFIG_FILE),
        "SkyMM_Settings:\n  Romfs Dir: game\n  Language: de\n",
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let settings = manager.load_user_config().unwrap().skymm_settings;

    let paths = GamePaths::new(&settings.romfs_dir, &settings.language);
    assert_eq!(paths.localized_ini(), Utf8PathBuf::from("game/Skyrim_de.ini"));

    let layout = ArchiveLayout::skyrim(&settings.base_archive);
    assert!(layout.is_base_archive("Skyrim"));
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(USER_CONFIG_FILE),
        "SkyMM_Settings:\n  Debug Mode: [not, a, bool]\n",
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let err = manager.load_user_config().unwrap_err();
    assert!(err.to_string().contains("Failed to parse user config"));
}
