use crate::models::archive_layout::DEFAULT_BASE_ARCHIVE;
use serde::{Deserialize, Serialize};

/// User configuration from SkyMM Config.yaml
///
/// Contains the content root and the values that pick which game files to
/// manage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "SkyMM_Settings", default)]
    pub skymm_settings: SkymmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkymmSettings {
    #[serde(rename = "Romfs Dir", default = "default_romfs_dir")]
    pub romfs_dir: String,

    #[serde(rename = "Language", default = "default_language")]
    pub language: String,

    #[serde(rename = "Base Archive", default = "default_base_archive")]
    pub base_archive: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for SkymmSettings {
    fn default() -> Self {
        Self {
            romfs_dir: default_romfs_dir(),
            language: default_language(),
            base_archive: default_base_archive(),
            debug_mode: false,
        }
    }
}

fn default_romfs_dir() -> String {
    "romfs".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_base_archive() -> String {
    DEFAULT_BASE_ARCHIVE.to_string()
}
