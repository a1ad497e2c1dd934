/// Extension of archive (resource bundle) files.
pub const EXT_ARCHIVE: &str = "bsa";

/// Extension of light plugin files.
pub const EXT_PLUGIN_LIGHT: &str = "esp";

/// Extension of master plugin files.
pub const EXT_PLUGIN_MASTER: &str = "esm";

/// Separator between a mod's base name and an archive subcategory, as in
/// `"Immersive Armors - Textures.bsa"`.
pub const SUBCATEGORY_SEPARATOR: &str = " - ";

/// Kind of file a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    ArchiveBundle,
    PluginLight,
    PluginMaster,
    Unrecognized,
}

impl FileCategory {
    pub fn is_plugin(self) -> bool {
        matches!(self, FileCategory::PluginLight | FileCategory::PluginMaster)
    }

    pub fn is_archive(self) -> bool {
        self == FileCategory::ArchiveBundle
    }
}

/// Typed view of a bare file name found in the data directory, the plugin
/// list or an archive list.
///
/// Classification is a pure function of the name. Identifiers are never
/// case-folded; `"Foo.esp"` and `"foo.esp"` belong to different mods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFile {
    pub category: FileCategory,
    pub base_id: String,
    pub subcategory: String,
}

impl ModFile {
    /// Classify a file name.
    ///
    /// The name is split on its last `.`. Archives are further split on the
    /// last `" - "` of the stem into base id and subcategory. Names without an
    /// extension, or with an extension other than `bsa`/`esp`/`esm`
    /// (case-sensitive), are [`FileCategory::Unrecognized`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skymm::models::{FileCategory, ModFile};
    ///
    /// let file = ModFile::classify("Cutting Room Floor - Textures.bsa");
    /// assert_eq!(file.category, FileCategory::ArchiveBundle);
    /// assert_eq!(file.base_id, "Cutting Room Floor");
    /// assert_eq!(file.subcategory, "Textures");
    /// ```
    pub fn classify(file_name: &str) -> Self {
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            return Self::unrecognized();
        };

        let stem = stem.trim();
        let category = match ext.trim() {
            EXT_ARCHIVE => FileCategory::ArchiveBundle,
            EXT_PLUGIN_LIGHT => FileCategory::PluginLight,
            EXT_PLUGIN_MASTER => FileCategory::PluginMaster,
            _ => return Self::unrecognized(),
        };

        if category.is_archive() {
            if let Some((base, subcategory)) = stem.rsplit_once(SUBCATEGORY_SEPARATOR) {
                return Self {
                    category,
                    base_id: base.trim().to_string(),
                    subcategory: subcategory.trim().to_string(),
                };
            }
        }

        Self {
            category,
            base_id: stem.to_string(),
            subcategory: String::new(),
        }
    }

    fn unrecognized() -> Self {
        Self {
            category: FileCategory::Unrecognized,
            base_id: String::new(),
            subcategory: String::new(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.category != FileCategory::Unrecognized
    }
}

/// File name of an archive for `base_id` and `subcategory`, the inverse of
/// [`ModFile::classify`] for archives.
pub fn archive_file_name(base_id: &str, subcategory: &str) -> String {
    if subcategory.is_empty() {
        format!("{}.{}", base_id, EXT_ARCHIVE)
    } else {
        format!(
            "{}{}{}.{}",
            base_id, SUBCATEGORY_SEPARATOR, subcategory, EXT_ARCHIVE
        )
    }
}

/// File name of a plugin for `base_id`.
pub fn plugin_file_name(base_id: &str, is_master: bool) -> String {
    let ext = if is_master {
        EXT_PLUGIN_MASTER
    } else {
        EXT_PLUGIN_LIGHT
    };
    format!("{}.{}", base_id, ext)
}
