//! Locations of the game files SkyMM manages, and reading/writing them.
//!
//! Everything here is plain file I/O. The reconciliation logic lives in
//! [`discovery`](crate::services::discovery),
//! [`archive_lists`](crate::services::archive_lists) and
//! [`write_back`](crate::services::write_back).

use crate::services::config_document::ConfigDocument;
use crate::services::error::ModManagerError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Paths of the managed files under a content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    romfs_dir: Utf8PathBuf,
    language: String,
}

impl GamePaths {
    pub fn new<P: AsRef<Utf8Path>>(romfs_dir: P, language: &str) -> Self {
        Self {
            romfs_dir: romfs_dir.as_ref().to_path_buf(),
            language: language.to_string(),
        }
    }

    pub fn romfs_dir(&self) -> &Utf8Path {
        &self.romfs_dir
    }

    /// Directory holding plugins and archives.
    pub fn data_dir(&self) -> Utf8PathBuf {
        self.romfs_dir.join("Data")
    }

    pub fn plugins_file(&self) -> Utf8PathBuf {
        self.romfs_dir.join("Plugins")
    }

    /// `Skyrim.ini`
    pub fn main_ini(&self) -> Utf8PathBuf {
        self.romfs_dir.join("Skyrim.ini")
    }

    /// `Skyrim_<lang>.ini`
    pub fn localized_ini(&self) -> Utf8PathBuf {
        self.romfs_dir.join(format!("Skyrim_{}.ini", self.language))
    }
}

/// Names of the regular files in `dir`, sorted so discovery order does not
/// depend on the filesystem.
pub fn list_data_files(dir: &Utf8Path) -> Result<Vec<String>, ModManagerError> {
    let source_error = |source| ModManagerError::SourceUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(source_error)? {
        let entry = entry.map_err(source_error)?;
        if !entry.file_type().map_err(source_error)?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::warn!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    names.sort();

    tracing::info!("Found {} files in {}", names.len(), dir);
    Ok(names)
}

pub fn read_text(path: &Utf8Path) -> Result<String, ModManagerError> {
    fs::read_to_string(path).map_err(|source| ModManagerError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_document(path: &Utf8Path) -> Result<ConfigDocument, ModManagerError> {
    let text = read_text(path)?;
    let document = ConfigDocument::parse(&text, path)?;
    tracing::info!("Loaded {}", path);
    Ok(document)
}

/// Overwrite `path` with `contents`.
pub fn write_text(path: &Utf8Path, contents: &str) -> Result<(), ModManagerError> {
    fs::write(path, contents).map_err(|source| ModManagerError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_paths() {
        let paths = GamePaths::new("/romfs", "fr");
        assert_eq!(paths.data_dir(), Utf8PathBuf::from("/romfs/Data"));
        assert_eq!(paths.plugins_file(), Utf8PathBuf::from("/romfs/Plugins"));
        assert_eq!(paths.main_ini(), Utf8PathBuf::from("/romfs/Skyrim.ini"));
        assert_eq!(paths.localized_ini(), Utf8PathBuf::from("/romfs/Skyrim_fr.ini"));
    }

    #[test]
    fn test_list_data_files_skips_directories() {
        let (_temp_dir, root) = temp_root();
        fs::write(root.join("b.esp"), "").unwrap();
        fs::write(root.join("a.bsa"), "").unwrap();
        fs::create_dir(root.join("meshes")).unwrap();

        assert_eq!(list_data_files(&root).unwrap(), vec!["a.bsa", "b.esp"]);
    }

    #[test]
    fn test_missing_sources_are_errors() {
        let (_temp_dir, root) = temp_root();
        let err = list_data_files(&root.join("Data")).unwrap_err();
        assert!(err.is_source_error());

        let err = read_text(&root.join("Plugins")).unwrap_err();
        assert!(matches!(err, ModManagerError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let (_temp_dir, root) = temp_root();
        let err = write_text(&root.join("missing").join("Plugins"), "x").unwrap_err();
        assert!(matches!(err, ModManagerError::DestinationUnwritable { .. }));
    }
}
