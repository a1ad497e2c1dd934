/// INI section holding every archive list.
pub const ARCHIVE_SECTION: &str = "Archive";

/// Archive list keys used by the game.
pub const KEY_RESOURCE_ARCHIVE_LIST: &str = "sResourceArchiveList";
pub const KEY_RESOURCE_ARCHIVE_LIST_2: &str = "sResourceArchiveList2";
pub const KEY_ARCHIVE_TO_LOAD_IN_MEMORY_LIST: &str = "sArchiveToLoadInMemoryList";

/// Subcategory that must be declared both as a resource archive and as an
/// in-memory archive to be fully active.
pub const ANIMATIONS_SUBCATEGORY: &str = "Animations";

/// Base archive id of the game's own bundles (`Skyrim - Misc.bsa`, ...).
pub const DEFAULT_BASE_ARCHIVE: &str = "Skyrim";

/// Which of the two game configuration documents a list lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IniTarget {
    /// `Skyrim.ini`
    Main,
    /// `Skyrim_<lang>.ini`
    Localized,
}

/// One comma-separated archive list: where it lives and which archive
/// subcategories it governs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveList {
    pub target: IniTarget,
    pub key: String,
    pub subcategories: Vec<String>,
    /// Also governs subcategories that no list names explicitly.
    pub catch_all: bool,
}

impl ArchiveList {
    pub fn new(target: IniTarget, key: &str, subcategories: &[&str], catch_all: bool) -> Self {
        Self {
            target,
            key: key.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
            catch_all,
        }
    }

    fn names(&self, subcategory: &str) -> bool {
        self.subcategories.iter().any(|s| s == subcategory)
    }
}

/// The set of archive lists a game reads, plus the reserved base archive id.
///
/// Subcategories are matched exactly. A catch-all list additionally accepts
/// any subcategory that none of the lists names, so unusual suffixes such
/// as `Misc` still have exactly one home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    pub lists: Vec<ArchiveList>,
    pub base_archive: String,
}

impl ArchiveLayout {
    /// Standard Skyrim layout.
    pub fn skyrim(base_archive: &str) -> Self {
        Self {
            lists: vec![
                ArchiveList::new(
                    IniTarget::Main,
                    KEY_RESOURCE_ARCHIVE_LIST,
                    &["", ANIMATIONS_SUBCATEGORY, "Meshes", "Sounds"],
                    true,
                ),
                ArchiveList::new(
                    IniTarget::Localized,
                    KEY_RESOURCE_ARCHIVE_LIST_2,
                    &["Textures", "Voices"],
                    false,
                ),
                ArchiveList::new(
                    IniTarget::Main,
                    KEY_ARCHIVE_TO_LOAD_IN_MEMORY_LIST,
                    &[ANIMATIONS_SUBCATEGORY],
                    false,
                ),
            ],
            base_archive: base_archive.to_string(),
        }
    }

    /// Whether `list` governs archives of `subcategory`.
    pub fn accepts(&self, list: &ArchiveList, subcategory: &str) -> bool {
        if list.names(subcategory) {
            return true;
        }
        list.catch_all && !self.lists.iter().any(|l| l.names(subcategory))
    }

    /// Number of lists an archive of `subcategory` has to appear in to be
    /// fully active.
    pub fn expected_count(&self, subcategory: &str) -> u32 {
        self.lists
            .iter()
            .filter(|list| self.accepts(list, subcategory))
            .count() as u32
    }

    pub fn lists_in(&self, target: IniTarget) -> impl Iterator<Item = &ArchiveList> {
        self.lists.iter().filter(move |list| list.target == target)
    }

    pub fn is_base_archive(&self, base_id: &str) -> bool {
        base_id == self.base_archive
    }
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self::skyrim(DEFAULT_BASE_ARCHIVE)
    }
}
