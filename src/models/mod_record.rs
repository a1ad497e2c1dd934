use crate::models::archive_layout::{ANIMATIONS_SUBCATEGORY, ArchiveLayout};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// Overall activation state of a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModStatus {
    Enabled,
    Disabled,
    Partial,
}

impl fmt::Display for ModStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModStatus::Enabled => "Enabled",
            ModStatus::Disabled => "Disabled",
            ModStatus::Partial => "Partial",
        };
        f.write_str(label)
    }
}

/// Everything known about one mod, keyed by its base id.
///
/// A mod is the union of an optional plugin (`<id>.esp` or `<id>.esm`) and
/// any number of archives (`<id>.bsa`, `<id> - <subcategory>.bsa`).
///
/// # Invariants
///
/// - `base_id` never changes once the record exists.
/// - Every key of `active_archive_counts` is also in `archive_subcategories`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRecord {
    base_id: String,
    pub has_plugin: bool,
    pub is_master: bool,
    pub plugin_enabled: bool,
    pub archive_subcategories: IndexSet<String>,
    pub active_archive_counts: IndexMap<String, u32>,
}

impl ModRecord {
    pub fn new(base_id: impl Into<String>) -> Self {
        Self {
            base_id: base_id.into(),
            has_plugin: false,
            is_master: false,
            plugin_enabled: false,
            archive_subcategories: IndexSet::new(),
            active_archive_counts: IndexMap::new(),
        }
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    pub fn has_archives(&self) -> bool {
        !self.archive_subcategories.is_empty()
    }

    /// Record one more archive list declaring `subcategory` active.
    ///
    /// Declarations for subcategories with no archive on disk are dropped.
    /// Returns whether the declaration was counted.
    pub fn mark_archive_active(&mut self, subcategory: &str) -> bool {
        if !self.archive_subcategories.contains(subcategory) {
            return false;
        }
        *self
            .active_archive_counts
            .entry(subcategory.to_string())
            .or_insert(0) += 1;
        true
    }

    /// Derive the tri-state status from plugin and archive state.
    ///
    /// A mod without a plugin is treated as plugin-satisfied, a mod without
    /// archives as archive-satisfied. An archive-only mod with no active
    /// archives is `Disabled`, and so is a plugin-only mod whose plugin is off.
    pub fn status(&self) -> ModStatus {
        let plugin_ok = if self.has_plugin {
            self.plugin_enabled
        } else {
            true
        };

        match self.archive_status() {
            ModStatus::Partial => ModStatus::Partial,
            ModStatus::Disabled => {
                if self.has_plugin && self.plugin_enabled {
                    ModStatus::Partial
                } else {
                    ModStatus::Disabled
                }
            }
            ModStatus::Enabled => {
                if plugin_ok {
                    ModStatus::Enabled
                } else if self.has_archives() {
                    ModStatus::Partial
                } else {
                    ModStatus::Disabled
                }
            }
        }
    }

    fn archive_status(&self) -> ModStatus {
        if !self.has_archives() {
            return ModStatus::Enabled;
        }
        if self.active_archive_counts.is_empty() {
            return ModStatus::Disabled;
        }

        let all_active = self.active_archive_counts.len() == self.archive_subcategories.len()
            && self
                .archive_subcategories
                .iter()
                .all(|sub| self.active_archive_counts.contains_key(sub));
        if !all_active {
            return ModStatus::Partial;
        }

        match self.active_archive_counts.get(ANIMATIONS_SUBCATEGORY) {
            Some(&count) if count != 2 => ModStatus::Partial,
            _ => ModStatus::Enabled,
        }
    }

    /// Activate the plugin and every archive the layout has a list for.
    pub fn enable(&mut self, layout: &ArchiveLayout) {
        self.plugin_enabled = true;
        self.active_archive_counts.clear();
        for subcategory in &self.archive_subcategories {
            let count = layout.expected_count(subcategory);
            if count > 0 {
                self.active_archive_counts.insert(subcategory.clone(), count);
            }
        }
    }

    /// Deactivate the plugin and all archives.
    pub fn disable(&mut self) {
        self.plugin_enabled = false;
        self.active_archive_counts.clear();
    }
}
