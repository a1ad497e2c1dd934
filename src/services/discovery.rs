//! Build the mod registry from the data directory listing and the plugin list.
//!
//! Discovery runs in two passes:
//! 1. Every recognized file in the data directory creates or updates a record.
//!    This fixes the provisional order (first appearance in the listing).
//! 2. The plugin list (`Plugins`) marks plugins enabled and fixes the load
//!    order: mods named there come first, in list order, followed by the rest
//!    in discovery order. Lines naming mods with no files on disk are stale and
//!    skipped.

use crate::models::{ArchiveLayout, FileCategory, ModFile, ModRegistry};
use std::collections::HashSet;

/// Comment and blank lines at the top of the plugin list, kept verbatim so
/// they can be written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginsHeader(String);

impl PluginsHeader {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One parsed content line of the plugin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub file: ModFile,
    pub enabled: bool,
}

/// Plugin list split into header and content entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginList {
    pub header: PluginsHeader,
    pub entries: Vec<PluginEntry>,
}

impl PluginList {
    /// Parse the plugin list.
    ///
    /// Leading blank and `#` lines form the header. Afterwards blank and `#`
    /// lines are ignored; every other line names a plugin, with a leading `*`
    /// meaning enabled. Lines that do not name a plugin are skipped.
    pub fn parse<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut header = String::new();
        let mut in_header = true;
        let mut entries = Vec::new();

        for line in lines {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() || line.starts_with('#') {
                if in_header {
                    header.push_str(line);
                    header.push('\n');
                }
                continue;
            }
            in_header = false;

            let (enabled, file_name) = match line.strip_prefix('*') {
                Some(rest) => (true, rest),
                None => (false, line),
            };

            let file = ModFile::classify(file_name);
            if !file.category.is_plugin() {
                tracing::debug!("Skipping non-plugin line in plugin list: {}", line);
                continue;
            }
            entries.push(PluginEntry { file, enabled });
        }

        Self {
            header: PluginsHeader(header),
            entries,
        }
    }
}

/// Result of discovery: the registry plus the plugin list header.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub registry: ModRegistry,
    pub plugins_header: PluginsHeader,
}

/// Build a registry from a data directory listing and the plugin list text.
///
/// # Arguments
/// * `file_names` - Bare file names found in the data directory
/// * `plugins_text` - Full content of the plugin list file
/// * `layout` - Archive layout, used to ignore the game's own archives
pub fn discover_mods<S: AsRef<str>>(
    file_names: &[S],
    plugins_text: &str,
    layout: &ArchiveLayout,
) -> Discovery {
    let mut registry = ModRegistry::new();

    for name in file_names {
        let file = ModFile::classify(name.as_ref());
        match file.category {
            FileCategory::Unrecognized => continue,
            FileCategory::ArchiveBundle if layout.is_base_archive(&file.base_id) => {
                tracing::debug!("Ignoring base game archive {}", name.as_ref());
                continue;
            }
            _ => {}
        }

        let record = registry.get_or_create(&file.base_id);
        match file.category {
            FileCategory::PluginLight => record.has_plugin = true,
            FileCategory::PluginMaster => {
                record.has_plugin = true;
                record.is_master = true;
            }
            FileCategory::ArchiveBundle => {
                record.archive_subcategories.insert(file.subcategory);
            }
            FileCategory::Unrecognized => {}
        }
    }

    tracing::info!(
        "Found {} mod files, {} mods",
        file_names.len(),
        registry.len()
    );

    let plugin_list = PluginList::parse(plugins_text.lines());

    let mut listed: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in &plugin_list.entries {
        let base_id = entry.file.base_id.as_str();
        match registry.find_mut(base_id) {
            Some(record) => {
                record.plugin_enabled = entry.enabled;
                if seen.insert(base_id) {
                    listed.push(base_id);
                }
            }
            None => tracing::debug!("Skipping stale plugin list entry {}", base_id),
        }
    }
    registry.promote(listed);

    tracing::info!("Identified {} mods", registry.len());

    Discovery {
        registry,
        plugins_header: plugin_list.header,
    }
}
