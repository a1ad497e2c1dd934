//! Regenerate the plugin list and archive lists from registry state.
//!
//! Only the managed subset changes: the plugin list header, the base game's
//! archives and every unrelated INI key are carried over as they were.

use crate::models::mod_file::{archive_file_name, plugin_file_name};
use crate::models::{ArchiveLayout, ArchiveList, IniTarget, ModFile, ModRegistry};
use crate::services::config_document::ConfigDocument;
use crate::services::discovery::PluginsHeader;

/// Render the plugin list: the header, then one line per mod with a plugin
/// in load order, prefixed with `*` when enabled.
pub fn render_plugins_file(header: &PluginsHeader, registry: &ModRegistry) -> String {
    let mut out = String::from(header.as_str());
    for record in registry.iter().filter(|r| r.has_plugin) {
        if record.plugin_enabled {
            out.push('*');
        }
        out.push_str(&plugin_file_name(record.base_id(), record.is_master));
        out.push('\n');
    }
    out
}

/// New entries for one archive list: the base game's entries as they
/// appear now, then every active archive this list governs, in load order.
pub fn archive_list_entries(
    registry: &ModRegistry,
    document: &ConfigDocument,
    list: &ArchiveList,
    layout: &ArchiveLayout,
) -> Vec<String> {
    let mut entries: Vec<String> = document
        .archive_list(&list.key)
        .into_iter()
        .filter(|token| {
            let file = ModFile::classify(token);
            file.category.is_archive() && layout.is_base_archive(&file.base_id)
        })
        .collect();

    for record in registry.iter() {
        for subcategory in record.active_archive_counts.keys() {
            if layout.accepts(list, subcategory) {
                entries.push(archive_file_name(record.base_id(), subcategory));
            }
        }
    }

    entries
}

/// Rewrite one archive list in `document`.
pub fn apply_archive_list(
    registry: &ModRegistry,
    document: &mut ConfigDocument,
    list: &ArchiveList,
    layout: &ArchiveLayout,
) {
    let entries = archive_list_entries(registry, document, list, layout);
    tracing::debug!("Writing {} entries to {}", entries.len(), list.key);
    document.set_archive_list(&list.key, &entries);
}

/// Rewrite every list of `layout` that lives in `target`.
pub fn apply_archive_lists(
    registry: &ModRegistry,
    document: &mut ConfigDocument,
    target: IniTarget,
    layout: &ArchiveLayout,
) {
    for list in layout.lists_in(target) {
        apply_archive_list(registry, document, list, layout);
    }
}
