//! Cross-reference archive lists in the game INIs with discovered mods.
//!
//! Each [`ArchiveList`] is applied on its own; applying all lists of a
//! layout is what lets an `Animations` archive reach a count of two.

use crate::models::{ArchiveLayout, ArchiveList, IniTarget, ModFile, ModRegistry};
use crate::services::config_document::ConfigDocument;

/// Count declarations from one archive list into the registry.
///
/// Tokens that are not archives, belong to the base game, have a
/// subcategory this list does not govern, or name a mod that was never
/// discovered are skipped. Returns the number of declarations counted.
pub fn reconcile_archive_list(
    registry: &mut ModRegistry,
    document: &ConfigDocument,
    list: &ArchiveList,
    layout: &ArchiveLayout,
) -> usize {
    let mut counted = 0;

    for token in document.archive_list(&list.key) {
        let file = ModFile::classify(&token);
        if !file.category.is_archive() || layout.is_base_archive(&file.base_id) {
            continue;
        }

        if !layout.accepts(list, &file.subcategory) {
            tracing::debug!("{} does not belong in {}, ignoring", token, list.key);
            continue;
        }

        let Some(record) = registry.find_mut(&file.base_id) else {
            tracing::debug!("Archive {} in {} was not found on disk", token, list.key);
            continue;
        };

        if record.mark_archive_active(&file.subcategory) {
            counted += 1;
        } else {
            tracing::debug!("Archive {} in {} has no file on disk", token, list.key);
        }
    }

    tracing::debug!("Counted {} active archives from {}", counted, list.key);
    counted
}

/// Apply every list of `layout`, reading each from the document it lives in.
pub fn reconcile_archive_lists(
    registry: &mut ModRegistry,
    main: &ConfigDocument,
    localized: &ConfigDocument,
    layout: &ArchiveLayout,
) -> usize {
    layout
        .lists
        .iter()
        .map(|list| {
            let document = match list.target {
                IniTarget::Main => main,
                IniTarget::Localized => localized,
            };
            reconcile_archive_list(registry, document, list, layout)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModStatus;
    use camino::Utf8Path;

    fn registry() -> ModRegistry {
        let mut registry = ModRegistry::new();
        let alpha = registry.get_or_create("Alpha");
        alpha.archive_subcategories.insert("Animations".to_string());
        alpha.archive_subcategories.insert("Textures".to_string());
        let beta = registry.get_or_create("Beta");
        beta.archive_subcategories.insert(String::new());
        registry
    }

    fn doc(text: &str) -> ConfigDocument {
        ConfigDocument::parse(text, Utf8Path::new("test.ini")).unwrap()
    }

    #[test]
    fn test_reconcile_all_lists() {
        let mut registry = registry();
        let main = doc(
            "[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa, Alpha - Animations.bsa, Beta.bsa, Ghost.bsa\nsArchiveToLoadInMemoryList=Skyrim - Animations.bsa, Alpha - Animations.bsa\n",
        );
        let localized =
            doc("[Archive]\nsResourceArchiveList2=Skyrim - Textures0.bsa, Alpha - Textures.bsa\n");

        let counted =
            reconcile_archive_lists(&mut registry, &main, &localized, &ArchiveLayout::default());
        assert_eq!(counted, 4);

        let alpha = registry.find("Alpha").unwrap();
        assert_eq!(alpha.active_archive_counts.get("Animations"), Some(&2));
        assert_eq!(alpha.active_archive_counts.get("Textures"), Some(&1));
        assert_eq!(alpha.status(), ModStatus::Enabled);

        assert_eq!(registry.find("Beta").unwrap().status(), ModStatus::Enabled);
        assert!(registry.find("Ghost").is_none());
    }

    #[test]
    fn test_wrong_list_is_ignored() {
        let mut registry = registry();
        let layout = ArchiveLayout::default();
        let main = doc("[Archive]\nsResourceArchiveList=Alpha - Textures.bsa\n");

        let counted = reconcile_archive_list(&mut registry, &main, &layout.lists[0], &layout);
        assert_eq!(counted, 0);
        assert!(registry.find("Alpha").unwrap().active_archive_counts.is_empty());
    }

    #[test]
    fn test_declaration_without_file_is_dropped() {
        let mut registry = registry();
        let layout = ArchiveLayout::default();
        let main = doc("[Archive]\nsResourceArchiveList=Beta - Meshes.bsa, Beta.esp\n");

        reconcile_archive_list(&mut registry, &main, &layout.lists[0], &layout);
        assert!(registry.find("Beta").unwrap().active_archive_counts.is_empty());
    }

    #[test]
    fn test_missing_key_counts_nothing() {
        let mut registry = registry();
        let layout = ArchiveLayout::default();
        let main = doc("[General]\nsLanguage=ENGLISH\n");

        assert_eq!(
            reconcile_archive_list(&mut registry, &main, &layout.lists[0], &layout),
            0
        );
    }
}
