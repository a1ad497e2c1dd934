// State management module
//
// This module provides the ModSession which owns the mod registry and the parsed
// game documents for one run, tracks unsaved changes and reports what each
// mutation changed.

use crate::models::{ArchiveLayout, Direction, IniTarget, ModRegistry, ModStatus};
use crate::services::config_document::ConfigDocument;
use crate::services::discovery::{PluginsHeader, discover_mods};
use crate::services::error::ModManagerError;
use crate::services::game_files::{self, GamePaths};
use crate::services::{apply_archive_lists, reconcile_archive_lists, render_plugins_file};
use camino::Utf8PathBuf;
use std::fmt;

/// Change events produced by session mutations
///
/// Front ends use these to refresh only what changed instead of re-reading
/// the whole registry.
#[derive(Clone, Debug, PartialEq)]
pub enum ModChange {
    /// A mod's derived status changed
    StatusChanged {
        base_id: String,
        old: ModStatus,
        new: ModStatus,
    },

    /// A mod moved in the load order
    LoadOrderChanged {
        base_id: String,
        from: usize,
        to: usize,
    },
}

/// A mod and its status, for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModSummary {
    pub base_id: String,
    pub status: ModStatus,
}

/// One of the files written on save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Plugins,
    MainIni,
    LocalizedIni,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Destination::Plugins => "plugin list",
            Destination::MainIni => "main INI",
            Destination::LocalizedIni => "localized INI",
        };
        f.write_str(label)
    }
}

/// Result of writing one destination.
#[derive(Debug)]
pub struct DestinationOutcome {
    pub destination: Destination,
    pub path: Utf8PathBuf,
    pub result: Result<(), ModManagerError>,
}

/// Per-destination results of a save. Saves are not transactional: earlier
/// destinations stay written when a later one fails.
#[derive(Debug)]
pub struct SaveReport {
    pub outcomes: Vec<DestinationOutcome>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &DestinationOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn outcome(&self, destination: Destination) -> Option<&DestinationOutcome> {
        self.outcomes.iter().find(|o| o.destination == destination)
    }
}

/// Mod state for one run of the program.
///
/// Owns the [`ModRegistry`], the plugin list header and both INI documents.
/// All mutations go through the session so it can keep the dirty flag and
/// report [`ModChange`] events. The registry is rebuilt from the game files on
/// every load; nothing is cached between runs.
#[derive(Debug, Clone)]
pub struct ModSession {
    registry: ModRegistry,
    plugins_header: PluginsHeader,
    main_ini: ConfigDocument,
    localized_ini: ConfigDocument,
    layout: ArchiveLayout,
    dirty: bool,
}

impl ModSession {
    /// Build a session from already-read sources.
    pub fn from_sources<S: AsRef<str>>(
        file_names: &[S],
        plugins_text: &str,
        main_ini: ConfigDocument,
        localized_ini: ConfigDocument,
        layout: ArchiveLayout,
    ) -> Self {
        let discovery = discover_mods(file_names, plugins_text, &layout);
        let mut registry = discovery.registry;

        let counted = reconcile_archive_lists(&mut registry, &main_ini, &localized_ini, &layout);
        tracing::info!("Reconciled {} active archive declarations", counted);

        Self {
            registry,
            plugins_header: discovery.plugins_header,
            main_ini,
            localized_ini,
            layout,
            dirty: false,
        }
    }

    /// Read every source under `paths` and build a session.
    ///
    /// Fails if any source cannot be read; no session is produced from a
    /// partial set of sources.
    pub fn load(paths: &GamePaths, layout: ArchiveLayout) -> Result<Self, ModManagerError> {
        let file_names = game_files::list_data_files(&paths.data_dir())?;
        let plugins_text = game_files::read_text(&paths.plugins_file())?;
        let main_ini = game_files::read_document(&paths.main_ini())?;
        let localized_ini = game_files::read_document(&paths.localized_ini())?;

        Ok(Self::from_sources(
            &file_names,
            &plugins_text,
            main_ini,
            localized_ini,
            layout,
        ))
    }

    pub fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &ArchiveLayout {
        &self.layout
    }

    pub fn plugins_header(&self) -> &PluginsHeader {
        &self.plugins_header
    }

    pub fn document(&self, target: IniTarget) -> &ConfigDocument {
        match target {
            IniTarget::Main => &self.main_ini,
            IniTarget::Localized => &self.localized_ini,
        }
    }

    /// Whether anything changed since load or the last complete save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status_of(&self, base_id: &str) -> Option<ModStatus> {
        self.registry.find(base_id).map(|m| m.status())
    }

    /// Every mod with its status, in load order
    pub fn summaries(&self) -> Vec<ModSummary> {
        self.registry
            .iter()
            .map(|m| ModSummary {
                base_id: m.base_id().to_string(),
                status: m.status(),
            })
            .collect()
    }

    /// Apply a mutation to the registry and report what changed.
    ///
    /// The session becomes dirty when the registry differs afterwards.
    pub fn update<F>(&mut self, update_fn: F) -> Vec<ModChange>
    where
        F: FnOnce(&mut ModRegistry, &ArchiveLayout),
    {
        let old = self.registry.clone();

        update_fn(&mut self.registry, &self.layout);

        if self.registry != old {
            self.dirty = true;
        }
        Self::detect_changes(&old, &self.registry)
    }

    fn detect_changes(old: &ModRegistry, new: &ModRegistry) -> Vec<ModChange> {
        let mut changes = Vec::new();

        for (to, record) in new.iter().enumerate() {
            let Some(from) = old.position(record.base_id()) else {
                continue;
            };
            if from != to {
                changes.push(ModChange::LoadOrderChanged {
                    base_id: record.base_id().to_string(),
                    from,
                    to,
                });
            }
        }

        for record in new.iter() {
            let Some(previous) = old.find(record.base_id()) else {
                continue;
            };
            let (old_status, new_status) = (previous.status(), record.status());
            if old_status != new_status {
                changes.push(ModChange::StatusChanged {
                    base_id: record.base_id().to_string(),
                    old: old_status,
                    new: new_status,
                });
            }
        }

        changes
    }

    fn require(&self, base_id: &str) -> Result<(), ModManagerError> {
        match self.registry.find(base_id) {
            Some(_) => Ok(()),
            None => Err(ModManagerError::ModNotFound(base_id.to_string())),
        }
    }

    /// Activate a mod's plugin and all of its archives
    pub fn enable(&mut self, base_id: &str) -> Result<Vec<ModChange>, ModManagerError> {
        self.require(base_id)?;
        Ok(self.update(|registry, layout| {
            if let Some(record) = registry.find_mut(base_id) {
                record.enable(layout);
            }
        }))
    }

    /// Deactivate a mod's plugin and all of its archives
    pub fn disable(&mut self, base_id: &str) -> Result<Vec<ModChange>, ModManagerError> {
        self.require(base_id)?;
        Ok(self.update(|registry, _| {
            if let Some(record) = registry.find_mut(base_id) {
                record.disable();
            }
        }))
    }

    /// Disable an enabled mod; enable a disabled or partially enabled one
    pub fn toggle(&mut self, base_id: &str) -> Result<Vec<ModChange>, ModManagerError> {
        match self.status_of(base_id) {
            Some(ModStatus::Enabled) => self.disable(base_id),
            Some(_) => self.enable(base_id),
            None => Err(ModManagerError::ModNotFound(base_id.to_string())),
        }
    }

    /// Move a mod one step in the load order. Moving past either end is a no-op.
    pub fn move_mod(
        &mut self,
        base_id: &str,
        direction: Direction,
    ) -> Result<Vec<ModChange>, ModManagerError> {
        self.move_by(base_id, direction, 1)
    }

    /// Move a mod up to `steps` positions, one swap at a time, stopping at
    /// the end of the load order.
    pub fn move_by(
        &mut self,
        base_id: &str,
        direction: Direction,
        steps: usize,
    ) -> Result<Vec<ModChange>, ModManagerError> {
        self.require(base_id)?;
        Ok(self.update(|registry, _| {
            for _ in 0..steps {
                if registry.swap_adjacent(base_id, direction).is_none() {
                    break;
                }
            }
        }))
    }

    /// The plugin list as it would be written now
    pub fn render_plugins(&self) -> String {
        render_plugins_file(&self.plugins_header, &self.registry)
    }

    /// Write the plugin list and both INI documents.
    ///
    /// Every destination is attempted even when an earlier one fails. The
    /// dirty flag is cleared only if all of them were written.
    pub fn save(&mut self, paths: &GamePaths) -> SaveReport {
        apply_archive_lists(
            &self.registry,
            &mut self.main_ini,
            IniTarget::Main,
            &self.layout,
        );
        apply_archive_lists(
            &self.registry,
            &mut self.localized_ini,
            IniTarget::Localized,
            &self.layout,
        );

        let writes = [
            (
                Destination::Plugins,
                paths.plugins_file(),
                self.render_plugins(),
            ),
            (Destination::MainIni, paths.main_ini(), self.main_ini.render()),
            (
                Destination::LocalizedIni,
                paths.localized_ini(),
                self.localized_ini.render(),
            ),
        ];

        let outcomes: Vec<DestinationOutcome> = writes
            .into_iter()
            .map(|(destination, path, contents)| {
                let result = game_files::write_text(&path, &contents);
                if let Err(e) = &result {
                    tracing::warn!("Failed to save {}: {}", destination, e);
                }
                DestinationOutcome {
                    destination,
                    path,
                    result,
                }
            })
            .collect();

        let report = SaveReport { outcomes };
        if report.is_complete() {
            self.dirty = false;
            tracing::info!("Saved all changes");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    fn session() -> ModSession {
        let files = ["Alpha.esp", "Alpha - Textures.bsa", "Beta.esm", "Gamma.bsa"];
        let main = ConfigDocument::parse(
            "[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa, Gamma.bsa\n",
            Utf8Path::new("Skyrim.ini"),
        )
        .unwrap();
        ModSession::from_sources(
            &files,
            "# header\n*Beta.esm\nAlpha.esp\n",
            main,
            ConfigDocument::new(),
            ArchiveLayout::default(),
        )
    }

    #[test]
    fn test_new_session() {
        let session = session();
        assert!(!session.is_dirty());
        assert_eq!(session.registry().base_ids(), vec!["Beta", "Alpha", "Gamma"]);
        assert_eq!(
            session.summaries(),
            vec![
                ModSummary {
                    base_id: "Beta".to_string(),
                    status: ModStatus::Enabled
                },
                ModSummary {
                    base_id: "Alpha".to_string(),
                    status: ModStatus::Disabled
                },
                ModSummary {
                    base_id: "Gamma".to_string(),
                    status: ModStatus::Enabled
                },
            ]
        );
    }

    #[test]
    fn test_enable_reports_status_change() {
        let mut session = session();
        let changes = session.enable("Alpha").unwrap();

        assert_eq!(
            changes,
            vec![ModChange::StatusChanged {
                base_id: "Alpha".to_string(),
                old: ModStatus::Disabled,
                new: ModStatus::Enabled,
            }]
        );
        assert!(session.is_dirty());
    }

    #[test]
    fn test_noop_mutation_stays_clean() {
        let mut session = session();
        let changes = session.move_mod("Beta", Direction::Earlier).unwrap();
        assert!(changes.is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_move_reports_both_positions() {
        let mut session = session();
        let changes = session.move_mod("Alpha", Direction::Earlier).unwrap();

        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&ModChange::LoadOrderChanged {
            base_id: "Alpha".to_string(),
            from: 1,
            to: 0
        }));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_move_by_stops_at_end() {
        let mut session = session();
        session.move_by("Beta", Direction::Later, 10).unwrap();
        assert_eq!(session.registry().base_ids(), vec!["Alpha", "Gamma", "Beta"]);
    }

    #[test]
    fn test_toggle() {
        let mut session = session();
        session.toggle("Gamma").unwrap();
        assert_eq!(session.status_of("Gamma"), Some(ModStatus::Disabled));
        session.toggle("Gamma").unwrap();
        assert_eq!(session.status_of("Gamma"), Some(ModStatus::Enabled));
    }

    #[test]
    fn test_unknown_mod() {
        let mut session = session();
        assert!(matches!(
            session.enable("Nope"),
            Err(ModManagerError::ModNotFound(_))
        ));
        assert!(matches!(
            session.toggle("Nope"),
            Err(ModManagerError::ModNotFound(_))
        ));
    }

    #[test]
    fn test_render_plugins() {
        let mut session = session();
        session.enable("Alpha").unwrap();
        assert_eq!(session.render_plugins(), "# header\n*Beta.esm\n*Alpha.esp\n");
    }
}
