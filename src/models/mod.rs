//! Data models for SkyMM.
//!
//! - [`ModFile`]: typed view of a file name (plugin, archive or unrecognized)
//! - [`ModRecord`]: everything known about one mod, and its [`ModStatus`]
//! - [`ModRegistry`]: the ordered set of mods; order is load order
//! - [`ArchiveLayout`]: which INI keys hold which archive subcategories
//! - [`UserConfig`]: user settings loaded from `SkyMM Config.yaml`

pub mod archive_layout;
pub mod config;
pub mod mod_file;
pub mod mod_record;
pub mod registry;

pub use archive_layout::{ArchiveLayout, ArchiveList, IniTarget};
pub use config::{SkymmSettings, UserConfig};
pub use mod_file::{FileCategory, ModFile};
pub use mod_record::{ModRecord, ModStatus};
pub use registry::{Direction, ModRegistry};
