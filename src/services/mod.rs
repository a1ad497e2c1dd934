//! Services module - reconciliation of the game's mod state files.
//!
//! The game keeps mod state in three places that do not know about each other:
//! the plugin list (`Plugins`), the main INI (`Skyrim.ini`) and the localized INI
//! (`Skyrim_<lang>.ini`). These services turn them into one [`ModRegistry`](crate::models::ModRegistry)
//! and back.
//!
//! # Components
//!
//! - [`discover_mods`]: data directory listing + plugin list → registry in load order
//! - [`reconcile_archive_lists`]: archive lists → per-mod active archive counts
//! - [`render_plugins_file`] / [`apply_archive_lists`]: registry → plugin list text and
//!   updated INI documents
//! - [`ConfigDocument`]: the parsed INI documents
//! - [`GamePaths`] and the `game_files` helpers: where the files live, and reading/writing them
//!
//! Everything except `game_files` is pure: inputs are explicit parameters and nothing
//! touches the filesystem.

pub mod archive_lists;
pub mod config_document;
pub mod discovery;
pub mod error;
pub mod game_files;
pub mod write_back;

pub use archive_lists::{reconcile_archive_list, reconcile_archive_lists};
pub use config_document::ConfigDocument;
pub use discovery::{Discovery, PluginList, PluginsHeader, discover_mods};
pub use error::ModManagerError;
pub use game_files::GamePaths;
pub use write_back::{apply_archive_list, apply_archive_lists, render_plugins_file};
