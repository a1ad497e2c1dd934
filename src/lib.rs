// SkyMM - Mod manager for Skyrim plugin load order and archive lists
//
// This is the library crate containing the reconciliation logic and data structures.
// The binary crate (main.rs) provides the command line entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ArchiveLayout, Direction, ModRecord, ModRegistry, ModStatus, UserConfig};
pub use services::{GamePaths, ModManagerError};
pub use state::{ModChange, ModSession, SaveReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
