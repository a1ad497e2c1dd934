//! SkyMM - mod manager for Skyrim
//!
//! Command line entry point.
//!
//! # Overview
//!
//! Every run rebuilds the mod list from the game files:
//! - `Data/` under the content root (plugins and archives on disk)
//! - `Plugins` (load order and enabled plugins)
//! - `Skyrim.ini` and `Skyrim_<lang>.ini` (active archive lists)
//!
//! Mutating commands then write all three files back once.
//!
//! # Configuration Files
//!
//! Expected in `SkyMM Data/` (or `--config-dir`):
//! - `SkyMM Config.yaml`: content root, language, base archive id, debug mode
//!
//! Logs go to `<config dir>/logs/skymm.<date>`.

use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use skymm::{
    APP_NAME, ArchiveLayout, ConfigManager, Direction, GamePaths, ModChange, ModSession, VERSION,
};

#[derive(Parser)]
#[command(name = "skymm")]
#[command(about = "Enable, disable and reorder Skyrim mods")]
#[command(version)]
struct Cli {
    /// Directory holding SkyMM Config.yaml
    #[arg(long, default_value = "SkyMM Data")]
    config_dir: Utf8PathBuf,

    /// Content root holding Data/, Plugins and the game INIs
    #[arg(long)]
    romfs: Option<Utf8PathBuf>,

    /// Language code of the localized INI (Skyrim_<lang>.ini)
    #[arg(long)]
    language: Option<String>,

    /// Debug logging, also echoed to the console
    #[arg(long)]
    debug: bool,

    /// Print the regenerated plugin list instead of saving
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List mods in load order with their status
    List,
    /// Enable mods
    Enable {
        #[arg(required = true)]
        mods: Vec<String>,
    },
    /// Disable mods
    Disable {
        #[arg(required = true)]
        mods: Vec<String>,
    },
    /// Disable an enabled mod, enable anything else
    Toggle { name: String },
    /// Move a mod in the load order
    Move {
        name: String,
        /// Move towards the start of the load order
        #[arg(long, conflicts_with = "later", required_unless_present = "later")]
        earlier: bool,
        /// Move towards the end of the load order
        #[arg(long)]
        later: bool,
        /// Number of positions to move
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut user_config = config_manager.load_user_config()?;
    let settings = &mut user_config.skymm_settings;
    if let Some(romfs) = &cli.romfs {
        settings.romfs_dir = romfs.to_string();
    }
    if let Some(language) = &cli.language {
        settings.language = language.clone();
    }
    let debug_mode = cli.debug || settings.debug_mode;

    let log_dir = cli.config_dir.join("logs");
    let _guard = skymm::logging::setup_logging_with_console(
        log_dir.as_str(),
        "skymm",
        debug_mode,
        cli.debug,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let paths = GamePaths::new(&settings.romfs_dir, &settings.language);
    let layout = ArchiveLayout::skyrim(&settings.base_archive);
    let mut session = ModSession::load(&paths, layout)
        .with_context(|| format!("Failed to load mods from {}", paths.romfs_dir()))?;

    println!("Identified {} mods", session.registry().len());

    let changes = match &cli.command {
        Command::List => {
            print_listing(&session);
            return Ok(());
        }
        Command::Enable { mods } => {
            let mut changes = Vec::new();
            for name in mods {
                changes.extend(session.enable(name)?);
            }
            changes
        }
        Command::Disable { mods } => {
            let mut changes = Vec::new();
            for name in mods {
                changes.extend(session.disable(name)?);
            }
            changes
        }
        Command::Toggle { name } => session.toggle(name)?,
        Command::Move {
            name,
            earlier,
            steps,
            ..
        } => {
            let direction = if *earlier {
                Direction::Earlier
            } else {
                Direction::Later
            };
            session.move_by(name, direction, *steps)?
        }
    };

    for change in &changes {
        print_change(change);
    }

    if !session.is_dirty() {
        println!("No changes to save");
        return Ok(());
    }

    if cli.dry_run {
        print!("{}", session.render_plugins());
        return Ok(());
    }

    let report = session.save(&paths);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("Saved {} ({})", outcome.destination, outcome.path),
            Err(e) => println!("Failed to save {}: {}", outcome.destination, e),
        }
    }

    if !report.is_complete() {
        bail!(
            "{} of {} files could not be saved",
            report.failures().count(),
            report.outcomes.len()
        );
    }

    Ok(())
}

fn print_listing(session: &ModSession) {
    println!("Mod listing:\n");
    for summary in session.summaries() {
        println!("  - {} ({})", summary.base_id, summary.status);
    }
}

fn print_change(change: &ModChange) {
    match change {
        ModChange::StatusChanged { base_id, old, new } => {
            println!("{}: {} -> {}", base_id, old, new)
        }
        ModChange::LoadOrderChanged { base_id, from, to } => {
            println!("{}: position {} -> {}", base_id, from + 1, to + 1)
        }
    }
}
