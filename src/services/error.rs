use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving mod state
#[derive(Error, Debug)]
pub enum ModManagerError {
    #[error("Failed to read {path}: {source}")]
    SourceUnavailable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    MalformedSource { path: Utf8PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    DestinationUnwritable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mod {0} not found")]
    ModNotFound(String),
}

impl ModManagerError {
    /// Whether this error means startup has to stop.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ModManagerError::SourceUnavailable { .. } | ModManagerError::MalformedSource { .. }
        )
    }
}
