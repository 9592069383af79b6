use minmatch::engine::error::EngineError;
use minmatch::engine::snapshot::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Invalid input list '{path}': {message}", path = path.display())]
    InputList { path: PathBuf, message: String },

    #[error("Failed to parse settings file '{path}': {source}", path = path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] csv::Error),
}
