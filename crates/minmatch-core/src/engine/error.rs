use thiserror::Error;

use super::config::ConfigError;
use super::snapshot::SnapshotError;
use crate::core::io::sdf::SdfError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] SdfError),

    #[error("Input file list is empty; at least the reference file is required")]
    EmptyFileList,

    #[error("File list has {files} entries but {theories} level-of-theory labels")]
    TheoryCountMismatch { files: usize, theories: usize },

    #[error("Malformed level-of-theory label '{label}': expected 'method/basis'")]
    MalformedTheory { label: String },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Snapshot error: {source}")]
    Snapshot {
        #[from]
        source: SnapshotError,
    },
}
