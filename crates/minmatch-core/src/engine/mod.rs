pub mod aligner;
pub mod config;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod reorganize;
pub mod snapshot;
pub mod stats;
