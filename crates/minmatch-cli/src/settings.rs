use crate::error::{CliError, Result};
use minmatch::engine::config::{MatchConfig, MatchConfigBuilder};
use minmatch::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;

/// Optional settings loaded from a TOML file. Every field falls back to the
/// built-in default when absent; CLI flags override the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    pub rmsd_threshold: Option<f64>,
    pub automorphism_cap: Option<usize>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(CliError::Io)?;
        toml::from_str(&text).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the engine configuration, applying the CLI threshold override
    /// on top of the file values.
    pub fn into_config(self, threshold_override: Option<f64>) -> Result<MatchConfig> {
        let mut builder = MatchConfigBuilder::new();
        if let Some(threshold) = threshold_override.or(self.rmsd_threshold) {
            builder = builder.rmsd_threshold(threshold);
        }
        if let Some(cap) = self.automorphism_cap {
            builder = builder.automorphism_cap(cap);
        }
        builder
            .build()
            .map_err(|e| CliError::Engine(EngineError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_feed_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "rmsd-threshold = 0.8\nautomorphism-cap = 64\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        let config = settings.into_config(None).unwrap();
        assert_eq!(config.rmsd_threshold, 0.8);
        assert_eq!(config.automorphism_cap, 64);
    }

    #[test]
    fn cli_threshold_overrides_the_file() {
        let settings = Settings {
            rmsd_threshold: Some(0.8),
            automorphism_cap: None,
        };
        let config = settings.into_config(Some(0.3)).unwrap();
        assert_eq!(config.rmsd_threshold, 0.3);
    }

    #[test]
    fn absent_file_values_fall_back_to_defaults() {
        let config = Settings::default().into_config(None).unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "rmsd-treshold = 0.8\n").unwrap();

        let result = Settings::from_file(&path);
        assert!(matches!(result, Err(CliError::Settings { .. })));
    }

    #[test]
    fn invalid_threshold_surfaces_as_engine_error() {
        let settings = Settings {
            rmsd_threshold: Some(-1.0),
            automorphism_cap: None,
        };
        let result = settings.into_config(None);
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
