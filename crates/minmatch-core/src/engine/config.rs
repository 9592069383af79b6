use crate::core::constants::{DEFAULT_AUTOMORPHISM_CAP, DEFAULT_RMSD_THRESHOLD};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for {parameter}: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },
}

/// Settings for the minima-matching stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Overlay-RMSD threshold in Angstroms; a reference conformer whose best
    /// candidate scores above this is left unmatched.
    pub rmsd_threshold: f64,
    /// Upper bound on enumerated bond-graph automorphisms per molecule.
    pub automorphism_cap: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rmsd_threshold: DEFAULT_RMSD_THRESHOLD,
            automorphism_cap: DEFAULT_AUTOMORPHISM_CAP,
        }
    }
}

#[derive(Debug, Default)]
pub struct MatchConfigBuilder {
    rmsd_threshold: Option<f64>,
    automorphism_cap: Option<usize>,
}

impl MatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rmsd_threshold(mut self, threshold: f64) -> Self {
        self.rmsd_threshold = Some(threshold);
        self
    }

    pub fn automorphism_cap(mut self, cap: usize) -> Self {
        self.automorphism_cap = Some(cap);
        self
    }

    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        let rmsd_threshold = self.rmsd_threshold.unwrap_or(DEFAULT_RMSD_THRESHOLD);
        if !rmsd_threshold.is_finite() || rmsd_threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "rmsd_threshold",
                message: format!("must be a positive finite number, got {}", rmsd_threshold),
            });
        }
        let automorphism_cap = self.automorphism_cap.unwrap_or(DEFAULT_AUTOMORPHISM_CAP);
        if automorphism_cap == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "automorphism_cap",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(MatchConfig {
            rmsd_threshold,
            automorphism_cap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_the_shared_constants() {
        let config = MatchConfigBuilder::new().build().unwrap();
        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.rmsd_threshold, 0.5);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = MatchConfigBuilder::new()
            .rmsd_threshold(0.75)
            .automorphism_cap(16)
            .build()
            .unwrap();
        assert_eq!(config.rmsd_threshold, 0.75);
        assert_eq!(config.automorphism_cap, 16);
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let result = MatchConfigBuilder::new().rmsd_threshold(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                parameter: "rmsd_threshold",
                ..
            })
        ));
    }

    #[test]
    fn zero_automorphism_cap_is_rejected() {
        let result = MatchConfigBuilder::new().automorphism_cap(0).build();
        assert!(result.is_err());
    }
}
