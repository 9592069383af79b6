//! Persistence of the alignment stage's output.
//!
//! Matching is the expensive part of a run; the [`MatchSet`] it produces is
//! enough to regenerate every downstream statistic. Saving and reloading a
//! snapshot therefore skips rematching entirely while reproducing identical
//! results.

use super::aligner::MatchSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bumped whenever the serialized layout of [`MatchSet`] changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error for snapshot '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode snapshot '{path}': {source}", path = path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("Failed to decode snapshot '{path}': {source}", path = path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error(
        "Snapshot '{path}' has version {found}, expected {expected}; re-run without the cache",
        path = path.display()
    )]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

pub fn save(set: &MatchSet, path: &Path) -> Result<(), SnapshotError> {
    let file = File::create(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &SNAPSHOT_VERSION).map_err(|source| {
        SnapshotError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    bincode::serialize_into(&mut writer, set).map_err(|source| SnapshotError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<MatchSet, SnapshotError> {
    let file = File::open(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let version: u32 =
        bincode::deserialize_from(&mut reader).map_err(|source| SnapshotError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            path: path.to_path_buf(),
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }
    bincode::deserialize_from(&mut reader).map_err(|source| SnapshotError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aligner::MoleculeEntry;
    use crate::engine::matcher::MatchOutcome;

    fn sample_set() -> MatchSet {
        MatchSet {
            theories: vec!["mp2/6-31G*".to_string(), "b3lyp/6-31G*".to_string()],
            sources: vec!["ref.sdf".to_string(), "query.sdf".to_string()],
            molecule_titles: vec!["water".to_string()],
            reference_conformer_counts: vec![2],
            entries: vec![
                vec![MoleculeEntry {
                    matches: vec![MatchOutcome::SelfReference; 2],
                    energies: vec![-100.0, -99.9],
                    times: vec![10.0, 20.0],
                }],
                vec![MoleculeEntry {
                    matches: vec![MatchOutcome::MatchedAt(1), MatchOutcome::Unmatched],
                    energies: vec![-99.95, -100.05],
                    times: vec![12.0, f64::NAN],
                }],
            ],
        }
    }

    #[test]
    fn round_trip_preserves_values_sentinels_and_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.bin");

        let original = sample_set();
        save(&original, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.theories, original.theories);
        assert_eq!(restored.molecule_titles, original.molecule_titles);
        assert_eq!(restored.reference_conformer_counts, vec![2]);
        assert_eq!(restored.entry(1, 0).matches, original.entry(1, 0).matches);
        assert_eq!(restored.entry(1, 0).energies, original.entry(1, 0).energies);
        assert_eq!(restored.entry(1, 0).times[0], 12.0);
        assert!(restored.entry(1, 0).times[1].is_nan());
    }

    #[test]
    fn version_mismatch_is_detected_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.bin");

        let file = File::create(&path).unwrap();
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &99u32).unwrap();
        bincode::serialize_into(&mut writer, &sample_set()).unwrap();
        drop(writer);

        let result = load(&path);
        assert!(matches!(
            result,
            Err(SnapshotError::VersionMismatch {
                found: 99,
                expected: SNAPSHOT_VERSION,
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load(Path::new("/nonexistent/match.bin"));
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }
}
