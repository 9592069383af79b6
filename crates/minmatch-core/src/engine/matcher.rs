use super::config::MatchConfig;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::molecule::Molecule;
use crate::core::utils::{geometry, symmetry};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The association of one reference conformer with a query file's conformers.
///
/// One outcome is produced per reference conformer. `MatchedAt(k)` means
/// query conformer `k` is the geometrically closest within the threshold;
/// the other variants record why no index is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The query file is the reference file itself; every reference
    /// conformer trivially matches its own position.
    SelfReference,
    /// The molecule has no counterpart in the query file.
    AbsentMolecule,
    /// The molecule is present, but no query conformer scored within the
    /// RMSD threshold for this reference conformer.
    Unmatched,
    /// Query conformer at this index is the best match.
    MatchedAt(usize),
}

impl MatchOutcome {
    /// Whether this outcome contributes no data (absent or unmatched).
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::AbsentMolecule | Self::Unmatched)
    }

    pub fn matched_index(&self) -> Option<usize> {
        match self {
            Self::MatchedAt(index) => Some(*index),
            _ => None,
        }
    }
}

/// Matches every conformer of `reference` against the conformers of `query`.
///
/// For each reference conformer the symmetry-aware dissimilarity (minimum
/// overlay RMSD over the query's bond-graph automorphisms, hydrogens
/// included) is computed against every query conformer. The lowest-scoring
/// query conformer wins if its score is within the configured threshold;
/// exact ties resolve to the lowest query index. One `MatchTick` progress
/// event is emitted per reference conformer.
pub fn match_conformers(
    reference: &Molecule,
    query: &Molecule,
    config: &MatchConfig,
    reporter: &ProgressReporter,
) -> Vec<MatchOutcome> {
    let permutations = symmetry::automorphisms(query, config.automorphism_cap);
    reporter.report(Progress::MatchStart {
        total_conformers: reference.num_conformers() as u64,
    });

    let mut outcomes = Vec::with_capacity(reference.num_conformers());
    let mut scratch = Vec::with_capacity(query.num_atoms());

    for ref_conformer in reference.conformers() {
        let mut best: Option<(usize, f64)> = None;
        for (query_index, query_conformer) in query.conformers().iter().enumerate() {
            let score = dissimilarity(
                ref_conformer.positions(),
                query_conformer.positions(),
                &permutations,
                &mut scratch,
            );
            if let Some(score) = score {
                // Strict comparison keeps the lowest index on exact ties.
                match best {
                    Some((_, best_score)) if score >= best_score => {}
                    _ => best = Some((query_index, score)),
                }
            }
        }

        let outcome = match best {
            Some((query_index, score)) if score <= config.rmsd_threshold => {
                MatchOutcome::MatchedAt(query_index)
            }
            Some((_, score)) => {
                debug!(
                    molecule = query.title(),
                    reference_conformer = ref_conformer.index(),
                    best_rmsd = score,
                    threshold = config.rmsd_threshold,
                    "No conformer within threshold"
                );
                MatchOutcome::Unmatched
            }
            None => MatchOutcome::Unmatched,
        };
        outcomes.push(outcome);
        reporter.report(Progress::MatchTick);
    }

    reporter.report(Progress::MatchFinish);
    outcomes
}

/// Minimum overlay RMSD between two conformer geometries over the given atom
/// permutations. `None` when the geometries are incomparable (different atom
/// counts or empty).
fn dissimilarity(
    reference: &[Point3<f64>],
    query: &[Point3<f64>],
    permutations: &[Vec<usize>],
    scratch: &mut Vec<Point3<f64>>,
) -> Option<f64> {
    if permutations.is_empty() {
        return geometry::overlay_rmsd(reference, query);
    }
    let mut best: Option<f64> = None;
    for permutation in permutations {
        if permutation.len() != query.len() {
            continue;
        }
        scratch.clear();
        scratch.extend(permutation.iter().map(|&j| query[j]));
        if let Some(score) = geometry::overlay_rmsd(reference, scratch) {
            best = Some(match best {
                Some(current) if current <= score => current,
                _ => score,
            });
        }
    }
    best
}
