use super::aligner::MatchSet;
use super::matcher::MatchOutcome;

/// Which per-conformer scalar to pull out of a [`MatchSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Energy,
    Runtime,
}

/// A molecule-major scalar table, reindexed to reference-conformer order.
///
/// `values[molecule][file][k]` is the scalar of the query conformer matched
/// to reference conformer `k`, or NaN where the molecule is absent or the
/// conformer unmatched. Every innermost sequence has exactly the reference
/// molecule's conformer count, for every file.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    pub values: Vec<Vec<Vec<f64>>>,
}

impl AlignedTable {
    /// Rows (one per file) for the given molecule index.
    pub fn molecule(&self, index: usize) -> &[Vec<f64>] {
        &self.values[index]
    }

    pub fn num_molecules(&self) -> usize {
        self.values.len()
    }
}

/// Regroups the file-major [`MatchSet`] into a molecule-major table of the
/// chosen scalar, substituting NaN for every missing entry.
///
/// For reference conformer `k`: a self-reference entry reads the raw value
/// positionally (the file is the reference, so storage order is reference
/// order); a matched entry reads the raw value at the matched query index;
/// absent and unmatched entries become NaN.
pub fn realign(set: &MatchSet, kind: ScalarKind) -> AlignedTable {
    let mut values = Vec::with_capacity(set.num_molecules());
    for molecule in 0..set.num_molecules() {
        let conformer_count = set.reference_conformer_counts[molecule];
        let mut file_rows = Vec::with_capacity(set.num_files());
        for file in 0..set.num_files() {
            let entry = set.entry(file, molecule);
            let raw = match kind {
                ScalarKind::Energy => &entry.energies,
                ScalarKind::Runtime => &entry.times,
            };
            let row: Vec<f64> = (0..conformer_count)
                .map(|k| match entry.matches.get(k) {
                    Some(MatchOutcome::SelfReference) => {
                        raw.get(k).copied().unwrap_or(f64::NAN)
                    }
                    Some(MatchOutcome::MatchedAt(query_index)) => {
                        raw.get(*query_index).copied().unwrap_or(f64::NAN)
                    }
                    Some(MatchOutcome::AbsentMolecule)
                    | Some(MatchOutcome::Unmatched)
                    | None => f64::NAN,
                })
                .collect();
            file_rows.push(row);
        }
        values.push(file_rows);
    }
    AlignedTable { values }
}
