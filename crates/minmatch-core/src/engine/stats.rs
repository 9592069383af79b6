//! Relative-energy and timing statistics over aligned, NaN-masked tables.
//!
//! Every function here operates on the rows of a single molecule: a slice of
//! per-file sequences, each already reindexed to reference-conformer order.
//! Missing data is NaN and is masked out of the folds rather than raised.

use crate::core::constants::HARTREE_TO_KCAL_PER_MOL;

/// Mean and population standard deviation of a file's conformer time ratios
/// against the reference file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRatio {
    pub mean: f64,
    pub stddev: f64,
}

/// For each conformer position, the number of files whose value is NaN.
/// Positions beyond a short row count as NaN for that file.
pub fn nan_counts(file_rows: &[Vec<f64>]) -> Vec<usize> {
    let positions = file_rows.first().map(|row| row.len()).unwrap_or(0);
    (0..positions)
        .map(|k| {
            file_rows
                .iter()
                .filter(|row| row.get(k).is_none_or(|v| v.is_nan()))
                .count()
        })
        .collect()
}

/// The conformer position to use as the energy baseline: the one with the
/// fewest NaN values across files, ties resolved to the smallest index.
/// `None` only for an empty count vector.
pub fn zero_reference(counts: &[usize]) -> Option<usize> {
    let minimum = counts.iter().min()?;
    counts.iter().position(|c| c == minimum)
}

/// Per-file relative energies in kcal/mol against the conformer at `zero`.
///
/// Each file is referenced to its own value at the zero position; a NaN
/// baseline propagates NaN through that file's whole row rather than
/// failing.
pub fn relative_energies(file_rows: &[Vec<f64>], zero: usize) -> Vec<Vec<f64>> {
    file_rows
        .iter()
        .map(|row| {
            let baseline = row.get(zero).copied().unwrap_or(f64::NAN);
            row.iter()
                .map(|&energy| HARTREE_TO_KCAL_PER_MOL * (energy - baseline))
                .collect()
        })
        .collect()
}

/// Per-file RMS error of relative energies against the first (reference)
/// file's row.
///
/// The zero-reference position (identically 0 in every row) and NaN entries
/// are dropped before averaging; a file with nothing left yields NaN.
pub fn rms_errors(relative: &[Vec<f64>], zero: usize) -> Vec<f64> {
    let Some(reference_row) = relative.first() else {
        return Vec::new();
    };
    relative
        .iter()
        .map(|row| {
            let squared: Vec<f64> = row
                .iter()
                .zip(reference_row)
                .enumerate()
                .filter(|(k, _)| *k != zero)
                .map(|(_, (value, reference))| {
                    let difference = value - reference;
                    difference * difference
                })
                .filter(|sq| !sq.is_nan())
                .collect();
            nan_mean(&squared).sqrt()
        })
        .collect()
}

/// Per-file time ratios against the first (reference) file: each conformer's
/// runtime divided by the reference runtime at the same aligned position,
/// NaN ratios dropped, summarized as mean and population standard deviation.
pub fn time_ratios(file_rows: &[Vec<f64>]) -> Vec<TimeRatio> {
    let Some(reference_row) = file_rows.first() else {
        return Vec::new();
    };
    file_rows
        .iter()
        .map(|row| {
            let ratios: Vec<f64> = row
                .iter()
                .zip(reference_row)
                .map(|(time, reference)| time / reference)
                .filter(|ratio| !ratio.is_nan())
                .collect();
            let mean = nan_mean(&ratios);
            let variance = nan_mean(
                &ratios
                    .iter()
                    .map(|ratio| (ratio - mean) * (ratio - mean))
                    .collect::<Vec<_>>(),
            );
            TimeRatio {
                mean,
                stddev: variance.sqrt(),
            }
        })
        .collect()
}

/// Arithmetic mean; NaN for an empty slice (the empty-mean policy every
/// statistic above relies on).
fn nan_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
