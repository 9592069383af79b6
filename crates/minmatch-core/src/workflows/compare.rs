use crate::core::io::sdf;
use crate::engine::aligner::{self, MatchSet};
use crate::engine::config::MatchConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reorganize::{self, ScalarKind};
use crate::engine::stats::{self, TimeRatio};
use std::path::PathBuf;
use tracing::{info, instrument};

/// One result file to analyze: its path and the level of theory that
/// produced it.
#[derive(Debug, Clone)]
pub struct CompareInput {
    pub path: PathBuf,
    pub theory: String,
}

/// Derived statistics for one molecule.
#[derive(Debug, Clone)]
pub struct MoleculeComparison {
    pub title: String,
    /// Reference-conformer position used as the energy baseline.
    pub zero_reference: usize,
    /// Relative energies in kcal/mol, indexed `[file][conformer]`, NaN for
    /// missing entries.
    pub relative_energies: Vec<Vec<f64>>,
    /// RMS error of each file's relative energies against the reference
    /// file's; trivially 0 for the reference itself.
    pub rms_errors: Vec<f64>,
    /// Wall-time ratio summary of each file against the reference file.
    pub time_ratios: Vec<TimeRatio>,
}

/// The complete result of a comparison run, ready for reporting.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub theories: Vec<String>,
    pub sources: Vec<String>,
    pub molecules: Vec<MoleculeComparison>,
}

/// Runs the full comparison: load every file, match all minima against the
/// reference file (the first input), and derive the statistics.
///
/// Returns the raw [`MatchSet`] alongside the report so callers can persist
/// it as a snapshot and later recompute with [`analyze`] alone.
#[instrument(skip_all, name = "compare_workflow")]
pub fn run(
    inputs: &[CompareInput],
    config: &MatchConfig,
    reporter: &ProgressReporter,
) -> Result<(MatchSet, ComparisonReport), EngineError> {
    if inputs.is_empty() {
        return Err(EngineError::EmptyFileList);
    }

    reporter.report(Progress::PhaseStart {
        name: "Loading Files",
    });
    info!(files = inputs.len(), "Loading result files");
    let collections = inputs
        .iter()
        .map(|input| sdf::read_sdf(&input.path))
        .collect::<Result<Vec<_>, _>>()?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Matching Minima",
    });
    let theories: Vec<String> = inputs.iter().map(|input| input.theory.clone()).collect();
    let set = aligner::align_files(&collections, &theories, config, reporter)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Aggregating Statistics",
    });
    let report = analyze(&set);
    reporter.report(Progress::PhaseFinish);

    info!(
        molecules = report.molecules.len(),
        files = set.num_files(),
        "Comparison complete"
    );
    Ok((set, report))
}

/// Derives the full statistics from an alignment result. Pure with respect
/// to the filesystem, so a snapshot loaded from disk reproduces identical
/// output.
pub fn analyze(set: &MatchSet) -> ComparisonReport {
    let energies = reorganize::realign(set, ScalarKind::Energy);
    let times = reorganize::realign(set, ScalarKind::Runtime);

    let molecules = set
        .molecule_titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let energy_rows = energies.molecule(index);
            let zero_reference =
                stats::zero_reference(&stats::nan_counts(energy_rows)).unwrap_or(0);
            let relative_energies = stats::relative_energies(energy_rows, zero_reference);
            let rms_errors = stats::rms_errors(&relative_energies, zero_reference);
            let time_ratios = stats::time_ratios(times.molecule(index));
            MoleculeComparison {
                title: title.clone(),
                zero_reference,
                relative_energies,
                rms_errors,
                time_ratios,
            }
        })
        .collect();

    ComparisonReport {
        theories: set.theories.clone(),
        sources: set.sources.clone(),
        molecules,
    }
}
