use crate::error::Result;
use minmatch::workflows::compare::{ComparisonReport, MoleculeComparison};
use std::path::Path;
use tracing::info;

/// Writes the summary table and one relative-energy file per molecule into
/// the output directory.
pub fn write_reports(report: &ComparisonReport, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;
    write_summary(report, &output_dir.join("summary.csv"))?;
    for molecule in &report.molecules {
        let filename = format!("relene_{}.csv", sanitize(&molecule.title));
        write_molecule(report, molecule, &output_dir.join(filename))?;
    }
    info!(
        molecules = report.molecules.len(),
        directory = %output_dir.display(),
        "Reports written"
    );
    Ok(())
}

/// Per-molecule relative energies in kcal/mol: one row per reference
/// conformer, one column per level of theory.
fn write_molecule(
    report: &ComparisonReport,
    molecule: &MoleculeComparison,
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["conformer".to_string()];
    header.extend(report.theories.iter().cloned());
    writer.write_record(&header)?;

    let conformer_count = molecule
        .relative_energies
        .first()
        .map(|row| row.len())
        .unwrap_or(0);
    for k in 0..conformer_count {
        let mut record = vec![k.to_string()];
        for row in &molecule.relative_energies {
            record.push(format!("{:.4}", row.get(k).copied().unwrap_or(f64::NAN)));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per (molecule, level of theory): zero-reference index, RMS error
/// against the reference file, and the time-ratio summary.
fn write_summary(report: &ComparisonReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "molecule",
        "level_of_theory",
        "zero_reference",
        "rms_error_kcal_mol",
        "time_ratio_mean",
        "time_ratio_stddev",
    ])?;

    for molecule in &report.molecules {
        for (file, theory) in report.theories.iter().enumerate() {
            let ratio = &molecule.time_ratios[file];
            writer.write_record(&[
                molecule.title.clone(),
                theory.clone(),
                molecule.zero_reference.to_string(),
                format!("{:.4}", molecule.rms_errors[file]),
                format!("{:.4}", ratio.mean),
                format!("{:.4}", ratio.stddev),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn sanitize(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minmatch::engine::stats::TimeRatio;

    fn sample_report() -> ComparisonReport {
        ComparisonReport {
            theories: vec!["mp2/6-31G*".to_string(), "b3lyp/6-31G*".to_string()],
            sources: vec!["ref.sdf".to_string(), "query.sdf".to_string()],
            molecules: vec![MoleculeComparison {
                title: "water (distilled)".to_string(),
                zero_reference: 1,
                relative_energies: vec![vec![0.5, 0.0], vec![f64::NAN, 0.0]],
                rms_errors: vec![0.0, f64::NAN],
                time_ratios: vec![
                    TimeRatio {
                        mean: 1.0,
                        stddev: 0.0,
                    },
                    TimeRatio {
                        mean: 1.5,
                        stddev: 0.25,
                    },
                ],
            }],
        }
    }

    #[test]
    fn reports_land_in_the_output_directory_with_sanitized_names() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(&sample_report(), dir.path()).unwrap();

        assert!(dir.path().join("summary.csv").exists());
        let molecule_file = dir.path().join("relene_water__distilled_.csv");
        assert!(molecule_file.exists());

        let content = std::fs::read_to_string(molecule_file).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("conformer,mp2/6-31G*,b3lyp/6-31G*"));
        assert_eq!(lines.next(), Some("0,0.5000,NaN"));
        assert_eq!(lines.next(), Some("1,0.0000,0.0000"));
    }

    #[test]
    fn summary_has_one_row_per_molecule_and_file() {
        let dir = tempfile::tempdir().unwrap();
        write_reports(&sample_report(), dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("water (distilled),mp2/6-31G*,1,0.0000,1.0000"));
        assert!(lines[2].contains("NaN"));
        assert!(lines[2].contains("1.5000"));
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("reports");
        write_reports(&sample_report(), &nested).unwrap();
        assert!(nested.join("summary.csv").exists());
    }
}
