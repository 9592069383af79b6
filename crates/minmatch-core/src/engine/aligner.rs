use super::config::MatchConfig;
use super::error::EngineError;
use super::matcher::{self, MatchOutcome};
use super::progress::ProgressReporter;
use crate::core::io::tags;
use crate::core::models::collection::MoleculeCollection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Match and raw-scalar data for one molecule in one query file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeEntry {
    /// One outcome per reference conformer of the molecule.
    pub matches: Vec<MatchOutcome>,
    /// Raw energies in Hartree, one per conformer as stored in the query
    /// file (not yet reindexed to reference order). For an absent molecule
    /// this is a NaN sequence of the reference conformer count.
    pub energies: Vec<f64>,
    /// Raw optimization wall times in seconds, same layout as `energies`.
    pub times: Vec<f64>,
}

impl MoleculeEntry {
    fn absent(reference_conformer_count: usize) -> Self {
        Self {
            matches: vec![MatchOutcome::AbsentMolecule; reference_conformer_count],
            energies: vec![f64::NAN; reference_conformer_count],
            times: vec![f64::NAN; reference_conformer_count],
        }
    }
}

/// The complete output of the cross-file alignment stage.
///
/// Every (file, molecule) pair is addressed explicitly by file index and
/// reference-molecule index; molecule titles and reference conformer counts
/// are carried alongside so no stage needs to rely on interleaving order.
/// Serializable as the snapshot cache artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// Level-of-theory label per file, reference first.
    pub theories: Vec<String>,
    /// Display path per file, parallel to `theories`.
    pub sources: Vec<String>,
    /// Molecule titles in reference-file order.
    pub molecule_titles: Vec<String>,
    /// Conformer count of each reference molecule, parallel to
    /// `molecule_titles`.
    pub reference_conformer_counts: Vec<usize>,
    /// Entries indexed `[file][molecule]`.
    pub entries: Vec<Vec<MoleculeEntry>>,
}

impl MatchSet {
    pub fn num_files(&self) -> usize {
        self.entries.len()
    }

    pub fn num_molecules(&self) -> usize {
        self.molecule_titles.len()
    }

    pub fn entry(&self, file: usize, molecule: usize) -> &MoleculeEntry {
        &self.entries[file][molecule]
    }
}

/// Aligns every query file against the reference file (the first collection).
///
/// For each file and each reference molecule this produces either the
/// trivial self-match sequence (reference file), the absent-molecule
/// sentinel sequence (title not found in the query file), or the conformer
/// matcher's output; alongside, the raw energy and runtime tag values for
/// the file's declared level of theory. A molecule missing from a query
/// file never aborts the run.
pub fn align_files(
    collections: &[MoleculeCollection],
    theories: &[String],
    config: &MatchConfig,
    reporter: &ProgressReporter,
) -> Result<MatchSet, EngineError> {
    if collections.is_empty() {
        return Err(EngineError::EmptyFileList);
    }
    if collections.len() != theories.len() {
        return Err(EngineError::TheoryCountMismatch {
            files: collections.len(),
            theories: theories.len(),
        });
    }

    let reference = &collections[0];
    let molecule_titles: Vec<String> = reference
        .molecules()
        .iter()
        .map(|m| m.title().to_string())
        .collect();
    let reference_conformer_counts: Vec<usize> = reference
        .molecules()
        .iter()
        .map(|m| m.num_conformers())
        .collect();

    let mut entries = Vec::with_capacity(collections.len());
    for (file_index, (collection, theory)) in collections.iter().zip(theories).enumerate() {
        let (method, basis) =
            tags::parse_theory(theory).ok_or_else(|| EngineError::MalformedTheory {
                label: theory.clone(),
            })?;
        let energy_tag = tags::energy_tag(&method, &basis);
        let runtime_tag = tags::runtime_tag(&method, &basis);

        info!(
            file = %collection.source().display(),
            theory = %theory,
            "Aligning file against reference"
        );

        let mut file_entries = Vec::with_capacity(reference.len());
        for ref_molecule in reference.molecules() {
            let entry = match collection.by_title(ref_molecule.title()) {
                None => {
                    info!(
                        molecule = ref_molecule.title(),
                        file = %collection.source().display(),
                        "Molecule not found in query file"
                    );
                    MoleculeEntry::absent(ref_molecule.num_conformers())
                }
                Some(query) => {
                    let energies = tags::tag_values(query, &energy_tag);
                    let times = tags::tag_values(query, &runtime_tag);
                    let matches = if file_index == 0 {
                        vec![MatchOutcome::SelfReference; ref_molecule.num_conformers()]
                    } else {
                        debug!(
                            molecule = ref_molecule.title(),
                            reference_conformers = ref_molecule.num_conformers(),
                            query_conformers = query.num_conformers(),
                            "Matching conformer minima"
                        );
                        matcher::match_conformers(ref_molecule, query, config, reporter)
                    };
                    MoleculeEntry {
                        matches,
                        energies,
                        times,
                    }
                }
            };
            file_entries.push(entry);
        }
        entries.push(file_entries);
    }

    Ok(MatchSet {
        theories: theories.to_vec(),
        sources: collections
            .iter()
            .map(|c| c.source().display().to_string())
            .collect(),
        molecule_titles,
        reference_conformer_counts,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::conformer::Conformer;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Molecule;
    use nalgebra::Point3;
    use std::path::PathBuf;

    const THEORY: &str = "mp2/6-31G*";

    fn tagged_molecule(title: &str, geometries: &[f64], energies: &[f64]) -> Molecule {
        let energy_tag = tags::energy_tag("mp2", "6-31G*");
        let runtime_tag = tags::runtime_tag("mp2", "6-31G*");
        let conformers = geometries
            .iter()
            .zip(energies)
            .map(|(&spread, &energy)| {
                Conformer::new(
                    0,
                    vec![
                        Point3::new(0.0, 0.0, 0.0),
                        Point3::new(1.0 + spread, 0.0, 0.0),
                    ],
                    vec![
                        (energy_tag.clone(), energy.to_string()),
                        (runtime_tag.clone(), "10.0".to_string()),
                    ],
                )
            })
            .collect();
        Molecule::new(
            title.to_string(),
            vec![
                Element::from_symbol("O").unwrap(),
                Element::from_symbol("H").unwrap(),
            ],
            vec![(0, 1)],
            conformers,
        )
    }

    fn collection(name: &str, molecules: Vec<Molecule>) -> MoleculeCollection {
        MoleculeCollection::new(PathBuf::from(name), molecules)
    }

    #[test]
    fn reference_file_gets_self_match_sentinels() {
        let reference = collection(
            "ref.sdf",
            vec![tagged_molecule("water", &[0.0, 2.0], &[-100.0, -99.9])],
        );
        let set = align_files(
            std::slice::from_ref(&reference),
            &[THEORY.to_string()],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(set.num_files(), 1);
        assert_eq!(set.num_molecules(), 1);
        assert_eq!(set.reference_conformer_counts, vec![2]);
        assert_eq!(
            set.entry(0, 0).matches,
            vec![MatchOutcome::SelfReference, MatchOutcome::SelfReference]
        );
        assert_eq!(set.entry(0, 0).energies, vec![-100.0, -99.9]);
    }

    #[test]
    fn absent_molecule_yields_nan_sequences_of_reference_length() {
        let reference = collection(
            "ref.sdf",
            vec![
                tagged_molecule("water", &[0.0, 2.0, 4.0], &[-100.0, -99.9, -99.8]),
                tagged_molecule("ethanol", &[0.0], &[-50.0]),
            ],
        );
        let query = collection(
            "query.sdf",
            vec![tagged_molecule("ethanol", &[0.0], &[-50.1])],
        );

        let set = align_files(
            &[reference, query],
            &[THEORY.to_string(), THEORY.to_string()],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        let absent = set.entry(1, 0);
        assert_eq!(absent.matches, vec![MatchOutcome::AbsentMolecule; 3]);
        assert_eq!(absent.energies.len(), 3);
        assert!(absent.energies.iter().all(|e| e.is_nan()));
        assert!(absent.times.iter().all(|t| t.is_nan()));

        let present = set.entry(1, 1);
        assert_eq!(present.matches, vec![MatchOutcome::MatchedAt(0)]);
        assert_eq!(present.energies, vec![-50.1]);
    }

    #[test]
    fn query_conformers_match_by_geometry_not_position() {
        let reference = collection(
            "ref.sdf",
            vec![tagged_molecule("water", &[0.0, 2.0], &[-100.0, -99.9])],
        );
        // Same two geometries stored in reverse order in the query file.
        let query = collection(
            "query.sdf",
            vec![tagged_molecule("water", &[2.0, 0.0], &[-99.7, -100.2])],
        );

        let set = align_files(
            &[reference, query],
            &[THEORY.to_string(), THEORY.to_string()],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(
            set.entry(1, 0).matches,
            vec![MatchOutcome::MatchedAt(1), MatchOutcome::MatchedAt(0)]
        );
    }

    #[test]
    fn empty_input_and_label_mismatch_are_structural_errors() {
        let result = align_files(
            &[],
            &[],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::EmptyFileList)));

        let reference = collection(
            "ref.sdf",
            vec![tagged_molecule("water", &[0.0], &[-100.0])],
        );
        let result = align_files(
            std::slice::from_ref(&reference),
            &[],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::TheoryCountMismatch {
                files: 1,
                theories: 0
            })
        ));
    }

    #[test]
    fn malformed_theory_label_is_rejected() {
        let reference = collection(
            "ref.sdf",
            vec![tagged_molecule("water", &[0.0], &[-100.0])],
        );
        let result = align_files(
            std::slice::from_ref(&reference),
            &["mp2".to_string()],
            &MatchConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::MalformedTheory { label }) if label == "mp2"
        ));
    }
}
