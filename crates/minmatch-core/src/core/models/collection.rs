use super::molecule::Molecule;
use std::path::{Path, PathBuf};

/// The ordered molecules loaded from a single result file.
#[derive(Debug, Clone)]
pub struct MoleculeCollection {
    source: PathBuf,
    molecules: Vec<Molecule>,
}

impl MoleculeCollection {
    pub fn new(source: PathBuf, molecules: Vec<Molecule>) -> Self {
        Self { source, molecules }
    }

    /// The path this collection was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    /// Finds a molecule by exact title. The first match wins; duplicate
    /// titles within one file are not disambiguated.
    pub fn by_title(&self, title: &str) -> Option<&Molecule> {
        self.molecules.iter().find(|m| m.title() == title)
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }
}
