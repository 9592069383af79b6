use super::conformer::Conformer;
use super::element::Element;

/// A molecule as read from one result file: a title, a bonding scaffold, and
/// an ordered set of conformers sharing that scaffold.
///
/// The title is the cross-file join key: molecules in different files are
/// considered the same compound exactly when their titles are equal. A
/// molecule is immutable once constructed; all derived tables in the engine
/// reference it read-only.
#[derive(Debug, Clone)]
pub struct Molecule {
    title: String,
    elements: Vec<Element>,
    bonds: Vec<(usize, usize)>,
    conformers: Vec<Conformer>,
}

impl Molecule {
    /// Assembles a molecule from its parts. Bonds are stored with the lower
    /// atom index first; conformer indices are renumbered to their position.
    pub fn new(
        title: String,
        elements: Vec<Element>,
        bonds: Vec<(usize, usize)>,
        conformers: Vec<Conformer>,
    ) -> Self {
        let bonds = bonds
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        let conformers = conformers
            .into_iter()
            .enumerate()
            .map(|(i, c)| Conformer::new(i, c.positions().to_vec(), c.tags().to_vec()))
            .collect();
        Self {
            title,
            elements,
            bonds,
            conformers,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Bonds as pairs of 0-based atom indices, lower index first.
    pub fn bonds(&self) -> &[(usize, usize)] {
        &self.bonds
    }

    pub fn conformers(&self) -> &[Conformer] {
        &self.conformers
    }

    pub fn num_conformers(&self) -> usize {
        self.conformers.len()
    }

    pub fn num_atoms(&self) -> usize {
        self.elements.len()
    }
}
