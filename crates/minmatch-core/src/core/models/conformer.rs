use nalgebra::Point3;

/// One 3D arrangement of a molecule among its low-energy minima.
///
/// A conformer stores the Cartesian geometry of a single SDF record together
/// with the SD tag data attached to that record. The scalar quantities the
/// pipeline consumes (optimized energy, wall-clock runtime) live in those
/// tags and are extracted by [`crate::core::io::tags`].
#[derive(Debug, Clone)]
pub struct Conformer {
    index: usize,
    positions: Vec<Point3<f64>>,
    tags: Vec<(String, String)>,
}

impl Conformer {
    pub fn new(index: usize, positions: Vec<Point3<f64>>, tags: Vec<(String, String)>) -> Self {
        Self {
            index,
            positions,
            tags,
        }
    }

    /// Position of this conformer within its molecule, 0-based, in file order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cartesian coordinates in Angstroms, one point per atom.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }

    /// The value of the named SD tag, if the record carried it. The first
    /// occurrence wins when a tag name is repeated.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup_returns_first_occurrence() {
        let conformer = Conformer::new(
            0,
            vec![Point3::origin()],
            vec![
                ("energy".to_string(), "-100.0".to_string()),
                ("energy".to_string(), "-99.0".to_string()),
            ],
        );
        assert_eq!(conformer.tag("energy"), Some("-100.0"));
        assert_eq!(conformer.tag("missing"), None);
    }
}
