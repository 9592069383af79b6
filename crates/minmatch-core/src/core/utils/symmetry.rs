use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;

/// Enumerates automorphisms of a molecule's element-labeled bond graph.
///
/// An automorphism is a permutation of atom indices that maps every atom to
/// one of the same element and preserves the bond relation exactly. The
/// conformer matcher scores a candidate pair under every automorphism so
/// that chemically equivalent relabelings (e.g. the three hydrogens of a
/// methyl group) do not inflate the dissimilarity.
///
/// Each returned permutation `perm` maps atom index `i` to `perm[i]`. The
/// identity is always present. Enumeration stops once `cap` permutations
/// have been collected; for highly symmetric graphs the prefix found within
/// the cap is used.
pub fn automorphisms(molecule: &Molecule, cap: usize) -> Vec<Vec<usize>> {
    let n = molecule.num_atoms();
    if n == 0 || cap == 0 {
        return Vec::new();
    }

    let mut adjacency = vec![vec![false; n]; n];
    let mut degree = vec![0usize; n];
    for &(a, b) in molecule.bonds() {
        if a < n && b < n && a != b {
            adjacency[a][b] = true;
            adjacency[b][a] = true;
            degree[a] += 1;
            degree[b] += 1;
        }
    }

    let elements = molecule.elements();
    let mut perm = Vec::with_capacity(n);
    let mut used = vec![false; n];
    let mut found = Vec::new();

    extend(
        &mut perm,
        &mut used,
        &mut found,
        elements,
        &adjacency,
        &degree,
        cap,
    );
    found
}

fn extend(
    perm: &mut Vec<usize>,
    used: &mut [bool],
    found: &mut Vec<Vec<usize>>,
    elements: &[Element],
    adjacency: &[Vec<bool>],
    degree: &[usize],
    cap: usize,
) {
    if found.len() >= cap {
        return;
    }
    let i = perm.len();
    if i == elements.len() {
        found.push(perm.clone());
        return;
    }

    for j in 0..elements.len() {
        if used[j] || elements[j] != elements[i] || degree[j] != degree[i] {
            continue;
        }
        // The partial map must preserve adjacency and non-adjacency alike.
        if (0..i).any(|k| adjacency[i][k] != adjacency[j][perm[k]]) {
            continue;
        }

        perm.push(j);
        used[j] = true;
        extend(perm, used, found, elements, adjacency, degree, cap);
        used[j] = false;
        perm.pop();

        if found.len() >= cap {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;

    fn molecule(symbols: &[&str], bonds: &[(usize, usize)]) -> Molecule {
        let elements = symbols
            .iter()
            .map(|s| Element::from_symbol(s).unwrap())
            .collect();
        Molecule::new("test".to_string(), elements, bonds.to_vec(), Vec::new())
    }

    #[test]
    fn water_has_identity_and_hydrogen_swap() {
        let water = molecule(&["O", "H", "H"], &[(0, 1), (0, 2)]);
        let mut perms = automorphisms(&water, usize::MAX);
        perms.sort();
        assert_eq!(perms, vec![vec![0, 1, 2], vec![0, 2, 1]]);
    }

    #[test]
    fn methane_hydrogens_permute_freely() {
        let methane = molecule(&["C", "H", "H", "H", "H"], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let perms = automorphisms(&methane, usize::MAX);
        assert_eq!(perms.len(), 24);
        assert!(perms.iter().all(|p| p[0] == 0));
    }

    #[test]
    fn distinct_elements_pin_the_mapping() {
        let chain = molecule(&["C", "C", "O"], &[(0, 1), (1, 2)]);
        let perms = automorphisms(&chain, usize::MAX);
        assert_eq!(perms, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn enumeration_respects_the_cap() {
        let methane = molecule(&["C", "H", "H", "H", "H"], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let perms = automorphisms(&methane, 5);
        assert_eq!(perms.len(), 5);
    }

    #[test]
    fn empty_molecule_yields_no_permutations() {
        let empty = molecule(&[], &[]);
        assert!(automorphisms(&empty, usize::MAX).is_empty());
    }
}
