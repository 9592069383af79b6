use std::fmt;

static ATOMIC_NUMBERS: phf::Map<&'static str, u8> = phf::phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6,
    "N" => 7, "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12,
    "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30,
    "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42,
    "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
    "Cs" => 55, "Ba" => 56, "Pt" => 78, "Au" => 79, "Hg" => 80, "Pb" => 82,
};

/// A validated chemical element, identified by its canonical symbol.
///
/// Element identity participates in the symmetry-aware conformer comparison:
/// two atoms may only be exchanged by a bond-graph automorphism if their
/// elements agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    symbol: &'static str,
    atomic_number: u8,
}

impl Element {
    /// Looks up an element by symbol. Matching is case-insensitive on input
    /// ("CL", "cl", and "Cl" all resolve to chlorine); the canonical
    /// capitalization is stored.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let trimmed = symbol.trim();
        let (&key, &atomic_number) = ATOMIC_NUMBERS
            .entries()
            .find(|(key, _)| key.eq_ignore_ascii_case(trimmed))?;
        Some(Self {
            symbol: key,
            atomic_number,
        })
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    /// Whether this element is hydrogen. The conformer comparison includes
    /// hydrogens; this exists for callers that want to report heavy-atom
    /// counts.
    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_resolve_with_canonical_capitalization() {
        let cl = Element::from_symbol("CL").unwrap();
        assert_eq!(cl.symbol(), "Cl");
        assert_eq!(cl.atomic_number(), 17);

        let c = Element::from_symbol("c").unwrap();
        assert_eq!(c.symbol(), "C");
        assert_eq!(c.atomic_number(), 6);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let o = Element::from_symbol(" O ").unwrap();
        assert_eq!(o.symbol(), "O");
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        assert!(Element::from_symbol("Xx").is_none());
        assert!(Element::from_symbol("").is_none());
    }

    #[test]
    fn hydrogen_is_flagged() {
        assert!(Element::from_symbol("H").unwrap().is_hydrogen());
        assert!(!Element::from_symbol("C").unwrap().is_hydrogen());
    }
}
