//! Physical and algorithmic constants shared across the library.

/// Conversion factor from Hartree to kcal/mol.
pub const HARTREE_TO_KCAL_PER_MOL: f64 = 627.5095;

/// Default RMSD threshold in Angstroms. Two conformers whose best overlay
/// RMSD exceeds this value are not considered the same minimum.
pub const DEFAULT_RMSD_THRESHOLD: f64 = 0.5;

/// Default upper bound on enumerated bond-graph automorphisms per molecule.
/// Highly symmetric graphs can have a combinatorial number of automorphisms;
/// enumeration stops once this many have been collected.
pub const DEFAULT_AUTOMORPHISM_CAP: usize = 4096;
