//! # MinMatch Core Library
//!
//! A library for matching conformer minima across quantum-chemistry result
//! files and comparing their relative energies and optimization timings.
//!
//! Given a set of SDF result files, each holding the same molecules optimized
//! at a different level of theory, MinMatch associates every conformer of the
//! reference file (the first one) with its geometrically closest counterpart
//! in each of the other files, then derives relative conformer energies,
//! cross-file RMS errors, and wall-time ratios from the matched data.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers with a strict dependency order:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`,
//!   `MoleculeCollection`), pure geometry math (Kabsch superposition, overlay
//!   RMSD, bond-graph automorphisms), and SDF file I/O.
//!
//! - **[`engine`]: The Logic Core.** The minima-matching algorithm, the
//!   cross-file aligner that assembles match and scalar tables, the
//!   molecule-major table reorganizer, the relative-energy and timing
//!   statistics, and the snapshot cache for re-analysis without rematching.
//!
//! - **[`workflows`]: The Public API.** The user-facing entry point that ties
//!   the layers together into a complete comparison run and returns a
//!   per-molecule report ready for rendering or persistence.

pub mod core;
pub mod engine;
pub mod workflows;
