//! SD-tag naming and extraction for per-conformer scalar quantities.
//!
//! The upstream pipeline stamps each conformer record with the optimized
//! energy and the optimization wall time, under tag names that embed the
//! level of theory that produced them. A level of theory is written as a
//! `method/basis` label, e.g. `MP2/def2-TZVP` or `B3LYP-D3MBJ/6-311++G**`.

use crate::core::models::molecule::Molecule;

/// Splits a `method/basis` label into its parts, trimming whitespace.
/// `None` if the label has no `/` separator.
pub fn parse_theory(label: &str) -> Option<(String, String)> {
    let (method, basis) = label.split_once('/')?;
    let method = method.trim();
    let basis = basis.trim();
    if method.is_empty() || basis.is_empty() {
        return None;
    }
    Some((method.to_string(), basis.to_string()))
}

/// Tag carrying the optimized energy in Hartree for the given level of theory.
pub fn energy_tag(method: &str, basis: &str) -> String {
    format!("QM Psi4 Final Opt. Energy (Har) {}/{}", method, basis)
}

/// Tag carrying the optimization wall time in seconds for the given level of theory.
pub fn runtime_tag(method: &str, basis: &str) -> String {
    format!("QM Psi4 Opt. Runtime (sec) {}/{}", method, basis)
}

/// Extracts one float per conformer for the named tag, in conformer order.
///
/// A conformer that lacks the tag, or whose value does not parse as a float,
/// contributes NaN. Missing data is recoverable by design: downstream
/// statistics mask NaN entries rather than failing.
pub fn tag_values(molecule: &Molecule, tag: &str) -> Vec<f64> {
    molecule
        .conformers()
        .iter()
        .map(|conformer| {
            conformer
                .tag(tag)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        })
        .collect()
}
