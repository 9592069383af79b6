use crate::core::models::collection::MoleculeCollection;
use crate::core::models::conformer::Conformer;
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error in '{path}' on line {line}: {kind}", path = path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        kind: SdfParseErrorKind,
    },
    #[error(
        "Conformer records for '{title}' in '{path}' disagree on atoms or bonds (line {line})",
        path = path.display()
    )]
    ConformerMismatch {
        path: PathBuf,
        title: String,
        line: usize,
    },
    #[error("No molecule records found in '{path}'", path = path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum SdfParseErrorKind {
    #[error("Invalid integer in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Bond references atom {serial}, but the record has {atom_count} atoms")]
    BondOutOfRange { serial: usize, atom_count: usize },
    #[error("Record is truncated")]
    TruncatedRecord,
    #[error("Record has no 'M  END' terminator")]
    MissingMolEnd,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reads an MDL SDF (V2000) file into a [`MoleculeCollection`].
///
/// Consecutive records that share a title are treated as conformers of one
/// molecule; their atom elements and bond lists must agree exactly. This
/// mirrors how multi-conformer result files are written by the upstream
/// pipeline: one record per optimized conformer, grouped by compound.
pub fn read_sdf(path: &Path) -> Result<MoleculeCollection, SdfError> {
    let file = File::open(path).map_err(|source| SdfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let molecules = parse_sdf(BufReader::new(file), path)?;
    Ok(MoleculeCollection::new(path.to_path_buf(), molecules))
}

/// Parses SDF records from a reader. Exposed separately from [`read_sdf`] so
/// in-memory sources can be parsed directly.
pub fn parse_sdf(reader: impl BufRead, path: &Path) -> Result<Vec<Molecule>, SdfError> {
    let lines: Vec<String> = reader
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|source| SdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut molecules = Vec::new();
    let mut group: Option<RecordGroup> = None;
    let mut cursor = 0usize;

    while let Some(record) = parse_record(&lines, &mut cursor, path)? {
        match group.as_mut() {
            Some(current) if current.title == record.title => {
                if current.elements != record.elements || current.bonds != record.bonds {
                    return Err(SdfError::ConformerMismatch {
                        path: path.to_path_buf(),
                        title: record.title,
                        line: record.first_line,
                    });
                }
                current
                    .conformers
                    .push(Conformer::new(0, record.positions, record.tags));
            }
            _ => {
                if let Some(finished) = group.take() {
                    molecules.push(finished.into_molecule());
                }
                group = Some(RecordGroup {
                    title: record.title,
                    elements: record.elements,
                    bonds: record.bonds,
                    conformers: vec![Conformer::new(0, record.positions, record.tags)],
                });
            }
        }
    }
    if let Some(finished) = group.take() {
        molecules.push(finished.into_molecule());
    }

    if molecules.is_empty() {
        return Err(SdfError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(molecules)
}

struct RecordGroup {
    title: String,
    elements: Vec<Element>,
    bonds: Vec<(usize, usize)>,
    conformers: Vec<Conformer>,
}

impl RecordGroup {
    fn into_molecule(self) -> Molecule {
        Molecule::new(self.title, self.elements, self.bonds, self.conformers)
    }
}

struct RawRecord {
    title: String,
    first_line: usize,
    elements: Vec<Element>,
    bonds: Vec<(usize, usize)>,
    positions: Vec<Point3<f64>>,
    tags: Vec<(String, String)>,
}

fn parse_record(
    lines: &[String],
    cursor: &mut usize,
    path: &Path,
) -> Result<Option<RawRecord>, SdfError> {
    // Trailing blank lines after the last record are not another record.
    while *cursor < lines.len() && lines[*cursor].trim().is_empty() {
        *cursor += 1;
    }
    if *cursor >= lines.len() {
        return Ok(None);
    }

    let first_line = *cursor + 1;
    let parse_error = |line: usize, kind: SdfParseErrorKind| SdfError::Parse {
        path: path.to_path_buf(),
        line,
        kind,
    };

    if lines.len() - *cursor < 4 {
        return Err(parse_error(first_line, SdfParseErrorKind::TruncatedRecord));
    }

    let title = lines[*cursor].trim().to_string();
    let counts_index = *cursor + 3;
    let counts_line = &lines[counts_index];
    let atom_count = parse_usize(counts_line, 0, 3, counts_index + 1, path)?;
    let bond_count = parse_usize(counts_line, 3, 6, counts_index + 1, path)?;

    let atoms_start = counts_index + 1;
    let bonds_start = atoms_start + atom_count;
    if bonds_start + bond_count > lines.len() {
        return Err(parse_error(first_line, SdfParseErrorKind::TruncatedRecord));
    }

    let mut elements = Vec::with_capacity(atom_count);
    let mut positions = Vec::with_capacity(atom_count);
    for index in atoms_start..bonds_start {
        let line = &lines[index];
        let x = parse_f64(line, 0, 10, index + 1, path)?;
        let y = parse_f64(line, 10, 20, index + 1, path)?;
        let z = parse_f64(line, 20, 30, index + 1, path)?;
        let symbol = slice_and_trim(line, 31, 34);
        let element = Element::from_symbol(symbol).ok_or_else(|| {
            parse_error(
                index + 1,
                SdfParseErrorKind::UnknownElement {
                    symbol: symbol.to_string(),
                },
            )
        })?;
        elements.push(element);
        positions.push(Point3::new(x, y, z));
    }

    let mut bonds = Vec::with_capacity(bond_count);
    for index in bonds_start..bonds_start + bond_count {
        let line = &lines[index];
        let a = parse_usize(line, 0, 3, index + 1, path)?;
        let b = parse_usize(line, 3, 6, index + 1, path)?;
        for serial in [a, b] {
            if serial == 0 || serial > atom_count {
                return Err(parse_error(
                    index + 1,
                    SdfParseErrorKind::BondOutOfRange {
                        serial,
                        atom_count,
                    },
                ));
            }
        }
        bonds.push((a - 1, b - 1));
    }

    // Skip the property block (M  CHG and friends) up to the terminator.
    let mut index = bonds_start + bond_count;
    loop {
        if index >= lines.len() || lines[index].starts_with("$$$$") {
            return Err(parse_error(first_line, SdfParseErrorKind::MissingMolEnd));
        }
        if lines[index].starts_with("M  END") {
            index += 1;
            break;
        }
        index += 1;
    }

    // SD tag blocks: "> <name>" header, value lines, blank separator.
    let mut tags = Vec::new();
    while index < lines.len() && !lines[index].starts_with("$$$$") {
        let line = &lines[index];
        if line.starts_with('>') {
            let name = match (line.find('<'), line.rfind('>')) {
                (Some(open), Some(close)) if open + 1 < close => line[open + 1..close].to_string(),
                _ => {
                    index += 1;
                    continue;
                }
            };
            let mut values = Vec::new();
            index += 1;
            while index < lines.len()
                && !lines[index].trim().is_empty()
                && !lines[index].starts_with("$$$$")
            {
                values.push(lines[index].trim().to_string());
                index += 1;
            }
            tags.push((name, values.join("\n")));
        } else {
            index += 1;
        }
    }
    if index < lines.len() {
        index += 1; // consume "$$$$"
    }
    *cursor = index;

    Ok(Some(RawRecord {
        title,
        first_line,
        elements,
        bonds,
        positions,
        tags,
    }))
}

fn parse_usize(
    line: &str,
    start: usize,
    end: usize,
    line_num: usize,
    path: &Path,
) -> Result<usize, SdfError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| SdfError::Parse {
        path: path.to_path_buf(),
        line: line_num,
        kind: SdfParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        },
    })
}

fn parse_f64(
    line: &str,
    start: usize,
    end: usize,
    line_num: usize,
    path: &Path,
) -> Result<f64, SdfError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| SdfError::Parse {
        path: path.to_path_buf(),
        line: line_num,
        kind: SdfParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        },
    })
}
