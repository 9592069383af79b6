use crate::error::{CliError, Result};
use minmatch::workflows::compare::CompareInput;
use std::path::{Path, PathBuf};

/// Reads the input list: one `level-of-theory, path` pair per line, the
/// reference file first. `#` starts a comment; blank lines are skipped.
pub fn read_input_list(path: &Path) -> Result<Vec<CompareInput>> {
    let invalid = |message: String| CliError::InputList {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| invalid(e.to_string()))?;

    let mut inputs = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| invalid(e.to_string()))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < 2 || record[0].is_empty() || record[1].is_empty() {
            return Err(invalid(format!(
                "entry {} must be 'level-of-theory, file.sdf', got '{}'",
                line + 1,
                record.iter().collect::<Vec<_>>().join(",")
            )));
        }
        inputs.push(CompareInput {
            theory: record[0].to_string(),
            path: PathBuf::from(&record[1]),
        });
    }

    if inputs.is_empty() {
        return Err(invalid(
            "no entries found; at least the reference file is required".to_string(),
        ));
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_list(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.in");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn entries_parse_in_order_with_comments_skipped() {
        let (_dir, path) = write_list(
            "# reference first\n\
             MP2/def2-TZVP, ref.sdf\n\
             \n\
             B3LYP-D3MBJ/6-311++G**, query.sdf\n",
        );
        let inputs = read_input_list(&path).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].theory, "MP2/def2-TZVP");
        assert_eq!(inputs[0].path, PathBuf::from("ref.sdf"));
        assert_eq!(inputs[1].theory, "B3LYP-D3MBJ/6-311++G**");
    }

    #[test]
    fn missing_field_is_rejected_with_line_context() {
        let (_dir, path) = write_list("MP2/def2-TZVP\n");
        let result = read_input_list(&path);
        assert!(matches!(result, Err(CliError::InputList { .. })));
    }

    #[test]
    fn empty_list_is_rejected() {
        let (_dir, path) = write_list("# only comments\n");
        let result = read_input_list(&path);
        assert!(matches!(result, Err(CliError::InputList { .. })));
    }

    #[test]
    fn missing_file_is_rejected() {
        let result = read_input_list(Path::new("/nonexistent/match.in"));
        assert!(matches!(result, Err(CliError::InputList { .. })));
    }
}
