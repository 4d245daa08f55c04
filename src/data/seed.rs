use crate::error::{Result, VecfuzzError};
use crate::types::{format_vector_line, Matrix, Value, Vector};
use std::io::Write;
use std::path::Path;

/// Read a seed matrix: one vector per line, signed integers separated by
/// whitespace. Blank lines are skipped.
pub fn read_seed_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| VecfuzzError::SeedData(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut matrix = Matrix::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut vector = Vector::new();
        for token in line.split_whitespace() {
            let value: i64 = token.parse().map_err(|_| {
                VecfuzzError::SeedData(format!(
                    "{}:{}: invalid integer '{}'",
                    path.display(),
                    line_no + 1,
                    token
                ))
            })?;
            vector.push(Value::Integer(value));
        }
        matrix.push(vector);
    }
    Ok(matrix)
}

/// Write a matrix in the seed file format: space-separated values, one
/// vector per line, trailing newline per line.
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &[Vector]) -> Result<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    for vector in matrix {
        writeln!(file, "{}", format_vector_line(vector))?;
    }
    Ok(())
}
